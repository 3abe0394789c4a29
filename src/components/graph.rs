//! 棒グラフコンポーネント
//!
//! 入力が変わるたびに Chart.js のインスタンスを作り直す。

use leptos::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::chart::{BarChart, ChartConfig, DEFAULT_TITLE};
use crate::utils::log_trace::log_error;

#[wasm_bindgen]
extern "C" {
    /// index.html で読み込む Chart.js 2
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<JsChart, JsValue>;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &JsChart);
}

fn draw(canvas: &HtmlCanvasElement, config: &ChartConfig) -> Result<JsChart, String> {
    let options = config
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("chart options: {}", e))?;
    JsChart::new(canvas, &options).map_err(|e| format!("Chart.js: {:?}", e))
}

#[component]
pub fn Graph(
    #[prop(into)] values: Signal<Vec<f64>>,
    #[prop(into, default = MaybeSignal::Static(DEFAULT_TITLE.to_string()))] title: MaybeSignal<String>,
    #[prop(optional, into)] max: MaybeSignal<Option<f64>>,
    #[prop(optional, into)] step: MaybeSignal<Option<f64>>,
    /// 描画のたびに canvas を通知
    #[prop(optional)] on_ready: Option<Callback<HtmlCanvasElement>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let instance = store_value(None::<JsChart>);

    create_effect(move |_| {
        let chart = BarChart {
            title: title.get(),
            values: values.get(),
            max: max.get(),
            step: step.get(),
        };
        let Some(canvas_el) = canvas_ref.get() else {
            return;
        };
        let canvas: &HtmlCanvasElement = &canvas_el;
        let canvas = canvas.clone();

        // 差分更新はせず、前のインスタンスを破棄して描き直す
        instance.update_value(|current| {
            if let Some(old) = current.take() {
                old.destroy();
            }
        });

        match draw(&canvas, &chart.config()) {
            Ok(created) => {
                instance.set_value(Some(created));
                if let Some(cb) = on_ready.as_ref() {
                    cb.call(canvas);
                }
            }
            Err(e) => log_error("chart", &e),
        }
    });

    on_cleanup(move || {
        instance.update_value(|current| {
            if let Some(old) = current.take() {
                old.destroy();
            }
        });
    });

    view! {
        <div class="graph">
            <canvas node_ref=canvas_ref></canvas>
        </div>
    }
}
