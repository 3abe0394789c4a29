//! 計算結果パネル

use leptos::*;
use web_sys::HtmlCanvasElement;

use crate::components::Graph;
use crate::form::FormController;
use crate::models::{CalcResult, CATEGORY_LABELS};
use crate::utils::scroll::{reveal, GRAPH_ALIGN};

fn series(ctrl: FormController, pick: fn(&CalcResult) -> &Vec<f64>) -> Signal<Vec<f64>> {
    Signal::derive(move || {
        ctrl.result
            .with(|r| r.as_ref().map(|r| pick(r).clone()))
            .unwrap_or_default()
    })
}

#[component]
pub fn ResultPanel() -> impl IntoView {
    let ctrl = use_context::<FormController>().expect("FormController not found");

    let graph_values = series(ctrl, |r| &r.graph_values);
    let display_values = series(ctrl, |r| &r.display_values);

    // 2つのグラフで縦軸を揃える
    let shared_max = Signal::derive(move || {
        graph_values
            .get()
            .into_iter()
            .chain(display_values.get())
            .reduce(f64::max)
    });

    let on_graph_ready = Callback::new(move |canvas: HtmlCanvasElement| {
        ctrl.scroll_to_graph(|| reveal(&canvas, GRAPH_ALIGN));
    });

    view! {
        <Show when=move || ctrl.calculated()>
            <section class="result-panel">
                <h2>"Results"</h2>
                <table class="display-values">
                    <tbody>
                        {move || display_values.get().into_iter().enumerate().map(|(i, v)| view! {
                            <tr>
                                <th>{CATEGORY_LABELS.get(i).copied().unwrap_or("-")}</th>
                                <td>{v}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>

                <Graph title="Graph values" values=graph_values max=shared_max on_ready=on_graph_ready />
                <Graph title="Display values" values=display_values max=shared_max />
            </section>
        </Show>
    }
}
