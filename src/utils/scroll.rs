//! スクロール・フォーカス補助

use web_sys::{Element, FocusOptions, HtmlElement, ScrollBehavior, ScrollToOptions};

/// 画面内での揃え位置
///
/// `top` は 0.0 で要素の上端を画面上端に、1.0 で要素の下端を画面下端に揃える。
/// `offset` はそこからさらに上にずらすピクセル数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Align {
    pub top: f64,
    pub offset: f64,
}

/// 未入力項目：上端から25px下
pub const FIELD_ALIGN: Align = Align { top: 0.0, offset: 25.0 };
/// グラフ：下端を画面下端から15px上
pub const GRAPH_ALIGN: Align = Align { top: 1.0, offset: -15.0 };

/// 目標のスクロール位置（ドキュメント座標）
pub fn aligned_scroll_top(
    scroll_y: f64,
    element_top: f64,
    element_height: f64,
    viewport_height: f64,
    align: Align,
) -> f64 {
    let target = scroll_y + element_top - (viewport_height - element_height) * align.top - align.offset;
    target.max(0.0)
}

/// 要素が揃え位置に来るようにスムーズスクロール
pub fn reveal(element: &Element, align: Align) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let rect = element.get_bounding_client_rect();
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    let options = ScrollToOptions::new();
    options.set_top(aligned_scroll_top(scroll_y, rect.top(), rect.height(), viewport_height, align));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// スクロール位置を変えずにフォーカス
pub fn focus_quietly(element: &HtmlElement) {
    let options = FocusOptions::new();
    options.set_prevent_scroll(true);
    let _ = element.focus_with_options(&options);
}
