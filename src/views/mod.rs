//! ビューモジュール

pub mod calc_form;
pub mod result_panel;

pub use calc_form::CalcForm;
pub use result_panel::ResultPanel;
