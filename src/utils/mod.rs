//! ユーティリティモジュール

pub mod api;
pub mod cache;
pub mod log_trace;
pub mod scroll;
pub mod timer;
