//! エラー型

use thiserror::Error;

/// 設定ファイルの読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("api config has an empty base_url")]
    EmptyBaseUrl,
}

/// 計算APIの呼び出しエラー
///
/// 画面上はどれも同じ汎用メッセージになる。区別はログ用。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("request could not be built: {0}")]
    Request(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

/// 送信処理のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("required field input_{} is empty", .field + 1)]
    Invalid { field: usize },
    #[error("a calculation is already in progress")]
    Busy,
    #[error("calculation failed: {0}")]
    Remote(#[from] CalcError),
}
