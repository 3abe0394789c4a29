//! API設定
//!
//! `assets/api.config.json` をコンパイル時に埋め込む。
//! ビルド時に `CALC_API_BASE_URL` があればそちらを優先する。

use serde::Deserialize;

use crate::error::ConfigError;

const EMBEDDED_CONFIG: &str = include_str!("../assets/api.config.json");
const CALCULATE_PATH: &str = "calculate";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// 埋め込み設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_json(EMBEDDED_CONFIG)?;
        if let Some(url) = option_env!("CALC_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ApiConfig = serde_json::from_str(json)?;
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(config)
    }

    /// `{base_url}/calculate`
    pub fn calculate_url(&self) -> String {
        join_url(&self.base_url, CALCULATE_PATH)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim().trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_url_with_trailing_slash() {
        let config = ApiConfig::from_json(r#"{"base_url": "http://localhost:5000/"}"#).unwrap();
        assert_eq!(config.calculate_url(), "http://localhost:5000/calculate");
    }

    #[test]
    fn test_calculate_url_without_trailing_slash() {
        let config = ApiConfig::from_json(r#"{"base_url": "https://api.example.com/v1"}"#).unwrap();
        assert_eq!(config.calculate_url(), "https://api.example.com/v1/calculate");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = ApiConfig::from_json(r#"{"base_url": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBaseUrl));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = ApiConfig::from_json("{base_url:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_embedded_config_loads() {
        let config = ApiConfig::load().unwrap();
        assert!(config.calculate_url().ends_with("/calculate"));
    }
}
