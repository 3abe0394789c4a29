//! データ構造体モジュール

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// 入力フォーム
// ============================================

pub const FIELD_COUNT: usize = 11;

/// APIに送るキー名（フォームの並び順）
pub const FIELD_KEYS: [&str; FIELD_COUNT] = [
    "input_1", "input_2", "input_3", "input_4", "input_5", "input_6",
    "input_7", "input_8", "input_9", "input_10", "input_11",
];

/// 11項目の数値入力。未入力は `None`
///
/// JSON上は `{"input_1": 1.5, "input_2": null, ...}` の形になる。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormValues([Option<f64>; FIELD_COUNT]);

impl FormValues {
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// 範囲外のインデックスは無視
    pub fn set(&mut self, index: usize, value: Option<f64>) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// 最初の未入力項目
    pub fn first_missing(&self) -> Option<usize> {
        self.0.iter().position(Option::is_none)
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (key, value) in FIELD_KEYS.iter().zip(self.0.iter()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Option<f64>>::deserialize(deserializer)?;
        let mut values = FormValues::default();
        for (index, key) in FIELD_KEYS.iter().enumerate() {
            values.set(index, raw.get(*key).copied().flatten());
        }
        Ok(values)
    }
}

/// 入力欄の文字列を数値に変換（空・不正値は未入力扱い）
pub fn parse_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ============================================
// 計算結果
// ============================================

/// グラフの横軸ラベル
pub const CATEGORY_LABELS: [&str; 4] = ["1st", "2nd", "3rd", "4th"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcResult {
    #[serde(default)]
    pub display_values: Vec<f64>,
    #[serde(default)]
    pub graph_values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn filled() -> FormValues {
        let mut values = FormValues::default();
        for i in 0..FIELD_COUNT {
            values.set(i, Some(i as f64 + 1.0));
        }
        values
    }

    #[test]
    fn test_first_missing() {
        let mut values = filled();
        assert_eq!(values.first_missing(), None);

        values.set(7, None);
        values.set(3, None);
        assert_eq!(values.first_missing(), Some(3));

        assert_eq!(FormValues::default().first_missing(), Some(0));
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut values = FormValues::default();
        values.set(FIELD_COUNT, Some(1.0));
        assert_eq!(values, FormValues::default());
        assert_eq!(values.get(FIELD_COUNT), None);
    }

    #[test]
    fn test_serialize_uses_field_keys_in_order() {
        let mut values = FormValues::default();
        values.set(0, Some(2.5));
        values.set(10, Some(-4.0));

        let text = serde_json::to_string(&values).unwrap();
        assert!(text.starts_with(r#"{"input_1":2.5,"input_2":null"#));
        assert!(text.ends_with(r#""input_11":-4.0}"#));
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let values: FormValues = serde_json::from_value(json!({
            "input_2": 7,
            "input_5": null,
            "unrelated": 3
        }))
        .unwrap();
        assert_eq!(values.get(1), Some(7.0));
        assert_eq!(values.get(4), None);
        assert_eq!(values.first_missing(), Some(0));
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("   "), None);
        assert_eq!(parse_field("12"), Some(12.0));
        assert_eq!(parse_field(" -0.5 "), Some(-0.5));
        assert_eq!(parse_field("abc"), None);
        assert_eq!(parse_field("inf"), None);
        assert_eq!(parse_field("NaN"), None);
    }

    #[test]
    fn test_format_field() {
        assert_eq!(format_field(None), "");
        assert_eq!(format_field(Some(5.0)), "5");
        assert_eq!(format_field(Some(2.25)), "2.25");
    }

    #[test]
    fn test_result_uses_camel_case_keys() {
        let result: CalcResult = serde_json::from_value(json!({
            "displayValues": [1, 2, 3, 4],
            "graphValues": [0.5, 1.5, 2.5, 3.5]
        }))
        .unwrap();
        assert_eq!(result.display_values, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(result.graph_values, vec![0.5, 1.5, 2.5, 3.5]);

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("displayValues").is_some());
        assert!(value.get("graphValues").is_some());
    }
}
