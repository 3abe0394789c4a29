//! 棒グラフの設定（Chart.js 2 の options オブジェクト）

use serde::Serialize;

use crate::models::CATEGORY_LABELS;

const BG_COLOR: &str = "#2196f3";
const BORDER_COLOR: &str = "#1d79c2";
pub const DEFAULT_TITLE: &str = "Default title";

/// y軸の上限と目盛り間隔
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub max: f64,
    pub step: f64,
}

impl ChartScale {
    /// 指定がなければ（0も未指定扱い）データから算出する
    pub fn resolve(values: &[f64], max: Option<f64>, step: Option<f64>) -> Self {
        let max = explicit(max)
            .unwrap_or_else(|| values.iter().copied().reduce(f64::max).unwrap_or(0.0));
        let step = explicit(step).unwrap_or_else(|| js_round(max / 3.0));
        Self { max, step }
    }
}

fn explicit(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// JavaScript の Math.round と同じ（.5 は正の方向へ）
fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub values: Vec<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl BarChart {
    pub fn scale(&self) -> ChartScale {
        ChartScale::resolve(&self.values, self.max, self.step)
    }

    pub fn config(&self) -> ChartConfig {
        let scale = self.scale();
        ChartConfig {
            kind: "bar",
            data: ChartData {
                labels: CATEGORY_LABELS.to_vec(),
                datasets: vec![Dataset {
                    label: self.title.clone(),
                    data: self.values.clone(),
                    border_color: BORDER_COLOR,
                    background_color: BG_COLOR,
                    border_width: 1,
                }],
            },
            options: ChartOptions {
                scales: Scales {
                    y_axes: vec![Axis {
                        ticks: Ticks {
                            begin_at_zero: true,
                            max: scale.max,
                            // 0以下だとChart.js側で目盛りが作れないので自動に任せる
                            step_size: Some(scale.step).filter(|s| *s > 0.0),
                        },
                    }],
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    #[serde(rename = "yAxes")]
    pub y_axes: Vec<Axis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub ticks: Ticks,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub begin_at_zero: bool,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn chart(values: &[f64], max: Option<f64>, step: Option<f64>) -> BarChart {
        BarChart {
            title: "Graph values".to_string(),
            values: values.to_vec(),
            max,
            step,
        }
    }

    #[test]
    fn test_scale_from_values() {
        let scale = ChartScale::resolve(&[1.0, 5.0, 3.0, 9.0], None, None);
        assert_eq!(scale, ChartScale { max: 9.0, step: 3.0 });
    }

    #[test]
    fn test_explicit_scale_wins() {
        let scale = ChartScale::resolve(&[1.0, 5.0, 3.0, 9.0], Some(20.0), Some(4.0));
        assert_eq!(scale, ChartScale { max: 20.0, step: 4.0 });

        let scale = ChartScale::resolve(&[1.0, 5.0, 3.0, 9.0], Some(20.0), None);
        assert_eq!(scale.step, 7.0);
    }

    #[test]
    fn test_zero_means_unset() {
        let scale = ChartScale::resolve(&[2.0, 4.0], Some(0.0), Some(0.0));
        assert_eq!(scale, ChartScale { max: 4.0, step: 1.0 });
    }

    #[test]
    fn test_step_rounds_half_up() {
        assert_eq!(ChartScale::resolve(&[7.5], None, None).step, 3.0);
        assert_eq!(ChartScale::resolve(&[4.4], None, None).step, 1.0);
        assert_eq!(ChartScale::resolve(&[-1.5], None, None).step, 0.0);
    }

    #[test]
    fn test_empty_series() {
        let scale = ChartScale::resolve(&[], None, None);
        assert_eq!(scale, ChartScale { max: 0.0, step: 0.0 });

        let value = serde_json::to_value(chart(&[], None, None).config()).unwrap();
        assert!(value["options"]["scales"]["yAxes"][0]["ticks"].get("stepSize").is_none());
    }

    #[test]
    fn test_config_shape() {
        let value = serde_json::to_value(chart(&[1.0, 5.0, 3.0, 9.0], None, None).config()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "bar",
                "data": {
                    "labels": ["1st", "2nd", "3rd", "4th"],
                    "datasets": [{
                        "label": "Graph values",
                        "data": [1.0, 5.0, 3.0, 9.0],
                        "borderColor": "#1d79c2",
                        "backgroundColor": "#2196f3",
                        "borderWidth": 1
                    }]
                },
                "options": {
                    "scales": {
                        "yAxes": [{
                            "ticks": { "beginAtZero": true, "max": 9.0, "stepSize": 3.0 }
                        }]
                    }
                }
            })
        );
    }
}
