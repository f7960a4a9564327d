use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::series::font_size_of;

/// Multi-line text block with a free-form CSS map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: IndexMap<String, String>,
}

impl TextBlock {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect()
    }

    #[must_use]
    pub fn font_size(&self, fallback: f64) -> f64 {
        font_size_of(&self.style, fallback)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

/// Every recognized axis option with its explicit default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_count: Option<usize>,
    pub format: String,
    pub text: Option<TextBlock>,
    pub font_size: Option<f64>,
}

impl AxisConfig {
    pub const DEFAULT_TICK_COUNT: usize = 15;

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick_count.unwrap_or(Self::DEFAULT_TICK_COUNT)
    }

    /// Explicit bound, if set. Zero counts as unset, matching the wire
    /// contract where absent numbers arrive as 0.
    #[must_use]
    pub fn explicit(bound: Option<f64>) -> Option<f64> {
        bound.filter(|v| v.is_finite() && *v != 0.0)
    }
}

/// Per-chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub axis_x: AxisConfig,
    pub axis_y: AxisConfig,
    pub header: Option<TextBlock>,
    pub footer: Option<TextBlock>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 500.0,
            height: 500.0,
            axis_x: AxisConfig::default(),
            axis_y: AxisConfig::default(),
            header: None,
            footer: None,
        }
    }
}

/// Canvas-level parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasParams {
    pub width: f64,
    pub height: f64,
    pub id: String,
}

impl Default for CanvasParams {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            id: "svgMain".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = ChartConfig::default();
        assert_eq!(config.width, 500.0);
        assert_eq!(config.height, 500.0);
        assert_eq!(config.axis_x.tick_count(), 15);
        assert_eq!(CanvasParams::default().id, "svgMain");
    }

    #[test]
    fn zero_bound_counts_as_unset() {
        assert_eq!(AxisConfig::explicit(Some(0.0)), None);
        assert_eq!(AxisConfig::explicit(Some(42.0)), Some(42.0));
        assert_eq!(AxisConfig::explicit(None), None);
    }

    #[test]
    fn partial_axis_json_fills_defaults() {
        let axis: AxisConfig = serde_json::from_str(r#"{"max": 10}"#).expect("valid axis json");
        assert_eq!(axis.max, Some(10.0));
        assert_eq!(axis.min, None);
        assert!(axis.format.is_empty());
    }
}
