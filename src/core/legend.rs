use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Placement of a text block relative to its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
    /// Rendered at the plot origin without contributing to the bounding box.
    Custom,
}

impl LegendPosition {
    pub fn from_name(name: &str) -> ChartResult<Self> {
        match name {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "custom" => Ok(Self::Custom),
            other => Err(ChartError::InvalidLegendPosition(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Custom => "custom",
        }
    }
}

/// Anchored multi-line text block.
///
/// Text splits strictly on literal newlines; blank lines are dropped. A
/// legend whose text yields no lines is skipped by layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLegend {
    #[serde(default = "TextLegend::default_position")]
    pub position: LegendPosition,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: IndexMap<String, String>,
}

impl TextLegend {
    pub const DEFAULT_FONT_SIZE: f64 = 14.0;

    fn default_position() -> LegendPosition {
        LegendPosition::Bottom
    }

    #[must_use]
    pub fn new(position: LegendPosition, text: impl Into<String>) -> Self {
        Self {
            position,
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
    pub fn validate(&self) -> bool {
        !self.lines().is_empty()
    }

    #[must_use]
    pub fn font_size(&self) -> f64 {
        crate::core::series::font_size_of(&self.style, Self::DEFAULT_FONT_SIZE)
    }
}
