use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Rendering shape of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Lines,
    Areas,
    Dots,
}

impl SeriesKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Areas => "areas",
            Self::Dots => "dots",
        }
    }
}

/// Display parameters carried next to the type tag.
///
/// `curve = 1` enables monotone-X smoothing for line paths, `view_dots = 1`
/// overlays a fixed-radius marker on every line point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub curve: u8,
    #[serde(default)]
    pub view_dots: u8,
}

/// Ordered collection of data points plus presentation state.
///
/// Point order is path order for lines and areas and is never resorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub params: SeriesParams,
    pub style: IndexMap<String, String>,
    pub attributes: IndexMap<String, String>,
    pub data: Vec<DataPoint>,
}

impl Series {
    /// Builds a series, rejecting elements without a name or type tag.
    pub fn new(
        name: impl Into<String>,
        kind: SeriesKind,
        params: SeriesParams,
        style: IndexMap<String, String>,
        attributes: IndexMap<String, String>,
    ) -> ChartResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ChartError::MissingName);
        }
        if params.kind.as_deref().is_none_or(str::is_empty) {
            return Err(ChartError::MissingKind { name });
        }
        Ok(Self {
            name,
            kind,
            params,
            style,
            attributes,
            data: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<DataPoint>) -> Self {
        self.data = data;
        self
    }

    pub fn push(&mut self, point: DataPoint) {
        self.data.push(point);
    }

    /// Serializes the style map into a CSS declaration string.
    ///
    /// Insertion order is preserved so output stays byte-stable.
    #[must_use]
    pub fn style_string(&self) -> String {
        style_string(&self.style)
    }
}

/// Renders a style map as `key:value;...` pairs, the form SVG expects in a
/// `style` attribute.
#[must_use]
pub fn style_string(style: &IndexMap<String, String>) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>()
        .join(";")
}

/// Reads the `font-size` entry out of a style map, falling back when absent
/// or unparsable.
#[must_use]
pub fn font_size_of(style: &IndexMap<String, String>, fallback: f64) -> f64 {
    style
        .get("font-size")
        .and_then(|raw| raw.trim_end_matches("px").trim().parse::<f64>().ok())
        .unwrap_or(fallback)
}
