use serde::{Deserialize, Deserializer, Serialize};

/// CSS hex color restricted to the `#RGB` / `#RRGGBB` forms.
///
/// Anything else deserializes to black rather than failing the request, so a
/// single bad color never aborts a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexColor(String);

impl HexColor {
    pub const BLACK: &str = "#000000";

    #[must_use]
    pub fn parse(input: &str) -> Self {
        if Self::is_valid(input) {
            Self(input.to_owned())
        } else {
            tracing::warn!(color = input, "invalid color, defaulting to #000000");
            Self(Self::BLACK.to_owned())
        }
    }

    fn is_valid(input: &str) -> bool {
        let Some(digits) = input.strip_prefix('#') else {
            return false;
        };
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(Self::BLACK.to_owned())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(serde_json::Value::Null) => Self::default(),
            Some(serde_json::Value::String(s)) => Self::parse(&s),
            Some(other) => Self::parse(&other.to_string()),
        })
    }
}

/// Loosely typed scalar accepted anywhere the wire contract says "number".
///
/// Instrument payloads routinely carry numbers as strings; those coerce
/// instead of failing, with a warning at the coercion site.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

fn coerce_number(value: Option<LooseNumber>, field: &'static str) -> f64 {
    match value {
        None => 0.0,
        Some(LooseNumber::Number(n)) if n.is_finite() => n,
        Some(LooseNumber::Number(n)) => {
            tracing::warn!(field, value = n, "non-finite input, defaulting to 0");
            0.0
        }
        Some(LooseNumber::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => {
                tracing::warn!(field, value = %s, "non-numeric input, defaulting to 0");
                0.0
            }
        },
        Some(LooseNumber::Other(v)) => {
            tracing::warn!(field, value = %v, "non-numeric input, defaulting to 0");
            0.0
        }
    }
}

pub(crate) fn loose_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
    field: &'static str,
) -> Result<f64, D::Error> {
    let value = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(coerce_number(value, field))
}

fn loose_x<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "x")
}

fn loose_y<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "y")
}

fn loose_y0<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "y0")
}

fn loose_baseline<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "baseline")
}

fn loose_size<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Option::<LooseNumber>::deserialize(d)?;
    let size = match value {
        None => return Ok(DataPoint::DEFAULT_SIZE),
        some => coerce_number(some, "size"),
    };
    Ok(size.abs())
}

fn loose_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<LooseNumber>::deserialize(d)?;
    Ok(match value {
        None => None,
        Some(LooseNumber::Number(n)) if n.is_finite() => Some(n),
        Some(LooseNumber::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                tracing::warn!(field = "result", value = %s, "non-numeric flag, treating as measured");
                None
            }
        },
        Some(_) => {
            tracing::warn!(field = "result", "non-numeric flag, treating as measured");
            None
        }
    })
}

fn loose_label<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// One typed data point of a series.
///
/// All numeric fields are finite after construction. `y0` is the secondary
/// value for area fills; `flag` mirrors the instrument "result" marker where
/// exactly 0 means "no measurement" (the point is skipped from rendering but
/// keeps its index so sibling series stay aligned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default, deserialize_with = "loose_x")]
    pub x: f64,
    #[serde(default, deserialize_with = "loose_y")]
    pub y: f64,
    #[serde(default, deserialize_with = "loose_y0")]
    pub y0: f64,
    #[serde(default, deserialize_with = "loose_baseline")]
    pub baseline: f64,
    #[serde(default)]
    pub color: HexColor,
    #[serde(default = "DataPoint::default_size", deserialize_with = "loose_size")]
    pub size: f64,
    #[serde(default, deserialize_with = "loose_label")]
    pub label: String,
    #[serde(
        rename = "result",
        default,
        deserialize_with = "loose_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub flag: Option<f64>,
}

impl DataPoint {
    pub const DEFAULT_SIZE: f64 = 5.0;

    fn default_size() -> f64 {
        Self::DEFAULT_SIZE
    }

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            y0: 0.0,
            baseline: 0.0,
            color: HexColor::default(),
            size: Self::DEFAULT_SIZE,
            label: String::new(),
            flag: None,
        }
    }

    #[must_use]
    pub fn with_band(mut self, y0: f64) -> Self {
        self.y0 = y0;
        self
    }

    /// False only for the explicit "no measurement" marker.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.flag != Some(0.0)
    }
}
