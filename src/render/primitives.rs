/// Backend-agnostic draw commands in pixel space.
///
/// The composer emits these; the SVG writer serializes them. Coordinates are
/// relative to the owning fragment's translation.

/// One straight stroke segment (axis domain lines, gridlines, table borders).
#[derive(Debug, Clone, PartialEq)]
pub struct LineMark {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub class: &'static str,
}

/// Filled rectangle (table bands).
#[derive(Debug, Clone, PartialEq)]
pub struct RectMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub class: &'static str,
}

/// One circle (scatter points, line markers).
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMark {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub style: String,
    pub class: &'static str,
}

/// Text run. `transform` carries translate/rotate combinations for axis
/// titles; `baseline_middle` maps to `dominant-baseline="middle"`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub style: String,
    pub transform: Option<String>,
    pub baseline_middle: bool,
    pub class: &'static str,
}

impl TextMark {
    #[must_use]
    pub fn at(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            style: String::new(),
            transform: None,
            baseline_middle: false,
            class: "",
        }
    }
}

/// Arbitrary path (series lines and area fills).
#[derive(Debug, Clone, PartialEq)]
pub struct PathMark {
    pub d: String,
    pub style: String,
    pub attributes: Vec<(String, String)>,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Line(LineMark),
    Rect(RectMark),
    Circle(CircleMark),
    Text(TextMark),
    Path(PathMark),
}

impl From<LineMark> for Mark {
    fn from(mark: LineMark) -> Self {
        Self::Line(mark)
    }
}

impl From<RectMark> for Mark {
    fn from(mark: RectMark) -> Self {
        Self::Rect(mark)
    }
}

impl From<CircleMark> for Mark {
    fn from(mark: CircleMark) -> Self {
        Self::Circle(mark)
    }
}

impl From<TextMark> for Mark {
    fn from(mark: TextMark) -> Self {
        Self::Text(mark)
    }
}

impl From<PathMark> for Mark {
    fn from(mark: PathMark) -> Self {
        Self::Path(mark)
    }
}
