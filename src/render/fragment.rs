use crate::render::Mark;

/// Named, translated group of marks — one SVG `<g>` element.
///
/// The composer emits every chart region (plot focus, titles, tables,
/// legend blocks) as its own fragment so the writer can emit a stable,
/// inspectable group structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub class: String,
    pub translate: (f64, f64),
    /// Rotation in degrees applied after the translation (y-axis titles).
    pub rotate: Option<f64>,
    pub marks: Vec<Mark>,
}

impl Fragment {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            translate: (0.0, 0.0),
            rotate: None,
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub fn translated(class: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            class: class.into(),
            translate: (x, y),
            rotate: None,
            marks: Vec::new(),
        }
    }

    pub fn push(&mut self, mark: impl Into<Mark>) {
        self.marks.push(mark.into());
    }

    /// Shifts the whole group. Used once per chart to apply legend gutters.
    pub fn shift(&mut self, dx: f64, dy: f64) {
        self.translate.0 += dx;
        self.translate.1 += dy;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
