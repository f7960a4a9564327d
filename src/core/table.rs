use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Cells arrive as arbitrary JSON scalars; layout only needs their text form.
pub type Cell = serde_json::Value;

/// Display text for one table cell. Strings render unquoted, everything else
/// uses the JSON rendering.
#[must_use]
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::String(s) => s.clone(),
        Cell::Null => String::new(),
        other => other.to_string(),
    }
}

/// Cell band styling for the header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderBand {
    pub height: f64,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
}

impl Default for HeaderBand {
    fn default() -> Self {
        Self {
            height: 35.0,
            background_color: "white".to_owned(),
        }
    }
}

/// Cell band styling for body rows, with alternating-parity backgrounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowBand {
    pub height: f64,
    #[serde(rename = "evenBackgroundColor")]
    pub even_background_color: String,
    #[serde(rename = "oddBackgroundColor")]
    pub odd_background_color: String,
}

impl Default for RowBand {
    fn default() -> Self {
        Self {
            height: 35.0,
            even_background_color: "grey".to_owned(),
            odd_background_color: "white".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyles {
    pub headers: HeaderBand,
    pub rows: RowBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub color: String,
    pub width: f64,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: "black".to_owned(),
            width: 1.5,
        }
    }
}

/// Free-form CSS maps for header and body cell text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyles {
    pub headers: IndexMap<String, String>,
    pub rows: IndexMap<String, String>,
}

/// Per-region table styling: cell text, cell bands, borders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyles {
    pub text: TextStyles,
    pub cells: CellStyles,
    pub borders: BorderStyle,
}

/// Headers plus a rectangular row matrix.
///
/// Rectangularity is enforced at construction; a structurally empty table
/// (no headers or no rows) is still representable and is skipped by layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub styles: TableStyles,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>, styles: TableStyles) -> ChartResult<Self> {
        let table = Self {
            headers,
            rows,
            styles,
        };
        if let Some((index, row)) = table
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != table.headers.len())
        {
            return Err(ChartError::MalformedTable(format!(
                "row {index} has {} cells, expected {}",
                row.len(),
                table.headers.len()
            )));
        }
        Ok(table)
    }

    /// True iff there is at least one header and every row matches the
    /// header count.
    #[must_use]
    pub fn validate(&self) -> bool {
        !self.headers.is_empty()
            && self
                .rows
                .iter()
                .all(|row| row.len() == self.headers.len())
    }

    /// Appends a row, enforcing the header count.
    pub fn add_row(&mut self, row: Vec<Cell>) -> ChartResult<()> {
        if row.len() != self.headers.len() {
            return Err(ChartError::MalformedTable(format!(
                "row length {} does not match header count {}",
                row.len(),
                self.headers.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// A table without headers or without rows draws nothing.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.headers.is_empty() && !self.rows.is_empty()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            headers: Vec<String>,
            #[serde(default)]
            rows: Vec<Vec<Cell>>,
            #[serde(default)]
            styles: TableStyles,
        }
        let raw = Raw::deserialize(deserializer)?;
        Table::new(raw.headers, raw.rows, raw.styles).map_err(serde::de::Error::custom)
    }
}
