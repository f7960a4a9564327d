//! Pure layout arithmetic shared by the composer and the transport boundary.
//!
//! Everything here is stateless: extremum scans across series, table
//! column measurement, and payload chunking.

use smallvec::SmallVec;

use crate::core::table::{Cell, cell_text};
use crate::core::{DataPoint, Series};
use crate::error::{ChartError, ChartResult};

/// Axis selector for extremum scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[must_use]
    pub fn value_of(self, point: &DataPoint) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

/// Reduction direction for extremum scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Per-axis extremum across a set of series.
///
/// In max mode missing values count as 0 and the scan never dips below 0;
/// in min mode they count as +∞ so they never win. When no finite value
/// survives (or the max scan stays at 0), `default` is returned so
/// degenerate data still yields a visible axis.
#[must_use]
pub fn min_max<'a, I>(series: I, axis: Axis, default: f64, mode: Extremum) -> f64
where
    I: IntoIterator<Item = &'a Series>,
{
    let per_series: Vec<f64> = series
        .into_iter()
        .map(|s| series_extremum(&s.data, axis, mode))
        .collect();
    reduce_extrema(&per_series, default, mode)
}

fn series_extremum(data: &[DataPoint], axis: Axis, mode: Extremum) -> f64 {
    match mode {
        Extremum::Max => data
            .iter()
            .map(|p| axis.value_of(p))
            .fold(0.0, f64::max),
        Extremum::Min => data
            .iter()
            .map(|p| axis.value_of(p))
            .fold(f64::INFINITY, f64::min),
    }
}

fn reduce_extrema(values: &[f64], default: f64, mode: Extremum) -> f64 {
    let default = if default.is_finite() { default } else { 100.0 };
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return default;
    }
    match mode {
        Extremum::Max => {
            let result = finite.into_iter().fold(0.0, f64::max);
            if result != 0.0 { result } else { default }
        }
        Extremum::Min => {
            let result = finite.into_iter().fold(f64::INFINITY, f64::min);
            if result.is_finite() { result } else { default }
        }
    }
}

/// One width per table column: longest stringified cell in that column
/// (headers included) times the padding factor.
#[must_use]
pub fn table_column_widths(
    headers: &[String],
    rows: &[Vec<Cell>],
    padding: f64,
) -> SmallVec<[f64; 8]> {
    let mut matrix: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    matrix.push(headers.to_vec());

    transpose_filtered(&matrix)
        .iter()
        .map(|column| max_element_length(column) as f64 * padding)
        .collect()
}

/// Length in characters of the longest element.
#[must_use]
pub fn max_element_length(items: &[String]) -> usize {
    items
        .iter()
        .map(|item| item.chars().count())
        .max()
        .unwrap_or(0)
}

/// Transposes a possibly ragged matrix, dropping missing cells instead of
/// padding them.
#[must_use]
pub fn transpose_filtered(matrix: &[Vec<String>]) -> Vec<Vec<String>> {
    let columns = matrix.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            matrix
                .iter()
                .filter_map(|row| row.get(i).cloned())
                .collect()
        })
        .collect()
}

/// Splits an opaque encoded payload into chunks of at most `chunk_length`
/// characters. Transport boundary only.
pub fn chunk_string(payload: &str, chunk_length: usize) -> ChartResult<Vec<String>> {
    if chunk_length == 0 {
        return Err(ChartError::InvalidData(
            "chunk length must be positive".to_owned(),
        ));
    }
    let chars: Vec<char> = payload.chars().collect();
    Ok(chars
        .chunks(chunk_length)
        .map(|chunk| chunk.iter().collect())
        .collect())
}
