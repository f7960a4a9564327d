use crate::error::{ChartError, ChartResult};

/// Linear domain→pixel mapping.
///
/// Unlike a viewport-wide scale, the range is explicit so the y axis can use
/// an inverted pixel range (`[plot_height, 0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-degenerate".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a domain value to a pixel position. Values outside the domain
    /// extrapolate linearly rather than clamp.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }
}

/// Nice tick values across `[start, stop]`, aiming for roughly `count`
/// entries using the 1/2/5 step rule.
#[must_use]
pub fn tick_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || start >= stop || count == 0 {
        return Vec::new();
    }
    let step = tick_step(start, stop, count);
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let first = (start / step).ceil();
    let last = (stop / step).floor();
    let n = (last - first) as usize;
    let mut values = Vec::with_capacity(n + 1);
    let mut i = first;
    while i <= last {
        values.push(i * step);
        i += 1.0;
    }
    values
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start) / count.max(1) as f64;
    let step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    step1 * factor
}

/// Renders a tick label.
///
/// Supports the fixed-precision subset of d3 format strings (".0f", ".2f",
/// …); anything else falls back to a step-derived precision.
#[must_use]
pub fn format_tick(value: f64, step: f64, format: &str) -> String {
    if let Some(precision) = fixed_precision(format) {
        return format!("{value:.precision$}");
    }
    let decimals = step_decimals(step);
    let text = format!("{value:.decimals$}");
    if decimals > 0 {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

fn fixed_precision(format: &str) -> Option<usize> {
    let digits = format.strip_prefix('.')?.strip_suffix('f')?;
    digits.parse().ok()
}

fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()) as usize
}
