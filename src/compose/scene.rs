//! Canvas assembly: stacks charts vertically and sizes the root document.

use tracing::debug;

use crate::compose::composer::{ChartComposer, LayoutExtent};
use crate::compose::config::CanvasParams;
use crate::error::ChartResult;
use crate::render::write_document;

/// Owns the canvas parameters and the chart list, in stacking order.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    pub params: CanvasParams,
    pub charts: Vec<ChartComposer>,
}

impl SceneBuilder {
    #[must_use]
    pub fn new(params: CanvasParams) -> Self {
        Self {
            params,
            charts: Vec::new(),
        }
    }

    pub fn push(&mut self, chart: ChartComposer) {
        self.charts.push(chart);
    }

    /// Lays out every chart top to bottom and serializes the canvas.
    ///
    /// Each chart starts where the previous one's extent ended, plus a
    /// margin of 2% of that chart's configured height, so stacked charts
    /// never overlap. The canvas grows to fit; it never shrinks below the
    /// configured size horizontally.
    pub fn render(&self) -> ChartResult<String> {
        let mut cursor = 0.0;
        let mut end_x: f64 = 0.0;
        let mut charts = Vec::with_capacity(self.charts.len());
        for chart in &self.charts {
            let mut extent = LayoutExtent::default();
            let fragments = chart.layout(cursor, &mut extent)?;
            cursor = extent.position_y + chart.config.height * 0.02;
            end_x = end_x.max(extent.position_x);
            charts.push(fragments);
        }

        let height = if self.charts.is_empty() {
            self.params.height
        } else {
            cursor
        };
        let width = self.params.width.max(end_x);
        debug!(
            charts = self.charts.len(),
            width, height, "canvas laid out"
        );
        Ok(write_document(width, height, &self.params.id, &charts))
    }
}
