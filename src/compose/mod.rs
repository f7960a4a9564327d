//! Chart composition: typed configuration, per-chart layout and canvas
//! assembly.

pub mod composer;
pub mod config;
pub mod curve;
pub mod scene;

pub use composer::{ChartComposer, LayoutExtent};
pub use config::{AxisConfig, CanvasParams, ChartConfig, TextBlock};
pub use scene::SceneBuilder;
