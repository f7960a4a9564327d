//! chart-compose: declarative chart composition and automatic layout.
//!
//! Turns a declarative description of one or more charts (axes, line/area/
//! scatter series, tables, text legends) into a single composed SVG
//! document, stacking charts vertically without overlap and growing the
//! canvas to fit. Raster output is delegated to a [`render::RasterEncoder`]
//! collaborator; the service module adapts the two supported wire request
//! shapes onto the engine.

pub mod compose;
pub mod core;
pub mod error;
pub mod render;
pub mod service;
pub mod telemetry;

pub use compose::{CanvasParams, ChartComposer, ChartConfig, LayoutExtent, SceneBuilder};
pub use error::{ChartError, ChartResult};
