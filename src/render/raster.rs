use crate::error::{ChartError, ChartResult};

/// Contract implemented by the raster-encoding collaborator.
///
/// Encoders run strictly after composition and see only the serialized
/// document, never layout state. A failure here is a service-level
/// `Encoding` error; the vector document itself is still considered
/// successfully produced.
pub trait RasterEncoder {
    fn encode(&self, svg: &str) -> ChartResult<Vec<u8>>;
}

/// Pass-through encoder used by tests and headless embedding.
///
/// It still rejects documents that are not SVG markup so tests can catch a
/// broken pipeline before a real encoder is introduced.
#[derive(Debug, Default)]
pub struct NullRasterEncoder;

impl RasterEncoder for NullRasterEncoder {
    fn encode(&self, svg: &str) -> ChartResult<Vec<u8>> {
        if !svg.starts_with("<svg") {
            return Err(ChartError::Encoding(
                "input is not an SVG document".to_owned(),
            ));
        }
        Ok(svg.as_bytes().to_vec())
    }
}
