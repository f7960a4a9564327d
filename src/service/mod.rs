//! Boundary adapters between wire requests and the composition engine.
//!
//! Two request shapes are served: the structured universal mode and the
//! legacy lite mode for instrument readings. Both resolve the result
//! encoding first, so an unsupported output combination is rejected before
//! any layout work runs.

pub mod lite;
pub mod universal;

pub use lite::{LiteGroupRequest, LiteReading, LiteRequest, NamedResult, render_lite,
    render_lite_grouped};
pub use universal::{ElementSpec, UniversalChart, UniversalRequest, render_universal};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ChartError, ChartResult};
use crate::render::RasterEncoder;

/// Result shape selected from the `(typeresult, result_param)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultEncoding {
    /// Raw vector markup.
    RawSvg,
    /// Vector markup, base64-encoded.
    Base64Svg,
    /// Raster bytes from the encoder collaborator, base64-encoded.
    Base64Png,
}

impl ResultEncoding {
    /// Resolves the output combination, failing fast on anything outside
    /// the supported matrix.
    pub fn select(type_result: &str, result_param: &str) -> ChartResult<Self> {
        match (type_result, result_param) {
            ("svg", "1" | "2") => Ok(Self::RawSvg),
            ("svg", "0") => Ok(Self::Base64Svg),
            ("png", _) => Ok(Self::Base64Png),
            _ => Err(ChartError::UnsupportedOutput {
                type_result: type_result.to_owned(),
                result_param: result_param.to_owned(),
            }),
        }
    }

    /// Applies the encoding to a finished vector document. Raster failures
    /// surface as [`ChartError::Encoding`], distinct from composition
    /// failures.
    pub fn apply(self, svg: String, encoder: &dyn RasterEncoder) -> ChartResult<String> {
        match self {
            Self::RawSvg => Ok(svg),
            Self::Base64Svg => Ok(STANDARD.encode(svg)),
            Self::Base64Png => Ok(STANDARD.encode(encoder.encode(&svg)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRasterEncoder;

    #[test]
    fn encoding_matrix_matches_the_contract() {
        assert_eq!(
            ResultEncoding::select("svg", "1").unwrap(),
            ResultEncoding::RawSvg
        );
        assert_eq!(
            ResultEncoding::select("svg", "2").unwrap(),
            ResultEncoding::RawSvg
        );
        assert_eq!(
            ResultEncoding::select("svg", "0").unwrap(),
            ResultEncoding::Base64Svg
        );
        assert_eq!(
            ResultEncoding::select("png", "0").unwrap(),
            ResultEncoding::Base64Png
        );
        assert!(matches!(
            ResultEncoding::select("pdf", "1"),
            Err(ChartError::UnsupportedOutput { .. })
        ));
    }

    #[test]
    fn base64_svg_round_trips() {
        let encoded = ResultEncoding::Base64Svg
            .apply("<svg/>".to_owned(), &NullRasterEncoder)
            .unwrap();
        assert_eq!(encoded, STANDARD.encode("<svg/>"));
    }
}
