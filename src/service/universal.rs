//! Universal request worker: structured multi-chart compositions.

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::compose::{CanvasParams, ChartComposer, ChartConfig, SceneBuilder};
use crate::core::{DataPoint, Series, SeriesKind, SeriesParams, Table, TextLegend};
use crate::error::{ChartError, ChartResult};
use crate::render::RasterEncoder;
use crate::service::ResultEncoding;

/// Full universal request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UniversalRequest {
    pub params: CanvasParams,
    pub charts: Vec<UniversalChart>,
}

impl UniversalRequest {
    pub fn from_json(payload: &str) -> ChartResult<Self> {
        serde_json::from_str(payload).map_err(|e| ChartError::InvalidData(e.to_string()))
    }
}

/// One chart's wire description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UniversalChart {
    pub chart_params: ChartConfig,
    pub lines: Vec<ElementSpec>,
    pub areas: Vec<ElementSpec>,
    pub dots: Vec<ElementSpec>,
    pub tables: Vec<Table>,
    pub text_legends: Vec<TextLegend>,
}

/// Wire form of a series element. Name and type tag may be absent; both are
/// backfilled from the collection the element arrived in before
/// construction, so only deliberately empty values are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub name: Option<String>,
    pub params: Option<SeriesParams>,
    pub style: IndexMap<String, String>,
    pub attributes: IndexMap<String, String>,
    pub data: Vec<DataPoint>,
}

impl ElementSpec {
    pub fn into_series(self, kind: SeriesKind) -> ChartResult<Series> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => kind.as_str().to_owned(),
        };
        let mut params = self.params.unwrap_or_default();
        if params.kind.as_deref().is_none_or(str::is_empty) {
            params.kind = Some(kind.as_str().to_owned());
        }
        Ok(Series::new(name, kind, params, self.style, self.attributes)?.with_data(self.data))
    }
}

/// Builds the scene graph from a parsed request.
pub fn build_scene(request: UniversalRequest) -> ChartResult<SceneBuilder> {
    let mut scene = SceneBuilder::new(request.params);
    for chart in request.charts {
        let mut composer = ChartComposer::new(chart.chart_params);
        for line in chart.lines {
            composer.lines.push(line.into_series(SeriesKind::Lines)?);
        }
        for area in chart.areas {
            composer.areas.push(area.into_series(SeriesKind::Areas)?);
        }
        for dot in chart.dots {
            composer.dots.push(dot.into_series(SeriesKind::Dots)?);
        }
        composer.tables = chart.tables;
        composer.legends = chart.text_legends;
        scene.push(composer);
    }
    Ok(scene)
}

/// Lays out the whole request and returns the encoded payload.
///
/// The output combination is resolved first, so an unsupported pair never
/// reaches layout.
pub fn render_universal(
    request: UniversalRequest,
    type_result: &str,
    result_param: &str,
    encoder: &dyn RasterEncoder,
) -> ChartResult<String> {
    let encoding = ResultEncoding::select(type_result, result_param)?;
    info!(
        charts = request.charts.len(),
        type_result, result_param, "universal render"
    );
    let scene = build_scene(request)?;
    let svg = scene.render()?;
    encoding.apply(svg, encoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_spec_backfills_name_and_type() {
        let spec = ElementSpec::default();
        let series = spec.into_series(SeriesKind::Dots).expect("backfilled");
        assert_eq!(series.name, "dots");
        assert_eq!(series.params.kind.as_deref(), Some("dots"));
    }

    #[test]
    fn explicit_name_and_type_survive() {
        let spec = ElementSpec {
            name: Some("hemoglobin".to_owned()),
            params: Some(SeriesParams {
                kind: Some("lines".to_owned()),
                curve: 1,
                view_dots: 0,
            }),
            ..ElementSpec::default()
        };
        let series = spec.into_series(SeriesKind::Lines).expect("valid");
        assert_eq!(series.name, "hemoglobin");
        assert_eq!(series.params.curve, 1);
    }
}
