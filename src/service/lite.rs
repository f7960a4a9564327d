//! Lite request worker: legacy instrument-reading plots.
//!
//! A lite body is a flat array of readings from one instrument; the series
//! color, shape and annotations are chosen from the instrument name and the
//! `Arg1` discriminator instead of arriving in the request.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::compose::{CanvasParams, ChartComposer, ChartConfig, SceneBuilder, TextBlock};
use crate::core::types::loose_f64;
use crate::core::{DataPoint, HexColor, Series, SeriesKind, SeriesParams};
use crate::error::{ChartError, ChartResult};
use crate::render::RasterEncoder;
use crate::service::ResultEncoding;

const MARKER_RADIUS: f64 = 4.0;
const MARKER_COLOR: &str = "#0000FF";

/// One instrument reading as it arrives on the wire. Numeric fields coerce
/// loosely; the instrument routinely sends them as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiteReading {
    #[serde(rename = "Duname", default)]
    pub duname: String,
    #[serde(rename = "Arg1", default)]
    pub arg1: String,
    #[serde(default, deserialize_with = "loose_date")]
    pub date: f64,
    #[serde(default, deserialize_with = "loose_result")]
    pub result: f64,
    #[serde(default, deserialize_with = "loose_low")]
    pub low: f64,
    #[serde(default, deserialize_with = "loose_high")]
    pub high: f64,
    #[serde(default = "default_size", deserialize_with = "loose_reading_size")]
    pub size: f64,
    /// Hex digits without the leading `#`.
    #[serde(default, deserialize_with = "loose_text")]
    pub color: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub legend: String,
}

fn default_size() -> f64 {
    DataPoint::DEFAULT_SIZE
}

fn loose_date<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "date")
}

fn loose_result<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "result")
}

fn loose_low<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "low")
}

fn loose_high<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    loose_f64(d, "high")
}

fn loose_reading_size<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(loose_f64(d, "size")?.abs())
}

fn loose_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Single-chart lite body (`bodymas = 0`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiteRequest {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub body: Vec<LiteReading>,
}

/// Grouped lite body (`bodymas = 1`): named groups, each holding reading
/// sets under `ch1`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiteGroupRequest {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub body: IndexMap<String, LiteGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiteGroup {
    pub ch1: Vec<Vec<Vec<LiteReading>>>,
}

/// One grouped-mode result, keyed by the instrument name of its readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedResult {
    pub name: String,
    pub payload: String,
}

/// Series color from the instrument-name enum.
#[must_use]
pub fn instrument_color(duname: &str) -> &'static str {
    match duname {
        "PLT" | "PLTH" => "green",
        "RBC" | "RBCH" => "red",
        "WBCF" => "yellow",
        "WBC" | "WBCT" => "lightblue",
        _ => "blue",
    }
}

fn lite_encoding(type_result: &str) -> ChartResult<ResultEncoding> {
    match type_result {
        // Lite always base64-encodes the vector result.
        "svg" => Ok(ResultEncoding::Base64Svg),
        "png" => Ok(ResultEncoding::Base64Png),
        other => Err(ChartError::UnsupportedOutput {
            type_result: other.to_owned(),
            result_param: "0".to_owned(),
        }),
    }
}

/// Renders a single lite chart (`bodymas = 0`) to its encoded payload.
pub fn render_lite(
    request: &LiteRequest,
    type_result: &str,
    encoder: &dyn RasterEncoder,
) -> ChartResult<String> {
    let encoding = lite_encoding(type_result)?;
    info!(
        readings = request.body.len(),
        type_result, "lite render"
    );
    let svg = render_one(&request.body, request.width, request.height)?;
    encoding.apply(svg, encoder)
}

/// Renders a grouped lite request (`bodymas = 1`): one encoded payload per
/// reading set, keyed by group name and instrument name. Empty reading sets
/// are skipped.
pub fn render_lite_grouped(
    request: &LiteGroupRequest,
    type_result: &str,
    encoder: &dyn RasterEncoder,
) -> ChartResult<IndexMap<String, Vec<NamedResult>>> {
    let encoding = lite_encoding(type_result)?;
    info!(groups = request.body.len(), type_result, "grouped lite render");
    let mut results = IndexMap::new();
    for (group_name, group) in &request.body {
        let mut charts = Vec::new();
        for item in &group.ch1 {
            let Some(readings) = item.first().filter(|r| !r.is_empty()) else {
                continue;
            };
            let svg = render_one(readings, request.width, request.height)?;
            charts.push(NamedResult {
                name: readings[0].duname.clone(),
                payload: encoding.apply(svg, encoder)?,
            });
        }
        results.insert(group_name.clone(), charts);
    }
    Ok(results)
}

fn render_one(
    readings: &[LiteReading],
    width: Option<f64>,
    height: Option<f64>,
) -> ChartResult<String> {
    let width = width.unwrap_or(500.0);
    let height = height.unwrap_or(500.0);
    let chart = build_lite_chart(readings, width, height)?;
    let mut scene = SceneBuilder::new(CanvasParams {
        width,
        height,
        id: readings[0].duname.clone(),
    });
    scene.push(chart);
    scene.render()
}

/// Maps a reading set onto a composer: domains from the data, shapes from
/// the `Arg1` discriminator.
pub fn build_lite_chart(
    readings: &[LiteReading],
    width: f64,
    height: f64,
) -> ChartResult<ChartComposer> {
    let Some(first) = readings.first() else {
        return Err(ChartError::InvalidData("empty lite reading set".to_owned()));
    };
    let color = instrument_color(&first.duname);
    let max_date = readings.iter().map(|r| r.date).fold(0.0, f64::max);
    let max_result = readings.iter().map(|r| r.result).fold(0.0, f64::max);

    let mut config = ChartConfig {
        name: first.duname.clone(),
        width,
        height,
        ..ChartConfig::default()
    };
    config.axis_x.min = Some(0.001);
    config.axis_x.max = Some(max_date * 1.1);
    config.axis_y.min = Some(0.001);
    config.axis_y.max = Some(max_result * 1.1);
    config.header = Some(TextBlock::new(first.duname.clone()));
    if !first.legend.is_empty() {
        config.footer = Some(TextBlock::new(first.legend.clone()));
    }

    let mut composer = ChartComposer::new(config);
    match first.arg1.as_str() {
        "HIST" => {
            // Histogram trace: area filled down to zero, ticks every 10.
            composer.config.axis_x.tick_count =
                Some(((max_date * 1.1 / 10.0).ceil().max(1.0)) as usize);
            let mut area = Series::new(
                first.duname.clone(),
                SeriesKind::Areas,
                area_params(),
                style_pairs(&[("fill", color), ("opacity", "0.5")]),
                IndexMap::new(),
            )?;
            for reading in readings {
                area.push(DataPoint::new(reading.date, reading.result));
            }
            composer.areas.push(area);
        }
        "DIFF" => {
            // Scatter cloud: per-point color and size, unmeasured skipped.
            let mut dots = Series::new(
                first.duname.clone(),
                SeriesKind::Dots,
                dot_params(),
                IndexMap::new(),
                IndexMap::new(),
            )?;
            for reading in readings {
                let mut point = DataPoint::new(reading.date, reading.result);
                point.color = HexColor::parse(&format!("#{}", reading.color));
                point.size = reading.size;
                point.flag = Some(reading.result);
                dots.push(point);
            }
            composer.dots.push(dots);
        }
        _ => {
            // Reference band, measurement line and markers.
            let mut band = Series::new(
                format!("{}-reference", first.duname),
                SeriesKind::Areas,
                area_params(),
                style_pairs(&[("fill", "yellow"), ("opacity", "0.5")]),
                IndexMap::new(),
            )?;
            let mut line = Series::new(
                first.duname.clone(),
                SeriesKind::Lines,
                line_params(),
                style_pairs(&[("fill", "none"), ("stroke", color), ("stroke-width", "3")]),
                IndexMap::new(),
            )?;
            let mut markers = Series::new(
                format!("{}-markers", first.duname),
                SeriesKind::Dots,
                dot_params(),
                IndexMap::new(),
                IndexMap::new(),
            )?;
            for reading in readings {
                band.push(DataPoint::new(reading.date, reading.high).with_band(reading.low));
                line.push(DataPoint::new(reading.date, reading.result));
                let mut marker = DataPoint::new(reading.date, reading.result);
                marker.color = HexColor::parse(MARKER_COLOR);
                marker.size = MARKER_RADIUS;
                marker.flag = Some(reading.result);
                markers.push(marker);
            }
            composer.areas.push(band);
            composer.lines.push(line);
            composer.dots.push(markers);
        }
    }
    Ok(composer)
}

fn line_params() -> SeriesParams {
    SeriesParams {
        kind: Some("lines".to_owned()),
        curve: 1,
        view_dots: 0,
    }
}

fn area_params() -> SeriesParams {
    SeriesParams {
        kind: Some("areas".to_owned()),
        ..SeriesParams::default()
    }
}

fn dot_params() -> SeriesParams {
    SeriesParams {
        kind: Some("dots".to_owned()),
        ..SeriesParams::default()
    }
}

fn style_pairs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(duname: &str, arg1: &str, date: f64, result: f64) -> LiteReading {
        LiteReading {
            duname: duname.to_owned(),
            arg1: arg1.to_owned(),
            date,
            result,
            size: DataPoint::DEFAULT_SIZE,
            ..LiteReading::default()
        }
    }

    #[test]
    fn instrument_colors_cover_the_enum() {
        assert_eq!(instrument_color("PLT"), "green");
        assert_eq!(instrument_color("RBCH"), "red");
        assert_eq!(instrument_color("WBCF"), "yellow");
        assert_eq!(instrument_color("WBC"), "lightblue");
        assert_eq!(instrument_color("GLU"), "blue");
    }

    #[test]
    fn default_mode_builds_band_line_and_markers() {
        let readings = vec![reading("GLU", "", 1.0, 5.0), reading("GLU", "", 2.0, 6.0)];
        let chart = build_lite_chart(&readings, 500.0, 500.0).expect("chart");
        assert_eq!(chart.areas.len(), 1);
        assert_eq!(chart.lines.len(), 1);
        assert_eq!(chart.dots.len(), 1);
        assert_eq!(chart.config.axis_x.max, Some(2.0 * 1.1));
    }

    #[test]
    fn hist_mode_builds_a_baseline_area() {
        let readings = vec![
            reading("PLT", "HIST", 0.0, 1.0),
            reading("PLT", "HIST", 50.0, 3.0),
        ];
        let chart = build_lite_chart(&readings, 500.0, 500.0).expect("chart");
        assert_eq!(chart.areas.len(), 1);
        assert!(chart.lines.is_empty());
        assert_eq!(chart.config.axis_x.tick_count, Some(6));
    }

    #[test]
    fn diff_mode_marks_unmeasured_points() {
        let readings = vec![
            reading("WBCF", "DIFF", 1.0, 4.0),
            reading("WBCF", "DIFF", 2.0, 0.0),
        ];
        let chart = build_lite_chart(&readings, 500.0, 500.0).expect("chart");
        let dots = &chart.dots[0];
        assert!(dots.data[0].is_measured());
        assert!(!dots.data[1].is_measured());
    }

    #[test]
    fn empty_reading_set_is_rejected() {
        assert!(matches!(
            build_lite_chart(&[], 500.0, 500.0),
            Err(ChartError::InvalidData(_))
        ));
    }

    #[test]
    fn string_numbers_coerce_on_deserialization() {
        let json = r#"{"Duname":"PLT","Arg1":"","date":"12.5","result":"3","low":1,"high":7}"#;
        let reading: LiteReading = serde_json::from_str(json).expect("valid");
        assert_eq!(reading.date, 12.5);
        assert_eq!(reading.result, 3.0);
        assert_eq!(reading.size, DataPoint::DEFAULT_SIZE);
    }

    #[test]
    fn numeric_color_digits_stringify() {
        let json = r#"{"Duname":"X","Arg1":"DIFF","date":1,"result":2,"color":123}"#;
        let reading: LiteReading = serde_json::from_str(json).expect("valid");
        assert_eq!(reading.color, "123");
    }
}
