use approx::assert_relative_eq;
use chart_compose::compose::{ChartComposer, ChartConfig, LayoutExtent};
use chart_compose::core::{
    DataPoint, LegendPosition, Series, SeriesKind, SeriesParams, Table, TableStyles, TextLegend,
};
use chart_compose::render::Mark;
use indexmap::IndexMap;
use serde_json::json;

fn series(kind: SeriesKind, data: Vec<DataPoint>) -> Series {
    let params = SeriesParams {
        kind: Some(kind.as_str().to_owned()),
        ..SeriesParams::default()
    };
    Series::new("s", kind, params, IndexMap::new(), IndexMap::new())
        .expect("valid series")
        .with_data(data)
}

#[test]
fn empty_chart_occupies_the_standard_footprint() {
    let composer = ChartComposer::new(ChartConfig::default());
    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");

    // 500x500 chart: plot 400x400, origin (40, 64), extent 64 + 480.
    assert_relative_eq!(extent.position_y, 544.0, epsilon = 1e-9);
    assert_relative_eq!(extent.position_x, 500.0, epsilon = 1e-9);
    assert_eq!(fragments[0].class, "focus");
    assert_eq!(fragments[0].translate, (40.0, 64.0));
}

#[test]
fn stacked_chart_starts_below_the_cursor() {
    let composer = ChartComposer::new(ChartConfig::default());
    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(200.0, &mut extent).expect("layout");

    assert_eq!(fragments[0].translate, (40.0, 264.0));
    assert_relative_eq!(extent.position_y, 744.0, epsilon = 1e-9);
}

#[test]
fn explicit_axis_bounds_override_the_data() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer.config.axis_x.min = Some(2.0);
    composer.config.axis_x.max = Some(8.0);
    composer
        .lines
        .push(series(SeriesKind::Lines, vec![DataPoint::new(100.0, 5.0)]));

    let ((min_x, max_x), _) = composer.resolved_domains();
    assert_eq!((min_x, max_x), (2.0, 8.0));
}

#[test]
fn equal_bounds_widen_to_a_unit_domain() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer.config.axis_y.min = Some(5.0);
    composer.config.axis_y.max = Some(5.0);

    let (_, (min_y, max_y)) = composer.resolved_domains();
    assert_eq!((min_y, max_y), (5.0, 6.0));
}

#[test]
fn unmeasured_dots_are_skipped_but_keep_index() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    let mut skipped = DataPoint::new(2.0, 2.0);
    skipped.flag = Some(0.0);
    let mut kept = DataPoint::new(3.0, 3.0);
    kept.flag = Some(3.0);
    composer.dots.push(series(
        SeriesKind::Dots,
        vec![DataPoint::new(1.0, 1.0), skipped, kept],
    ));

    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");
    let circles = fragments
        .iter()
        .flat_map(|f| f.marks.iter())
        .filter(|m| matches!(m, Mark::Circle(c) if c.class == "circle"))
        .count();
    assert_eq!(circles, 2);
}

#[test]
fn left_legend_shifts_the_body_by_its_width() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Left, "abc"));

    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");

    // 3 chars at 0.47 * 14 px each, plus the 10 px pad.
    let expected_shift = 3.0 * 0.47 * 14.0 + 10.0;
    let focus = fragments
        .iter()
        .find(|f| f.class == "focus")
        .expect("focus fragment");
    assert_relative_eq!(focus.translate.0, 40.0 + expected_shift, epsilon = 1e-9);
    assert_relative_eq!(focus.translate.1, 64.0, epsilon = 1e-9);

    // One line of 0.7 * 14 px plus the 15 px gap grows the bounding box.
    assert_relative_eq!(extent.position_y, 544.0 + 0.7 * 14.0 + 15.0, epsilon = 1e-9);
}

#[test]
fn layout_is_idempotent() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Left, "shifted"));
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Top, "above"));
    composer
        .lines
        .push(series(SeriesKind::Lines, vec![DataPoint::new(1.0, 1.0)]));

    let mut first_extent = LayoutExtent::default();
    let first = composer.layout(0.0, &mut first_extent).expect("layout");
    let mut second_extent = LayoutExtent::default();
    let second = composer.layout(0.0, &mut second_extent).expect("layout");

    assert_eq!(first, second);
    assert_eq!(first_extent, second_extent);
}

#[test]
fn bottom_legends_stack_without_overlap() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Bottom, "one"));
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Bottom, "two"));

    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");
    let ys: Vec<f64> = fragments
        .iter()
        .filter(|f| f.class == "bottom")
        .map(|f| f.translate.1)
        .collect();
    assert_eq!(ys.len(), 2);
    // First block sits at origin + plot height, second below it by the
    // first block's height.
    assert_relative_eq!(ys[0], 64.0 + 400.0, epsilon = 1e-9);
    assert_relative_eq!(ys[1] - ys[0], 0.7 * 14.0, epsilon = 1e-9);
}

#[test]
fn empty_legend_text_is_skipped() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Right, " \n "));

    let mut extent = LayoutExtent::default();
    composer.layout(0.0, &mut extent).expect("layout");
    assert_relative_eq!(extent.position_y, 544.0, epsilon = 1e-9);
}

#[test]
fn table_extends_the_bounding_box_below_the_plot() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    let table = Table::new(
        vec!["Name".to_owned(), "Age".to_owned()],
        vec![vec![json!("A"), json!(1)]],
        TableStyles::default(),
    )
    .expect("table");
    composer.tables.push(table);

    let mut extent = LayoutExtent::default();
    composer.layout(0.0, &mut extent).expect("layout");

    // Header and row bands of 35 px each, top at origin + plot height.
    let table_h = 70.0;
    let y0 = 64.0 + 400.0;
    assert_relative_eq!(extent.position_y, y0 + table_h * 1.1 + 10.0, epsilon = 1e-9);
}

#[test]
fn structurally_empty_table_draws_nothing() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer
        .tables
        .push(Table::new(vec!["H".to_owned()], vec![], TableStyles::default()).expect("table"));

    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");
    assert!(fragments.iter().all(|f| f.class != "table"));
    assert_relative_eq!(extent.position_y, 544.0, epsilon = 1e-9);
}

#[test]
fn line_series_with_markers_emits_a_dot_per_point() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    let mut line = series(
        SeriesKind::Lines,
        vec![
            DataPoint::new(1.0, 1.0),
            DataPoint::new(2.0, 3.0),
            DataPoint::new(3.0, 2.0),
        ],
    );
    line.params.view_dots = 1;
    composer.lines.push(line);

    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");
    let group = fragments
        .iter()
        .find(|f| f.class == "line-group")
        .expect("line group");
    let markers = group
        .marks
        .iter()
        .filter(|m| matches!(m, Mark::Circle(c) if c.r == 4.0))
        .count();
    assert_eq!(markers, 3);
    assert!(group
        .marks
        .iter()
        .any(|m| matches!(m, Mark::Path(p) if p.class == "line")));
}

#[test]
fn area_series_closes_its_path() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer.areas.push(series(
        SeriesKind::Areas,
        vec![
            DataPoint::new(1.0, 5.0).with_band(2.0),
            DataPoint::new(2.0, 6.0).with_band(2.5),
            DataPoint::new(3.0, 5.5).with_band(2.2),
        ],
    ));

    let mut extent = LayoutExtent::default();
    let fragments = composer.layout(0.0, &mut extent).expect("layout");
    let area = fragments
        .iter()
        .flat_map(|f| f.marks.iter())
        .find_map(|m| match m {
            Mark::Path(p) if p.class == "area" => Some(p),
            _ => None,
        })
        .expect("area path");
    assert!(area.d.starts_with('M'));
    assert!(area.d.ends_with('Z'));
}

#[test]
fn full_chart_bounding_box_accounts_for_every_region() {
    let mut composer = ChartComposer::new(ChartConfig::default());
    composer.lines.push(series(
        SeriesKind::Lines,
        vec![
            DataPoint::new(1.0, 10.0),
            DataPoint::new(2.0, 20.0),
            DataPoint::new(3.0, 15.0),
        ],
    ));
    composer.tables.push(
        Table::new(
            vec!["A".to_owned(), "B".to_owned()],
            vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]],
            TableStyles::default(),
        )
        .expect("table"),
    );
    composer
        .legends
        .push(TextLegend::new(LegendPosition::Bottom, "legend"));

    let mut extent = LayoutExtent::default();
    composer.layout(0.0, &mut extent).expect("layout");

    // Plot bottom 464, table of 105 px with its slack and gap, then the
    // bottom legend's line height and the closing 15 px margin.
    let after_table = 464.0 + 105.0 * 1.1 + 10.0;
    assert_relative_eq!(
        extent.position_y,
        after_table + 0.7 * 14.0 + 15.0,
        epsilon = 1e-9
    );
    assert!(extent.position_x >= 500.0);
}
