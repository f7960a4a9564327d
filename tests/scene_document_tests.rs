use chart_compose::compose::{CanvasParams, ChartComposer, ChartConfig, SceneBuilder};
use chart_compose::core::{LegendPosition, TextLegend};

fn scene_with(charts: usize) -> SceneBuilder {
    let mut scene = SceneBuilder::new(CanvasParams::default());
    for _ in 0..charts {
        scene.push(ChartComposer::new(ChartConfig::default()));
    }
    scene
}

#[test]
fn empty_scene_renders_the_configured_canvas() {
    let doc = scene_with(0).render().expect("render");
    assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(doc.contains("class=\"svg-container\""));
    assert!(doc.contains("id=\"svgMain\""));
    assert!(doc.contains("width=\"500\""));
    assert!(doc.contains("height=\"500\""));
}

#[test]
fn single_chart_canvas_grows_to_the_extent() {
    let doc = scene_with(1).render().expect("render");
    // Extent 544 plus the 2% stacking margin of a 500 px chart.
    assert!(doc.contains("height=\"554\""));
    assert!(doc.contains("width=\"500\""));
    assert_eq!(doc.matches("<g class=\"chart\">").count(), 1);
}

#[test]
fn two_charts_stack_vertically() {
    let doc = scene_with(2).render().expect("render");
    // Second chart starts at 554; its extent ends at 1098, plus margin.
    assert!(doc.contains("height=\"1108\""));
    assert_eq!(doc.matches("<g class=\"chart\">").count(), 2);
}

#[test]
fn wide_right_legend_widens_the_canvas() {
    let mut scene = scene_with(0);
    let mut chart = ChartComposer::new(ChartConfig::default());
    chart.legends.push(TextLegend::new(
        LegendPosition::Right,
        "a".repeat(40),
    ));
    scene.push(chart);

    let doc = scene.render().expect("render");
    // 40 chars at 0.47 * 14 px, the 10 px pad, plot width and the 15 px gap.
    assert!(doc.contains("width=\"688.2\""));
}

#[test]
fn charts_keep_their_group_structure() {
    let doc = scene_with(1).render().expect("render");
    assert!(doc.contains("<g class=\"focus\" transform=\"translate(40,64)\">"));
    assert!(doc.ends_with("</g></svg>"));
}
