//! Per-chart layout engine.
//!
//! Stages run in a fixed order — scale, axes, series, tables, legends —
//! because each stage reads geometry committed by the previous one. The
//! composer is request-scoped and emits positioned fragments; it never
//! draws or logs on its own.

use indexmap::IndexMap;

use crate::compose::config::{AxisConfig, ChartConfig, TextBlock};
use crate::compose::curve::{monotone_path, monotone_segments, polyline_path};
use crate::core::layout_math::{self, Axis, Extremum};
use crate::core::legend::{LegendPosition, TextLegend};
use crate::core::scale::{LinearScale, format_tick, tick_values};
use crate::core::series::{Series, style_string};
use crate::core::table::{Table, cell_text};
use crate::error::ChartResult;
use crate::render::{CircleMark, Fragment, LineMark, PathMark, RectMark, TextMark};

/// Domain fallbacks for degenerate (empty or all-zero) data.
pub const MIN_DOMAIN_DEFAULT: f64 = 0.001;
pub const MAX_DOMAIN_DEFAULT: f64 = 100.0;

const GRID_STROKE: &str = "#D3D3D3";
const TICK_PADDING: f64 = 3.0;

/// Bounding-box accumulator threaded between layout stages and between
/// charts on one canvas. The sole coupling channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutExtent {
    pub position_x: f64,
    pub position_y: f64,
}

/// One chart's configuration plus its element collections, ready to lay out.
#[derive(Debug, Clone, Default)]
pub struct ChartComposer {
    pub config: ChartConfig,
    pub lines: Vec<Series>,
    pub areas: Vec<Series>,
    pub dots: Vec<Series>,
    pub tables: Vec<Table>,
    pub legends: Vec<TextLegend>,
}

/// Committed plot geometry, shared by every stage after scale computation.
struct Frame {
    origin_x: f64,
    origin_y: f64,
    plot_w: f64,
    plot_h: f64,
    x: LinearScale,
    y: LinearScale,
}

impl ChartComposer {
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.lines
            .iter()
            .chain(self.areas.iter())
            .chain(self.dots.iter())
    }

    /// Resolved axis domains: explicit config bounds win, otherwise the
    /// extremum scan with the degenerate-data defaults.
    #[must_use]
    pub fn resolved_domains(&self) -> ((f64, f64), (f64, f64)) {
        let x = self.resolve_axis(Axis::X, &self.config.axis_x);
        let y = self.resolve_axis(Axis::Y, &self.config.axis_y);
        (x, y)
    }

    fn resolve_axis(&self, axis: Axis, config: &AxisConfig) -> (f64, f64) {
        let min = AxisConfig::explicit(config.min).unwrap_or_else(|| {
            layout_math::min_max(self.all_series(), axis, MIN_DOMAIN_DEFAULT, Extremum::Min)
        });
        let max = AxisConfig::explicit(config.max).unwrap_or_else(|| {
            layout_math::min_max(self.all_series(), axis, MAX_DOMAIN_DEFAULT, Extremum::Max)
        });
        if max > min { (min, max) } else { (min, min + 1.0) }
    }

    /// Lays out the whole chart below `y_start` and reports occupied space
    /// through `extent`. Returns the chart's fragments in paint order.
    ///
    /// Pure with respect to `self`: calling it again with the same inputs
    /// yields the same geometry.
    pub fn layout(&self, y_start: f64, extent: &mut LayoutExtent) -> ChartResult<Vec<Fragment>> {
        let plot_w = self.config.width * 0.8;
        let plot_h = self.config.height * 0.8;
        let frame = Frame {
            origin_x: plot_w * 0.1,
            origin_y: y_start + plot_h * 0.16,
            plot_w,
            plot_h,
            x: self.x_scale(plot_w)?,
            y: self.y_scale(plot_h)?,
        };

        extent.position_y = frame.origin_y + plot_h * 1.2;
        if extent.position_x < self.config.width {
            extent.position_x = self.config.width;
        }

        // Body fragments shift as one block when left/top legend gutters
        // are applied at the end.
        let mut body = Vec::new();

        let mut focus = Fragment::translated("focus", frame.origin_x, frame.origin_y);
        self.draw_axes(&mut focus, &frame);
        self.draw_areas(&mut focus, &frame);
        body.push(focus);
        self.draw_lines(&mut body, &frame);
        self.draw_dots(&mut body, &frame);
        body.extend(self.axis_title_fragments(&frame));

        let occupied_h = self.draw_tables(&mut body, &frame, extent);
        body.extend(self.header_footer_fragments(&frame));
        body.extend(self.custom_legend_fragments(&frame));

        let legend_fragments = self.draw_legends(&mut body, &frame, occupied_h, extent);

        let mut fragments = body;
        fragments.extend(legend_fragments);
        Ok(fragments)
    }

    fn x_scale(&self, plot_w: f64) -> ChartResult<LinearScale> {
        let ((min_x, max_x), _) = self.resolved_domains();
        LinearScale::new((min_x, max_x), (0.0, plot_w))
    }

    fn y_scale(&self, plot_h: f64) -> ChartResult<LinearScale> {
        let (_, (min_y, max_y)) = self.resolved_domains();
        LinearScale::new((min_y, max_y), (plot_h, 0.0))
    }

    // ---- axes ----

    fn draw_axes(&self, focus: &mut Fragment, frame: &Frame) {
        let ((min_x, max_x), (min_y, max_y)) = self.resolved_domains();

        let font_x = self
            .config
            .axis_x
            .font_size
            .unwrap_or(frame.plot_w * 0.02);
        let x_ticks = tick_values(min_x, max_x, self.config.axis_x.tick_count());
        let x_step = tick_step_of(&x_ticks);
        for &tick in &x_ticks {
            let px = frame.x.map(tick);
            focus.push(grid_line(px, 0.0, px, frame.plot_h));
            let mut label = TextMark::at(
                px,
                frame.plot_h + font_x + TICK_PADDING,
                format_tick(tick, x_step, &self.config.axis_x.format),
            );
            label.style = format!("text-anchor:middle;font-size:{font_x}px");
            label.class = "tick";
            focus.push(label);
        }
        focus.push(grid_line(0.0, 0.0, frame.plot_w, 0.0));

        let font_y = self
            .config
            .axis_y
            .font_size
            .unwrap_or(frame.plot_h * 0.02);
        let y_ticks = tick_values(min_y, max_y, self.config.axis_y.tick_count());
        let y_step = tick_step_of(&y_ticks);
        for &tick in &y_ticks {
            let py = frame.y.map(tick);
            focus.push(grid_line(0.0, py, frame.plot_w, py));
            let mut label = TextMark::at(
                -TICK_PADDING,
                py,
                format_tick(tick, y_step, &self.config.axis_y.format),
            );
            label.style = format!("text-anchor:end;font-size:{font_y}px");
            label.baseline_middle = true;
            label.class = "tick";
            focus.push(label);
        }
        focus.push(grid_line(0.0, 0.0, 0.0, frame.plot_h));
    }

    fn axis_title_fragments(&self, frame: &Frame) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        if let Some(block) = &self.config.axis_x.text {
            if let Some(fragment) = text_block_fragment(
                block,
                frame.plot_w * 0.5,
                frame.plot_h * 1.1 + frame.origin_y,
                None,
            ) {
                fragments.push(fragment);
            }
        }
        if let Some(block) = &self.config.axis_y.text {
            if let Some(fragment) = text_block_fragment(
                block,
                frame.plot_w * 0.02,
                frame.plot_h * 0.5 + frame.origin_y,
                Some(-90.0),
            ) {
                fragments.push(fragment);
            }
        }
        fragments
    }

    // ---- series ----

    fn draw_lines(&self, body: &mut Vec<Fragment>, frame: &Frame) {
        for series in &self.lines {
            let mut group = Fragment::translated("line-group", frame.origin_x, frame.origin_y);
            let points = project(&series.data, frame, |p| p.y);
            let d = if series.params.curve == 1 {
                monotone_path(&points)
            } else {
                polyline_path(&points)
            };
            if !d.is_empty() {
                group.push(PathMark {
                    d,
                    style: series.style_string(),
                    attributes: attribute_pairs(&series.attributes),
                    class: "line",
                });
            }
            if series.params.view_dots == 1 {
                let fill = series
                    .style
                    .get("stroke")
                    .cloned()
                    .unwrap_or_else(|| "green".to_owned());
                for &(px, py) in &points {
                    group.push(CircleMark {
                        cx: px,
                        cy: py,
                        r: 4.0,
                        fill: fill.clone(),
                        style: String::new(),
                        class: "data-point",
                    });
                }
            }
            body.push(group);
        }
    }

    fn draw_areas(&self, focus: &mut Fragment, frame: &Frame) {
        for series in &self.areas {
            let top = project(&series.data, frame, |p| p.y);
            let mut bottom: Vec<(f64, f64)> = project(&series.data, frame, |p| p.y0);
            bottom.reverse();
            if top.is_empty() {
                continue;
            }
            let mut d = monotone_path(&top);
            let (bx, by) = bottom[0];
            d.push_str(&format!(
                "L{},{}",
                crate::render::fmt_num(bx),
                crate::render::fmt_num(by)
            ));
            d.push_str(&monotone_segments(&bottom));
            d.push('Z');
            focus.push(PathMark {
                d,
                style: series.style_string(),
                attributes: attribute_pairs(&series.attributes),
                class: "area",
            });
        }
    }

    fn draw_dots(&self, body: &mut Vec<Fragment>, frame: &Frame) {
        for series in &self.dots {
            let mut group = Fragment::translated(String::new(), frame.origin_x, frame.origin_y);
            let style = series.style_string();
            for point in &series.data {
                // Skipped points keep their index in the data; they just
                // emit no geometry.
                if !point.is_measured() {
                    continue;
                }
                group.push(CircleMark {
                    cx: frame.x.map(point.x),
                    cy: frame.y.map(point.y),
                    r: point.size,
                    fill: point.color.as_str().to_owned(),
                    style: style.clone(),
                    class: "circle",
                });
            }
            body.push(group);
        }
    }

    // ---- tables ----

    /// Draws all renderable tables below the plot, returning the occupied
    /// height (plot plus tables) used later for bottom legend placement.
    fn draw_tables(
        &self,
        body: &mut Vec<Fragment>,
        frame: &Frame,
        extent: &mut LayoutExtent,
    ) -> f64 {
        let mut occupied_h = frame.plot_h;
        let mut last_bottom = None;
        let mut max_width: f64 = 0.0;
        for table in &self.tables {
            if !table.is_renderable() {
                continue;
            }
            let (fragment, table_w, table_h, y_top) =
                self.draw_table(table, frame, &mut occupied_h);
            body.push(fragment);
            last_bottom = Some(y_top + table_h * 1.1);
            max_width = max_width.max(table_w * 1.1);
        }
        if let Some(bottom) = last_bottom {
            extent.position_y = bottom + 10.0;
            if extent.position_x < max_width {
                extent.position_x = max_width;
            }
        }
        occupied_h
    }

    fn draw_table(
        &self,
        table: &Table,
        frame: &Frame,
        occupied_h: &mut f64,
    ) -> (Fragment, f64, f64, f64) {
        let styles = &table.styles;
        let header_font = crate::core::series::font_size_of(&styles.text.headers, 14.0);
        let row_font = crate::core::series::font_size_of(&styles.text.rows, 14.0);
        let padding_header = explicit_padding(&styles.text.headers).unwrap_or(0.55 * header_font);
        let padding_row = explicit_padding(&styles.text.rows).unwrap_or(0.55 * row_font);
        let head_h = styles.cells.headers.height;
        let row_h = styles.cells.rows.height;

        let widths = layout_math::table_column_widths(&table.headers, &table.rows, padding_header);
        let table_w: f64 = widths.iter().sum();
        let table_h = head_h + table.rows.len() as f64 * row_h;

        let x0 = frame.origin_x;
        let y0 = frame.origin_y + *occupied_h;
        *occupied_h += table_h + 10.0;

        let header_style = style_string(&styles.text.headers);
        let row_style = style_string(&styles.text.rows);

        let mut fragment = Fragment::new("table");
        fragment.push(RectMark {
            x: x0,
            y: y0,
            width: table_w,
            height: head_h,
            fill: styles.cells.headers.background_color.clone(),
            class: "headerbackground",
        });

        let mut current_x = x0;
        for (i, header) in table.headers.iter().enumerate() {
            let mut text = TextMark::at(
                current_x + padding_header,
                y0 + head_h / 2.0 + header_font / 2.0,
                header.clone(),
            );
            text.style = header_style.clone();
            text.baseline_middle = true;
            text.class = "headertext";
            fragment.push(text);
            current_x += widths[i];
        }

        for (row_index, row) in table.rows.iter().enumerate() {
            let y = y0 + head_h + row_index as f64 * row_h;
            let fill = if row_index % 2 == 0 {
                styles.cells.rows.even_background_color.clone()
            } else {
                styles.cells.rows.odd_background_color.clone()
            };
            fragment.push(RectMark {
                x: x0,
                y,
                width: table_w,
                height: row_h,
                fill,
                class: "rowsbackground",
            });
            let mut cell_x = x0;
            for (cell_index, cell) in row.iter().enumerate() {
                let mut text = TextMark::at(cell_x + padding_row, y + row_h / 2.0, cell_text(cell));
                text.style = row_style.clone();
                text.baseline_middle = true;
                text.class = "rowstext";
                fragment.push(text);
                cell_x += widths[cell_index];
            }
        }

        let border = &styles.borders;
        let mut border_x = x0;
        for i in 0..=widths.len() {
            fragment.push(LineMark {
                x1: border_x,
                y1: y0 + table_h,
                x2: border_x,
                y2: y0,
                stroke: border.color.clone(),
                stroke_width: border.width,
                class: "borderY",
            });
            if let Some(width) = widths.get(i) {
                border_x += width;
            }
        }
        let mut horizontals = vec![y0, y0 + head_h];
        horizontals.extend(
            (0..table.rows.len()).map(|i| y0 + head_h + (i as f64 + 1.0) * row_h),
        );
        for y in horizontals {
            fragment.push(LineMark {
                x1: x0,
                y1: y,
                x2: x0 + table_w,
                y2: y,
                stroke: border.color.clone(),
                stroke_width: border.width,
                class: "borderX",
            });
        }

        (fragment, table_w, table_h, y0)
    }

    // ---- titles ----

    fn header_footer_fragments(&self, frame: &Frame) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        if let Some(header) = &self.config.header {
            if let Some(fragment) = title_fragment(header, frame.origin_x, frame.origin_y - 10.0) {
                fragments.push(fragment);
            }
        }
        if let Some(footer) = &self.config.footer {
            if let Some(fragment) = title_fragment(
                footer,
                frame.origin_x,
                frame.plot_h * 1.15 + frame.origin_y,
            ) {
                fragments.push(fragment);
            }
        }
        fragments
    }

    fn custom_legend_fragments(&self, frame: &Frame) -> Vec<Fragment> {
        self.legends
            .iter()
            .filter(|legend| legend.position == LegendPosition::Custom && legend.validate())
            .map(|legend| {
                let font = crate::core::series::font_size_of(&legend.style, 8.0);
                let mut fragment =
                    Fragment::translated("someTextOnChart", frame.origin_x, frame.origin_y);
                let style = style_string(&legend.style);
                for (i, line) in legend.lines().iter().enumerate() {
                    let mut text = TextMark::at(0.0, 0.0, *line);
                    text.transform =
                        Some(translate_of(1.0, i as f64 * font + 5.0));
                    text.style = style.clone();
                    text.class = "some_elem_text";
                    fragment.push(text);
                }
                fragment
            })
            .collect()
    }

    // ---- legends ----

    /// Anchored legend placement, two passes.
    ///
    /// Pass one measures every block and totals the left/top gutters; pass
    /// two shifts the chart body once by those gutters and emits each block
    /// at its per-anchor cursor. Prior geometry is therefore never
    /// rewritten and re-running the layout cannot double-shift.
    fn draw_legends(
        &self,
        body: &mut [Fragment],
        frame: &Frame,
        occupied_h: f64,
        extent: &mut LayoutExtent,
    ) -> Vec<Fragment> {
        let blocks: Vec<LegendBlock> = self
            .legends
            .iter()
            .filter(|legend| legend.position != LegendPosition::Custom)
            .filter_map(LegendBlock::measure)
            .collect();
        if blocks.is_empty() {
            return Vec::new();
        }

        let left_total: f64 = anchor(&blocks, LegendPosition::Left).map(|b| b.width).sum();
        let top_total: f64 = anchor(&blocks, LegendPosition::Top)
            .map(|b| b.height + 10.0)
            .sum();

        for fragment in body.iter_mut() {
            fragment.shift(left_total, top_total);
        }

        let mut fragments = Vec::new();
        let mut right_x = left_total + frame.origin_x + frame.plot_w * 1.1;
        let mut bottom_y = top_total + frame.origin_y + occupied_h;
        let mut left_x = 10.0;
        let mut top_y = 15.0;
        for block in &blocks {
            match block.position {
                LegendPosition::Right => {
                    let y = top_total + frame.origin_y + 15.0;
                    fragments.push(block.fragment(right_x, y));
                    right_x += block.width;
                }
                LegendPosition::Bottom => {
                    let x = left_total + frame.origin_x + 10.0;
                    fragments.push(block.fragment(x, bottom_y));
                    bottom_y += block.height;
                }
                LegendPosition::Left => {
                    let y = top_total + frame.origin_y + 15.0;
                    fragments.push(block.fragment(left_x, y));
                    left_x += block.width;
                }
                LegendPosition::Top => {
                    fragments.push(block.fragment(10.0, top_y));
                    top_y += block.height + 10.0;
                }
                LegendPosition::Custom => {}
            }
        }

        let bottom_total: f64 = anchor(&blocks, LegendPosition::Bottom)
            .map(|b| b.height)
            .sum();
        let right_total_w: f64 = anchor(&blocks, LegendPosition::Right).map(|b| b.width).sum();
        let max_h = |position| {
            anchor(&blocks, position)
                .map(|b: &LegendBlock| b.height)
                .fold(0.0, f64::max)
        };
        let max_w = |position| {
            anchor(&blocks, position)
                .map(|b: &LegendBlock| b.width)
                .fold(0.0, f64::max)
        };

        let added_y = top_total
            + bottom_total
                .max(max_h(LegendPosition::Right))
                .max(max_h(LegendPosition::Left))
            + 15.0;
        let max_x = max_w(LegendPosition::Top)
            .max(max_w(LegendPosition::Bottom))
            .max(left_total + right_total_w + frame.plot_w)
            + 15.0;

        extent.position_y += added_y;
        if extent.position_x < max_x {
            extent.position_x = max_x;
        }
        fragments
    }
}

/// Measured anchored text block, ready for pass-two emission.
struct LegendBlock {
    position: LegendPosition,
    lines: Vec<String>,
    style: String,
    line_h: f64,
    width: f64,
    height: f64,
}

impl LegendBlock {
    fn measure(legend: &TextLegend) -> Option<Self> {
        let lines: Vec<String> = legend.lines().iter().map(|s| (*s).to_owned()).collect();
        if lines.is_empty() {
            return None;
        }
        let font = legend.font_size();
        let line_h = 0.7 * font;
        let char_w = 0.47 * font;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Some(Self {
            position: legend.position,
            style: style_string(&legend.style),
            line_h,
            width: longest as f64 * char_w + 10.0,
            height: lines.len() as f64 * line_h,
            lines,
        })
    }

    fn fragment(&self, x: f64, y: f64) -> Fragment {
        let mut fragment = Fragment::translated(self.position.as_str(), x, y);
        for (i, line) in self.lines.iter().enumerate() {
            let mut text = TextMark::at(0.0, i as f64 * self.line_h, line.clone());
            text.style = self.style.clone();
            text.baseline_middle = true;
            fragment.push(text);
        }
        fragment
    }
}

fn anchor(
    blocks: &[LegendBlock],
    position: LegendPosition,
) -> impl Iterator<Item = &LegendBlock> {
    blocks.iter().filter(move |b| b.position == position)
}

// ---- shared helpers ----

fn project<F: Fn(&crate::core::DataPoint) -> f64>(
    data: &[crate::core::DataPoint],
    frame: &Frame,
    value: F,
) -> Vec<(f64, f64)> {
    data.iter()
        .map(|p| (frame.x.map(p.x), frame.y.map(value(p))))
        .collect()
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> LineMark {
    LineMark {
        x1,
        y1,
        x2,
        y2,
        stroke: GRID_STROKE.to_owned(),
        stroke_width: 1.0,
        class: "",
    }
}

fn tick_step_of(ticks: &[f64]) -> f64 {
    if ticks.len() >= 2 {
        ticks[1] - ticks[0]
    } else {
        1.0
    }
}

fn explicit_padding(style: &IndexMap<String, String>) -> Option<f64> {
    style
        .get("padding")
        .and_then(|raw| raw.trim_end_matches("px").trim().parse::<f64>().ok())
}

fn translate_of(x: f64, y: f64) -> String {
    format!(
        "translate({},{})",
        crate::render::fmt_num(x),
        crate::render::fmt_num(y)
    )
}

/// Multi-line title block (axis names): one text mark per line, stepped by
/// the block's font size.
fn text_block_fragment(
    block: &TextBlock,
    x: f64,
    y: f64,
    rotate: Option<f64>,
) -> Option<Fragment> {
    let lines = block.lines();
    if lines.is_empty() {
        return None;
    }
    let font = block.font_size(14.0);
    let style = style_string(&block.style);
    let mut fragment = Fragment::translated("focus_title", x, y);
    fragment.rotate = rotate;
    for (i, line) in lines.iter().enumerate() {
        let mut text = TextMark::at(0.0, 0.0, *line);
        text.transform = Some(translate_of(1.0, i as f64 * font + 5.0));
        text.style = style.clone();
        text.class = "focus_title_text";
        fragment.push(text);
    }
    Some(fragment)
}

/// Header/footer block; these default to an 8px line step.
fn title_fragment(block: &TextBlock, x: f64, y: f64) -> Option<Fragment> {
    let lines = block.lines();
    if lines.is_empty() {
        return None;
    }
    let font = block.font_size(8.0);
    let style = style_string(&block.style);
    let mut fragment = Fragment::translated("focus_title", x, y);
    for (i, line) in lines.iter().enumerate() {
        let mut text = TextMark::at(0.0, 0.0, *line);
        text.transform = Some(translate_of(1.0, i as f64 * font + 5.0));
        text.style = style.clone();
        text.class = "focus_title_text";
        fragment.push(text);
    }
    Some(fragment)
}

fn attribute_pairs(attributes: &IndexMap<String, String>) -> Vec<(String, String)> {
    attributes
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
