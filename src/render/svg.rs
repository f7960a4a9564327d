//! SVG serialization of composed fragments.
//!
//! One root `<svg>`, one `<g class="chart">` per chart, one `<g>` per
//! fragment.

use std::fmt::Write as _;

use crate::render::primitives::{CircleMark, LineMark, Mark, PathMark, RectMark, TextMark};
use crate::render::Fragment;

/// Compact numeric rendering: up to three decimals, trailing zeros trimmed.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Serializes the whole canvas. `charts` holds one fragment list per chart,
/// in stacking order.
#[must_use]
pub fn write_document(width: f64, height: f64, id: &str, charts: &[Vec<Fragment>]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"svg-container\" id=\"{}\" width=\"{}\" height=\"{}\">",
        escape_attr(id),
        fmt_num(width),
        fmt_num(height),
    );
    for fragments in charts {
        out.push_str("<g class=\"chart\">");
        for fragment in fragments {
            if fragment.is_empty() {
                continue;
            }
            write_fragment(&mut out, fragment);
        }
        out.push_str("</g>");
    }
    out.push_str("</svg>");
    out
}

fn write_fragment(out: &mut String, fragment: &Fragment) {
    let (tx, ty) = fragment.translate;
    out.push_str("<g");
    if !fragment.class.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_attr(&fragment.class));
    }
    if tx != 0.0 || ty != 0.0 || fragment.rotate.is_some() {
        let mut transform = format!("translate({},{})", fmt_num(tx), fmt_num(ty));
        if let Some(angle) = fragment.rotate {
            let _ = write!(transform, " rotate({})", fmt_num(angle));
        }
        let _ = write!(out, " transform=\"{transform}\"");
    }
    out.push('>');
    for mark in &fragment.marks {
        match mark {
            Mark::Line(line) => write_line(out, line),
            Mark::Rect(rect) => write_rect(out, rect),
            Mark::Circle(circle) => write_circle(out, circle),
            Mark::Text(text) => write_text(out, text),
            Mark::Path(path) => write_path(out, path),
        }
    }
    out.push_str("</g>");
}

fn write_class(out: &mut String, class: &str) {
    if !class.is_empty() {
        let _ = write!(out, " class=\"{class}\"");
    }
}

fn write_line(out: &mut String, line: &LineMark) {
    out.push_str("<line");
    write_class(out, line.class);
    let _ = write!(
        out,
        " x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        fmt_num(line.x1),
        fmt_num(line.y1),
        fmt_num(line.x2),
        fmt_num(line.y2),
        escape_attr(&line.stroke),
        fmt_num(line.stroke_width),
    );
}

fn write_rect(out: &mut String, rect: &RectMark) {
    out.push_str("<rect");
    write_class(out, rect.class);
    let _ = write!(
        out,
        " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
        escape_attr(&rect.fill),
    );
}

fn write_circle(out: &mut String, circle: &CircleMark) {
    out.push_str("<circle");
    write_class(out, circle.class);
    if !circle.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attr(&circle.style));
    }
    let _ = write!(
        out,
        " r=\"{}\" fill=\"{}\" cx=\"{}\" cy=\"{}\"/>",
        fmt_num(circle.r),
        escape_attr(&circle.fill),
        fmt_num(circle.cx),
        fmt_num(circle.cy),
    );
}

fn write_text(out: &mut String, text: &TextMark) {
    out.push_str("<text");
    write_class(out, text.class);
    if let Some(transform) = &text.transform {
        let _ = write!(out, " transform=\"{}\"", escape_attr(transform));
    } else {
        let _ = write!(out, " x=\"{}\" y=\"{}\"", fmt_num(text.x), fmt_num(text.y));
    }
    if text.baseline_middle {
        out.push_str(" dominant-baseline=\"middle\"");
    }
    if !text.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attr(&text.style));
    }
    let _ = write!(out, ">{}</text>", escape_text(&text.content));
}

fn write_path(out: &mut String, path: &PathMark) {
    out.push_str("<path");
    write_class(out, path.class);
    if !path.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape_attr(&path.style));
    }
    for (key, value) in &path.attributes {
        let _ = write!(out, " {}=\"{}\"", key, escape_attr(value));
    }
    let _ = write!(out, " d=\"{}\"/>", escape_attr(&path.d));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_trims_trailing_zeros() {
        assert_eq!(fmt_num(50.0), "50");
        assert_eq!(fmt_num(0.5500), "0.55");
        assert_eq!(fmt_num(12.3456), "12.346");
    }

    #[test]
    fn empty_canvas_serializes_root_only() {
        let doc = write_document(500.0, 400.0, "svgMain", &[]);
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(doc.contains("width=\"500\""));
        assert!(doc.contains("height=\"400\""));
        assert!(doc.ends_with("</svg>"));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut fragment = Fragment::new("legend");
        fragment.push(TextMark::at(0.0, 0.0, "a < b & c"));
        let doc = write_document(10.0, 10.0, "t", &[vec![fragment]]);
        assert!(doc.contains(">a &lt; b &amp; c</text>"));
    }
}
