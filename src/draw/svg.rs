//! SVG markup renderer.
//!
//! Each segment becomes one filled outline: the cubic offset to either side
//! by the local stamp radius, joined by round caps. That covers the same
//! region as the raster renderer's stamped circles.

use super::bezier::{Bezier, Position};
use super::primitive::{DrawPrimitive, StrokeStyle};
use std::fmt::Write;

/// Options accepted only by vector export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SvgOptions {
    /// Paint the pad background color behind the strokes.
    pub include_background_color: bool,
}

/// Accumulates SVG elements for one document.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    logical_width: f64,
    logical_height: f64,
    ratio: f64,
    body: String,
}

impl SvgRenderer {
    /// Starts a document whose `viewBox` spans the logical surface and whose
    /// output size is scaled by `ratio`.
    pub fn new(logical_width: f64, logical_height: f64, ratio: f64) -> Self {
        Self {
            logical_width,
            logical_height,
            ratio: ratio.max(1.0),
            body: String::new(),
        }
    }

    /// Fills the whole view with `color`.
    pub fn background(&mut self, color: &str) {
        let _ = write!(
            self.body,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_attr(color)
        );
    }

    pub fn finish(self) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
                r#"viewBox="0 0 {vw} {vh}" width="{w}" height="{h}">{body}</svg>"#
            ),
            vw = fmt_num(self.logical_width),
            vh = fmt_num(self.logical_height),
            w = fmt_num(self.logical_width * self.ratio),
            h = fmt_num(self.logical_height * self.ratio),
            body = self.body,
        )
    }

    fn circle(&mut self, center: Position, radius: f64, color: &str) {
        let _ = write!(
            self.body,
            r#"<circle r="{}" cx="{}" cy="{}" fill="{}"/>"#,
            fmt_num(radius),
            fmt_num(center.x),
            fmt_num(center.y),
            escape_attr(color)
        );
    }
}

impl DrawPrimitive for SvgRenderer {
    fn draw_dot(&mut self, center: Position, radius: f64, style: &StrokeStyle) {
        self.circle(center, radius, &style.color);
    }

    fn draw_curve(&mut self, curve: &Bezier, style: &StrokeStyle) {
        match outline(curve) {
            Some(d) => {
                let _ = write!(
                    self.body,
                    r#"<path d="{}" fill="{}"/>"#,
                    d,
                    escape_attr(&style.color)
                );
            }
            None => self.circle(curve.start_point, curve.start_width, &style.color),
        }
    }
}

/// Path data for the filled outline of `curve`, or `None` when the segment
/// has no direction (all four points coincide).
fn outline(curve: &Bezier) -> Option<String> {
    let Bezier {
        start_point: p0,
        control1: p1,
        control2: p2,
        end_point: p3,
        start_width: w0,
        end_width: w3,
    } = *curve;

    let start_dir = direction(p0, &[p1, p2, p3])?;
    let end_dir = direction_back(p3, &[p2, p1, p0])?;
    let n0 = normal(start_dir);
    let n3 = normal(end_dir);

    let w1 = w0 + (w3 - w0) / 3.0;
    let w2 = w0 + (w3 - w0) * 2.0 / 3.0;
    let offset = |p: Position, n: Position, w: f64| Position::new(p.x + n.x * w, p.y + n.y * w);

    let left = [
        offset(p0, n0, w0),
        offset(p1, n0, w1),
        offset(p2, n3, w2),
        offset(p3, n3, w3),
    ];
    let right = [
        offset(p0, n0, -w0),
        offset(p1, n0, -w1),
        offset(p2, n3, -w2),
        offset(p3, n3, -w3),
    ];

    let pt = |p: Position| format!("{},{}", fmt_num(p.x), fmt_num(p.y));
    Some(format!(
        "M {} C {} {} {} A {r3} {r3} 0 0 0 {} C {} {} {} A {r0} {r0} 0 0 0 {} Z",
        pt(left[0]),
        pt(left[1]),
        pt(left[2]),
        pt(left[3]),
        pt(right[3]),
        pt(right[2]),
        pt(right[1]),
        pt(right[0]),
        pt(left[0]),
        r3 = fmt_num(w3),
        r0 = fmt_num(w0),
    ))
}

/// Unit vector from `from` towards the first distinct point in `towards`.
fn direction(from: Position, towards: &[Position]) -> Option<Position> {
    towards.iter().find_map(|to| unit(from, *to))
}

/// Unit vector arriving at `at`, taken from the first distinct point in `from`.
fn direction_back(at: Position, from: &[Position]) -> Option<Position> {
    from.iter().find_map(|p| unit(*p, at))
}

fn unit(from: Position, to: Position) -> Option<Position> {
    let len = from.distance_to(to);
    (len > f64::EPSILON).then(|| Position::new((to.x - from.x) / len, (to.y - from.y) / len))
}

fn normal(dir: Position) -> Position {
    Position::new(-dir.y, dir.x)
}

/// Fixed three-decimal output with trailing zeros trimmed.
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
