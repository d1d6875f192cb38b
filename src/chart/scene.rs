//! Retained list of draw primitives.
//!
//! The chart engine never talks to a graphics backend directly: every draw pass appends
//! primitives to a `Scene`, and the viewer (egui painter) or the SVG exporter replays them.

use std::fmt::Write;

use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color32,
    pub width: f64,
    pub opacity: f32,
    /// Dash length; solid when `None`
    pub dash: Option<f64>,
}

impl LineStyle {
    pub fn solid(color: Color32, width: f64) -> Self {
        LineStyle {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn dashed(mut self, dash: f64) -> Self {
        self.dash = Some(dash);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    /// Horizontal line across the whole scene width, whatever that ends up being
    HRule { y: f64, style: LineStyle },
    Rect {
        min: Point,
        width: f64,
        height: f64,
        fill: Color32,
        opacity: f32,
        corner_radius: f64,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color32,
        opacity: f32,
    },
    Text {
        pos: Point,
        text: String,
        color: Color32,
        size: f64,
        anchor: TextAnchor,
        baseline: TextBaseline,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Scene {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    pub fn line(&mut self, from: Point, to: Point, style: LineStyle) {
        self.push(Primitive::Line { from, to, style });
    }

    pub fn rect(&mut self, min: Point, width: f64, height: f64, fill: Color32, opacity: f32) {
        self.push(Primitive::Rect {
            min,
            width,
            height,
            fill,
            opacity,
            corner_radius: 0.0,
        });
    }

    pub fn text(
        &mut self,
        pos: Point,
        text: impl Into<String>,
        color: Color32,
        size: f64,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) {
        self.push(Primitive::Text {
            pos,
            text: text.into(),
            color,
            size,
            anchor,
            baseline,
        });
    }

    pub fn texts(&self) -> impl Iterator<Item = (&Point, &str, f64)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { pos, text, size, .. } => Some((pos, text.as_str(), *size)),
            _ => None,
        })
    }

    /// Standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            num(self.width),
            num(self.height),
            num(self.width),
            num(self.height)
        );
        self.write_svg_body(&mut out, 0.0);
        out.push_str("</svg>\n");
        out
    }

    /// Primitives as SVG elements inside a `<g>` shifted by `offset_x`
    pub fn write_svg_body(&self, out: &mut String, offset_x: f64) {
        let _ = writeln!(out, r#"<g transform="translate({},0)">"#, num(offset_x));
        for primitive in &self.primitives {
            write_primitive(out, primitive, self.width);
        }
        out.push_str("</g>\n");
    }
}

fn write_primitive(out: &mut String, primitive: &Primitive, width: f64) {
    match primitive {
        Primitive::Line { from, to, style } => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(style)
            );
        }
        Primitive::HRule { y, style } => {
            let _ = writeln!(
                out,
                r#"<line x1="0" y1="{}" x2="{}" y2="{}"{}/>"#,
                num(*y),
                num(width),
                num(*y),
                stroke_attrs(style)
            );
        }
        Primitive::Rect {
            min,
            width,
            height,
            fill,
            opacity,
            corner_radius,
        } => {
            let _ = writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" opacity="{}"/>"#,
                num(min.x),
                num(min.y),
                num(*width),
                num(*height),
                num(*corner_radius),
                hex(*fill),
                opacity
            );
        }
        Primitive::Polygon {
            points,
            fill,
            opacity,
        } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect();
            let _ = writeln!(
                out,
                r#"<polygon points="{}" fill="{}" opacity="{}"/>"#,
                pts.join(" "),
                hex(*fill),
                opacity
            );
        }
        Primitive::Text {
            pos,
            text,
            color,
            size,
            anchor,
            baseline,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let baseline = match baseline {
                TextBaseline::Top => "hanging",
                TextBaseline::Middle => "middle",
                TextBaseline::Bottom => "auto",
            };
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" fill="{}" font-size="{}" font-family="sans-serif" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
                num(pos.x),
                num(pos.y),
                hex(*color),
                num(*size),
                anchor,
                baseline,
                escape(text)
            );
        }
    }
}

fn stroke_attrs(style: &LineStyle) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}" opacity="{}""#,
        hex(style.color),
        num(style.width),
        style.opacity
    );
    if let Some(dash) = style.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, num(dash));
    }
    attrs
}

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// Two decimals is plenty for pixels; trailing zeros dropped to keep documents small
fn num(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
