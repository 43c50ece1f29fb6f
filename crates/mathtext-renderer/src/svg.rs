//! A [`Canvas`] that produces an SVG document.

use std::fmt::Write;

use crate::canvas::{Canvas, Path, PathElement, Pen};
use crate::color::RGB;
use crate::font::FontDescriptor;
use crate::html::{escape_double_quoted_html_attribute, escape_html_content};
use crate::metrics::Rect;

#[derive(Debug, Default)]
pub struct SvgCanvas {
    body: String,
    open_groups: usize,
    saved: Vec<usize>,
}

/// Appends `value` rounded to three decimals, without a trailing `.0`.
fn push_num(output: &mut String, value: f64) {
    // Adding zero turns `-0.0` into `0.0`.
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    let mut buf = dtoa::Buffer::new();
    let s = buf.format(rounded);
    output.push_str(s.strip_suffix(".0").unwrap_or(s));
}

impl SvgCanvas {
    pub fn new() -> Self {
        SvgCanvas::default()
    }

    fn attr(&mut self, name: &str, value: f64) {
        self.body.push(' ');
        self.body.push_str(name);
        self.body.push_str("=\"");
        push_num(&mut self.body, value);
        self.body.push('"');
    }

    fn paint_attrs(&mut self, pen: Option<Pen>, fill: Option<RGB>) {
        self.body.push_str(" fill=\"");
        match fill {
            Some(color) => color.append_as_hex(&mut self.body),
            None => self.body.push_str("none"),
        }
        self.body.push('"');
        if let Some(pen) = pen {
            self.body.push_str(" stroke=\"");
            pen.color.append_as_hex(&mut self.body);
            self.body.push('"');
            self.attr("stroke-width", pen.width);
        }
    }

    fn open_group(&mut self, transform: &str) {
        let _ = write!(self.body, "<g transform=\"{transform}\">");
        self.open_groups += 1;
    }

    /// Wraps everything drawn so far into an `<svg>` element of the given size.
    pub fn finish(mut self, width: f64, height: f64, background: Option<RGB>) -> String {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>");
        }
        let mut output = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        for (name, value) in [("width", width), ("height", height)] {
            let _ = write!(output, " {name}=\"");
            push_num(&mut output, value);
            output.push('"');
        }
        output.push_str(" viewBox=\"0 0 ");
        push_num(&mut output, width);
        output.push(' ');
        push_num(&mut output, height);
        output.push_str("\">");
        if let Some(color) = background {
            output.push_str(r#"<rect width="100%" height="100%" fill=""#);
            color.append_as_hex(&mut output);
            output.push_str("\"/>");
        }
        output.push_str(&self.body);
        output.push_str("</svg>");
        output
    }
}

impl Canvas for SvgCanvas {
    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontDescriptor<'_>, color: RGB) {
        self.body.push_str("<text");
        self.attr("x", x);
        self.attr("y", y);
        self.body.push_str(" font-family=\"");
        escape_double_quoted_html_attribute(&mut self.body, font.family);
        self.body.push('"');
        self.attr("font-size", font.size);
        if font.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if font.italic {
            self.body.push_str(r#" font-style="italic""#);
        }
        if font.small_caps {
            self.body.push_str(r#" font-variant="small-caps""#);
        }
        self.body.push_str(" fill=\"");
        color.append_as_hex(&mut self.body);
        self.body.push_str("\">");
        escape_html_content(&mut self.body, text);
        self.body.push_str("</text>");
    }

    fn draw_path(&mut self, path: &Path, pen: Pen, fill: Option<RGB>) {
        if path.is_empty() {
            return;
        }
        let mut d = String::new();
        for element in path.elements() {
            if !d.is_empty() {
                d.push(' ');
            }
            match element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => {
                    d.push(if matches!(element, PathElement::MoveTo(_)) { 'M' } else { 'L' });
                    for v in [p.x, p.y] {
                        d.push(' ');
                        push_num(&mut d, v);
                    }
                }
                PathElement::CubicTo(c1, c2, end) => {
                    d.push('C');
                    for v in [c1.x, c1.y, c2.x, c2.y, end.x, end.y] {
                        d.push(' ');
                        push_num(&mut d, v);
                    }
                }
                PathElement::Close => d.push('Z'),
            }
        }
        let _ = write!(self.body, "<path d=\"{d}\"");
        self.paint_attrs(Some(pen), fill);
        self.body.push_str(r#" stroke-linejoin="round"/>"#);
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen) {
        self.body.push_str("<line");
        self.attr("x1", x1);
        self.attr("y1", y1);
        self.attr("x2", x2);
        self.attr("y2", y2);
        self.body.push_str(" stroke=\"");
        pen.color.append_as_hex(&mut self.body);
        self.body.push('"');
        self.attr("stroke-width", pen.width);
        self.body.push_str("/>");
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, pen: Option<Pen>, fill: Option<RGB>) {
        self.body.push_str("<ellipse");
        self.attr("cx", cx);
        self.attr("cy", cy);
        self.attr("rx", rx);
        self.attr("ry", ry);
        self.paint_attrs(pen, fill);
        self.body.push_str("/>");
    }

    fn draw_rect(&mut self, rect: Rect, pen: Option<Pen>, fill: Option<RGB>) {
        self.body.push_str("<rect");
        self.attr("x", rect.x);
        self.attr("y", rect.y);
        self.attr("width", rect.width);
        self.attr("height", rect.height);
        self.paint_attrs(pen, fill);
        self.body.push_str("/>");
    }

    fn save(&mut self) {
        self.saved.push(self.open_groups);
    }

    fn restore(&mut self) {
        let Some(depth) = self.saved.pop() else {
            return;
        };
        while self.open_groups > depth {
            self.body.push_str("</g>");
            self.open_groups -= 1;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let mut transform = String::from("translate(");
        push_num(&mut transform, dx);
        transform.push(' ');
        push_num(&mut transform, dy);
        transform.push(')');
        self.open_group(&transform);
    }

    fn rotate(&mut self, degrees: f64) {
        let mut transform = String::from("rotate(");
        push_num(&mut transform, degrees);
        transform.push(')');
        self.open_group(&transform);
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::canvas::Point;

    #[test]
    fn numbers_are_compact() {
        let mut out = String::new();
        for v in [1.0, -0.0, 2.5, 1.23456, -3.0001] {
            push_num(&mut out, v);
            out.push(',');
        }
        assert_eq!(out, "1,0,2.5,1.235,-3,");
    }

    #[test]
    fn save_restore_closes_groups() {
        let mut canvas = SvgCanvas::new();
        canvas.save();
        canvas.translate(5.0, 7.5);
        canvas.rotate(90.0);
        canvas.draw_line(0.0, 0.0, 10.0, 0.0, Pen::new(RGB::BLACK, 0.5));
        canvas.restore();
        let mut path = Path::new();
        path.move_to(0.0, 0.0)
            .cubic_to(Point::new(1.0, 0.0), Point::new(2.0, 1.0), Point::new(2.0, 2.0))
            .close();
        canvas.draw_path(&path, Pen::new(RGB::new(255, 0, 0), 1.0), None);
        let font = FontDescriptor {
            family: "serif",
            size: 10.0,
            bold: false,
            italic: true,
            small_caps: false,
        };
        canvas.draw_text(1.0, 8.0, "a<b", &font, RGB::BLACK);
        assert_snapshot!(canvas.finish(20.0, 10.0, None), @r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10"><g transform="translate(5 7.5)"><g transform="rotate(90)"><line x1="0" y1="0" x2="10" y2="0" stroke="#000000" stroke-width="0.5"/></g></g><path d="M 0 0 C 1 0 2 1 2 2 Z" fill="none" stroke="#ff0000" stroke-width="1" stroke-linejoin="round"/><text x="1" y="8" font-family="serif" font-size="10" font-style="italic" fill="#000000">a&lt;b</text></svg>"##);
    }
}
