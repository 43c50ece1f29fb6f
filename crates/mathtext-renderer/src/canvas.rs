//! The drawing collaborator and a canvas that records its calls.

use crate::color::RGB;
use crate::font::FontDescriptor;
use crate::metrics::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bézier curve with two control points and an end point.
    CubicTo(Point, Point, Point),
    Close,
}

/// An outline built from lines and cubic curves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathElement::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathElement::LineTo(Point::new(x, y)));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) -> &mut Self {
        self.elements.push(PathElement::CubicTo(c1, c2, end));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::Close);
        self
    }

    /// Starts a polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Path::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(first.x, first.y);
            for p in rest {
                path.line_to(p.x, p.y);
            }
        }
        path
    }

    #[inline]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Stroke style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: RGB,
    pub width: f64,
}

impl Pen {
    #[inline]
    pub const fn new(color: RGB, width: f64) -> Self {
        Pen { color, width }
    }
}

/// A 2D surface the formula tree is painted on.
///
/// Coordinates grow to the right and downwards. Text is positioned by the left end of its
/// baseline.
pub trait Canvas {
    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontDescriptor<'_>, color: RGB);
    /// Strokes `path`; if `fill` is given, the enclosed area is filled first.
    fn draw_path(&mut self, path: &Path, pen: Pen, fill: Option<RGB>);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen);
    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, pen: Option<Pen>, fill: Option<RGB>);
    fn draw_rect(&mut self, rect: Rect, pen: Option<Pen>, fill: Option<RGB>);
    /// Pushes the current transformation onto a stack.
    fn save(&mut self);
    /// Pops the transformation pushed by the matching [`Canvas::save`].
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotates clockwise by `degrees` around the current origin.
    fn rotate(&mut self, degrees: f64);
}

/// One call on a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        bold: bool,
        italic: bool,
        color: RGB,
    },
    Path {
        path: Path,
        pen: Pen,
        fill: Option<RGB>,
    },
    Line {
        from: Point,
        to: Point,
        pen: Pen,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        fill: Option<RGB>,
    },
    Rect {
        rect: Rect,
        pen: Option<Pen>,
        fill: Option<RGB>,
    },
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
}

/// Keeps every drawing call in a list instead of painting.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        RecordingCanvas::default()
    }

    /// All text runs in painting order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { x, y, text, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Path { path, .. } => Some(path),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontDescriptor<'_>, color: RGB) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            size: font.size,
            bold: font.bold,
            italic: font.italic,
            color,
        });
    }

    fn draw_path(&mut self, path: &Path, pen: Pen, fill: Option<RGB>) {
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            pen,
            fill,
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen) {
        self.commands.push(DrawCommand::Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            pen,
        });
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, _pen: Option<Pen>, fill: Option<RGB>) {
        self.commands.push(DrawCommand::Ellipse {
            center: Point::new(cx, cy),
            rx,
            ry,
            fill,
        });
    }

    fn draw_rect(&mut self, rect: Rect, pen: Option<Pen>, fill: Option<RGB>) {
        self.commands.push(DrawCommand::Rect { rect, pen, fill });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.commands.push(DrawCommand::Rotate(degrees));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_starts_with_move() {
        let path = Path::polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(3.0, 0.0)]);
        assert_eq!(
            path.elements(),
            &[
                PathElement::MoveTo(Point::new(0.0, 0.0)),
                PathElement::LineTo(Point::new(1.0, 2.0)),
                PathElement::LineTo(Point::new(3.0, 0.0)),
            ]
        );
        assert!(Path::polyline(&[]).is_empty());
    }
}
