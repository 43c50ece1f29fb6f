//! Outlines of delimiters, horizontal braces and accents.

use crate::ast::BraceKind;
use crate::canvas::{Path, Point};

/// Maps relative coordinates inside a delimiter box to absolute ones.
///
/// `u` runs from the outer edge (0) to the inner edge (1) of the delimiter, so closing
/// delimiters are the mirror image of opening ones.
struct DelimiterBox {
    x: f64,
    top: f64,
    width: f64,
    height: f64,
    opening: bool,
}

impl DelimiterBox {
    fn pt(&self, u: f64, v: f64) -> Point {
        let u = if self.opening { u } else { 1.0 - u };
        Point::new(self.x + u * self.width, self.top + v * self.height)
    }

    fn polyline(&self, points: &[(f64, f64)]) -> Path {
        let points: Vec<Point> = points.iter().map(|&(u, v)| self.pt(u, v)).collect();
        Path::polyline(&points)
    }

    fn vertical_line(&self, path: &mut Path, u: f64) {
        let (a, b) = (self.pt(u, 0.0), self.pt(u, 1.0));
        path.move_to(a.x, a.y).line_to(b.x, b.y);
    }
}

/// The outline of a `\left`/`\right` delimiter filling the given box.
///
/// Returns `None` for invisible delimiters.
pub(crate) fn delimiter(
    kind: BraceKind,
    x: f64,
    top: f64,
    width: f64,
    height: f64,
    opening: bool,
) -> Option<Path> {
    let b = DelimiterBox {
        x,
        top,
        width,
        height,
        opening,
    };
    let path = match kind {
        BraceKind::None => return None,
        BraceKind::Paren => {
            let mut path = Path::new();
            let start = b.pt(0.85, 0.0);
            path.move_to(start.x, start.y)
                .cubic_to(b.pt(0.2, 0.12), b.pt(0.2, 0.3), b.pt(0.2, 0.5))
                .cubic_to(b.pt(0.2, 0.7), b.pt(0.2, 0.88), b.pt(0.85, 1.0));
            path
        }
        BraceKind::Bracket => b.polyline(&[(0.8, 0.0), (0.3, 0.0), (0.3, 1.0), (0.8, 1.0)]),
        BraceKind::Floor => b.polyline(&[(0.3, 0.0), (0.3, 1.0), (0.8, 1.0)]),
        BraceKind::Ceil => b.polyline(&[(0.8, 0.0), (0.3, 0.0), (0.3, 1.0)]),
        BraceKind::Angle => b.polyline(&[(0.85, 0.0), (0.15, 0.5), (0.85, 1.0)]),
        BraceKind::Curly => {
            let mut path = Path::new();
            let start = b.pt(0.9, 0.0);
            let upper_mid = b.pt(0.5, 0.35);
            let lower_mid = b.pt(0.5, 0.85);
            path.move_to(start.x, start.y)
                .cubic_to(b.pt(0.6, 0.0), b.pt(0.5, 0.05), b.pt(0.5, 0.15))
                .line_to(upper_mid.x, upper_mid.y)
                .cubic_to(b.pt(0.5, 0.45), b.pt(0.3, 0.5), b.pt(0.1, 0.5))
                .cubic_to(b.pt(0.3, 0.5), b.pt(0.5, 0.55), b.pt(0.5, 0.65))
                .line_to(lower_mid.x, lower_mid.y)
                .cubic_to(b.pt(0.5, 0.95), b.pt(0.6, 1.0), b.pt(0.9, 1.0));
            path
        }
        BraceKind::Bar => {
            let mut path = Path::new();
            b.vertical_line(&mut path, 0.5);
            path
        }
        BraceKind::DoubleBar => {
            let mut path = Path::new();
            b.vertical_line(&mut path, 0.3);
            b.vertical_line(&mut path, 0.7);
            path
        }
    };
    Some(path)
}

/// A horizontal curly brace as drawn by `\underbrace` (`pointing_down`) and `\overbrace`.
///
/// The tips touch the content side of the box, the beak points away from it.
pub(crate) fn horizontal_brace(
    x: f64,
    top: f64,
    width: f64,
    height: f64,
    pointing_down: bool,
) -> Path {
    // `v` is 0 on the content side and 1 at the beak.
    let y = |v: f64| {
        if pointing_down {
            top + v * height
        } else {
            top + (1.0 - v) * height
        }
    };
    let r = (width / 4.0).min(height);
    let (left, right, center) = (x, x + width, x + width / 2.0);
    let mid = y(0.5);
    let mut path = Path::new();
    path.move_to(left, y(0.0))
        .cubic_to(Point::new(left, mid), Point::new(left, mid), Point::new(left + r, mid))
        .line_to(center - r, mid)
        .cubic_to(Point::new(center, mid), Point::new(center, mid), Point::new(center, y(1.0)))
        .cubic_to(Point::new(center, mid), Point::new(center, mid), Point::new(center + r, mid))
        .line_to(right - r, mid)
        .cubic_to(Point::new(right, mid), Point::new(right, mid), Point::new(right, y(0.0)));
    path
}

/// A right-pointing arrow along the vertical middle of the box.
pub(crate) fn arrow(x: f64, top: f64, width: f64, height: f64) -> Path {
    let mid = top + height / 2.0;
    let head = (height * 0.6).min(width / 2.0);
    let tip = x + width;
    let mut path = Path::new();
    path.move_to(x, mid)
        .line_to(tip, mid)
        .move_to(tip - head, mid - head / 2.0)
        .line_to(tip, mid)
        .line_to(tip - head, mid + head / 2.0);
    path
}

/// A circumflex accent centered at `cx`.
pub(crate) fn hat(cx: f64, top: f64, width: f64, height: f64) -> Path {
    Path::polyline(&[
        Point::new(cx - width / 2.0, top + 0.85 * height),
        Point::new(cx, top + 0.15 * height),
        Point::new(cx + width / 2.0, top + 0.85 * height),
    ])
}

/// A tilde accent centered at `cx`.
pub(crate) fn tilde(cx: f64, top: f64, width: f64, height: f64) -> Path {
    let left = cx - width / 2.0;
    let mut path = Path::new();
    path.move_to(left, top + 0.7 * height).cubic_to(
        Point::new(left + 0.3 * width, top),
        Point::new(left + 0.7 * width, top + height),
        Point::new(left + width, top + 0.3 * height),
    );
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PathElement;

    #[test]
    fn closing_delimiters_are_mirrored() {
        let open = delimiter(BraceKind::Bracket, 0.0, 0.0, 10.0, 20.0, true).unwrap();
        let close = delimiter(BraceKind::Bracket, 0.0, 0.0, 10.0, 20.0, false).unwrap();
        let (PathElement::MoveTo(a), PathElement::MoveTo(b)) = (open.elements()[0], close.elements()[0]) else {
            panic!("paths must start with a move");
        };
        assert_eq!(a.y, b.y);
        assert!((a.x - (10.0 - b.x)).abs() < 1e-9);
        assert!(delimiter(BraceKind::None, 0.0, 0.0, 10.0, 20.0, true).is_none());
    }

    #[test]
    fn underbrace_beak_points_down() {
        let path = horizontal_brace(0.0, 0.0, 40.0, 8.0, true);
        let lowest = path
            .elements()
            .iter()
            .filter_map(|e| match e {
                PathElement::CubicTo(_, _, end) => Some(end.y),
                _ => None,
            })
            .fold(f64::MIN, f64::max);
        assert_eq!(lowest, 8.0);
    }
}
