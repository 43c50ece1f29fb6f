use bitflags::bitflags;

/// The extent of a laid-out box.
///
/// All values are in the unit of the font-metrics provider (usually points or pixels).
/// The baseline height is measured from the top of the box down to the baseline,
/// so `overall_height - baseline_height` is the descent below the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub width: f64,
    /// Distance from the top of the box to the baseline (the ascent).
    pub baseline_height: f64,
    pub overall_height: f64,
    /// Height of the strikeout line above the baseline.
    pub strikeout_pos: f64,
}

impl BoxMetrics {
    #[inline]
    pub const fn new(
        width: f64,
        baseline_height: f64,
        overall_height: f64,
        strikeout_pos: f64,
    ) -> Self {
        BoxMetrics {
            width,
            baseline_height,
            overall_height,
            strikeout_pos,
        }
    }

    /// Part of the box below the baseline.
    #[inline]
    pub fn descent(&self) -> f64 {
        self.overall_height - self.baseline_height
    }
}

/// An axis-aligned rectangle. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

bitflags! {
    /// Placement of a formula inside a target rectangle.
    ///
    /// At most one horizontal and one vertical flag should be combined.
    /// Missing flags default to left and top.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Alignment: u8 {
        const LEFT = 1;
        const HCENTER = 1 << 1;
        const RIGHT = 1 << 2;
        const TOP = 1 << 3;
        const VCENTER = 1 << 4;
        const BOTTOM = 1 << 5;
        const CENTER = Self::HCENTER.bits() | Self::VCENTER.bits();
    }
}

impl Alignment {
    /// Returns the origin `(x, baseline_y)` at which a box with `metrics` has to be drawn
    /// to be aligned inside `rect`.
    pub fn origin(self, rect: Rect, metrics: &BoxMetrics) -> (f64, f64) {
        let x = if self.contains(Alignment::RIGHT) {
            rect.right() - metrics.width
        } else if self.contains(Alignment::HCENTER) {
            rect.x + (rect.width - metrics.width) / 2.0
        } else {
            rect.x
        };
        let y = if self.contains(Alignment::BOTTOM) {
            rect.bottom() - metrics.descent()
        } else if self.contains(Alignment::VCENTER) {
            rect.y + (rect.height - metrics.overall_height) / 2.0 + metrics.baseline_height
        } else {
            rect.y + metrics.baseline_height
        };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_origin() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let m = BoxMetrics::new(40.0, 8.0, 10.0, 3.0);
        assert_eq!(Alignment::empty().origin(rect, &m), (10.0, 28.0));
        assert_eq!(Alignment::CENTER.origin(rect, &m), (40.0, 48.0));
        assert_eq!(
            (Alignment::RIGHT | Alignment::BOTTOM).origin(rect, &m),
            (70.0, 68.0)
        );
    }
}
