//! Measuring and painting of the formula tree.
//!
//! Every node type implements the same three operations in its own module here:
//! `measure` (bottom-up, pure), `draw` (top-down, positions children from their metrics)
//! and `to_html`.

mod brace;
mod decorated;
mod frac;
mod instruction;
mod list;
mod matrix;
mod script;
mod sqrt;
mod text;

use crate::canvas::Pen;
use crate::environment::MathEnv;
use crate::font::{FontMetrics, TextMetrics};
use crate::metrics::BoxMetrics;
use crate::params::{FontEncoding, FontFamilies, LayoutParams};

/// Everything a layout pass needs besides the node and its environment.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub metrics: &'a dyn FontMetrics,
    pub params: &'a LayoutParams,
    pub fonts: &'a FontFamilies,
    pub encoding: FontEncoding,
    /// Outline the box of every node while drawing.
    pub debug_boxes: bool,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        metrics: &'a dyn FontMetrics,
        params: &'a LayoutParams,
        fonts: &'a FontFamilies,
        encoding: FontEncoding,
    ) -> Self {
        LayoutContext {
            metrics,
            params,
            fonts,
            encoding,
            debug_boxes: false,
        }
    }

    #[must_use]
    pub fn with_debug_boxes(self, debug_boxes: bool) -> Self {
        LayoutContext {
            debug_boxes,
            ..self
        }
    }

    #[inline]
    pub(crate) fn measure_in(&self, env: &MathEnv, text: &str) -> TextMetrics {
        self.metrics.measure_text(&env.font(self.fonts), text)
    }

    #[inline]
    pub(crate) fn x_height(&self, env: &MathEnv) -> f64 {
        self.measure_in(env, "x").x_height
    }

    #[inline]
    pub(crate) fn width_of(&self, env: &MathEnv, text: &str) -> f64 {
        self.measure_in(env, text).width
    }

    #[inline]
    pub(crate) fn strikeout(&self, env: &MathEnv) -> f64 {
        self.measure_in(env, "x").strikeout_pos
    }

    /// Stroke width for rules and outlines.
    #[inline]
    pub(crate) fn line_width(&self, env: &MathEnv) -> f64 {
        (env.size * self.params.line_width_factor).max(0.3)
    }

    #[inline]
    pub(crate) fn pen(&self, env: &MathEnv) -> Pen {
        Pen::new(env.color, self.line_width(env))
    }

    /// A box without extent that still carries the strikeout position of `env`.
    pub(crate) fn empty_box(&self, env: &MathEnv) -> BoxMetrics {
        BoxMetrics::new(0.0, 0.0, 0.0, self.strikeout(env))
    }
}
