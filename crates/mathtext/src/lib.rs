//! Parse LaTeX-like formula markup and lay it out as boxes.
//!
//! The markup mixes plain text with `$...$` math, styling commands like `\textbf{...}`,
//! fractions, roots, scripts, matrices and auto-sized delimiters. A parsed formula can be
//! measured and painted onto any [`Canvas`] given a [`FontMetrics`] provider, or converted to
//! a best-effort HTML snippet.
//!
//! # Usage
//!
//! ```rust
//! use mathtext::{MathText, MathTextConfig};
//! use mathtext::renderer::canvas::RecordingCanvas;
//! use mathtext::renderer::font::ApproxMetrics;
//!
//! let mut formula = MathText::new(MathTextConfig::default());
//! assert!(formula.parse(r"Area: $\pi r^2$"));
//!
//! let metrics = ApproxMetrics::default();
//! let size = formula.measure(&metrics);
//! let mut canvas = RecordingCanvas::new();
//! let end = formula.draw(&mut canvas, &metrics, 0.0, size.baseline_height);
//! assert!(end > 0.0);
//! ```
//!
//! Parsing never fails outright. Problems are collected and can be inspected with
//! [`MathText::errors`]; the tree built alongside them can still be measured and drawn.
//!
//! # Features
//!
//! - `serde`: With this feature, [`MathTextConfig`] implements serde's `Deserialize` and
//!   `Serialize`.
//! - `ariadne`: Adds [`MathTextError::to_report`] for pretty-printed diagnostics.
//!
mod color_defs;
mod commands;
mod environments;
mod error;
mod lexer;
mod parser;
mod token;
mod token_queue;

use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use mathtext_renderer as renderer;
use mathtext_renderer::{
    ast::Node,
    canvas::Canvas,
    color::RGB,
    environment::MathEnv,
    font::FontMetrics,
    layout::LayoutContext,
    metrics::{Alignment, BoxMetrics, Rect},
    params::{FontEncoding, FontFamilies, LayoutParams},
};

pub use self::error::{MathTextError, Severity};
use self::parser::Parser;

/// Configuration for parsing and laying out formulas.
///
/// # Example usage
///
/// ```rust
/// use mathtext::MathTextConfig;
///
/// // Default values
/// let config = MathTextConfig::default();
///
/// // A larger formula that starts out in math mode
/// let config = MathTextConfig {
///     font_size: 14.0,
///     initial_math_mode: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct MathTextConfig {
    /// Base font size in canvas units.
    pub font_size: f64,
    pub font_color: RGB,
    pub fonts: FontFamilies,
    /// Which glyph table resolves symbol commands.
    pub encoding: FontEncoding,
    /// If `true`, the formula starts in math mode as if it were wrapped in `$...$`.
    pub initial_math_mode: bool,
    pub params: LayoutParams,
}

impl Default for MathTextConfig {
    fn default() -> Self {
        MathTextConfig {
            font_size: 10.0,
            font_color: RGB::BLACK,
            fonts: FontFamilies::default(),
            encoding: FontEncoding::default(),
            initial_math_mode: false,
            params: LayoutParams::default(),
        }
    }
}

/// A parsed formula.
#[derive(Debug, Clone)]
pub struct MathText {
    config: MathTextConfig,
    source: String,
    root: Node,
    errors: Vec<MathTextError>,
    debug_boxes: bool,
}

impl MathText {
    pub fn new(config: MathTextConfig) -> Self {
        MathText {
            config,
            source: String::new(),
            root: Node::empty(),
            errors: Vec::new(),
            debug_boxes: false,
        }
    }

    /// Parse `text`, replacing the previous formula.
    ///
    /// Returns `true` if there were no errors. The formula is usable either way.
    pub fn parse(&mut self, text: &str) -> bool {
        let parsed = Parser::new(text).parse(self.config.initial_math_mode);
        if !parsed.errors.is_empty() {
            log::debug!("{} error(s) in {text:?}", parsed.errors.len());
        }
        self.source = text.to_string();
        self.root = parsed.root;
        self.errors = parsed.errors;
        self.errors.is_empty()
    }

    /// The errors of the last [`parse`](Self::parse), in source order.
    #[inline]
    pub fn errors(&self) -> &[MathTextError] {
        &self.errors
    }

    /// The errors of the last [`parse`](Self::parse) as `"offset: message"` strings.
    pub fn error_list(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn config(&self) -> &MathTextConfig {
        &self.config
    }

    /// Outline the box of every node when drawing.
    pub fn set_debug_boxes(&mut self, debug_boxes: bool) {
        self.debug_boxes = debug_boxes;
    }

    fn env(&self) -> MathEnv {
        MathEnv::new(
            self.config.font_size,
            self.config.font_color,
            self.config.initial_math_mode,
        )
    }

    fn context<'a>(&'a self, metrics: &'a dyn FontMetrics) -> LayoutContext<'a> {
        LayoutContext::new(
            metrics,
            &self.config.params,
            &self.config.fonts,
            self.config.encoding,
        )
        .with_debug_boxes(self.debug_boxes)
    }

    pub fn measure(&self, metrics: &dyn FontMetrics) -> BoxMetrics {
        self.root.measure(&self.context(metrics), &self.env())
    }

    /// Paint the formula with its baseline at `y`, starting at `x`.
    ///
    /// Returns the x position after the formula.
    pub fn draw(&self, canvas: &mut dyn Canvas, metrics: &dyn FontMetrics, x: f64, y: f64) -> f64 {
        self.root
            .draw(&self.context(metrics), canvas, x, y, &self.env())
    }

    /// Paint the formula aligned inside `rect`.
    pub fn draw_in_rect(
        &self,
        canvas: &mut dyn Canvas,
        metrics: &dyn FontMetrics,
        rect: Rect,
        alignment: Alignment,
    ) -> f64 {
        let size = self.measure(metrics);
        let (x, y) = alignment.origin(rect, &size);
        self.draw(canvas, metrics, x, y)
    }

    /// Convert the formula to an HTML snippet wrapped in one `<span>`.
    ///
    /// The flag is `false` if some part (a fraction, root, matrix, ...) could only be
    /// approximated.
    pub fn to_html(&self) -> (String, bool) {
        let env = self.env();
        let mut output = String::new();
        let _ = write!(
            output,
            r#"<span class="mathtext" style="font-size:{}px;color:"#,
            self.config.font_size
        );
        self.config.font_color.append_as_hex(&mut output);
        output.push_str(r#"">"#);
        let faithful = self.root.to_html(&mut output, &env, &env);
        output.push_str("</span>");
        (output, faithful)
    }

    /// Format all errors as HTML snippets, see [`MathTextError::to_html`].
    pub fn errors_to_html(&self, css_class: Option<&str>) -> String {
        let mut output = String::new();
        for err in &self.errors {
            output.push_str(&err.to_html(&self.source, css_class));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use mathtext_renderer::canvas::RecordingCanvas;
    use mathtext_renderer::font::ApproxMetrics;

    use super::*;

    #[test]
    fn reparse_discards_previous_tree() {
        let mut formula = MathText::new(MathTextConfig::default());
        assert!(!formula.parse(r"\frac{a}"));
        assert_eq!(formula.errors().len(), 1);
        assert!(formula.parse("b"));
        assert!(formula.errors().is_empty());
        assert_eq!(formula.source(), "b");
    }

    #[test]
    fn draw_in_rect_centers() {
        let mut formula = MathText::new(MathTextConfig::default());
        formula.parse("x");
        let metrics = ApproxMetrics::default();
        let size = formula.measure(&metrics);
        let mut canvas = RecordingCanvas::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let end = formula.draw_in_rect(&mut canvas, &metrics, rect, Alignment::CENTER);
        let (_, x, _) = canvas.texts().next().unwrap();
        assert!((x - (100.0 - size.width) / 2.0).abs() < 1e-9);
        assert!((end - x - size.width).abs() < 1e-9);
    }

    #[test]
    fn error_list_format() {
        let mut formula = MathText::new(MathTextConfig {
            initial_math_mode: true,
            ..Default::default()
        });
        formula.parse(r"a & b");
        assert_eq!(
            formula.error_list(),
            vec![r#"2: Got "&", which may only appear inside an environment."#.to_string()]
        );
    }
}
