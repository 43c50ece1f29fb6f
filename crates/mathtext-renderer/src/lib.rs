//! Internal library for the `mathtext` crate for laying out and painting formulas.
//!
//! This library allows you to construct a formula tree, measure its boxes and paint it
//! onto any [`canvas::Canvas`].
//!
//! # Example
//!
//! ```rust
//! use mathtext_renderer_internal::ast::{FracMode, FracNode, Node, TextNode};
//! use mathtext_renderer_internal::canvas::RecordingCanvas;
//! use mathtext_renderer_internal::environment::MathEnv;
//! use mathtext_renderer_internal::font::ApproxMetrics;
//! use mathtext_renderer_internal::layout::LayoutContext;
//! use mathtext_renderer_internal::params::{FontEncoding, FontFamilies, LayoutParams};
//! use mathtext_renderer_internal::color::RGB;
//!
//! let text = |s: &str| Box::new(Node::Text(TextNode { text: s.to_string() }));
//! let frac = Node::Frac(FracNode {
//!     mode: FracMode::Frac,
//!     first: text("a"),
//!     second: text("b"),
//! });
//!
//! let metrics = ApproxMetrics::default();
//! let params = LayoutParams::default();
//! let fonts = FontFamilies::default();
//! let ctx = LayoutContext::new(&metrics, &params, &fonts, FontEncoding::Unicode);
//! let env = MathEnv::new(10.0, RGB::BLACK, true);
//!
//! let m = frac.measure(&ctx, &env);
//! assert!(m.overall_height > m.baseline_height);
//!
//! let mut canvas = RecordingCanvas::new();
//! let end = frac.draw(&ctx, &mut canvas, 0.0, m.baseline_height, &env);
//! assert_eq!(end, m.width);
//! assert_eq!(canvas.texts().count(), 2);
//! ```
pub mod ast;
pub mod canvas;
pub mod color;
pub mod environment;
pub mod font;
pub mod html;
pub mod layout;
pub mod metrics;
pub mod params;
mod shapes;
pub mod svg;
pub mod symbol;
