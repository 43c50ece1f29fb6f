use crate::ast::{SpaceWidth, SymbolNode, TextNode, WhitespaceNode};
use crate::canvas::{Canvas, Pen};
use crate::environment::{MathEnv, StyleFlags};
use crate::font::{FontDescriptor, TextMetrics};
use crate::html::escape_html_content;
use crate::metrics::{BoxMetrics, Rect};
use crate::params::FontEncoding;
use crate::symbol::{self, GlyphFont, SymbolFlags, SymbolSpec};

use super::LayoutContext;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RunKind {
    Letters,
    /// A single operator character that gets extra room in math mode.
    Operator,
    Other,
}

fn is_math_operator(ch: char) -> bool {
    matches!(ch, '+' | '=' | '<' | '>' | '−' | '±' | '×' | '÷' | '*')
}

fn run_kind(ch: char) -> RunKind {
    if ch.is_alphabetic() {
        RunKind::Letters
    } else if is_math_operator(ch) {
        RunKind::Operator
    } else {
        RunKind::Other
    }
}

/// Splits math text into letter runs, single operators and runs of everything else.
fn split_runs(text: &str) -> Vec<(&str, RunKind)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<RunKind> = None;
    for (idx, ch) in text.char_indices() {
        let kind = run_kind(ch);
        if let Some(prev) = current
            && (prev != kind || kind == RunKind::Operator)
        {
            runs.push((&text[start..idx], prev));
            start = idx;
        }
        current = Some(kind);
    }
    if let Some(kind) = current {
        runs.push((&text[start..], kind));
    }
    runs
}

/// A piece of text with a uniform font.
struct Run<'t> {
    text: &'t str,
    env: MathEnv,
    metrics: TextMetrics,
    advance: f64,
    /// Offset of the glyphs inside the advance, for widened operators.
    offset: f64,
}

/// Common box computation for glyph ink boxes that may be shifted upwards.
fn ink_box(width: f64, ink: &Rect, shift: f64, strikeout: f64) -> BoxMetrics {
    let ascent = -ink.y + shift;
    let descent = (ink.y + ink.height - shift).max(0.0);
    BoxMetrics::new(width, ascent, ascent + descent, strikeout)
}

impl TextNode {
    fn runs<'t>(&'t self, ctx: &LayoutContext<'_>, env: &MathEnv) -> Vec<Run<'t>> {
        if !env.inside_math {
            let metrics = ctx.measure_in(env, &self.text);
            return vec![Run {
                text: &self.text,
                env: *env,
                metrics,
                advance: metrics.width,
                offset: 0.0,
            }];
        }
        let widen = ctx.params.mathoperator_width_factor;
        split_runs(&self.text)
            .into_iter()
            .map(|(text, kind)| {
                let env = if kind == RunKind::Letters && !env.has(StyleFlags::UPRIGHT) {
                    env.with_flags(StyleFlags::ITALIC)
                } else {
                    *env
                };
                let metrics = ctx.measure_in(&env, text);
                let (advance, offset) = if kind == RunKind::Operator {
                    (metrics.width * widen, metrics.width * (widen - 1.0) / 2.0)
                } else {
                    (metrics.width, 0.0)
                };
                Run {
                    text,
                    env,
                    metrics,
                    advance,
                    offset,
                }
            })
            .collect()
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let mut width = 0.0;
        let mut ascent = 0.0f64;
        let mut descent = 0.0f64;
        for run in self.runs(ctx, env) {
            let ink = run.metrics.bounding_box;
            width += run.advance;
            ascent = ascent.max(-ink.y);
            descent = descent.max(ink.y + ink.height);
        }
        BoxMetrics::new(width, ascent, ascent + descent, ctx.strikeout(env))
    }

    pub(crate) fn draw(
        &self,
        ctx: &LayoutContext<'_>,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        env: &MathEnv,
    ) -> f64 {
        let mut caret = x;
        for run in self.runs(ctx, env) {
            canvas.draw_text(
                caret + run.offset,
                y,
                run.text,
                &run.env.font(ctx.fonts),
                env.color,
            );
            caret += run.advance;
        }
        draw_text_lines(ctx, canvas, x, caret, y, env);
        caret
    }

    pub(crate) fn is_italic(&self, env: &MathEnv) -> bool {
        env.has(StyleFlags::ITALIC)
            || (env.inside_math
                && !env.has(StyleFlags::UPRIGHT)
                && self.text.chars().last().is_some_and(char::is_alphabetic))
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv) -> bool {
        if !env.inside_math {
            escape_html_content(output, &self.text);
            return true;
        }
        for (text, kind) in split_runs(&self.text) {
            if kind == RunKind::Letters && !env.has(StyleFlags::UPRIGHT) {
                output.push_str("<i>");
                escape_html_content(output, text);
                output.push_str("</i>");
            } else {
                escape_html_content(output, text);
            }
        }
        true
    }
}

/// Underline, overline and strikeout requested by the environment.
fn draw_text_lines(
    ctx: &LayoutContext<'_>,
    canvas: &mut dyn Canvas,
    x1: f64,
    x2: f64,
    y: f64,
    env: &MathEnv,
) {
    let lines = env.flags & (StyleFlags::UNDERLINE | StyleFlags::OVERLINE | StyleFlags::STRIKE);
    if lines.is_empty() {
        return;
    }
    let font = ctx.measure_in(env, "x");
    let pen = ctx.pen(env);
    if lines.contains(StyleFlags::UNDERLINE) {
        let ly = y + font.descent / 2.0;
        canvas.draw_line(x1, ly, x2, ly, pen);
    }
    if lines.contains(StyleFlags::OVERLINE) {
        let ly = y - font.ascent;
        canvas.draw_line(x1, ly, x2, ly, pen);
    }
    if lines.contains(StyleFlags::STRIKE) {
        let ly = y - font.strikeout_pos;
        canvas.draw_line(x1, ly, x2, ly, pen);
    }
}

/// A symbol whose glyph has been found in the active encoding.
struct ResolvedSymbol<'f> {
    spec: &'static SymbolSpec,
    font: FontDescriptor<'f>,
    metrics: TextMetrics,
    shift: f64,
    advance: f64,
    offset: f64,
}

impl SymbolNode {
    fn italic(spec: &SymbolSpec, env: &MathEnv) -> bool {
        let inherited = if spec.has(SymbolFlags::LETTER) && env.inside_math {
            !env.has(StyleFlags::UPRIGHT) || env.has(StyleFlags::ITALIC)
        } else {
            env.has(StyleFlags::ITALIC)
        };
        spec.italic.resolve(inherited)
    }

    fn resolve<'c>(&self, ctx: &LayoutContext<'c>, env: &MathEnv) -> Option<ResolvedSymbol<'c>> {
        let spec = symbol::lookup(ctx.encoding, &self.name)?;
        let base = env.font(ctx.fonts);
        let font = FontDescriptor {
            family: match spec.font {
                GlyphFont::Current => base.family,
                GlyphFont::Symbol => ctx.fonts.symbol.as_str(),
            },
            size: env.size * spec.font_scale,
            bold: spec.bold.resolve(env.has(StyleFlags::BOLD)),
            italic: Self::italic(spec, env),
            small_caps: false,
        };
        let metrics = ctx.metrics.measure_text(&font, spec.glyph);
        let shift = spec.y_shift * ctx.x_height(env);
        let (advance, offset) = if env.inside_math && spec.has(SymbolFlags::EXTEND_WIDTH_IN_MATH) {
            let widen = ctx.params.mathoperator_width_factor;
            (metrics.width * widen, metrics.width * (widen - 1.0) / 2.0)
        } else {
            (metrics.width, 0.0)
        };
        Some(ResolvedSymbol {
            spec,
            font,
            metrics,
            shift,
            advance,
            offset,
        })
    }

    /// Whether scripts attached to this symbol are set above and below it.
    pub(crate) fn has_limits(&self, ctx: &LayoutContext<'_>) -> bool {
        symbol::lookup(ctx.encoding, &self.name).is_some_and(|spec| spec.has(SymbolFlags::LIMITS))
    }

    fn placeholder(ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let height = 0.7 * env.size;
        BoxMetrics::new(0.6 * env.size, height, height, ctx.strikeout(env))
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let Some(sym) = self.resolve(ctx, env) else {
            log::debug!(
                "no glyph for \\{} in the {} encoding",
                self.name,
                <&str>::from(ctx.encoding)
            );
            return Self::placeholder(ctx, env);
        };
        let strikeout = ctx.strikeout(env);
        if sym.spec.has(SymbolFlags::HEIGHT_IS_ASCENT) {
            let ascent = sym.metrics.ascent + sym.shift;
            let descent = (sym.metrics.descent - sym.shift).max(0.0);
            BoxMetrics::new(sym.advance, ascent, ascent + descent, strikeout)
        } else {
            ink_box(sym.advance, &sym.metrics.bounding_box, sym.shift, strikeout)
        }
    }

    pub(crate) fn draw(
        &self,
        ctx: &LayoutContext<'_>,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        env: &MathEnv,
    ) -> f64 {
        let Some(sym) = self.resolve(ctx, env) else {
            let m = Self::placeholder(ctx, env);
            canvas.draw_rect(
                Rect::new(x, y - m.baseline_height, m.width, m.overall_height),
                Some(Pen::new(env.color, ctx.line_width(env))),
                None,
            );
            return x + m.width;
        };
        canvas.draw_text(x + sym.offset, y - sym.shift, sym.spec.glyph, &sym.font, env.color);
        let end = x + sym.advance;
        draw_text_lines(ctx, canvas, x, end, y, env);
        end
    }

    pub(crate) fn is_italic(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> bool {
        symbol::lookup(ctx.encoding, &self.name).is_some_and(|spec| Self::italic(spec, env))
    }

    /// HTML output always uses the Unicode glyphs.
    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv) -> bool {
        let Some(spec) = symbol::lookup(FontEncoding::Unicode, &self.name) else {
            output.push('\\');
            escape_html_content(output, &self.name);
            return false;
        };
        if Self::italic(spec, env) {
            output.push_str("<i>");
            escape_html_content(output, spec.glyph);
            output.push_str("</i>");
        } else {
            escape_html_content(output, spec.glyph);
        }
        true
    }
}

impl WhitespaceNode {
    fn width(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> f64 {
        match self.width {
            SpaceWidth::Normal => ctx.width_of(env, " "),
            SpaceWidth::Em(em) => em * env.size,
        }
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        BoxMetrics::new(self.width(ctx, env), 0.0, 0.0, ctx.strikeout(env))
    }

    pub(crate) fn draw(&self, ctx: &LayoutContext<'_>, x: f64, env: &MathEnv) -> f64 {
        x + self.width(ctx, env)
    }

    pub(crate) fn to_html(&self, output: &mut String) -> bool {
        match self.width {
            SpaceWidth::Normal if self.non_breaking => output.push_str("&nbsp;"),
            SpaceWidth::Normal => output.push(' '),
            SpaceWidth::Em(em) if em <= 0.0 => {}
            SpaceWidth::Em(em) if em < 0.3 => output.push_str("&thinsp;"),
            SpaceWidth::Em(em) if em < 0.75 => output.push_str("&ensp;"),
            SpaceWidth::Em(em) => {
                for _ in 0..(em.round() as usize) {
                    output.push_str("&emsp;");
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_text_runs() {
        assert_eq!(
            split_runs("2x+y1"),
            vec![
                ("2", RunKind::Other),
                ("x", RunKind::Letters),
                ("+", RunKind::Operator),
                ("y", RunKind::Letters),
                ("1", RunKind::Other),
            ]
        );
        assert_eq!(split_runs("=="), vec![("=", RunKind::Operator), ("=", RunKind::Operator)]);
        assert!(split_runs("").is_empty());
    }
}
