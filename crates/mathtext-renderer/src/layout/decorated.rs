use crate::ast::{DecoratedNode, Decoration};
use crate::canvas::Canvas;
use crate::environment::MathEnv;
use crate::metrics::BoxMetrics;
use crate::shapes;

use super::LayoutContext;

impl Decoration {
    /// Combining character for HTML output.
    fn combining_mark(self) -> &'static str {
        match self {
            Decoration::Vector | Decoration::Arrow => "\u{20D7}",
            Decoration::Hat | Decoration::WideHat => "\u{0302}",
            Decoration::Dot => "\u{0307}",
            Decoration::DDot => "\u{0308}",
            Decoration::Tilde | Decoration::WideTilde => "\u{0303}",
            Decoration::Bar | Decoration::Overline => "\u{0305}",
            Decoration::DoubleOverline => "\u{033F}",
            Decoration::Underline => "\u{0332}",
            Decoration::DoubleUnderline => "\u{0333}",
        }
    }

    /// Accents that cover their whole argument instead of a single glyph.
    fn is_wide(self) -> bool {
        matches!(
            self,
            Decoration::WideHat
                | Decoration::WideTilde
                | Decoration::Arrow
                | Decoration::Overline
                | Decoration::DoubleOverline
                | Decoration::Underline
                | Decoration::DoubleUnderline
        )
    }
}

impl DecoratedNode {
    fn decoration_height(ctx: &LayoutContext<'_>, env: &MathEnv) -> f64 {
        ctx.params.decoration_height_factor * env.size
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let child = self.child.measure(ctx, env);
        let deco = Self::decoration_height(ctx, env);
        let baseline = if self.decoration.is_under() {
            child.baseline_height
        } else {
            child.baseline_height + deco
        };
        BoxMetrics::new(
            child.width,
            baseline,
            child.overall_height + deco,
            child.strikeout_pos,
        )
    }

    pub(crate) fn draw(
        &self,
        ctx: &LayoutContext<'_>,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        env: &MathEnv,
    ) -> f64 {
        let child = self.child.measure(ctx, env);
        let deco = Self::decoration_height(ctx, env);
        let end = self.child.draw(ctx, canvas, x, y, env);
        let pen = ctx.pen(env);
        let width = child.width;
        // Accents over slanted glyphs lean to the right.
        let shift = if self.child.is_italic(ctx, env) {
            0.2 * deco
        } else {
            0.0
        };
        let top = y - child.baseline_height - deco;
        let cx = x + width / 2.0 + shift;
        let accent_width = if self.decoration.is_wide() {
            width
        } else {
            width.min(0.5 * env.size)
        };
        match self.decoration {
            Decoration::Vector | Decoration::Arrow => {
                let path = shapes::arrow(cx - accent_width / 2.0, top, accent_width, deco);
                canvas.draw_path(&path, pen, None);
            }
            Decoration::Hat | Decoration::WideHat => {
                canvas.draw_path(&shapes::hat(cx, top, accent_width, deco), pen, None);
            }
            Decoration::Tilde | Decoration::WideTilde => {
                canvas.draw_path(&shapes::tilde(cx, top, accent_width, deco), pen, None);
            }
            Decoration::Dot => {
                let r = deco / 5.0;
                canvas.draw_ellipse(cx, top + deco / 2.0, r, r, None, Some(env.color));
            }
            Decoration::DDot => {
                let r = deco / 5.0;
                let cy = top + deco / 2.0;
                canvas.draw_ellipse(cx - 2.0 * r, cy, r, r, None, Some(env.color));
                canvas.draw_ellipse(cx + 2.0 * r, cy, r, r, None, Some(env.color));
            }
            Decoration::Bar => {
                let ly = top + deco / 2.0;
                canvas.draw_line(cx - accent_width / 2.0, ly, cx + accent_width / 2.0, ly, pen);
            }
            Decoration::Overline => {
                let ly = top + deco / 2.0;
                canvas.draw_line(x, ly, x + width, ly, pen);
            }
            Decoration::DoubleOverline => {
                for ly in [top + deco / 4.0, top + 3.0 * deco / 4.0] {
                    canvas.draw_line(x, ly, x + width, ly, pen);
                }
            }
            Decoration::Underline => {
                let ly = y + child.descent() + deco / 2.0;
                canvas.draw_line(x, ly, x + width, ly, pen);
            }
            Decoration::DoubleUnderline => {
                let below = y + child.descent();
                for ly in [below + deco / 4.0, below + 3.0 * deco / 4.0] {
                    canvas.draw_line(x, ly, x + width, ly, pen);
                }
            }
        }
        end
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        self.child.to_html(output, env, default_env);
        output.push_str(self.decoration.combining_mark());
        false
    }
}
