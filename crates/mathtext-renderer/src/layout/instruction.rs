use crate::ast::{InstructionKind, InstructionNode};
use crate::canvas::Canvas;
use crate::environment::{FontRole, MathEnv, StyleFlags};
use crate::metrics::{BoxMetrics, Rect};

use super::LayoutContext;

impl InstructionKind {
    /// The environment for the argument of this instruction.
    pub fn apply(self, env: &MathEnv) -> MathEnv {
        match self {
            InstructionKind::Bold => env.with_flags(StyleFlags::BOLD),
            InstructionKind::MathBold => env.with_flags(StyleFlags::BOLD | StyleFlags::UPRIGHT),
            InstructionKind::Italic => env.with_flags(StyleFlags::ITALIC),
            InstructionKind::Emph => env.toggled(StyleFlags::ITALIC),
            InstructionKind::Upright => env
                .with_role(FontRole::Roman)
                .without_flags(StyleFlags::ITALIC)
                .with_flags(StyleFlags::UPRIGHT),
            InstructionKind::Text => env.with_math(false).with_flags(StyleFlags::UPRIGHT),
            InstructionKind::Sans => styled(env, FontRole::Sans),
            InstructionKind::Typewriter => styled(env, FontRole::Typewriter),
            InstructionKind::Caligraphic => styled(env, FontRole::Caligraphic),
            InstructionKind::Script => styled(env, FontRole::Script),
            InstructionKind::Blackboard => styled(env, FontRole::Blackboard),
            InstructionKind::Fraktur => styled(env, FontRole::Fraktur),
            InstructionKind::SmallCaps => env.with_flags(StyleFlags::SMALL_CAPS),
            InstructionKind::Underline => env.with_flags(StyleFlags::UNDERLINE),
            InstructionKind::Overline => env.with_flags(StyleFlags::OVERLINE),
            InstructionKind::Strike => env.with_flags(StyleFlags::STRIKE),
            InstructionKind::Color(color) => env.with_color(color),
            InstructionKind::ColorBox(_) | InstructionKind::Boxed => *env,
            InstructionKind::Equation => env.with_math(true),
            InstructionKind::Verbatim => env
                .with_role(FontRole::Typewriter)
                .with_math(false)
                .without_flags(StyleFlags::ITALIC)
                .with_flags(StyleFlags::UPRIGHT),
        }
    }

    #[inline]
    fn is_framed(self) -> bool {
        matches!(self, InstructionKind::Boxed | InstructionKind::ColorBox(_))
    }
}

fn styled(env: &MathEnv, role: FontRole) -> MathEnv {
    env.with_role(role).with_flags(StyleFlags::UPRIGHT)
}

impl InstructionNode {
    fn padding(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> f64 {
        if self.kind.is_framed() {
            ctx.params.boxed_padding_factor * env.size
        } else {
            0.0
        }
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let inner = self.child.measure(ctx, &self.kind.apply(env));
        let pad = self.padding(ctx, env);
        BoxMetrics::new(
            inner.width + 2.0 * pad,
            inner.baseline_height + pad,
            inner.overall_height + 2.0 * pad,
            inner.strikeout_pos,
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
        let child_env = self.kind.apply(env);
        if !self.kind.is_framed() {
            return self.child.draw(ctx, canvas, x, y, &child_env);
        }
        let m = self.measure(ctx, env);
        let frame = Rect::new(x, y - m.baseline_height, m.width, m.overall_height);
        let pad = self.padding(ctx, env);
        match self.kind {
            InstructionKind::ColorBox(color) => {
                canvas.draw_rect(frame, None, Some(color));
                self.child.draw(ctx, canvas, x + pad, y, &child_env);
            }
            _ => {
                self.child.draw(ctx, canvas, x + pad, y, &child_env);
                canvas.draw_rect(frame, Some(ctx.pen(env)), None);
            }
        }
        x + m.width
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        let child_env = self.kind.apply(env);
        let (open, close): (String, &str) = match self.kind {
            InstructionKind::Bold | InstructionKind::MathBold => ("<b>".into(), "</b>"),
            InstructionKind::Italic => ("<i>".into(), "</i>"),
            InstructionKind::Emph => ("<em>".into(), "</em>"),
            InstructionKind::Underline => ("<u>".into(), "</u>"),
            InstructionKind::Strike => ("<s>".into(), "</s>"),
            InstructionKind::Verbatim => ("<code>".into(), "</code>"),
            InstructionKind::Overline => span("text-decoration: overline"),
            InstructionKind::SmallCaps => span("font-variant: small-caps"),
            InstructionKind::Upright => span("font-style: normal"),
            InstructionKind::Sans => span("font-family: sans-serif"),
            InstructionKind::Typewriter => span("font-family: monospace"),
            InstructionKind::Caligraphic | InstructionKind::Script => span("font-family: cursive"),
            InstructionKind::Fraktur => span("font-family: fantasy"),
            InstructionKind::Blackboard | InstructionKind::Text | InstructionKind::Equation => {
                (String::new(), "")
            }
            InstructionKind::Color(color) if color == default_env.color => (String::new(), ""),
            InstructionKind::Color(color) => span(&format!("color: {color}")),
            InstructionKind::ColorBox(color) => span(&format!("background-color: {color}")),
            InstructionKind::Boxed => span("border: 1px solid"),
        };
        output.push_str(&open);
        let ok = self.child.to_html(output, &child_env, default_env);
        output.push_str(close);
        ok
    }
}

fn span(style: &str) -> (String, &'static str) {
    (format!("<span style=\"{style}\">"), "</span>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RGB;

    #[test]
    fn text_leaves_math_mode() {
        let env = MathEnv::new(10.0, RGB::BLACK, true);
        let text = InstructionKind::Text.apply(&env);
        assert!(!text.inside_math);
        assert!(InstructionKind::Equation.apply(&text).inside_math);
    }

    #[test]
    fn emph_toggles() {
        let env = MathEnv::default();
        let once = InstructionKind::Emph.apply(&env);
        assert!(once.has(StyleFlags::ITALIC));
        assert!(!InstructionKind::Emph.apply(&once).has(StyleFlags::ITALIC));
    }

    #[test]
    fn upright_resets_role() {
        let env = InstructionKind::Sans.apply(&MathEnv::default().with_flags(StyleFlags::ITALIC));
        let env = InstructionKind::Upright.apply(&env);
        assert_eq!(env.role, FontRole::Roman);
        assert!(!env.has(StyleFlags::ITALIC));
        assert!(env.has(StyleFlags::UPRIGHT));
    }
}
