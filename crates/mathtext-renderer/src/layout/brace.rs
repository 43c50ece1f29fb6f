use crate::ast::{BraceKind, BraceNode};
use crate::canvas::Canvas;
use crate::environment::MathEnv;
use crate::metrics::BoxMetrics;
use crate::shapes;

use super::LayoutContext;

impl BraceKind {
    /// Character used for this delimiter in HTML output.
    fn html(self, opening: bool) -> &'static str {
        match (self, opening) {
            (BraceKind::Paren, true) => "(",
            (BraceKind::Paren, false) => ")",
            (BraceKind::Bracket, true) => "[",
            (BraceKind::Bracket, false) => "]",
            (BraceKind::Curly, true) => "{",
            (BraceKind::Curly, false) => "}",
            (BraceKind::Angle, true) => "&lang;",
            (BraceKind::Angle, false) => "&rang;",
            (BraceKind::Bar, _) => "|",
            (BraceKind::DoubleBar, _) => "&#8214;",
            (BraceKind::Floor, true) => "&lfloor;",
            (BraceKind::Floor, false) => "&rfloor;",
            (BraceKind::Ceil, true) => "&lceil;",
            (BraceKind::Ceil, false) => "&rceil;",
            (BraceKind::None, _) => "",
        }
    }
}

struct BraceLayout {
    child: BoxMetrics,
    height: f64,
    left: f64,
    right: f64,
}

impl BraceNode {
    fn layout(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BraceLayout {
        let p = ctx.params;
        let x = ctx.measure_in(env, "x");
        let child = self.child.measure(ctx, env);
        // Short or empty content still gets delimiters as tall as the ink of an `x`.
        let ink = x.bounding_box;
        let ascent = child.baseline_height.max(-ink.y);
        let child = BoxMetrics {
            baseline_height: ascent,
            overall_height: ascent + child.descent().max(ink.height + ink.y),
            ..child
        };
        let height = (child.overall_height * p.brace_factor).max(child.overall_height);
        let reference = x.ascent + x.descent;
        let grow = if reference > 0.0 {
            (height / reference).max(1.0).powf(p.brace_width_exponent)
        } else {
            1.0
        };
        let side = |kind: BraceKind| match kind {
            BraceKind::None => 0.0,
            BraceKind::Curly => {
                (x.width * p.brace_shrink_factor * grow).min(p.curly_brace_width_limit * x.width)
            }
            _ => x.width * p.brace_shrink_factor * grow,
        };
        BraceLayout {
            child,
            height,
            left: side(self.left),
            right: side(self.right),
        }
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let l = self.layout(ctx, env);
        let baseline = l.child.baseline_height + (l.height - l.child.overall_height) / 2.0;
        BoxMetrics::new(
            l.left + l.child.width + l.right,
            baseline,
            l.height,
            ctx.strikeout(env),
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
        let l = self.layout(ctx, env);
        let baseline = l.child.baseline_height + (l.height - l.child.overall_height) / 2.0;
        let top = y - baseline;
        let pen = ctx.pen(env);
        if let Some(path) = shapes::delimiter(self.left, x, top, l.left, l.height, true) {
            canvas.draw_path(&path, pen, None);
        }
        let after = self.child.draw(ctx, canvas, x + l.left, y, env);
        if let Some(path) = shapes::delimiter(self.right, after, top, l.right, l.height, false) {
            canvas.draw_path(&path, pen, None);
        }
        after + l.right
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        output.push_str(self.left.html(true));
        self.child.to_html(output, env, default_env);
        output.push_str(self.right.html(false));
        false
    }
}
