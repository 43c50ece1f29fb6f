use crate::ast::ScriptNode;
use crate::canvas::Canvas;
use crate::environment::MathEnv;
use crate::metrics::BoxMetrics;

use super::LayoutContext;

impl ScriptNode {
    /// The environment scripts are set in.
    #[inline]
    pub(crate) fn script_env(ctx: &LayoutContext<'_>, env: &MathEnv) -> MathEnv {
        env.scaled(ctx.params.subsuper_size_factor)
    }

    /// How far the baseline of a superscript sits above the baseline of `base`.
    pub(crate) fn raise(ctx: &LayoutContext<'_>, env: &MathEnv, base: &BoxMetrics) -> f64 {
        let xh = ctx.x_height(env);
        let shift = ctx.params.super_shift_factor;
        (shift * xh).max(base.baseline_height - (1.0 - shift) * xh)
    }

    /// How far the baseline of a subscript sits below the baseline of `base`.
    pub(crate) fn lower(ctx: &LayoutContext<'_>, env: &MathEnv, base: &BoxMetrics) -> f64 {
        let xh = ctx.x_height(env);
        (ctx.params.sub_shift_factor * xh).max(base.descent())
    }

    /// A subscript with nothing in front of it.
    pub(crate) fn measure_sub(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let child = self.child.measure(ctx, &Self::script_env(ctx, env));
        let lower = Self::lower(ctx, env, &BoxMetrics::default());
        let baseline = (child.baseline_height - lower).max(0.0);
        BoxMetrics::new(
            child.width,
            baseline,
            baseline + lower + child.descent(),
            ctx.strikeout(env),
        )
    }

    /// A superscript with nothing in front of it.
    pub(crate) fn measure_super(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let child = self.child.measure(ctx, &Self::script_env(ctx, env));
        let raise = Self::raise(ctx, env, &BoxMetrics::default());
        let baseline = raise + child.baseline_height;
        BoxMetrics::new(
            child.width,
            baseline,
            baseline + (child.descent() - raise).max(0.0),
            ctx.strikeout(env),
        )
    }

    pub(crate) fn draw_sub(
        &self,
        ctx: &LayoutContext<'_>,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        env: &MathEnv,
    ) -> f64 {
        let lower = Self::lower(ctx, env, &BoxMetrics::default());
        self.child
            .draw(ctx, canvas, x, y + lower, &Self::script_env(ctx, env))
    }

    pub(crate) fn draw_super(
        &self,
        ctx: &LayoutContext<'_>,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        env: &MathEnv,
    ) -> f64 {
        let raise = Self::raise(ctx, env, &BoxMetrics::default());
        self.child
            .draw(ctx, canvas, x, y - raise, &Self::script_env(ctx, env))
    }

    pub(crate) fn to_html(
        &self,
        output: &mut String,
        tag: &str,
        env: &MathEnv,
        default_env: &MathEnv,
    ) -> bool {
        output.push('<');
        output.push_str(tag);
        output.push('>');
        let ok = self.child.to_html(output, env, default_env);
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
        ok
    }
}
