use crate::ast::{FracMode, FracNode, Node};
use crate::canvas::Canvas;
use crate::environment::MathEnv;
use crate::metrics::BoxMetrics;
use crate::shapes;

use super::LayoutContext;

/// Measured parts of a fraction-like node, shared by `measure` and `draw`.
struct FracLayout {
    metrics: BoxMetrics,
    first_env: MathEnv,
    second_env: MathEnv,
    first: BoxMetrics,
    second: BoxMetrics,
    /// Vertical gap between the two parts, or the brace height for under/overbraces.
    gap: f64,
}

impl FracNode {
    fn child_envs(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> (MathEnv, MathEnv) {
        let p = ctx.params;
        match self.mode {
            FracMode::Frac | FracMode::DFrac => {
                let child = env.scaled(p.frac_factor);
                (child, child)
            }
            FracMode::TFrac => {
                let child = env.scaled(p.tfrac_factor);
                (child, child)
            }
            // The small line comes first.
            FracMode::Stackrel | FracMode::UnderSet | FracMode::OverSet => {
                (env.scaled(p.underset_factor), *env)
            }
            // The content comes first.
            FracMode::UnderBrace | FracMode::OverBrace => (*env, env.scaled(p.underbrace_factor)),
        }
    }

    fn layout(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> FracLayout {
        let (first_env, second_env) = self.child_envs(ctx, env);
        let first = self.first.measure(ctx, &first_env);
        let second = self.second.measure(ctx, &second_env);
        let xh = ctx.x_height(env);
        let strikeout = ctx.strikeout(env);
        let width = first.width.max(second.width);
        let (gap, metrics) = match self.mode {
            FracMode::Frac | FracMode::DFrac | FracMode::TFrac => {
                let gap = ctx.params.frac_gap_factor * xh;
                let h = first.overall_height.max(second.overall_height);
                let metrics = BoxMetrics::new(
                    width,
                    h + gap / 2.0 + ctx.params.frac_shift_factor * xh,
                    2.0 * h + gap,
                    strikeout,
                );
                (gap, metrics)
            }
            FracMode::Stackrel | FracMode::OverSet => {
                let gap = ctx.params.frac_gap_factor * xh / 2.0;
                let baseline = second.baseline_height + gap + first.overall_height;
                let metrics = BoxMetrics::new(
                    width,
                    baseline,
                    baseline + second.descent(),
                    strikeout,
                );
                (gap, metrics)
            }
            FracMode::UnderSet => {
                let gap = ctx.params.frac_gap_factor * xh / 2.0;
                let metrics = BoxMetrics::new(
                    width,
                    second.baseline_height,
                    second.overall_height + gap + first.overall_height,
                    strikeout,
                );
                (gap, metrics)
            }
            FracMode::UnderBrace => {
                let brace = ctx.params.underbrace_height_factor * xh;
                let metrics = BoxMetrics::new(
                    width,
                    first.baseline_height,
                    first.overall_height + brace + second.overall_height,
                    strikeout,
                );
                (brace, metrics)
            }
            FracMode::OverBrace => {
                let brace = ctx.params.underbrace_height_factor * xh;
                let baseline = first.baseline_height + brace + second.overall_height;
                let metrics = BoxMetrics::new(
                    width,
                    baseline,
                    baseline + first.descent(),
                    strikeout,
                );
                (brace, metrics)
            }
        };
        FracLayout {
            metrics,
            first_env,
            second_env,
            first,
            second,
            gap,
        }
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        self.layout(ctx, env).metrics
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
        let top = y - l.metrics.baseline_height;
        let width = l.metrics.width;
        let centered = |m: &BoxMetrics| x + (width - m.width) / 2.0;
        match self.mode {
            FracMode::Frac | FracMode::DFrac | FracMode::TFrac => {
                let h = l.first.overall_height.max(l.second.overall_height);
                let rule = top + h + l.gap / 2.0;
                self.first.draw(
                    ctx,
                    canvas,
                    centered(&l.first),
                    top + h - l.first.descent(),
                    &l.first_env,
                );
                canvas.draw_line(x, rule, x + width, rule, ctx.pen(env));
                self.second.draw(
                    ctx,
                    canvas,
                    centered(&l.second),
                    top + h + l.gap + l.second.baseline_height,
                    &l.second_env,
                );
            }
            FracMode::Stackrel | FracMode::OverSet => {
                self.first.draw(
                    ctx,
                    canvas,
                    centered(&l.first),
                    top + l.first.baseline_height,
                    &l.first_env,
                );
                self.second.draw(ctx, canvas, centered(&l.second), y, &l.second_env);
            }
            FracMode::UnderSet => {
                self.second.draw(ctx, canvas, centered(&l.second), y, &l.second_env);
                self.first.draw(
                    ctx,
                    canvas,
                    centered(&l.first),
                    y + l.second.descent() + l.gap + l.first.baseline_height,
                    &l.first_env,
                );
            }
            FracMode::UnderBrace => {
                self.first.draw(ctx, canvas, centered(&l.first), y, &l.first_env);
                let brace_top = y + l.first.descent();
                let brace = shapes::horizontal_brace(x, brace_top, width, l.gap, true);
                canvas.draw_path(&brace, ctx.pen(env), None);
                self.second.draw(
                    ctx,
                    canvas,
                    centered(&l.second),
                    brace_top + l.gap + l.second.baseline_height,
                    &l.second_env,
                );
            }
            FracMode::OverBrace => {
                self.second.draw(
                    ctx,
                    canvas,
                    centered(&l.second),
                    top + l.second.baseline_height,
                    &l.second_env,
                );
                let brace_top = top + l.second.overall_height;
                let brace = shapes::horizontal_brace(x, brace_top, width, l.gap, false);
                canvas.draw_path(&brace, ctx.pen(env), None);
                self.first.draw(ctx, canvas, centered(&l.first), y, &l.first_env);
            }
        }
        x + width
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        match self.mode {
            FracMode::TFrac => {
                output.push_str("<sup>");
                let num = self.first.to_html(output, env, default_env);
                output.push_str("</sup>&frasl;<sub>");
                let den = self.second.to_html(output, env, default_env);
                output.push_str("</sub>");
                num && den
            }
            FracMode::Frac | FracMode::DFrac => {
                output.push('(');
                self.first.to_html(output, env, default_env);
                output.push_str(")/(");
                self.second.to_html(output, env, default_env);
                output.push(')');
                false
            }
            FracMode::Stackrel | FracMode::OverSet | FracMode::UnderSet => {
                let tag = if self.mode == FracMode::UnderSet { "sub" } else { "sup" };
                self.second.to_html(output, env, default_env);
                push_label(output, tag, &self.first, env, default_env);
                false
            }
            FracMode::UnderBrace | FracMode::OverBrace => {
                let tag = if self.mode == FracMode::UnderBrace { "sub" } else { "sup" };
                self.first.to_html(output, env, default_env);
                push_label(output, tag, &self.second, env, default_env);
                false
            }
        }
    }
}

/// Approximates a label above or below its base by a script.
fn push_label(output: &mut String, tag: &str, label: &Node, env: &MathEnv, default_env: &MathEnv) {
    output.push('<');
    output.push_str(tag);
    output.push('>');
    label.to_html(output, env, default_env);
    output.push_str("</");
    output.push_str(tag);
    output.push('>');
}
