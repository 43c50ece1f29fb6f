use crate::ast::SqrtNode;
use crate::canvas::{Canvas, Path, Point};
use crate::environment::{MathEnv, StyleFlags};
use crate::html::escape_html_content;
use crate::metrics::BoxMetrics;

use super::LayoutContext;

struct SqrtLayout {
    metrics: BoxMetrics,
    child: BoxMetrics,
    /// Width of the radical sign.
    sign: f64,
    overhang: f64,
    /// Room left of the radical sign for the degree.
    extra_left: f64,
    /// Room above the radical sign for the degree.
    extra_top: f64,
    degree: Option<(MathEnv, BoxMetrics)>,
}

impl SqrtNode {
    /// The degree, unless it is the implicit square root.
    fn visible_degree(&self) -> Option<&str> {
        let degree = self.degree.trim();
        (!degree.is_empty() && degree != "2").then_some(degree)
    }

    fn layout(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> SqrtLayout {
        let p = ctx.params;
        let child = self.child.measure(ctx, env);
        let sign = ctx.width_of(env, "A") * p.sqrt_width_factor;
        let overhang = p.sqrt_overhang_factor * ctx.width_of(env, "x");
        let sign_height = child.overall_height * p.sqrt_height_factor;
        let degree = self.visible_degree().map(|text| {
            let denv = env
                .scaled(p.sqrt_degree_factor)
                .without_flags(StyleFlags::ITALIC)
                .with_flags(StyleFlags::UPRIGHT);
            let m = ctx.measure_in(&denv, text);
            let ink = m.bounding_box;
            (denv, BoxMetrics::new(m.width, -ink.y, ink.height, 0.0))
        });
        let (extra_left, extra_top) = match &degree {
            Some((_, d)) => {
                // The degree sits on the upper left branch of the sign.
                let branch_top = 0.45 * sign_height;
                (
                    (d.width - 0.5 * sign).max(0.0),
                    (d.overall_height - branch_top).max(0.0),
                )
            }
            None => (0.0, 0.0),
        };
        let baseline = child.baseline_height + (sign_height - child.overall_height) + extra_top;
        let metrics = BoxMetrics::new(
            extra_left + sign + child.width + overhang,
            baseline,
            baseline + child.descent(),
            ctx.strikeout(env),
        );
        SqrtLayout {
            metrics,
            child,
            sign,
            overhang,
            extra_left,
            extra_top,
            degree,
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
        let top = y - l.metrics.baseline_height + l.extra_top;
        let bottom = y + l.child.descent();
        let height = bottom - top;
        let x0 = x + l.extra_left;
        let end = x0 + l.sign + l.child.width + l.overhang;
        let points = [
            Point::new(x0, top + 0.55 * height),
            Point::new(x0 + 0.25 * l.sign, top + 0.5 * height),
            Point::new(x0 + 0.5 * l.sign, bottom),
            Point::new(x0 + l.sign, top),
            Point::new(end, top),
        ];
        canvas.draw_path(&Path::polyline(&points), ctx.pen(env), None);
        if let (Some((denv, d)), Some(text)) = (&l.degree, self.visible_degree()) {
            let branch = top + 0.45 * height;
            let font = denv.font(ctx.fonts);
            canvas.draw_text(
                x0 + 0.5 * l.sign - d.width,
                branch - d.descent(),
                text,
                &font,
                env.color,
            );
        }
        self.child.draw(ctx, canvas, x0 + l.sign, y, env);
        end
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        if let Some(degree) = self.visible_degree() {
            output.push_str("<sup>");
            escape_html_content(output, degree);
            output.push_str("</sup>");
        }
        output.push_str("&radic;<span style=\"text-decoration: overline\">");
        self.child.to_html(output, env, default_env);
        output.push_str("</span>");
        false
    }
}
