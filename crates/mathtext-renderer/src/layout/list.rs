use crate::ast::{ListNode, Node, ScriptNode};
use crate::canvas::Canvas;
use crate::environment::MathEnv;
use crate::metrics::BoxMetrics;

use super::LayoutContext;

/// Where one child of a list ends up.
struct Placement<'n> {
    node: &'n Node,
    env: MathEnv,
    dx: f64,
    /// Downwards offset of the child's baseline.
    dy: f64,
    metrics: BoxMetrics,
}

/// Sub- and superscript attached to the same base.
#[derive(Default)]
struct Scripts<'n> {
    sub: Option<&'n ScriptNode>,
    sup: Option<&'n ScriptNode>,
    consumed: usize,
}

/// Collects the scripts starting at `nodes[start]`, at most one of each kind.
fn take_scripts(nodes: &[Node], start: usize) -> Scripts<'_> {
    let mut scripts = Scripts::default();
    for node in &nodes[start..] {
        match node {
            Node::Subscript(s) if scripts.sub.is_none() => scripts.sub = Some(s),
            Node::Superscript(s) if scripts.sup.is_none() => scripts.sup = Some(s),
            _ => break,
        }
        scripts.consumed += 1;
    }
    scripts
}

/// The node in front of a script.
struct Base {
    metrics: BoxMetrics,
    italic: bool,
}

impl ListNode {
    fn arrange<'n>(&'n self, ctx: &LayoutContext<'_>, env: &MathEnv) -> (Vec<Placement<'n>>, f64) {
        let mut placements = Vec::with_capacity(self.nodes.len());
        let mut dx = 0.0;
        let mut prev: Option<Base> = None;
        let mut idx = 0;
        while idx < self.nodes.len() {
            let node = &self.nodes[idx];
            idx += 1;
            match node {
                Node::Symbol(symbol)
                    if env.inside_math
                        && symbol.has_limits(ctx)
                        && take_scripts(&self.nodes, idx).consumed > 0 =>
                {
                    let scripts = take_scripts(&self.nodes, idx);
                    idx += scripts.consumed;
                    dx += Self::place_limits(ctx, env, node, &scripts, dx, &mut placements);
                    prev = None;
                }
                Node::Subscript(_) | Node::Superscript(_) => {
                    let scripts = take_scripts(&self.nodes, idx - 1);
                    idx += scripts.consumed - 1;
                    dx += Self::place_scripts(ctx, env, prev.take(), &scripts, dx, &mut placements);
                }
                Node::Whitespace(_) => {
                    let metrics = node.measure(ctx, env);
                    placements.push(Placement {
                        node,
                        env: *env,
                        dx,
                        dy: 0.0,
                        metrics,
                    });
                    dx += metrics.width;
                    prev = None;
                }
                _ => {
                    let metrics = node.measure(ctx, env);
                    placements.push(Placement {
                        node,
                        env: *env,
                        dx,
                        dy: 0.0,
                        metrics,
                    });
                    dx += metrics.width;
                    prev = Some(Base {
                        metrics,
                        italic: node.is_italic(ctx, env),
                    });
                }
            }
        }
        (placements, dx)
    }

    /// Sets scripts to the right of the previous node. Returns the width used.
    fn place_scripts<'n>(
        ctx: &LayoutContext<'_>,
        env: &MathEnv,
        base: Option<Base>,
        scripts: &Scripts<'n>,
        dx: f64,
        placements: &mut Vec<Placement<'n>>,
    ) -> f64 {
        let senv = ScriptNode::script_env(ctx, env);
        let (base_metrics, italic) = match base {
            Some(base) => (base.metrics, base.italic),
            None => (BoxMetrics::default(), false),
        };
        let mut width = 0.0f64;
        if let Some(sup) = scripts.sup {
            let nudge = if italic {
                ctx.params.italic_correction_factor * ctx.width_of(env, " ")
            } else {
                0.0
            };
            let metrics = sup.child.measure(ctx, &senv);
            placements.push(Placement {
                node: &sup.child,
                env: senv,
                dx: dx + nudge,
                dy: -ScriptNode::raise(ctx, env, &base_metrics),
                metrics,
            });
            width = width.max(metrics.width + nudge);
        }
        if let Some(sub) = scripts.sub {
            let metrics = sub.child.measure(ctx, &senv);
            placements.push(Placement {
                node: &sub.child,
                env: senv,
                dx,
                dy: ScriptNode::lower(ctx, env, &base_metrics),
                metrics,
            });
            width = width.max(metrics.width);
        }
        width
    }

    /// Sets scripts centered above and below an operator like `\sum`. Returns the width used.
    fn place_limits<'n>(
        ctx: &LayoutContext<'_>,
        env: &MathEnv,
        op: &'n Node,
        scripts: &Scripts<'n>,
        dx: f64,
        placements: &mut Vec<Placement<'n>>,
    ) -> f64 {
        let lenv = env.scaled(ctx.params.operatorsubsuper_size_factor);
        let dist = ctx.params.operatorsubsuper_distance_factor * ctx.x_height(env);
        let op_metrics = op.measure(ctx, env);
        let sup = scripts.sup.map(|s| (&*s.child, s.child.measure(ctx, &lenv)));
        let sub = scripts.sub.map(|s| (&*s.child, s.child.measure(ctx, &lenv)));
        let width = [&sup, &sub]
            .into_iter()
            .flatten()
            .fold(op_metrics.width, |w, (_, m)| w.max(m.width));
        placements.push(Placement {
            node: op,
            env: *env,
            dx: dx + (width - op_metrics.width) / 2.0,
            dy: 0.0,
            metrics: op_metrics,
        });
        if let Some((node, metrics)) = sup {
            placements.push(Placement {
                node,
                env: lenv,
                dx: dx + (width - metrics.width) / 2.0,
                dy: -(op_metrics.baseline_height + dist + metrics.descent()),
                metrics,
            });
        }
        if let Some((node, metrics)) = sub {
            placements.push(Placement {
                node,
                env: lenv,
                dx: dx + (width - metrics.width) / 2.0,
                dy: op_metrics.descent() + dist + metrics.baseline_height,
                metrics,
            });
        }
        width
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        let (placements, width) = self.arrange(ctx, env);
        let mut ascent = 0.0f64;
        let mut descent = 0.0f64;
        for p in &placements {
            ascent = ascent.max(p.metrics.baseline_height - p.dy);
            descent = descent.max(p.metrics.descent() + p.dy);
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
        let (placements, width) = self.arrange(ctx, env);
        for p in &placements {
            p.node.draw(ctx, canvas, x + p.dx, y + p.dy, &p.env);
        }
        x + width
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        let mut ok = true;
        for node in &self.nodes {
            ok &= node.to_html(output, env, default_env);
        }
        ok
    }
}
