use crate::ast::{ColumnAlign, MatrixNode};
use crate::canvas::Canvas;
use crate::environment::MathEnv;
use crate::metrics::BoxMetrics;

use super::LayoutContext;

struct Grid {
    cells: Vec<Vec<BoxMetrics>>,
    col_widths: Vec<f64>,
    /// Per row: the largest ascent and the largest descent.
    row_heights: Vec<(f64, f64)>,
    gutter: f64,
}

impl Grid {
    fn width(&self) -> f64 {
        self.col_widths.iter().map(|w| w + self.gutter).sum()
    }

    fn height(&self) -> f64 {
        self.row_heights
            .iter()
            .map(|(ascent, descent)| ascent + descent + self.gutter)
            .sum()
    }
}

impl MatrixNode {
    fn column_align(&self, col: usize) -> ColumnAlign {
        self.columns.get(col).copied().unwrap_or(self.default_align)
    }

    fn grid(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> Grid {
        let ncols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut col_widths = vec![0.0f64; ncols];
        let mut row_heights = Vec::with_capacity(self.rows.len());
        let mut cells = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let metrics: Vec<BoxMetrics> = row.iter().map(|cell| cell.measure(ctx, env)).collect();
            let mut ascent = 0.0f64;
            let mut descent = 0.0f64;
            for (col, m) in metrics.iter().enumerate() {
                col_widths[col] = col_widths[col].max(m.width);
                ascent = ascent.max(m.baseline_height);
                descent = descent.max(m.descent());
            }
            row_heights.push((ascent, descent));
            cells.push(metrics);
        }
        Grid {
            cells,
            col_widths,
            row_heights,
            gutter: ctx.params.matrix_gutter_factor * ctx.width_of(env, "x"),
        }
    }

    pub(crate) fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        if self.rows.is_empty() {
            return ctx.empty_box(env);
        }
        let grid = self.grid(ctx, env);
        let overall = grid.height();
        BoxMetrics::new(
            grid.width(),
            overall / 2.0 + ctx.params.frac_shift_factor * ctx.x_height(env),
            overall,
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
        if self.rows.is_empty() {
            return x;
        }
        let grid = self.grid(ctx, env);
        let m = self.measure(ctx, env);
        let mut row_top = y - m.baseline_height + grid.gutter / 2.0;
        for ((row, metrics), (ascent, descent)) in
            self.rows.iter().zip(&grid.cells).zip(&grid.row_heights)
        {
            let baseline = row_top + ascent;
            let mut cell_left = x + grid.gutter / 2.0;
            for (col, (cell, cm)) in row.iter().zip(metrics).enumerate() {
                let col_width = grid.col_widths[col];
                let offset = match self.column_align(col) {
                    ColumnAlign::Left => 0.0,
                    ColumnAlign::Center => (col_width - cm.width) / 2.0,
                    ColumnAlign::Right => col_width - cm.width,
                };
                cell.draw(ctx, canvas, cell_left + offset, baseline, env);
                cell_left += col_width + grid.gutter;
            }
            row_top += ascent + descent + grid.gutter;
        }
        x + m.width
    }

    pub(crate) fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        output.push_str("<table>");
        for row in &self.rows {
            output.push_str("<tr>");
            for cell in row {
                output.push_str("<td>");
                cell.to_html(output, env, default_env);
                output.push_str("</td>");
            }
            output.push_str("</tr>");
        }
        output.push_str("</table>");
        false
    }
}
