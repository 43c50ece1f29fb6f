use mathtext::renderer::ast::{BraceKind, Node};
use mathtext::renderer::canvas::{PathElement, Point, RecordingCanvas};
use mathtext::renderer::environment::MathEnv;
use mathtext::renderer::font::ApproxMetrics;
use mathtext::renderer::layout::LayoutContext;
use mathtext::renderer::metrics::BoxMetrics;
use mathtext::{MathText, MathTextConfig};

const EPS: f64 = 1e-9;

fn parse_math(source: &str) -> MathText {
    let mut formula = MathText::new(MathTextConfig {
        initial_math_mode: true,
        ..Default::default()
    });
    formula.parse(source);
    formula
}

/// The only node of the root list.
fn single(formula: &MathText) -> &Node {
    match formula.root() {
        Node::List(list) if list.nodes.len() == 1 => &list.nodes[0],
        other => panic!("expected a single node, got {other:?}"),
    }
}

fn root_env(formula: &MathText) -> MathEnv {
    let config = formula.config();
    MathEnv::new(config.font_size, config.font_color, config.initial_math_mode)
}

/// Measure a node of `formula` the way the formula itself would.
fn measure_node(formula: &MathText, node: &Node) -> BoxMetrics {
    measure_in(formula, node, &root_env(formula))
}

fn measure_in(formula: &MathText, node: &Node, env: &MathEnv) -> BoxMetrics {
    let metrics = ApproxMetrics::default();
    let config = formula.config();
    let ctx = LayoutContext::new(&metrics, &config.params, &config.fonts, config.encoding);
    node.measure(&ctx, env)
}

/// Draws `formula` with its top-left corner at the origin.
fn draw_at_origin(formula: &MathText) -> (RecordingCanvas, BoxMetrics) {
    let metrics = ApproxMetrics::default();
    let size = formula.measure(&metrics);
    let mut canvas = RecordingCanvas::new();
    formula.draw(&mut canvas, &metrics, 0.0, size.baseline_height);
    (canvas, size)
}

/// Pen position of the first text run equal to `text`.
fn text_pos(canvas: &RecordingCanvas, text: &str) -> (f64, f64) {
    canvas
        .texts()
        .find(|(t, _, _)| *t == text)
        .map(|(_, x, y)| (x, y))
        .unwrap_or_else(|| panic!("{text:?} was not drawn"))
}

fn path_points(canvas: &RecordingCanvas) -> Vec<Point> {
    canvas
        .paths()
        .flat_map(|path| path.elements())
        .flat_map(|element| match *element {
            PathElement::MoveTo(p) | PathElement::LineTo(p) => vec![p],
            PathElement::CubicTo(c1, c2, end) => vec![c1, c2, end],
            PathElement::Close => vec![],
        })
        .collect()
}

#[test]
fn braces_cover_their_content() {
    let pairs = [
        r"\left( \frac{a}{b} \right)",
        r"\left[ x^2 \right]",
        r"\left\{ \sum_{i=0}^n i \right\}",
        r"\left< y \right>",
        r"\left| z \right|",
        r"\left\| z \right\|",
        r"\left\lfloor \frac{1}{2} \right\rfloor",
        r"\left\lceil w \right\rceil",
        r"\left. \frac{a}{b} \right|",
    ];
    for source in pairs {
        let formula = parse_math(source);
        assert!(formula.errors().is_empty(), "{source}: {:?}", formula.error_list());
        let Node::Brace(brace) = single(&formula) else {
            panic!("{source} did not produce a brace");
        };
        let outer = measure_node(&formula, single(&formula));
        let inner = measure_node(&formula, &brace.child);
        assert!(
            outer.overall_height >= inner.overall_height,
            "{source}: {outer:?} vs {inner:?}"
        );
    }
}

#[test]
fn measuring_is_repeatable() {
    let formula = parse_math(r"\sqrt[3]{\frac{x^2_i}{\vec{v}}} + \begin{cases} a & b \end{cases}");
    let metrics = ApproxMetrics::default();
    let first = formula.measure(&metrics);
    let second = formula.measure(&metrics);
    assert_eq!(first.width.to_bits(), second.width.to_bits());
    assert_eq!(first.baseline_height.to_bits(), second.baseline_height.to_bits());
    assert_eq!(first.overall_height.to_bits(), second.overall_height.to_bits());
    assert_eq!(first.strikeout_pos.to_bits(), second.strikeout_pos.to_bits());
}

#[test]
fn plain_text_is_one_span() {
    let mut formula = MathText::new(MathTextConfig::default());
    assert!(formula.parse("Hello world"));
    let (html, faithful) = formula.to_html();
    assert!(faithful);
    assert_eq!(
        html,
        r#"<span class="mathtext" style="font-size:10px;color:#000000">Hello world</span>"#
    );
}

#[test]
fn script_order_does_not_matter() {
    let metrics = ApproxMetrics::default();
    let sub_first = parse_math("x_{1}^{2}").measure(&metrics);
    let sup_first = parse_math("x^{2}_{1}").measure(&metrics);
    assert!((sub_first.width - sup_first.width).abs() < EPS);
    assert!((sub_first.overall_height - sup_first.overall_height).abs() < EPS);
}

#[test]
fn unknown_command_still_measures() {
    let formula = parse_math(r"\notarealcommand{a}");
    assert!(!formula.errors().is_empty());
    let size = formula.measure(&ApproxMetrics::default());
    assert!(size.width > 0.0);
    assert!(size.overall_height >= size.baseline_height);
}

#[test]
fn fraction_geometry() {
    let formula = parse_math(r"\frac{a}{b}");
    let Node::Frac(frac) = single(&formula) else {
        panic!("expected a fraction");
    };
    let params = &formula.config().params;
    let first = measure_node(&formula, &frac.first);
    let second = measure_node(&formula, &frac.second);
    let h = first.overall_height.max(second.overall_height);
    let xh = ApproxMetrics::X_HEIGHT * formula.config().font_size;
    let gap = params.frac_gap_factor * xh;
    let shift = params.frac_shift_factor * xh;

    let size = measure_node(&formula, single(&formula));
    assert!((size.overall_height - (2.0 * h + gap)).abs() < EPS);
    assert!((size.baseline_height - (h + gap / 2.0 + shift)).abs() < EPS);

    let mut canvas = RecordingCanvas::new();
    formula.draw(&mut canvas, &ApproxMetrics::default(), 0.0, size.baseline_height);
    assert_eq!(canvas.texts().count(), 2);
    assert_eq!(canvas.lines().count(), 1);
}

#[test]
fn sqrt_advance_exceeds_content() {
    let formula = parse_math(r"\sqrt{x}");
    let Node::Sqrt(sqrt) = single(&formula) else {
        panic!("expected a root");
    };
    let metrics = ApproxMetrics::default();
    let child = measure_node(&formula, &sqrt.child);
    let size = formula.config().font_size;
    let root_glyph = ApproxMetrics::advance('A') * size * formula.config().params.sqrt_width_factor;
    let mut canvas = RecordingCanvas::new();
    let end = formula.draw(&mut canvas, &metrics, 0.0, 20.0);
    assert!(end > child.width + root_glyph);
}

#[test]
fn pmatrix_layout() {
    let formula = parse_math(r"\begin{pmatrix}1&2\\3&4\end{pmatrix}");
    assert!(formula.errors().is_empty());
    let Node::Brace(brace) = single(&formula) else {
        panic!("expected a brace");
    };
    assert_eq!((brace.left, brace.right), (BraceKind::Paren, BraceKind::Paren));
    let Node::Matrix(matrix) = brace.child.as_ref() else {
        panic!("expected a matrix");
    };
    assert_eq!(matrix.rows.len(), 2);
    assert!(matrix.rows.iter().all(|row| row.len() == 2));

    let size = formula.config().font_size;
    let gutter = formula.config().params.matrix_gutter_factor * ApproxMetrics::advance('x') * size;
    let col_width = |col: usize| {
        matrix
            .rows
            .iter()
            .map(|row| measure_node(&formula, &row[col]).width)
            .fold(0.0f64, f64::max)
    };
    let grid = measure_node(&formula, &brace.child);
    assert!((grid.width - (col_width(0) + col_width(1) + 2.0 * gutter)).abs() < EPS);

    let params = &formula.config().params;
    let x_width = ApproxMetrics::advance('x') * size;
    let line_height = (ApproxMetrics::ASCENT + ApproxMetrics::DESCENT) * size;
    let height = (grid.overall_height * params.brace_factor).max(grid.overall_height);
    let brace_width = x_width
        * params.brace_shrink_factor
        * (height / line_height).max(1.0).powf(params.brace_width_exponent);

    let outer = measure_node(&formula, single(&formula));
    assert!(
        (outer.width - (col_width(0) + col_width(1) + 2.0 * gutter + 2.0 * brace_width)).abs()
            < EPS
    );
}

#[test]
fn svg_output_contains_text() {
    let formula = parse_math(r"a + \alpha");
    let metrics = ApproxMetrics::default();
    let size = formula.measure(&metrics);
    let mut canvas = mathtext::renderer::svg::SvgCanvas::new();
    formula.draw(&mut canvas, &metrics, 0.0, size.baseline_height);
    let svg = canvas.finish(size.width, size.overall_height, None);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("α"));
}

#[test]
fn limits_stack_above_and_below() {
    let formula = parse_math(r"\sum_{i}^{n}");
    let Node::List(list) = formula.root() else {
        panic!("expected a list");
    };
    let [op, Node::Subscript(sub), Node::Superscript(sup)] = list.nodes.as_slice() else {
        panic!("expected an operator with two scripts, got {:?}", list.nodes);
    };
    let config = formula.config();
    let env = root_env(&formula);
    let lenv = env.scaled(config.params.operatorsubsuper_size_factor);
    let dist = config.params.operatorsubsuper_distance_factor * ApproxMetrics::X_HEIGHT * config.font_size;
    let op_size = measure_in(&formula, op, &env);
    let sub_size = measure_in(&formula, &sub.child, &lenv);
    let sup_size = measure_in(&formula, &sup.child, &lenv);

    let (canvas, size) = draw_at_origin(&formula);
    let width = op_size.width.max(sub_size.width).max(sup_size.width);
    assert!((size.width - width).abs() < EPS);

    let y = size.baseline_height;
    let (n_x, n_y) = text_pos(&canvas, "n");
    let (i_x, i_y) = text_pos(&canvas, "i");
    assert!((n_y - (y - op_size.baseline_height - dist - sup_size.descent())).abs() < EPS);
    assert!((i_y - (y + op_size.descent() + dist + sub_size.baseline_height)).abs() < EPS);
    assert!((n_x + sup_size.width / 2.0 - width / 2.0).abs() < EPS);
    assert!((i_x + sub_size.width / 2.0 - width / 2.0).abs() < EPS);
}

#[test]
fn superscript_leans_after_italic_base() {
    let nudge = |source: &str| {
        let (canvas, _) = draw_at_origin(&parse_math(source));
        text_pos(&canvas, "2").0 - text_pos(&canvas, "1").0
    };
    let config = MathTextConfig::default();
    let expected = config.params.italic_correction_factor * ApproxMetrics::advance(' ') * config.font_size;
    assert!((nudge("x^{2}_{1}") - expected).abs() < EPS);
    assert!(nudge("3^{2}_{1}").abs() < EPS);
}

#[test]
fn explicit_space_separates_scripts() {
    let (canvas, _) = draw_at_origin(&parse_math("3_1 ^2"));
    assert!((text_pos(&canvas, "2").0 - text_pos(&canvas, "1").0).abs() < EPS);

    let formula = parse_math(r"3_1\,^2");
    let script_width = ApproxMetrics::advance('1')
        * formula.config().font_size
        * formula.config().params.subsuper_size_factor;
    let (canvas, _) = draw_at_origin(&formula);
    assert!(text_pos(&canvas, "2").0 > text_pos(&canvas, "1").0 + script_width);
}

#[test]
fn decorations_grow_the_box() {
    for (source, under) in [(r"\vec{x}", false), (r"\hat{x}", false), (r"\underline{x}", true)] {
        let formula = parse_math(source);
        let Node::Decorated(decorated) = single(&formula) else {
            panic!("{source} did not produce a decoration");
        };
        let config = formula.config();
        let grow = config.params.decoration_height_factor * config.font_size;
        let child = measure_node(&formula, &decorated.child);
        let (canvas, size) = draw_at_origin(&formula);
        assert!((size.overall_height - (child.overall_height + grow)).abs() < EPS, "{source}");

        let y = size.baseline_height;
        if under {
            assert!((size.baseline_height - child.baseline_height).abs() < EPS);
            let lines: Vec<_> = canvas.lines().collect();
            assert_eq!(lines.len(), 1, "{source}");
            assert!(lines[0].0.y > y && lines[0].1.y > y);
        } else {
            assert!((size.baseline_height - (child.baseline_height + grow)).abs() < EPS);
            assert_eq!(canvas.paths().count(), 1, "{source}");
            let child_top = y - child.baseline_height;
            assert!(path_points(&canvas).iter().all(|p| p.y <= child_top + EPS), "{source}");
        }
    }
}

#[test]
fn stacked_forms_draw_their_rules() {
    let cases = [
        (r"\frac{a}{b}", 1, 0),
        (r"\dfrac{a}{b}", 1, 0),
        (r"\tfrac{a}{b}", 1, 0),
        (r"\underbrace{a}{b}", 0, 1),
        (r"\overbrace{a}{b}", 0, 1),
        (r"\underset{a}{b}", 0, 0),
        (r"\overset{a}{b}", 0, 0),
        (r"\stackrel{a}{b}", 0, 0),
    ];
    for (source, lines, paths) in cases {
        let formula = parse_math(source);
        assert!(formula.errors().is_empty(), "{source}: {:?}", formula.error_list());
        let (canvas, _) = draw_at_origin(&formula);
        assert_eq!(canvas.texts().count(), 2, "{source}");
        assert_eq!(canvas.lines().count(), lines, "{source}");
        assert_eq!(canvas.paths().count(), paths, "{source}");
    }
}

#[test]
fn uneven_matrix_rows() {
    let formula = parse_math(r"\begin{matrix}1&2&3\\4\end{matrix}");
    assert!(formula.errors().is_empty());
    let Node::Matrix(matrix) = single(&formula) else {
        panic!("expected a matrix");
    };
    let lengths: Vec<usize> = matrix.rows.iter().map(Vec::len).collect();
    assert_eq!(lengths, [3, 1]);

    let size = formula.config().font_size;
    let gutter = formula.config().params.matrix_gutter_factor * ApproxMetrics::advance('x') * size;
    let col_width = |col: usize| {
        matrix
            .rows
            .iter()
            .filter_map(|row| row.get(col))
            .map(|cell| measure_node(&formula, cell).width)
            .fold(0.0f64, f64::max)
    };
    let (canvas, grid) = draw_at_origin(&formula);
    let expected = col_width(0) + col_width(1) + col_width(2) + 3.0 * gutter;
    assert!((grid.width - expected).abs() < EPS);
    assert_eq!(canvas.texts().count(), 4);
    assert!((text_pos(&canvas, "4").0 - text_pos(&canvas, "1").0).abs() < EPS);
}

#[test]
fn empty_delimiters_stay_visible() {
    let formula = parse_math(r"\left(\right)");
    assert!(formula.errors().is_empty(), "{:?}", formula.error_list());
    assert!(matches!(single(&formula), Node::Brace(_)));
    let font_size = formula.config().font_size;
    let (canvas, size) = draw_at_origin(&formula);
    assert!(size.overall_height >= ApproxMetrics::INK_HEIGHT * font_size - EPS);
    assert!(size.width > 0.0);

    assert_eq!(canvas.paths().count(), 2);
    for path in canvas.paths() {
        let ys: Vec<f64> = path
            .elements()
            .iter()
            .filter_map(|element| match *element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) | PathElement::CubicTo(_, _, p) => {
                    Some(p.y)
                }
                PathElement::Close => None,
            })
            .collect();
        let top = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let bottom = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(bottom - top > 1.0);
    }
}
