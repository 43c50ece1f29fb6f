//! The formula tree.
//!
//! Every node owns its children. A fresh tree is built for every parse; nodes are never
//! shared between trees.

use strum_macros::IntoStaticStr;

use crate::canvas::{Canvas, Pen};
use crate::color::RGB;
use crate::environment::MathEnv;
use crate::layout::LayoutContext;
use crate::metrics::{BoxMetrics, Rect};

/// Formula tree node
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Node {
    /// A run of characters, e.g. `abc` or `x+1`.
    Text(TextNode),
    /// A command resolved through the symbol table, e.g. `\alpha`.
    Symbol(SymbolNode),
    /// Horizontal space, e.g. `\quad` or `~`.
    Whitespace(WhitespaceNode),
    /// A style change for one argument, e.g. `\textbf{...}` or `\textcolor{red}{...}`.
    Instruction(InstructionNode),
    /// `_{...}`, attaches to the preceding node of the enclosing list.
    Subscript(ScriptNode),
    /// `^{...}`, attaches to the preceding node of the enclosing list.
    Superscript(ScriptNode),
    /// Two stacked arguments, e.g. `\frac`, `\underbrace` or `\overset`.
    Frac(FracNode),
    /// `\sqrt` and `\sqrt[n]{...}`
    Sqrt(SqrtNode),
    /// Rows and columns of an environment like `pmatrix`.
    Matrix(MatrixNode),
    /// An accent or line above or below its argument, e.g. `\vec` or `\underline`.
    Decorated(DecoratedNode),
    /// Delimiters that grow with their content, e.g. `\left( ... \right)`.
    Brace(BraceNode),
    /// A horizontal sequence of nodes.
    List(ListNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolNode {
    /// The command name without the backslash.
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceWidth {
    /// The width of a space character in the current font.
    Normal,
    /// A multiple of the font size.
    Em(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhitespaceNode {
    pub width: SpaceWidth,
    pub non_breaking: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum InstructionKind {
    /// `\textbf`
    Bold,
    /// `\mathbf`, bold and upright.
    MathBold,
    Italic,
    /// `\emph` toggles italics.
    Emph,
    /// `\textrm` and `\mathrm`
    Upright,
    /// `\text` and `\mbox` leave math mode.
    Text,
    Sans,
    Typewriter,
    Caligraphic,
    Script,
    Blackboard,
    Fraktur,
    SmallCaps,
    Underline,
    Overline,
    Strike,
    Color(RGB),
    /// A filled background behind the argument.
    ColorBox(RGB),
    /// A frame around the argument.
    Boxed,
    /// `$...$` switches into math mode.
    Equation,
    /// Literal text from `\verb`.
    Verbatim,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionNode {
    pub kind: InstructionKind,
    pub child: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptNode {
    pub child: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FracMode {
    Frac,
    DFrac,
    TFrac,
    /// `\stackrel{top}{base}`
    Stackrel,
    /// `\underbrace{content}{label}`
    UnderBrace,
    /// `\overbrace{content}{label}`
    OverBrace,
    /// `\underset{below}{base}`
    UnderSet,
    /// `\overset{above}{base}`
    OverSet,
}

/// The meaning of `first` and `second` depends on the mode, see [`FracMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct FracNode {
    pub mode: FracMode,
    pub first: Box<Node>,
    pub second: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqrtNode {
    /// The degree as written in `\sqrt[degree]{...}`; empty for square roots.
    pub degree: String,
    pub child: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatrixNode {
    /// Rows may have different lengths.
    pub rows: Vec<Vec<Node>>,
    /// Per-column alignment; columns without an entry use `default_align`.
    pub columns: Vec<ColumnAlign>,
    pub default_align: ColumnAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Decoration {
    Vector,
    Hat,
    WideHat,
    Dot,
    DDot,
    Tilde,
    WideTilde,
    Bar,
    Arrow,
    Overline,
    DoubleOverline,
    Underline,
    DoubleUnderline,
}

impl Decoration {
    #[inline]
    pub fn is_under(self) -> bool {
        matches!(self, Decoration::Underline | Decoration::DoubleUnderline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedNode {
    pub decoration: Decoration,
    pub child: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BraceKind {
    Paren,
    Bracket,
    Curly,
    Angle,
    Bar,
    DoubleBar,
    Floor,
    Ceil,
    /// `.`, takes no space.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BraceNode {
    pub left: BraceKind,
    pub right: BraceKind,
    pub child: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListNode {
    pub nodes: Vec<Node>,
}

const DEBUG_BOX_COLOR: RGB = RGB::new(255, 64, 64);

impl Node {
    /// An empty list, used wherever an argument is missing.
    pub fn empty() -> Node {
        Node::List(ListNode::default())
    }

    pub fn type_name(&self) -> &'static str {
        self.into()
    }

    /// Computes the extent of this node. Pure: calling it twice gives the same result.
    pub fn measure(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> BoxMetrics {
        match self {
            Node::Text(node) => node.measure(ctx, env),
            Node::Symbol(node) => node.measure(ctx, env),
            Node::Whitespace(node) => node.measure(ctx, env),
            Node::Instruction(node) => node.measure(ctx, env),
            Node::Subscript(node) => node.measure_sub(ctx, env),
            Node::Superscript(node) => node.measure_super(ctx, env),
            Node::Frac(node) => node.measure(ctx, env),
            Node::Sqrt(node) => node.measure(ctx, env),
            Node::Matrix(node) => node.measure(ctx, env),
            Node::Decorated(node) => node.measure(ctx, env),
            Node::Brace(node) => node.measure(ctx, env),
            Node::List(node) => node.measure(ctx, env),
        }
    }

    /// Paints this node with its baseline at `y`, starting at `x`.
    ///
    /// Returns the x position after the node.
    pub fn draw(
        &self,
        ctx: &LayoutContext<'_>,
        canvas: &mut dyn Canvas,
        x: f64,
        y: f64,
        env: &MathEnv,
    ) -> f64 {
        let end = match self {
            Node::Text(node) => node.draw(ctx, canvas, x, y, env),
            Node::Symbol(node) => node.draw(ctx, canvas, x, y, env),
            Node::Whitespace(node) => node.draw(ctx, x, env),
            Node::Instruction(node) => node.draw(ctx, canvas, x, y, env),
            Node::Subscript(node) => node.draw_sub(ctx, canvas, x, y, env),
            Node::Superscript(node) => node.draw_super(ctx, canvas, x, y, env),
            Node::Frac(node) => node.draw(ctx, canvas, x, y, env),
            Node::Sqrt(node) => node.draw(ctx, canvas, x, y, env),
            Node::Matrix(node) => node.draw(ctx, canvas, x, y, env),
            Node::Decorated(node) => node.draw(ctx, canvas, x, y, env),
            Node::Brace(node) => node.draw(ctx, canvas, x, y, env),
            Node::List(node) => node.draw(ctx, canvas, x, y, env),
        };
        if ctx.debug_boxes {
            let m = self.measure(ctx, env);
            canvas.draw_rect(
                Rect::new(x, y - m.baseline_height, m.width, m.overall_height),
                Some(Pen::new(DEBUG_BOX_COLOR, 0.3)),
                None,
            );
        }
        end
    }

    /// Appends an HTML rendition of this node to `output`.
    ///
    /// Returns `false` if the node cannot be represented faithfully in HTML. The output is
    /// still written in that case, as a best-effort approximation.
    pub fn to_html(&self, output: &mut String, env: &MathEnv, default_env: &MathEnv) -> bool {
        match self {
            Node::Text(node) => node.to_html(output, env),
            Node::Symbol(node) => node.to_html(output, env),
            Node::Whitespace(node) => node.to_html(output),
            Node::Instruction(node) => node.to_html(output, env, default_env),
            Node::Subscript(node) => node.to_html(output, "sub", env, default_env),
            Node::Superscript(node) => node.to_html(output, "sup", env, default_env),
            Node::Frac(node) => node.to_html(output, env, default_env),
            Node::Sqrt(node) => node.to_html(output, env, default_env),
            Node::Matrix(node) => node.to_html(output, env, default_env),
            Node::Decorated(node) => node.to_html(output, env, default_env),
            Node::Brace(node) => node.to_html(output, env, default_env),
            Node::List(node) => node.to_html(output, env, default_env),
        }
    }

    /// Whether the node ends in slanted glyphs, which pushes a following superscript right.
    pub(crate) fn is_italic(&self, ctx: &LayoutContext<'_>, env: &MathEnv) -> bool {
        match self {
            Node::Text(node) => node.is_italic(env),
            Node::Symbol(node) => node.is_italic(ctx, env),
            Node::Instruction(node) => node.child.is_italic(ctx, &node.kind.apply(env)),
            Node::List(node) => node.nodes.last().is_some_and(|last| last.is_italic(ctx, env)),
            _ => false,
        }
    }
}
