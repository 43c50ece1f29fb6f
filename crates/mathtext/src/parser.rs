use std::mem;
use std::ops::Range;

use mathtext_renderer::ast::{
    BraceKind, BraceNode, ColumnAlign, DecoratedNode, FracMode, FracNode, InstructionKind,
    InstructionNode, ListNode, MatrixNode, Node, ScriptNode, SpaceWidth, SqrtNode, SymbolNode,
    TextNode, WhitespaceNode,
};
use mathtext_renderer::color::RGB;
use mathtext_renderer::symbol;

use crate::color_defs::get_color;
use crate::commands::{ColorTarget, Command, get_command};
use crate::environments::{Env, parse_column_spec};
use crate::error::{DelimiterModifier, ErrorKind, MathTextError, Misplaced};
use crate::token::{EndToken, Span, Token};
use crate::token_queue::TokenStream;

/// What closes a nesting level of [`Parser::parse_sequence`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum Group {
    Top,
    Brace,
    Env,
    Dollar,
    Left,
}

/// A nesting level, linked to the level that encloses it.
#[derive(Debug, Clone, Copy)]
struct Quit<'q> {
    group: Group,
    outer: Option<&'q Quit<'q>>,
}

impl Quit<'static> {
    const TOP: Self = Quit {
        group: Group::Top,
        outer: None,
    };
}

impl<'q> Quit<'q> {
    fn inner(&'q self, group: Group) -> Quit<'q> {
        Quit {
            group,
            outer: Some(self),
        }
    }

    /// Which level a closer of `group` belongs to.
    fn closing(&self, group: Group) -> Closing {
        if self.group == group {
            return Closing::Current;
        }
        let mut level = self.outer;
        while let Some(quit) = level {
            if quit.group == group {
                return Closing::Outer;
            }
            level = quit.outer;
        }
        Closing::Unmatched
    }
}

/// Why [`Parser::parse_sequence`] returned.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stop<'source> {
    Eoi,
    /// The closer of the current group was consumed.
    Closed,
    /// `\end{name}` was consumed while an environment was the current group.
    EndEnv(&'source str, Span),
    /// `\right` was consumed; its delimiter was not.
    Right,
    Ampersand,
    RowBreak,
    /// A closer of an enclosing group was found and left in the stream.
    Abandoned,
}

enum Closing {
    Current,
    Outer,
    Unmatched,
}

pub(crate) struct Parser<'source> {
    tokens: TokenStream<'source>,
    errors: Vec<MathTextError>,
}

/// The result of parsing a formula. The tree is usable even when there are errors.
pub(crate) struct Parsed {
    pub root: Node,
    pub errors: Vec<MathTextError>,
}

impl<'source> Parser<'source> {
    pub(crate) fn new(source: &'source str) -> Self {
        Parser {
            tokens: TokenStream::new(source),
            errors: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self, inside_math: bool) -> Parsed {
        let (list, _) = self.parse_sequence(inside_math, &Quit::TOP);
        let mut errors = self.tokens.take_errors();
        errors.append(&mut self.errors);
        errors.sort_by_key(|err| err.0.start);
        Parsed {
            root: Node::List(list),
            errors,
        }
    }

    fn error(&mut self, span: impl Into<Range<usize>>, kind: ErrorKind) {
        let err = MathTextError(span.into(), kind);
        log::debug!("parse error: {err}");
        self.errors.push(err);
    }

    /// Parse nodes until the current group ends.
    fn parse_sequence(&mut self, math: bool, quit: &Quit<'_>) -> (ListNode, Stop<'source>) {
        let mut nodes = Vec::new();
        // Text mode collects adjacent text into one node.
        let mut pending = String::new();
        let stop = loop {
            let (token, span) = self.tokens.peek(math).into_parts();
            if !math {
                let merged = match token {
                    Token::Text(text) => Some(text),
                    Token::Whitespace => Some(" "),
                    Token::Hyphen => Some("-"),
                    Token::EnDash => Some("–"),
                    Token::EmDash => Some("—"),
                    Token::OpenBracket => Some("["),
                    Token::CloseBracket => Some("]"),
                    _ => None,
                };
                if let Some(text) = merged {
                    self.tokens.next(math);
                    pending.push_str(text);
                    continue;
                }
                flush_text(&mut nodes, &mut pending);
            }
            match token {
                Token::Eoi => break Stop::Eoi,
                Token::CloseBrace => match quit.closing(Group::Brace) {
                    Closing::Current => {
                        self.tokens.next(math);
                        break Stop::Closed;
                    }
                    Closing::Outer => break Stop::Abandoned,
                    Closing::Unmatched => {
                        self.tokens.next(math);
                        self.error(span, ErrorKind::UnmatchedClose(EndToken::GroupClose));
                    }
                },
                Token::EndEnv(name) => match quit.closing(Group::Env) {
                    Closing::Current => {
                        self.tokens.next(math);
                        break Stop::EndEnv(name, span);
                    }
                    Closing::Outer => break Stop::Abandoned,
                    Closing::Unmatched => {
                        self.tokens.next(math);
                        self.error(span, ErrorKind::UnmatchedClose(EndToken::End));
                    }
                },
                Token::Instruction("right") => match quit.closing(Group::Left) {
                    Closing::Current => {
                        self.tokens.next(math);
                        break Stop::Right;
                    }
                    Closing::Outer => break Stop::Abandoned,
                    Closing::Unmatched => {
                        self.tokens.next(math);
                        self.error(span, ErrorKind::UnmatchedClose(EndToken::Right));
                        self.delimiter(math);
                    }
                },
                Token::Dollar => {
                    self.tokens.next(math);
                    if quit.group == Group::Dollar {
                        break Stop::Closed;
                    }
                    let node = self.parse_dollar(span, math, quit);
                    nodes.push(node);
                }
                Token::Ampersand | Token::RowBreak => {
                    self.tokens.next(math);
                    if quit.group == Group::Env {
                        break if matches!(token, Token::Ampersand) {
                            Stop::Ampersand
                        } else {
                            Stop::RowBreak
                        };
                    }
                    let misplaced = if matches!(token, Token::Ampersand) {
                        Misplaced::Ampersand
                    } else {
                        Misplaced::RowBreak
                    };
                    self.error(span, ErrorKind::NotAllowedHere(misplaced));
                }
                Token::Whitespace => {
                    self.tokens.next(math);
                }
                Token::Underscore | Token::Caret => {
                    self.tokens.next(math);
                    let name = if matches!(token, Token::Underscore) {
                        "_"
                    } else {
                        "^"
                    };
                    let child = Box::new(self.parse_argument(math, name, span, quit));
                    nodes.push(if matches!(token, Token::Underscore) {
                        Node::Subscript(ScriptNode { child })
                    } else {
                        Node::Superscript(ScriptNode { child })
                    });
                }
                _ => {
                    if let Some(node) = self.parse_atom(math, quit) {
                        nodes.push(node);
                    }
                }
            }
        };
        flush_text(&mut nodes, &mut pending);
        (ListNode { nodes }, stop)
    }

    /// Parse the next token as one node.
    ///
    /// Returns `None` if the token produced only an error.
    fn parse_atom(&mut self, math: bool, quit: &Quit<'_>) -> Option<Node> {
        let (token, span) = self.tokens.next(math).into_parts();
        match token {
            Token::Text(text) => Some(text_node(text)),
            Token::Hyphen => Some(text_node(if math { "\u{2212}" } else { "-" })),
            Token::EnDash => Some(text_node("–")),
            Token::EmDash => Some(text_node("—")),
            Token::OpenBracket => Some(text_node("[")),
            Token::CloseBracket => Some(text_node("]")),
            Token::Tilde => Some(Node::Whitespace(WhitespaceNode {
                width: SpaceWidth::Normal,
                non_breaking: true,
            })),
            Token::Verbatim(text) => Some(Node::Instruction(InstructionNode {
                kind: InstructionKind::Verbatim,
                child: Box::new(text_node(text)),
            })),
            Token::OpenBrace => Some(self.parse_group(span, math, quit)),
            Token::BeginEnv(name) => self.parse_environment(name, span, quit),
            Token::Instruction(name) => self.parse_instruction(name, span, math, quit),
            Token::Eoi
            | Token::EndEnv(_)
            | Token::CloseBrace
            | Token::Underscore
            | Token::Caret
            | Token::Dollar
            | Token::Whitespace
            | Token::Ampersand
            | Token::RowBreak => None,
        }
    }

    fn parse_group(&mut self, open: Span, math: bool, quit: &Quit<'_>) -> Node {
        let (list, stop) = self.parse_sequence(math, &quit.inner(Group::Brace));
        if stop != Stop::Closed {
            self.error(open, ErrorKind::UnclosedGroup(EndToken::GroupClose));
        }
        into_node(list)
    }

    fn parse_dollar(&mut self, open: Span, math: bool, quit: &Quit<'_>) -> Node {
        let (list, stop) = self.parse_sequence(!math, &quit.inner(Group::Dollar));
        if stop != Stop::Closed {
            self.error(open, ErrorKind::UnclosedGroup(EndToken::Dollar));
        }
        let kind = if math {
            InstructionKind::Text
        } else {
            InstructionKind::Equation
        };
        Node::Instruction(InstructionNode {
            kind,
            child: Box::new(into_node(list)),
        })
    }

    /// Parse the argument of `cmd`: a braced group, one character or one instruction.
    ///
    /// A missing argument is reported and replaced by an empty list.
    fn parse_argument(&mut self, math: bool, cmd: &str, cmd_span: Span, quit: &Quit<'_>) -> Node {
        self.tokens.skip_whitespace(math);
        let tok = self.tokens.peek(math);
        let (token, span) = tok.into_parts();
        let node = match token {
            Token::Text(_) => {
                let (token, _) = self.tokens.next_char(math).into_parts();
                match token {
                    Token::Text(ch) => Some(text_node(ch)),
                    _ => None,
                }
            }
            Token::Instruction("right")
            | Token::Eoi
            | Token::EndEnv(_)
            | Token::CloseBrace
            | Token::Underscore
            | Token::Caret
            | Token::Dollar
            | Token::Whitespace
            | Token::Ampersand
            | Token::RowBreak => None,
            _ => return self.parse_atom(math, quit).unwrap_or_else(Node::empty),
        };
        node.unwrap_or_else(|| {
            let at = if matches!(token, Token::Eoi) {
                cmd_span
            } else {
                span
            };
            self.error(at, ErrorKind::MissingArgument(cmd.into()));
            Node::empty()
        })
    }

    fn parse_instruction(
        &mut self,
        name: &'source str,
        span: Span,
        math: bool,
        quit: &Quit<'_>,
    ) -> Option<Node> {
        let Some(command) = get_command(name) else {
            return match name {
                "begin" | "end" => {
                    self.error(span, ErrorKind::MissingEnvironmentName);
                    None
                }
                _ => {
                    if !symbol::is_known(name) {
                        self.error(span, ErrorKind::UnknownCommand(name.into()));
                    }
                    Some(Node::Symbol(SymbolNode {
                        name: name.to_string(),
                    }))
                }
            };
        };
        let node = match command {
            Command::Space(width) => Node::Whitespace(WhitespaceNode {
                width,
                non_breaking: false,
            }),
            Command::Style(kind) => {
                let child_math = match kind {
                    InstructionKind::Text => false,
                    InstructionKind::Equation => true,
                    _ => math,
                };
                let child = Box::new(self.parse_argument(child_math, name, span, quit));
                Node::Instruction(InstructionNode { kind, child })
            }
            Command::Color(target) => {
                let color = self.parse_color(name, span, math);
                let kind = match target {
                    ColorTarget::Foreground => InstructionKind::Color(color),
                    ColorTarget::Background => InstructionKind::ColorBox(color),
                };
                let child = Box::new(self.parse_argument(math, name, span, quit));
                Node::Instruction(InstructionNode { kind, child })
            }
            Command::Frac(mode) => {
                let first = Box::new(self.parse_argument(math, name, span, quit));
                // `\underbrace{x}_{label}` and `\overbrace{x}^{label}`
                self.tokens.skip_whitespace(math);
                let label_marker = match mode {
                    FracMode::UnderBrace => Some(Token::Underscore),
                    FracMode::OverBrace => Some(Token::Caret),
                    _ => None,
                };
                if label_marker.is_some_and(|marker| self.tokens.peek(math).token() == &marker) {
                    self.tokens.next(math);
                }
                let second = Box::new(self.parse_argument(math, name, span, quit));
                Node::Frac(FracNode {
                    mode,
                    first,
                    second,
                })
            }
            Command::Sqrt => {
                let degree = self.parse_sqrt_degree(math);
                let child = Box::new(self.parse_argument(math, name, span, quit));
                Node::Sqrt(SqrtNode { degree, child })
            }
            Command::Decoration(decoration) => {
                let child = Box::new(self.parse_argument(math, name, span, quit));
                Node::Decorated(DecoratedNode { decoration, child })
            }
            Command::Left => self.parse_left(span, math, quit),
            Command::Right => {
                self.error(span, ErrorKind::UnmatchedClose(EndToken::Right));
                self.delimiter(math);
                return None;
            }
        };
        Some(node)
    }

    /// Read `{name}` as raw text and resolve it to a color.
    fn parse_color(&mut self, cmd: &str, cmd_span: Span, math: bool) -> RGB {
        self.tokens.skip_whitespace(math);
        let (token, open) = self.tokens.peek(math).into_parts();
        if token != Token::OpenBrace {
            self.error(open, ErrorKind::MissingArgument(cmd.into()));
            return RGB::BLACK;
        }
        self.tokens.next(math);
        let Some((name, span)) = self.tokens.read_raw_until(b'}') else {
            self.error(open, ErrorKind::UnclosedGroup(EndToken::GroupClose));
            return RGB::BLACK;
        };
        get_color(name).unwrap_or_else(|| {
            let at = if name.is_empty() { cmd_span } else { span };
            self.error(at, ErrorKind::UnknownColor(name.trim().into()));
            RGB::BLACK
        })
    }

    /// Read the optional `[n]` after `\sqrt`.
    fn parse_sqrt_degree(&mut self, math: bool) -> String {
        self.tokens.skip_whitespace(math);
        let (token, open) = self.tokens.peek(math).into_parts();
        if token != Token::OpenBracket {
            return String::new();
        }
        self.tokens.next(math);
        match self.tokens.read_raw_until(b']') {
            Some((degree, _)) => degree.trim().to_string(),
            None => {
                self.error(open, ErrorKind::UnclosedGroup(EndToken::SquareBracketClose));
                String::new()
            }
        }
    }

    fn parse_left(&mut self, span: Span, math: bool, quit: &Quit<'_>) -> Node {
        let left = self.read_delimiter(math, DelimiterModifier::Left);
        let (list, stop) = self.parse_sequence(math, &quit.inner(Group::Left));
        let right = if stop == Stop::Right {
            self.read_delimiter(math, DelimiterModifier::Right)
        } else {
            self.error(span, ErrorKind::UnclosedGroup(EndToken::Right));
            BraceKind::None
        };
        Node::Brace(BraceNode {
            left,
            right,
            child: Box::new(into_node(list)),
        })
    }

    fn read_delimiter(&mut self, math: bool, modifier: DelimiterModifier) -> BraceKind {
        self.tokens.skip_whitespace(math);
        let span = self.tokens.peek(math).span();
        self.delimiter(math).unwrap_or_else(|| {
            self.error(span, ErrorKind::ExpectedDelimiter(modifier));
            BraceKind::None
        })
    }

    /// Consume a delimiter after `\left` or `\right`, if there is one.
    fn delimiter(&mut self, math: bool) -> Option<BraceKind> {
        self.tokens.skip_whitespace(math);
        let kind = match *self.tokens.peek(math).token() {
            Token::Text(text) => match text.chars().next() {
                Some('(' | ')') => BraceKind::Paren,
                Some('<' | '>') => BraceKind::Angle,
                Some('|') => {
                    self.tokens.next_char(math);
                    let double = matches!(
                        self.tokens.peek(math).token(),
                        Token::Text(next) if next.starts_with('|')
                    );
                    if !double {
                        return Some(BraceKind::Bar);
                    }
                    BraceKind::DoubleBar
                }
                Some('#') => BraceKind::DoubleBar,
                Some('.') => BraceKind::None,
                _ => return None,
            },
            Token::OpenBracket | Token::CloseBracket => BraceKind::Bracket,
            Token::OpenBrace | Token::CloseBrace => BraceKind::Curly,
            Token::Underscore => BraceKind::Floor,
            Token::Tilde => BraceKind::Ceil,
            Token::Instruction(name) => match name {
                "{" | "}" | "lbrace" | "rbrace" => BraceKind::Curly,
                "|" | "Vert" => BraceKind::DoubleBar,
                "vert" => BraceKind::Bar,
                "langle" | "rangle" => BraceKind::Angle,
                "lfloor" | "rfloor" => BraceKind::Floor,
                "lceil" | "rceil" => BraceKind::Ceil,
                _ => return None,
            },
            _ => return None,
        };
        self.tokens.next_char(math);
        Some(kind)
    }

    fn parse_environment(
        &mut self,
        name: &'source str,
        span: Span,
        quit: &Quit<'_>,
    ) -> Option<Node> {
        let Some(env) = Env::from_str(name) else {
            self.error(span, ErrorKind::UnknownEnvironment(name.into()));
            self.skip_environment(name);
            return None;
        };
        let columns = if env.needs_column_spec() {
            self.parse_column_spec(name, span)
        } else {
            Vec::new()
        };

        let level = quit.inner(Group::Env);
        let mut rows = Vec::new();
        let mut row = Vec::new();
        loop {
            let (list, stop) = self.parse_sequence(true, &level);
            row.push(into_node(list));
            match stop {
                Stop::Ampersand => {}
                Stop::RowBreak => rows.push(mem::take(&mut row)),
                Stop::EndEnv(end_name, end_span) => {
                    if end_name != name {
                        self.error(
                            end_span,
                            ErrorKind::MismatchedEnvironment {
                                expected: env,
                                got: end_name.into(),
                            },
                        );
                    }
                    break;
                }
                Stop::Eoi | Stop::Abandoned | Stop::Closed | Stop::Right => {
                    self.error(span, ErrorKind::UnclosedGroup(EndToken::End));
                    break;
                }
            }
        }
        // A trailing `\\` leaves an empty row behind.
        if !matches!(row.as_slice(), [Node::List(list)] if list.nodes.is_empty()) {
            rows.push(row);
        }

        let matrix = Node::Matrix(MatrixNode {
            rows,
            columns,
            default_align: env.default_align(),
        });
        Some(match env.delimiters() {
            Some((left, right)) => Node::Brace(BraceNode {
                left,
                right,
                child: Box::new(matrix),
            }),
            None => matrix,
        })
    }

    fn parse_column_spec(&mut self, name: &str, span: Span) -> Vec<ColumnAlign> {
        self.tokens.skip_whitespace(true);
        let (token, open) = self.tokens.peek(true).into_parts();
        if token != Token::OpenBrace {
            self.error(span, ErrorKind::MissingArgument(name.into()));
            return Vec::new();
        }
        self.tokens.next(true);
        let Some((spec, spec_span)) = self.tokens.read_raw_until(b'}') else {
            self.error(open, ErrorKind::UnclosedGroup(EndToken::GroupClose));
            return Vec::new();
        };
        parse_column_spec(spec).unwrap_or_else(|| {
            self.error(spec_span, ErrorKind::ExpectedColSpec(spec.into()));
            Vec::new()
        })
    }

    /// Skip everything up to and including the `\end` that matches an unknown `\begin`.
    fn skip_environment(&mut self, name: &str) {
        let mut depth = 0usize;
        loop {
            match *self.tokens.next(true).token() {
                Token::Eoi => break,
                Token::BeginEnv(_) => depth += 1,
                Token::EndEnv(end) => {
                    if depth == 0 {
                        if end != name {
                            log::debug!("skipped unknown environment {name} up to \\end{{{end}}}");
                        }
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
    }
}

fn text_node(text: &str) -> Node {
    Node::Text(TextNode {
        text: text.to_string(),
    })
}

fn flush_text(nodes: &mut Vec<Node>, pending: &mut String) {
    if !pending.is_empty() {
        nodes.push(Node::Text(TextNode {
            text: mem::take(pending),
        }));
    }
}

/// Unwrap single-element lists.
fn into_node(mut list: ListNode) -> Node {
    if list.nodes.len() == 1
        && let Some(node) = list.nodes.pop()
    {
        return node;
    }
    Node::List(list)
}

#[cfg(test)]
mod tests {
    use mathtext_renderer::ast::Decoration;

    use super::*;

    fn parse(source: &str, math: bool) -> Parsed {
        Parser::new(source).parse(math)
    }

    fn nodes(parsed: &Parsed) -> &[Node] {
        match &parsed.root {
            Node::List(list) => &list.nodes,
            _ => panic!("root is not a list"),
        }
    }

    fn text(s: &str) -> Node {
        text_node(s)
    }

    #[test]
    fn text_mode_merges() {
        let parsed = parse("a  b -- c", false);
        assert!(parsed.errors.is_empty());
        assert_eq!(nodes(&parsed), &[text("a b – c")]);
    }

    #[test]
    fn math_mode_drops_whitespace() {
        let parsed = parse("a - b", true);
        assert_eq!(
            nodes(&parsed),
            &[text("a"), text("\u{2212}"), text("b")]
        );
    }

    #[test]
    fn scripts_take_one_char() {
        let parsed = parse("x^23", true);
        assert_eq!(
            nodes(&parsed),
            &[
                text("x"),
                Node::Superscript(ScriptNode {
                    child: Box::new(text("2"))
                }),
                text("3"),
            ]
        );
    }

    #[test]
    fn dollar_switches_to_math() {
        let parsed = parse("a $x$", false);
        assert!(parsed.errors.is_empty());
        assert_eq!(
            nodes(&parsed),
            &[
                text("a "),
                Node::Instruction(InstructionNode {
                    kind: InstructionKind::Equation,
                    child: Box::new(text("x")),
                }),
            ]
        );
    }

    #[test]
    fn frac_and_sqrt() {
        let parsed = parse(r"\frac{a}{b}\sqrt[3]{x}", true);
        assert!(parsed.errors.is_empty());
        assert_eq!(
            nodes(&parsed),
            &[
                Node::Frac(FracNode {
                    mode: FracMode::Frac,
                    first: Box::new(text("a")),
                    second: Box::new(text("b")),
                }),
                Node::Sqrt(SqrtNode {
                    degree: "3".to_string(),
                    child: Box::new(text("x")),
                }),
            ]
        );
    }

    #[test]
    fn underbrace_label_syntax() {
        let a = parse(r"\underbrace{x}_{n}", true);
        let b = parse(r"\underbrace{x}{n}", true);
        assert!(a.errors.is_empty());
        assert_eq!(a.root, b.root);
    }

    #[test]
    fn left_right_delimiters() {
        let parsed = parse(r"\left\langle x \right|", true);
        assert!(parsed.errors.is_empty());
        assert_eq!(
            nodes(&parsed),
            &[Node::Brace(BraceNode {
                left: BraceKind::Angle,
                right: BraceKind::Bar,
                child: Box::new(text("x")),
            })]
        );
        let parsed = parse(r"\left. x \right\|", true);
        let [Node::Brace(brace)] = nodes(&parsed) else {
            panic!("expected a brace");
        };
        assert_eq!((brace.left, brace.right), (BraceKind::None, BraceKind::DoubleBar));
    }

    #[test]
    fn color_argument() {
        let parsed = parse(r"\textcolor{red}{x}", true);
        assert!(parsed.errors.is_empty());
        assert_eq!(
            nodes(&parsed),
            &[Node::Instruction(InstructionNode {
                kind: InstructionKind::Color(RGB::new(255, 0, 0)),
                child: Box::new(text("x")),
            })]
        );
    }

    #[test]
    fn pmatrix() {
        let parsed = parse(r"\begin{pmatrix}1&2\\3&4\\\end{pmatrix}", true);
        assert!(parsed.errors.is_empty());
        let [Node::Brace(brace)] = nodes(&parsed) else {
            panic!("expected a brace");
        };
        assert_eq!(brace.left, BraceKind::Paren);
        let Node::Matrix(matrix) = brace.child.as_ref() else {
            panic!("expected a matrix");
        };
        assert_eq!(
            matrix.rows,
            vec![vec![text("1"), text("2")], vec![text("3"), text("4")]]
        );
    }

    #[test]
    fn array_columns() {
        let parsed = parse(r"\begin{array}{l|r}a&b\end{array}", true);
        assert!(parsed.errors.is_empty());
        let [Node::Matrix(matrix)] = nodes(&parsed) else {
            panic!("expected a matrix");
        };
        assert_eq!(matrix.columns, vec![ColumnAlign::Left, ColumnAlign::Right]);
    }

    #[test]
    fn decoration() {
        let parsed = parse(r"\vec x", true);
        assert_eq!(
            nodes(&parsed),
            &[Node::Decorated(DecoratedNode {
                decoration: Decoration::Vector,
                child: Box::new(text("x")),
            })]
        );
    }

    #[test]
    fn unknown_environment_is_skipped() {
        let parsed = parse(r"a\begin{xmatrix}1\end{xmatrix}b", true);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(nodes(&parsed), &[text("a"), text("b")]);
    }

    #[test]
    fn missing_argument_gives_empty_list() {
        let parsed = parse(r"\frac{a}", true);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(
            nodes(&parsed),
            &[Node::Frac(FracNode {
                mode: FracMode::Frac,
                first: Box::new(text("a")),
                second: Box::new(Node::empty()),
            })]
        );
    }

    #[test]
    fn unclosed_brace_inside_left() {
        let parsed = parse(r"\left( {x \right)", true);
        let messages: Vec<_> = parsed.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "7: Expected token \"}\", but not found.".to_string(),
            ]
        );
    }

    #[test]
    fn stray_dollar_closer_inside_brace() {
        let parsed = parse("{a $b} c$", false);
        let messages: Vec<_> = parsed.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "3: Expected token \"$\", but not found.".to_string(),
                "8: Expected token \"$\", but not found.".to_string(),
            ]
        );
        let [group, rest, _] = nodes(&parsed) else {
            panic!("expected three nodes");
        };
        assert_eq!(
            group,
            &Node::List(ListNode {
                nodes: vec![
                    text("a "),
                    Node::Instruction(InstructionNode {
                        kind: InstructionKind::Equation,
                        child: Box::new(text("b")),
                    }),
                ]
            })
        );
        assert_eq!(rest, &text(" c"));
    }

    #[test]
    fn closers_look_through_enclosing_levels() {
        let top = Quit::TOP;
        let left = top.inner(Group::Left);
        let brace = left.inner(Group::Brace);
        assert!(matches!(brace.closing(Group::Brace), Closing::Current));
        assert!(matches!(brace.closing(Group::Left), Closing::Outer));
        assert!(matches!(brace.closing(Group::Env), Closing::Unmatched));
        assert!(matches!(top.closing(Group::Brace), Closing::Unmatched));
    }

    #[test]
    fn stray_closers_are_reported() {
        let parsed = parse(r"a} \right) b", true);
        let messages: Vec<_> = parsed.errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "1: Unmatched closing token: \"}\".".to_string(),
                "3: Unmatched closing token: \"\\right\".".to_string(),
            ]
        );
        assert_eq!(nodes(&parsed), &[text("a"), text("b")]);
    }
}
