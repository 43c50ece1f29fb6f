use crate::error::{ErrorKind, MathTextError};
use crate::token::{Span, TokSpan, Token};

/// Lexer
///
/// The lexer is driven by the parser, which passes the current mode on every pull. It keeps
/// a byte cursor into the input so that the parser can rewind to the start of a token it has
/// peeked at in the wrong mode.
pub(crate) struct Lexer<'source> {
    input: &'source str,
    pos: usize,
    errors: Vec<MathTextError>,
}

impl<'source> Lexer<'source> {
    pub(crate) fn new(input: &'source str) -> Self {
        Lexer {
            input,
            pos: 0,
            errors: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn input(&self) -> &'source str {
        self.input
    }

    /// Move the cursor back to `pos`, forgetting errors found at or after it.
    pub(crate) fn rewind(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
        self.errors.retain(|err| err.0.start < pos);
    }

    pub(crate) fn take_errors(&mut self) -> Vec<MathTextError> {
        std::mem::take(&mut self.errors)
    }

    #[inline]
    fn rest(&self) -> &'source str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// One character progresses.
    fn read_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) -> bool {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
        rest.len() != trimmed.len()
    }

    /// Advance while `predicate` holds and return the consumed slice.
    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> &'source str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !predicate(ch))
            .map_or(rest.len(), |(idx, _)| idx);
        self.pos += len;
        &rest[..len]
    }

    #[inline]
    fn tok(&self, token: Token<'source>, start: usize) -> TokSpan<'source> {
        TokSpan::new(token, Span::new(start, self.pos))
    }

    pub(crate) fn next_token(&mut self, inside_math: bool) -> TokSpan<'source> {
        let start = self.pos;
        let Some(ch) = self.read_char() else {
            return TokSpan::new(Token::Eoi, Span::zero_width(start));
        };
        let token = match ch {
            '\\' => return self.read_instruction(start),
            '_' => Token::Underscore,
            '^' => Token::Caret,
            '$' => Token::Dollar,
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            '[' => Token::OpenBracket,
            ']' => Token::CloseBracket,
            '&' => Token::Ampersand,
            '~' => Token::Tilde,
            '-' => {
                let extra = self.read_while(|ch| ch == '-').len();
                // At most three dashes belong together.
                match extra {
                    0 => Token::Hyphen,
                    1 => Token::EnDash,
                    _ => {
                        self.pos = start + 3;
                        Token::EmDash
                    }
                }
            }
            ch if ch.is_whitespace() => {
                self.skip_whitespace();
                Token::Whitespace
            }
            '(' | ')' | '|' if inside_math => Token::Text(&self.input[start..self.pos]),
            _ => {
                self.read_while(|ch| !ends_text_run(ch, inside_math));
                Token::Text(&self.input[start..self.pos])
            }
        };
        self.tok(token, start)
    }

    /// Read what follows a backslash; `start` is the position of the backslash.
    fn read_instruction(&mut self, start: usize) -> TokSpan<'source> {
        let name_start = self.pos;
        let Some(first) = self.read_char() else {
            // A lone backslash at the end of the input.
            return self.tok(Token::Text("\\"), start);
        };
        if first == '\\' {
            return self.tok(Token::RowBreak, start);
        }
        if !first.is_ascii_alphabetic() {
            return self.tok(Token::Instruction(&self.input[name_start..self.pos]), start);
        }
        self.read_while(|ch| ch.is_ascii_alphabetic());
        let name = &self.input[name_start..self.pos];
        let name_end = self.pos;
        match name {
            "begin" | "end" => {
                if let Some(env) = self.read_env_name() {
                    let token = if name == "begin" {
                        Token::BeginEnv(env)
                    } else {
                        Token::EndEnv(env)
                    };
                    return self.tok(token, start);
                }
                self.pos = name_end;
            }
            "verb" => return self.read_verbatim(start),
            _ => {}
        }
        let token = self.tok(Token::Instruction(name), start);
        self.skip_whitespace();
        token
    }

    /// Read `{name}` after `\begin` or `\end`, allowing whitespace before the brace.
    fn read_env_name(&mut self) -> Option<&'source str> {
        self.skip_whitespace();
        if self.read_char() != Some('{') {
            return None;
        }
        let name = self.read_while(|ch| ch.is_ascii_alphanumeric() || ch == '*');
        if name.is_empty() || self.read_char() != Some('}') {
            return None;
        }
        Some(name)
    }

    fn read_verbatim(&mut self, start: usize) -> TokSpan<'source> {
        let closer = match self.read_char() {
            Some('{') => Some('}'),
            other => other,
        };
        let content_start = self.pos;
        let rest = self.rest();
        let found = closer.and_then(|closer| {
            if closer.is_ascii() {
                memchr::memchr(closer as u8, rest.as_bytes())
            } else {
                rest.find(closer)
            }
            .map(|idx| (idx, closer.len_utf8()))
        });
        match found {
            Some((idx, closer_len)) => {
                self.pos = content_start + idx + closer_len;
                self.tok(Token::Verbatim(&rest[..idx]), start)
            }
            None => {
                self.errors.push(MathTextError(
                    start..self.input.len(),
                    ErrorKind::UnterminatedVerbatim,
                ));
                log::debug!("unterminated verbatim at {start}");
                self.pos = self.input.len();
                self.tok(Token::Text(rest), start)
            }
        }
    }
}

/// Characters that cannot be part of a plain text run.
fn ends_text_run(ch: char, inside_math: bool) -> bool {
    matches!(
        ch,
        '\\' | '_' | '^' | '$' | '{' | '}' | '[' | ']' | '&' | '~' | '-'
    ) || ch.is_whitespace()
        || (inside_math && matches!(ch, '(' | ')' | '|'))
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use insta::assert_snapshot;

    use super::*;

    fn dump(problem: &str, inside_math: bool) -> String {
        let mut lexer = Lexer::new(problem);
        let mut tokens = String::new();
        loop {
            let tokloc = lexer.next_token(inside_math);
            if matches!(tokloc.token(), Token::Eoi) {
                break;
            }
            let (tok, span) = tokloc.into_parts();
            writeln!(tokens, "{}:{}: {:?}", span.start(), span.end(), tok).unwrap();
        }
        for err in lexer.take_errors() {
            writeln!(tokens, "error: {err}").unwrap();
        }
        tokens
    }

    #[test]
    fn text_runs() {
        assert_snapshot!(dump("Hello  world", false), @r#"
        0:5: Text("Hello")
        5:7: Whitespace
        7:12: Text("world")
        "#);
        assert_snapshot!(dump("f(x)|y", false), @r#"0:6: Text("f(x)|y")"#);
        assert_snapshot!(dump("[a]~b", false), @r#"
        0:1: OpenBracket
        1:2: Text("a")
        2:3: CloseBracket
        3:4: Tilde
        4:5: Text("b")
        "#);
    }

    #[test]
    fn math_splits_parens_and_bars() {
        assert_snapshot!(dump("f(x)|y", true), @r#"
        0:1: Text("f")
        1:2: Text("(")
        2:3: Text("x")
        3:4: Text(")")
        4:5: Text("|")
        5:6: Text("y")
        "#);
        assert_snapshot!(dump("x_1^{2}", true), @r#"
        0:1: Text("x")
        1:2: Underscore
        2:3: Text("1")
        3:4: Caret
        4:5: OpenBrace
        5:6: Text("2")
        6:7: CloseBrace
        "#);
    }

    #[test]
    fn instructions() {
        assert_snapshot!(dump(r"\alpha  b", true), @r#"
        0:6: Instruction("alpha")
        8:9: Text("b")
        "#);
        assert_snapshot!(dump(r"\,\{\ x", true), @r#"
        0:2: Instruction(",")
        2:4: Instruction("{")
        4:6: Instruction(" ")
        6:7: Text("x")
        "#);
        assert_snapshot!(dump(r"a\\b", true), @r#"
        0:1: Text("a")
        1:3: RowBreak
        3:4: Text("b")
        "#);
        assert_snapshot!(dump(r"x\", false), @r#"
        0:1: Text("x")
        1:2: Text("\\")
        "#);
    }

    #[test]
    fn dashes() {
        assert_snapshot!(dump("a-b--c---d----e", false), @r#"
        0:1: Text("a")
        1:2: Hyphen
        2:3: Text("b")
        3:5: EnDash
        5:6: Text("c")
        6:9: EmDash
        9:10: Text("d")
        10:13: EmDash
        13:14: Hyphen
        14:15: Text("e")
        "#);
    }

    #[test]
    fn environments() {
        assert_snapshot!(dump(r"\begin {pmatrix}1&2\end{pmatrix}", true), @r#"
        0:16: BeginEnv("pmatrix")
        16:17: Text("1")
        17:18: Ampersand
        18:19: Text("2")
        19:32: EndEnv("pmatrix")
        "#);
        assert_snapshot!(dump(r"\begin{pma trix}", true), @r#"
        0:6: Instruction("begin")
        6:7: OpenBrace
        7:10: Text("pma")
        10:11: Whitespace
        11:15: Text("trix")
        15:16: CloseBrace
        "#);
    }

    #[test]
    fn verbatim() {
        assert_snapshot!(dump(r"\verb{a\b}c", false), @r#"
        0:10: Verbatim("a\\b")
        10:11: Text("c")
        "#);
        assert_snapshot!(dump(r"\verb|x{|y", false), @r#"
        0:9: Verbatim("x{")
        9:10: Text("y")
        "#);
        assert_snapshot!(dump(r"x\verb|abc", false), @r#"
        0:1: Text("x")
        1:10: Text("abc")
        error: 1: Unterminated \verb, the rest of the input is taken literally.
        "#);
    }

    #[test]
    fn rewind_relexes_in_other_mode() {
        let mut lexer = Lexer::new("(a)");
        let first = lexer.next_token(false);
        assert_eq!(first.token(), &Token::Text("(a)"));
        lexer.rewind(first.span().start());
        let first = lexer.next_token(true);
        assert_eq!(first.token(), &Token::Text("("));
        assert_eq!(lexer.pos(), 1);
    }

    #[test]
    fn rewind_drops_later_errors() {
        let mut lexer = Lexer::new(r"\verb|x");
        let tok = lexer.next_token(false);
        assert_eq!(tok.token(), &Token::Text("x"));
        lexer.rewind(0);
        assert!(lexer.take_errors().is_empty());
    }
}
