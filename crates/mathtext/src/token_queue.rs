use crate::error::MathTextError;
use crate::lexer::Lexer;
use crate::token::{Span, TokSpan, Token};

/// A token stream with one token of lookahead.
///
/// The peeked token remembers the mode it was lexed in. Peeking in the other mode rewinds the
/// lexer to the start of that token and lexes it again.
pub(crate) struct TokenStream<'source> {
    lexer: Lexer<'source>,
    peeked: Option<(TokSpan<'source>, bool)>,
}

impl<'source> TokenStream<'source> {
    pub(crate) fn new(input: &'source str) -> Self {
        TokenStream {
            lexer: Lexer::new(input),
            peeked: None,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'source str {
        self.lexer.input()
    }

    /// Peek at the next token without consuming it.
    pub(crate) fn peek(&mut self, inside_math: bool) -> TokSpan<'source> {
        if let Some((tok, mode)) = self.peeked {
            if mode == inside_math {
                return tok;
            }
            self.lexer.rewind(tok.span().start());
        }
        let tok = self.lexer.next_token(inside_math);
        self.peeked = Some((tok, inside_math));
        tok
    }

    pub(crate) fn next(&mut self, inside_math: bool) -> TokSpan<'source> {
        let tok = self.peek(inside_math);
        self.peeked = None;
        tok
    }

    pub(crate) fn skip_whitespace(&mut self, inside_math: bool) {
        while matches!(self.peek(inside_math).token(), Token::Whitespace) {
            self.peeked = None;
        }
    }

    /// Like [`next`](Self::next), but a text token only yields its first character.
    ///
    /// This is how `x^23` ends up with only the `2` in the superscript.
    pub(crate) fn next_char(&mut self, inside_math: bool) -> TokSpan<'source> {
        let tok = self.peek(inside_math);
        let (token, span) = tok.into_parts();
        if let Token::Text(text) = token
            && let Some(first) = text.chars().next()
            && first.len_utf8() < text.len()
        {
            let len = first.len_utf8();
            self.peeked = None;
            self.lexer.rewind(span.start() + len);
            return TokSpan::new(Token::Text(&text[..len]), span.with_length(len));
        }
        self.next(inside_math)
    }

    /// The position of the first byte that has not been consumed.
    pub(crate) fn pos(&self) -> usize {
        match self.peeked {
            Some((tok, _)) => tok.span().start(),
            None => self.lexer.pos(),
        }
    }

    /// Consume raw input up to (not including) the first `closer`, bypassing the lexer.
    ///
    /// Returns the raw text and its span, or `None` if `closer` does not occur before the end
    /// of the input, in which case nothing is consumed.
    pub(crate) fn read_raw_until(&mut self, closer: u8) -> Option<(&'source str, Span)> {
        let start = self.pos();
        let rest = self.source().get(start..)?;
        let idx = memchr::memchr(closer, rest.as_bytes())?;
        self.peeked = None;
        // Forget whatever the lexer found past `start`, then skip the raw text.
        self.lexer.rewind(start);
        self.lexer.rewind(start + idx + 1);
        Some((&rest[..idx], Span::new(start, start + idx)))
    }

    pub(crate) fn take_errors(&mut self) -> Vec<MathTextError> {
        self.lexer.take_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_in_other_mode_relexes() {
        let mut stream = TokenStream::new("(x)");
        assert_eq!(stream.peek(false).token(), &Token::Text("(x)"));
        assert_eq!(stream.next(true).token(), &Token::Text("("));
        assert_eq!(stream.next(true).token(), &Token::Text("x"));
    }

    #[test]
    fn next_char_splits_text() {
        let mut stream = TokenStream::new("ab c");
        let tok = stream.next_char(true);
        assert_eq!(tok.token(), &Token::Text("a"));
        assert_eq!(tok.span(), Span::new(0, 1));
        assert_eq!(stream.next(true).token(), &Token::Text("b"));
        stream.skip_whitespace(true);
        assert_eq!(stream.next(true).token(), &Token::Text("c"));
        assert_eq!(stream.next(true).token(), &Token::Eoi);
    }

    #[test]
    fn raw_text_until_closer() {
        let mut stream = TokenStream::new("{red}x");
        assert_eq!(stream.next(false).token(), &Token::OpenBrace);
        let (raw, span) = stream.read_raw_until(b'}').unwrap();
        assert_eq!(raw, "red");
        assert_eq!(span, Span::new(1, 4));
        assert_eq!(stream.next(false).token(), &Token::Text("x"));
        assert!(TokenStream::new("{red").read_raw_until(b'}').is_none());
    }
}
