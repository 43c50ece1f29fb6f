use std::ops::Range;

use strum_macros::IntoStaticStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'source> {
    /// End of input.
    Eoi,
    /// A run of ordinary characters.
    Text(&'source str),
    /// A command without its backslash, e.g. `frac` for `\frac` or `,` for `\,`.
    Instruction(&'source str),
    /// `\begin{name}`
    BeginEnv(&'source str),
    /// `\end{name}`
    EndEnv(&'source str),
    /// The character `_` for subscripts.
    Underscore,
    /// The character `^` for superscripts.
    Caret,
    /// The character `$`, which toggles math mode.
    Dollar,
    OpenBrace,
    CloseBrace,
    /// The character `[`. Only meaningful after `\sqrt`.
    OpenBracket,
    CloseBracket,
    /// One or more whitespace characters.
    Whitespace,
    /// A new column in an environment.
    Ampersand,
    /// A new row in an environment, i.e. `\\`.
    RowBreak,
    /// `-`
    Hyphen,
    /// `--`
    EnDash,
    /// `---`
    EmDash,
    /// The character `~`, a non-breaking space.
    Tilde,
    /// The literal content of `\verb|...|`.
    Verbatim(&'source str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn zero_width(at: usize) -> Self {
        Span { start: at, end: at }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns a new `Span` with the same start position as `self`, but with the end position set
    /// to `self.start + length`.
    #[inline]
    pub const fn with_length(self, length: usize) -> Self {
        Span {
            start: self.start,
            end: self.start + length,
        }
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A token together with its span in the input string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokSpan<'source>(Token<'source>, Span);

impl<'source> TokSpan<'source> {
    #[inline]
    pub const fn new(token: Token<'source>, span: Span) -> Self {
        TokSpan(token, span)
    }

    #[inline]
    pub fn token(&self) -> &Token<'source> {
        &self.0
    }

    #[inline]
    pub fn into_parts(self) -> (Token<'source>, Span) {
        (self.0, self.1)
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.1
    }
}

/// The token that closes a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum EndToken {
    #[strum(serialize = r"\end{...}")]
    End,
    #[strum(serialize = r"}")]
    GroupClose,
    #[strum(serialize = r"]")]
    SquareBracketClose,
    #[strum(serialize = r"\right")]
    Right,
    #[strum(serialize = r"$")]
    Dollar,
}
