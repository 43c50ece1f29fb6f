use std::fmt::{self, Write};
use std::ops::Range;

use strum_macros::IntoStaticStr;

use mathtext_renderer::html::{escape_double_quoted_html_attribute, escape_html_content};

use crate::environments::Env;
use crate::token::EndToken;

/// A problem found while parsing formula markup.
///
/// Errors never stop the parser. They are collected in source order, and the tree built
/// alongside them is always usable.
#[derive(Debug, Clone, PartialEq)]
pub struct MathTextError(pub Range<usize>, pub(crate) ErrorKind);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ErrorKind {
    UnterminatedVerbatim,
    UnclosedGroup(EndToken),
    UnmatchedClose(EndToken),
    MissingArgument(Box<str>),
    UnknownEnvironment(Box<str>),
    MismatchedEnvironment { expected: Env, got: Box<str> },
    MissingEnvironmentName,
    ExpectedDelimiter(DelimiterModifier),
    NotAllowedHere(Misplaced),
    UnknownColor(Box<str>),
    UnknownCommand(Box<str>),
    ExpectedColSpec(Box<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum DelimiterModifier {
    #[strum(serialize = r"\left")]
    Left,
    #[strum(serialize = r"\right")]
    Right,
}

/// Tokens that are only valid inside an environment.
#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum Misplaced {
    #[strum(serialize = "&")]
    Ampersand,
    #[strum(serialize = r"\\")]
    RowBreak,
}

/// How bad an error is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Severity {
    /// The input could not be split into tokens as written.
    Tokenizer,
    /// The markup is malformed; the tree contains a best guess.
    Syntax,
    /// The markup is well-formed but refers to something unknown.
    Warning,
}

impl ErrorKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            ErrorKind::UnterminatedVerbatim => {
                r"Unterminated \verb, the rest of the input is taken literally.".to_string()
            }
            ErrorKind::UnclosedGroup(expected) => {
                "Expected token \"".to_string() + <&str>::from(expected) + "\", but not found."
            }
            ErrorKind::UnmatchedClose(got) => {
                "Unmatched closing token: \"".to_string() + <&str>::from(got) + "\"."
            }
            ErrorKind::MissingArgument(cmd) => {
                "Missing argument for \"".to_string() + cmd + "\"."
            }
            ErrorKind::UnknownEnvironment(environment) => {
                "Unknown environment \"".to_string() + environment + "\"."
            }
            ErrorKind::MismatchedEnvironment { expected, got } => {
                "Expected \"\\end{".to_string()
                    + expected.as_str()
                    + "}\", but got \"\\end{"
                    + got
                    + "}\"."
            }
            ErrorKind::MissingEnvironmentName => {
                r"Expected an environment name in braces after \begin or \end.".to_string()
            }
            ErrorKind::ExpectedDelimiter(location) => {
                "There must be a delimiter after \"".to_string()
                    + <&str>::from(*location)
                    + "\", but not found."
            }
            ErrorKind::NotAllowedHere(got) => {
                "Got \"".to_string()
                    + <&str>::from(got)
                    + "\", which may only appear inside an environment."
            }
            ErrorKind::UnknownColor(color) => "Unknown color \"".to_string() + color + "\".",
            ErrorKind::UnknownCommand(cmd) => "Unknown command \"\\".to_string() + cmd + "\".",
            ErrorKind::ExpectedColSpec(got) => {
                "Expected column specification, got \"".to_string() + got + "\"."
            }
        }
    }

    fn severity(&self) -> Severity {
        match self {
            ErrorKind::UnterminatedVerbatim => Severity::Tokenizer,
            ErrorKind::UnknownCommand(_) => Severity::Warning,
            _ => Severity::Syntax,
        }
    }
}

impl MathTextError {
    pub fn severity(&self) -> Severity {
        self.1.severity()
    }

    /// Format an error as an HTML snippet.
    ///
    /// # Arguments
    /// - `source`: The markup that caused the error.
    /// - `css_class`: An optional CSS class to apply to the error element. If `None`,
    ///   defaults to `"mathtext-error"`.
    pub fn to_html(&self, source: &str, css_class: Option<&str>) -> String {
        let mut output = String::new();
        let css_class = css_class.unwrap_or("mathtext-error");
        let _ = write!(
            output,
            r#"<span class="{}" title="{}: "#,
            css_class, self.0.start
        );
        escape_double_quoted_html_attribute(&mut output, &self.1.string());
        output.push_str(r#""><code>"#);
        escape_html_content(&mut output, source);
        output.push_str("</code></span>");
        output
    }

    pub fn error_message(&self) -> String {
        self.1.string()
    }
}

#[cfg(feature = "ariadne")]
impl MathTextError {
    /// Convert this error into an [`ariadne::Report`] for pretty-printing.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
        with_color: bool,
    ) -> ariadne::Report<'static, (&'name str, Range<usize>)> {
        use ariadne::{Label, Report, ReportKind};

        let label_msg = match &self.1 {
            ErrorKind::UnterminatedVerbatim => "no closing delimiter".into(),
            ErrorKind::UnclosedGroup(expected) => {
                format!(
                    "expected \"{}\" to close this group",
                    <&str>::from(expected)
                )
            }
            ErrorKind::UnmatchedClose(got) => {
                format!("unmatched \"{}\"", <&str>::from(got))
            }
            ErrorKind::MissingArgument(_) => "expected an argument here".into(),
            ErrorKind::UnknownEnvironment(_) => "unknown environment".into(),
            ErrorKind::MismatchedEnvironment { expected, .. } => {
                format!("expected \"\\end{{{}}}\" here", expected.as_str())
            }
            ErrorKind::MissingEnvironmentName => "expected a name here".into(),
            ErrorKind::ExpectedDelimiter(modifier) => {
                format!("expected a delimiter after \"{}\"", <&str>::from(*modifier))
            }
            ErrorKind::NotAllowedHere(_) => "only allowed inside an environment".into(),
            ErrorKind::UnknownColor(_) => "unknown color".into(),
            ErrorKind::UnknownCommand(_) => "unknown command".into(),
            ErrorKind::ExpectedColSpec(_) => "expected a column spec here".into(),
        };

        let kind = match self.severity() {
            Severity::Warning => ReportKind::Warning,
            Severity::Tokenizer | Severity::Syntax => ReportKind::Error,
        };
        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        Report::build(kind, (source_name, self.0.start..self.0.start))
            .with_config(config)
            .with_message(self.1.string())
            .with_label(Label::new((source_name, self.0.clone())).with_message(label_msg))
            .finish()
    }
}

impl fmt::Display for MathTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.start, self.1.string())
    }
}

impl std::error::Error for MathTextError {}
