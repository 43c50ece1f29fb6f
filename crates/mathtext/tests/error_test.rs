use std::fmt::Write;

use insta::assert_snapshot;
use mathtext::{MathText, MathTextConfig, Severity};

fn problems() -> [(&'static str, &'static str); 20] {
    [
        ("end_without_open", r"\end{matrix}"),
        ("curly_close_without_open", r"}"),
        ("unsupported_command", r"\asdf"),
        ("unsupported_environment", r"\begin{xmatrix} 1 \end{xmatrix}"),
        ("unclosed_bracket", r"\sqrt[3"),
        ("mismatched_begin_end", r"\begin{matrix} 1 \end{bmatrix}"),
        ("unclosed_brace", r"{"),
        ("unclosed_left", r"\left( x"),
        ("unclosed_env", r"\begin{matrix} x"),
        ("unclosed_begin", r"\begin{matrix"),
        ("incomplete_sup", r"x^"),
        ("sup_closed", r"{x^}"),
        ("ampersand_outside_env", r"x & y"),
        ("row_break_outside_env", r"a \\ b"),
        ("unknown_color", r"\textcolor{reddish}{x}"),
        ("unterminated_verb", r"\verb|abc"),
        ("left_with_non_delimiter", r"\left x \right)"),
        ("bad_column_spec", r"\begin{array}{lx} a \end{array}"),
        ("right_without_left", r"\right)"),
        ("unclosed_dollar", r"a $b"),
    ]
}

fn math_formula() -> MathText {
    MathText::new(MathTextConfig {
        initial_math_mode: true,
        ..Default::default()
    })
}

#[test]
fn error_messages() {
    let mut formula = math_formula();
    let mut output = String::new();
    for (name, problem) in problems() {
        assert!(!formula.parse(problem), "problem `{problem}` did not return an error");
        writeln!(output, "{name}:").unwrap();
        for message in formula.error_list() {
            writeln!(output, "  {message}").unwrap();
        }
    }
    assert_snapshot!(output, @r#"
    end_without_open:
      0: Unmatched closing token: "\end{...}".
    curly_close_without_open:
      0: Unmatched closing token: "}".
    unsupported_command:
      0: Unknown command "\asdf".
    unsupported_environment:
      0: Unknown environment "xmatrix".
    unclosed_bracket:
      5: Expected token "]", but not found.
    mismatched_begin_end:
      17: Expected "\end{matrix}", but got "\end{bmatrix}".
    unclosed_brace:
      0: Expected token "}", but not found.
    unclosed_left:
      0: Expected token "\right", but not found.
    unclosed_env:
      0: Expected token "\end{...}", but not found.
    unclosed_begin:
      0: Expected an environment name in braces after \begin or \end.
      6: Expected token "}", but not found.
    incomplete_sup:
      1: Missing argument for "^".
    sup_closed:
      3: Missing argument for "^".
    ampersand_outside_env:
      2: Got "&", which may only appear inside an environment.
    row_break_outside_env:
      2: Got "\\", which may only appear inside an environment.
    unknown_color:
      11: Unknown color "reddish".
    unterminated_verb:
      0: Unterminated \verb, the rest of the input is taken literally.
    left_with_non_delimiter:
      6: There must be a delimiter after "\left", but not found.
    bad_column_spec:
      14: Expected column specification, got "lx".
    right_without_left:
      0: Unmatched closing token: "\right".
    unclosed_dollar:
      2: Expected token "$", but not found.
    "#);
}

#[test]
fn reports() {
    let mut formula = math_formula();
    for (_, problem) in problems() {
        formula.parse(problem);
        for error in formula.errors() {
            let report = error.to_report("<input>", false);
            let mut buf = Vec::new();
            report
                .write(("<input>", ariadne::Source::from(problem)), &mut buf)
                .expect("failed to write report");
            let output = String::from_utf8(buf).expect("report should be valid UTF-8");
            assert!(
                output.contains(&error.error_message()),
                "report for `{problem}` lacks its message:\n{output}"
            );
            let kind = if error.severity() == Severity::Warning {
                "Warning"
            } else {
                "Error"
            };
            assert!(output.contains(kind), "{output}");
        }
    }
}

#[test]
fn html_snippet() {
    let mut formula = math_formula();
    formula.parse(r"a<\asdf");
    assert_snapshot!(
        formula.errors_to_html(None),
        @r#"<span class="mathtext-error" title="2: Unknown command &quot;\asdf&quot;."><code>a&lt;\asdf</code></span>"#
    );
}

#[test]
fn unknown_command_is_a_warning() {
    let mut formula = math_formula();
    formula.parse(r"\asdf{a}");
    assert_eq!(formula.errors()[0].severity(), Severity::Warning);
    formula.parse(r"\verb|a");
    assert_eq!(formula.errors()[0].severity(), Severity::Tokenizer);
}
