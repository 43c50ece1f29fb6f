/// Appends `input` to `output`, escaping `&`, `<` and `>`.
pub fn escape_html_content(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(index) = memchr::memchr3(b'&', b'<', b'>', rest.as_bytes()) {
        // The needles are ASCII, so `index` is on a char boundary.
        let (before, after) = rest.split_at(index);
        output.push_str(before);
        output.push_str(match after.as_bytes()[0] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            _ => "&gt;",
        });
        rest = &after[1..];
    }
    output.push_str(rest);
}

/// Appends `input` to `output`, escaping `&` and `"` for use inside a double-quoted attribute.
pub fn escape_double_quoted_html_attribute(output: &mut String, input: &str) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_escaping() {
        let mut output = String::new();
        escape_html_content(&mut output, "a<b && c>d ∑");
        assert_eq!(output, "a&lt;b &amp;&amp; c&gt;d ∑");
    }

    #[test]
    fn content_without_specials() {
        let mut output = String::from(">");
        escape_html_content(&mut output, "plain");
        assert_eq!(output, ">plain");
    }

    #[test]
    fn attribute_escaping() {
        let mut output = String::new();
        escape_double_quoted_html_attribute(&mut output, r#"say "x" & y"#);
        assert_eq!(output, "say &quot;x&quot; &amp; y");
    }
}
