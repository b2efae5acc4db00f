/// Splitter for the `values (...)` list of an insert.
pub struct ValuesParser;

impl ValuesParser {
    fn is_quote(ch: char) -> bool {
        ch == '"' || ch == '\''
    }

    /// Strips one pair of surrounding parentheses, if both are present.
    pub fn strip_parentheses(text: &str) -> &str {
        let text = text.trim();
        match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            Some(inner) => inner,
            None => text,
        }
    }

    /// Splits on commas outside quotes. Values keep their quotes and escapes
    /// and are trimmed; segments with no characters at all (`a,,b`) are
    /// skipped. A backslash-escaped character never opens, closes or splits.
    pub fn parse(text: &str) -> Vec<String> {
        let text = Self::strip_parentheses(text);
        let mut values = vec![];
        let mut current = String::new();
        let mut quote: Option<char> = None;

        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                current.push(ch);
                current.extend(chars.next());
                continue;
            }
            match quote {
                Some(open) if ch == open => {
                    quote = None;
                    current.push(ch);
                }
                None if Self::is_quote(ch) => {
                    quote = Some(ch);
                    current.push(ch);
                }
                None if ch == ',' => {
                    if !current.is_empty() {
                        values.push(current.trim().to_string());
                        current.clear();
                    }
                }
                _ => current.push(ch),
            }
        }
        if !current.is_empty() {
            values.push(current.trim().to_string());
        }

        values
    }
}

#[cfg(test)]
pub mod tests {
    use super::ValuesParser;

    #[test]
    pub fn test_values_simple() {
        assert_eq!(ValuesParser::parse("(Alice, 30, true)"), vec!["Alice", "30", "true"]);
    }

    #[test]
    pub fn test_values_without_parentheses() {
        assert_eq!(ValuesParser::parse("Alice,30"), vec!["Alice", "30"]);
        assert_eq!(ValuesParser::parse("(Alice, 30"), vec!["(Alice", "30"]);
    }

    #[test]
    pub fn test_values_quoted_commas() {
        assert_eq!(
            ValuesParser::parse("(\"Lee, Ann\", 'a,b', 3)"),
            vec!["\"Lee, Ann\"", "'a,b'", "3"]
        );
        assert_eq!(ValuesParser::parse("('it\"s, ok', x)"), vec!["'it\"s, ok'", "x"]);
    }

    #[test]
    pub fn test_values_escaped_quotes_and_commas() {
        assert_eq!(ValuesParser::parse(r"(O\'Brien, 3)"), vec![r"O\'Brien", "3"]);
        assert_eq!(ValuesParser::parse(r#"("a \", b", c)"#), vec![r#""a \", b""#, "c"]);
    }

    #[test]
    pub fn test_values_empty_segments() {
        assert_eq!(ValuesParser::parse("(a,,b)"), vec!["a", "b"]);
        assert_eq!(ValuesParser::parse("(a, ,b)"), vec!["a", "", "b"]);
        assert!(ValuesParser::parse("()").is_empty());
    }
}
