//! Result line format shared by every implementation in the suite
//!
//! `<TAG> | Resultado: <value>` where the tag is left-aligned and padded to
//! [`TAG_WIDTH`] columns, e.g. `Rust    | Resultado: 267914296`.

/// Text between the tag column and the value
pub const SEPARATOR: &str = " | Resultado: ";

/// Column width the tag is padded to
pub const TAG_WIDTH: usize = 7;

/// Format the result line for `tag` (no trailing newline).
pub fn result_line(tag: &str, value: u64) -> String {
    format!("{:<width$}{}{}", tag, SEPARATOR, value, width = TAG_WIDTH)
}

/// Parse a result line back into `(tag, value)`.
///
/// Padding around the tag and value is ignored. Returns `None` for anything
/// that is not a result line, including an empty tag or a non-decimal value.
pub fn parse_result_line(line: &str) -> Option<(String, u64)> {
    let (tag, rest) = line.split_once('|')?;
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }
    let value = rest.trim_start().strip_prefix("Resultado:")?.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = value.parse().ok()?;
    Some((tag.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_line() {
        assert_eq!(
            result_line("Rust", 267914296),
            "Rust    | Resultado: 267914296"
        );
    }

    #[test]
    fn test_tags_line_up() {
        // Every tag in the suite ends up in the same column
        let c = result_line("C", 1);
        let python = result_line("Python", 1);
        assert_eq!(c.find('|'), python.find('|'));
        assert_eq!(c, "C       | Resultado: 1");
        assert_eq!(python, "Python  | Resultado: 1");
    }

    #[test]
    fn test_long_tag_is_not_truncated() {
        assert_eq!(result_line("Taquion!", 5), "Taquion! | Resultado: 5");
    }

    #[test]
    fn test_parse_own_output() {
        let line = result_line("Rust", 267914296);
        assert_eq!(
            parse_result_line(&line),
            Some(("Rust".to_string(), 267914296))
        );
    }

    #[test]
    fn test_parse_other_languages() {
        assert_eq!(
            parse_result_line("Go      | Resultado: 267914296\n"),
            Some(("Go".to_string(), 267914296))
        );
        assert_eq!(
            parse_result_line("JS | Resultado: 55"),
            Some(("JS".to_string(), 55))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_result_line(""), None);
        assert_eq!(parse_result_line("267914296"), None);
        assert_eq!(parse_result_line(" | Resultado: 1"), None);
        assert_eq!(parse_result_line("Rust | Result: 1"), None);
        assert_eq!(parse_result_line("Rust | Resultado: -1"), None);
        assert_eq!(parse_result_line("Rust | Resultado: 1e9"), None);
        assert_eq!(parse_result_line("Rust | Resultado:"), None);
    }
}
