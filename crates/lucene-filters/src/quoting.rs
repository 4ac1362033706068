/// Returns true if `text` must be quoted to stay a single term.
///
/// That is the case when it starts with `+` or `-` (read as a prefix
/// otherwise), or contains whitespace or any of `/ ~ ^ : ( ) { } [ ]`.
///
/// ```
/// use lucene_filters::needs_quoting;
///
/// assert!(needs_quoting("black and white"));
/// assert!(needs_quoting("-3"));
/// assert!(!needs_quoting("red"));
/// ```
pub fn needs_quoting(text: &str) -> bool {
    text.starts_with(['+', '-'])
        || text.chars().any(|c| {
            c.is_whitespace()
                || matches!(c, '/' | '~' | '^' | ':' | '(' | ')' | '{' | '}' | '[' | ']')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert!(!needs_quoting("hello"));
        assert!(!needs_quoting("a-b+c"));
        assert!(!needs_quoting(""));
    }

    #[test]
    fn test_leading_prefix() {
        assert!(needs_quoting("+x"));
        assert!(needs_quoting("-x"));
    }

    #[test]
    fn test_special_characters() {
        for text in ["a b", "a\tb", "a/b", "a~", "a^2", "f:v", "(a", "a)", "{", "}", "[", "]"] {
            assert!(needs_quoting(text), "text {text:?}");
        }
    }
}
