//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a table header line, dimmed when colors are on.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a-very-long-field-name", 10), "a-very-...");
        assert_eq!(truncate_str("größenfeld", 8), "größe...");
    }

    #[test]
    fn test_format_header_plain() {
        assert_eq!(format_header("Name", false), "Name\n");
    }
}
