/// Longest prefix of `text` with at most `max_chars` characters, for log lines.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strip the query string so credentials passed as parameters never reach the logs.
pub fn without_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 3), "hel");
        assert_eq!(preview("привет", 2), "пр");
        assert_eq!(preview("", 5), "");
    }

    #[test]
    fn test_without_query() {
        assert_eq!(
            without_query("https://example.com/v1/models/m:generateContent?key=secret"),
            "https://example.com/v1/models/m:generateContent"
        );
        assert_eq!(without_query("https://example.com/x"), "https://example.com/x");
    }
}
