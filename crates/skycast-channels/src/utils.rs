//! Shared utilities for channel implementations.

/// Split a long message into chunks that respect a platform's character limit.
///
/// All slice boundaries are aligned to UTF-8 char boundaries to avoid panics
/// on multi-byte content (Persian, emoji, etc.). Prefers splitting at newline
/// boundaries when possible.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(split_message("hello", 4096), vec!["hello"]);
    }

    #[test]
    fn test_splits_at_newline() {
        let text = "line one\nline two\nline three";
        let chunks = split_message(text, 12);
        assert_eq!(chunks[0], "line one\n");
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_respects_char_boundaries() {
        // Persian text: 2-byte chars, limit lands mid-char.
        let text = "سلام دنیا سلام دنیا";
        let chunks = split_message(text, 9);
        assert_eq!(chunks.concat(), text);
        for chunk in chunks {
            assert!(chunk.len() <= 9);
        }
    }

    #[test]
    fn test_hard_split_without_newlines() {
        let text = "a".repeat(10);
        let chunks = split_message(&text, 4);
        assert_eq!(chunks, vec!["aaaa", "aaaa", "aa"]);
    }
}
