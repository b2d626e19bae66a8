//! Field extraction helpers for structured logging

/// Maximum characters of message content included in a log preview.
const PREVIEW_LEN: usize = 100;

/// Truncated message preview for logging (privacy-safe)
///
/// Returns None when content logging is disabled or the message is empty.
/// When enabled, returns the first ~100 characters of the message so logs
/// give debugging context without recording whole conversations.
///
/// # Examples
///
/// ```
/// use switchboard::logging::message_preview;
///
/// assert!(message_preview("show me the ethics policy", false).is_none());
/// assert_eq!(
///     message_preview("show me the ethics policy", true).as_deref(),
///     Some("show me the ethics policy")
/// );
/// ```
pub fn message_preview(message: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || message.is_empty() {
        return None;
    }
    Some(truncate_string(message, PREVIEW_LEN))
}

/// Truncate a string to at most `max_len` bytes, cut on a char boundary.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let cut = (0..=max_len)
        .rev()
        .find(|i| s.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_disabled_returns_none() {
        assert!(message_preview("sensitive payroll question", false).is_none());
    }

    #[test]
    fn test_preview_empty_message_returns_none() {
        assert!(message_preview("", true).is_none());
    }

    #[test]
    fn test_preview_short_message_passes_through() {
        assert_eq!(
            message_preview("hello", true).as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn test_preview_long_message_is_truncated() {
        let long = "x".repeat(250);
        let preview = message_preview(&long, true).unwrap();
        assert_eq!(preview.len(), PREVIEW_LEN + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // Multibyte char straddling the cut point must not split
        let message = format!("{}é tail", "x".repeat(99));
        let preview = message_preview(&message, true).unwrap();
        assert_eq!(preview, format!("{}...", "x".repeat(99)));
    }
}
