//! Bounded plain-text snapshot of a hotel page.

use chrono::{DateTime, Utc};
use innkeeper_constant::defaults::ERROR_MARKER;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Excerpt {
    /// Nothing fetched yet, or reset by a clear.
    #[default]
    Empty,
    Ready {
        url: String,
        text: String,
        fetched_at: DateTime<Utc>,
    },
    Failed {
        url: String,
        reason: String,
        failed_at: DateTime<Utc>,
    },
}

impl Excerpt {
    /// Build a usable excerpt, keeping at most `limit` characters of `text`.
    pub fn ready(url: impl Into<String>, text: &str, limit: usize) -> Self {
        Excerpt::Ready {
            url: url.into(),
            text: truncate_chars(text, limit),
            fetched_at: Utc::now(),
        }
    }

    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Excerpt::Failed {
            url: url.into(),
            reason: reason.into(),
            failed_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Excerpt::Empty)
    }

    /// A ready excerpt with no visible text counts as missing.
    pub fn is_usable(&self) -> bool {
        matches!(self, Excerpt::Ready { text, .. } if !text.trim().is_empty())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Excerpt::Failed { .. })
    }

    pub fn source_url(&self) -> Option<&str> {
        match self {
            Excerpt::Empty => None,
            Excerpt::Ready { url, .. } | Excerpt::Failed { url, .. } => Some(url),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Excerpt::Ready { text, .. } => Some(text),
            _ => None,
        }
    }

    /// When the last fetch failed, if it did.
    pub fn failed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Excerpt::Failed { failed_at, .. } => Some(*failed_at),
            _ => None,
        }
    }

    /// Content bound to the system role. A failure is passed through as its
    /// error message so the assistant answers in a degraded mode.
    pub fn system_context(&self) -> String {
        match self {
            Excerpt::Empty => String::new(),
            Excerpt::Ready { text, .. } => text.clone(),
            Excerpt::Failed { reason, .. } => format!("{ERROR_MARKER} fetching website: {reason}"),
        }
    }
}

/// Cut `text` to its first `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let excerpt = Excerpt::default();
        assert!(excerpt.is_empty());
        assert!(!excerpt.is_usable());
        assert_eq!(excerpt.source_url(), None);
        assert_eq!(excerpt.system_context(), "");
    }

    #[test]
    fn test_ready_truncates_by_chars() {
        let text = "é".repeat(5000);
        let excerpt = Excerpt::ready("https://hotel.test/", &text, 4000);
        assert_eq!(excerpt.text().unwrap().chars().count(), 4000);
        assert!(excerpt.is_usable());
    }

    #[test]
    fn test_truncation_may_split_a_word() {
        assert_eq!(truncate_chars("Breakfast buffet", 5), "Break");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_blank_ready_text_is_not_usable() {
        let excerpt = Excerpt::ready("https://hotel.test/", "  \n\t ", 4000);
        assert!(!excerpt.is_usable());
        assert!(!excerpt.is_failed());
        assert!(!Excerpt::ready("https://hotel.test/", "", 4000).is_usable());
    }

    #[test]
    fn test_page_text_starting_with_marker_is_still_usable() {
        let excerpt = Excerpt::ready("https://hotel.test/", "Errors & Omissions policy", 4000);
        assert!(excerpt.is_usable());
        assert!(!excerpt.is_failed());
        assert_eq!(excerpt.system_context(), "Errors & Omissions policy");
    }

    #[test]
    fn test_failed_system_context_carries_marker() {
        let excerpt = Excerpt::failed("https://nowhere.invalid/", "dns error");
        assert!(excerpt.is_failed());
        assert!(excerpt.failed_at().is_some());
        assert_eq!(excerpt.source_url(), Some("https://nowhere.invalid/"));
        assert_eq!(excerpt.system_context(), "Error fetching website: dns error");
        assert!(excerpt.system_context().starts_with(ERROR_MARKER));
    }

    #[test]
    fn test_excerpt_serialization() {
        let excerpt = Excerpt::failed("https://nowhere.invalid/", "timeout");
        let json = serde_json::to_string(&excerpt).unwrap();
        assert!(json.contains(r#""state":"failed""#));

        let decoded: Excerpt = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, excerpt);

        let json = serde_json::to_string(&Excerpt::Empty).unwrap();
        assert_eq!(json, r#"{"state":"empty"}"#);
    }
}
