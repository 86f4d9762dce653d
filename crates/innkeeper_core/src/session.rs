use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::excerpt::Excerpt;
use crate::turn::Turn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No usable excerpt: never fetched, cleared, or the last fetch failed.
    Empty,
    /// Usable excerpt, no turns yet.
    Ready,
    /// Usable excerpt with at least one turn.
    Conversing,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Empty => "empty",
            SessionStatus::Ready => "ready",
            SessionStatus::Conversing => "conversing",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One excerpt plus the ordered conversation. Lives for the process only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    excerpt: Excerpt,
    turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            excerpt: Excerpt::Empty,
            turns: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        if !self.excerpt.is_usable() {
            SessionStatus::Empty
        } else if self.turns.is_empty() {
            SessionStatus::Ready
        } else {
            SessionStatus::Conversing
        }
    }

    /// True when `url` has no usable excerpt yet: nothing stored, a failed
    /// fetch, a page with no text, or an excerpt taken from a different page.
    pub fn needs_excerpt(&self, url: &str) -> bool {
        match &self.excerpt {
            Excerpt::Ready { url: source, .. } => source != url || !self.excerpt.is_usable(),
            Excerpt::Empty | Excerpt::Failed { .. } => true,
        }
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    /// Replace the excerpt wholesale, failed results included.
    pub fn set_excerpt(&mut self, excerpt: Excerpt) {
        self.excerpt = excerpt;
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Drop the conversation and the excerpt. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.excerpt = Excerpt::Empty;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Role;

    const URL: &str = "https://hotel.test/";

    fn ready_session() -> Session {
        let mut session = Session::new();
        session.set_excerpt(Excerpt::ready(URL, "Rooms from 40 EUR", 4000));
        session
    }

    #[test]
    fn test_session_id_new() {
        let id = SessionId::new();
        assert!(!id.0.is_empty());
        assert_eq!(id.as_str().len(), 36); // UUID format
    }

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_session_new_is_empty() {
        let session = Session::new();
        assert_eq!(session.status(), SessionStatus::Empty);
        assert!(session.excerpt().is_empty());
        assert_eq!(session.turn_count(), 0);
        assert!(session.needs_excerpt(URL));
    }

    #[test]
    fn test_status_transitions() {
        let mut session = ready_session();
        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(!session.needs_excerpt(URL));

        session.push_turn(Turn::user("Hi"));
        assert_eq!(session.status(), SessionStatus::Conversing);
    }

    #[test]
    fn test_failed_excerpt_keeps_status_empty() {
        let mut session = Session::new();
        session.set_excerpt(Excerpt::failed(URL, "timed out"));
        session.push_turn(Turn::user("Hi"));
        assert_eq!(session.status(), SessionStatus::Empty);
        assert!(session.needs_excerpt(URL));
        assert!(session.excerpt().is_failed());
    }

    #[test]
    fn test_blank_page_is_refetched() {
        let mut session = Session::new();
        session.set_excerpt(Excerpt::ready(URL, "", 4000));
        assert!(session.needs_excerpt(URL));
        assert_eq!(session.status(), SessionStatus::Empty);

        session.push_turn(Turn::user("Hi"));
        assert_eq!(session.status(), SessionStatus::Empty);
    }

    #[test]
    fn test_needs_excerpt_for_other_url() {
        let session = ready_session();
        assert!(session.needs_excerpt("https://other-hotel.test/"));
    }

    #[test]
    fn test_turns_keep_insertion_order() {
        let mut session = ready_session();
        session.push_turn(Turn::user("one"));
        session.push_turn(Turn::assistant("two"));
        session.push_turn(Turn::user("three"));

        let contents: Vec<_> = session.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert_eq!(session.turns().last().unwrap().role, Role::User);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut session = ready_session();
        session.push_turn(Turn::user("Hi"));
        session.push_turn(Turn::assistant("Hello"));

        session.clear();
        assert_eq!(session.turn_count(), 0);
        assert!(session.excerpt().is_empty());
        assert_eq!(session.status(), SessionStatus::Empty);

        session.clear();
        assert_eq!(session.turn_count(), 0);
        assert!(session.excerpt().is_empty());
    }

    #[test]
    fn test_session_serialization() {
        let mut session = ready_session();
        session.push_turn(Turn::user("Hi"));

        let json = serde_json::to_string(&session).unwrap();
        let decoded: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.id, session.id);
        assert_eq!(decoded.turns(), session.turns());
        assert_eq!(decoded.excerpt(), session.excerpt());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&SessionStatus::Conversing).unwrap();
        assert_eq!(json, "\"conversing\"");
        assert_eq!(SessionStatus::Ready.to_string(), "ready");
    }
}
