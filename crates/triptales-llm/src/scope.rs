//! Scope guard - keeps the assistant on TripTales topics

use crate::message::ChatHistory;

/// Words that mark a message as being about the project
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "triptales",
    "project",
    "website",
    "travel",
    "trip",
    "tour",
    "jammu",
    "kashmir",
    "itinerary",
    "budget",
    "route",
    "explore",
    "admin",
    "login",
    "plan",
];

/// Short replies that continue an earlier in-scope exchange
pub const FOLLOW_UP_PHRASES: &[&str] = &[
    "yes", "yep", "yeah", "ok", "okay", "sure", "go ahead", "continue", "next", "no", "nope",
];

/// Longest message still considered a follow-up
pub const MAX_FOLLOW_UP_CHARS: usize = 40;

/// History turns searched for context when a follow-up arrives
pub const FOLLOW_UP_WINDOW: usize = 6;

/// Keyword heuristic deciding whether a message may reach the provider
#[derive(Debug, Clone)]
pub struct ScopeGuard {
    keywords: Vec<String>,
}

impl Default for ScopeGuard {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl ScopeGuard {
    /// Create a guard over a custom keyword list (matched case-insensitively)
    pub fn new<'a>(keywords: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            keywords: keywords.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Whether `text` contains any project keyword as a substring
    pub fn has_keyword(&self, text: &str) -> bool {
        let normalized = text.to_lowercase();
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }

    /// Whether `text` is a bare acknowledgement like "yes" or "go ahead."
    pub fn is_follow_up(text: &str) -> bool {
        let lowered = text.trim().to_lowercase();
        let normalized = lowered.trim_end_matches(['.', '!', '?', ',', ';', ':']);
        if normalized.chars().count() > MAX_FOLLOW_UP_CHARS {
            return false;
        }
        FOLLOW_UP_PHRASES.contains(&normalized)
    }

    /// Decide whether a message is in scope
    ///
    /// A message is in scope when it names a project keyword, or when it is
    /// a follow-up and one of the last [`FOLLOW_UP_WINDOW`] history turns
    /// names one.
    pub fn allows(&self, message: &str, history: &ChatHistory) -> bool {
        if self.has_keyword(message) {
            return true;
        }
        if !Self::is_follow_up(message) {
            return false;
        }
        history
            .recent(FOLLOW_UP_WINDOW)
            .iter()
            .any(|turn| self.has_keyword(&turn.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatMessage;

    #[test]
    fn test_keyword_match_is_substring() {
        let guard = ScopeGuard::default();
        assert!(guard.has_keyword("Suggest a KASHMIR houseboat"));
        assert!(guard.has_keyword("planning"));
        assert!(!guard.has_keyword("What is the capital of France?"));
    }

    #[test]
    fn test_follow_up_detection() {
        assert!(ScopeGuard::is_follow_up("Yes"));
        assert!(ScopeGuard::is_follow_up("  go ahead!! "));
        assert!(ScopeGuard::is_follow_up("ok."));
        assert!(!ScopeGuard::is_follow_up("yes please"));
        assert!(!ScopeGuard::is_follow_up(""));
    }

    #[test]
    fn test_follow_up_needs_recent_context() {
        let guard = ScopeGuard::default();
        let history = ChatHistory::new([
            ChatMessage::user("Plan a Gulmarg day"),
            ChatMessage::assistant("Here it is"),
        ]);
        assert!(guard.allows("yes", &history));
        assert!(!guard.allows("yes", &ChatHistory::default()));
        assert!(!guard.allows("tell me a joke", &history));
    }

    #[test]
    fn test_follow_up_context_window() {
        let guard = ScopeGuard::default();
        let mut turns = vec![ChatMessage::user("Kashmir itinerary please")];
        turns.extend((0..FOLLOW_UP_WINDOW).map(|i| ChatMessage::assistant(format!("filler {}", i))));
        let history = ChatHistory::new(turns);

        // The keyword turn is now outside the window
        assert!(!guard.allows("continue", &history));
    }

    #[test]
    fn test_custom_keywords() {
        let guard = ScopeGuard::new(["Ladakh"]);
        assert!(guard.allows("ladakh bikes?", &ChatHistory::default()));
        assert!(!guard.allows("kashmir?", &ChatHistory::default()));
    }
}
