use super::types::SuggestionAction;
use super::InputSession;

impl InputSession {
    /// Suggestions for an empty typing buffer: next-word predictions keyed
    /// by the last committed word, or the engine's (empty) zero-prefix list
    /// when there is no history yet.
    pub(crate) fn idle_suggestions(&self) -> SuggestionAction {
        let words = match self.last_committed.as_deref() {
            Some(prev) => self.engine.next_words(prev),
            None => self.engine.suggestions(""),
        };
        SuggestionAction::Show(words)
    }

    /// Buffer-aware refresh: prefix suggestions while a word is being
    /// composed, the idle list otherwise.
    pub(crate) fn refreshed_suggestions(&self) -> SuggestionAction {
        if self.buffer.is_empty() {
            self.idle_suggestions()
        } else {
            SuggestionAction::Show(self.engine.suggestions(self.buffer.as_str()))
        }
    }
}
