use super::types::{KeyResponse, ToolbarAction};
use super::InputSession;

impl InputSession {
    /// The user tapped a rendered suggestion chip: replace the buffered
    /// chars with `word` plus a trailing space, and learn from it.
    pub fn select_suggestion(&mut self, word: &str) -> KeyResponse {
        if !self.buffer.is_empty() {
            self.hosts.sink.delete_backward(self.buffer.char_count());
        }
        self.hosts.sink.commit_text(&format!("{word} "));

        self.engine.learn_word(word);
        if let Some(prev) = self.last_committed.as_deref() {
            if !prev.is_empty() {
                self.engine.learn_bigram(prev, word);
            }
        }
        self.last_committed = Some(word.to_string());
        self.buffer.clear();

        let mut resp = KeyResponse::none();
        resp.toolbar = ToolbarAction::Show;
        resp.suggestions = self.idle_suggestions();
        resp
    }

    /// An emoji palette tap commits straight through the sink; emoji take no
    /// part in the word machinery.
    pub fn select_emoji(&mut self, emoji: &str) -> KeyResponse {
        self.hosts.sink.commit_text(emoji);
        KeyResponse::none()
    }

    /// Paste an entry from the clipboard palette, then return to Standard.
    /// Unknown indices (the list changed under the UI) are dropped.
    pub fn paste_history_entry(&mut self, index: usize) -> KeyResponse {
        let entries = self.hosts.clipboard.history();
        let Some(text) = entries.get(index) else {
            return KeyResponse::none();
        };
        self.hosts.sink.commit_text(text);
        self.engine.learn_word(text);
        self.last_committed = Some(text.trim().to_string());
        self.reset_to_standard()
    }

    /// Externally supplied text (e.g. the OCR capture's eventual result),
    /// handled like any committed text: learned and made the bigram context.
    pub fn commit_external_text(&mut self, text: &str) -> KeyResponse {
        self.hosts.sink.commit_text(text);
        self.engine.learn_word(text);
        self.last_committed = Some(text.trim().to_string());

        let mut resp = KeyResponse::none();
        resp.suggestions = self.idle_suggestions();
        resp
    }
}
