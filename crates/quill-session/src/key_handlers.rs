use tracing::{debug, debug_span};

use super::types::{
    KeyEvent, KeyResponse, Mode, Panel, PanelAction, SuggestionAction, TimerAction, ToolbarAction,
    TranslationPane,
};
use super::InputSession;

impl InputSession {
    /// Process a key event. Returns a `KeyResponse` describing what the UI
    /// collaborator should update; host-text mutation has already happened
    /// through the sink by the time this returns.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        match event {
            KeyEvent::Delete => self.handle_delete(),

            KeyEvent::Shift => {
                self.caps = !self.caps;
                let mut resp = KeyResponse::none();
                resp.redraw_keys = true;
                resp
            }

            KeyEvent::Enter => self.handle_enter(),

            // The layout axis is orthogonal to the palette mode and is kept
            // across palette round-trips.
            KeyEvent::ToggleSymbols => {
                self.layout = self.layout.flipped();
                let mut resp = KeyResponse::none();
                resp.redraw_keys = true;
                if matches!(self.mode, Mode::Standard) {
                    resp.panel = PanelAction::Show(Panel::Standard(self.layout));
                }
                resp
            }

            KeyEvent::ToggleEmoji => self.toggle_emoji(),
            KeyEvent::ToggleClipboard => self.toggle_clipboard(),
            KeyEvent::ToggleTranslate => self.toggle_translate(),

            KeyEvent::Space => self.handle_space(),
            KeyEvent::Char(ch) => self.handle_char(ch),
        }
    }

    /// Key-down hook. Pressing Space arms the host's one-shot long-press
    /// timer; everything else is inert.
    pub fn key_pressed(&mut self, event: KeyEvent) -> KeyResponse {
        let mut resp = KeyResponse::none();
        if event == KeyEvent::Space {
            self.space_long_pressed = false;
            resp.timer = TimerAction::Arm(self.long_press_delay);
        }
        resp
    }

    /// Key-up hook: cancels the long-press timer before it fires.
    pub fn key_released(&mut self, event: KeyEvent) -> KeyResponse {
        let mut resp = KeyResponse::none();
        if event == KeyEvent::Space {
            resp.timer = TimerAction::Cancel;
        }
        resp
    }

    /// The armed long-press timer elapsed: show the input-method picker and
    /// eat the Space key-up that follows.
    pub fn long_press_fired(&mut self) -> KeyResponse {
        self.space_long_pressed = true;
        self.hosts.picker.show();
        KeyResponse::none()
    }

    fn handle_delete(&mut self) -> KeyResponse {
        if let Mode::Translation(pane) = &mut self.mode {
            pane.buffer.pop();
            let mut resp = KeyResponse::none();
            resp.preview = Some(pane.buffer.clone());
            return resp;
        }

        self.hosts.sink.delete_backward(1);
        let mut resp = KeyResponse::none();
        self.buffer.pop();
        if self.buffer.is_empty() {
            resp.toolbar = ToolbarAction::Show;
            resp.suggestions = self.idle_suggestions();
        } else {
            resp.suggestions =
                SuggestionAction::Show(self.engine.suggestions(self.buffer.as_str()));
        }
        resp
    }

    fn handle_enter(&mut self) -> KeyResponse {
        if let Mode::Translation(pane) = &mut self.mode {
            let text = pane.buffer.trim().to_string();
            if text.is_empty() {
                return KeyResponse::none();
            }
            if pane.in_flight.is_some() {
                debug!("translation request already in flight, ignoring enter");
                return KeyResponse::none();
            }
            let generation = self
                .worker
                .submit(&self.source_lang, &self.target_lang, &text);
            pane.in_flight = Some(generation);
            return KeyResponse::none();
        }

        self.finish_boundary_word();
        self.hosts.sink.send_enter();
        let mut resp = KeyResponse::none();
        resp.toolbar = ToolbarAction::Show;
        resp.suggestions = self.idle_suggestions();
        resp
    }

    fn handle_space(&mut self) -> KeyResponse {
        // A fired long-press already showed the picker; this key-up must not
        // also produce a space.
        if self.space_long_pressed {
            self.space_long_pressed = false;
            return KeyResponse::none();
        }

        if let Mode::Translation(pane) = &mut self.mode {
            pane.buffer.push(' ');
            let mut resp = KeyResponse::none();
            resp.preview = Some(pane.buffer.clone());
            return resp;
        }

        // Auto-correct the finished word before the space lands.
        let typed = self.buffer.as_str().to_string();
        if let Some(correction) = self.engine.best_match(&typed) {
            if correction != typed {
                debug!(%typed, %correction, "auto-correcting");
                self.hosts.sink.delete_backward(self.buffer.char_count());
                self.hosts.sink.commit_text(&correction);
                self.buffer.clear();
                for ch in correction.chars() {
                    self.buffer.push(ch);
                }
            }
        }
        self.hosts.sink.commit_text(" ");

        let word = self.buffer.as_str().to_string();
        self.engine.learn_word(&word);
        if let Some(prev) = self.last_committed.as_deref() {
            if !prev.is_empty() {
                self.engine.learn_bigram(prev, &word);
            }
        }
        self.last_committed = Some(word);
        self.buffer.clear();

        let mut resp = KeyResponse::none();
        resp.toolbar = ToolbarAction::Show;
        resp.suggestions = self.idle_suggestions();
        resp
    }

    fn handle_char(&mut self, ch: char) -> KeyResponse {
        let ch = self.apply_caps(ch);

        if let Mode::Translation(pane) = &mut self.mode {
            pane.buffer.push(ch);
            let mut resp = KeyResponse::none();
            resp.preview = Some(pane.buffer.clone());
            return resp;
        }

        let mut utf8 = [0u8; 4];
        self.hosts.sink.commit_text(ch.encode_utf8(&mut utf8));

        let mut resp = KeyResponse::none();
        if ch.is_alphanumeric() {
            self.buffer.push(ch);
            resp.toolbar = ToolbarAction::Hide;
            resp.suggestions =
                SuggestionAction::Show(self.engine.suggestions(self.buffer.as_str()));
        } else {
            // Punctuation is an implicit word boundary.
            self.finish_boundary_word();
            resp.toolbar = ToolbarAction::Show;
            resp.suggestions = self.idle_suggestions();
        }
        resp
    }

    fn apply_caps(&self, ch: char) -> char {
        if self.caps && ch.is_alphabetic() {
            ch.to_uppercase().next().unwrap_or(ch)
        } else {
            ch
        }
    }

    /// Finalize the buffered word without space handling: learn it, make it
    /// the bigram context, clear the buffer.
    pub(crate) fn finish_boundary_word(&mut self) {
        let word = self.buffer.as_str().to_string();
        self.engine.learn_word(&word);
        self.last_committed = Some(word);
        self.buffer.clear();
    }

    // --- Palette toggles -------------------------------------------------
    //
    // Mode is a single enum, so activating one palette structurally
    // deactivates the others; only the translation worker needs an explicit
    // goodbye (stale-result invalidation).

    fn toggle_emoji(&mut self) -> KeyResponse {
        if matches!(self.mode, Mode::Emoji) {
            return self.reset_to_standard();
        }
        self.leave_current_mode();
        self.mode = Mode::Emoji;
        let mut resp = KeyResponse::none();
        resp.panel = PanelAction::Show(Panel::Emoji);
        resp
    }

    fn toggle_clipboard(&mut self) -> KeyResponse {
        if matches!(self.mode, Mode::Clipboard) {
            return self.reset_to_standard();
        }
        self.leave_current_mode();
        self.mode = Mode::Clipboard;
        let entries = self.hosts.clipboard.history();
        let mut resp = KeyResponse::none();
        resp.panel = PanelAction::Show(Panel::Clipboard { entries });
        resp
    }

    fn toggle_translate(&mut self) -> KeyResponse {
        if matches!(self.mode, Mode::Translation(_)) {
            return self.reset_to_standard();
        }
        self.leave_current_mode();
        self.mode = Mode::Translation(TranslationPane::new());
        let mut resp = KeyResponse::none();
        resp.panel = PanelAction::Show(Panel::Translation);
        resp.preview = Some(String::new());
        resp
    }

    pub(crate) fn reset_to_standard(&mut self) -> KeyResponse {
        self.leave_current_mode();
        self.mode = Mode::Standard;
        let mut resp = KeyResponse::none();
        resp.panel = PanelAction::Show(Panel::Standard(self.layout));
        resp.toolbar = ToolbarAction::Show;
        resp.suggestions = self.refreshed_suggestions();
        resp
    }

    fn leave_current_mode(&mut self) {
        if matches!(self.mode, Mode::Translation(_)) {
            self.worker.invalidate();
        }
    }
}
