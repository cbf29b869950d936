//! Stateful input session: the key-event state machine of the quill
//! text-entry assistant.
//!
//! `InputSession` receives key events from the virtual-keyboard host,
//! maintains the word being composed and the active input mode, queries and
//! feeds the shared [`PredictionEngine`], and drives the host collaborators
//! (text sink, picker, clipboard, translator). Each call returns a
//! [`KeyResponse`] describing what the UI should update.

pub mod host;

mod commit;
mod key_handlers;
mod response;
mod translate;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use quill_core::engine::PredictionEngine;

use host::{ClipboardHistoryProvider, HostPicker, HostTextSink, Translator};
use translate::TranslationWorker;

pub use translate::TranslateError;
pub use types::{
    KeyEvent, KeyResponse, Layout, ModeKind, Panel, PanelAction, SuggestionAction, TimerAction,
    ToolbarAction, TypingBuffer,
};

use types::Mode;

/// Host-side collaborators wired in at construction.
pub struct HostBindings {
    pub sink: Box<dyn HostTextSink>,
    pub picker: Box<dyn HostPicker>,
    pub clipboard: Box<dyn ClipboardHistoryProvider>,
}

/// One input session: created when the host editor attaches, dropped when it
/// detaches. Session state (mode, buffer, caps, last word) dies with it; the
/// engine outlives it.
pub struct InputSession {
    engine: Arc<PredictionEngine>,
    hosts: HostBindings,
    worker: TranslationWorker,

    mode: Mode,
    layout: Layout,
    caps: bool,
    buffer: TypingBuffer,
    /// Most recently finalized word; bigram key for next-word suggestions.
    last_committed: Option<String>,

    /// Set by `long_press_fired`; eats the following Space key-up.
    space_long_pressed: bool,
    long_press_delay: Duration,

    source_lang: String,
    target_lang: String,
}

impl InputSession {
    pub fn new(
        engine: Arc<PredictionEngine>,
        hosts: HostBindings,
        translator: Box<dyn Translator>,
    ) -> Self {
        let config = engine.config();
        let long_press_delay = Duration::from_millis(config.input.long_press_ms);
        let source_lang = config.translation.source_lang.clone();
        let target_lang = config.translation.target_lang.clone();
        Self {
            engine,
            hosts,
            worker: TranslationWorker::spawn(translator),
            mode: Mode::Standard,
            layout: Layout::Alphabetic,
            caps: false,
            buffer: TypingBuffer::default(),
            last_committed: None,
            space_long_pressed: false,
            long_press_delay,
            source_lang,
            target_lang,
        }
    }

    /// The shared engine this session feeds and queries.
    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_caps(&self) -> bool {
        self.caps
    }

    /// The word currently being composed.
    pub fn current_word(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn last_committed_word(&self) -> Option<&str> {
        self.last_committed.as_deref()
    }

    pub fn languages(&self) -> (&str, &str) {
        (&self.source_lang, &self.target_lang)
    }

    pub fn set_languages(&mut self, source: &str, target: &str) {
        self.source_lang = source.to_string();
        self.target_lang = target.to_string();
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
    }

    /// Drain the translation worker on the input-event thread. The host
    /// calls this from its dispatch loop; a `Some` response carries either
    /// the committed translation's display updates or a failure notice.
    pub fn poll(&mut self) -> Option<KeyResponse> {
        let outcome = self.worker.try_recv()?;
        if outcome.generation != self.worker.current_generation() {
            return None;
        }
        let Mode::Translation(pane) = &mut self.mode else {
            return None;
        };
        if pane.in_flight != Some(outcome.generation) {
            return None;
        }
        pane.in_flight = None;

        let mut resp = KeyResponse::none();
        match outcome.result {
            Ok(text) => {
                self.hosts.sink.commit_text(&text);
                self.last_committed = Some(text.trim().to_string());
                pane.buffer.clear();
                resp.preview = Some(String::new());
            }
            Err(e) => {
                // Input is retained so the user can retry.
                resp.notice = Some(format!("Translation failed: {e}"));
            }
        }
        Some(resp)
    }
}
