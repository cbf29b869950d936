mod translation;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use quill_core::config::EngineConfig;
use quill_core::engine::PredictionEngine;
use quill_core::store::MemoryStore;

use super::host::{ClipboardHistoryProvider, HostPicker, HostTextSink, Translator};
use super::translate::TranslateError;
use super::types::{KeyEvent, KeyResponse};
use super::{HostBindings, InputSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SinkCall {
    Commit(String),
    DeleteBackward(usize),
    Enter,
}

/// Records every sink call for assertion; the handle stays with the test.
#[derive(Clone, Default)]
pub(super) struct RecordingSink(pub(super) Arc<Mutex<Vec<SinkCall>>>);

impl HostTextSink for RecordingSink {
    fn commit_text(&mut self, text: &str) {
        self.0.lock().unwrap().push(SinkCall::Commit(text.to_string()));
    }

    fn delete_backward(&mut self, chars: usize) {
        self.0.lock().unwrap().push(SinkCall::DeleteBackward(chars));
    }

    fn send_enter(&mut self) {
        self.0.lock().unwrap().push(SinkCall::Enter);
    }
}

#[derive(Clone, Default)]
pub(super) struct CountingPicker(pub(super) Arc<AtomicUsize>);

impl HostPicker for CountingPicker {
    fn show(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub(super) struct FixedClipboard(pub(super) Vec<String>);

impl ClipboardHistoryProvider for FixedClipboard {
    fn history(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Succeeds with a tagged echo of the input.
pub(super) struct EchoTranslator;

impl Translator for EchoTranslator {
    fn translate(
        &self,
        _source: &str,
        target: &str,
        text: &str,
    ) -> Result<String, TranslateError> {
        Ok(format!("[{target}] {text}"))
    }
}

pub(super) struct FailingTranslator;

impl Translator for FailingTranslator {
    fn translate(
        &self,
        _source: &str,
        _target: &str,
        _text: &str,
    ) -> Result<String, TranslateError> {
        Err(TranslateError::Failed("backend rejected request".into()))
    }
}

/// Counts invocations and holds each one for `delay`, so tests can observe
/// the in-flight window.
pub(super) struct CountingTranslator {
    pub(super) calls: Arc<AtomicUsize>,
    pub(super) delay: Duration,
}

impl Translator for CountingTranslator {
    fn translate(
        &self,
        _source: &str,
        target: &str,
        text: &str,
    ) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Ok(format!("[{target}] {text}"))
    }
}

pub(super) struct TestSession {
    pub(super) session: InputSession,
    pub(super) sink: Arc<Mutex<Vec<SinkCall>>>,
    pub(super) picker: Arc<AtomicUsize>,
}

impl TestSession {
    pub(super) fn sink_calls(&self) -> Vec<SinkCall> {
        self.sink.lock().unwrap().clone()
    }

    pub(super) fn clear_sink(&self) {
        self.sink.lock().unwrap().clear();
    }
}

pub(super) fn make_session(words: &[&str]) -> TestSession {
    make_session_with(words, Vec::new(), Box::new(EchoTranslator))
}

pub(super) fn make_session_with(
    words: &[&str],
    clipboard: Vec<String>,
    translator: Box<dyn Translator>,
) -> TestSession {
    let engine = Arc::new(PredictionEngine::with_seed(
        Arc::new(MemoryStore::new()),
        EngineConfig::default(),
        words,
    ));
    let sink = RecordingSink::default();
    let sink_calls = sink.0.clone();
    let picker = CountingPicker::default();
    let picker_count = picker.0.clone();
    let hosts = HostBindings {
        sink: Box::new(sink),
        picker: Box::new(picker),
        clipboard: Box::new(FixedClipboard(clipboard)),
    };
    TestSession {
        session: InputSession::new(engine, hosts, translator),
        sink: sink_calls,
        picker: picker_count,
    }
}

// Helper: feed a string one character key at a time.
pub(super) fn type_string(session: &mut InputSession, s: &str) -> Vec<KeyResponse> {
    s.chars()
        .map(|ch| session.handle_key(KeyEvent::Char(ch)))
        .collect()
}

/// Poll the session until the translation worker answers, with a bounded
/// wait so a broken worker fails the test instead of hanging it.
pub(super) fn poll_until(session: &mut InputSession, tries: usize) -> Option<KeyResponse> {
    for _ in 0..tries {
        if let Some(resp) = session.poll() {
            return Some(resp);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    None
}
