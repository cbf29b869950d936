//! Collaborator interfaces the session drives.
//!
//! Everything outside the core — the edited document, the input-method
//! picker, the clipboard list, the translation backend — sits behind one of
//! these traits. The host wires real implementations in; tests record calls.

use crate::translate::TranslateError;

/// The editable document. The only way the session mutates host text.
pub trait HostTextSink {
    fn commit_text(&mut self, text: &str);
    fn delete_backward(&mut self, chars: usize);
    fn send_enter(&mut self);
}

/// The system input-method picker, invoked by the space long-press.
pub trait HostPicker {
    fn show(&mut self);
}

/// Clipboard history, newest first. Queried on entering clipboard mode.
pub trait ClipboardHistoryProvider {
    fn history(&self) -> Vec<String>;
}

/// Translation backend. Called on the translation worker thread, so
/// implementations may block on network I/O.
pub trait Translator: Send {
    fn translate(&self, source: &str, target: &str, text: &str)
        -> Result<String, TranslateError>;
}
