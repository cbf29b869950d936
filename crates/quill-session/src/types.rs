use std::time::Duration;

/// Key events delivered by the virtual-keyboard host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character key. Caps is applied by the session.
    Char(char),
    Space,
    Delete,
    Shift,
    /// Enter/Done.
    Enter,
    /// Swap the alphabetic/symbols key layout.
    ToggleSymbols,
    ToggleEmoji,
    ToggleClipboard,
    ToggleTranslate,
}

/// The alphabetic/symbols key layout axis. Orthogonal to the palette mode:
/// it survives Emoji/Clipboard/Translation round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Alphabetic,
    Symbols,
}

impl Layout {
    pub(crate) fn flipped(self) -> Self {
        match self {
            Self::Alphabetic => Self::Symbols,
            Self::Symbols => Self::Alphabetic,
        }
    }
}

/// Which input surface is active. Exactly one at a time; activating a
/// palette replaces whatever else was showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Standard,
    Emoji,
    Clipboard,
    Translation,
}

/// Session mode. The translation pane's state lives inside its variant, so
/// it cannot outlive the mode and no cross-mode flag cleanup exists.
#[derive(Debug)]
pub(crate) enum Mode {
    Standard,
    Emoji,
    Clipboard,
    Translation(TranslationPane),
}

impl Mode {
    pub(crate) fn kind(&self) -> ModeKind {
        match self {
            Self::Standard => ModeKind::Standard,
            Self::Emoji => ModeKind::Emoji,
            Self::Clipboard => ModeKind::Clipboard,
            Self::Translation(_) => ModeKind::Translation,
        }
    }
}

/// Translation input state: its own buffer, independent of the typing
/// buffer, plus the generation of the single in-flight request.
#[derive(Debug, Default)]
pub(crate) struct TranslationPane {
    pub(crate) buffer: String,
    pub(crate) in_flight: Option<u64>,
}

impl TranslationPane {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

/// The word currently being composed.
#[derive(Debug, Default)]
pub struct TypingBuffer {
    text: String,
}

impl TypingBuffer {
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Chars typed so far — the count to delete from the host text when the
    /// word is replaced.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Suggestion row update. `Keep` leaves the rendered row untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionAction {
    Keep,
    Show(Vec<String>),
}

/// Input surface the UI should present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Standard(Layout),
    Emoji,
    Clipboard { entries: Vec<String> },
    Translation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Keep,
    Show(Panel),
}

/// Toolbar icon row visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Keep,
    Show,
    Hide,
}

/// Space long-press timer command for the host. The host owns the actual
/// one-shot timer and calls `long_press_fired` when it elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    None,
    Arm(Duration),
    Cancel,
}

/// Effects of one key event, consumed by the UI collaborator. Text mutation
/// is not in here: it goes straight through the host text sink.
#[derive(Debug)]
pub struct KeyResponse {
    pub suggestions: SuggestionAction,
    pub panel: PanelAction,
    pub toolbar: ToolbarAction,
    pub timer: TimerAction,
    /// Translation input preview text; `Some("")` resets it to the hint.
    pub preview: Option<String>,
    /// Transient, dismissible user-visible notice.
    pub notice: Option<String>,
    /// The key layer changed (shift toggled or layout swapped).
    pub redraw_keys: bool,
}

impl KeyResponse {
    pub(crate) fn none() -> Self {
        Self {
            suggestions: SuggestionAction::Keep,
            panel: PanelAction::Keep,
            toolbar: ToolbarAction::Keep,
            timer: TimerAction::None,
            preview: None,
            notice: None,
            redraw_keys: false,
        }
    }
}
