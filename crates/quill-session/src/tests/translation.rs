use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::types::{ModeKind, Panel, PanelAction};

#[test]
fn entering_translation_resets_the_preview() {
    let mut t = make_session(&[]);
    let resp = t.session.handle_key(KeyEvent::ToggleTranslate);
    assert_eq!(t.session.mode(), ModeKind::Translation);
    assert_eq!(resp.panel, PanelAction::Show(Panel::Translation));
    assert_eq!(resp.preview.as_deref(), Some(""));
}

#[test]
fn typed_chars_go_to_the_pane_not_the_host() {
    let mut t = make_session(&[]);
    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "hi");
    let resp = t.session.handle_key(KeyEvent::Space);
    assert_eq!(resp.preview.as_deref(), Some("hi "));
    assert!(t.sink_calls().is_empty());
    assert!(t.session.current_word().is_empty());
}

#[test]
fn caps_applies_inside_the_pane() {
    let mut t = make_session(&[]);
    t.session.handle_key(KeyEvent::ToggleTranslate);
    t.session.handle_key(KeyEvent::Shift);
    let resp = t.session.handle_key(KeyEvent::Char('a'));
    assert_eq!(resp.preview.as_deref(), Some("A"));
}

#[test]
fn delete_edits_the_pane_buffer() {
    let mut t = make_session(&[]);
    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "ab");
    let resp = t.session.handle_key(KeyEvent::Delete);
    assert_eq!(resp.preview.as_deref(), Some("a"));
    assert!(t.sink_calls().is_empty());
}

#[test]
fn enter_translates_and_commits_the_result() {
    let mut t = make_session(&[]);
    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "hello");
    t.session.handle_key(KeyEvent::Enter);

    let resp = poll_until(&mut t.session, 200).expect("translation never arrived");
    assert_eq!(
        t.sink_calls(),
        vec![SinkCall::Commit("[es] hello".into())]
    );
    assert_eq!(t.session.last_committed_word(), Some("[es] hello"));
    // Pane cleared for the next sentence; mode unchanged.
    assert_eq!(resp.preview.as_deref(), Some(""));
    assert_eq!(t.session.mode(), ModeKind::Translation);
}

#[test]
fn enter_with_blank_input_does_nothing() {
    let mut t = make_session(&[]);
    t.session.handle_key(KeyEvent::ToggleTranslate);
    t.session.handle_key(KeyEvent::Space);
    t.session.handle_key(KeyEvent::Enter);
    assert!(poll_until(&mut t.session, 20).is_none());
    assert!(t.sink_calls().is_empty());
}

#[test]
fn failure_surfaces_a_notice_and_keeps_the_input() {
    let mut t = make_session_with(&[], Vec::new(), Box::new(FailingTranslator));
    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "hello");
    t.session.handle_key(KeyEvent::Enter);

    let resp = poll_until(&mut t.session, 200).expect("failure never arrived");
    assert!(resp.notice.as_deref().unwrap().contains("Translation failed"));
    assert!(t.sink_calls().is_empty());

    // Input retained for retry: appending still extends the old text.
    let resp = t.session.handle_key(KeyEvent::Char('!'));
    assert_eq!(resp.preview.as_deref(), Some("hello!"));
}

#[test]
fn duplicate_enter_submits_a_single_request() {
    let calls = Arc::new(AtomicUsize::new(0));
    let translator = CountingTranslator {
        calls: calls.clone(),
        delay: Duration::from_millis(50),
    };
    let mut t = make_session_with(&[], Vec::new(), Box::new(translator));
    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "hello");

    t.session.handle_key(KeyEvent::Enter);
    t.session.handle_key(KeyEvent::Enter);
    t.session.handle_key(KeyEvent::Enter);

    poll_until(&mut t.session, 200).expect("translation never arrived");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // With the request resolved, Enter may fire again.
    type_string(&mut t.session, " again");
    t.session.handle_key(KeyEvent::Enter);
    poll_until(&mut t.session, 200).expect("second translation never arrived");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn results_arriving_after_leaving_the_pane_are_dropped() {
    let calls = Arc::new(AtomicUsize::new(0));
    let translator = CountingTranslator {
        calls: calls.clone(),
        delay: Duration::from_millis(30),
    };
    let mut t = make_session_with(&[], Vec::new(), Box::new(translator));
    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "late");
    t.session.handle_key(KeyEvent::Enter);

    // Close the pane while the request is still running.
    t.session.handle_key(KeyEvent::ToggleTranslate);
    assert!(poll_until(&mut t.session, 40).is_none());
    assert!(t.sink_calls().is_empty());
}

#[test]
fn language_pair_is_configurable_and_swappable() {
    let mut t = make_session(&[]);
    assert_eq!(t.session.languages(), ("en", "es"));
    t.session.set_languages("de", "fr");
    t.session.swap_languages();
    assert_eq!(t.session.languages(), ("fr", "de"));

    t.session.handle_key(KeyEvent::ToggleTranslate);
    type_string(&mut t.session, "salut");
    t.session.handle_key(KeyEvent::Enter);
    poll_until(&mut t.session, 200).expect("translation never arrived");
    assert_eq!(t.sink_calls(), vec![SinkCall::Commit("[de] salut".into())]);
}
