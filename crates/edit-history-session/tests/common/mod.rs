use std::time::Duration;

use edit_history_session::history::{HistoryConfig, ManualClock};
use edit_history_session::EditingSession;

/// Gap between simulated keystrokes, well inside the merge window.
pub const KEYSTROKE: Duration = Duration::from_millis(25);

/// A pause long enough to close the merge window.
pub const PAUSE: Duration = Duration::from_millis(1_000);

/// Creates a session on a manual clock with default history settings.
pub fn new_session() -> (EditingSession, ManualClock) {
    let clock = ManualClock::new();
    let session = EditingSession::with_config(HistoryConfig::default(), clock.clone());
    (session, clock)
}

/// Types `text` one char at a time, like a keyboard would.
pub fn type_keys(session: &mut EditingSession, clock: &ManualClock, text: &str) {
    for ch in text.chars() {
        clock.advance(KEYSTROKE);
        let mut buf = [0u8; 4];
        session.type_text(ch.encode_utf8(&mut buf));
    }
}

/// Undoes and asserts the view followed the model.
pub fn undo(session: &mut EditingSession) {
    session.undo();
    assert!(session.is_view_in_sync(), "view diverged after undo");
}

/// Redoes and asserts the view followed the model.
pub fn redo(session: &mut EditingSession) {
    session.redo();
    assert!(session.is_view_in_sync(), "view diverged after redo");
}
