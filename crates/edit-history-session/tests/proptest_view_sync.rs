use std::time::Duration;

use proptest::prelude::*;

use edit_history_session::history::{HistoryConfig, ManualClock};
use edit_history_session::EditingSession;

#[derive(Debug, Clone)]
enum Action {
    AppendBlock,
    Type(String),
    Enter,
    Backspace,
    ToggleBold,
    SelectBlock(usize),
    Wait(u16),
    Save,
    Publish,
    Reload,
    Undo,
    Redo,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => Just(Action::AppendBlock),
        5 => "[a-z ]{1,4}".prop_map(Action::Type),
        2 => Just(Action::Enter),
        2 => Just(Action::Backspace),
        1 => Just(Action::ToggleBold),
        1 => (0usize..4).prop_map(Action::SelectBlock),
        2 => (0u16..2_000).prop_map(Action::Wait),
        1 => Just(Action::Save),
        1 => Just(Action::Publish),
        1 => Just(Action::Reload),
        3 => Just(Action::Undo),
        3 => Just(Action::Redo),
    ]
}

fn apply(session: &mut EditingSession, clock: &ManualClock, action: &Action) {
    match action {
        Action::AppendBlock => session.append_block(),
        Action::Type(text) => {
            session.type_text(text);
        }
        Action::Enter => {
            session.press_enter();
        }
        Action::Backspace => {
            session.delete_backward();
        }
        Action::ToggleBold => {
            session.toggle_bold();
        }
        Action::SelectBlock(index) => {
            session.select_block(*index);
        }
        Action::Wait(ms) => clock.advance(Duration::from_millis(u64::from(*ms))),
        Action::Save => {
            session.save_draft();
        }
        Action::Publish => {
            session.publish();
        }
        Action::Reload => session.reload(),
        Action::Undo => {
            session.undo();
        }
        Action::Redo => {
            session.redo();
        }
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn view_matches_model_after_every_action(actions in prop::collection::vec(arb_action(), 0..60)) {
        let clock = ManualClock::new();
        let mut session = EditingSession::with_config(HistoryConfig::default(), clock.clone());

        for action in &actions {
            apply(&mut session, &clock, action);
            prop_assert!(session.is_view_in_sync(), "view diverged after {:?}", action);
            prop_assert_eq!(session.history().current().state(), session.content());
        }
    }

    #[test]
    fn undo_then_redo_restores_content(actions in prop::collection::vec(arb_action(), 0..60)) {
        let clock = ManualClock::new();
        let mut session = EditingSession::with_config(HistoryConfig::default(), clock.clone());
        for action in &actions {
            apply(&mut session, &clock, action);
        }

        let before = session.content().clone();
        if session.undo() {
            prop_assert!(session.is_view_in_sync());
            prop_assert!(session.redo());
            prop_assert_eq!(session.content(), &before);
            prop_assert!(session.is_view_in_sync());
        }
    }

    #[test]
    fn saving_never_changes_level_count(actions in prop::collection::vec(arb_action(), 0..40)) {
        let clock = ManualClock::new();
        let mut session = EditingSession::with_config(HistoryConfig::default(), clock.clone());
        for action in &actions {
            apply(&mut session, &clock, action);
        }

        let len = session.history().len();
        let cursor = session.history().cursor();
        session.save_draft();
        session.publish();
        prop_assert_eq!(session.history().len(), len);
        prop_assert_eq!(session.history().cursor(), cursor);
    }
}
