//! Editing scripts: a JSON list of user actions replayed against a session.
//!
//! Replays run on a manual clock, so only `wait` steps (and the optional
//! per-keystroke delay of `type`) move time forward. That makes the
//! coalescing behavior of a script fully reproducible.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use edit_history_engine::{HistoryConfig, ManualClock, SelectionSnapshot};
use edit_history_session::EditingSession;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    AppendBlock,
    /// Types `text` at the caret. With `keystroke_ms` the text is typed one
    /// char at a time, advancing the clock before each char.
    Type {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keystroke_ms: Option<u64>,
    },
    Enter,
    Backspace,
    ToggleBold,
    Wait {
        ms: u64,
    },
    Undo,
    Redo,
    SaveDraft,
    Publish,
    Reload,
    SelectBlock {
        index: usize,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::AppendBlock => write!(f, "append_block"),
            Step::Type { text, .. } => write!(f, "type {text:?}"),
            Step::Enter => write!(f, "enter"),
            Step::Backspace => write!(f, "backspace"),
            Step::ToggleBold => write!(f, "toggle_bold"),
            Step::Wait { ms } => write!(f, "wait {ms}ms"),
            Step::Undo => write!(f, "undo"),
            Step::Redo => write!(f, "redo"),
            Step::SaveDraft => write!(f, "save_draft"),
            Step::Publish => write!(f, "publish"),
            Step::Reload => write!(f, "reload"),
            Step::SelectBlock { index } => write!(f, "select_block {index}"),
        }
    }
}

/// Session state observed right after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based position in the script.
    pub index: usize,
    pub step: Step,
    /// Whether the step changed anything (false for a no-op undo, etc.).
    pub applied: bool,
    /// Text as rendered in the view.
    pub text: String,
    /// Text of the focused block.
    pub active_text: String,
    pub focus: Option<SelectionSnapshot>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub levels: usize,
    pub cursor: usize,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.applied { ' ' } else { '-' };
        write!(
            f,
            "{:>3}{marker}{:<24} undo={:<5} redo={:<5} level={}/{} text={:?}",
            self.index,
            self.step.to_string(),
            self.can_undo,
            self.can_redo,
            self.cursor + 1,
            self.levels,
            self.text,
        )
    }
}

/// Parses a script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).context("Failed to parse script")
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    parse_script(&json).with_context(|| format!("Invalid script: {}", path.display()))
}

/// Drives an [`EditingSession`] from script steps.
pub struct Replay {
    session: EditingSession,
    clock: ManualClock,
    executed: usize,
}

impl Replay {
    pub fn new(config: HistoryConfig) -> Self {
        let clock = ManualClock::new();
        let session = EditingSession::with_config(config, clock.clone());
        Self {
            session,
            clock,
            executed: 0,
        }
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    /// Applies one step and reports the resulting state.
    ///
    /// # Errors
    ///
    /// Returns an error if the view no longer shows the session content.
    pub fn step(&mut self, step: &Step) -> Result<StepReport> {
        self.executed += 1;
        let applied = self.apply(step);
        tracing::debug!(index = self.executed, %step, applied, "Replayed step");

        if !self.session.is_view_in_sync() {
            bail!(
                "View diverged from content after step {} ({step}): view shows {:?}, content is {:?}",
                self.executed,
                self.session.view().text(),
                self.session.plain_text()
            );
        }
        Ok(self.report(step, applied))
    }

    /// Replays every step in order, stopping at the first failure.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<StepReport>> {
        steps.iter().map(|step| self.step(step)).collect()
    }

    fn apply(&mut self, step: &Step) -> bool {
        let session = &mut self.session;
        match step {
            Step::AppendBlock => {
                session.append_block();
                true
            }
            Step::Type {
                text,
                keystroke_ms: None,
            } => session.type_text(text),
            Step::Type {
                text,
                keystroke_ms: Some(ms),
            } => {
                let mut typed = false;
                let mut buf = [0u8; 4];
                for ch in text.chars() {
                    self.clock.advance(Duration::from_millis(*ms));
                    typed |= session.type_text(ch.encode_utf8(&mut buf));
                }
                typed
            }
            Step::Enter => session.press_enter(),
            Step::Backspace => session.delete_backward(),
            Step::ToggleBold => {
                session.toggle_bold();
                true
            }
            Step::Wait { ms } => {
                self.clock.advance(Duration::from_millis(*ms));
                true
            }
            Step::Undo => session.undo(),
            Step::Redo => session.redo(),
            Step::SaveDraft => {
                session.save_draft();
                true
            }
            Step::Publish => {
                session.publish();
                true
            }
            Step::Reload => {
                session.reload();
                true
            }
            Step::SelectBlock { index } => session.select_block(*index),
        }
    }

    fn report(&self, step: &Step, applied: bool) -> StepReport {
        let view = self.session.view();
        let history = self.session.history();
        StepReport {
            index: self.executed,
            step: step.clone(),
            applied,
            text: view.text(),
            active_text: view.active_text().to_string(),
            focus: view.focus().map(Into::into),
            can_undo: self.session.can_undo(),
            can_redo: self.session.can_redo(),
            levels: history.len(),
            cursor: history.cursor(),
        }
    }
}
