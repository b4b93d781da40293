//! Single-session mutable scratchpad.
//!
//! # Responsibility
//! - Hold the short-lived interactive state between page refreshes.
//!
//! # Invariants
//! - Reset to defaults at session start; never persisted.
//! - Mutated only through engine operations, which keeps the quiz state
//!   machine in one place instead of duplicated per UI control.

use crate::model::quiz::Quiz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which fragment-time activity is currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityMode {
    Quiz,
    DeepWork,
}

/// Per-session scratchpad read and written by the engine between
/// interactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: Uuid,
    pub active_quiz: Option<Quiz>,
    pub quiz_answered: bool,
    pub active_mode: Option<ActivityMode>,
    pub active_language: Option<String>,
}

impl SessionState {
    /// Fresh session with all interactive state at defaults.
    pub fn start() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            active_quiz: None,
            quiz_answered: false,
            active_mode: None,
            active_language: None,
        }
    }

    /// Drops any in-flight quiz so partial state cannot leak into the
    /// next question or activity.
    pub fn clear_quiz(&mut self) {
        self.active_quiz = None;
        self.quiz_answered = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::start()
    }
}
