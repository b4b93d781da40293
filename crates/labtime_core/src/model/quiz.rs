//! Vocabulary quiz model.
//!
//! # Responsibility
//! - Define the single-question quiz shape held in session state.
//! - Validate provider-supplied payloads before they reach the engine.
//!
//! # Invariants
//! - `options` always holds exactly four order-significant choices.
//! - `answer_index` always addresses one of `options`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of answer options in every quiz question.
pub const OPTION_COUNT: usize = 4;

/// Validation failure for an externally supplied quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizValidationError {
    EmptyWord,
    WrongOptionCount(usize),
    AnswerIndexOutOfRange(usize),
}

impl Display for QuizValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWord => write!(f, "quiz word is empty"),
            Self::WrongOptionCount(count) => {
                write!(f, "quiz has {count} options, expected {OPTION_COUNT}")
            }
            Self::AnswerIndexOutOfRange(index) => {
                write!(f, "answer index {index} is out of range 0..{OPTION_COUNT}")
            }
        }
    }
}

impl Error for QuizValidationError {}

/// One vocabulary question, ephemeral for the current session.
///
/// A pass is persisted as a learned-word log entry; the quiz itself never
/// is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    pub example: String,
    pub example_translation: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

impl Quiz {
    /// Checks the structural invariants on an externally supplied quiz.
    pub fn validate(&self) -> Result<(), QuizValidationError> {
        if self.word.trim().is_empty() {
            return Err(QuizValidationError::EmptyWord);
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuizValidationError::WrongOptionCount(self.options.len()));
        }
        if self.answer_index >= self.options.len() {
            return Err(QuizValidationError::AnswerIndexOutOfRange(self.answer_index));
        }
        Ok(())
    }

    /// The option text that counts as the correct answer.
    ///
    /// Callers must only invoke this on a validated quiz.
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer_index]
    }

    /// Whether `selected` is one of this quiz's options.
    pub fn has_option(&self, selected: &str) -> bool {
        self.options.iter().any(|option| option == selected)
    }
}
