//! Daily content provider contracts.
//!
//! # Responsibility
//! - Define the interfaces for every external content collaborator:
//!   task generation, quiz generation, the paper feed and market quotes.
//! - Keep a distinguishable quota-exhaustion condition so the engine can
//!   fall back to offline content silently instead of raising an error.
//!
//! # Invariants
//! - Providers never mutate the log store; they only produce content.
//! - A non-parseable payload is `Malformed`, which the engine treats the
//!   same as `Unavailable`.

use crate::model::entry::PaperEntry;
use crate::model::quiz::Quiz;
use crate::model::task::Task;
use chrono::Weekday;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod offline;
mod payload;

pub use offline::{OfflineQuizBank, StaticTaskSource};
pub use payload::{decode_quiz, decode_tasks};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Content-provider failure taxonomy.
#[derive(Debug)]
pub enum ProviderError {
    /// Service down, unreachable or unauthenticated.
    Unavailable(String),
    /// Rate limit hit; expected and handled silently.
    QuotaExceeded,
    /// Provider responded, but the payload does not parse.
    Malformed(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "content provider unavailable: {message}"),
            Self::QuotaExceeded => write!(f, "content provider quota exceeded"),
            Self::Malformed(message) => write!(f, "malformed provider response: {message}"),
        }
    }
}

impl Error for ProviderError {}

/// Who the generated content is for. Fed into task/quiz prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Primary research area, e.g. organometallic chemistry.
    pub research_field: String,
    /// Programming focus, e.g. Python quant tooling.
    pub coding_focus: String,
    /// Languages being studied.
    pub languages: Vec<String>,
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self {
            research_field: "organometallic chemistry".to_string(),
            coding_focus: "Python quant trading".to_string(),
            languages: vec!["Japanese".to_string(), "German".to_string()],
        }
    }
}

/// Default proficiency band for generated quizzes.
pub const DEFAULT_DIFFICULTY: &str = "N4/A2";

/// Situations a quiz question can be framed around. One is chosen
/// uniformly at random per question.
pub const TOPICS: [&str; 9] = [
    "the lab",
    "investing",
    "travel",
    "dining out",
    "emergencies",
    "technology",
    "emotions",
    "weather",
    "the workplace",
];

/// Picks one quiz topic uniformly at random.
pub fn pick_topic() -> &'static str {
    TOPICS
        .choose(&mut rand::thread_rng())
        .copied()
        .expect("topic set is non-empty")
}

/// Parameters for one quiz-generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub language: String,
    pub difficulty: String,
    pub topic: String,
    /// Recently learned words the provider must avoid.
    pub exclude: Vec<String>,
}

impl QuizRequest {
    pub fn new(language: impl Into<String>, topic: impl Into<String>, exclude: Vec<String>) -> Self {
        Self {
            language: language.into(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            topic: topic.into(),
            exclude,
        }
    }
}

/// Latest price pair for one market symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub prior_close: f64,
}

impl Quote {
    /// Day-over-day change in percent.
    pub fn percent_change(&self) -> f64 {
        if self.prior_close == 0.0 {
            return 0.0;
        }
        (self.price - self.prior_close) / self.prior_close * 100.0
    }
}

/// Generates up to three tasks for the given weekday.
pub trait TaskSource {
    fn daily_tasks(&self, weekday: Weekday, profile: &LearnerProfile) -> ProviderResult<Vec<Task>>;
}

/// Generates one vocabulary quiz question.
pub trait QuizSource {
    fn generate(&self, request: &QuizRequest) -> ProviderResult<Quiz>;
}

/// Fetches the newest papers for a domain query.
pub trait PaperFeed {
    fn fetch_latest(&self, query: &str, max_results: usize) -> ProviderResult<Vec<PaperEntry>>;
}

/// Fetches the latest quote for one symbol.
pub trait QuoteSource {
    fn fetch_quote(&self, symbol: &str) -> ProviderResult<Quote>;
}

#[cfg(test)]
mod tests {
    use super::{pick_topic, Quote, TOPICS};

    #[test]
    fn percent_change_is_relative_to_prior_close() {
        let quote = Quote {
            price: 110.0,
            prior_close: 100.0,
        };
        assert!((quote.percent_change() - 10.0).abs() < 1e-9);

        let down = Quote {
            price: 95.0,
            prior_close: 100.0,
        };
        assert!((down.percent_change() + 5.0).abs() < 1e-9);
    }

    #[test]
    fn zero_prior_close_does_not_divide_by_zero() {
        let quote = Quote {
            price: 5.0,
            prior_close: 0.0,
        };
        assert_eq!(quote.percent_change(), 0.0);
    }

    #[test]
    fn picked_topic_comes_from_the_fixed_set() {
        for _ in 0..20 {
            assert!(TOPICS.contains(&pick_topic()));
        }
    }
}
