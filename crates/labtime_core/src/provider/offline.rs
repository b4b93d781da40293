//! Built-in offline content: weekday task table and quiz bank.
//!
//! # Responsibility
//! - Supply the day's tasks from a static weekday strategy table when no
//!   generative source is configured.
//! - Supply a degraded but non-blocking quiz when the generative source
//!   fails or is rate-limited: the user must always get *some* quiz.

use crate::model::quiz::Quiz;
use crate::model::task::{Severity, Task, TaskCategory};
use crate::provider::{LearnerProfile, ProviderResult, QuizRequest, QuizSource, TaskSource};
use chrono::Weekday;
use rand::seq::SliceRandom;

/// One-line focus for each day of the week.
pub fn weekday_strategy(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "kick-off day: plan the week and protect focus",
        Weekday::Tue => "execution day: one long deep-work block",
        Weekday::Wed => "midweek checkpoint: review progress",
        Weekday::Thu => "sprint day: attack the hardest problem",
        Weekday::Fri => "wrap-up day: close loops and document",
        Weekday::Sat => "creation and study day: cross-discipline work",
        Weekday::Sun => "rest and positioning day: recover and lay out next week",
    }
}

/// Static task table keyed by weekday. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTaskSource;

impl TaskSource for StaticTaskSource {
    fn daily_tasks(&self, weekday: Weekday, profile: &LearnerProfile) -> ProviderResult<Vec<Task>> {
        let strategy = weekday_strategy(weekday);
        Ok(vec![
            Task::new(
                format!("{} block", capitalize_first(&profile.research_field)),
                TaskCategory::Research,
                format!("90 focused minutes on {} — {strategy}.", profile.research_field),
                Severity::Info,
            ),
            Task::new(
                format!("{} session", capitalize_first(&profile.coding_focus)),
                TaskCategory::Coding,
                format!("One concrete step forward in {}.", profile.coding_focus),
                Severity::Success,
            ),
            Task::new(
                "Language drill",
                TaskCategory::Growth,
                format!("20 minutes of {} practice.", profile.languages.join(" or ")),
                Severity::Warning,
            ),
        ])
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Built-in quiz bank keyed by language.
///
/// Unknown languages fall back to the English bank, so the bank never
/// fails to produce a question.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineQuizBank;

impl OfflineQuizBank {
    /// Picks one question for the language, uniformly at random.
    pub fn pick(&self, language: &str) -> Quiz {
        let bank = bank_for(language);
        bank.choose(&mut rand::thread_rng())
            .expect("every offline bank is non-empty")
            .clone()
    }
}

impl QuizSource for OfflineQuizBank {
    fn generate(&self, request: &QuizRequest) -> ProviderResult<Quiz> {
        Ok(self.pick(&request.language))
    }
}

fn bank_for(language: &str) -> Vec<Quiz> {
    match language {
        "Japanese" => japanese_bank(),
        "German" => german_bank(),
        _ => english_bank(),
    }
}

fn quiz(
    word: &str,
    reading: &str,
    meaning: &str,
    example: &str,
    example_translation: &str,
    question: &str,
    options: [&str; 4],
    answer_index: usize,
) -> Quiz {
    Quiz {
        word: word.to_string(),
        reading: reading.to_string(),
        meaning: meaning.to_string(),
        example: example.to_string(),
        example_translation: example_translation.to_string(),
        question: question.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        answer_index,
    }
}

fn japanese_bank() -> Vec<Quiz> {
    vec![
        quiz(
            "研究",
            "けんきゅう",
            "research",
            "毎日研究を続けています。",
            "I keep up my research every day.",
            "What does 研究 mean?",
            ["research", "vacation", "cooking", "weather"],
            0,
        ),
        quiz(
            "実験",
            "じっけん",
            "experiment",
            "明日、新しい実験を始めます。",
            "Tomorrow I start a new experiment.",
            "What does 実験 mean?",
            ["meeting", "experiment", "holiday", "library"],
            1,
        ),
    ]
}

fn german_bank() -> Vec<Quiz> {
    vec![
        quiz(
            "das Labor",
            "laˈboːɐ̯",
            "the laboratory",
            "Ich arbeite heute im Labor.",
            "I am working in the lab today.",
            "What does `das Labor` mean?",
            ["the kitchen", "the office", "the laboratory", "the garden"],
            2,
        ),
        quiz(
            "sparen",
            "ˈʃpaːʁən",
            "to save (money)",
            "Ich spare jeden Monat etwas Geld.",
            "I save some money every month.",
            "What does `sparen` mean?",
            ["to spend", "to save", "to borrow", "to earn"],
            1,
        ),
    ]
}

fn english_bank() -> Vec<Quiz> {
    vec![
        quiz(
            "experiment",
            "/ɪkˈsperɪmənt/",
            "a scientific test",
            "The experiment confirmed our hypothesis.",
            "",
            "What is an `experiment`?",
            ["a scientific test", "a lunch break", "a long walk", "a guess"],
            0,
        ),
        quiz(
            "yield",
            "/jiːld/",
            "the amount produced",
            "The reaction gave a 70% yield.",
            "",
            "In chemistry, `yield` means:",
            ["the color", "the smell", "the temperature", "the amount produced"],
            3,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{weekday_strategy, OfflineQuizBank, StaticTaskSource};
    use crate::model::task::TaskCategory;
    use crate::provider::{LearnerProfile, QuizRequest, QuizSource, TaskSource};
    use chrono::Weekday;

    #[test]
    fn static_source_returns_three_tagged_tasks() {
        let tasks = StaticTaskSource
            .daily_tasks(Weekday::Mon, &LearnerProfile::default())
            .expect("static source never fails");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].category, TaskCategory::Research);
        assert_eq!(tasks[1].category, TaskCategory::Coding);
        assert_eq!(tasks[2].category, TaskCategory::Growth);
    }

    #[test]
    fn every_weekday_has_a_strategy() {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(!weekday_strategy(weekday).is_empty());
        }
    }

    #[test]
    fn offline_bank_always_yields_a_valid_quiz() {
        for language in ["Japanese", "German", "English", "Klingon"] {
            let quiz = OfflineQuizBank.pick(language);
            quiz.validate().expect("offline bank entries are valid");
        }
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let request = QuizRequest::new("Klingon", "the lab", Vec::new());
        let quiz = OfflineQuizBank
            .generate(&request)
            .expect("offline bank never fails");
        assert!(quiz.word.is_ascii());
    }
}
