//! JSON payload decoding for generative providers.
//!
//! # Responsibility
//! - Decode the wire shapes a generative backend returns for quizzes and
//!   daily task lists into validated domain types.
//! - Map every decode or validation failure to
//!   `ProviderError::Malformed`.

use crate::model::quiz::Quiz;
use crate::model::task::{Severity, Task, TaskCategory};
use crate::provider::{ProviderError, ProviderResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QuizPayload {
    word: String,
    #[serde(default)]
    reading: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    example: String,
    #[serde(default)]
    example_meaning: String,
    quiz_question: String,
    options: Vec<String>,
    answer_index: usize,
}

/// Decodes one quiz question from provider JSON.
pub fn decode_quiz(json: &str) -> ProviderResult<Quiz> {
    let payload: QuizPayload =
        serde_json::from_str(json).map_err(|err| ProviderError::Malformed(err.to_string()))?;
    let quiz = Quiz {
        word: payload.word,
        reading: payload.reading,
        meaning: payload.meaning,
        example: payload.example,
        example_translation: payload.example_meaning,
        question: payload.quiz_question,
        options: payload.options,
        answer_index: payload.answer_index,
    };
    quiz.validate()
        .map_err(|err| ProviderError::Malformed(err.to_string()))?;
    Ok(quiz)
}

#[derive(Debug, Deserialize)]
struct TaskPayload {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    style: String,
}

/// Decodes a daily task list from provider JSON, capped at three tasks.
pub fn decode_tasks(json: &str) -> ProviderResult<Vec<Task>> {
    let payloads: Vec<TaskPayload> =
        serde_json::from_str(json).map_err(|err| ProviderError::Malformed(err.to_string()))?;
    if payloads.is_empty() {
        return Err(ProviderError::Malformed("empty task list".to_string()));
    }
    Ok(payloads
        .into_iter()
        .take(3)
        .map(|payload| {
            Task::new(
                payload.name,
                parse_category(&payload.kind),
                payload.desc,
                parse_severity(&payload.style),
            )
        })
        .collect())
}

fn parse_category(value: &str) -> TaskCategory {
    let value = value.to_ascii_lowercase();
    if value.contains("research") {
        TaskCategory::Research
    } else if value.contains("cod") || value.contains("program") {
        TaskCategory::Coding
    } else if value.contains("growth") || value.contains("learn") {
        TaskCategory::Growth
    } else {
        TaskCategory::System
    }
}

fn parse_severity(value: &str) -> Severity {
    match value.to_ascii_lowercase().as_str() {
        "success" => Severity::Success,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_quiz, decode_tasks};
    use crate::model::task::{Severity, TaskCategory};
    use crate::provider::ProviderError;

    #[test]
    fn well_formed_quiz_payload_decodes() {
        let json = r#"{
            "word": "研究",
            "reading": "けんきゅう",
            "meaning": "research",
            "example": "研究を続ける。",
            "example_meaning": "Continue the research.",
            "quiz_question": "What does 研究 mean?",
            "options": ["research", "holiday", "kitchen", "weather"],
            "answer_index": 0
        }"#;
        let quiz = decode_quiz(json).expect("payload should decode");
        assert_eq!(quiz.word, "研究");
        assert_eq!(quiz.example_translation, "Continue the research.");
        assert_eq!(quiz.correct_option(), "research");
    }

    #[test]
    fn quiz_with_bad_answer_index_is_malformed() {
        let json = r#"{
            "word": "w",
            "quiz_question": "q",
            "options": ["a", "b", "c", "d"],
            "answer_index": 9
        }"#;
        assert!(matches!(
            decode_quiz(json),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn non_json_quiz_is_malformed() {
        assert!(matches!(
            decode_quiz("sorry, I cannot help with that"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn task_list_decodes_and_caps_at_three() {
        let json = r#"[
            {"name": "Read two papers", "type": "research", "desc": "d1", "style": "info"},
            {"name": "Backtest tweak", "type": "coding", "desc": "d2", "style": "success"},
            {"name": "Kanji review", "type": "growth", "desc": "d3", "style": "warning"},
            {"name": "Extra", "type": "growth", "desc": "d4", "style": "info"}
        ]"#;
        let tasks = decode_tasks(json).expect("payload should decode");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].category, TaskCategory::Research);
        assert_eq!(tasks[1].severity, Severity::Success);
        assert_eq!(tasks[2].category, TaskCategory::Growth);
    }

    #[test]
    fn empty_task_list_is_malformed() {
        assert!(matches!(
            decode_tasks("[]"),
            Err(ProviderError::Malformed(_))
        ));
    }
}
