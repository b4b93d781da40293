//! Daily task model.

use serde::{Deserialize, Serialize};

/// Area of the learner's day a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Lab / thesis work.
    Research,
    /// Programming and quant tooling.
    Coding,
    /// Language study and other self-improvement.
    Growth,
    /// Placeholder content produced by the core itself.
    System,
}

/// Display emphasis for a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// One candidate task for the current day.
///
/// Tasks are regenerated each day and never persisted themselves; only a
/// completion is durable, as a sentinel-encoded log entry keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub category: TaskCategory,
    pub description: String,
    pub severity: Severity,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        category: TaskCategory,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            description: description.into(),
            severity,
        }
    }

    /// Degraded single task shown when no task source is reachable.
    pub fn placeholder() -> Self {
        Self::new(
            "Plan your own top task",
            TaskCategory::System,
            "Task generation is unavailable right now; pick one focus block yourself.",
            Severity::Info,
        )
    }

    /// Category label written into the completion log entry.
    pub fn category_label(&self) -> &'static str {
        match self.category {
            TaskCategory::Research => "research",
            TaskCategory::Coding => "coding",
            TaskCategory::Growth => "growth",
            TaskCategory::System => "system",
        }
    }
}
