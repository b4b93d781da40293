//! Domain model for the lab-time dashboard core.
//!
//! # Responsibility
//! - Define the canonical records shared by the store, provider and
//!   engine layers.
//! - Own the sentinel encoding that turns free-text log rows into
//!   structured completion/learning events.
//!
//! # Invariants
//! - Log entries are immutable once appended; there is no edit or delete.
//! - Tasks and quizzes are ephemeral; only their outcomes are persisted,
//!   as sentinel-encoded log entries.

pub mod entry;
pub mod quiz;
pub mod session;
pub mod task;
