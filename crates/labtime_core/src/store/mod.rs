//! Append-only log store contracts.
//!
//! # Responsibility
//! - Define the durable-table interface the engine reconciles against.
//! - Keep storage mechanics (flat files, remote sheets) behind one trait
//!   so the engine stays storage-agnostic.
//!
//! # Invariants
//! - All tables are append-only; implementations expose no edit/delete.
//! - Read order is insertion order.
//! - A failed read is reported, never masked; the *engine* decides to
//!   degrade it to an empty snapshot.

use crate::model::entry::{FinanceEntry, LogEntry, PaperEntry};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod file_store;
mod memory_store;

pub use file_store::FileLogStore;
pub use memory_store::MemoryLogStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer failure for reads and appends.
#[derive(Debug)]
pub enum StoreError {
    /// Store is unreachable or misconfigured.
    Unavailable(String),
    /// I/O failure against a named logical table.
    Io {
        table: &'static str,
        source: std::io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "log store unavailable: {message}"),
            Self::Io { table, source } => write!(f, "i/o failure on table `{table}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Logical table names shared by every store implementation.
pub mod table {
    pub const LOGS: &str = "logs";
    pub const FINANCE: &str = "finance";
    pub const PAPERS: &str = "papers";
}

/// Durable append-only storage for the three dashboard tables.
///
/// Implementations create a missing table (with its header, where the
/// medium has one) on first append and treat a missing table as empty on
/// read.
pub trait LogStore {
    fn read_logs(&self) -> StoreResult<Vec<LogEntry>>;
    fn append_log(&self, entry: &LogEntry) -> StoreResult<()>;

    fn read_finance(&self) -> StoreResult<Vec<FinanceEntry>>;
    fn append_finance(&self, entry: &FinanceEntry) -> StoreResult<()>;

    fn read_papers(&self) -> StoreResult<Vec<PaperEntry>>;
    fn append_paper(&self, entry: &PaperEntry) -> StoreResult<()>;
}
