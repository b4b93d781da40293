//! In-memory log store.
//!
//! Used by tests and as the no-persistence fallback when neither a
//! remote sheet nor a writable data directory is available. Clones share
//! one underlying store, so a caller can keep a handle for inspection
//! while the engine owns another.

use crate::model::entry::{FinanceEntry, LogEntry, PaperEntry};
use crate::store::{LogStore, StoreResult};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Tables {
    logs: Vec<LogEntry>,
    finance: Vec<FinanceEntry>,
    papers: Vec<PaperEntry>,
}

/// Volatile append-only store with shared-handle semantics.
#[derive(Clone, Default)]
pub struct MemoryLogStore {
    tables: Rc<RefCell<Tables>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in the `Logs` table.
    pub fn log_count(&self) -> usize {
        self.tables.borrow().logs.len()
    }
}

impl LogStore for MemoryLogStore {
    fn read_logs(&self) -> StoreResult<Vec<LogEntry>> {
        Ok(self.tables.borrow().logs.clone())
    }

    fn append_log(&self, entry: &LogEntry) -> StoreResult<()> {
        self.tables.borrow_mut().logs.push(entry.clone());
        Ok(())
    }

    fn read_finance(&self) -> StoreResult<Vec<FinanceEntry>> {
        Ok(self.tables.borrow().finance.clone())
    }

    fn append_finance(&self, entry: &FinanceEntry) -> StoreResult<()> {
        self.tables.borrow_mut().finance.push(entry.clone());
        Ok(())
    }

    fn read_papers(&self) -> StoreResult<Vec<PaperEntry>> {
        Ok(self.tables.borrow().papers.clone())
    }

    fn append_paper(&self, entry: &PaperEntry) -> StoreResult<()> {
        self.tables.borrow_mut().papers.push(entry.clone());
        Ok(())
    }
}
