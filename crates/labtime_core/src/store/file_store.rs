//! Flat-file log store.
//!
//! # Responsibility
//! - Persist the three dashboard tables as tab-delimited files under one
//!   data directory.
//! - Write each file's header exactly once, on first creation.
//!
//! # Invariants
//! - Files are opened append-only; rows are never rewritten.
//! - A missing file reads as an empty table.
//! - Malformed body rows are skipped with a warning instead of failing
//!   the whole read.

use crate::model::entry::{FinanceEntry, LogEntry, PaperEntry};
use crate::store::{table, LogStore, StoreError, StoreResult};
use chrono::{NaiveDate, NaiveTime};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const LOGS_HEADER: &str = "date\ttime\tcategory\tinput\toutput";
const FINANCE_HEADER: &str = "date\tamount\tnote";
const PAPERS_HEADER: &str = "date\ttitle\tauthors\tsummary\tlink";

/// Tab-delimited on-disk store, the fallback when no remote sheet is
/// configured.
pub struct FileLogStore {
    data_dir: PathBuf,
}

impl FileLogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.tsv"))
    }

    fn read_rows<T>(
        &self,
        name: &'static str,
        parse: impl Fn(&[&str]) -> Option<T>,
    ) -> StoreResult<Vec<T>> {
        let path = self.table_path(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Io {
                    table: name,
                    source: err,
                })
            }
        };

        let mut rows = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|err| StoreError::Io {
                table: name,
                source: err,
            })?;
            // Row 0 is the header written at creation.
            if index == 0 || line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            match parse(&fields) {
                Some(row) => rows.push(row),
                None => warn!(
                    "event=row_skipped module=store status=degraded table={name} line={}",
                    index + 1
                ),
            }
        }
        Ok(rows)
    }

    fn append_row(&self, name: &'static str, header: &str, row: &str) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            table: name,
            source,
        };

        std::fs::create_dir_all(&self.data_dir).map_err(io_err)?;
        let path = self.table_path(name);
        let is_new = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;
        if is_new {
            writeln!(file, "{header}").map_err(io_err)?;
        }
        writeln!(file, "{row}").map_err(io_err)
    }
}

impl LogStore for FileLogStore {
    fn read_logs(&self) -> StoreResult<Vec<LogEntry>> {
        self.read_rows(table::LOGS, |fields| match fields {
            [date, time, category, input, output] => Some(LogEntry {
                date: parse_date(date)?,
                time: parse_time(time)?,
                category: (*category).to_string(),
                input: (*input).to_string(),
                output: (*output).to_string(),
            }),
            _ => None,
        })
    }

    fn append_log(&self, entry: &LogEntry) -> StoreResult<()> {
        let row = format!(
            "{}\t{}\t{}\t{}\t{}",
            entry.date.format(DATE_FORMAT),
            entry.time.format(TIME_FORMAT),
            sanitize(&entry.category),
            sanitize(&entry.input),
            sanitize(&entry.output),
        );
        self.append_row(table::LOGS, LOGS_HEADER, &row)
    }

    fn read_finance(&self) -> StoreResult<Vec<FinanceEntry>> {
        self.read_rows(table::FINANCE, |fields| match fields {
            [date, amount, note] => Some(FinanceEntry {
                date: parse_date(date)?,
                amount: amount.parse().ok()?,
                note: (*note).to_string(),
            }),
            _ => None,
        })
    }

    fn append_finance(&self, entry: &FinanceEntry) -> StoreResult<()> {
        let row = format!(
            "{}\t{}\t{}",
            entry.date.format(DATE_FORMAT),
            entry.amount,
            sanitize(&entry.note),
        );
        self.append_row(table::FINANCE, FINANCE_HEADER, &row)
    }

    fn read_papers(&self) -> StoreResult<Vec<PaperEntry>> {
        self.read_rows(table::PAPERS, |fields| match fields {
            [date, title, authors, summary, link] => Some(PaperEntry {
                published: parse_date(date)?,
                title: (*title).to_string(),
                authors: (*authors).to_string(),
                summary: (*summary).to_string(),
                link: (*link).to_string(),
            }),
            _ => None,
        })
    }

    fn append_paper(&self, entry: &PaperEntry) -> StoreResult<()> {
        let row = format!(
            "{}\t{}\t{}\t{}\t{}",
            entry.published.format(DATE_FORMAT),
            sanitize(&entry.title),
            sanitize(&entry.authors),
            sanitize(&entry.summary),
            sanitize(&entry.link),
        );
        self.append_row(table::PAPERS, PAPERS_HEADER, &row)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

/// Collapses delimiter and newline characters so free text cannot break
/// the row format.
fn sanitize(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
