//! Flat-file export of account statements.
//!
//! Uses the `csv` crate, so fields containing commas, quotes, or newlines
//! come out properly quoted (RFC 4180).

use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::contract::StatementEntry;
use ltp_shared::AppError;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization or I/O failure.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the underlying writer failed.
    #[error("CSV export failed: {0}")]
    Io(#[from] std::io::Error),

    /// The exported bytes were not valid UTF-8.
    #[error("CSV export produced invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// One CSV row of an exported statement.
#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    date: String,
    kind: &'static str,
    description: &'a str,
    status: &'a str,
    debit: String,
    credit: String,
    balance: String,
    alert: &'static str,
}

impl<'a> From<&'a StatementEntry> for StatementRow<'a> {
    fn from(entry: &'a StatementEntry) -> Self {
        Self {
            date: entry
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            kind: entry.kind.as_str(),
            description: &entry.description,
            status: &entry.status,
            debit: entry.debit.to_string(),
            credit: entry.credit.to_string(),
            balance: entry.balance.to_string(),
            alert: entry.alert.as_str(),
        }
    }
}

/// Writes a statement as CSV into `writer`, headers included.
///
/// # Errors
///
/// Returns [`ExportError`] when serialization or the underlying writer fails.
pub fn write_statement_csv<W: Write>(
    entries: &[StatementEntry],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for entry in entries {
        csv_writer.serialize(StatementRow::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders a statement as a CSV string.
///
/// # Errors
///
/// Returns [`ExportError`] when serialization fails.
pub fn statement_csv(entries: &[StatementEntry]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_statement_csv(entries, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
