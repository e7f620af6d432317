//! Fact log: append-only CSV record store, one file per log category.
//!
//! The file is created lazily on the first successful append, with a UTF-8
//! BOM and a header row so spreadsheet tools render non-ASCII text
//! correctly. Every later append adds exactly one data row; nothing is ever
//! rewritten or deleted here. Single-writer assumption: no file locking, so
//! concurrent writers from another process can interleave rows.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// UTF-8 byte-order mark. Excel needs it to pick the right encoding.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

const TIMESTAMP_COLUMN: &str = "timestamp";
const CASE_ID_COLUMN: &str = "case_id";
/// Trailing column holding the caller's opaque text blob.
const RAW_FACTS_COLUMN: &str = "raw_facts";

/// Timestamp format written into every row.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create log directory {}: {source}", path.display())]
    StorageInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "could not write to log file {}: {source} (check whether the file is open in another program)",
        path.display()
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log file {} has columns [{found}] but this append supplies [{expected}]", path.display())]
    SchemaMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("metadata field name {name:?} is reserved or duplicated")]
    InvalidField { name: String },
}

/// Receipt for one durably appended record.
#[derive(Debug, Clone, Serialize)]
pub struct AppendReceipt {
    pub case_id: String,
    pub timestamp: String,
}

/// Append-only CSV log for one record category.
///
/// The storage directory and file name are explicit constructor inputs;
/// the store carries no ambient path state. Column order of every file is
/// `timestamp`, `case_id`, the caller's metadata fields in supplied order,
/// `raw_facts` last. The column set is fixed by the first record ever
/// written; an append supplying a different field set is rejected instead
/// of silently misaligning rows.
#[derive(Debug, Clone)]
pub struct FactLogStore {
    dir: PathBuf,
    file_name: String,
}

impl FactLogStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Creates the storage directory if it does not exist yet. Idempotent.
    /// A failure is reported to the caller and leaves the directory absent;
    /// a later append will attempt creation again.
    pub fn ensure_storage_ready(&self) -> Result<(), StoreError> {
        if self.dir.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::StorageInit {
            path: self.dir.clone(),
            source: e,
        })
    }

    /// Appends one record and returns its generated `case_id` and
    /// `timestamp`. Creates the directory and file (BOM plus header row) on
    /// first use. `raw_facts` is stored verbatim, embedded newlines
    /// included; `fields` become the middle columns in supplied order.
    pub fn append(
        &self,
        raw_facts: &str,
        fields: &[(&str, &str)],
    ) -> Result<AppendReceipt, StoreError> {
        validate_field_names(fields)?;
        self.ensure_storage_ready()?;

        let path = self.path();
        let columns = column_names(fields);
        let exists = path.exists();
        if exists {
            check_schema(&path, &columns)?;
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let case_id = short_case_id();

        let mut row: Vec<&str> = Vec::with_capacity(columns.len());
        row.push(&timestamp);
        row.push(&case_id);
        row.extend(fields.iter().map(|(_, value)| *value));
        row.push(raw_facts);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::Write {
                path: path.clone(),
                source: e,
            })?;
        if !exists {
            file.write_all(UTF8_BOM).map_err(|e| StoreError::Write {
                path: path.clone(),
                source: e,
            })?;
        }

        let mut writer = csv::Writer::from_writer(file);
        if !exists {
            writer.write_record(&columns).map_err(|e| StoreError::Write {
                path: path.clone(),
                source: csv_io_error(e),
            })?;
        }
        writer.write_record(&row).map_err(|e| StoreError::Write {
            path: path.clone(),
            source: csv_io_error(e),
        })?;
        writer.flush().map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;

        debug!(case_id = %case_id, file = %path.display(), "fact record appended");

        Ok(AppendReceipt { case_id, timestamp })
    }
}

/// First 8 hex characters of a fresh UUIDv4. Truncation admits collisions;
/// the odds are negligible at this log's volumes (documented in tests).
fn short_case_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

fn column_names(fields: &[(&str, &str)]) -> Vec<String> {
    let mut columns = Vec::with_capacity(fields.len() + 3);
    columns.push(TIMESTAMP_COLUMN.to_string());
    columns.push(CASE_ID_COLUMN.to_string());
    columns.extend(fields.iter().map(|(name, _)| (*name).to_string()));
    columns.push(RAW_FACTS_COLUMN.to_string());
    columns
}

fn validate_field_names(fields: &[(&str, &str)]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for (name, _) in fields {
        let reserved = matches!(*name, TIMESTAMP_COLUMN | CASE_ID_COLUMN | RAW_FACTS_COLUMN);
        if name.is_empty() || reserved || !seen.insert(*name) {
            return Err(StoreError::InvalidField {
                name: (*name).to_string(),
            });
        }
    }
    Ok(())
}

/// Compares the existing header row against the columns this append would
/// write. The header was fixed by the first record; a mismatch means the
/// caller's field set drifted.
fn check_schema(path: &Path, expected: &[String]) -> Result<(), StoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: csv_io_error(e),
    })?;
    let headers = reader.headers().map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: csv_io_error(e),
    })?;
    // The first header field carries the BOM when read back raw.
    let found: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    if found != expected {
        return Err(StoreError::SchemaMismatch {
            path: path.to_path_buf(),
            expected: expected.join(", "),
            found: found.join(", "),
        });
    }
    Ok(())
}

fn csv_io_error(err: csv::Error) -> std::io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::Other, format!("{other:?}")),
    }
}
