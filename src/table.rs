//! Reading and writing whole CSV tables.
//!
//! Both the user table and the ledger are small flat files that are read in
//! full on every request and rewritten in full on every change.

use std::{borrow::Cow, fs, io::ErrorKind, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use encoding_rs::SHIFT_JIS;
use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// Read every row of the CSV file at `path`.
///
/// A file that does not exist, or that is empty, is an empty table. Files
/// that are not valid UTF-8 are decoded as Shift_JIS (code page 932).
///
/// Rows with fewer cells than the header are padded with empty cells and
/// cells past the last header are dropped. A row that still cannot be
/// deserialized by column name is read by position instead, and skipped with
/// a warning if that fails too.
///
/// # Errors
///
/// Returns [Error::Io] if the file exists but cannot be read, and
/// [Error::InvalidCSV] if the header row itself cannot be parsed.
pub(crate) fn read_table<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, Error> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} does not exist, using an empty table", path.display());
            return Ok(Vec::new());
        }
        Err(error) => return Err(error.into()),
    };

    let text = decode_text(&bytes, path);

    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => fit_to_header(record, headers.len()),
            Err(error) => {
                tracing::warn!("Skipping row {} of {}: {error}", index + 1, path.display());
                continue;
            }
        };

        match record
            .deserialize(Some(&headers))
            .or_else(|_| record.deserialize(None))
        {
            Ok(row) => rows.push(row),
            Err(error) => {
                tracing::warn!("Skipping row {} of {}: {error}", index + 1, path.display());
            }
        }
    }

    Ok(rows)
}

fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        tracing::warn!(
            "{} is neither UTF-8 nor Shift_JIS, unreadable characters were replaced",
            path.display()
        );
    }

    text
}

fn fit_to_header(mut record: StringRecord, width: usize) -> StringRecord {
    while record.len() < width {
        record.push_field("");
    }
    record.truncate(width);

    record
}

/// Overwrite the CSV file at `path` with `columns` as the header followed by `rows`.
///
/// The header is written even when `rows` is empty.
///
/// # Errors
///
/// Returns [Error::Io] if the file cannot be written.
pub(crate) fn write_table<R: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[R],
) -> Result<(), Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;

    writer.write_record(columns)?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}
