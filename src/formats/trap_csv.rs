//! TRAP semicolon-delimited export
//!
//! Two free-form preamble lines, a header row, then numeric rows, all in
//! windows-1251. The first [`TRAP_DEFAULT_PARAMETERS`] header names are the
//! code's built-in parameters and get homoglyph normalization.
//!
//! Decoding is two-pass: the header row is read and validated first, then the
//! file is read again and the body bound to the normalized names.

use std::path::Path;

use encoding_rs::WINDOWS_1251;
use log::debug;

use super::{decode_text, parse_value, Decoder, DecodeError, SourceFormat};
use crate::names::{ensure_unique, normalize_leading, TRAP_DEFAULT_PARAMETERS};
use crate::table::Table;

/// Field delimiter of TRAP csv output
pub const TRAP_CSV_DELIMITER: u8 = b';';

/// Lines before the header row
pub const TRAP_CSV_PREAMBLE_LINES: usize = 2;

const FORMAT: SourceFormat = SourceFormat::TrapCsv;

/// Decoder for TRAP `.csv` output
#[derive(Debug, Clone, Copy, Default)]
pub struct TrapCsvDecoder;

impl TrapCsvDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// First pass: the header row, trimmed and normalized
    pub fn read_header(&self, path: &Path) -> Result<Vec<String>, DecodeError> {
        let text = read_text(path)?;
        let raw = parse_header(&text)?;
        Ok(normalize_leading(&raw, TRAP_DEFAULT_PARAMETERS))
    }

    /// Second pass: the numeric body bound to `names`
    pub fn read_body(&self, path: &Path, names: Vec<String>) -> Result<Table, DecodeError> {
        let text = read_text(path)?;
        parse_body(&text, names)
    }

    /// Decode already-decoded text (both passes over the same string)
    pub fn parse_str(&self, text: &str) -> Result<Table, DecodeError> {
        let names = normalize_leading(&parse_header(text)?, TRAP_DEFAULT_PARAMETERS);
        ensure_unique(&names).map_err(DecodeError::DuplicateColumns)?;
        parse_body(text, names)
    }
}

impl Decoder for TrapCsvDecoder {
    fn format(&self) -> SourceFormat {
        FORMAT
    }

    fn try_decode(&self, path: &Path, _encoding: &str) -> Result<Table, DecodeError> {
        let names = self.read_header(path)?;
        ensure_unique(&names).map_err(DecodeError::DuplicateColumns)?;
        self.read_body(path, names)
    }
}

fn read_text(path: &Path) -> Result<String, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_text(&bytes, WINDOWS_1251, FORMAT)
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(TRAP_CSV_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
}

fn parse_header(text: &str) -> Result<Vec<String>, DecodeError> {
    let mut reader = csv_reader(text);
    let record = reader
        .records()
        .nth(TRAP_CSV_PREAMBLE_LINES)
        .ok_or_else(|| DecodeError::mismatch(FORMAT, "no header row"))?
        .map_err(|e| DecodeError::mismatch(FORMAT, e.to_string()))?;

    // A single-field header means the line had no delimiter at all.
    if record.len() < 2 {
        return Err(DecodeError::mismatch(FORMAT, "header row is not ';'-delimited"));
    }

    Ok(record
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name.to_string()
            }
        })
        .collect())
}

fn parse_body(text: &str, names: Vec<String>) -> Result<Table, DecodeError> {
    let mut reader = csv_reader(text);
    let mut rows = Vec::new();

    for (row_no, record) in reader
        .records()
        .skip(TRAP_CSV_PREAMBLE_LINES + 1)
        .enumerate()
    {
        let record = record.map_err(|e| DecodeError::mismatch(FORMAT, e.to_string()))?;
        if record.len() != names.len() {
            return Err(DecodeError::mismatch(
                FORMAT,
                format!(
                    "row {} has {} fields, expected {}",
                    row_no + 1,
                    record.len(),
                    names.len()
                ),
            ));
        }

        let row = record
            .iter()
            .map(|cell| {
                if cell.trim().is_empty() {
                    Some(f64::NAN)
                } else {
                    parse_value(cell)
                }
            })
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| {
                DecodeError::mismatch(FORMAT, format!("non-numeric cell in row {}", row_no + 1))
            })?;
        rows.push(row);
    }

    debug!("TRAP csv: {} columns, {} rows", names.len(), rows.len());
    Table::from_rows(names, &rows).map_err(|e| DecodeError::from_table(FORMAT, e))
}
