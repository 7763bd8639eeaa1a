//! KORSAR text tables
//!
//! ```text
//! 3                 <- number of header lines (= number of columns)
//! Время, с
//! P1, МПа
//! T1, К
//! 0.0   15.2   560.1
//! 0.5   15.3   560.4
//! ```
//!
//! Names are kept verbatim (no homoglyph normalization).

use std::path::Path;

use log::debug;

use super::{decode_text, parse_value, resolve_encoding, Decoder, DecodeError, SourceFormat};
use crate::names::ensure_unique;
use crate::table::Table;

const FORMAT: SourceFormat = SourceFormat::Korsar;

/// Decoder for KORSAR whitespace-delimited text output
#[derive(Debug, Clone, Copy, Default)]
pub struct KorsarDecoder;

impl KorsarDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Parse already-decoded KORSAR text
    pub fn parse_str(&self, text: &str) -> Result<Table, DecodeError> {
        let mut lines = text.lines();

        let count_line = lines
            .by_ref()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| DecodeError::mismatch(FORMAT, "empty file"))?;
        let header_count: usize = count_line.trim().parse().map_err(|_| {
            DecodeError::mismatch(
                FORMAT,
                format!("first line '{}' is not a header count", count_line.trim()),
            )
        })?;
        if header_count == 0 {
            return Err(DecodeError::mismatch(FORMAT, "header count is zero"));
        }

        let mut headers = Vec::with_capacity(header_count.min(4096));
        for idx in 0..header_count {
            let line = lines.next().ok_or_else(|| {
                DecodeError::mismatch(
                    FORMAT,
                    format!("expected {header_count} header lines, found {idx}"),
                )
            })?;
            headers.push(line.trim().to_string());
        }
        ensure_unique(&headers).map_err(DecodeError::DuplicateColumns)?;

        let mut rows = Vec::new();
        for (line_no, line) in lines.enumerate() {
            let content = line.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let row = content
                .split_whitespace()
                .map(parse_value)
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| {
                    DecodeError::mismatch(
                        FORMAT,
                        format!("non-numeric value in data line {}", line_no + 1),
                    )
                })?;
            if row.len() != header_count {
                return Err(DecodeError::mismatch(
                    FORMAT,
                    format!(
                        "data line {} has {} values, expected {header_count}",
                        line_no + 1,
                        row.len()
                    ),
                ));
            }
            rows.push(row);
        }

        debug!(
            "KORSAR: {} columns, {} rows",
            headers.len(),
            rows.len()
        );
        Table::from_rows(headers, &rows).map_err(|e| DecodeError::from_table(FORMAT, e))
    }
}

impl Decoder for KorsarDecoder {
    fn format(&self) -> SourceFormat {
        FORMAT
    }

    fn try_decode(&self, path: &Path, encoding: &str) -> Result<Table, DecodeError> {
        let encoding = resolve_encoding(encoding).ok_or_else(|| {
            DecodeError::mismatch(FORMAT, format!("unknown encoding '{encoding}'"))
        })?;
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes, encoding, FORMAT)?;
        self.parse_str(&text)
    }
}
