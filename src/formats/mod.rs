//! # Simulation output decoders
//!
//! Thermal-hydraulic codes write the same logical data (a time axis plus named
//! parameters) in three incompatible encodings. Each gets its own [`Decoder`]:
//!
//! | Decoder | Source | Layout |
//! |---------|--------|--------|
//! | [`KorsarDecoder`] | KORSAR | header-count line, one name per line, whitespace-separated rows |
//! | [`TrapCsvDecoder`] | TRAP | windows-1251, `;`-separated, two preamble lines then a header row |
//! | [`LentDecoder`] | TRAP `lent` | little-endian binary stream ended by a repeated time sample |
//!
//! None of the formats carries a magic number, so a decoder reports
//! [`DecodeError::FormatMismatch`] when the input does not look like its format
//! and the caller tries the next one. See [`crate::loader`] for the detection
//! order.
//!
//! Every decoder reads its file completely inside `try_decode`; file handles
//! are scoped to the call and released on every exit path.

mod error;
mod korsar;
mod lent;
mod trap_csv;


use std::fmt;
use std::path::Path;

use encoding_rs::Encoding;

pub use error::DecodeError;
pub use korsar::KorsarDecoder;
pub use lent::{LentDecoder, LENT_NAME_WIDTH};
pub use trap_csv::{TrapCsvDecoder, TRAP_CSV_DELIMITER, TRAP_CSV_PREAMBLE_LINES};

use crate::table::Table;

/// The on-disk encodings this crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// KORSAR whitespace-delimited text table
    Korsar,
    /// TRAP semicolon-delimited export
    TrapCsv,
    /// TRAP `lent` binary stream
    Lent,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Korsar => "KORSAR text",
            SourceFormat::TrapCsv => "TRAP csv",
            SourceFormat::Lent => "LENT binary",
        };
        f.write_str(name)
    }
}

/// A strategy that attempts to parse one on-disk format
///
/// Implementations must not leave partial state behind: they either return a
/// complete [`Table`] or an error.
pub trait Decoder: Send + Sync {
    /// Format this decoder recognizes
    fn format(&self) -> SourceFormat;

    /// Decode `path`, using `encoding` for decoders whose text encoding is
    /// caller-supplied (fixed-encoding decoders ignore it)
    fn try_decode(&self, path: &Path, encoding: &str) -> Result<Table, DecodeError>;
}

/// Resolve an encoding label (`"utf-8"`, `"cp1251"`, `"windows-1251"`, ...)
pub fn resolve_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Decode file bytes as text, rejecting malformed sequences and binary content
pub(crate) fn decode_text(
    bytes: &[u8],
    encoding: &'static Encoding,
    format: SourceFormat,
) -> Result<String, DecodeError> {
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| {
            DecodeError::mismatch(format, format!("invalid {} byte sequence", encoding.name()))
        })?;

    if text.contains('\0') {
        return Err(DecodeError::mismatch(format, "binary content"));
    }

    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(text.to_string())
}

/// Parse one numeric cell the way the simulation codes print them
pub(crate) fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}
