use std::path::PathBuf;

use super::SourceFormat;
use crate::table::TableError;

/// Errors that can occur while decoding a simulation output file
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The file is not in this decoder's format (or is too damaged to tell)
    ///
    /// Recoverable: the loader moves on to the next decoder.
    #[error("Not a {format} file: {reason}")]
    FormatMismatch {
        /// Decoder that rejected the file
        format: SourceFormat,
        /// What did not match, for diagnostics
        reason: String,
    },

    /// Normalized column names repeat; never masked by trying another decoder
    #[error("Data set contains duplicate parameters: {0:?}")]
    DuplicateColumns(Vec<String>),

    /// File missing or unreadable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LENT header decoded but the record stream is truncated or inconsistent
    #[error("Malformed LENT stream: {0}")]
    MalformedBinaryStream(String),

    /// No decoder recognized the file (strict loading only)
    #[error("Unrecognized file format: {}", .0.display())]
    UnrecognizedFormat(PathBuf),
}

impl DecodeError {
    pub(crate) fn mismatch(format: SourceFormat, reason: impl Into<String>) -> Self {
        Self::FormatMismatch {
            format,
            reason: reason.into(),
        }
    }

    /// True for the recoverable "try the next decoder" case
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::FormatMismatch { .. })
    }

    /// Map a table assembly failure onto the decode taxonomy
    pub(crate) fn from_table(format: SourceFormat, error: TableError) -> Self {
        match error {
            TableError::DuplicateColumns(names) => Self::DuplicateColumns(names),
            other => Self::mismatch(format, other.to_string()),
        }
    }
}
