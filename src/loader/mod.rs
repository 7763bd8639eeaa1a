//! # Format detection
//!
//! [`FormatDetectingLoader`] runs an ordered list of [`Decoder`]s over a file
//! and keeps the first table produced:
//!
//! ```text
//! KORSAR text -> TRAP csv -> LENT binary -> fallback
//! ```
//!
//! - [`DecodeError::FormatMismatch`] moves on to the next decoder.
//! - Any other error stops detection and reaches the caller, including
//!   [`DecodeError::DuplicateColumns`] and
//!   [`DecodeError::MalformedBinaryStream`].
//! - A missing file, or one every decoder rejected, is replaced by the
//!   built-in default table under [`FallbackPolicy::UseDefault`] (logged at
//!   warn). Under [`FallbackPolicy::Strict`] it is an error.
//!
//! The binary decoder must stay last: LENT has no magic number and will read
//! arbitrary bytes as floats.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hydrotrace::loader::{FormatDetectingLoader, LoaderConfig, TableOrigin};
//!
//! let loader = FormatDetectingLoader::new(LoaderConfig::default().with_encoding("cp1251"));
//! let loaded = loader.load("res_cyclic.txt")?;
//! if let TableOrigin::Decoded(format) = loaded.origin {
//!     println!("{format}: {} rows", loaded.table.row_count());
//! }
//! # Ok::<(), hydrotrace::formats::DecodeError>(())
//! ```

mod config;

#[cfg(test)]
mod tests;

use std::path::Path;

use log::{debug, info, warn};

pub use config::{FallbackPolicy, LoaderConfig, DEFAULT_ENCODING};

use crate::formats::{
    DecodeError, Decoder, KorsarDecoder, LentDecoder, SourceFormat, TrapCsvDecoder,
};
use crate::table::Table;

/// Where a loaded table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOrigin {
    /// Decoded from the file in this format
    Decoded(SourceFormat),
    /// Built-in default table, substituted because loading failed
    Default {
        /// Why the file could not be used
        reason: String,
    },
}

/// A table together with its origin
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// The table
    pub table: Table,
    /// How it was obtained
    pub origin: TableOrigin,
}

impl LoadedTable {
    /// True when the built-in default table was substituted
    pub fn is_default(&self) -> bool {
        matches!(self.origin, TableOrigin::Default { .. })
    }
}

/// Tries decoders in a fixed priority order
pub struct FormatDetectingLoader {
    decoders: Vec<Box<dyn Decoder>>,
    config: LoaderConfig,
}

impl FormatDetectingLoader {
    /// Loader with the standard decoder order (text, delimited, binary)
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_decoders(standard_decoders(), config)
    }

    /// Loader with a caller-supplied decoder order
    pub fn with_decoders(decoders: Vec<Box<dyn Decoder>>, config: LoaderConfig) -> Self {
        Self { decoders, config }
    }

    /// Detection order
    pub fn decoder_formats(&self) -> Vec<SourceFormat> {
        self.decoders.iter().map(|d| d.format()).collect()
    }

    /// Active settings
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load `path`, applying the configured fallback policy
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedTable, DecodeError> {
        let path = path.as_ref();
        match self.detect(path) {
            Ok((table, format)) => Ok(LoadedTable {
                table,
                origin: TableOrigin::Decoded(format),
            }),
            Err(err)
                if self.config.fallback == FallbackPolicy::UseDefault
                    && is_unavailable(&err) =>
            {
                warn!(
                    "Could not load {}: {err}; using the default data set",
                    path.display()
                );
                Ok(LoadedTable {
                    table: Table::default_series(),
                    origin: TableOrigin::Default {
                        reason: err.to_string(),
                    },
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Run the decoders without any fallback
    ///
    /// Returns [`DecodeError::UnrecognizedFormat`] when every decoder reports a
    /// format mismatch.
    pub fn detect(&self, path: &Path) -> Result<(Table, SourceFormat), DecodeError> {
        if !path.exists() {
            return Err(DecodeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        info!("Loading data from {}", path.display());
        for decoder in &self.decoders {
            match decoder.try_decode(path, &self.config.encoding) {
                Ok(table) => {
                    info!(
                        "Loaded {} as {}: {} columns, {} rows",
                        path.display(),
                        decoder.format(),
                        table.column_count(),
                        table.row_count()
                    );
                    return Ok((table, decoder.format()));
                }
                Err(err) if err.is_format_mismatch() => {
                    debug!("{err}");
                }
                Err(err) => return Err(err),
            }
        }

        Err(DecodeError::UnrecognizedFormat(path.to_path_buf()))
    }
}

/// Nothing to show: the file is missing or no decoder recognized it
fn is_unavailable(err: &DecodeError) -> bool {
    match err {
        DecodeError::UnrecognizedFormat(_) => true,
        DecodeError::Io(io) => io.kind() == std::io::ErrorKind::NotFound,
        _ => false,
    }
}

impl Default for FormatDetectingLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

/// The standard detection order
pub fn standard_decoders() -> Vec<Box<dyn Decoder>> {
    vec![
        Box::new(KorsarDecoder::new()),
        Box::new(TrapCsvDecoder::new()),
        Box::new(LentDecoder::new()),
    ]
}

/// Load a file with the standard decoders and the default fallback policy
pub fn load_table(path: impl AsRef<Path>, encoding: &str) -> Result<LoadedTable, DecodeError> {
    FormatDetectingLoader::new(LoaderConfig::default().with_encoding(encoding)).load(path)
}
