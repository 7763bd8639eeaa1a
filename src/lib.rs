//! # hydrotrace - thermal-hydraulic simulation output
//!
//! `hydrotrace` reads the time-series output of thermal-hydraulic system codes
//! into a common [`Table`](table::Table), and rebuilds derived columns from the
//! formula tags saved with a plotting session.
//!
//! ## Supported formats
//!
//! - **KORSAR**: text table with a header-count line and one name per line
//! - **TRAP csv**: windows-1251, `;`-delimited, header on the third line
//! - **TRAP lent**: little-endian binary stream terminated by a repeated
//!   time sample
//!
//! None of them is self-describing; [`loader::FormatDetectingLoader`] tries
//! them in a fixed order and keeps the first success.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hydrotrace::formula::replay_formulas;
//! use hydrotrace::loader::{FormatDetectingLoader, LoaderConfig};
//!
//! let loader = FormatDetectingLoader::new(LoaderConfig::default());
//! let mut loaded = loader.load("lent3")?;
//!
//! let report = replay_formulas(
//!     &mut loaded.table,
//!     ["$Integral(G1, кг/с)$", "$(Р1, МПа)*(10.0)$"],
//! );
//! println!(
//!     "{} columns, {} tags skipped",
//!     loaded.table.column_count(),
//!     report.skipped.len()
//! );
//! # Ok::<(), hydrotrace::formats::DecodeError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`table`]: the in-memory table and the built-in default data set
//! - [`names`]: homoglyph normalization and duplicate detection for headers
//! - [`formats`]: one [`Decoder`](formats::Decoder) per on-disk format
//! - [`loader`]: format detection and the fallback policy
//! - [`derived`]: derived-column arithmetic, integral and constant series
//! - [`formula`]: formula tag parsing and session replay
//!
//! All operations are synchronous. Decoders hold no shared state, so
//! separate files may be decoded on separate threads.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod derived;
pub mod formats;
pub mod formula;
pub mod loader;
pub mod names;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::derived::{ArithmeticOp, DerivedError, Formula};
    pub use crate::formats::{
        DecodeError, Decoder, KorsarDecoder, LentDecoder, SourceFormat, TrapCsvDecoder,
    };
    pub use crate::formula::{parse_tag, replay_formulas, FormulaError, ReplayReport};
    pub use crate::loader::{
        load_table, FallbackPolicy, FormatDetectingLoader, LoadedTable, LoaderConfig, TableOrigin,
    };
    pub use crate::names::{normalize_name, TRAP_DEFAULT_PARAMETERS};
    pub use crate::table::{Column, Table, TableError};
}
