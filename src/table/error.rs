/// Errors raised when assembling or querying a [`Table`](super::Table)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A table needs at least the time column
    #[error("Table has no columns")]
    Empty,

    /// Two or more columns share a name
    #[error("Duplicate column names: {0:?}")]
    DuplicateColumns(Vec<String>),

    /// A column does not match the table row count
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Offending column name
        column: String,
        /// Row count of the table
        expected: usize,
        /// Length of the offending column
        actual: usize,
    },

    /// A row-major record has the wrong number of fields
    #[error("Row {row} has {actual} fields, expected {expected}")]
    RowWidth {
        /// Zero-based row index
        row: usize,
        /// Number of columns
        expected: usize,
        /// Fields found in the row
        actual: usize,
    },

    /// No column with the requested name
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}
