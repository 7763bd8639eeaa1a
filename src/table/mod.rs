//! # Time-series tables
//!
//! A [`Table`] is the in-memory result of decoding one simulation output file:
//! an ordered list of named [`Column`]s sharing one row count, where column 0
//! is always the time axis.
//!
//! Row order is read order and carries physical meaning, so tables are never
//! sorted or reindexed. Column names are unique.

mod error;


pub use error::TableError;

use crate::names::find_duplicates;

/// Name of the time column in the built-in default table
pub const DEFAULT_TIME_COLUMN: &str = "Время, с";

/// Name of the parameter column in the built-in default table
pub const DEFAULT_PARAMETER_COLUMN: &str = "Параметр, кг";

/// Row count of the built-in default table
pub const DEFAULT_ROW_COUNT: usize = 100;

/// A named series of double-precision values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Display name (for derived columns this is the formula tag)
    pub name: String,
    /// Values in row order
    pub values: Vec<f64>,
}

impl Column {
    /// Create a column from a name and its values
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the column holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered set of equally long, uniquely named columns; column 0 is time
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table, checking that names are unique and lengths agree
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let first = columns.first().ok_or(TableError::Empty)?;
        let expected = first.len();

        let duplicates = find_duplicates(columns.iter().map(|c| c.name.as_str()));
        if !duplicates.is_empty() {
            return Err(TableError::DuplicateColumns(duplicates));
        }

        if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
            return Err(TableError::LengthMismatch {
                column: bad.name.clone(),
                expected,
                actual: bad.len(),
            });
        }

        Ok(Self { columns })
    }

    /// Build a table from column names and row-major data
    ///
    /// Every row must hold exactly one value per name.
    pub fn from_rows(names: Vec<String>, rows: &[Vec<f64>]) -> Result<Self, TableError> {
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidth {
                    row: index,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(*value);
            }
        }

        Self::new(columns)
    }

    /// The synthetic series shown when nothing could be loaded
    pub fn default_series() -> Self {
        let ramp: Vec<f64> = (0..DEFAULT_ROW_COUNT).map(|i| i as f64).collect();
        Self {
            columns: vec![
                Column::new(DEFAULT_TIME_COLUMN, ramp.clone()),
                Column::new(DEFAULT_PARAMETER_COLUMN, ramp),
            ],
        }
    }

    /// Number of rows shared by every column
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns, time included
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The time axis (column 0)
    pub fn time(&self) -> &Column {
        // `new` rejects empty tables, so index 0 always exists.
        &self.columns[0]
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column by name, failing with [`TableError::ColumnNotFound`]
    pub fn require(&self, name: &str) -> Result<&Column, TableError> {
        self.column(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// True when a column with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Append a column in place
    ///
    /// The table is left untouched if the name is taken or the length differs.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.contains(&column.name) {
            return Err(TableError::DuplicateColumns(vec![column.name]));
        }
        if column.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                expected: self.row_count(),
                actual: column.len(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Values of row `index` across all columns
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index]).collect())
    }
}
