use super::ArithmeticOp;
use crate::table::TableError;

/// Errors from computing a derived column
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivedError {
    /// Source column missing, name taken, or length mismatch
    #[error(transparent)]
    Table(#[from] TableError),

    /// Division of a column by a zero constant
    #[error("Division of '{column}' by zero")]
    DivisionByZero {
        /// Column that was being divided
        column: String,
    },

    /// Column-by-column operations only support addition and subtraction
    #[error("Operator '{}' is not supported between two columns", .0.symbol())]
    UnsupportedColumnOp(ArithmeticOp),
}
