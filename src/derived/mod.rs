//! # Derived columns
//!
//! Pure operations that compute a new [`Column`] from a [`Table`]. Each result
//! is named by its formula tag, which is how a derived column is persisted and
//! later rebuilt (see [`crate::formula`]):
//!
//! | Operation | Tag |
//! |-----------|-----|
//! | column +/- constant | `$(col)+(2.0)$`, `$(col)-(2.0)$` |
//! | column * or / constant | `$(col)*(2.0)$`, `$(col)/(2.0)$` |
//! | column +/- column | `$(a)+(b)$`, `$(a)-(b)$` |
//! | running time integral | `$Integral(col)$` |
//! | constant series | `$Horizontal(2.0)$` |
//!
//! Constants keep the float style saved sessions already contain (`2.0`,
//! `0.5`, `1e-05`), so a rebuilt tag is byte-identical to the stored one.

mod error;


use std::fmt;

pub use error::DerivedError;

use crate::table::{Column, Table};

/// Operators usable in constant and column formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl ArithmeticOp {
    /// Tag symbol
    pub fn symbol(self) -> char {
        match self {
            ArithmeticOp::Add => '+',
            ArithmeticOp::Subtract => '-',
            ArithmeticOp::Multiply => '*',
            ArithmeticOp::Divide => '/',
        }
    }

    /// Operator for a tag symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(ArithmeticOp::Add),
            '-' => Some(ArithmeticOp::Subtract),
            '*' => Some(ArithmeticOp::Multiply),
            '/' => Some(ArithmeticOp::Divide),
            _ => None,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            ArithmeticOp::Add => lhs + rhs,
            ArithmeticOp::Subtract => lhs - rhs,
            ArithmeticOp::Multiply => lhs * rhs,
            ArithmeticOp::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A derived-column definition; its [`tag`](Formula::tag) is the column name
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// Column combined with a scalar
    Constant {
        /// Source column
        column: String,
        /// Operator
        op: ArithmeticOp,
        /// Scalar operand
        value: f64,
    },
    /// Two columns combined element-wise (`+` or `-`)
    Columns {
        /// Left operand
        left: String,
        /// Operator
        op: ArithmeticOp,
        /// Right operand
        right: String,
    },
    /// Running trapezoidal integral over the time column
    Integral {
        /// Integrand
        column: String,
    },
    /// Constant series spanning the table
    Horizontal {
        /// Series value
        value: f64,
    },
}

impl Formula {
    /// The formula tag, used as the derived column's name
    pub fn tag(&self) -> String {
        match self {
            Formula::Constant { column, op, value } => {
                format!("$({column}){op}({})$", format_constant(*value))
            }
            Formula::Columns { left, op, right } => format!("$({left}){op}({right})$"),
            Formula::Integral { column } => format!("$Integral({column})$"),
            Formula::Horizontal { value } => format!("$Horizontal({})$", format_constant(*value)),
        }
    }

    /// Compute the column against `table`
    pub fn evaluate(&self, table: &Table) -> Result<Column, DerivedError> {
        let values = match self {
            Formula::Constant { column, op, value } => {
                constant_values(table, column, *op, *value)?
            }
            Formula::Columns { left, op, right } => column_values(table, left, *op, right)?,
            Formula::Integral { column } => {
                let integrand = table.require(column)?;
                cumulative_trapezoid(&table.time().values, &integrand.values)
            }
            Formula::Horizontal { value } => vec![*value; table.row_count()],
        };
        Ok(Column::new(self.tag(), values))
    }

    /// Compute the column and append it to `table`
    pub fn apply_to(&self, table: &mut Table) -> Result<(), DerivedError> {
        let column = self.evaluate(table)?;
        table.push_column(column)?;
        Ok(())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

/// `column + value`, named `$(column)+(value)$`
pub fn add_constant(table: &Table, column: &str, value: f64) -> Result<Column, DerivedError> {
    constant_formula(column, ArithmeticOp::Add, value).evaluate(table)
}

/// `column - value`, named `$(column)-(value)$`
pub fn subtract_constant(table: &Table, column: &str, value: f64) -> Result<Column, DerivedError> {
    constant_formula(column, ArithmeticOp::Subtract, value).evaluate(table)
}

/// `column * value`, named `$(column)*(value)$`
pub fn multiply_constant(table: &Table, column: &str, value: f64) -> Result<Column, DerivedError> {
    constant_formula(column, ArithmeticOp::Multiply, value).evaluate(table)
}

/// `column / value`, named `$(column)/(value)$`
///
/// Fails with [`DerivedError::DivisionByZero`] rather than filling the
/// column with infinities.
pub fn divide_constant(table: &Table, column: &str, value: f64) -> Result<Column, DerivedError> {
    constant_formula(column, ArithmeticOp::Divide, value).evaluate(table)
}

/// `left + right` element-wise, named `$(left)+(right)$`
pub fn add_columns(table: &Table, left: &str, right: &str) -> Result<Column, DerivedError> {
    columns_formula(left, ArithmeticOp::Add, right).evaluate(table)
}

/// `left - right` element-wise, named `$(left)-(right)$`
pub fn subtract_columns(table: &Table, left: &str, right: &str) -> Result<Column, DerivedError> {
    columns_formula(left, ArithmeticOp::Subtract, right).evaluate(table)
}

/// Running integral of `column` over the time axis, named `$Integral(column)$`
pub fn integral(table: &Table, column: &str) -> Result<Column, DerivedError> {
    Formula::Integral {
        column: column.to_string(),
    }
    .evaluate(table)
}

/// `value` repeated for every row, named `$Horizontal(value)$`
pub fn horizontal(table: &Table, value: f64) -> Column {
    Column::new(
        Formula::Horizontal { value }.tag(),
        vec![value; table.row_count()],
    )
}

/// Trapezoidal integral of `values` over `time` for every prefix `[0..=i]`
///
/// Row `i` holds the definite integral from the first sample up to and
/// including sample `i`; row 0 is always zero. Terms are summed left to right,
/// so each entry is bit-identical to a sequential quadrature over its prefix.
/// A quadrature that sums pairwise is mathematically equal but can differ in
/// the last few bits on long prefixes.
pub fn cumulative_trapezoid(time: &[f64], values: &[f64]) -> Vec<f64> {
    let len = time.len().min(values.len());
    let mut result = Vec::with_capacity(len);
    if len == 0 {
        return result;
    }

    let mut area = 0.0;
    result.push(area);
    for (t, y) in time[..len].windows(2).zip(values[..len].windows(2)) {
        area += (t[1] - t[0]) * (y[1] + y[0]) / 2.0;
        result.push(area);
    }
    result
}

/// Print a constant the way formula tags have always carried it
///
/// Integral values keep a trailing `.0`; magnitudes below `1e-4` or from
/// `1e16` up use a signed, two-digit exponent (`1e-05`, `2.5e+16`).
pub fn format_constant(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let repr = format!("{value:e}");
        return match repr.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => repr,
        };
    }

    let repr = value.to_string();
    if repr.contains('.') {
        repr
    } else {
        format!("{repr}.0")
    }
}

fn constant_formula(column: &str, op: ArithmeticOp, value: f64) -> Formula {
    Formula::Constant {
        column: column.to_string(),
        op,
        value,
    }
}

fn columns_formula(left: &str, op: ArithmeticOp, right: &str) -> Formula {
    Formula::Columns {
        left: left.to_string(),
        op,
        right: right.to_string(),
    }
}

fn constant_values(
    table: &Table,
    column: &str,
    op: ArithmeticOp,
    value: f64,
) -> Result<Vec<f64>, DerivedError> {
    let source = table.require(column)?;
    if op == ArithmeticOp::Divide && value == 0.0 {
        return Err(DerivedError::DivisionByZero {
            column: column.to_string(),
        });
    }
    Ok(source.values.iter().map(|&v| op.apply(v, value)).collect())
}

fn column_values(
    table: &Table,
    left: &str,
    op: ArithmeticOp,
    right: &str,
) -> Result<Vec<f64>, DerivedError> {
    if !matches!(op, ArithmeticOp::Add | ArithmeticOp::Subtract) {
        return Err(DerivedError::UnsupportedColumnOp(op));
    }
    let lhs = table.require(left)?;
    let rhs = table.require(right)?;
    Ok(lhs
        .values
        .iter()
        .zip(&rhs.values)
        .map(|(&a, &b)| op.apply(a, b))
        .collect())
}
