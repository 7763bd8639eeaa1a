//! # Formula replay
//!
//! Derived columns are saved by name only; the name is the formula tag. When a
//! session is reopened, the saved tags are parsed back into [`Formula`]s and
//! re-evaluated against the freshly loaded table.
//!
//! Tags are matched against three patterns, in order:
//!
//! 1. `$(A)<op>(B)$` with `<op>` one of `+ - * /`. `B` is tried as a number
//!    first and otherwise taken as a column name. Either operand may itself
//!    be a tag.
//! 2. `$Integral(A)$`
//! 3. `$Horizontal(C)$`
//!
//! Replay is best effort: a tag that does not parse or cannot be evaluated is
//! logged and skipped, and the remaining tags are still replayed. Old sessions
//! may carry hand-edited or stale tags.

mod error;
mod replay;


use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

pub use error::FormulaError;
pub use replay::{replay_formulas, ReplayReport, SkippedTag};

use crate::derived::{ArithmeticOp, Formula};

static INTEGRAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$Integral\((?P<column>.+)\)\$$").expect("integral tag pattern is valid")
});

static HORIZONTAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$Horizontal\((?P<value>.+)\)\$$").expect("horizontal tag pattern is valid")
});

/// Parse a formula tag back into a [`Formula`]
///
/// A binary tag is split at the `)<op>(` that leaves both operands with
/// balanced parentheses, so a derived column nested on either side
/// (`$($(G)+(1.0)$)*(2.0)$`, `$(G)+($(G)*(2.0)$)$`) keeps its own tag as the
/// operand. Operands with unbalanced parentheses fall back to the last
/// `)<op>(` in the tag.
pub fn parse_tag(tag: &str) -> Result<Formula, FormulaError> {
    if let Some((lhs, symbol, rhs)) = split_binary(tag) {
        let op = ArithmeticOp::from_symbol(symbol).ok_or_else(|| {
            FormulaError::UnsupportedOperator {
                tag: tag.to_string(),
                op: symbol.to_string(),
            }
        })?;

        if let Ok(value) = rhs.trim().parse::<f64>() {
            return Ok(Formula::Constant {
                column: lhs.to_string(),
                op,
                value,
            });
        }
        if !matches!(op, ArithmeticOp::Add | ArithmeticOp::Subtract) {
            return Err(FormulaError::UnsupportedOperator {
                tag: tag.to_string(),
                op: op.to_string(),
            });
        }
        return Ok(Formula::Columns {
            left: lhs.to_string(),
            op,
            right: rhs.to_string(),
        });
    }

    if let Some(caps) = INTEGRAL_TAG.captures(tag) {
        return Ok(Formula::Integral {
            column: caps["column"].to_string(),
        });
    }

    if let Some(caps) = HORIZONTAL_TAG.captures(tag) {
        if let Ok(value) = caps["value"].trim().parse::<f64>() {
            return Ok(Formula::Horizontal { value });
        }
    }

    Err(FormulaError::UnrecognizedTag(tag.to_string()))
}

/// Split `$(A)<op>(B)$` into `(A, op, B)`
fn split_binary(tag: &str) -> Option<(&str, char, &str)> {
    let body = tag.strip_prefix("$(")?.strip_suffix(")$")?;
    let bytes = body.as_bytes();

    // `)`, the operator and `(` are ASCII, so byte offsets are char boundaries.
    let splits: Vec<usize> = (0..bytes.len().saturating_sub(2))
        .filter(|&i| {
            bytes[i] == b')'
                && matches!(bytes[i + 1], b'+' | b'-' | b'*' | b'/')
                && bytes[i + 2] == b'('
        })
        .collect();

    let at = splits
        .iter()
        .copied()
        .find(|&i| is_balanced(&body[..i]) && is_balanced(&body[i + 3..]))
        .or_else(|| splits.last().copied())?;

    let lhs = &body[..at];
    let rhs = &body[at + 3..];
    if lhs.is_empty() || rhs.is_empty() {
        return None;
    }
    Some((lhs, char::from(bytes[at + 1]), rhs))
}

fn is_balanced(operand: &str) -> bool {
    let mut depth = 0usize;
    for c in operand.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// True when `name` looks like a formula tag rather than a decoded parameter
pub fn is_formula_tag(name: &str) -> bool {
    name.starts_with('$') && name.ends_with('$') && name.len() > 1
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tag(s)
    }
}
