use crate::derived::DerivedError;

/// Errors from parsing or replaying one formula tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The string matches none of the tag patterns
    #[error("Unrecognized formula tag: {0}")]
    UnrecognizedTag(String),

    /// A binary tag whose operator cannot be applied to its operands
    #[error("Unsupported operator '{op}' in formula tag {tag}")]
    UnsupportedOperator {
        /// The full tag
        tag: String,
        /// The operator found
        op: String,
    },

    /// The tag parsed but the column could not be rebuilt
    #[error("Cannot rebuild {tag}: {source}")]
    Derived {
        /// The full tag
        tag: String,
        /// Underlying failure
        #[source]
        source: DerivedError,
    },
}
