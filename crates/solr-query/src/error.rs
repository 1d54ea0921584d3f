//! Error types for query expression construction.

use thiserror::Error;

/// Which side of a range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundSide {
    /// Lower bound (`from`).
    From,
    /// Upper bound (`to`).
    To,
}

impl std::fmt::Display for BoundSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundSide::From => write!(f, "from"),
            BoundSide::To => write!(f, "to"),
        }
    }
}

/// Errors raised while constructing a query expression.
///
/// Rendering never fails; every check happens when a node is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Field name passed to `eq` was empty.
    #[error("the field is required")]
    EmptyField,

    /// A range bound was empty.
    #[error("the {side} bound is required")]
    EmptyBound {
        /// Side of the range.
        side: BoundSide,
    },

    /// A range bound cannot be represented in query syntax.
    #[error("invalid {side} bound: {value}")]
    InvalidBound {
        /// Side of the range.
        side: BoundSide,
        /// The rejected value.
        value: String,
    },

    /// A boolean combinator received fewer operands than it needs.
    #[error("{operator} requires at least two expressions, got {count}")]
    TooFewOperands {
        /// Operator name (`AND`, `OR`, `FIRST_OF`).
        operator: &'static str,
        /// Number of operands supplied.
        count: usize,
    },
}

/// Result type for query construction.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
