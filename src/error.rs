//! Error type shared by the numeric containers and the network.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, NnError>;

#[derive(Error, Debug)]
pub enum NnError {
    /// Operand shapes are incompatible.
    #[error("dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },

    /// A matrix with neither dimension equal to 1 cannot be viewed as a vector.
    #[error("cannot convert a {rows}x{cols} matrix to a vector")]
    Conversion { rows: usize, cols: usize },

    /// The network was assembled or driven in an invalid order or shape.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn mismatch(op: &'static str, expected: impl ToString, found: impl ToString) -> Self {
        NnError::DimensionMismatch {
            op,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
