//! Domain-level errors (no external dependencies)

use std::num::ParseIntError;
use thiserror::Error;

/// Domain errors represent violations found while parsing or rendering trees.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cannot convert numeral '{numeral}' at offset {offset}")]
    NumeralConversion {
        numeral: String,
        offset: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid render style: {message}")]
    InvalidStyle { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
