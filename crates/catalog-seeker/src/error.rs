//! Error types for the seeker crate.
//!
//! Matching and sorting cannot fail; only building queries can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeekerError {
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A filter expression could not be parsed.
    #[error("invalid filter expression '{expr}': {reason}")]
    InvalidExpression { expr: String, reason: &'static str },
}

impl SeekerError {
    pub(crate) fn expression(expr: &str, reason: &'static str) -> Self {
        SeekerError::InvalidExpression {
            expr: expr.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeekerError>;
