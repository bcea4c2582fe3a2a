//! Error types for the Vajra target engine
//!
//! Per-token failures (`InvalidSyntax`, `InvertedRange`, `RangeTooLarge`) are
//! collected by the host collection and never abort a parse. `EmptyInput`
//! aborts construction; `ResolutionFailed` only affects the resolve call that
//! produced it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VajraError {
    #[error("Invalid host string: {0}")]
    InvalidSyntax(String),

    #[error("Inverted limits: {0}")]
    InvertedRange(String),

    #[error("Range {token} expands to {hosts} hosts which exceeds the allowed limit of {limit}")]
    RangeTooLarge { token: String, hosts: u64, limit: u64 },

    #[error("Failed to resolve {name}: {reason}")]
    ResolutionFailed { name: String, reason: String },

    #[error("No targets specified")]
    EmptyInput,
}

impl VajraError {
    /// Build a resolution failure from any displayable cause.
    pub fn resolution_failed(name: &str, reason: impl std::fmt::Display) -> Self {
        VajraError::ResolutionFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that are recorded per token instead of aborting a parse.
    #[inline]
    #[must_use]
    pub const fn is_token_error(&self) -> bool {
        matches!(
            self,
            VajraError::InvalidSyntax(_)
                | VajraError::InvertedRange(_)
                | VajraError::RangeTooLarge { .. }
        )
    }
}

/// Result type alias for Vajra operations
pub type VajraResult<T> = Result<T, VajraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_are_classified() {
        assert!(VajraError::InvalidSyntax("a b".into()).is_token_error());
        assert!(VajraError::InvertedRange("10.0.0.5-2".into()).is_token_error());
        assert!(!VajraError::EmptyInput.is_token_error());
        assert!(!VajraError::resolution_failed("x", "nope").is_token_error());
    }

    #[test]
    fn messages_name_the_token() {
        let e = VajraError::InvertedRange("10.0.0.5-2".into());
        assert_eq!(e.to_string(), "Inverted limits: 10.0.0.5-2");

        let e = VajraError::resolution_failed("nohost.invalid", "not found");
        assert_eq!(e.to_string(), "Failed to resolve nohost.invalid: not found");
    }
}
