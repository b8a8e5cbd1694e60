//! Error types for expression evaluation.

use thiserror::Error;

/// Reasons an expression failed to evaluate.
///
/// The engine collapses all of these into the same "Error" display; the
/// kind is kept for logging and for callers of [`evaluate_expression`].
///
/// [`evaluate_expression`]: super::evaluate_expression
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("unexpected {ch:?} at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("expression ends unexpectedly")]
    UnexpectedEnd,

    #[error("malformed number at position {position}")]
    MalformedNumber { position: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

impl CalcError {
    /// Whether the expression itself was malformed, as opposed to
    /// producing an unusable number.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedCharacter { .. } | Self::UnexpectedEnd | Self::MalformedNumber { .. }
        )
    }

    /// Whether the expression was well formed but its value is unusable.
    pub fn is_math_error(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalcError::InvalidCharacter { ch: 'a', position: 2 };
        assert_eq!(err.to_string(), "invalid character 'a' at position 2");
        assert_eq!(CalcError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_classification() {
        assert!(CalcError::UnexpectedEnd.is_parse_error());
        assert!(CalcError::MalformedNumber { position: 0 }.is_parse_error());
        assert!(!CalcError::UnexpectedEnd.is_math_error());
        assert!(CalcError::DivisionByZero.is_math_error());
        assert!(CalcError::NonFinite.is_math_error());
        let invalid = CalcError::InvalidCharacter { ch: 'x', position: 0 };
        assert!(!invalid.is_parse_error());
        assert!(!invalid.is_math_error());
    }
}
