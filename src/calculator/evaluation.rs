//! Expression evaluation and result formatting.
//!
//! Evaluation runs in two passes over the token stream: `*` and `/` are
//! folded left to right first, then `+` and `-`. The final value is rounded
//! to a fixed number of decimal places to hide binary floating-point noise
//! (so `0.1+0.2` shows as `0.3`).

use super::detection::find_invalid;
use super::error::CalcError;
use super::tokenizer::{Operator, Token, tokenize};

/// Default number of decimal places kept after evaluation.
pub const DEFAULT_PRECISION: u32 = 8;

/// Largest supported precision; beyond this `f64` has no digits left to keep.
pub const MAX_PRECISION: u32 = 15;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The original expression.
        expression: String,
        /// The rounded numeric value.
        value: f64,
        /// The value formatted for the display and the next buffer.
        display_result: String,
    },
    /// The expression was rejected or produced an unusable number.
    Error {
        /// The original expression.
        expression: String,
        /// Why evaluation failed.
        error: CalcError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The numeric value, for successful results.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// The formatted value, for successful results.
    pub fn display_result(&self) -> Option<&str> {
        match self {
            Self::Success { display_result, .. } => Some(display_result),
            Self::Error { .. } => None,
        }
    }

    /// The failure reason, for errors.
    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }
}

/// Evaluate an expression to its exact (unrounded) `f64` value.
///
/// Characters outside the calculator's set are rejected before any parsing.
pub fn evaluate_expression(input: &str) -> Result<f64, CalcError> {
    if let Some((position, ch)) = find_invalid(input) {
        return Err(CalcError::InvalidCharacter { ch, position });
    }

    let tokens = tokenize(input)?;
    let value = evaluate_tokens(&tokens)?;

    if !value.is_finite() {
        return Err(CalcError::NonFinite);
    }

    Ok(value)
}

/// Evaluate, round and format an expression in one step.
pub fn calculate(input: &str, precision: u32) -> CalcResult {
    let expression = input.to_string();

    match evaluate_expression(input) {
        Ok(value) => {
            let value = round_to(value, precision);
            CalcResult::Success {
                expression,
                display_result: format_result(value),
                value,
            }
        }
        Err(error) => CalcResult::Error { expression, error },
    }
}

/// Fold a well-formed token stream.
fn evaluate_tokens(tokens: &[Token]) -> Result<f64, CalcError> {
    let mut iter = tokens.iter();
    let first = match iter.next() {
        Some(Token::Number(n)) => *n,
        _ => return Err(CalcError::UnexpectedEnd),
    };

    // First pass: collapse `*` and `/` runs into terms
    let mut terms = vec![first];
    let mut additive: Vec<Operator> = Vec::new();

    while let Some(token) = iter.next() {
        let op = match token {
            Token::Operator(op) => *op,
            Token::Number(_) => return Err(CalcError::UnexpectedEnd),
        };
        let rhs = match iter.next() {
            Some(Token::Number(n)) => *n,
            _ => return Err(CalcError::UnexpectedEnd),
        };

        if op.is_multiplicative() {
            let last = terms.last_mut().ok_or(CalcError::UnexpectedEnd)?;
            *last = op.apply(*last, rhs)?;
        } else {
            terms.push(rhs);
            additive.push(op);
        }
    }

    // Second pass: `+` and `-` left to right
    let mut terms = terms.into_iter();
    let mut total = terms.next().ok_or(CalcError::UnexpectedEnd)?;
    for (op, term) in additive.into_iter().zip(terms) {
        total = op.apply(total, term)?;
    }

    Ok(total)
}

/// Round `value` to `precision` decimal places, halves toward positive
/// infinity.
///
/// Values whose scaled form reaches 2^51 are returned unchanged: from there
/// on `f64` steps are 0.5 or wider, so the `+ 0.5` can only push an exact
/// half up to the next digit.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;

    if !scaled.is_finite() || scaled.abs() >= 2f64.powi(51) {
        return value;
    }

    (scaled + 0.5).floor() / factor
}

/// Format a number in plain decimal notation.
///
/// Never uses an exponent, so the output can be fed back into the buffer.
pub fn format_result(value: f64) -> String {
    // Also folds -0 into 0
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
