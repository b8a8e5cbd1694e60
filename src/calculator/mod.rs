//! Calculator module for composing and evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Validate characters and find the number currently being typed
//! - Tokenize and evaluate four-operator expressions
//! - Hold the expression buffer behind the append/delete/clear/evaluate API

mod detection;
mod engine;
mod error;
mod evaluation;
mod tokenizer;

pub use detection::{current_segment, find_invalid, is_allowed, is_operator};
pub use engine::{DEFAULT_ERROR_MARKER, DEFAULT_PLACEHOLDER, EngineOptions, ExpressionEngine};
pub use error::CalcError;
pub use evaluation::{
    CalcResult, DEFAULT_PRECISION, MAX_PRECISION, calculate, evaluate_expression, format_result,
    round_to,
};
pub use tokenizer::{Operator, Token, tokenize};
