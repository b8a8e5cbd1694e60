//! The expression engine: owns the buffer the user is typing into.

use tracing::{debug, trace};

use super::detection::{is_allowed, segment_has_decimal};
use super::evaluation::{CalcResult, DEFAULT_PRECISION, MAX_PRECISION, calculate};

/// Text shown for an empty buffer.
pub const DEFAULT_PLACEHOLDER: &str = "0";

/// Text shown after a failed evaluation.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Display settings for an [`ExpressionEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Decimal places kept after evaluation.
    pub precision: u32,
    /// Shown when the buffer is empty.
    pub placeholder: String,
    /// Shown after a failed evaluation.
    pub error_marker: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

/// Maintains the expression buffer and computes its value on demand.
///
/// After a failed [`evaluate`](Self::evaluate) the buffer is empty and the
/// display shows the error marker until the next append, delete or clear.
#[derive(Clone, Debug, Default)]
pub struct ExpressionEngine {
    buffer: String,
    showing_error: bool,
    options: EngineOptions,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut options: EngineOptions) -> Self {
        options.precision = options.precision.min(MAX_PRECISION);
        Self {
            buffer: String::new(),
            showing_error: false,
            options,
        }
    }

    /// Start from an existing buffer, e.g. a restored session.
    ///
    /// The buffer is taken as is; [`evaluate`](Self::evaluate) still rejects
    /// any character outside the calculator's set.
    pub fn with_buffer(mut self, buffer: impl Into<String>) -> Self {
        self.buffer = buffer.into();
        self.showing_error = false;
        self
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_showing_error(&self) -> bool {
        self.showing_error
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The number currently being typed.
    pub fn current_segment(&self) -> &str {
        super::detection::current_segment(&self.buffer)
    }

    /// The string to render: error marker, placeholder or the buffer.
    pub fn display(&self) -> &str {
        if self.showing_error {
            &self.options.error_marker
        } else if self.buffer.is_empty() {
            &self.options.placeholder
        } else {
            &self.buffer
        }
    }

    /// Append one character to the buffer.
    ///
    /// Returns `false` (and leaves the buffer untouched) for characters
    /// outside the calculator's set and for a second decimal point in the
    /// same number.
    pub fn append(&mut self, token: char) -> bool {
        if !is_allowed(token) {
            trace!(?token, "refusing character");
            return false;
        }

        if token == '.' && segment_has_decimal(&self.buffer) {
            trace!("segment already has a decimal point");
            return false;
        }

        self.showing_error = false;
        self.buffer.push(token);
        true
    }

    /// Remove the last character, if any.
    pub fn delete(&mut self) {
        self.showing_error = false;
        self.buffer.pop();
    }

    /// Reset the buffer to empty.
    pub fn clear(&mut self) {
        self.showing_error = false;
        self.buffer.clear();
    }

    /// Evaluate the buffer.
    ///
    /// Returns `None` without touching any state when the buffer is empty.
    /// On success the buffer becomes the formatted result; on failure it is
    /// emptied and the display switches to the error marker.
    pub fn evaluate(&mut self) -> Option<CalcResult> {
        if self.buffer.is_empty() {
            return None;
        }

        let result = calculate(&self.buffer, self.options.precision);
        match &result {
            CalcResult::Success { display_result, .. } => {
                debug!(expression = %self.buffer, result = %display_result, "evaluated");
                self.buffer.clone_from(display_result);
                self.showing_error = false;
            }
            CalcResult::Error { error, .. } => {
                debug!(expression = %self.buffer, %error, "evaluation failed");
                self.buffer.clear();
                self.showing_error = true;
            }
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalcError;
    use proptest::prelude::*;

    fn typed(input: &str) -> ExpressionEngine {
        let mut engine = ExpressionEngine::new();
        for c in input.chars() {
            engine.append(c);
        }
        engine
    }

    #[test]
    fn test_append_concatenates() {
        let engine = typed("12+3.5*4");
        assert_eq!(engine.buffer(), "12+3.5*4");
        assert_eq!(engine.display(), "12+3.5*4");
    }

    #[test]
    fn test_second_decimal_in_segment_rejected() {
        let mut engine = typed("1.2");
        assert!(!engine.append('.'));
        assert_eq!(engine.buffer(), "1.2");

        assert!(engine.append('+'));
        assert!(engine.append('.'));
        assert!(!engine.append('.'));
        assert_eq!(engine.buffer(), "1.2+.");
    }

    #[test]
    fn test_typing_one_two_three_with_dots() {
        // "1.2.3" typed without an operator keeps only the first point
        assert_eq!(typed("1.2.3").buffer(), "1.23");
    }

    #[test]
    fn test_disallowed_characters_refused() {
        let mut engine = typed("5");
        assert!(!engine.append('x'));
        assert!(!engine.append(' '));
        assert!(!engine.append('×'));
        assert_eq!(engine.buffer(), "5");
    }

    #[test]
    fn test_delete() {
        let mut engine = typed("123");
        engine.delete();
        assert_eq!(engine.buffer(), "12");
        engine.delete();
        engine.delete();
        assert!(engine.is_empty());
        engine.delete();
        assert!(engine.is_empty());
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_clear() {
        let mut engine = typed("9*9");
        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_evaluate_precedence() {
        let mut engine = typed("2+3*4");
        let result = engine.evaluate().unwrap();
        assert!(result.is_success());
        assert_eq!(engine.buffer(), "14");
        assert_eq!(engine.display(), "14");
    }

    #[test]
    fn test_evaluate_rounding() {
        let mut engine = typed("0.1+0.2");
        engine.evaluate();
        assert_eq!(engine.buffer(), "0.3");
    }

    #[test]
    fn test_evaluate_division_by_zero_resets() {
        let mut engine = typed("1/0");
        let result = engine.evaluate().unwrap();
        assert_eq!(result.error(), Some(&CalcError::DivisionByZero));
        assert!(engine.is_empty());
        assert!(engine.is_showing_error());
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_evaluate_empty_is_noop() {
        let mut engine = ExpressionEngine::new();
        assert!(engine.evaluate().is_none());
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_evaluate_empty_keeps_error_marker() {
        let mut engine = typed("5/0");
        engine.evaluate();
        assert!(engine.evaluate().is_none());
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_next_input_after_error_starts_fresh() {
        let mut engine = typed("5+");
        engine.evaluate();
        assert_eq!(engine.display(), "Error");

        engine.append('7');
        assert!(!engine.is_showing_error());
        assert_eq!(engine.display(), "7");
    }

    #[test]
    fn test_delete_after_error_shows_placeholder() {
        let mut engine = typed("5+");
        engine.evaluate();
        engine.delete();
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_evaluate_seeded_invalid_buffer() {
        let mut engine = ExpressionEngine::new().with_buffer("2+a");
        let result = engine.evaluate().unwrap();
        assert!(matches!(
            result.error(),
            Some(CalcError::InvalidCharacter { ch: 'a', .. })
        ));
        assert!(engine.is_empty());
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_result_chains() {
        let mut engine = typed("6*7");
        engine.evaluate();
        engine.append('+');
        engine.append('8');
        engine.evaluate();
        assert_eq!(engine.buffer(), "50");

        // A negative result can be extended too
        let mut engine = typed("2-5");
        engine.evaluate();
        engine.append('*');
        engine.append('2');
        engine.evaluate();
        assert_eq!(engine.buffer(), "-6");
    }

    #[test]
    fn test_result_with_decimal_blocks_second_point() {
        let mut engine = typed("1/4");
        engine.evaluate();
        assert_eq!(engine.buffer(), "0.25");
        assert!(!engine.append('.'));
    }

    #[test]
    fn test_round_trip_single_number() {
        for n in ["5", "1234567", "0.5", "3.14159265", "10.00000001"] {
            let mut engine = typed(n);
            engine.evaluate();
            assert_eq!(engine.buffer(), n);
        }
    }

    #[test]
    fn test_custom_options() {
        let options = EngineOptions {
            precision: 2,
            placeholder: String::new(),
            error_marker: "E".to_string(),
        };
        let mut engine = ExpressionEngine::with_options(options);
        assert_eq!(engine.display(), "");

        for c in "2/3".chars() {
            engine.append(c);
        }
        engine.evaluate();
        assert_eq!(engine.buffer(), "0.67");

        engine.append('/');
        engine.append('0');
        engine.evaluate();
        assert_eq!(engine.display(), "E");
    }

    #[test]
    fn test_precision_is_capped() {
        let engine = ExpressionEngine::with_options(EngineOptions {
            precision: 40,
            ..EngineOptions::default()
        });
        assert_eq!(engine.options().precision, MAX_PRECISION);
    }

    // --- Property-based tests ---

    /// Keys a user might hit, including a few the engine must refuse.
    const KEYS: &[char] = &[
        '0', '1', '2', '5', '9', '.', '.', '+', '-', '*', '/', 'x', ' ', '=',
    ];

    /// `int_part.frac` with `frac` zero-padded to `width` digits and
    /// trailing zeros dropped, the way a result is formatted.
    fn number_text(int_part: u64, frac: u32, width: usize) -> String {
        let frac = format!("{frac:0width$}");
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            int_part.to_string()
        } else {
            format!("{int_part}.{frac}")
        }
    }

    proptest! {
        #[test]
        fn prop_append_keeps_accepted_tokens(
            keys in prop::collection::vec(prop::sample::select(KEYS), 0..40)
        ) {
            let mut engine = ExpressionEngine::new();
            let mut expected = String::new();
            let mut segment_has_point = false;

            for &c in &keys {
                let accepted = match c {
                    '0'..='9' => true,
                    '+' | '-' | '*' | '/' => {
                        segment_has_point = false;
                        true
                    }
                    '.' if !segment_has_point => {
                        segment_has_point = true;
                        true
                    }
                    _ => false,
                };
                prop_assert_eq!(engine.append(c), accepted);
                if accepted {
                    expected.push(c);
                }
            }

            prop_assert_eq!(engine.buffer(), expected.as_str());
        }

        // f64 holds every 16-digit decimal only below 2^26
        #[test]
        fn prop_round_trip_eight_decimals(
            int_part in 0u64..(1 << 26),
            frac in 0u32..100_000_000,
        ) {
            let input = number_text(int_part, frac, 8);
            let mut engine = typed(&input);
            engine.evaluate();
            prop_assert_eq!(engine.buffer(), input.as_str());
        }

        #[test]
        fn prop_round_trip_eight_integer_digits(
            int_part in 0u64..100_000_000,
            frac in 0u32..10_000_000,
        ) {
            let input = number_text(int_part, frac, 7);
            let mut engine = typed(&input);
            engine.evaluate();
            prop_assert_eq!(engine.buffer(), input.as_str());
        }
    }
}
