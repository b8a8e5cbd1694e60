//! Splits an expression into signed numbers and binary operators.
//!
//! The grammar is deliberately small:
//!
//! ```text
//! expression := operand (operator operand)*
//! operand    := sign* number
//! number     := digits ('.' digits?)? | '.' digits
//! ```
//!
//! Signs may only open an operand. A run of them may alternate but never
//! repeats a character, including the operator before the run: `5--2`,
//! `5++2` and `--5` are rejected, `5+-2` and `-+-5` are fine.

use super::error::CalcError;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Map an ASCII operator character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// The ASCII character for this operator.
    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    /// Apply the operator. Division by zero is reported rather than
    /// producing an infinity.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(lhs / rhs),
        }
    }
}

/// A lexical unit of an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A number with its sign already applied.
    Number(f64),
    Operator(Operator),
}

/// Tokenize `input`.
///
/// The result always alternates number, operator, number, ... and ends with
/// a number, so an `Ok` value is a well-formed expression.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut last_operator: Option<char> = None;

    loop {
        // Operand: a run of signs, then a number. The same sign twice in a
        // row, counting the operator before the run, is rejected.
        let mut negative = false;
        let mut previous = last_operator;
        while let Some(&c) = chars.get(pos) {
            if c != '+' && c != '-' {
                break;
            }
            if previous == Some(c) {
                return Err(CalcError::UnexpectedCharacter { ch: c, position: pos });
            }
            negative ^= c == '-';
            previous = Some(c);
            pos += 1;
        }

        let start = pos;
        while let Some(&c) = chars.get(pos) {
            if c.is_ascii_digit() || c == '.' {
                pos += 1;
            } else {
                break;
            }
        }

        if start == pos {
            return Err(match chars.get(pos) {
                Some(&ch) => CalcError::UnexpectedCharacter { ch, position: pos },
                None => CalcError::UnexpectedEnd,
            });
        }

        let value = parse_number(&chars[start..pos], start)?;
        tokens.push(Token::Number(if negative { -value } else { value }));

        // Operator, or the end of the expression
        match chars.get(pos) {
            None => return Ok(tokens),
            Some(&c) => match Operator::from_char(c) {
                Some(op) => {
                    tokens.push(Token::Operator(op));
                    last_operator = Some(c);
                    pos += 1;
                }
                None => return Err(CalcError::UnexpectedCharacter { ch: c, position: pos }),
            },
        }
    }
}

/// Parse the digits and decimal point of a single number.
fn parse_number(digits: &[char], position: usize) -> Result<f64, CalcError> {
    let dots = digits.iter().filter(|&&c| c == '.').count();
    if dots > 1 || dots == digits.len() {
        return Err(CalcError::MalformedNumber { position });
    }

    let text: String = digits.iter().collect();
    text.parse::<f64>()
        .map_err(|_| CalcError::MalformedNumber { position })
}
