//! Input events and the mappings that produce them.
//!
//! Both keyboard keys and keypad buttons end up as an [`InputEvent`], which
//! corresponds one to one with an engine operation.

mod keypad;
mod keys;

pub use keypad::{Button, Keypad};
pub use keys::{KeyParseError, events_from_keys, parse_keys};

use crate::calculator::is_allowed;

/// A discrete input, already mapped to the engine operation it triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A digit, decimal point or operator to append
    Token(char),
    /// Reset the buffer
    Clear,
    /// Remove the last character
    Delete,
    /// Compute the buffer's value
    Evaluate,
}

impl InputEvent {
    /// Map a keyboard key name to an event.
    ///
    /// Single characters from the calculator's set become tokens; `Enter`
    /// and `=` evaluate, `Backspace` deletes and `Escape` clears. Every
    /// other key is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => return Some(Self::Evaluate),
            "Backspace" => return Some(Self::Delete),
            "Escape" => return Some(Self::Clear),
            _ => {}
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_allowed(c) => Some(Self::Token(c)),
            _ => None,
        }
    }

    /// Check if this event appends to the buffer.
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Check if this event is one of the clear/delete/evaluate commands.
    pub fn is_command(&self) -> bool {
        !self.is_token()
    }
}

impl From<char> for InputEvent {
    fn from(c: char) -> Self {
        Self::Token(c)
    }
}
