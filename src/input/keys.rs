//! Key sequences in text form.
//!
//! A sequence is plain text where `{Name}` stands for a named key
//! (`{Enter}`, `{Backspace}`, `{Escape}`) and every other character is a
//! key of its own. `12+3{Enter}` types `1`, `2`, `+`, `3` and evaluates.

use thiserror::Error;
use tracing::trace;

use super::InputEvent;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("key name opened at position {position} is never closed")]
    Unterminated { position: usize },

    #[error("empty key name at position {position}")]
    EmptyName { position: usize },
}

/// Split a key sequence into key names.
pub fn parse_keys(sequence: &str) -> Result<Vec<String>, KeyParseError> {
    let mut keys = Vec::new();
    let mut chars = sequence.chars().enumerate();

    while let Some((position, c)) = chars.next() {
        if c != '{' {
            keys.push(c.to_string());
            continue;
        }

        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            name.push(c);
        }

        if !closed {
            return Err(KeyParseError::Unterminated { position });
        }
        if name.is_empty() {
            return Err(KeyParseError::EmptyName { position });
        }
        keys.push(name);
    }

    Ok(keys)
}

/// Parse a key sequence and map it to input events, dropping ignored keys.
pub fn events_from_keys(sequence: &str) -> Result<Vec<InputEvent>, KeyParseError> {
    let keys = parse_keys(sequence)?;
    Ok(keys
        .iter()
        .filter_map(|key| {
            let event = InputEvent::from_key(key);
            if event.is_none() {
                trace!(key = %key, "ignoring key");
            }
            event
        })
        .collect())
}
