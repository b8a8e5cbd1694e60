//! A calculator session: one engine driven by input events.

use tracing::debug;

use crate::calculator::{CalcResult, ExpressionEngine};
use crate::config::Config;
use crate::input::{InputEvent, KeyParseError, Keypad, events_from_keys};

/// What a single input event did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A token was appended.
    Appended,
    /// A token was refused (disallowed, or a second decimal point).
    Refused,
    /// The buffer was edited by delete or clear.
    Edited,
    /// Evaluate ran on a non-empty buffer.
    Evaluated(CalcResult),
    /// Evaluate on an empty buffer.
    Nothing,
}

/// Owns the engine for one user and dispatches input to it.
#[derive(Debug)]
pub struct Session {
    engine: ExpressionEngine,
    keypad: Keypad,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: ExpressionEngine::with_options(config.engine_options()),
            keypad: Keypad::standard(),
        }
    }

    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The current display string.
    pub fn display(&self) -> &str {
        self.engine.display()
    }

    /// Run the engine operation for one event.
    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        debug!(?event, "input");
        match event {
            InputEvent::Token(c) => {
                if self.engine.append(c) {
                    Outcome::Appended
                } else {
                    Outcome::Refused
                }
            }
            InputEvent::Delete => {
                self.engine.delete();
                Outcome::Edited
            }
            InputEvent::Clear => {
                self.engine.clear();
                Outcome::Edited
            }
            InputEvent::Evaluate => match self.engine.evaluate() {
                Some(result) => Outcome::Evaluated(result),
                None => Outcome::Nothing,
            },
        }
    }

    /// Handle a keyboard key by name. Unknown keys are ignored.
    pub fn press_key(&mut self, key: &str) -> Option<Outcome> {
        InputEvent::from_key(key).map(|event| self.handle(event))
    }

    /// Handle a keypad button by label. Unknown labels are ignored.
    pub fn press_button(&mut self, label: &str) -> Option<Outcome> {
        let event = self.keypad.press(label)?;
        Some(self.handle(event))
    }

    /// Replay a key sequence (see [`parse_keys`](crate::input::parse_keys)),
    /// returning the display after each handled event.
    pub fn replay(&mut self, sequence: &str) -> Result<Vec<String>, KeyParseError> {
        let events = events_from_keys(sequence)?;
        Ok(events
            .into_iter()
            .map(|event| {
                self.handle(event);
                self.display().to_string()
            })
            .collect())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
