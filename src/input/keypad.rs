//! The on-screen keypad: labelled buttons bound to input events.

use super::InputEvent;

/// A single keypad button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    /// Text printed on the button.
    pub label: &'static str,
    /// What pressing the button does.
    pub event: InputEvent,
}

impl Button {
    const fn new(label: &'static str, event: InputEvent) -> Self {
        Self { label, event }
    }

    const fn token(label: &'static str, c: char) -> Self {
        Self::new(label, InputEvent::Token(c))
    }
}

/// A grid of buttons, laid out row by row.
#[derive(Clone, Debug)]
pub struct Keypad {
    rows: Vec<Vec<Button>>,
}

impl Keypad {
    /// The standard layout. Operator glyphs (`÷ × −`) press the matching
    /// ASCII operator.
    pub fn standard() -> Self {
        Self {
            rows: vec![
                vec![
                    Button::new("C", InputEvent::Clear),
                    Button::new("DEL", InputEvent::Delete),
                    Button::token("÷", '/'),
                    Button::token("×", '*'),
                ],
                vec![
                    Button::token("7", '7'),
                    Button::token("8", '8'),
                    Button::token("9", '9'),
                    Button::token("−", '-'),
                ],
                vec![
                    Button::token("4", '4'),
                    Button::token("5", '5'),
                    Button::token("6", '6'),
                    Button::token("+", '+'),
                ],
                vec![
                    Button::token("1", '1'),
                    Button::token("2", '2'),
                    Button::token("3", '3'),
                    Button::new("=", InputEvent::Evaluate),
                ],
                vec![Button::token("0", '0'), Button::token(".", '.')],
            ],
        }
    }

    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Iterate over every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Resolve a button label to the event it triggers.
    pub fn press(&self, label: &str) -> Option<InputEvent> {
        self.buttons()
            .find(|button| button.label == label)
            .map(|button| button.event)
    }

    /// Render the keypad as a text grid.
    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| format!("[{:^5}]", button.label))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::standard()
    }
}
