//! A keypad arithmetic calculator.
//!
//! Keystrokes or keypad presses build up an expression buffer which is
//! evaluated with conventional precedence (`*` and `/` before `+` and `-`)
//! and rounded to hide floating-point noise.
//!
//! ```
//! use keycalc::calculator::ExpressionEngine;
//!
//! let mut engine = ExpressionEngine::new();
//! for c in "0.1+0.2".chars() {
//!     engine.append(c);
//! }
//! engine.evaluate();
//! assert_eq!(engine.display(), "0.3");
//! ```

pub mod calculator;
pub mod config;
pub mod input;
pub mod session;

pub use calculator::{CalcError, CalcResult, ExpressionEngine};
pub use config::Config;
pub use input::InputEvent;
pub use session::{Outcome, Session};
