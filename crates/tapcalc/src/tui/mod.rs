//! Terminal keypad front end

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget, KEYPAD_COLS, KEYPAD_ROWS};
pub use ui::{render, CalculatorUI, UiLayout};
