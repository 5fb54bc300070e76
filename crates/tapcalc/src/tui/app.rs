//! TUI application state

use ratatui::layout::Rect;

use crate::buffer::{DisplayState, Key, Session};
use crate::clock::Clock;
use crate::tui::input::KeyAction;
use crate::tui::keypad::Keypad;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    session: Session,
    keypad: Keypad,
    /// Where the keypad was last drawn, for mouse hit-testing
    keypad_area: Option<Rect>,
    clock: Option<Clock>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app with the default evaluator and clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(Session::new(), Some(Clock::default()))
    }

    /// Creates an app around an existing session; `None` hides the clock
    #[must_use]
    pub fn with_session(session: Session, clock: Option<Clock>) -> Self {
        Self {
            session,
            keypad: Keypad::new(),
            keypad_area: None,
            clock,
            should_quit: false,
        }
    }

    /// The calculator session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Current display state
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        self.session.state()
    }

    /// Text for the display panel; `0` stands in for an empty buffer
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self.session.display() {
            "" => "0",
            text => text,
        }
    }

    /// The keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The clock, if shown
    #[must_use]
    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }

    /// Records where the keypad was drawn
    pub fn set_keypad_area(&mut self, area: Rect) {
        self.keypad_area = Some(area);
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Sends a key and lights up its button
    pub fn press(&mut self, key: Key) {
        self.keypad.highlight(key);
        self.session.press(key);
    }

    /// Presses the button under a click, if any
    pub fn click(&mut self, x: u16, y: u16) {
        let hit = self
            .keypad_area
            .and_then(|area| self.keypad.hit_test(area, x, y));
        if let Some(key) = hit {
            self.press(key);
        }
    }

    /// Applies an input action
    pub fn handle(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(key) => self.press(key),
            KeyAction::Click { x, y } => self.click(x, y),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        self.session.reset();
        self.keypad.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::OperatorKey;

    fn press_all(app: &mut CalculatorApp, labels: &[&str]) {
        for label in labels {
            app.press(label.parse().unwrap());
        }
    }

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.state(), &DisplayState::default());
        assert_eq!(app.display_text(), "0");
        assert!(app.clock().is_some());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_without_clock() {
        let app = CalculatorApp::with_session(Session::new(), None);
        assert!(app.clock().is_none());
    }

    #[test]
    fn test_press_updates_display_and_highlight() {
        let mut app = CalculatorApp::default();
        press_all(&mut app, &["sin", "4", "+", "2"]);
        assert_eq!(app.display_text(), "sin(4+2");
        assert_eq!(
            app.keypad().pressed(),
            Some(Key::Operator(OperatorKey::Plus))
        );
    }

    #[test]
    fn test_evaluate_shows_result() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, &["5", "^", "2", "="]);
        assert_eq!(app.display_text(), "25");
        assert_eq!(app.session().last_formatted(), Some("5**2"));
    }

    #[test]
    fn test_error_display() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, &["/", "="]);
        assert_eq!(app.display_text(), "Error");
        assert!(app.state().is_error());
    }

    #[test]
    fn test_handle_actions() {
        let mut app = CalculatorApp::new();
        app.handle(KeyAction::Press(Key::Digit(8)));
        app.handle(KeyAction::None);
        assert_eq!(app.display_text(), "8");
        app.handle(KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_click_without_layout_is_ignored() {
        let mut app = CalculatorApp::new();
        app.handle(KeyAction::Click { x: 3, y: 3 });
        assert_eq!(app.display_text(), "0");
    }

    #[test]
    fn test_click_hits_keypad() {
        let mut app = CalculatorApp::new();
        app.set_keypad_area(Rect::new(0, 0, 26, 16));
        // row 3 col 0 is "1"
        app.handle(KeyAction::Click { x: 2, y: 8 });
        assert_eq!(app.display_text(), "1");
        assert_eq!(app.keypad().pressed(), Some(Key::Digit(1)));
    }

    #[test]
    fn test_reset() {
        let mut app = CalculatorApp::new();
        press_all(&mut app, &["9", "="]);
        app.reset();
        assert_eq!(app.display_text(), "0");
        assert_eq!(app.keypad().pressed(), None);
    }

    #[test]
    fn test_session_mut() {
        let mut app = CalculatorApp::new();
        app.session_mut().press(Key::Digit(3));
        assert_eq!(app.display_text(), "3");
    }
}
