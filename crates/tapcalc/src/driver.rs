//! One scripted-keypress API for every front end
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against the headless [`Session`] and the TUI app alike.

use crate::buffer::{Session, UnknownKey};
use crate::core::Evaluate;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses the key with the given keypad label
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKey`] for labels outside the keypad vocabulary.
    fn press_label(&mut self, label: &str) -> Result<(), UnknownKey>;

    /// Text currently shown in the display panel
    fn display(&self) -> String;

    /// Buffer the next key will operate on
    fn buffer(&self) -> String;

    /// Returns to the initial state
    fn reset(&mut self);

    /// Presses each label in order
    ///
    /// # Errors
    ///
    /// Stops at the first unknown label.
    fn press_labels(&mut self, labels: &[&str]) -> Result<(), UnknownKey> {
        labels.iter().try_for_each(|label| self.press_label(label))
    }
}

impl<E: Evaluate> CalculatorDriver for Session<E> {
    fn press_label(&mut self, label: &str) -> Result<(), UnknownKey> {
        Session::press_label(self, label).map(|_| ())
    }

    fn display(&self) -> String {
        Session::display(self).to_string()
    }

    fn buffer(&self) -> String {
        Session::buffer(self).to_string()
    }

    fn reset(&mut self) {
        Session::reset(self);
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalculatorDriver, UnknownKey};
    use crate::buffer::Key;
    use crate::tui::CalculatorApp;

    /// Drives the TUI app as if keypad buttons were pressed
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_label(&mut self, label: &str) -> Result<(), UnknownKey> {
            let key: Key = label.parse()?;
            self.app.press(key);
            Ok(())
        }

        fn display(&self) -> String {
            self.app.session().display().to_string()
        }

        fn buffer(&self) -> String {
            self.app.session().buffer().to_string()
        }

        fn reset(&mut self) {
            self.app.reset();
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenario checks =====
// Each check panics on a wrong display and returns an error only for a bad
// label.

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> Result<(), UnknownKey> {
    let cases: [(&[&str], &str); 5] = [
        (&["2", "+", "3", "="], "5"),
        (&["1", "0", "-", "4", "="], "6"),
        (&["6", "*", "7", "="], "42"),
        (&["2", "0", "/", "4", "="], "5"),
        (&["5", "^", "2", "="], "25"),
    ];
    for (labels, expected) in cases {
        driver.reset();
        driver.press_labels(labels)?;
        assert_eq!(driver.display(), expected, "{labels:?}");
    }
    driver.reset();
    Ok(())
}

/// Verifies that unclosed parentheses are closed at `=` time only
pub fn verify_auto_close<D: CalculatorDriver>(driver: &mut D) -> Result<(), UnknownKey> {
    driver.reset();
    driver.press_labels(&["sin", "0"])?;
    assert_eq!(driver.buffer(), "sin(0");
    driver.press_label("=")?;
    assert_eq!(driver.display(), "0");

    driver.reset();
    driver.press_labels(&["√", "1", "6", ")", ")", "="])?;
    assert_eq!(driver.display(), "4");

    driver.reset();
    driver.press_labels(&["log", "√", "1", "0", "0", "0", "0", "="])?;
    assert_eq!(driver.display(), "2");
    driver.reset();
    Ok(())
}

/// Verifies the error state and how the next key leaves it
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) -> Result<(), UnknownKey> {
    driver.reset();
    driver.press_labels(&["/", "="])?;
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.buffer(), "");

    driver.press_labels(&["4", "="])?;
    assert_eq!(driver.display(), "4");

    driver.press_labels(&["1", "/", "0", "=", "AC"])?;
    assert_eq!(driver.display(), "");
    driver.reset();
    Ok(())
}

/// Verifies that a result feeds the next expression
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> Result<(), UnknownKey> {
    driver.reset();
    driver.press_labels(&["2", "+", "3", "=", "*", "4", "="])?;
    assert_eq!(driver.display(), "20");

    driver.press_labels(&["⌫", "="])?;
    assert_eq!(driver.display(), "2");
    driver.reset();
    Ok(())
}

/// Runs every scenario check
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) -> Result<(), UnknownKey> {
    verify_basic_arithmetic(driver)?;
    verify_auto_close(driver)?;
    verify_error_recovery(driver)?;
    verify_chaining(driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Headless session driver =====

    #[test]
    fn test_session_driver_press_label() {
        let mut driver = Session::new();
        CalculatorDriver::press_label(&mut driver, "7").unwrap();
        assert_eq!(CalculatorDriver::buffer(&driver), "7");
    }

    #[test]
    fn test_session_driver_unknown_label() {
        let mut driver = Session::new();
        let err = driver.press_labels(&["1", "(", "2"]).unwrap_err();
        assert_eq!(err, UnknownKey("(".into()));
        assert_eq!(CalculatorDriver::buffer(&driver), "1");
    }

    #[test]
    fn test_session_basic_arithmetic() {
        verify_basic_arithmetic(&mut Session::new()).unwrap();
    }

    #[test]
    fn test_session_auto_close() {
        verify_auto_close(&mut Session::new()).unwrap();
    }

    #[test]
    fn test_session_error_recovery() {
        verify_error_recovery(&mut Session::new()).unwrap();
    }

    #[test]
    fn test_session_chaining() {
        verify_chaining(&mut Session::new()).unwrap();
    }

    #[test]
    fn test_session_all_scenarios() {
        run_all_scenarios(&mut Session::new()).unwrap();
    }

    // ===== TUI driver =====

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;
        use crate::buffer::Key;
        use crate::tui::CalculatorApp;

        #[test]
        fn test_tui_driver_new() {
            let driver = TuiDriver::new();
            assert_eq!(driver.display(), "");
            assert_eq!(driver.app().display_text(), "0");
        }

        #[test]
        fn test_tui_driver_with_app() {
            let mut app = CalculatorApp::new();
            app.press(Key::Digit(3));
            let driver = TuiDriver::with_app(app);
            assert_eq!(driver.buffer(), "3");
        }

        #[test]
        fn test_tui_driver_highlights_keys() {
            let mut driver = TuiDriver::new();
            driver.press_labels(&["cos", "0"]).unwrap();
            assert_eq!(driver.app().keypad().pressed(), Some(Key::Digit(0)));
        }

        #[test]
        fn test_tui_driver_reset() {
            let mut driver = TuiDriver::new();
            driver.press_labels(&["1", "="]).unwrap();
            driver.reset();
            assert_eq!(driver.display(), "");
            assert_eq!(driver.app().keypad().pressed(), None);
        }

        #[test]
        fn test_tui_all_scenarios() {
            run_all_scenarios(&mut TuiDriver::new()).unwrap();
        }
    }
}
