//! Wall-clock line shown under the display
//!
//! The clock never reads or writes the expression buffer.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

/// Default clock format: date, two spaces, time
pub const DEFAULT_CLOCK_FORMAT: &str = "%Y-%m-%d  %H:%M:%S";

/// A chrono format string that contains an unknown specifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid clock format: '{0}'")]
pub struct InvalidClockFormat(pub String);

/// Formats local wall time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    format: String,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            format: DEFAULT_CLOCK_FORMAT.to_string(),
        }
    }
}

impl Clock {
    /// Creates a clock with a custom strftime format
    ///
    /// # Errors
    ///
    /// Returns [`InvalidClockFormat`] if chrono cannot parse the format.
    pub fn new(format: impl Into<String>) -> Result<Self, InvalidClockFormat> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(InvalidClockFormat(format));
        }
        Ok(Self { format })
    }

    /// The format string in use
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Current local time as text
    #[must_use]
    pub fn now_text(&self) -> String {
        self.format_at(&Local::now())
    }

    /// Formats a given instant
    #[must_use]
    pub fn format_at<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        at.format(&self.format).to_string()
    }
}
