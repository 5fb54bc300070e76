//! CLI and calculator configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, DEFAULT_CLOCK_FORMAT};
use crate::core::AnomalyValidator;
use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - per-key transitions
    Verbose,
    /// Debug - everything
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Log filter used when `RUST_LOG` is unset
    #[must_use]
    pub const fn default_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "tapcalc=debug",
            Self::Debug => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

fn default_max_magnitude() -> f64 {
    AnomalyValidator::DEFAULT_MAX_MAGNITUDE
}

const fn default_clock_enabled() -> bool {
    true
}

fn default_clock_format() -> String {
    DEFAULT_CLOCK_FORMAT.to_string()
}

/// Calculator settings, loadable from YAML
///
/// ```yaml
/// max_magnitude: 1.0e12
/// clock_enabled: false
/// clock_format: "%H:%M"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalcConfig {
    /// Largest accepted result magnitude
    #[serde(default = "default_max_magnitude")]
    pub max_magnitude: f64,
    /// Show the clock line in the TUI
    #[serde(default = "default_clock_enabled")]
    pub clock_enabled: bool,
    /// chrono strftime format for the clock
    #[serde(default = "default_clock_format")]
    pub clock_format: String,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            max_magnitude: default_max_magnitude(),
            clock_enabled: default_clock_enabled(),
            clock_format: default_clock_format(),
        }
    }
}

impl CalcConfig {
    /// Parses YAML text
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, unknown fields, or a
    /// non-positive `max_magnitude`.
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Checks value ranges
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] for a non-positive or NaN
    /// `max_magnitude`.
    pub fn validate(&self) -> CliResult<()> {
        if self.max_magnitude.is_nan() || self.max_magnitude <= 0.0 {
            return Err(CliError::config(format!(
                "max_magnitude must be positive, got {}",
                self.max_magnitude
            )));
        }
        Ok(())
    }

    /// Result validator for the evaluator
    #[must_use]
    pub fn validator(&self) -> AnomalyValidator {
        AnomalyValidator::with_max_magnitude(self.max_magnitude)
    }

    /// The clock, or `None` when disabled
    ///
    /// # Errors
    ///
    /// Returns an error if `clock_format` is not a valid chrono format.
    pub fn clock(&self) -> CliResult<Option<Clock>> {
        if !self.clock_enabled {
            return Ok(None);
        }
        Ok(Some(Clock::new(self.clock_format.as_str())?))
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Calculator settings
    pub calc: CalcConfig,
    /// Log destination for TUI mode
    pub log_file: Option<PathBuf>,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set calculator settings
    #[must_use]
    pub fn with_calc(mut self, calc: CalcConfig) -> Self {
        self.calc = calc;
        self
    }

    /// Override the maximum result magnitude
    #[must_use]
    pub fn with_max_magnitude(mut self, max_magnitude: f64) -> Self {
        self.calc.max_magnitude = max_magnitude;
        self
    }

    /// Disable the clock line
    #[must_use]
    pub fn with_clock_enabled(mut self, enabled: bool) -> Self {
        self.calc.clock_enabled = enabled;
        self
    }

    /// Set the TUI log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Debug);
        }

        #[test]
        fn test_predicates() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_quiet());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
        }

        #[test]
        fn test_default_filter() {
            assert_eq!(Verbosity::Normal.default_filter(), "warn");
            assert_eq!(Verbosity::Verbose.default_filter(), "tapcalc=debug");
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
            assert_eq!(ColorChoice::default(), ColorChoice::Auto);
        }
    }

    mod calc_config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = CalcConfig::default();
            assert_eq!(config.max_magnitude, f64::MAX);
            assert!(config.clock_enabled);
            assert_eq!(config.clock_format, DEFAULT_CLOCK_FORMAT);
        }

        #[test]
        fn test_from_yaml_partial_uses_defaults() {
            let config = CalcConfig::from_yaml("clock_enabled: false\n").unwrap();
            assert!(!config.clock_enabled);
            assert_eq!(config.max_magnitude, f64::MAX);
            assert!(config.clock().unwrap().is_none());
        }

        #[test]
        fn test_from_yaml_full() {
            let yaml = "max_magnitude: 1000.0\nclock_enabled: true\nclock_format: \"%H:%M\"\n";
            let config = CalcConfig::from_yaml(yaml).unwrap();
            assert_eq!(config.max_magnitude, 1000.0);
            assert_eq!(config.validator().max_magnitude, 1000.0);
            assert_eq!(config.clock().unwrap().unwrap().format(), "%H:%M");
        }

        #[test]
        fn test_from_yaml_empty_document() {
            let config = CalcConfig::from_yaml("{}").unwrap();
            assert_eq!(config, CalcConfig::default());
        }

        #[test]
        fn test_unknown_field_rejected() {
            let err = CalcConfig::from_yaml("precision: 3\n").unwrap_err();
            assert!(matches!(err, CliError::Yaml(_)));
        }

        #[test]
        fn test_non_positive_magnitude_rejected() {
            let err = CalcConfig::from_yaml("max_magnitude: 0\n").unwrap_err();
            assert!(matches!(err, CliError::Config { .. }));
        }

        #[test]
        fn test_bad_clock_format() {
            let config = CalcConfig {
                clock_format: "%Q".into(),
                ..CalcConfig::default()
            };
            assert!(matches!(config.clock(), Err(CliError::Clock(_))));
        }

        #[test]
        fn test_load_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "max_magnitude: 50.0").unwrap();
            let config = CalcConfig::load(file.path()).unwrap();
            assert_eq!(config.max_magnitude, 50.0);
        }

        #[test]
        fn test_load_missing_file() {
            let err = CalcConfig::load(Path::new("/nonexistent/tapcalc.yaml")).unwrap_err();
            assert!(matches!(err, CliError::Io(_)));
        }
    }

    mod cli_config_tests {
        use super::*;

        #[test]
        fn test_builders() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Debug)
                .with_color(ColorChoice::Never)
                .with_calc(CalcConfig::default())
                .with_max_magnitude(10.0)
                .with_clock_enabled(false)
                .with_log_file("/tmp/tapcalc.log");
            assert_eq!(config.verbosity, Verbosity::Debug);
            assert_eq!(config.color, ColorChoice::Never);
            assert_eq!(config.calc.max_magnitude, 10.0);
            assert!(!config.calc.clock_enabled);
            assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tapcalc.log")));
        }
    }
}
