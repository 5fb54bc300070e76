//! Command-line surface
//!
//! Argument definitions use clap derive; the batch commands are plain
//! functions over a writer so they can be tested without a process.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::buffer::{evaluate_buffer, DisplayState, Key, Session};
use crate::config::{CalcConfig, CliConfig, ColorChoice, Verbosity};
use crate::core::evaluator::Evaluator;
use crate::error::CliResult;

/// tapcalc: keypad calculator with a scientific expression buffer
#[derive(Parser, Debug)]
#[command(name = "tapcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML file with calculator settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Largest accepted result magnitude (overrides the config file)
    #[arg(long, global = true)]
    pub max_magnitude: Option<f64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive keypad
    Tui(TuiArgs),

    /// Press keypad labels in order and print the final display
    Keys(KeysArgs),

    /// Format and evaluate a raw buffer string
    Eval(EvalArgs),
}

/// Arguments for the tui command
#[derive(Parser, Debug, Default)]
pub struct TuiArgs {
    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Hide the clock line
    #[arg(long)]
    pub no_clock: bool,
}

/// Arguments for the keys command
#[derive(Parser, Debug, Default)]
pub struct KeysArgs {
    /// Keypad labels, e.g. `sin 4 + 2 =`
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Print a JSON report
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the eval command
#[derive(Parser, Debug, Default)]
pub struct EvalArgs {
    /// Buffer text, e.g. `√(16` or `5^2`
    #[arg(allow_hyphen_values = true)]
    pub expr: String,

    /// Print a JSON report
    #[arg(long)]
    pub json: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Builds the configuration: file values first, then flag overrides
///
/// # Errors
///
/// Returns an error if the config file cannot be read or a value is invalid.
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let calc = match &cli.config {
        Some(path) => CalcConfig::load(path)?,
        None => CalcConfig::default(),
    };

    let mut config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
        .with_calc(calc);

    if let Some(max) = cli.max_magnitude {
        config = config.with_max_magnitude(max);
    }
    if let Commands::Tui(args) = &cli.command {
        if args.no_clock {
            config = config.with_clock_enabled(false);
        }
        if let Some(path) = &args.log_file {
            config = config.with_log_file(path);
        }
    }

    config.calc.validate()?;
    Ok(config)
}

/// One key in a `keys --trace` run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    /// Label as typed
    pub label: String,
    /// State after the key
    pub state: DisplayState,
    /// Evaluator input, for `=`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// JSON report for `keys` and `eval`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Final display text
    pub display: String,
    /// Final state
    pub state: DisplayState,
    /// Evaluator input on the last `=`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    /// Per-key states, when traced
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<TraceStep>,
}

fn session_for(config: &CliConfig) -> Session {
    Session::with_evaluator(Evaluator::with_validator(config.calc.validator()))
}

/// Runs the `keys` command
///
/// All labels are checked before any key is pressed.
///
/// # Errors
///
/// Returns an error for an unknown label or a failed write.
pub fn run_keys(config: &CliConfig, args: &KeysArgs, out: &mut impl Write) -> CliResult<()> {
    let keys = args
        .labels
        .iter()
        .map(|label| label.parse::<Key>())
        .collect::<Result<Vec<_>, _>>()?;
    info!(keys = keys.len(), "pressing keys");

    let mut session = session_for(config);
    let mut steps = Vec::new();
    for (label, key) in args.labels.iter().zip(keys) {
        session.press(key);
        if args.trace {
            let formatted = if key == Key::Equals {
                session.last_formatted().map(str::to_string)
            } else {
                None
            };
            steps.push(TraceStep {
                label: label.clone(),
                state: session.state().clone(),
                formatted,
            });
        }
    }

    let report = Report {
        display: session.display().to_string(),
        state: session.state().clone(),
        formatted: session.last_formatted().map(str::to_string),
        steps,
    };
    write_report(config, args.json, &report, out)
}

/// Runs the `eval` command
///
/// # Errors
///
/// Returns an error only for a failed write.
pub fn run_eval(config: &CliConfig, args: &EvalArgs, out: &mut impl Write) -> CliResult<()> {
    let mut evaluator = Evaluator::with_validator(config.calc.validator());
    let evaluation = evaluate_buffer(&args.expr, &mut evaluator);

    let report = Report {
        display: evaluation.state.display().to_string(),
        state: evaluation.state,
        formatted: Some(evaluation.formatted),
        steps: Vec::new(),
    };
    write_report(config, args.json, &report, out)
}

fn write_report(
    config: &CliConfig,
    json: bool,
    report: &Report,
    out: &mut impl Write,
) -> CliResult<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }

    for step in &report.steps {
        match &step.formatted {
            Some(formatted) => writeln!(out, "{:>4}  {formatted} => {}", step.label, step.state)?,
            None => writeln!(out, "{:>4}  {}", step.label, step.state)?,
        }
    }
    if config.verbosity.is_verbose() && report.steps.is_empty() {
        if let Some(formatted) = &report.formatted {
            writeln!(out, "{formatted} =>")?;
        }
    }
    writeln!(out, "{}", report.display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn keys(labels: &[&str]) -> KeysArgs {
        KeysArgs {
            labels: labels.iter().map(|s| (*s).to_string()).collect(),
            ..KeysArgs::default()
        }
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ===== Argument parsing =====

    #[test]
    fn test_parse_keys_command() {
        let cli = Cli::try_parse_from(["tapcalc", "keys", "--trace", "5", "^", "2", "="]).unwrap();
        match cli.command {
            Commands::Keys(args) => {
                assert_eq!(args.labels, ["5", "^", "2", "="]);
                assert!(args.trace);
                assert!(!args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_keys_accepts_minus_label() {
        let cli = Cli::try_parse_from(["tapcalc", "keys", "9", "-", "4", "="]).unwrap();
        assert!(matches!(cli.command, Commands::Keys(ref a) if a.labels.len() == 4));
    }

    #[test]
    fn test_parse_keys_requires_labels() {
        assert!(Cli::try_parse_from(["tapcalc", "keys"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "tapcalc",
            "eval",
            "-vv",
            "--color",
            "never",
            "--max-magnitude",
            "100",
            "2+2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.max_magnitude, Some(100.0));
        let config = build_config(&cli).unwrap();
        assert_eq!(config.verbosity, Verbosity::Debug);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.calc.max_magnitude, 100.0);
    }

    #[test]
    fn test_build_config_tui_overrides() {
        let cli =
            Cli::try_parse_from(["tapcalc", "tui", "--no-clock", "--log-file", "t.log"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert!(!config.calc.clock_enabled);
        assert_eq!(config.log_file, Some(PathBuf::from("t.log")));
    }

    #[test]
    fn test_build_config_rejects_bad_magnitude() {
        let cli = Cli::try_parse_from(["tapcalc", "--max-magnitude", "0", "eval", "1"]).unwrap();
        assert!(matches!(build_config(&cli), Err(CliError::Config { .. })));
    }

    #[test]
    fn test_build_config_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "max_magnitude: 5.0\n").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["tapcalc", "--config", &path, "eval", "1"]).unwrap();
        assert_eq!(build_config(&cli).unwrap().calc.max_magnitude, 5.0);

        let cli = Cli::try_parse_from([
            "tapcalc",
            "--config",
            &path,
            "--max-magnitude",
            "7",
            "eval",
            "1",
        ])
        .unwrap();
        assert_eq!(build_config(&cli).unwrap().calc.max_magnitude, 7.0);
    }

    // ===== keys =====

    #[test]
    fn test_run_keys_prints_display() {
        let config = CliConfig::new();
        let text = output(|out| run_keys(&config, &keys(&["2", "+", "3", "="]), out));
        assert_eq!(text, "5\n");
    }

    #[test]
    fn test_run_keys_error_display_is_success() {
        let config = CliConfig::new();
        let text = output(|out| run_keys(&config, &keys(&["/", "="]), out));
        assert_eq!(text, "Error\n");
    }

    #[test]
    fn test_run_keys_unknown_label_fails_before_pressing() {
        let config = CliConfig::new();
        let mut out = Vec::new();
        let err = run_keys(&config, &keys(&["1", "("]), &mut out).unwrap_err();
        assert!(matches!(err, CliError::UnknownKey(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_keys_trace() {
        let config = CliConfig::new();
        let mut args = keys(&["sin", "0", "="]);
        args.trace = true;
        let text = output(|out| run_keys(&config, &args, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, [" sin  sin(", "   0  sin(0", "   =  sin(0) => 0", "0"]);
    }

    #[test]
    fn test_run_keys_json() {
        let config = CliConfig::new();
        let mut args = keys(&["5", "^", "2", "="]);
        args.json = true;
        let text = output(|out| run_keys(&config, &args, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["display"], "25");
        assert_eq!(value["formatted"], "5**2");
        assert_eq!(value["state"]["state"], "result");
        assert!(value.get("steps").is_none());
    }

    #[test]
    fn test_run_keys_respects_max_magnitude() {
        let config = CliConfig::new().with_max_magnitude(10.0);
        let text = output(|out| run_keys(&config, &keys(&["5", "*", "5", "="]), out));
        assert_eq!(text, "Error\n");
    }

    // ===== eval =====

    #[test]
    fn test_run_eval() {
        let config = CliConfig::new();
        let args = EvalArgs {
            expr: "√(16".into(),
            json: false,
        };
        assert_eq!(output(|out| run_eval(&config, &args, out)), "4\n");
    }

    #[test]
    fn test_run_eval_verbose_shows_formatted() {
        let config = CliConfig::new().with_verbosity(Verbosity::Verbose);
        let args = EvalArgs {
            expr: "sin(4+2".into(),
            json: false,
        };
        let text = output(|out| run_eval(&config, &args, out));
        assert!(text.starts_with("sin(4+2) =>\n-0.279"));
    }

    #[test]
    fn test_run_eval_json_error() {
        let config = CliConfig::new();
        let args = EvalArgs {
            expr: "/".into(),
            json: true,
        };
        let text = output(|out| run_eval(&config, &args, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["display"], "Error");
        assert_eq!(value["formatted"], "/");
        assert_eq!(value["state"]["state"], "error");
    }

    #[test]
    fn test_color_arg_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
    }
}
