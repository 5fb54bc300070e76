//! tapcalc: keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! tapcalc tui                       # Interactive keypad
//! tapcalc keys sin 4 + 2 =          # Press labels, print the display
//! tapcalc keys --trace 5 ^ 2 =      # ...showing every step
//! tapcalc eval '√(16'               # Format and evaluate a raw buffer
//! ```

use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tapcalc::cli::{build_config, run_eval, run_keys, Cli, Commands};
use tapcalc::config::CliConfig;
use tapcalc::error::CliResult;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let interactive = matches!(cli.command, Commands::Tui(_));
    init_tracing(&config, interactive)?;
    info!(version = env!("CARGO_PKG_VERSION"), "tapcalc starting");

    match cli.command {
        Commands::Tui(_) => run_tui(&config),
        Commands::Keys(args) => run_keys(&config, &args, &mut io::stdout().lock()),
        Commands::Eval(args) => run_eval(&config, &args, &mut io::stdout().lock()),
    }
}

fn init_tracing(config: &CliConfig, interactive: bool) -> CliResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.default_filter()));

    if !interactive {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(config.color.should_color())
                    .with_writer(io::stderr),
            )
            .with(env_filter)
            .init();
        return Ok(());
    }

    // The terminal belongs to the UI: a file or nothing.
    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
        }
        None => tracing_subscriber::registry().with(env_filter).init(),
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_tui(config: &CliConfig) -> CliResult<()> {
    use std::time::Duration;

    use crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use tapcalc::buffer::Session;
    use tapcalc::core::evaluator::Evaluator;
    use tapcalc::tui::{render, CalculatorApp, InputHandler};

    // Redraw at least once a second so the clock keeps moving.
    const TICK: Duration = Duration::from_secs(1);

    let session = Session::with_evaluator(Evaluator::with_validator(config.calc.validator()));
    let mut app = CalculatorApp::with_session(session, config.calc.clock()?);
    let handler = InputHandler::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = (|| -> CliResult<()> {
        while !app.should_quit() {
            terminal.draw(|frame| render(&mut app, frame))?;
            if event::poll(TICK)? {
                app.handle(handler.handle_event(&event::read()?));
            }
        }
        Ok(())
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(display = app.session().display(), "tapcalc exiting");
    result
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &CliConfig) -> CliResult<()> {
    Err(tapcalc::error::CliError::config(
        "TUI not enabled. Rebuild with --features tui",
    ))
}
