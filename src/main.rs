//! Red Lotus - terminal teaser site for the Silver Spark Films series
//!
//! Countdown to the next episode, the cast and crew, the teaser, and a crew
//! account, in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! redlotus
//!
//! # CLI mode (for automation)
//! redlotus countdown --json
//! redlotus signup Nikhil n@x.com --password secret123
//! redlotus whoami
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_appender::non_blocking::WorkerGuard;

use redlotus::auth::AuthBridge;
use redlotus::cli::{Cli, Command, ExitCode, Output};
use redlotus::clock::SystemClock;
use redlotus::commands;
use redlotus::config::Config;
use redlotus::media::MediaSource;
use redlotus::runtime::{AuthContext, Runtime};
use redlotus::App;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let _log_guard = init_logging(&cli, &config);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(&config).await
    }
}

/// Logs go to stderr for CLI commands and to a file while the TUI owns the
/// terminal. `RUST_LOG` overrides the default filter.
fn init_logging(cli: &Cli, config: &Config) -> Option<WorkerGuard> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("redlotus=debug")
        } else {
            EnvFilter::new("redlotus=info")
        }
    });

    if cli.is_cli_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
        return None;
    }

    let path = config.log_file()?;
    let dir = path.parent()?;
    let file = path.file_name()?;
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();
    tracing::info!("redlotus v{} starting", env!("CARGO_PKG_VERSION"));
    Some(guard)
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Countdown(cmd)) => commands::countdown_cmd(cmd, &output),

        Some(Command::Cast) => commands::cast_cmd(&output),

        Some(Command::Crew) => commands::crew_cmd(&output),

        Some(Command::Signup(cmd)) => {
            let bridge = AuthBridge::new(commands::identity_provider(config));
            commands::signup_cmd(cmd, &bridge, &output).await
        }

        Some(Command::Login(cmd)) => {
            let bridge = AuthBridge::new(commands::identity_provider(config));
            commands::login_cmd(cmd, &bridge, &output).await
        }

        Some(Command::Logout) => {
            let bridge = AuthBridge::new(commands::identity_provider(config));
            commands::logout_cmd(&bridge, &output).await
        }

        Some(Command::Whoami) => {
            let bridge = AuthBridge::new(commands::identity_provider(config));
            commands::whoami_cmd(&bridge, &output).await
        }

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    // The custom pointer replaces the text cursor
    terminal.hide_cursor()?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    let clock = Arc::new(SystemClock);
    let media = MediaSource::virtual_teaser(config.teaser.duration(), config.teaser.autoplay_policy());
    let mut app = App::new(clock, media).with_teaser_file(config.teaser.path.clone(), config.teaser.player);

    let runtime = Runtime::new();
    let auth = AuthContext::start(commands::identity_provider(config), runtime.sender());

    let mut terminal = init_terminal().context("setting up the terminal")?;

    let result = runtime
        .with_tickers()
        .with_terminal_input()
        .run(&mut terminal, &mut app, &auth)
        .await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;
    drop(auth);

    result
}
