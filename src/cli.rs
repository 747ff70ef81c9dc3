//! CLI - Command Line Interface for Red Lotus
//!
//! Everything the site shows is also scriptable: the countdown, the roster
//! and the account flow. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Time until the next episode
//! redlotus countdown --json
//! redlotus countdown --at 2024-01-21T00:00:00Z
//!
//! # Roster
//! redlotus cast
//! redlotus crew
//!
//! # Account
//! redlotus signup Nikhil n@x.com --password secret123
//! redlotus login n@x.com < password.txt
//! redlotus whoami
//! redlotus logout
//! ```

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::auth::{codes, AuthError};
use crate::countdown::Remaining;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Identity provider unreachable
    NetworkError = 3,
    /// Provider rejected the credentials or request
    AuthDenied = 4,
    /// No session to act on
    NotSignedIn = 5,
}

impl ExitCode {
    /// Exit code for a failed provider call
    pub fn for_auth_error(err: &AuthError) -> Self {
        if err.code == codes::NETWORK_REQUEST_FAILED {
            ExitCode::NetworkError
        } else {
            ExitCode::AuthDenied
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Red Lotus - terminal teaser site for the short-film series
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for scripting.
#[derive(Parser, Debug)]
#[command(
    name = "redlotus",
    version,
    author = "Silver Spark Films",
    about = "Terminal teaser site for the Red Lotus short-film series",
    long_about = "Countdown to the next episode, the cast and crew, the teaser, \
                  and a crew account.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for scripting.",
    after_help = "EXAMPLES:\n\
                  redlotus                                  Launch interactive TUI\n\
                  redlotus countdown --json                 Time until next episode\n\
                  redlotus signup Nikhil n@x.com -p pass    Join the crew\n\
                  redlotus whoami                           Show the stored session"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Time remaining until the next episode
    #[command(visible_alias = "cd")]
    Countdown(CountdownCmd),

    /// List the starring cast
    Cast,

    /// List the production credits
    #[command(visible_alias = "credits")]
    Crew,

    /// Create a crew account
    Signup(SignupCmd),

    /// Log in to an existing account
    Login(LoginCmd),

    /// Forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,
}

/// Countdown to the next release boundary
#[derive(Args, Debug)]
pub struct CountdownCmd {
    /// Evaluate at this instant instead of now (RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<DateTime<Utc>>,
}

/// Create an account
#[derive(Args, Debug)]
pub struct SignupCmd {
    /// Display name
    #[arg(required = true)]
    pub username: String,

    #[arg(required = true)]
    pub email: String,

    /// Password (read from stdin when omitted)
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

/// Log in
#[derive(Args, Debug)]
pub struct LoginCmd {
    #[arg(required = true)]
    pub email: String,

    /// Password (read from stdin when omitted)
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

/// Parse an RFC 3339 instant
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 time like 2024-01-21T00:00:00Z ({})", e))
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Status OK response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusOk {
    pub status: &'static str,
}

impl Default for StatusOk {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

/// Countdown response
#[derive(Debug, Serialize)]
pub struct CountdownResponse {
    pub now: DateTime<Utc>,
    pub target: DateTime<Utc>,
    pub remaining: Remaining,
    pub total_seconds: i64,
    /// `DD : HH : MM : SS`
    pub display: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as the JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print a human-readable line (JSON mode prints `data` instead)
    pub fn print_or<T: Serialize>(&self, data: T, text: impl std::fmt::Display) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            println!("{}", text);
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
