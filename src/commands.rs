//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the services it needs and Output, and
//! returns ExitCode.

use std::io::BufRead;
use std::sync::Arc;

use chrono::Utc;

use crate::auth::{normalize_code, AuthBridge, FirebaseProvider, IdentityProvider, MemoryProvider};
use crate::cli::{CountdownCmd, CountdownResponse, ExitCode, LoginCmd, Output, SignupCmd, StatusOk};
use crate::config::Config;
use crate::content::{CAST, CREW};
use crate::countdown::CountdownEngine;
use crate::models::{LogInRequest, Session, SignUpRequest};

/// Identity provider for this configuration: Firebase when a key is
/// available, otherwise the in-process offline provider.
pub fn identity_provider(config: &Config) -> Arc<dyn IdentityProvider> {
    match config.api_key() {
        Some(key) => {
            let mut provider = FirebaseProvider::new(key);
            if let Some(store) = config.session_store() {
                provider = provider.with_store(store);
            }
            Arc::new(provider)
        }
        None => {
            tracing::info!("no API key configured, using offline accounts");
            Arc::new(MemoryProvider::new())
        }
    }
}

// =============================================================================
// Countdown Command
// =============================================================================

pub fn countdown_cmd(cmd: CountdownCmd, output: &Output) -> ExitCode {
    let now = cmd.at.unwrap_or_else(Utc::now);
    let mut engine = CountdownEngine::standard();
    let remaining = engine.tick(now);
    let target = engine.target().unwrap_or_else(|| engine.next_boundary(now));

    let response = CountdownResponse {
        now,
        target,
        remaining,
        total_seconds: remaining.total_seconds(),
        display: remaining.to_string(),
    };
    let text = format!("{}  (next episode {})", remaining, target.to_rfc3339());
    finish(output.print_or(&response, text), output)
}

// =============================================================================
// Roster Commands
// =============================================================================

pub fn cast_cmd(output: &Output) -> ExitCode {
    let text = CAST
        .iter()
        .map(|m| format!("{:<10} {}", m.role, m.actor))
        .collect::<Vec<_>>()
        .join("\n");
    finish(output.print_or(&CAST, text), output)
}

pub fn crew_cmd(output: &Output) -> ExitCode {
    let text = CREW
        .iter()
        .map(|c| format!("{:<30} {}", c.title, c.joined_names()))
        .collect::<Vec<_>>()
        .join("\n");
    finish(output.print_or(&CREW, text), output)
}

// =============================================================================
// Account Commands
// =============================================================================

pub async fn signup_cmd(cmd: SignupCmd, bridge: &AuthBridge, output: &Output) -> ExitCode {
    let password = match password_or_stdin(cmd.password) {
        Ok(p) => p,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };
    if cmd.username.trim().is_empty() {
        return output.error("USERNAME REQUIRED", ExitCode::InvalidArgs);
    }
    output.info(format!("Creating account for {}...", cmd.email));

    let request = SignUpRequest {
        username: cmd.username,
        email: cmd.email,
        password,
    };
    match bridge.sign_up(request).await {
        Ok(session) => print_session(&session, "Welcome to the Red Lotus Crew!", output),
        Err(e) => output.error(normalize_code(&e.code), ExitCode::for_auth_error(&e)),
    }
}

pub async fn login_cmd(cmd: LoginCmd, bridge: &AuthBridge, output: &Output) -> ExitCode {
    let password = match password_or_stdin(cmd.password) {
        Ok(p) => p,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };
    output.info(format!("Logging in as {}...", cmd.email));

    let request = LogInRequest {
        email: cmd.email,
        password,
    };
    match bridge.log_in(request).await {
        Ok(session) => print_session(&session, "Welcome back into the Dark.", output),
        Err(e) => output.error(normalize_code(&e.code), ExitCode::for_auth_error(&e)),
    }
}

pub async fn logout_cmd(bridge: &AuthBridge, output: &Output) -> ExitCode {
    if !bridge.has_session() {
        return output.error("Not signed in", ExitCode::NotSignedIn);
    }
    match bridge.log_out().await {
        Ok(()) => finish(output.print_or(StatusOk::default(), "Signed out."), output),
        Err(e) => output.error(normalize_code(&e.code), ExitCode::for_auth_error(&e)),
    }
}

pub async fn whoami_cmd(bridge: &AuthBridge, output: &Output) -> ExitCode {
    match bridge.restore().await {
        Ok(Some(session)) => finish(output.print_or(&session, &session), output),
        Ok(None) => output.error("Not signed in", ExitCode::NotSignedIn),
        Err(e) => output.error(normalize_code(&e.code), ExitCode::for_auth_error(&e)),
    }
}

fn print_session(session: &Session, welcome: &str, output: &Output) -> ExitCode {
    output.info(welcome);
    finish(output.print_or(session, session), output)
}

fn finish(result: anyhow::Result<()>, output: &Output) -> ExitCode {
    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

/// Use the flag value, or read one line from stdin
fn password_or_stdin(flag: Option<String>) -> anyhow::Result<String> {
    let password = match flag {
        Some(p) => p,
        None => {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        anyhow::bail!("PASSWORD REQUIRED");
    }
    Ok(password)
}
