//! Configuration management for Red Lotus
//!
//! Handles config file loading/saving and identity provider key lookup.
//! Config is stored at ~/.config/redlotus/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::auth::SessionStore;
use crate::media::{AutoplayPolicy, PlayerKind};

/// Environment variable holding the identity provider API key
pub const API_KEY_ENV: &str = "REDLOTUS_API_KEY";

/// Key baked in at build time, if the builder exported one
const BUILD_API_KEY: Option<&str> = option_env!("REDLOTUS_API_KEY");

/// Length of the virtual teaser when no duration is configured
pub const DEFAULT_TEASER_SECS: f64 = 90.0;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub teaser: TeaserConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Firebase Web API key
    pub api_key: Option<String>,
    /// Where the refresh token is kept between runs
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeaserConfig {
    /// Teaser video for the external player
    pub path: Option<PathBuf>,
    pub duration_secs: f64,
    /// Start playing as soon as the overlay opens
    pub autoplay: bool,
    pub player: PlayerKind,
}

impl Default for TeaserConfig {
    fn default() -> Self {
        Self {
            path: None,
            duration_secs: DEFAULT_TEASER_SECS,
            autoplay: true,
            player: PlayerKind::default(),
        }
    }
}

impl TeaserConfig {
    pub fn autoplay_policy(&self) -> AutoplayPolicy {
        if self.autoplay {
            AutoplayPolicy::Allowed
        } else {
            AutoplayPolicy::RequireActivation
        }
    }

    /// Configured duration, or the default when unusable
    pub fn duration(&self) -> f64 {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            self.duration_secs
        } else {
            DEFAULT_TEASER_SECS
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file used while the TUI owns the terminal
    pub file: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/redlotus/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("redlotus").join("config.toml"))
    }

    /// Load config from the default path, or return defaults if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from `path`. Missing or malformed files give defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Identity provider key with fallback chain:
    /// 1. Environment variable REDLOTUS_API_KEY
    /// 2. Key from the config file
    /// 3. Key baked in at build time
    ///
    /// `None` means offline mode.
    pub fn api_key(&self) -> Option<String> {
        Self::resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.auth.api_key.clone(), BUILD_API_KEY)
    }

    fn resolve_api_key(env: Option<String>, file: Option<String>, build: Option<&str>) -> Option<String> {
        env.into_iter()
            .chain(file)
            .chain(build.map(str::to_string))
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }

    /// Session file, defaulting to ~/.local/share/redlotus/session.json
    pub fn session_store(&self) -> Option<SessionStore> {
        self.auth
            .session_file
            .clone()
            .or_else(SessionStore::default_path)
            .map(SessionStore::new)
    }

    /// Log file, defaulting to ~/.local/share/redlotus/logs/redlotus.log
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("redlotus").join("logs").join("redlotus.log"))
        })
    }
}
