//! External player hand-off
//!
//! The terminal can't show video, so the teaser file can be opened in VLC
//! or mpv next to the TUI.

use std::path::Path;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::{Child, Command};

/// Supported desktop players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Vlc,
    Mpv,
}

impl PlayerKind {
    pub fn command(&self) -> &'static str {
        match self {
            PlayerKind::Vlc => {
                #[cfg(target_os = "macos")]
                if Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerKind::Mpv => "mpv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerKind::Vlc => "VLC",
            PlayerKind::Mpv => "mpv",
        }
    }

    /// Arguments after the file path
    fn extra_args(&self) -> &'static [&'static str] {
        match self {
            PlayerKind::Vlc => &["--no-video-title-show", "--play-and-exit"],
            PlayerKind::Mpv => &["--force-window=immediate"],
        }
    }
}

impl std::fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("{0} is not installed")]
    NotFound(String),
    #[error("Teaser file not found: {0}")]
    MissingFile(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// Launches the teaser in a desktop player
#[derive(Debug, Clone, Copy)]
pub struct ExternalPlayer {
    kind: PlayerKind,
}

impl ExternalPlayer {
    pub fn new(kind: PlayerKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Spawn the player detached from our stdio
    pub fn open(&self, file: &Path) -> Result<Child, PlayerError> {
        if !file.exists() {
            return Err(PlayerError::MissingFile(file.display().to_string()));
        }

        let mut cmd = Command::new(self.kind.command());
        cmd.arg(file)
            .args(self.kind.extra_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        tracing::info!(player = %self.kind, file = %file.display(), "opening teaser externally");

        cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(self.kind.display_name().to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })
    }
}
