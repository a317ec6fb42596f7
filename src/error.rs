//! Error types for the player.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for fallible player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Error type for the player shell.
///
/// Timeline derivations never fail; missing data is expressed as `None`.
/// Only I/O at the edges of the app ends up here.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for `PlayerConfig`.
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The bridge to the media engine inside the webview is gone.
    #[error("playback bridge closed: {0}")]
    BridgeClosed(String),

    /// A command could not be delivered to the media engine.
    #[error("playback command failed: {0}")]
    Command(String),

    /// Writing a timeline snapshot failed.
    #[error("snapshot export failed: {0}")]
    Snapshot(#[from] image::ImageError),

    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PlayerError {
    /// Create a command delivery error.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Create a bridge-closed error.
    pub fn bridge_closed(msg: impl Into<String>) -> Self {
        Self::BridgeClosed(msg.into())
    }
}
