//! Player configuration loaded from `player.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::core::media::{sample_sources, MediaFormat, MediaSource};
use crate::core::viewport::ZoomLevel;
use crate::error::{PlayerError, Result};

/// User-tunable settings. Every field has a default so partial files work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub window_title: String,
    pub window_width: f64,
    pub window_height: f64,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub initial_zoom: ZoomLevel,
    /// Step for the skip buttons and arrow keys.
    pub seek_step_seconds: f64,
    pub initial_format: MediaFormat,
    pub sources: Vec<MediaSource>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            window_title: "Video Timeline Player".to_string(),
            window_width: 1100.0,
            window_height: 760.0,
            log_filter: "video_timeline_player=info".to_string(),
            initial_zoom: ZoomLevel::MIN,
            seek_step_seconds: 10.0,
            initial_format: MediaFormat::Hls,
            sources: sample_sources(),
        }
    }
}

impl PlayerConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(PlayerError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: PlayerConfig =
            serde_json::from_str(&json).map_err(|source| PlayerError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.normalized())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Source for `format`, preferring the configured list over the samples.
    pub fn source_for(&self, format: MediaFormat) -> MediaSource {
        self.sources
            .iter()
            .find(|source| source.format == format)
            .cloned()
            .or_else(|| sample_sources().into_iter().find(|source| source.format == format))
            .unwrap_or_else(|| MediaSource::new(format, ""))
    }

    /// Formats offered in the selector, in configuration order.
    pub fn formats(&self) -> Vec<MediaFormat> {
        let mut formats = Vec::new();
        for source in &self.sources {
            if !formats.contains(&source.format) {
                formats.push(source.format);
            }
        }
        formats
    }

    /// Sources whose URL extension suggests a different engine than the
    /// configured format, paired with the detected format.
    pub fn format_mismatches(&self) -> Vec<(&MediaSource, MediaFormat)> {
        self.sources
            .iter()
            .filter_map(|source| {
                let detected = MediaFormat::detect(&source.url, source.format.is_live())?;
                (detected.engine() != source.format.engine()).then_some((source, detected))
            })
            .collect()
    }

    fn normalized(mut self) -> Self {
        if !(self.seek_step_seconds.is_finite() && self.seek_step_seconds > 0.0) {
            self.seek_step_seconds = Self::default().seek_step_seconds;
        }
        if self.sources.is_empty() {
            self.sources = sample_sources();
        }
        self
    }
}
