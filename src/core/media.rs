//! Media formats and sources.

use serde::{Deserialize, Serialize};

/// A selectable source format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFormat {
    Hls,
    Mp4,
    WebM,
    /// Live stream delivered over HLS.
    LiveHls,
    /// Live stream delivered as HTTP-FLV.
    Flv,
}

/// Which engine the bridge instantiates for a format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// hls.js, or native HLS where the webview supports it.
    Hls,
    /// flv.js.
    Flv,
    /// Plain `src` on the media element.
    Native,
}

impl MediaFormat {
    pub const ALL: [MediaFormat; 5] = [
        MediaFormat::Hls,
        MediaFormat::Mp4,
        MediaFormat::WebM,
        MediaFormat::LiveHls,
        MediaFormat::Flv,
    ];

    pub fn is_live(self) -> bool {
        matches!(self, MediaFormat::LiveHls | MediaFormat::Flv)
    }

    pub fn engine(self) -> EngineKind {
        match self {
            MediaFormat::Hls | MediaFormat::LiveHls => EngineKind::Hls,
            MediaFormat::Flv => EngineKind::Flv,
            MediaFormat::Mp4 | MediaFormat::WebM => EngineKind::Native,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaFormat::Hls => "HLS",
            MediaFormat::Mp4 => "MP4",
            MediaFormat::WebM => "WebM",
            MediaFormat::LiveHls => "Live Stream (HLS)",
            MediaFormat::Flv => "Live Stream (FLV)",
        }
    }

    /// Guess a format from a URL's file extension.
    ///
    /// HLS playlists and FLV streams are assumed live only when `live` is set;
    /// FLV is always treated as live since the player has no VOD FLV path.
    pub fn detect(url: &str, live: bool) -> Option<MediaFormat> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let mime = mime_guess::from_path(path).first_raw()?;
        match mime {
            m if m.ends_with("mpegurl") => {
                Some(if live { MediaFormat::LiveHls } else { MediaFormat::Hls })
            }
            "video/x-flv" => Some(MediaFormat::Flv),
            "video/mp4" => Some(MediaFormat::Mp4),
            "video/webm" => Some(MediaFormat::WebM),
            _ => None,
        }
    }
}

/// A URL plus the format it should be played as.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    pub format: MediaFormat,
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl MediaSource {
    pub fn new(format: MediaFormat, url: impl Into<String>) -> Self {
        Self {
            format,
            url: url.into(),
            label: None,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.format.label())
    }
}

/// Built-in sample streams, one per format.
pub fn sample_sources() -> Vec<MediaSource> {
    vec![
        MediaSource::new(MediaFormat::Hls, "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8"),
        MediaSource::new(MediaFormat::Mp4, "https://media.w3.org/2010/05/sintel/trailer.mp4"),
        MediaSource::new(
            MediaFormat::WebM,
            "https://upload.wikimedia.org/wikipedia/commons/transcoded/f/f1/Sintel_movie_4K.webm/Sintel_movie_4K.webm.720p.webm",
        ),
        MediaSource::new(MediaFormat::LiveHls, "https://example.com/live/stream.m3u8"),
        MediaSource::new(MediaFormat::Flv, "https://example.com/live/stream.flv"),
    ]
}
