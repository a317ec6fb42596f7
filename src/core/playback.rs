//! Playback engine boundary.
//!
//! The engine itself (native `<video>`, hls.js, flv.js) lives in the webview.
//! Rust talks to it through [`PlaybackCommand`]s and receives
//! [`PlaybackEvent`]s. [`EngineSlot`] owns the single active engine and
//! guarantees the old one is destroyed before a replacement is attached.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

use super::media::{EngineKind, MediaSource};

/// Contiguous interval of media time that is available for playback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BufferedRange {
    pub start: f64,
    pub end: f64,
}

impl BufferedRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Duration as reported by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MediaDuration {
    Known(f64),
    /// Live content, or nothing loaded yet.
    #[default]
    Unknown,
}

impl MediaDuration {
    /// Normalize a raw engine value: non-finite or non-positive means unknown.
    pub fn from_reported(value: Option<f64>) -> Self {
        match value {
            Some(seconds) if seconds.is_finite() && seconds > 0.0 => MediaDuration::Known(seconds),
            _ => MediaDuration::Unknown,
        }
    }

    /// Seconds with `0` standing in for unknown, as the timeline expects.
    pub fn seconds_or_zero(self) -> f64 {
        match self {
            MediaDuration::Known(seconds) => seconds,
            MediaDuration::Unknown => 0.0,
        }
    }

    pub fn known(self) -> Option<f64> {
        match self {
            MediaDuration::Known(seconds) => Some(seconds),
            MediaDuration::Unknown => None,
        }
    }
}

/// Read-only snapshot consumed by the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    pub duration: MediaDuration,
    pub is_live: bool,
}

/// Messages sent by the engine bridge.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackEvent {
    TimeUpdate {
        session: Uuid,
        time: f64,
    },
    DurationChange {
        session: Uuid,
        /// `null` when the engine has no finite duration.
        duration: Option<f64>,
    },
    Buffered {
        session: Uuid,
        ranges: Vec<BufferedRange>,
    },
    PlayState {
        session: Uuid,
        playing: bool,
    },
    Error {
        session: Uuid,
        message: String,
        #[serde(default)]
        fatal: bool,
    },
}

impl PlaybackEvent {
    pub fn session(&self) -> Uuid {
        match self {
            PlaybackEvent::TimeUpdate { session, .. }
            | PlaybackEvent::DurationChange { session, .. }
            | PlaybackEvent::Buffered { session, .. }
            | PlaybackEvent::PlayState { session, .. }
            | PlaybackEvent::Error { session, .. } => *session,
        }
    }
}

/// Messages sent to the engine bridge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackCommand {
    Load {
        session: Uuid,
        engine: EngineKind,
        url: String,
        is_live: bool,
    },
    Seek {
        session: Uuid,
        time: f64,
    },
    Play {
        session: Uuid,
    },
    Pause {
        session: Uuid,
    },
    Destroy {
        session: Uuid,
    },
}

/// Delivery channel to the engine.
pub trait PlaybackTransport {
    fn send(&self, command: PlaybackCommand) -> Result<()>;
}

/// Owned slot for the one engine bound to the video surface.
pub struct EngineSlot<T: PlaybackTransport> {
    transport: T,
    active: Option<Uuid>,
}

impl<T: PlaybackTransport> EngineSlot<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            active: None,
        }
    }

    /// Session id of the attached engine.
    pub fn active_session(&self) -> Option<Uuid> {
        self.active
    }

    /// Tear down the current engine, then load `source` under a new session.
    pub fn attach(&mut self, source: &MediaSource) -> Result<Uuid> {
        self.detach()?;
        let session = Uuid::new_v4();
        self.transport.send(PlaybackCommand::Load {
            session,
            engine: source.format.engine(),
            url: source.url.clone(),
            is_live: source.format.is_live(),
        })?;
        self.active = Some(session);
        tracing::debug!(%session, format = ?source.format, url = %source.url, "engine attached");
        Ok(session)
    }

    /// Destroy the current engine, if any.
    pub fn detach(&mut self) -> Result<()> {
        if let Some(session) = self.active.take() {
            self.transport.send(PlaybackCommand::Destroy { session })?;
            tracing::debug!(%session, "engine destroyed");
        }
        Ok(())
    }

    /// Whether `event` comes from the attached engine.
    pub fn accepts(&self, event: &PlaybackEvent) -> bool {
        self.active == Some(event.session())
    }

    pub fn seek(&self, time: f64) -> Result<()> {
        match self.active {
            Some(session) => self.transport.send(PlaybackCommand::Seek { session, time }),
            None => Ok(()),
        }
    }

    pub fn play(&self) -> Result<()> {
        match self.active {
            Some(session) => self.transport.send(PlaybackCommand::Play { session }),
            None => Ok(()),
        }
    }

    pub fn pause(&self) -> Result<()> {
        match self.active {
            Some(session) => self.transport.send(PlaybackCommand::Pause { session }),
            None => Ok(()),
        }
    }

    /// Pause when playing, play when paused.
    pub fn toggle(&self, is_playing: bool) -> Result<()> {
        if is_playing {
            self.pause()
        } else {
            self.play()
        }
    }
}

impl<T: PlaybackTransport> Drop for EngineSlot<T> {
    fn drop(&mut self) {
        if let Err(err) = self.detach() {
            tracing::warn!(error = %err, "failed to destroy engine on teardown");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Transport that records every command it is given.
    #[derive(Clone, Default)]
    pub struct RecordingTransport {
        pub sent: Rc<RefCell<Vec<PlaybackCommand>>>,
    }

    impl PlaybackTransport for RecordingTransport {
        fn send(&self, command: PlaybackCommand) -> Result<()> {
            self.sent.borrow_mut().push(command);
            Ok(())
        }
    }
}
