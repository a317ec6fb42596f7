//! Host-side player state.
//!
//! Everything the engine reports lands here, and every timeline request is
//! resolved here before it reaches the engine.

use crate::core::interaction::TimelineRequest;
use crate::core::media::MediaFormat;
use crate::core::playback::{BufferedRange, MediaDuration, PlaybackEvent, PlaybackState};
use crate::core::viewport::ZoomLevel;
use crate::hotkeys::HotkeyContext;

/// Effect of applying an engine event.
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    /// State changed; the timeline should redraw.
    Updated,
    /// Nothing observable changed.
    Unchanged,
    /// The engine reported an error; recovery is its own business.
    EngineError { message: String, fatal: bool },
}

/// A resolved host action for a timeline request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostAction {
    /// Forward an absolute seek to the engine.
    Seek(f64),
    /// The zoom level changed; redraw only.
    Zoomed(ZoomLevel),
    /// Nothing to do.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub format: MediaFormat,
    pub current_time: f64,
    pub duration: MediaDuration,
    pub buffered: Vec<BufferedRange>,
    pub is_playing: bool,
    pub zoom: ZoomLevel,
    /// A form control has keyboard focus; hotkeys stay off until it blurs.
    pub input_focused: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(MediaFormat::Hls, ZoomLevel::MIN)
    }
}

impl PlayerState {
    pub fn new(format: MediaFormat, zoom: ZoomLevel) -> Self {
        Self {
            format,
            current_time: 0.0,
            duration: MediaDuration::Unknown,
            buffered: Vec::new(),
            is_playing: false,
            zoom,
            input_focused: false,
        }
    }

    pub fn hotkey_context(&self) -> HotkeyContext {
        HotkeyContext {
            is_live: self.is_live(),
            input_focused: self.input_focused,
        }
    }

    pub fn is_live(&self) -> bool {
        self.format.is_live()
    }

    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_time: self.current_time,
            duration: self.duration,
            is_live: self.is_live(),
        }
    }

    /// End of the most recently reported buffered range.
    pub fn buffer_end(&self) -> f64 {
        self.buffered.last().map(|range| range.end).unwrap_or(0.0)
    }

    /// Apply an engine event. Session filtering happens in the engine slot.
    pub fn apply_event(&mut self, event: PlaybackEvent) -> EventOutcome {
        match event {
            PlaybackEvent::TimeUpdate { time, .. } => {
                let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
                self.update(|state| &mut state.current_time, time)
            }
            PlaybackEvent::DurationChange { duration, .. } => {
                let duration = MediaDuration::from_reported(duration);
                self.update(|state| &mut state.duration, duration)
            }
            PlaybackEvent::Buffered { ranges, .. } => self.update(|state| &mut state.buffered, ranges),
            PlaybackEvent::PlayState { playing, .. } => self.update(|state| &mut state.is_playing, playing),
            PlaybackEvent::Error { message, fatal, .. } => EventOutcome::EngineError { message, fatal },
        }
    }

    fn update<V: PartialEq>(&mut self, field: impl FnOnce(&mut Self) -> &mut V, value: V) -> EventOutcome {
        let slot = field(self);
        if *slot == value {
            EventOutcome::Unchanged
        } else {
            *slot = value;
            EventOutcome::Updated
        }
    }

    /// Clamp a requested seek into the playable range.
    ///
    /// Finite media is bounded by its duration; live media only by zero.
    pub fn clamp_seek(&self, time: f64) -> f64 {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        match (self.is_live(), self.duration.known()) {
            (false, Some(duration)) => time.min(duration),
            _ => time,
        }
    }

    /// Resolve a seek and optimistically move the playhead.
    pub fn seek(&mut self, time: f64) -> HostAction {
        let target = self.clamp_seek(time);
        self.current_time = target;
        HostAction::Seek(target)
    }

    pub fn change_zoom(&mut self, delta: i32) -> HostAction {
        let next = self.zoom.offset(delta);
        if next == self.zoom {
            return HostAction::None;
        }
        self.zoom = next;
        HostAction::Zoomed(next)
    }

    pub fn reset_zoom(&mut self) -> HostAction {
        self.change_zoom(-(ZoomLevel::MAX.get() as i32))
    }

    pub fn handle_request(&mut self, request: TimelineRequest) -> HostAction {
        match request {
            TimelineRequest::Seek(time) => self.seek(time),
            TimelineRequest::Zoom(delta) => self.change_zoom(delta),
        }
    }

    /// Relative seek for the skip buttons. Disabled for live sources.
    pub fn skip(&mut self, seconds: f64) -> HostAction {
        if self.is_live() {
            return HostAction::None;
        }
        self.seek(self.current_time + seconds)
    }

    /// Switch to another format. Playback state resets; zoom survives.
    pub fn select_format(&mut self, format: MediaFormat) {
        let input_focused = self.input_focused;
        *self = Self::new(format, self.zoom);
        self.input_focused = input_focused;
    }

    /// Label for the transport time display.
    pub fn time_display(&self) -> String {
        if self.is_live() {
            return "LIVE".to_string();
        }
        format!(
            "{} / {}",
            crate::core::time_format::format_time(self.current_time),
            crate::core::time_format::format_time(self.duration.seconds_or_zero()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn finite_state(duration: f64) -> PlayerState {
        let mut state = PlayerState::new(MediaFormat::Mp4, ZoomLevel::MIN);
        state.apply_event(PlaybackEvent::DurationChange { session: Uuid::nil(), duration: Some(duration) });
        state
    }

    #[test]
    fn test_events_update_state() {
        let mut state = finite_state(120.0);
        let session = Uuid::nil();
        assert_eq!(state.duration, MediaDuration::Known(120.0));
        assert_eq!(state.apply_event(PlaybackEvent::TimeUpdate { session, time: 12.5 }), EventOutcome::Updated);
        assert_eq!(state.apply_event(PlaybackEvent::TimeUpdate { session, time: 12.5 }), EventOutcome::Unchanged);
        state.apply_event(PlaybackEvent::Buffered {
            session,
            ranges: vec![BufferedRange::new(0.0, 20.0), BufferedRange::new(40.0, 55.0)],
        });
        assert_eq!(state.buffer_end(), 55.0);
        state.apply_event(PlaybackEvent::PlayState { session, playing: true });
        assert!(state.is_playing);
    }

    #[test]
    fn test_engine_errors_surface_without_state_change() {
        let mut state = finite_state(10.0);
        let before = state.clone();
        let outcome = state.apply_event(PlaybackEvent::Error {
            session: Uuid::nil(),
            message: "network".to_string(),
            fatal: true,
        });
        assert!(matches!(outcome, EventOutcome::EngineError { fatal: true, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_seek_is_clamped_for_finite_media() {
        let mut state = finite_state(100.0);
        assert_eq!(state.seek(140.0), HostAction::Seek(100.0));
        assert_eq!(state.seek(-4.0), HostAction::Seek(0.0));
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn test_live_seek_only_clamped_at_zero() {
        let mut state = PlayerState::new(MediaFormat::Flv, ZoomLevel::MIN);
        assert_eq!(state.seek(500.0), HostAction::Seek(500.0));
        assert_eq!(state.seek(-1.0), HostAction::Seek(0.0));
    }

    #[test]
    fn test_zoom_requests_clamp() {
        let mut state = PlayerState::default();
        assert_eq!(state.handle_request(TimelineRequest::Zoom(-1)), HostAction::None);
        assert_eq!(state.handle_request(TimelineRequest::Zoom(1)), HostAction::Zoomed(ZoomLevel::new(2)));
        for _ in 0..20 {
            state.change_zoom(1);
        }
        assert_eq!(state.zoom, ZoomLevel::MAX);
        assert_eq!(state.reset_zoom(), HostAction::Zoomed(ZoomLevel::MIN));
    }

    #[test]
    fn test_format_change_resets_playback_but_keeps_zoom() {
        let mut state = finite_state(60.0);
        state.current_time = 30.0;
        state.is_playing = true;
        state.buffered.push(BufferedRange::new(0.0, 40.0));
        state.change_zoom(3);

        state.select_format(MediaFormat::LiveHls);
        assert!(state.is_live());
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, MediaDuration::Unknown);
        assert!(state.buffered.is_empty());
        assert!(!state.is_playing);
        assert_eq!(state.zoom, ZoomLevel::new(4));
    }

    #[test]
    fn test_focused_selector_suppresses_hotkeys() {
        use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyResult};
        use dioxus::prelude::Key;

        let press = |state: &PlayerState, key: Key| {
            handle_hotkey(&key, false, false, false, false, &state.hotkey_context())
        };
        let mut state = finite_state(60.0);
        assert_eq!(
            press(&state, Key::Character(" ".to_string())),
            HotkeyResult::Action(HotkeyAction::PlayPause)
        );

        state.input_focused = true;
        for key in [Key::Character(" ".to_string()), Key::ArrowLeft, Key::ArrowRight] {
            assert_eq!(press(&state, key), HotkeyResult::Suppressed);
        }

        // Picking a format from the focused select keeps it focused.
        state.select_format(MediaFormat::Mp4);
        assert_eq!(press(&state, Key::ArrowRight), HotkeyResult::Suppressed);

        state.input_focused = false;
        assert_eq!(press(&state, Key::ArrowRight), HotkeyResult::Action(HotkeyAction::SeekForward));
    }

    #[test]
    fn test_skip_buttons() {
        let mut state = finite_state(25.0);
        assert_eq!(state.skip(10.0), HostAction::Seek(10.0));
        assert_eq!(state.skip(10.0), HostAction::Seek(20.0));
        assert_eq!(state.skip(10.0), HostAction::Seek(25.0));
        assert_eq!(state.skip(-100.0), HostAction::Seek(0.0));

        let mut live = PlayerState::new(MediaFormat::LiveHls, ZoomLevel::MIN);
        assert_eq!(live.skip(10.0), HostAction::None);
    }

    #[test]
    fn test_time_display() {
        let mut state = finite_state(3725.0);
        state.current_time = 65.0;
        assert_eq!(state.time_display(), "1:05 / 1:02:05");
        state.select_format(MediaFormat::Flv);
        assert_eq!(state.time_display(), "LIVE");
    }
}
