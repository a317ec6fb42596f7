//! Timeline module

mod panel;
mod playback_controls;

pub use panel::TimelinePanel;
pub use playback_controls::PlaybackControls;
