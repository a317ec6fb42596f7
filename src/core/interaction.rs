//! Pointer gestures on the timeline surface.
//!
//! The controller only turns gestures into [`TimelineRequest`]s. It never
//! touches the window or the zoom level; the host owns both and decides what
//! to do with each request.

use super::viewport::ViewportWindow;

/// What a gesture asks the host to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelineRequest {
    /// Seek to an absolute media time. Not clamped.
    Seek(f64),
    /// Change the zoom level by this many steps.
    Zoom(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Dragging,
}

/// Click, drag-to-scrub and wheel-to-zoom handling.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimelineInteraction {
    state: PointerState,
}

impl TimelineInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == PointerState::Dragging
    }

    pub fn pointer_down(&mut self) {
        self.state = PointerState::Dragging;
    }

    /// Scrub while a drag is held.
    pub fn pointer_move(
        &mut self,
        x: f64,
        width: f64,
        window: Option<ViewportWindow>,
    ) -> Option<TimelineRequest> {
        if !self.is_dragging() {
            return None;
        }
        seek_request(x, width, window)
    }

    pub fn pointer_up(&mut self) {
        self.state = PointerState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.state = PointerState::Idle;
    }

    /// Click-to-seek, suppressed while a drag is in progress.
    pub fn click(&self, x: f64, width: f64, window: Option<ViewportWindow>) -> Option<TimelineRequest> {
        if self.is_dragging() {
            return None;
        }
        seek_request(x, width, window)
    }

    /// Wheel away from the user zooms in, toward the user zooms out.
    pub fn wheel(&self, delta_y: f64) -> Option<TimelineRequest> {
        if delta_y < 0.0 {
            Some(TimelineRequest::Zoom(1))
        } else if delta_y > 0.0 {
            Some(TimelineRequest::Zoom(-1))
        } else {
            None
        }
    }
}

fn seek_request(x: f64, width: f64, window: Option<ViewportWindow>) -> Option<TimelineRequest> {
    let time = window?.x_to_time(x, width)?;
    Some(TimelineRequest::Seek(time))
}
