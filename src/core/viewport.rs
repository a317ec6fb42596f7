//! Visible time window of the timeline.
//!
//! The window is derived from the playback state on every change and thrown
//! away after the redraw; only the zoom level outlives a render pass.

use serde::{Deserialize, Serialize};

/// Window used when a live stream reports no duration.
pub const LIVE_FALLBACK_DURATION_SECONDS: f64 = 300.0;
/// Window used for finite media whose duration is degenerate.
pub const SHORT_FALLBACK_DURATION_SECONDS: f64 = 5.0;
/// How far past the current time a live window reaches.
pub const LIVE_LOOKAHEAD_SECONDS: f64 = 10.0;

/// Discrete zoom level, 1 (everything visible) to 10 (most zoomed in).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub const MIN: ZoomLevel = ZoomLevel(1);
    pub const MAX: ZoomLevel = ZoomLevel(10);

    /// Build a zoom level, clamping into `[1, 10]`.
    pub fn new(level: i32) -> Self {
        ZoomLevel(level.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Apply a relative change, saturating at the bounds.
    pub fn offset(self, delta: i32) -> Self {
        Self::new(self.0 as i32 + delta)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<i32> for ZoomLevel {
    fn from(level: i32) -> Self {
        Self::new(level)
    }
}

impl From<ZoomLevel> for i32 {
    fn from(level: ZoomLevel) -> Self {
        level.0 as i32
    }
}

/// `[start, end]` interval of media time mapped onto the surface width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportWindow {
    pub start: f64,
    pub end: f64,
}

impl ViewportWindow {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Map a media time to a horizontal position on a surface `width` wide.
    pub fn time_to_x(&self, time: f64, width: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        (time - self.start) / span * width
    }

    /// Inverse of [`ViewportWindow::time_to_x`]. `None` for an empty surface.
    pub fn x_to_time(&self, x: f64, width: f64) -> Option<f64> {
        if width <= 0.0 || !width.is_finite() || !x.is_finite() {
            return None;
        }
        Some(self.start + (x / width) * self.span())
    }
}

/// Inputs to the viewport model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportInput {
    /// Nominal duration, `0` when unknown.
    pub duration: f64,
    pub current_time: f64,
    pub zoom: ZoomLevel,
    pub is_live: bool,
}

/// Duration used for layout math, substituting a fallback when unknown.
pub fn effective_duration(duration: f64, is_live: bool) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else if is_live {
        LIVE_FALLBACK_DURATION_SECONDS
    } else {
        SHORT_FALLBACK_DURATION_SECONDS
    }
}

/// Compute the visible window, or `None` when a finite source has no usable
/// duration yet.
pub fn compute_viewport(input: ViewportInput) -> Option<ViewportWindow> {
    let usable_duration = input.duration.is_finite() && input.duration > 0.0;
    if !input.is_live && !usable_duration {
        return None;
    }

    let total = effective_duration(input.duration, input.is_live);
    let span = total / input.zoom.as_f64();
    let current_time = if input.current_time.is_finite() {
        input.current_time.max(0.0)
    } else {
        0.0
    };

    if input.is_live {
        let end = current_time + LIVE_LOOKAHEAD_SECONDS;
        return Some(ViewportWindow { start: end - span, end });
    }

    let mut start = current_time - span / 2.0;
    let mut end = current_time + span / 2.0;

    if start < 0.0 {
        start = 0.0;
        end = total.min(span);
    }
    if end > total {
        end = total;
        start = (total - span).max(0.0);
    }

    Some(ViewportWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn finite(duration: f64, current_time: f64, zoom: i32) -> ViewportWindow {
        compute_viewport(ViewportInput {
            duration,
            current_time,
            zoom: ZoomLevel::new(zoom),
            is_live: false,
        })
        .expect("finite media with a duration has a window")
    }

    #[test]
    fn test_zoom_level_clamps() {
        assert_eq!(ZoomLevel::new(0).get(), 1);
        assert_eq!(ZoomLevel::new(42).get(), 10);
        assert_eq!(ZoomLevel::new(5).offset(1).get(), 6);
        assert_eq!(ZoomLevel::MAX.offset(1), ZoomLevel::MAX);
        assert_eq!(ZoomLevel::MIN.offset(-1), ZoomLevel::MIN);
    }

    #[test]
    fn test_zoom_level_serializes_as_integer() {
        let json = serde_json::to_string(&ZoomLevel::new(4)).unwrap();
        assert_eq!(json, "4");
        let parsed: ZoomLevel = serde_json::from_str("99").unwrap();
        assert_eq!(parsed, ZoomLevel::MAX);
    }

    #[test]
    fn test_full_duration_at_zoom_one() {
        let window = finite(120.0, 60.0, 1);
        assert!((window.start - 0.0).abs() < EPS);
        assert!((window.end - 120.0).abs() < EPS);
    }

    #[test]
    fn test_centered_when_in_bounds() {
        let window = finite(100.0, 50.0, 4);
        assert!((window.start - 37.5).abs() < EPS);
        assert!((window.end - 62.5).abs() < EPS);
    }

    #[test]
    fn test_pinned_at_start() {
        let window = finite(100.0, 2.0, 2);
        assert_eq!(window.start, 0.0);
        assert!((window.end - 50.0).abs() < EPS);
    }

    #[test]
    fn test_pinned_at_end() {
        let window = finite(100.0, 99.0, 2);
        assert!((window.end - 100.0).abs() < EPS);
        assert!((window.start - 50.0).abs() < EPS);
    }

    #[test]
    fn test_finite_windows_stay_in_bounds_with_exact_width() {
        for duration in [0.5, 4.0, 9.0, 120.0, 7200.0] {
            for zoom in 1..=10 {
                for step in 0..=20 {
                    let current_time = duration * step as f64 / 20.0;
                    let window = finite(duration, current_time, zoom);
                    assert!(window.start >= 0.0);
                    assert!(window.start < window.end);
                    assert!(window.end <= duration + EPS);
                    let expected = duration / zoom as f64;
                    assert!((window.span() - expected).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_finite_without_duration_is_skipped() {
        let input = ViewportInput {
            duration: 0.0,
            current_time: 3.0,
            zoom: ZoomLevel::MIN,
            is_live: false,
        };
        assert!(compute_viewport(input).is_none());
        assert!(compute_viewport(ViewportInput { duration: -1.0, ..input }).is_none());
        assert!(compute_viewport(ViewportInput { duration: f64::NAN, ..input }).is_none());
    }

    #[test]
    fn test_live_unknown_duration_allows_negative_start() {
        let window = compute_viewport(ViewportInput {
            duration: 0.0,
            current_time: 50.0,
            zoom: ZoomLevel::new(2),
            is_live: true,
        })
        .unwrap();
        assert!((window.end - 60.0).abs() < EPS);
        assert!((window.start - -90.0).abs() < EPS);
    }

    #[test]
    fn test_live_window_tracks_edge() {
        for zoom in 1..=10 {
            let window = compute_viewport(ViewportInput {
                duration: 0.0,
                current_time: 1000.0,
                zoom: ZoomLevel::new(zoom),
                is_live: true,
            })
            .unwrap();
            assert!((window.end - 1010.0).abs() < EPS);
            assert!((window.span() - 300.0 / zoom as f64).abs() < EPS);
        }
    }

    #[test]
    fn test_live_with_known_duration_is_not_clamped() {
        let window = compute_viewport(ViewportInput {
            duration: 60.0,
            current_time: 58.0,
            zoom: ZoomLevel::MIN,
            is_live: true,
        })
        .unwrap();
        assert!((window.end - 68.0).abs() < EPS);
        assert!((window.start - 8.0).abs() < EPS);
    }

    #[test]
    fn test_effective_duration_fallbacks() {
        assert_eq!(effective_duration(42.0, false), 42.0);
        assert_eq!(effective_duration(42.0, true), 42.0);
        assert_eq!(effective_duration(0.0, true), LIVE_FALLBACK_DURATION_SECONDS);
        assert_eq!(effective_duration(0.0, false), SHORT_FALLBACK_DURATION_SECONDS);
        assert_eq!(effective_duration(f64::INFINITY, true), LIVE_FALLBACK_DURATION_SECONDS);
    }

    #[test]
    fn test_mapping_roundtrip_and_guards() {
        let window = ViewportWindow { start: 10.0, end: 30.0 };
        assert!((window.time_to_x(20.0, 200.0) - 100.0).abs() < EPS);
        assert_eq!(window.x_to_time(100.0, 200.0), Some(20.0));
        assert_eq!(window.x_to_time(100.0, 0.0), None);
        let empty = ViewportWindow { start: 5.0, end: 5.0 };
        assert_eq!(empty.time_to_x(5.0, 100.0), 0.0);
    }
}
