//! Time-axis tick planning.

use super::time_format::{format_time_with_mode, TimeLabelMode};
use super::viewport::{ViewportWindow, ZoomLevel};

/// Below this effective duration the planner falls back to quarter ticks.
const QUARTER_FALLBACK_DURATION_SECONDS: f64 = 5.0;
const MIN_MARKERS: usize = 2;
// Halving bound when a deep zoom leaves a single tick in view.
const MAX_STEP_REFINEMENTS: u32 = 8;
const TICK_EPSILON: f64 = 1e-9;
/// Upper bound on ticks per window; wider spans get a coarser grid.
pub const MAX_MARKERS: usize = 500;

/// A labelled tick on the time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TickMarker {
    pub time: f64,
    pub label: String,
}

/// Tick spacing in seconds for the given zoom and effective duration.
pub fn tick_step(zoom: ZoomLevel, effective_duration: f64) -> f64 {
    if effective_duration < 10.0 {
        return 0.5;
    }
    match zoom.get() {
        0..=1 => 60.0,
        2..=3 => 30.0,
        4..=5 => 10.0,
        6..=8 => 5.0,
        _ => 1.0,
    }
}

/// Plan the ticks visible in `window`, ascending and without duplicates.
pub fn plan_markers(
    window: ViewportWindow,
    zoom: ZoomLevel,
    effective_duration: f64,
) -> Vec<TickMarker> {
    let mode = TimeLabelMode::for_duration(effective_duration);
    let mut step = coarsen_step(window, tick_step(zoom, effective_duration));
    let mut markers = markers_on_grid(window, step, mode);

    if markers.len() < MIN_MARKERS && effective_duration < QUARTER_FALLBACK_DURATION_SECONDS {
        return quarter_markers(effective_duration, mode);
    }

    let mut refinements = 0;
    while markers.len() < MIN_MARKERS && refinements < MAX_STEP_REFINEMENTS {
        step /= 2.0;
        markers = markers_on_grid(window, step, mode);
        refinements += 1;
    }

    markers
}

/// Double `step` until the non-negative part of `window` holds at most
/// [`MAX_MARKERS`] grid points.
fn coarsen_step(window: ViewportWindow, mut step: f64) -> f64 {
    let visible = window.end - window.start.max(0.0);
    if step <= 0.0 || !step.is_finite() || !visible.is_finite() {
        return step;
    }
    while visible / step >= MAX_MARKERS as f64 {
        step *= 2.0;
    }
    step
}

fn markers_on_grid(window: ViewportWindow, step: f64, mode: TimeLabelMode) -> Vec<TickMarker> {
    if !(step > 0.0) || !window.start.is_finite() || !window.end.is_finite() {
        return Vec::new();
    }
    // Media time never goes below zero, even when a live window does.
    let lower = window.start.max(0.0);
    let first_index = (window.start / step).floor().max(0.0) as u64;
    let mut markers = Vec::new();
    let mut index = first_index;
    loop {
        let time = index as f64 * step;
        if time > window.end + TICK_EPSILON {
            break;
        }
        if time + TICK_EPSILON >= lower {
            markers.push(TickMarker {
                time,
                label: format_time_with_mode(time, mode),
            });
        }
        index += 1;
    }
    markers
}

fn quarter_markers(effective_duration: f64, mode: TimeLabelMode) -> Vec<TickMarker> {
    let quarter = effective_duration / 4.0;
    (0..=4)
        .map(|i| {
            let time = i as f64 * quarter;
            TickMarker {
                time,
                label: format_time_with_mode(time, mode),
            }
        })
        .collect()
}
