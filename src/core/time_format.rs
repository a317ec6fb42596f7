//! Human-readable time labels for the timeline and the transport display.

/// Media shorter than this gets sub-second labels.
pub const SHORT_MEDIA_THRESHOLD_SECONDS: f64 = 10.0;

// Absorbs binary float error so 65.3 yields 3 deciseconds, not 2.
const DECISECOND_EPSILON: f64 = 1e-6;

/// Which label style to use for a piece of media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeLabelMode {
    /// `H:MM:SS` or `M:SS`.
    #[default]
    Standard,
    /// `S.Ds`, used for very short media.
    ShortMedia,
}

impl TimeLabelMode {
    /// Pick the label style from the duration used for layout.
    pub fn for_duration(duration: f64) -> Self {
        if duration.is_finite() && duration < SHORT_MEDIA_THRESHOLD_SECONDS {
            TimeLabelMode::ShortMedia
        } else {
            TimeLabelMode::Standard
        }
    }
}

/// Format seconds as `M:SS`, or `H:MM:SS` once an hour is reached.
///
/// `NaN`, infinities and negative values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    format_time_with_mode(seconds, TimeLabelMode::Standard)
}

/// Format seconds using an explicit label style.
pub fn format_time_with_mode(seconds: f64, mode: TimeLabelMode) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let seconds = seconds.max(0.0);

    match mode {
        TimeLabelMode::ShortMedia => {
            let total_deciseconds = (seconds * 10.0 + DECISECOND_EPSILON).floor() as u64;
            let whole = (total_deciseconds / 10) % 60;
            let tenths = total_deciseconds % 10;
            format!("{}.{}s", whole, tenths)
        }
        TimeLabelMode::Standard => {
            let total = seconds.floor() as u64;
            let hours = total / 3600;
            let minutes = (total % 3600) / 60;
            let secs = total % 60;
            if hours > 0 {
                format!("{}:{:02}:{:02}", hours, minutes, secs)
            } else {
                format!("{}:{:02}", minutes, secs)
            }
        }
    }
}
