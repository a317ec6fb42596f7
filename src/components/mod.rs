//! UI components around the timeline.

mod buffer_legend;
mod format_selector;
mod video_player;

pub use buffer_legend::BufferLegend;
pub use format_selector::FormatSelector;
pub use video_player::{EvalTransport, VideoPlayer};
