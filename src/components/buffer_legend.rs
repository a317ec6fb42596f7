use dioxus::prelude::*;

use crate::constants::{TEXT_MUTED, TIMELINE_BUFFERED, TIMELINE_PLAYHEAD, TIMELINE_QUALITY_TIERS};

/// Legend for the overlays drawn on the timeline canvas.
#[component]
pub fn BufferLegend() -> Element {
    let mut entries = vec![
        ("Buffered".to_string(), TIMELINE_BUFFERED.to_css()),
        ("Playhead".to_string(), TIMELINE_PLAYHEAD.to_css()),
    ];
    entries.extend(
        TIMELINE_QUALITY_TIERS
            .iter()
            .map(|tier| (tier.name.to_string(), tier.color.to_css())),
    );

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 14px; padding: 6px 10px; font-size: 11px; color: {TEXT_MUTED};",
            for (name, color) in entries {
                div {
                    key: "{name}",
                    style: "display: flex; align-items: center; gap: 6px;",
                    div { style: "width: 12px; height: 12px; border-radius: 2px; background-color: {color};" }
                    span { "{name}" }
                }
            }
        }
    }
}
