use dioxus::prelude::*;

use crate::constants::{ACCENT_LIVE, BG_HOVER, TEXT_MUTED, TEXT_PRIMARY};

/// Playback button
#[component]
pub(crate) fn PlaybackBtn(
    label: String,
    #[props(default = false)] primary: bool,
    on_click: EventHandler<MouseEvent>,
) -> Element {
    let bg = if primary { BG_HOVER } else { "transparent" };
    rsx! {
        button {
            class: "collapse-btn",
            style: "min-width: 48px; height: 26px; padding: 0 8px; border: none; border-radius: 4px; background-color: {bg}; color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer; transition: all 0.12s ease;",
            onclick: move |e| on_click.call(e),
            "{label}"
        }
    }
}

/// Play/pause, skip buttons and the time readout.
///
/// Skip buttons are hidden for live sources and the readout becomes a LIVE
/// indicator.
#[component]
pub fn PlaybackControls(
    is_playing: bool,
    is_live: bool,
    time_display: String,
    seek_step_seconds: f64,
    on_toggle_play: EventHandler<MouseEvent>,
    on_seek_backward: EventHandler<MouseEvent>,
    on_seek_forward: EventHandler<MouseEvent>,
) -> Element {
    let play_label = if is_playing { "Pause" } else { "Play" };
    let step = seek_step_seconds.round() as i64;
    let readout_color = if is_live { ACCENT_LIVE } else { TEXT_MUTED };
    let readout_weight = if is_live { "700" } else { "400" };

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 6px; padding: 6px 10px;",
            PlaybackBtn {
                label: play_label.to_string(),
                primary: true,
                on_click: move |e| on_toggle_play.call(e),
            }
            if !is_live {
                PlaybackBtn { label: format!("-{step}s"), on_click: move |e| on_seek_backward.call(e) }
                PlaybackBtn { label: format!("+{step}s"), on_click: move |e| on_seek_forward.call(e) }
            }
            span {
                style: "margin-left: 8px; font-size: 12px; font-variant-numeric: tabular-nums; color: {readout_color}; font-weight: {readout_weight};",
                "{time_display}"
            }
        }
    }
}
