use dioxus::prelude::*;

use crate::constants::{BG_SURFACE, BORDER_DEFAULT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::core::media::MediaFormat;

#[component]
pub fn FormatSelector(
    formats: Vec<MediaFormat>,
    selected: MediaFormat,
    on_select: EventHandler<MediaFormat>,
    /// Fires `true` on focus and `false` on blur.
    on_focus_change: EventHandler<bool>,
) -> Element {
    let options = formats.clone();
    rsx! {
        label {
            style: "display: flex; align-items: center; gap: 8px; font-size: 12px; color: {TEXT_SECONDARY};",
            "Format"
            select {
                style: "background-color: {BG_SURFACE}; color: {TEXT_PRIMARY}; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; padding: 3px 6px; font-size: 12px;",
                onfocus: move |_| on_focus_change.call(true),
                onblur: move |_| on_focus_change.call(false),
                onchange: move |e| {
                    let picked = e
                        .value()
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| options.get(index).copied());
                    if let Some(format) = picked {
                        on_select.call(format);
                    }
                },
                for (index, format) in formats.iter().enumerate() {
                    option {
                        key: "{index}",
                        value: "{index}",
                        selected: *format == selected,
                        "{format.label()}"
                    }
                }
            }
        }
    }
}
