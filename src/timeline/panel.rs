use dioxus::prelude::*;

use crate::constants::{
    BG_ELEVATED, BG_SURFACE, BORDER_DEFAULT, TEXT_MUTED, TIMELINE_CANVAS_ID, TIMELINE_HEIGHT,
};
use crate::core::interaction::{TimelineInteraction, TimelineRequest};
use crate::core::time_format::format_time;
use crate::core::viewport::{ViewportWindow, ZoomLevel};

/// Canvas timeline plus its header.
///
/// The canvas itself is painted by the canvas bridge; this component only
/// turns pointer input into [`TimelineRequest`]s for the host.
#[component]
pub fn TimelinePanel(
    /// Window of the last frame drawn, `None` until one is drawn.
    #[props(!optional)]
    window: Option<ViewportWindow>,
    /// CSS width of the canvas as last reported by the bridge.
    surface_width: f64,
    zoom: ZoomLevel,
    /// End of the last buffered range, shown in the header.
    buffer_end: f64,
    on_request: EventHandler<TimelineRequest>,
) -> Element {
    let mut interaction = use_signal(TimelineInteraction::new);
    let cursor = if interaction.read().is_dragging() { "grabbing" } else { "pointer" };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                background-color: {BG_ELEVATED}; border-top: 1px solid {BORDER_DEFAULT};
            ",

            div {
                style: "
                    display: flex; align-items: center; justify-content: space-between;
                    padding: 4px 10px; font-size: 11px; color: {TEXT_MUTED};
                ",
                span { "Timeline" }
                div {
                    style: "display: flex; gap: 14px;",
                    span { "Buffered to {format_time(buffer_end)}" }
                    span { "Zoom: {zoom.get()}x" }
                }
            }

            canvas {
                id: TIMELINE_CANVAS_ID,
                style: "
                    display: block; width: 100%; height: {TIMELINE_HEIGHT}px;
                    background-color: {BG_SURFACE}; cursor: {cursor};
                ",
                onmousedown: move |e| {
                    e.prevent_default();
                    interaction.write().pointer_down();
                },
                onmousemove: move |e| {
                    let x = e.element_coordinates().x;
                    let request = interaction.write().pointer_move(x, surface_width, window);
                    if let Some(request) = request {
                        on_request.call(request);
                    }
                },
                onmouseup: move |_| interaction.write().pointer_up(),
                onmouseleave: move |_| interaction.write().pointer_leave(),
                onclick: move |e| {
                    let x = e.element_coordinates().x;
                    if let Some(request) = interaction.read().click(x, surface_width, window) {
                        on_request.call(request);
                    }
                },
                onwheel: move |e| {
                    e.prevent_default();
                    let delta_y = e.delta().strip_units().y;
                    if let Some(request) = interaction.read().wheel(delta_y) {
                        on_request.call(request);
                    }
                },
            }
        }
    }
}
