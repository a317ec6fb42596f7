//! Root application component
//!
//! Owns the player state, the engine slot and both webview bridges, and
//! redraws the timeline whenever anything it depends on changes.

use dioxus::prelude::*;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::components::{BufferLegend, EvalTransport, FormatSelector, VideoPlayer};
use crate::constants::{
    BG_BASE, BG_SURFACE, BORDER_DEFAULT, MEDIA_ENGINE_SCRIPT, TEXT_DIM, TEXT_PRIMARY,
    TIMELINE_CANVAS_SCRIPT,
};
use crate::core::interaction::TimelineRequest;
use crate::core::media::MediaFormat;
use crate::core::paths::snapshot_dir;
use crate::core::playback::{EngineSlot, PlaybackEvent};
use crate::core::raster::save_snapshot;
use crate::core::scene::{render_timeline, Scene, SurfaceSize, TimelineInput};
use crate::core::viewport::ViewportWindow;
use crate::error::PlayerError;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyResult};
use crate::state::{EventOutcome, HostAction, PlayerConfig, PlayerState};
use crate::timeline::{PlaybackControls, TimelinePanel};

const BRIDGE_RETRY: Duration = Duration::from_millis(100);

#[component]
pub fn App() -> Element {
    let config = use_context::<PlayerConfig>();

    let initial_format = config.initial_format;
    let initial_zoom = config.initial_zoom;
    let mut player = use_signal(move || PlayerState::new(initial_format, initial_zoom));
    let format = use_memo(move || player.read().format);

    let mut engine_eval = use_signal(|| None::<document::Eval>);
    let mut engine = use_signal(|| None::<EngineSlot<EvalTransport>>);
    let mut canvas_eval = use_signal(|| None::<document::Eval>);
    let mut surface = use_signal(|| None::<SurfaceSize>);
    let mut drawn_window = use_signal(|| None::<ViewportWindow>);
    let mut last_scene = use_signal(|| None::<Scene>);

    use_effect(move || {
        if engine_eval().is_some() {
            return;
        }
        let eval = document::eval(MEDIA_ENGINE_SCRIPT);
        engine.set(Some(EngineSlot::new(EvalTransport::new(eval.clone()))));
        engine_eval.set(Some(eval));
    });

    use_effect(move || {
        if canvas_eval().is_some() {
            return;
        }
        canvas_eval.set(Some(document::eval(TIMELINE_CANVAS_SCRIPT)));
    });

    // Attach the engine for the selected format. Reruns on format change and
    // once the engine bridge exists.
    let config_for_attach = config.clone();
    use_effect(move || {
        let format = format();
        if engine_eval().is_none() {
            return;
        }
        let source = config_for_attach.source_for(format);
        let mut slot = engine.write();
        let Some(slot) = slot.as_mut() else {
            return;
        };
        match slot.attach(&source) {
            Ok(session) => info!(format = ?format, url = %source.url, %session, "attached media engine"),
            Err(err) => warn!(format = ?format, "failed to attach media engine: {err}"),
        }
    });

    use_future(move || async move {
        loop {
            let Some(mut eval) = engine_eval() else {
                tokio::time::sleep(BRIDGE_RETRY).await;
                continue;
            };
            loop {
                match eval.recv::<PlaybackEvent>().await {
                    Ok(event) => {
                        let accepted = engine
                            .peek()
                            .as_ref()
                            .is_some_and(|slot| slot.accepts(&event));
                        if !accepted {
                            let active = engine.peek().as_ref().and_then(|slot| slot.active_session());
                            debug!(session = %event.session(), active = ?active, "dropping event from stale engine");
                            continue;
                        }
                        match player.write().apply_event(event) {
                            EventOutcome::EngineError { message, fatal } => {
                                warn!(fatal, "media engine error: {message}");
                            }
                            EventOutcome::Updated | EventOutcome::Unchanged => {}
                        }
                    }
                    Err(err) => {
                        warn!("{}", PlayerError::bridge_closed(format!("media engine: {err:?}")));
                        break;
                    }
                }
            }
            tokio::time::sleep(BRIDGE_RETRY).await;
        }
    });

    use_future(move || async move {
        loop {
            let Some(mut eval) = canvas_eval() else {
                tokio::time::sleep(BRIDGE_RETRY).await;
                continue;
            };
            loop {
                match eval.recv::<SurfaceSize>().await {
                    Ok(size) => {
                        if surface() != Some(size) {
                            debug!(width = size.width, height = size.height, dpr = size.pixel_ratio, "timeline surface resized");
                            surface.set(Some(size));
                        }
                    }
                    Err(err) => {
                        warn!("{}", PlayerError::bridge_closed(format!("timeline canvas: {err:?}")));
                        break;
                    }
                }
            }
            tokio::time::sleep(BRIDGE_RETRY).await;
        }
    });

    // Full redraw on every state or surface change.
    use_effect(move || {
        let state = player.read();
        let Some(surface) = surface() else {
            return;
        };
        let Some(eval) = canvas_eval() else {
            return;
        };
        let playback = state.snapshot();
        let input = TimelineInput {
            duration: playback.duration.seconds_or_zero(),
            current_time: playback.current_time,
            buffered: &state.buffered,
            zoom: state.zoom,
            is_live: playback.is_live,
        };
        match render_timeline(input, surface) {
            Some(frame) => {
                if let Err(err) = eval.send(&frame.scene) {
                    warn!("failed to send timeline scene: {err:?}");
                }
                drawn_window.set(Some(frame.window));
                last_scene.set(Some(frame.scene));
            }
            None => {
                if let Err(err) = eval.send(&Scene::new(surface)) {
                    warn!("failed to clear timeline: {err:?}");
                }
                drawn_window.set(None);
                last_scene.set(None);
            }
        }
    });

    let run_action = move |action: HostAction| match action {
        HostAction::Seek(time) => {
            if let Some(slot) = engine.peek().as_ref() {
                if let Err(err) = slot.seek(time) {
                    warn!(time, "seek failed: {err}");
                }
            }
        }
        HostAction::Zoomed(level) => debug!(zoom = level.get(), "timeline zoom changed"),
        HostAction::None => {}
    };

    let toggle_playback = move || {
        let is_playing = player.peek().is_playing;
        if let Some(slot) = engine.peek().as_ref() {
            if let Err(err) = slot.toggle(is_playing) {
                warn!("play/pause failed: {err}");
            }
        }
    };

    let export_snapshot = move || {
        let Some(scene) = last_scene.peek().clone() else {
            return;
        };
        let path = snapshot_dir().join(format!("timeline-{}.png", uuid::Uuid::new_v4()));
        match save_snapshot(&scene, &path) {
            Ok(()) => info!(path = %path.display(), "saved timeline snapshot"),
            Err(err) => warn!("snapshot export failed: {err}"),
        }
    };

    let seek_step = config.seek_step_seconds;
    let formats = config.formats();
    let state = player.read();
    let source_label = config.source_for(state.format).display_label().to_string();
    let is_live = state.is_live();
    let is_playing = state.is_playing;
    let time_display = state.time_display();
    let zoom = state.zoom;
    let buffer_end = state.buffer_end();
    let selected_format = state.format;
    drop(state);

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; height: 100vh; width: 100vw;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                overflow: hidden; outline: none;
            ",
            tabindex: "0",
            onkeydown: move |e: KeyboardEvent| {
                let hotkey_context = player.peek().hotkey_context();
                let modifiers = e.modifiers();
                let result = handle_hotkey(
                    &e.key(),
                    modifiers.shift(),
                    modifiers.ctrl(),
                    modifiers.alt(),
                    modifiers.meta(),
                    &hotkey_context,
                );
                let HotkeyResult::Action(action) = result else {
                    return;
                };
                e.prevent_default();
                match action {
                    HotkeyAction::PlayPause => toggle_playback(),
                    HotkeyAction::TimelineZoomIn => run_action(player.write().change_zoom(1)),
                    HotkeyAction::TimelineZoomOut => run_action(player.write().change_zoom(-1)),
                    HotkeyAction::TimelineZoomReset => run_action(player.write().reset_zoom()),
                    HotkeyAction::SeekBackward => run_action(player.write().skip(-seek_step)),
                    HotkeyAction::SeekForward => run_action(player.write().skip(seek_step)),
                    HotkeyAction::SaveSnapshot => export_snapshot(),
                }
            },

            div {
                style: "
                    display: flex; align-items: center; justify-content: space-between;
                    height: 40px; padding: 0 14px; flex-shrink: 0;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                ",
                span { style: "font-size: 13px; font-weight: 600;", "Video Timeline Player" }
                FormatSelector {
                    formats,
                    selected: selected_format,
                    on_select: move |format: MediaFormat| {
                        if player.peek().format == format {
                            return;
                        }
                        info!(format = ?format, "format selected");
                        player.write().select_format(format);
                    },
                    on_focus_change: move |focused: bool| {
                        if player.peek().input_focused != focused {
                            player.write().input_focused = focused;
                        }
                    },
                }
            }

            VideoPlayer { source_label }

            PlaybackControls {
                is_playing,
                is_live,
                time_display,
                seek_step_seconds: seek_step,
                on_toggle_play: move |_| toggle_playback(),
                on_seek_backward: move |_| run_action(player.write().skip(-seek_step)),
                on_seek_forward: move |_| run_action(player.write().skip(seek_step)),
            }

            TimelinePanel {
                window: drawn_window(),
                surface_width: surface().map(|size| size.width).unwrap_or(0.0),
                zoom,
                buffer_end,
                on_request: move |request: TimelineRequest| {
                    let action = player.write().handle_request(request);
                    run_action(action);
                },
            }

            div {
                style: "display: flex; align-items: center; justify-content: space-between; padding-right: 10px;",
                BufferLegend {}
                span { style: "font-size: 10px; color: {TEXT_DIM};", "Space play/pause, +/- zoom, 0 reset, arrows seek, Ctrl+S snapshot" }
            }
        }
    }
}
