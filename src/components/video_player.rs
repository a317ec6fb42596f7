use dioxus::prelude::*;

use crate::constants::{BG_DEEPEST, TEXT_MUTED, VIDEO_ELEMENT_ID};
use crate::core::playback::{PlaybackCommand, PlaybackTransport};
use crate::error::{PlayerError, Result};

/// Sends engine commands through the media engine eval.
#[derive(Clone)]
pub struct EvalTransport {
    eval: document::Eval,
}

impl EvalTransport {
    pub fn new(eval: document::Eval) -> Self {
        Self { eval }
    }
}

impl PlaybackTransport for EvalTransport {
    fn send(&self, command: PlaybackCommand) -> Result<()> {
        self.eval
            .send(command)
            .map_err(|err| PlayerError::command(format!("{err:?}")))
    }
}

/// The `<video>` surface the engine script attaches to.
#[component]
pub fn VideoPlayer(source_label: String) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-height: 0; display: flex; flex-direction: column; background-color: {BG_DEEPEST};",
            video {
                id: VIDEO_ELEMENT_ID,
                style: "flex: 1; min-height: 0; width: 100%; background-color: #000;",
                controls: true,
                playsinline: true,
            }
            div {
                style: "padding: 4px 10px; font-size: 11px; color: {TEXT_MUTED};",
                "{source_label}"
            }
        }
    }
}
