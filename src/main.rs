//! Video Timeline Player
//!
//! A desktop media player with a zoomable, buffer-aware canvas timeline.

mod app;
mod components;
mod constants;
mod core;
mod error;
mod hotkeys;
mod state;
mod timeline;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

use crate::core::paths::config_path;
use crate::state::PlayerConfig;

fn main() {
    let path = config_path();
    let existed = path.exists();
    let (config, config_error) = match PlayerConfig::load(&path) {
        Ok(config) => (config, None),
        Err(err) => (PlayerConfig::default(), Some(err)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match config_error {
        Some(err) => tracing::warn!("{err}; using default settings"),
        None if existed => tracing::debug!(path = %path.display(), "configuration loaded"),
        None => match config.save(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default configuration"),
            Err(err) => tracing::debug!("could not write default configuration: {err}"),
        },
    }
    for (source, detected) in config.format_mismatches() {
        tracing::warn!(
            url = %source.url,
            configured = ?source.format,
            detected = ?detected,
            "source URL does not look like its configured format"
        );
    }

    let window = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title(config.window_title.clone())
                .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
                .with_resizable(true),
        )
        .with_menu(None);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .with_context(config)
        .launch(app::App);
}
