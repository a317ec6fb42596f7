//! State management module
//!
//! - Config: settings loaded from `player.json`
//! - Player: what the engine has reported plus the zoom level

mod config;
mod player;

pub use config::*;
pub use player::*;
