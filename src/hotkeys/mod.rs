//! Hotkey system
//!
//! - **HotkeyAction**: what a key press should do, independent of the key
//! - **HotkeyContext**: app state that enables or suppresses bindings
//! - **handle_hotkey()**: maps a key event to an action

use dioxus::prelude::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Toggle playback.
    PlayPause,
    /// One zoom step in.
    TimelineZoomIn,
    /// One zoom step out.
    TimelineZoomOut,
    /// Back to the whole-media view.
    TimelineZoomReset,
    /// Skip back by the configured step.
    SeekBackward,
    /// Skip forward by the configured step.
    SeekForward,
    /// Write the current timeline as a PNG.
    SaveSnapshot,
}

#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Live sources have no skip buttons, so the arrow keys do nothing.
    pub is_live: bool,
    /// Whether an input field has focus (suppresses every hotkey)
    pub input_focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyResult {
    Action(HotkeyAction),
    NoMatch,
    /// Would match, but the context disables it.
    Suppressed,
}

pub fn handle_hotkey(
    key: &Key,
    _shift: bool,
    ctrl: bool,
    _alt: bool,
    meta: bool,
    context: &HotkeyContext,
) -> HotkeyResult {
    if context.input_focused {
        return HotkeyResult::Suppressed;
    }

    // Numpad +/- produce the same characters as the main row.
    let action = match key {
        Key::Character(c) if (ctrl || meta) && (c == "s" || c == "S") => HotkeyAction::SaveSnapshot,
        Key::Character(c) if c == " " => HotkeyAction::PlayPause,
        Key::Character(c) if c == "+" || c == "=" => HotkeyAction::TimelineZoomIn,
        Key::Character(c) if c == "-" => HotkeyAction::TimelineZoomOut,
        Key::Character(c) if c == "0" => HotkeyAction::TimelineZoomReset,
        Key::ArrowLeft => HotkeyAction::SeekBackward,
        Key::ArrowRight => HotkeyAction::SeekForward,
        _ => return HotkeyResult::NoMatch,
    };

    if context.is_live && matches!(action, HotkeyAction::SeekBackward | HotkeyAction::SeekForward) {
        return HotkeyResult::Suppressed;
    }
    HotkeyResult::Action(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, ctx: &HotkeyContext) -> HotkeyResult {
        handle_hotkey(&key, false, false, false, false, ctx)
    }

    fn char_key(c: &str) -> Key {
        Key::Character(c.to_string())
    }

    #[test]
    fn test_plus_and_minus_zoom() {
        let ctx = HotkeyContext::default();
        assert_eq!(press(char_key("+"), &ctx), HotkeyResult::Action(HotkeyAction::TimelineZoomIn));
        assert_eq!(press(char_key("="), &ctx), HotkeyResult::Action(HotkeyAction::TimelineZoomIn));
        assert_eq!(press(char_key("-"), &ctx), HotkeyResult::Action(HotkeyAction::TimelineZoomOut));
        assert_eq!(press(char_key("0"), &ctx), HotkeyResult::Action(HotkeyAction::TimelineZoomReset));
    }

    #[test]
    fn test_space_toggles_playback() {
        let ctx = HotkeyContext::default();
        assert_eq!(press(char_key(" "), &ctx), HotkeyResult::Action(HotkeyAction::PlayPause));
    }

    #[test]
    fn test_arrows_seek_unless_live() {
        let ctx = HotkeyContext::default();
        assert_eq!(press(Key::ArrowLeft, &ctx), HotkeyResult::Action(HotkeyAction::SeekBackward));
        assert_eq!(press(Key::ArrowRight, &ctx), HotkeyResult::Action(HotkeyAction::SeekForward));

        let live = HotkeyContext { is_live: true, ..Default::default() };
        assert_eq!(press(Key::ArrowRight, &live), HotkeyResult::Suppressed);
        assert_eq!(press(char_key(" "), &live), HotkeyResult::Action(HotkeyAction::PlayPause));
    }

    #[test]
    fn test_ctrl_s_saves_snapshot() {
        let ctx = HotkeyContext::default();
        let result = handle_hotkey(&char_key("s"), false, true, false, false, &ctx);
        assert_eq!(result, HotkeyResult::Action(HotkeyAction::SaveSnapshot));
        assert_eq!(press(char_key("s"), &ctx), HotkeyResult::NoMatch);
    }

    #[test]
    fn test_suppressed_when_input_focused() {
        let ctx = HotkeyContext {
            input_focused: true,
            ..Default::default()
        };
        assert_eq!(press(char_key("+"), &ctx), HotkeyResult::Suppressed);
    }
}
