//! Timeline scene rendering.
//!
//! The renderer does not touch a canvas. It produces a [`Scene`], an ordered
//! list of draw commands in CSS pixels, which the canvas bridge replays after
//! scaling for the display's pixel density. The same list feeds the software
//! rasterizer in [`super::raster`].

use serde::Serialize;

use crate::constants::{
    TIMELINE_BACKGROUND, TIMELINE_BUFFERED, TIMELINE_LIVE_BADGE, TIMELINE_LIVE_TEXT,
    TIMELINE_PLAYHEAD, TIMELINE_QUALITY_TIERS, TIMELINE_TICK,
};

use super::markers::{plan_markers, TickMarker};
use super::playback::BufferedRange;
use super::viewport::{compute_viewport, effective_duration, ViewportInput, ViewportWindow, ZoomLevel};

/// Height of the tick strip along the bottom edge.
pub const AXIS_HEIGHT_PX: f64 = 20.0;
const TICK_HEIGHT_PX: f64 = 10.0;
const LABEL_BASELINE_OFFSET_PX: f64 = 5.0;
const LABEL_FONT_PX: f64 = 10.0;
const PLAYHEAD_WIDTH_PX: f64 = 2.0;
const LIVE_BADGE_RADIUS_PX: f64 = 8.0;
const LIVE_BADGE_INSET_PX: f64 = 15.0;

/// Seconds covered by one simulated quality segment.
pub const QUALITY_SEGMENT_SECONDS: f64 = 5.0;
const QUALITY_BUCKET_SECONDS: f64 = 10.0;
const QUALITY_SEGMENT_GAP_PX: f64 = 2.0;

/// Straight (non-premultiplied) RGBA colour, serialized as a CSS colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

/// One band of the simulated rendition stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityTier {
    pub name: &'static str,
    pub height: f64,
    pub color: Color,
}

/// CSS-pixel size of the drawing surface and the display's pixel density.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, Serialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_pixel_ratio", alias = "dpr")]
    pub pixel_ratio: f64,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self { width, height, pixel_ratio }
    }

    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Pixel ratio with broken values (zero, NaN) replaced by 1.
    pub fn effective_pixel_ratio(&self) -> f64 {
        if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
            self.pixel_ratio
        } else {
            1.0
        }
    }

    /// Device-pixel size of the backing store.
    pub fn backing_size(&self) -> (u32, u32) {
        let ratio = self.effective_pixel_ratio();
        let width = (self.width.max(0.0) * ratio).round() as u32;
        let height = (self.height.max(0.0) * ratio).round() as u32;
        (width, height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One canvas operation, in CSS pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    },
    FillText {
        x: f64,
        y: f64,
        text: String,
        font_px: f64,
        align: TextAlign,
        color: Color,
    },
}

/// A complete redraw of the timeline surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// An empty scene; replaying it clears the surface.
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixel_ratio: surface.effective_pixel_ratio(),
            commands: Vec::new(),
        }
    }

    /// Push a rectangle, dropping it when clamping leaves nothing to draw.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let width = width.max(0.0);
        let height = height.max(0.0);
        if width <= 0.0 || height <= 0.0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color });
    }

    #[cfg(test)]
    pub fn rects(&self) -> impl Iterator<Item = (f64, f64, f64, f64, Color)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect { x, y, width, height, color } => {
                Some((*x, *y, *width, *height, *color))
            }
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// State needed for one render pass.
#[derive(Clone, Copy, Debug)]
pub struct SceneInput<'a> {
    pub window: ViewportWindow,
    pub markers: &'a [TickMarker],
    pub buffered: &'a [BufferedRange],
    pub current_time: f64,
    pub is_live: bool,
}

/// Draw the timeline back to front: background, buffered ranges, quality
/// tiers, ticks, playhead, live badge.
pub fn render_scene(input: SceneInput<'_>, surface: SurfaceSize) -> Scene {
    let mut scene = Scene::new(surface);
    let width = surface.width;
    let height = surface.height;
    let window = input.window;

    scene.fill_rect(0.0, 0.0, width, height, TIMELINE_BACKGROUND);
    draw_buffered_ranges(&mut scene, window, input.buffered, width, height);
    draw_quality_tiers(&mut scene, window, width, height);
    draw_ticks(&mut scene, window, input.markers, width, height);

    if input.current_time.is_finite() && window.contains(input.current_time) {
        let x = window.time_to_x(input.current_time, width);
        scene.fill_rect(x - PLAYHEAD_WIDTH_PX / 2.0, 0.0, PLAYHEAD_WIDTH_PX, height, TIMELINE_PLAYHEAD);
    }

    if input.is_live {
        draw_live_badge(&mut scene, width);
    }

    scene
}

fn draw_buffered_ranges(
    scene: &mut Scene,
    window: ViewportWindow,
    ranges: &[BufferedRange],
    width: f64,
    height: f64,
) {
    for range in ranges {
        if range.end < window.start || range.start > window.end {
            continue;
        }
        let start_x = window.time_to_x(range.start, width).max(0.0);
        let end_x = window.time_to_x(range.end, width).min(width);
        scene.fill_rect(start_x, 0.0, end_x - start_x, height - AXIS_HEIGHT_PX, TIMELINE_BUFFERED);
    }
}

/// Number of simulated quality tiers drawn for a segment starting at `time`.
///
/// A placeholder keyed on coarse time buckets, not real rendition data.
pub fn quality_tiers_for(segment_time: f64) -> usize {
    let bucket = (segment_time / QUALITY_BUCKET_SECONDS).floor() as i64;
    (bucket.rem_euclid(3) + 2) as usize
}

fn draw_quality_tiers(scene: &mut Scene, window: ViewportWindow, width: f64, height: f64) {
    let span = window.span();
    if !(span > 0.0) || !span.is_finite() {
        return;
    }
    let segments = (span / QUALITY_SEGMENT_SECONDS).ceil() as usize;
    if segments == 0 {
        return;
    }
    let segment_width = width / segments as f64;
    if segment_width <= QUALITY_SEGMENT_GAP_PX {
        return;
    }
    for i in 0..segments {
        let segment_time = window.start + i as f64 * QUALITY_SEGMENT_SECONDS;
        let tiers = quality_tiers_for(segment_time).min(TIMELINE_QUALITY_TIERS.len());
        for tier in &TIMELINE_QUALITY_TIERS[..tiers] {
            scene.fill_rect(
                i as f64 * segment_width,
                height - AXIS_HEIGHT_PX - tier.height,
                segment_width - QUALITY_SEGMENT_GAP_PX,
                tier.height,
                tier.color,
            );
        }
    }
}

fn draw_ticks(
    scene: &mut Scene,
    window: ViewportWindow,
    markers: &[TickMarker],
    width: f64,
    height: f64,
) {
    for marker in markers {
        let x = window.time_to_x(marker.time, width);
        scene.fill_rect(x, height - AXIS_HEIGHT_PX, 1.0, TICK_HEIGHT_PX, TIMELINE_TICK);
        scene.commands.push(DrawCommand::FillText {
            x,
            y: height - LABEL_BASELINE_OFFSET_PX,
            text: marker.label.clone(),
            font_px: LABEL_FONT_PX,
            align: TextAlign::Center,
            color: TIMELINE_TICK,
        });
    }
}

fn draw_live_badge(scene: &mut Scene, width: f64) {
    scene.commands.push(DrawCommand::FillCircle {
        cx: width - LIVE_BADGE_INSET_PX,
        cy: LIVE_BADGE_INSET_PX,
        radius: LIVE_BADGE_RADIUS_PX,
        color: TIMELINE_LIVE_BADGE,
    });
    scene.commands.push(DrawCommand::FillText {
        x: width - 2.0 * LIVE_BADGE_INSET_PX,
        y: LIVE_BADGE_INSET_PX + 3.0,
        text: "LIVE".to_string(),
        font_px: LABEL_FONT_PX,
        align: TextAlign::Right,
        color: TIMELINE_LIVE_TEXT,
    });
}

/// Host-side inputs for a full timeline pass.
#[derive(Clone, Copy, Debug)]
pub struct TimelineInput<'a> {
    /// Nominal duration, `0` when unknown.
    pub duration: f64,
    pub current_time: f64,
    pub buffered: &'a [BufferedRange],
    pub zoom: ZoomLevel,
    pub is_live: bool,
}

/// Everything derived for one redraw.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineFrame {
    pub window: ViewportWindow,
    pub markers: Vec<TickMarker>,
    pub scene: Scene,
}

/// Viewport, markers and scene in one pass. `None` when there is nothing to
/// draw yet: a finite source without duration, or an empty surface.
pub fn render_timeline(input: TimelineInput<'_>, surface: SurfaceSize) -> Option<TimelineFrame> {
    if !surface.is_drawable() {
        return None;
    }
    let window = compute_viewport(ViewportInput {
        duration: input.duration,
        current_time: input.current_time,
        zoom: input.zoom,
        is_live: input.is_live,
    })?;
    let total = effective_duration(input.duration, input.is_live);
    let markers = plan_markers(window, input.zoom, total);
    let scene = render_scene(
        SceneInput {
            window,
            markers: &markers,
            buffered: input.buffered,
            current_time: input.current_time,
            is_live: input.is_live,
        },
        surface,
    );
    Some(TimelineFrame { window, markers, scene })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn surface() -> SurfaceSize {
        SurfaceSize::new(500.0, 100.0, 2.0)
    }

    fn scene_for(window: ViewportWindow, buffered: &[BufferedRange], current_time: f64, is_live: bool) -> Scene {
        render_scene(
            SceneInput {
                window,
                markers: &[],
                buffered,
                current_time,
                is_live,
            },
            surface(),
        )
    }

    fn buffered_rects(scene: &Scene) -> Vec<(f64, f64)> {
        scene
            .rects()
            .filter(|(_, _, _, _, color)| *color == TIMELINE_BUFFERED)
            .map(|(x, _, w, _, _)| (x, w))
            .collect()
    }

    #[test]
    fn test_background_is_drawn_first() {
        let window = ViewportWindow { start: 0.0, end: 10.0 };
        let scene = scene_for(window, &[], 100.0, false);
        match &scene.commands[0] {
            DrawCommand::FillRect { x, y, width, height, color } => {
                assert_eq!((*x, *y, *width, *height), (0.0, 0.0, 500.0, 100.0));
                assert_eq!(*color, TIMELINE_BACKGROUND);
            }
            other => panic!("unexpected first command {other:?}"),
        }
    }

    #[test]
    fn test_buffered_range_clipped_at_window_start() {
        let window = ViewportWindow { start: 0.0, end: 10.0 };
        let scene = scene_for(window, &[BufferedRange::new(-5.0, 3.0)], -1.0, false);
        let rects = buffered_rects(&scene);
        assert_eq!(rects.len(), 1);
        let (x, w) = rects[0];
        assert_eq!(x, 0.0);
        assert!((w - 0.3 * 500.0).abs() < EPS);
    }

    #[test]
    fn test_buffered_ranges_outside_or_inverted_are_not_drawn() {
        let window = ViewportWindow { start: 10.0, end: 20.0 };
        let ranges = [
            BufferedRange::new(0.0, 5.0),
            BufferedRange::new(25.0, 30.0),
            BufferedRange::new(18.0, 12.0),
        ];
        let scene = scene_for(window, &ranges, -1.0, false);
        assert!(buffered_rects(&scene).is_empty());
    }

    #[test]
    fn test_overlapping_ranges_are_clipped_independently() {
        let window = ViewportWindow { start: 10.0, end: 20.0 };
        let ranges = [BufferedRange::new(15.0, 40.0), BufferedRange::new(12.0, 16.0)];
        let scene = scene_for(window, &ranges, -1.0, false);
        let rects = buffered_rects(&scene);
        assert_eq!(rects.len(), 2);
        assert!((rects[0].0 - 250.0).abs() < EPS);
        assert!((rects[0].1 - 250.0).abs() < EPS);
        assert!((rects[1].0 - 100.0).abs() < EPS);
        assert!((rects[1].1 - 200.0).abs() < EPS);
    }

    #[test]
    fn test_playhead_only_inside_window() {
        let window = ViewportWindow { start: 10.0, end: 30.0 };
        let inside = scene_for(window, &[], 20.0, false);
        let playheads: Vec<_> = inside
            .rects()
            .filter(|(_, _, _, _, color)| *color == TIMELINE_PLAYHEAD)
            .collect();
        assert_eq!(playheads.len(), 1);
        assert!((playheads[0].0 - 249.0).abs() < EPS);

        let outside = scene_for(window, &[], 31.0, false);
        assert!(outside.rects().all(|(_, _, _, _, color)| color != TIMELINE_PLAYHEAD));
    }

    #[test]
    fn test_live_badge_is_last() {
        let window = ViewportWindow { start: -90.0, end: 60.0 };
        let scene = scene_for(window, &[], 50.0, true);
        let last_two = &scene.commands[scene.commands.len() - 2..];
        assert!(matches!(last_two[0], DrawCommand::FillCircle { cx, .. } if (cx - 485.0).abs() < EPS));
        assert!(matches!(&last_two[1], DrawCommand::FillText { text, .. } if text == "LIVE"));

        let finite = scene_for(ViewportWindow { start: 0.0, end: 60.0 }, &[], 50.0, false);
        assert!(finite.texts().all(|text| text != "LIVE"));
    }

    #[test]
    fn test_quality_tiers_are_deterministic() {
        assert_eq!(quality_tiers_for(0.0), 2);
        assert_eq!(quality_tiers_for(10.0), 3);
        assert_eq!(quality_tiers_for(25.0), 4);
        assert_eq!(quality_tiers_for(30.0), 2);
        assert_eq!(quality_tiers_for(-5.0), 4);

        let window = ViewportWindow { start: 0.0, end: 20.0 };
        let first = scene_for(window, &[], -1.0, false);
        let second = scene_for(window, &[], -1.0, false);
        assert_eq!(first, second);
        let tier_rects = first
            .rects()
            .filter(|(_, _, _, _, color)| TIMELINE_QUALITY_TIERS.iter().any(|t| t.color == *color))
            .count();
        // Segments at 0s, 5s -> 2 tiers each; 10s, 15s -> 3 tiers each.
        assert_eq!(tier_rects, 10);
    }

    #[test]
    fn test_quality_tiers_skipped_when_segments_too_narrow() {
        let window = ViewportWindow { start: 0.0, end: 36000.0 };
        let scene = scene_for(window, &[], -1.0, false);
        let tier_rects = scene
            .rects()
            .filter(|(_, _, _, _, color)| TIMELINE_QUALITY_TIERS.iter().any(|t| t.color == *color))
            .count();
        assert_eq!(tier_rects, 0);
    }

    #[test]
    fn test_render_timeline_skips_finite_without_duration() {
        let input = TimelineInput {
            duration: 0.0,
            current_time: 0.0,
            buffered: &[],
            zoom: ZoomLevel::MIN,
            is_live: false,
        };
        assert!(render_timeline(input, surface()).is_none());
        let live = TimelineInput { is_live: true, ..input };
        assert!(render_timeline(live, surface()).is_some());
        assert!(render_timeline(live, SurfaceSize::new(0.0, 80.0, 1.0)).is_none());
    }

    #[test]
    fn test_render_timeline_end_to_end() {
        let buffered = [BufferedRange::new(0.0, 30.0)];
        let frame = render_timeline(
            TimelineInput {
                duration: 120.0,
                current_time: 60.0,
                buffered: &buffered,
                zoom: ZoomLevel::MIN,
                is_live: false,
            },
            surface(),
        )
        .unwrap();
        assert_eq!(frame.window, ViewportWindow { start: 0.0, end: 120.0 });
        let labels: Vec<_> = frame.scene.texts().collect();
        assert_eq!(labels, vec!["0:00", "1:00", "2:00"]);
        assert_eq!(frame.scene.pixel_ratio, 2.0);
    }

    #[test]
    fn test_backing_size_scales_by_pixel_ratio() {
        assert_eq!(SurfaceSize::new(300.5, 80.0, 2.0).backing_size(), (601, 160));
        assert_eq!(SurfaceSize::new(300.0, 80.0, 0.0).backing_size(), (300, 80));
        assert_eq!(SurfaceSize::new(300.0, 80.0, f64::NAN).effective_pixel_ratio(), 1.0);
    }

    #[test]
    fn test_scene_serializes_for_canvas_bridge() {
        let window = ViewportWindow { start: 0.0, end: 10.0 };
        let scene = scene_for(window, &[], 5.0, false);
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["pixel_ratio"], 2.0);
        assert_eq!(json["commands"][0]["op"], "fill_rect");
        assert!(json["commands"][0]["color"].as_str().unwrap().starts_with("rgba("));
    }
}
