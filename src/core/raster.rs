//! Software rasterizer for timeline scenes.
//!
//! Replays a [`Scene`] into an RGBA image at device-pixel resolution. Text
//! commands are skipped: there is no font rasterizer in the app, and the
//! snapshot is meant for checking layout rather than typography.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, Blend};
use imageproc::rect::Rect;

use crate::error::Result;

use super::scene::{Color, DrawCommand, Scene, SurfaceSize};

fn to_pixel(color: Color) -> Rgba<u8> {
    let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([color.r, color.g, color.b, alpha])
}

/// Rasterize `scene` at `width * pixel_ratio` by `height * pixel_ratio`.
pub fn rasterize(scene: &Scene) -> RgbaImage {
    let surface = SurfaceSize::new(scene.width, scene.height, scene.pixel_ratio);
    let ratio = surface.effective_pixel_ratio();
    let (width, height) = surface.backing_size();
    let mut canvas = Blend(RgbaImage::new(width.max(1), height.max(1)));

    for command in &scene.commands {
        match command {
            DrawCommand::FillRect { x, y, width, height, color } => {
                let left = (x * ratio).round();
                let top = (y * ratio).round();
                let w = (width * ratio).round();
                let h = (height * ratio).round();
                if w < 1.0 || h < 1.0 {
                    continue;
                }
                let rect = Rect::at(left as i32, top as i32).of_size(w as u32, h as u32);
                draw_filled_rect_mut(&mut canvas, rect, to_pixel(*color));
            }
            DrawCommand::FillCircle { cx, cy, radius, color } => {
                let center = ((cx * ratio).round() as i32, (cy * ratio).round() as i32);
                let radius = (radius * ratio).round() as i32;
                if radius <= 0 {
                    continue;
                }
                draw_filled_circle_mut(&mut canvas, center, radius, to_pixel(*color));
            }
            DrawCommand::FillText { .. } => {}
        }
    }

    canvas.0
}

/// Rasterize `scene` and write it as a PNG.
pub fn save_snapshot(scene: &Scene, path: &Path) -> Result<()> {
    let image = rasterize(scene);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image.save(path)?;
    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "timeline snapshot written");
    Ok(())
}
