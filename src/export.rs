//! Flattening the image and its rectangles into a PNG at native resolution.

use std::path::Path;

use eframe::egui;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::config::ShapeStyle;
use crate::error::{AppError, Result};
use crate::geometry::{Bounds, Scaler};
use crate::surface::Surface;

/// Renders `source` with every rectangle in `shapes` painted on top.
/// `shapes` must already be in native pixel coordinates.
pub fn compose(source: &DynamicImage, shapes: &[Bounds], style: &ShapeStyle) -> RgbaImage {
    let mut img = source.to_rgba8();
    let fill = style.fill.to_rgba8();
    let stroke = style.stroke.to_rgba8();
    let thickness = style.stroke_width.max(0.0);

    for shape in shapes {
        fill_region(&mut img, shape.left, shape.top, shape.right(), shape.bottom(), fill);
        if thickness > 0.0 {
            stroke_inside(&mut img, shape, thickness, stroke);
        }
    }
    img
}

/// Composes the surface's rectangles over `source` and writes a PNG.
///
/// The PNG encoder is used whatever extension `path` carries.
pub fn export(
    source: &DynamicImage,
    surface: &Surface,
    style: &ShapeStyle,
    path: &Path,
) -> Result<()> {
    let native = egui::vec2(source.width() as f32, source.height() as f32);
    let scaler = Scaler::between(native, surface.size()).ok_or(AppError::UnsizedSurface)?;
    log::debug!("Exporting with scaler {:?}", scaler);

    let shapes = surface.export_bounds(scaler);
    let img = compose(source, &shapes, style);
    img.save_with_format(path, ImageFormat::Png)?;
    log::info!(
        "Exported {} rectangle(s) to {}",
        shapes.len(),
        path.display()
    );
    Ok(())
}

fn stroke_inside(img: &mut RgbaImage, b: &Bounds, thickness: f32, color: [u8; 4]) {
    let t_x = thickness.min(b.width / 2.0);
    let t_y = thickness.min(b.height / 2.0);
    // Top and bottom bands span the full width; side bands fill the gap.
    fill_region(img, b.left, b.top, b.right(), b.top + t_y, color);
    fill_region(img, b.left, b.bottom() - t_y, b.right(), b.bottom(), color);
    fill_region(img, b.left, b.top + t_y, b.left + t_x, b.bottom() - t_y, color);
    fill_region(img, b.right() - t_x, b.top + t_y, b.right(), b.bottom() - t_y, color);
}

/// Blends `color` over every pixel whose centre lies in `[x0, x1) x [y0, y1)`.
fn fill_region(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: [u8; 4]) {
    let (w, h) = (img.width(), img.height());
    let span = |lo: f32, hi: f32, max: u32| {
        let lo = lo.round().clamp(0.0, max as f32) as u32;
        let hi = hi.round().clamp(0.0, max as f32) as u32;
        lo..hi
    };
    let xs = span(x0, x1, w);
    for y in span(y0, y1, h) {
        for x in xs.clone() {
            let px = img.get_pixel_mut(x, y);
            px.0 = blend(px.0, color);
        }
    }
}

/// Source-over compositing of straight-alpha colors.
fn blend(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}
