//! Coordinate arithmetic for rectangles on the drawing surface.
//!
//! Everything here works in surface-local coordinates: the origin is the
//! top-left corner of the displayed image, and the extent is the displayed
//! size. Conversion to screen space is a plain offset by the surface origin.

use eframe::egui;

/// Position and size of a rectangle on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Spans the two corners, whichever direction the pointer travelled.
    pub fn from_corners(a: egui::Pos2, b: egui::Pos2) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            left,
            top,
            width: a.x.max(b.x) - left,
            height: a.y.max(b.y) - top,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn scaled(&self, scaler: Scaler) -> Self {
        Self {
            left: self.left * scaler.x,
            top: self.top * scaler.y,
            width: self.width * scaler.x,
            height: self.height * scaler.y,
        }
    }

    /// Screen-space rectangle for a surface whose top-left sits at `origin`.
    pub fn to_screen(&self, origin: egui::Pos2) -> egui::Rect {
        egui::Rect::from_min_size(
            origin + egui::vec2(self.left, self.top),
            egui::vec2(self.width, self.height),
        )
    }
}

/// New offset after applying `delta`, kept within `[0, extent - size]`.
///
/// The lower bound wins when the element is wider than the extent.
pub fn clamp_offset(position: f32, delta: f32, size: f32, extent: f32) -> f32 {
    let next = position + delta;
    if next < 0.0 {
        0.0
    } else if next > extent - size {
        extent - size
    } else {
        next
    }
}

/// New size after applying `delta`, kept within `[min_size, extent - offset]`.
///
/// When less than `min_size` of room is left, a shrink keeps the current size
/// so the element never grows past the extent.
pub fn clamp_extent(size: f32, delta: f32, offset: f32, extent: f32, min_size: f32) -> f32 {
    let room = extent - offset;
    let next = size + delta;
    if next < min_size {
        if room >= min_size {
            min_size
        } else {
            size.min(room)
        }
    } else if next > room {
        room
    } else {
        next
    }
}

pub fn clamp_point(point: egui::Pos2, surface: egui::Vec2) -> egui::Pos2 {
    egui::pos2(
        point.x.clamp(0.0, surface.x.max(0.0)),
        point.y.clamp(0.0, surface.y.max(0.0)),
    )
}

/// Ratio between an image's native pixel size and its displayed size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    pub x: f32,
    pub y: f32,
}

impl Scaler {
    pub fn between(native: egui::Vec2, displayed: egui::Vec2) -> Option<Self> {
        if displayed.x <= 0.0 || displayed.y <= 0.0 {
            return None;
        }
        Some(Self {
            x: native.x / displayed.x,
            y: native.y / displayed.y,
        })
    }
}

/// Largest size with the aspect ratio of `native` that fits in `available`.
pub fn fit_within(native: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if native.x <= 0.0 || native.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / native.x).min(available.y / native.y).max(0.0);
    native * scale
}
