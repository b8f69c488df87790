//! Application settings, optionally read from a JSON file.

use std::path::Path;

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable naming the JSON settings file.
pub const CONFIG_ENV: &str = "RECTS_OVER_IMAGE_CONFIG";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    pub fn to_egui(self) -> egui::Color32 {
        let [r, g, b, a] = self.to_rgba8();
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Fill and outline shared by every annotation rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub fill: Color4,
    pub stroke: Color4,
    pub stroke_width: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: Color4::rgb(173, 255, 47),
            stroke: Color4::rgb(0, 0, 0),
            stroke_width: 1.0,
        }
    }
}

/// Sizes of the move, resize and delete handles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleStyle {
    pub handle_size: f32,
    pub remover_size: f32,
    pub mover: Color4,
    pub resizer: Color4,
    pub remover: Color4,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            handle_size: 10.0,
            remover_size: 16.0,
            mover: Color4::rgb(65, 105, 225),
            resizer: Color4::rgb(178, 34, 34),
            remover: Color4::rgb(220, 40, 40),
        }
    }
}

/// Bounds on what a gesture may produce.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Smallest width or height reachable through the resize handle.
    pub min_size: f32,
    /// A draft finalizes once the pointer is this close to the right or bottom edge.
    pub edge_margin: f32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_size: 5.0,
            edge_margin: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub shape: ShapeStyle,
    pub handles: HandleStyle,
    pub limits: Limits,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shape: ShapeStyle::default(),
            handles: HandleStyle::default(),
            limits: Limits::default(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the file named by [`CONFIG_ENV`], falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }
}
