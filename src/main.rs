mod adorner;
mod app;
mod canvas;
mod config;
mod error;
mod export;
mod geometry;
mod surface;

use std::path::PathBuf;

use eframe::egui;

use crate::app::RectsApp;
use crate::config::AppConfig;

const TITLE: &str = "Rectangles over Image";

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    // Optional image to open at startup.
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(TITLE),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(RectsApp::new(&cc.egui_ctx, config, initial)))),
    )
}
