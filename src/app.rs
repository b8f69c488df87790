use std::path::{Path, PathBuf};

use eframe::egui;
use image::DynamicImage;

use crate::adorner::{Decorations, HandleKind};
use crate::canvas::{Canvas, Gesture, PointerInput};
use crate::config::AppConfig;
use crate::error::Result;
use crate::export;
use crate::geometry;

const IMAGE_EXTENSIONS: &[&str] = &["bmp", "jpg", "jpeg", "png"];

// ── Loaded image ────────────────────────────────────────────────────────────

struct LoadedImage {
    path: PathBuf,
    raw: DynamicImage,
    texture: egui::TextureHandle,
}

impl LoadedImage {
    fn open(ctx: &egui::Context, path: &Path) -> Result<Self> {
        let raw = image::open(path)?;
        let rgba = raw.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = rgba.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
        let texture = ctx.load_texture("image", color_image, egui::TextureOptions::LINEAR);
        Ok(Self {
            path: path.to_path_buf(),
            raw,
            texture,
        })
    }

    fn native_size(&self) -> egui::Vec2 {
        egui::vec2(self.raw.width() as f32, self.raw.height() as f32)
    }

    fn export_name(&self) -> String {
        format!(
            "{}_annotated.png",
            self.path
                .file_stem()
                .unwrap_or_default()
                .to_str()
                .unwrap_or("out")
        )
    }
}

// ── Notification ────────────────────────────────────────────────────────────

/// A message the user must acknowledge before continuing.
struct Notice {
    title: &'static str,
    message: String,
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct RectsApp {
    config: AppConfig,
    canvas: Canvas,
    image: Option<LoadedImage>,
    /// Set after a load; the surface is sized on the next layout pass.
    pending_fit: bool,
    notice: Option<Notice>,
}

impl RectsApp {
    pub fn new(ctx: &egui::Context, config: AppConfig, initial: Option<PathBuf>) -> Self {
        let canvas = Canvas::new(config.limits, config.handles);
        let mut app = Self {
            config,
            canvas,
            image: None,
            pending_fit: false,
            notice: None,
        };
        if let Some(path) = initial {
            app.open_image(ctx, &path);
        }
        app
    }

    fn open_image(&mut self, ctx: &egui::Context, path: &Path) {
        match LoadedImage::open(ctx, path) {
            Ok(loaded) => {
                log::info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    loaded.raw.width(),
                    loaded.raw.height()
                );
                self.image = Some(loaded);
                self.canvas.reset(egui::Vec2::ZERO);
                self.pending_fit = true;
            }
            Err(e) => {
                log::error!("Could not load {}: {}", path.display(), e);
                self.notice = Some(Notice {
                    title: "Image Load",
                    message: "Could not load image.".to_owned(),
                });
            }
        }
    }

    fn pick_and_open(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image Files", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.open_image(ctx, &path);
        }
    }

    fn pick_and_save(&mut self) {
        let Some(ref loaded) = self.image else {
            return;
        };
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(loaded.export_name());
        if let Some(dir) = loaded.path.parent() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        let result = export::export(
            &loaded.raw,
            self.canvas.surface(),
            &self.config.shape,
            &path,
        );
        self.notice = Some(match result {
            Ok(()) => Notice {
                title: "Image Save",
                message: "Image saved successfully.".to_owned(),
            },
            Err(e) => {
                log::error!("Could not save {}: {}", path.display(), e);
                Notice {
                    title: "Image Save",
                    message: "Could not save image.".to_owned(),
                }
            }
        });
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        let idle = self.notice.is_none();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.add_enabled(idle, egui::Button::new("Load Image")).clicked() {
                    self.pick_and_open(ctx);
                }
                let can_save = idle && self.image.is_some();
                if ui.add_enabled(can_save, egui::Button::new("Save Image")).clicked() {
                    self.pick_and_save();
                }
                if let Some(ref loaded) = self.image {
                    ui.separator();
                    ui.label(format!(
                        "{}x{} | {} rectangle(s)",
                        loaded.raw.width(),
                        loaded.raw.height(),
                        self.canvas.surface().annotations().len()
                    ));
                }
            });
        });
    }

    fn paint_surface(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let shape = &self.config.shape;
        let fill = shape.fill.to_egui();
        let stroke = egui::Stroke::new(shape.stroke_width, shape.stroke.to_egui());
        let surface = self.canvas.surface();

        for ann in surface.annotations() {
            let rect = ann.bounds.to_screen(origin);
            painter.rect(rect, 0.0, fill, stroke, egui::StrokeKind::Inside);
        }
        if let Some(draft) = surface.draft() {
            let rect = draft.to_screen(origin);
            painter.rect(rect, 0.0, fill, stroke, egui::StrokeKind::Inside);
        }
        for ann in surface.annotations() {
            let handles = self.canvas.handles();
            Decorations::around(&ann.bounds, handles).paint(painter, origin, handles);
        }
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, ctx: &egui::Context, surface_rect: egui::Rect) {
        let origin = surface_rect.min;
        // Handles poke out past the surface edges.
        let reach = surface_rect.expand(self.config.handles.remover_size);
        let screen_pos = ctx.input(|i| i.pointer.interact_pos());
        let within_reach =
            screen_pos.is_some_and(|pos| reach.contains(pos)) && ui.ui_contains_pointer();

        let input = ctx.input(|i| PointerInput {
            pressed: i.pointer.primary_pressed(),
            down: i.pointer.primary_down(),
            released: i.pointer.primary_released(),
            pos: screen_pos.map(|pos| (pos - origin).to_pos2()),
            within_reach,
            blocked: self.notice.is_some(),
        });
        self.canvas.route(input);

        if let (Some(pos), Some(local), false) = (screen_pos, input.pos, input.blocked) {
            if within_reach {
                let cursor = match (self.canvas.gesture(), self.canvas.hover(local)) {
                    (Gesture::Moving { .. }, _) => HandleKind::Mover.cursor(),
                    (Gesture::Resizing { .. }, _) => HandleKind::Resizer.cursor(),
                    (_, Some(kind)) => kind.cursor(),
                    _ if surface_rect.contains(pos) => egui::CursorIcon::Crosshair,
                    _ => egui::CursorIcon::Default,
                };
                ctx.set_cursor_icon(cursor);
            }
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(ref notice) = self.notice else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });
        if acknowledged {
            self.notice = None;
        }
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for RectsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.toolbar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(native) = self.image.as_ref().map(LoadedImage::native_size) else {
                ui.centered_and_justified(|ui| {
                    ui.label("Load an image to start drawing rectangles.");
                });
                return;
            };

            if self.pending_fit {
                let size = geometry::fit_within(native, ui.available_size());
                log::debug!("Drawing surface sized to {:?}", size);
                self.canvas.reset(size);
                self.pending_fit = false;
            }

            let (surface_rect, _response) = ui.allocate_exact_size(
                self.canvas.surface().size(),
                egui::Sense::click_and_drag(),
            );
            let painter = ui.painter().clone();

            painter.rect_filled(ui.max_rect(), 0.0, egui::Color32::from_gray(40));
            if let Some(ref loaded) = self.image {
                painter.image(
                    loaded.texture.id(),
                    surface_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            self.paint_surface(&painter, surface_rect.min);

            self.handle_pointer(ui, ctx, surface_rect);
        });

        self.show_notice(ctx);
    }
}
