//! Move, resize and delete handles attached to each finished rectangle.

use eframe::egui;

use crate::config::HandleStyle;
use crate::geometry::Bounds;
use crate::surface::{AnnotationId, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleKind {
    Mover,
    Remover,
    Resizer,
}

impl HandleKind {
    pub fn cursor(self) -> egui::CursorIcon {
        match self {
            HandleKind::Mover => egui::CursorIcon::Move,
            HandleKind::Remover => egui::CursorIcon::PointingHand,
            HandleKind::Resizer => egui::CursorIcon::ResizeNwSe,
        }
    }
}

/// Handle rectangles for one annotation, in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decorations {
    pub mover: egui::Rect,
    pub remover: egui::Rect,
    pub resizer: egui::Rect,
}

impl Decorations {
    pub fn around(bounds: &Bounds, style: &HandleStyle) -> Self {
        let handle = egui::Vec2::splat(style.handle_size);
        let remover = egui::Vec2::splat(style.remover_size);
        Self {
            mover: egui::Rect::from_center_size(
                egui::pos2(
                    bounds.left + bounds.width / 2.0,
                    bounds.top + bounds.height / 2.0,
                ),
                handle,
            ),
            remover: egui::Rect::from_center_size(
                egui::pos2(bounds.right(), bounds.top),
                remover,
            ),
            resizer: egui::Rect::from_center_size(
                egui::pos2(bounds.right(), bounds.bottom()),
                handle,
            ),
        }
    }

    /// Topmost handle under `point`. Paint order is mover, remover, resizer.
    pub fn hit(&self, point: egui::Pos2) -> Option<HandleKind> {
        if self.resizer.contains(point) {
            Some(HandleKind::Resizer)
        } else if self.remover.contains(point) {
            Some(HandleKind::Remover)
        } else if self.mover.contains(point) {
            Some(HandleKind::Mover)
        } else {
            None
        }
    }

    pub fn paint(&self, painter: &egui::Painter, origin: egui::Pos2, style: &HandleStyle) {
        let outline = egui::Stroke::new(1.0, egui::Color32::from_gray(30));
        let at = |r: egui::Rect| r.translate(origin.to_vec2());

        painter.rect(
            at(self.mover),
            1.0,
            style.mover.to_egui(),
            outline,
            egui::StrokeKind::Inside,
        );

        let remover = at(self.remover);
        let radius = remover.width() / 2.0;
        painter.circle(remover.center(), radius, style.remover.to_egui(), outline);
        let cross = egui::Stroke::new(2.0, egui::Color32::WHITE);
        let arm = radius * 0.45;
        let c = remover.center();
        painter.line_segment([c + egui::vec2(-arm, -arm), c + egui::vec2(arm, arm)], cross);
        painter.line_segment([c + egui::vec2(-arm, arm), c + egui::vec2(arm, -arm)], cross);

        painter.rect(
            at(self.resizer),
            1.0,
            style.resizer.to_egui(),
            outline,
            egui::StrokeKind::Inside,
        );
    }
}

/// Finds the handle under `point`, searching the most recent rectangle first.
pub fn pick(
    surface: &Surface,
    point: egui::Pos2,
    style: &HandleStyle,
) -> Option<(AnnotationId, HandleKind)> {
    surface.annotations().iter().rev().find_map(|ann| {
        Decorations::around(&ann.bounds, style)
            .hit(point)
            .map(|kind| (ann.id, kind))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;

    fn style() -> HandleStyle {
        HandleStyle::default()
    }

    #[test]
    fn handles_sit_at_centre_and_right_corners() {
        let d = Decorations::around(&Bounds::new(10.0, 20.0, 100.0, 50.0), &style());
        assert_eq!(
            d.mover,
            egui::Rect::from_min_size(egui::pos2(55.0, 40.0), egui::vec2(10.0, 10.0))
        );
        assert_eq!(
            d.remover,
            egui::Rect::from_min_size(egui::pos2(102.0, 12.0), egui::vec2(16.0, 16.0))
        );
        assert_eq!(
            d.resizer,
            egui::Rect::from_min_size(egui::pos2(105.0, 65.0), egui::vec2(10.0, 10.0))
        );
    }

    #[test]
    fn hit_finds_each_handle() {
        let d = Decorations::around(&Bounds::new(0.0, 0.0, 100.0, 100.0), &style());
        assert_eq!(d.hit(egui::pos2(50.0, 50.0)), Some(HandleKind::Mover));
        assert_eq!(d.hit(egui::pos2(100.0, 0.0)), Some(HandleKind::Remover));
        assert_eq!(d.hit(egui::pos2(100.0, 100.0)), Some(HandleKind::Resizer));
        assert_eq!(d.hit(egui::pos2(20.0, 20.0)), None);
    }

    #[test]
    fn resizer_wins_where_handles_overlap() {
        // A tiny rectangle stacks all three handles on top of each other.
        let d = Decorations::around(&Bounds::new(0.0, 0.0, 4.0, 4.0), &style());
        assert_eq!(d.hit(egui::pos2(3.0, 3.0)), Some(HandleKind::Resizer));
    }

    #[test]
    fn pick_prefers_the_latest_rectangle() {
        let mut surface = Surface::new(Limits::default());
        surface.reset(egui::vec2(200.0, 200.0));
        for _ in 0..2 {
            surface.begin_draw(egui::pos2(10.0, 10.0));
            surface.extend_draw(egui::pos2(90.0, 90.0));
            surface.finish_draw();
        }
        let latest = surface.annotations()[1].id;

        assert_eq!(
            pick(&surface, egui::pos2(50.0, 50.0), &style()),
            Some((latest, HandleKind::Mover))
        );
        assert_eq!(pick(&surface, egui::pos2(30.0, 70.0), &style()), None);
    }
}
