//! Pointer gestures on the drawing surface.
//!
//! Translates press / drag / release into surface edits. A press on a
//! handle acts on that rectangle; a press elsewhere on the surface starts a
//! new one.

use eframe::egui;

use crate::adorner::{self, HandleKind};
use crate::config::{HandleStyle, Limits};
use crate::surface::{AnnotationId, DraftUpdate, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    Drawing,
    Moving { id: AnnotationId, last: egui::Pos2 },
    Resizing { id: AnnotationId, last: egui::Pos2 },
}

/// One frame of primary-button state, in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    pub pos: Option<egui::Pos2>,
    /// The pointer is over the surface or close enough to reach a handle.
    pub within_reach: bool,
    /// A modal notice is open; new presses and drags are ignored.
    pub blocked: bool,
}

pub struct Canvas {
    surface: Surface,
    gesture: Gesture,
    handles: HandleStyle,
}

impl Canvas {
    pub fn new(limits: Limits, handles: HandleStyle) -> Self {
        Self {
            surface: Surface::new(limits),
            gesture: Gesture::Idle,
            handles,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn handles(&self) -> &HandleStyle {
        &self.handles
    }

    pub fn reset(&mut self, size: egui::Vec2) {
        self.surface.reset(size);
        self.gesture = Gesture::Idle;
    }

    /// Handle under the pointer, for cursor feedback.
    pub fn hover(&self, point: egui::Pos2) -> Option<HandleKind> {
        adorner::pick(&self.surface, point, &self.handles).map(|(_, kind)| kind)
    }

    pub fn press(&mut self, point: egui::Pos2) {
        if self.gesture != Gesture::Idle || !self.surface.has_area() {
            return;
        }
        match adorner::pick(&self.surface, point, &self.handles) {
            Some((id, HandleKind::Remover)) => {
                if self.surface.remove(id) {
                    log::debug!("Removed rectangle {:?}", id);
                }
            }
            Some((id, HandleKind::Mover)) => {
                self.gesture = Gesture::Moving { id, last: point };
            }
            Some((id, HandleKind::Resizer)) => {
                self.gesture = Gesture::Resizing { id, last: point };
            }
            None if self.surface.contains(point) => {
                if self.surface.begin_draw(point) {
                    self.gesture = Gesture::Drawing;
                }
            }
            None => {}
        }
    }

    /// Feeds one frame of pointer state through press, drag and release.
    pub fn route(&mut self, input: PointerInput) {
        if !input.blocked {
            if let Some(pos) = input.pos {
                if input.pressed && input.within_reach {
                    self.press(pos);
                } else if input.down {
                    self.drag_to(pos);
                }
            }
        }
        if input.released {
            self.release();
        }
    }

    pub fn drag_to(&mut self, point: egui::Pos2) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing => {
                if let DraftUpdate::Finalized(id) = self.surface.extend_draw(point) {
                    log::debug!("Rectangle {:?} finalized at the surface edge", id);
                    self.gesture = Gesture::Idle;
                }
            }
            Gesture::Moving { id, last } => {
                self.surface.move_by(id, point - last);
                self.gesture = Gesture::Moving { id, last: point };
            }
            Gesture::Resizing { id, last } => {
                self.surface.resize_by(id, point - last);
                self.gesture = Gesture::Resizing { id, last: point };
            }
        }
    }

    pub fn release(&mut self) {
        if self.gesture == Gesture::Drawing {
            if let Some(id) = self.surface.finish_draw() {
                let bounds = self.surface.get(id).map(|a| a.bounds);
                log::debug!("Rectangle {:?} finalized at {:?}", id, bounds);
            }
        }
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;

    fn canvas() -> Canvas {
        let mut c = Canvas::new(Limits::default(), HandleStyle::default());
        c.reset(egui::vec2(300.0, 200.0));
        c
    }

    fn draw(c: &mut Canvas, from: (f32, f32), to: (f32, f32)) -> AnnotationId {
        c.press(egui::pos2(from.0, from.1));
        c.drag_to(egui::pos2(to.0, to.1));
        c.release();
        c.surface().annotations().last().unwrap().id
    }

    #[test]
    fn press_drag_release_creates_a_rectangle() {
        let mut c = canvas();
        c.press(egui::pos2(20.0, 30.0));
        assert_eq!(c.gesture(), Gesture::Drawing);
        c.drag_to(egui::pos2(60.0, 50.0));
        assert_eq!(c.surface().draft(), Some(Bounds::new(20.0, 30.0, 40.0, 20.0)));
        c.release();

        assert_eq!(c.gesture(), Gesture::Idle);
        assert_eq!(c.surface().annotations().len(), 1);
        assert_eq!(c.surface().draft(), None);
    }

    #[test]
    fn presses_are_ignored_before_an_image_is_loaded() {
        let mut c = Canvas::new(Limits::default(), HandleStyle::default());
        c.press(egui::pos2(20.0, 30.0));
        c.drag_to(egui::pos2(60.0, 50.0));
        c.release();
        assert!(c.surface().annotations().is_empty());
    }

    #[test]
    fn drawing_past_the_edge_ends_the_gesture() {
        let mut c = canvas();
        c.press(egui::pos2(20.0, 30.0));
        c.drag_to(egui::pos2(100.0, 100.0));
        c.drag_to(egui::pos2(320.0, 120.0));
        assert_eq!(c.gesture(), Gesture::Idle);
        assert_eq!(c.surface().annotations().len(), 1);

        // Further movement with the button still held does nothing.
        c.drag_to(egui::pos2(10.0, 10.0));
        c.release();
        assert_eq!(
            c.surface().annotations()[0].bounds,
            Bounds::new(20.0, 30.0, 80.0, 70.0)
        );
    }

    #[test]
    fn mover_drags_the_rectangle_within_bounds() {
        let mut c = canvas();
        let id = draw(&mut c, (100.0, 100.0), (140.0, 140.0));

        c.press(egui::pos2(120.0, 120.0));
        assert!(matches!(c.gesture(), Gesture::Moving { .. }));
        c.drag_to(egui::pos2(130.0, 110.0));
        c.drag_to(egui::pos2(500.0, 110.0));
        c.release();

        let b = c.surface().get(id).unwrap().bounds;
        assert_eq!(b, Bounds::new(260.0, 90.0, 40.0, 40.0));
        assert_eq!(c.surface().annotations().len(), 1);
    }

    #[test]
    fn resizer_grows_and_shrinks_the_rectangle() {
        let mut c = canvas();
        let id = draw(&mut c, (100.0, 100.0), (140.0, 140.0));

        c.press(egui::pos2(140.0, 140.0));
        assert!(matches!(c.gesture(), Gesture::Resizing { .. }));
        c.drag_to(egui::pos2(160.0, 150.0));
        assert_eq!(c.surface().get(id).unwrap().bounds.width, 60.0);
        c.drag_to(egui::pos2(0.0, 0.0));
        c.release();

        let b = c.surface().get(id).unwrap().bounds;
        assert_eq!((b.width, b.height), (5.0, 5.0));
    }

    #[test]
    fn remover_deletes_only_its_rectangle() {
        let mut c = canvas();
        let first = draw(&mut c, (10.0, 10.0), (50.0, 50.0));
        let second = draw(&mut c, (100.0, 100.0), (150.0, 150.0));

        c.press(egui::pos2(150.0, 100.0));
        assert_eq!(c.gesture(), Gesture::Idle);
        c.release();

        let ids: Vec<_> = c.surface().annotations().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first]);
        assert!(c.surface().get(second).is_none());
    }

    #[test]
    fn press_outside_the_surface_draws_nothing() {
        let mut c = canvas();
        c.press(egui::pos2(-10.0, 50.0));
        assert_eq!(c.gesture(), Gesture::Idle);
        c.drag_to(egui::pos2(40.0, 60.0));
        c.release();
        assert!(c.surface().annotations().is_empty());
    }

    #[test]
    fn handles_past_the_edge_still_respond() {
        let mut c = canvas();
        draw(&mut c, (250.0, 5.0), (290.0, 40.0));

        // The remover straddles the top edge.
        c.press(egui::pos2(290.0, -2.0));
        assert!(c.surface().annotations().is_empty());
    }

    fn frame(pressed: bool, down: bool, released: bool, pos: (f32, f32)) -> PointerInput {
        PointerInput {
            pressed,
            down,
            released,
            pos: Some(egui::pos2(pos.0, pos.1)),
            within_reach: true,
            blocked: false,
        }
    }

    #[test]
    fn route_runs_a_full_gesture() {
        let mut c = canvas();
        c.route(frame(true, true, false, (20.0, 20.0)));
        c.route(frame(false, true, false, (60.0, 50.0)));
        c.route(frame(false, false, true, (60.0, 50.0)));

        assert_eq!(c.gesture(), Gesture::Idle);
        assert_eq!(
            c.surface().annotations()[0].bounds,
            Bounds::new(20.0, 20.0, 40.0, 30.0)
        );
    }

    #[test]
    fn route_ignores_presses_out_of_reach() {
        let mut c = canvas();
        let mut press = frame(true, true, false, (20.0, 20.0));
        press.within_reach = false;
        c.route(press);
        c.route(frame(false, true, false, (60.0, 50.0)));
        c.route(frame(false, false, true, (60.0, 50.0)));
        assert!(c.surface().annotations().is_empty());
    }

    #[test]
    fn route_is_blocked_while_a_notice_is_open() {
        let mut c = canvas();
        let id = draw(&mut c, (100.0, 100.0), (140.0, 140.0));

        let blocked = |mut input: PointerInput| {
            input.blocked = true;
            input
        };
        c.route(blocked(frame(true, true, false, (140.0, 100.0))));
        c.route(blocked(frame(true, true, false, (20.0, 20.0))));
        c.route(blocked(frame(false, true, false, (60.0, 50.0))));
        c.route(blocked(frame(false, false, true, (60.0, 50.0))));

        let ids: Vec<_> = c.surface().annotations().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![id]);
        assert_eq!(c.gesture(), Gesture::Idle);
    }

    #[test]
    fn release_without_position_still_ends_a_drag() {
        let mut c = canvas();
        c.route(frame(true, true, false, (20.0, 20.0)));
        c.route(frame(false, true, false, (60.0, 50.0)));
        c.route(PointerInput {
            released: true,
            ..PointerInput::default()
        });
        assert_eq!(c.gesture(), Gesture::Idle);
        assert_eq!(c.surface().annotations().len(), 1);
    }

    #[test]
    fn hover_reports_handle_kind() {
        let mut c = canvas();
        draw(&mut c, (10.0, 10.0), (50.0, 50.0));
        assert_eq!(c.hover(egui::pos2(30.0, 30.0)), Some(HandleKind::Mover));
        assert_eq!(c.hover(egui::pos2(15.0, 45.0)), None);
    }
}
