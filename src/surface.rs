//! The drawing surface laid over the displayed image.
//!
//! Owns every annotation rectangle for its whole life: rectangles are born
//! from a draft, moved and resized in place, and removed by identity. All
//! coordinates are surface-local.

use eframe::egui;

use crate::config::Limits;
use crate::geometry::{self, Bounds, Scaler};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    pub bounds: Bounds,
}

/// The rectangle currently following the pointer.
#[derive(Clone, Debug)]
struct Draft {
    anchor: egui::Pos2,
    bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DraftUpdate {
    /// No draft in progress.
    Idle,
    /// The draft now spans the anchor and the pointer.
    Extended,
    /// The pointer reached the edge and the draft was finalized.
    Finalized(Option<AnnotationId>),
}

#[derive(Debug)]
pub struct Surface {
    size: egui::Vec2,
    annotations: Vec<Annotation>,
    draft: Option<Draft>,
    limits: Limits,
    next_id: u64,
}

impl Surface {
    pub fn new(limits: Limits) -> Self {
        Self {
            size: egui::Vec2::ZERO,
            annotations: Vec::new(),
            draft: None,
            limits,
            next_id: 0,
        }
    }

    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    pub fn has_area(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Whether `point` lies on the surface, edges included.
    pub fn contains(&self, point: egui::Pos2) -> bool {
        self.has_area()
            && (0.0..=self.size.x).contains(&point.x)
            && (0.0..=self.size.y).contains(&point.y)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn draft(&self) -> Option<Bounds> {
        self.draft.as_ref().map(|d| d.bounds)
    }

    /// Drops every rectangle and adopts a new extent.
    pub fn reset(&mut self, size: egui::Vec2) {
        self.annotations.clear();
        self.draft = None;
        self.size = size;
    }

    /// Starts a draft at `point`. Refused while the surface has no area or a
    /// draft already exists.
    pub fn begin_draw(&mut self, point: egui::Pos2) -> bool {
        if !self.has_area() || self.draft.is_some() {
            return false;
        }
        let anchor = geometry::clamp_point(point, self.size);
        self.draft = Some(Draft {
            anchor,
            bounds: Bounds::new(anchor.x, anchor.y, 0.0, 0.0),
        });
        true
    }

    pub fn extend_draw(&mut self, point: egui::Pos2) -> DraftUpdate {
        if self.draft.is_none() {
            return DraftUpdate::Idle;
        }
        let margin = self.limits.edge_margin;
        if point.x >= self.size.x - margin || point.y >= self.size.y - margin {
            return DraftUpdate::Finalized(self.finish_draw());
        }
        let point = geometry::clamp_point(point, self.size);
        if let Some(draft) = self.draft.as_mut() {
            draft.bounds = Bounds::from_corners(draft.anchor, point);
        }
        DraftUpdate::Extended
    }

    /// Turns the draft into an annotation. Drafts without area are dropped.
    pub fn finish_draw(&mut self) -> Option<AnnotationId> {
        let draft = self.draft.take()?;
        if !draft.bounds.has_area() {
            log::debug!("Discarding empty rectangle at {:?}", draft.anchor);
            return None;
        }
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        self.annotations.push(Annotation {
            id,
            bounds: draft.bounds,
        });
        Some(id)
    }

    pub fn move_by(&mut self, id: AnnotationId, delta: egui::Vec2) -> Option<Bounds> {
        let size = self.size;
        let ann = self.annotations.iter_mut().find(|a| a.id == id)?;
        let b = &mut ann.bounds;
        b.left = geometry::clamp_offset(b.left, delta.x, b.width, size.x);
        b.top = geometry::clamp_offset(b.top, delta.y, b.height, size.y);
        Some(*b)
    }

    pub fn resize_by(&mut self, id: AnnotationId, delta: egui::Vec2) -> Option<Bounds> {
        let size = self.size;
        let min_size = self.limits.min_size;
        let ann = self.annotations.iter_mut().find(|a| a.id == id)?;
        let b = &mut ann.bounds;
        b.width = geometry::clamp_extent(b.width, delta.x, b.left, size.x, min_size);
        b.height = geometry::clamp_extent(b.height, delta.y, b.top, size.y, min_size);
        Some(*b)
    }

    pub fn remove(&mut self, id: AnnotationId) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id != id);
        self.annotations.len() != before
    }

    /// Every annotation rescaled, in drawing order.
    pub fn export_bounds(&self, scaler: Scaler) -> Vec<Bounds> {
        self.annotations
            .iter()
            .map(|a| a.bounds.scaled(scaler))
            .collect()
    }
}
