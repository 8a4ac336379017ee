// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/editor.rs
//
// Crop rectangle editor: pointer-driven drag/resize state machine.

use thiserror::Error;

use super::geometry::{PointerPos, ViewportRect, ViewportSize, clamp_lenient};
use super::handle::{PointerTarget, ResizeHandle, hit_test};

/// Active pointer interaction. `anchor` is the last observed pointer
/// position; moves are applied relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        anchor: PointerPos,
    },
    Resizing {
        handle: ResizeHandle,
        anchor: PointerPos,
    },
}

impl Interaction {
    pub fn is_active(&self) -> bool {
        !matches!(self, Interaction::Idle)
    }

    fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Dragging { .. } => "drag",
            Interaction::Resizing { .. } => "resize",
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CropError {
    #[error("crop rectangle is locked while a {0} is in progress")]
    InteractionActive(&'static str),
    #[error("viewport has no area yet")]
    EmptyViewport,
}

/// Owns the crop rectangle and the interaction that is editing it.
#[derive(Debug, Clone, Default)]
pub struct CropEditor {
    rect: ViewportRect,
    viewport: ViewportSize,
    interaction: Interaction,
}

impl CropEditor {
    /// Editor whose rectangle covers the whole `viewport`.
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            rect: ViewportRect::full(viewport),
            viewport,
            interaction: Interaction::Idle,
        }
    }

    pub fn rect(&self) -> ViewportRect {
        self.rect
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_active(&self) -> bool {
        self.interaction.is_active()
    }

    fn ensure_idle(&self) -> Result<(), CropError> {
        if self.interaction.is_active() {
            return Err(CropError::InteractionActive(self.interaction.name()));
        }
        Ok(())
    }

    /// Pointer went down on the rectangle body.
    pub fn begin_drag(&mut self, pointer: PointerPos) -> Result<(), CropError> {
        self.ensure_idle()?;
        log::debug!("crop drag start at ({}, {})", pointer.x, pointer.y);
        self.interaction = Interaction::Dragging { anchor: pointer };
        Ok(())
    }

    /// Pointer went down on a resize handle.
    pub fn begin_resize(
        &mut self,
        handle: ResizeHandle,
        pointer: PointerPos,
    ) -> Result<(), CropError> {
        self.ensure_idle()?;
        log::debug!("crop resize '{handle}' start at ({}, {})", pointer.x, pointer.y);
        self.interaction = Interaction::Resizing {
            handle,
            anchor: pointer,
        };
        Ok(())
    }

    /// Hit-test `pointer` and start whatever interaction it grabs.
    pub fn pointer_pressed(&mut self, pointer: PointerPos) -> Result<PointerTarget, CropError> {
        let target = hit_test(&self.rect, pointer);
        match target {
            PointerTarget::Handle(handle) => self.begin_resize(handle, pointer)?,
            PointerTarget::Body => self.begin_drag(pointer)?,
            PointerTarget::Outside => {}
        }
        Ok(target)
    }

    /// Apply a pointer move to the active interaction. Returns `true` when
    /// the rectangle changed.
    pub fn pointer_moved(&mut self, pointer: PointerPos) -> bool {
        let before = self.rect;

        match self.interaction {
            Interaction::Idle => return false,
            Interaction::Dragging { anchor } => {
                let (dx, dy) = pointer.delta_from(anchor);
                self.rect = translated(self.rect, dx, dy, self.viewport);
                self.interaction = Interaction::Dragging { anchor: pointer };
            }
            Interaction::Resizing { handle, anchor } => {
                let (dx, dy) = pointer.delta_from(anchor);
                self.rect = resized(self.rect, handle, dx, dy, self.viewport);
                self.interaction = Interaction::Resizing {
                    handle,
                    anchor: pointer,
                };
            }
        }

        self.rect != before
    }

    /// Pointer released anywhere. Always ends the interaction; returns
    /// `true` if one was active.
    pub fn pointer_released(&mut self) -> bool {
        let was_active = self.interaction.is_active();
        if was_active {
            log::debug!("crop {} end at {}", self.interaction.name(), self.rect);
        }
        self.interaction = Interaction::Idle;
        was_active
    }

    /// Drop any interaction without further geometry changes.
    pub fn cancel(&mut self) {
        if self.interaction.is_active() {
            log::debug!("crop {} cancelled", self.interaction.name());
        }
        self.interaction = Interaction::Idle;
    }

    /// Re-read the viewport box and cover it completely.
    pub fn reset(&mut self, viewport: ViewportSize) -> Result<(), CropError> {
        self.ensure_idle()?;
        if viewport.is_empty() {
            return Err(CropError::EmptyViewport);
        }
        self.viewport = viewport;
        self.rect = ViewportRect::full(viewport);
        Ok(())
    }

    /// Set the rectangle numerically, fitted into the viewport.
    pub fn place(&mut self, rect: ViewportRect) -> Result<(), CropError> {
        self.ensure_idle()?;
        if self.viewport.is_empty() {
            return Err(CropError::EmptyViewport);
        }
        self.rect = rect.fitted(self.viewport);
        Ok(())
    }

    /// Track a resized viewport. The rectangle is scaled with the viewport
    /// so it keeps covering the same part of the frame. An empty viewport
    /// is refused and leaves the previous state in place.
    pub fn set_viewport(&mut self, viewport: ViewportSize) -> Result<(), CropError> {
        self.ensure_idle()?;
        if viewport.is_empty() {
            return Err(CropError::EmptyViewport);
        }
        let was_full = self.rect == ViewportRect::full(self.viewport);
        self.rect = if was_full {
            ViewportRect::full(viewport)
        } else {
            self.rect.scaled(self.viewport, viewport).fitted(viewport)
        };
        self.viewport = viewport;
        Ok(())
    }
}

/// Move `rect` by a pointer delta, keeping it inside `viewport`.
pub fn translated(rect: ViewportRect, dx: f32, dy: f32, viewport: ViewportSize) -> ViewportRect {
    ViewportRect {
        x: clamp_lenient(rect.x + dx, 0.0, viewport.width - rect.width),
        y: clamp_lenient(rect.y + dy, 0.0, viewport.height - rect.height),
        ..rect
    }
}

/// Move the edges named by `handle` by a pointer delta. West and north
/// edges move the origin while the opposite edge stays put.
pub fn resized(
    rect: ViewportRect,
    handle: ResizeHandle,
    dx: f32,
    dy: f32,
    viewport: ViewportSize,
) -> ViewportRect {
    let (min_w, min_h) = viewport.min_crop();
    let edges = handle.edges();
    let mut r = rect;

    if edges.east {
        r.width = clamp_lenient(r.width + dx, min_w, viewport.width - r.x);
    }
    if edges.west {
        let right = r.right();
        r.x = clamp_lenient(r.x + dx, 0.0, right - min_w);
        r.width = right - r.x;
    }
    if edges.south {
        r.height = clamp_lenient(r.height + dy, min_h, viewport.height - r.y);
    }
    if edges.north {
        let bottom = r.bottom();
        r.y = clamp_lenient(r.y + dy, 0.0, bottom - min_h);
        r.height = bottom - r.y;
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::MIN_CROP_SIZE;

    fn viewport() -> ViewportSize {
        ViewportSize::new(800.0, 600.0)
    }

    fn editor_with(rect: ViewportRect) -> CropEditor {
        let mut editor = CropEditor::new(viewport());
        editor.place(rect).unwrap();
        editor
    }

    #[test]
    fn drag_is_clamped_to_viewport() {
        let rect = ViewportRect::new(700.0, 500.0, 150.0, 150.0);
        let moved = translated(rect, 50.0, 50.0, viewport());
        assert_eq!((moved.x, moved.y), (650.0, 450.0));
        assert_eq!((moved.width, moved.height), (150.0, 150.0));
    }

    #[test]
    fn drag_position_stays_in_bounds_for_any_delta() {
        let rect = ViewportRect::new(100.0, 100.0, 200.0, 150.0);
        for dx in [-1000.0, -100.0, -0.5, 0.0, 3.0, 250.0, 5000.0] {
            for dy in [-700.0, -1.0, 0.0, 42.0, 449.0, 451.0, 9000.0] {
                let moved = translated(rect, dx, dy, viewport());
                assert!((0.0..=600.0).contains(&moved.x), "dx={dx} x={}", moved.x);
                assert!((0.0..=450.0).contains(&moved.y), "dy={dy} y={}", moved.y);
            }
        }
    }

    #[test]
    fn resize_south_east_grows_size_and_keeps_origin() {
        let rect = ViewportRect::new(100.0, 100.0, 200.0, 200.0);
        let r = resized(rect, ResizeHandle::SouthEast, 30.0, 20.0, viewport());
        assert_eq!(r, ViewportRect::new(100.0, 100.0, 230.0, 220.0));
    }

    #[test]
    fn resize_north_west_moves_origin_and_keeps_far_edges() {
        let rect = ViewportRect::new(100.0, 100.0, 200.0, 200.0);
        let r = resized(rect, ResizeHandle::NorthWest, 10.0, 10.0, viewport());
        assert_eq!(r, ViewportRect::new(110.0, 110.0, 190.0, 190.0));
    }

    #[test]
    fn resize_respects_minimum_and_untouched_edges_for_every_handle() {
        let rect = ViewportRect::new(200.0, 150.0, 300.0, 250.0);
        for handle in ResizeHandle::ALL {
            let edges = handle.edges();
            for (dx, dy) in [(-900.0, -900.0), (-40.0, 25.0), (0.0, 0.0), (60.0, -70.0), (900.0, 900.0)] {
                let r = resized(rect, handle, dx, dy, viewport());
                assert!(r.width >= MIN_CROP_SIZE && r.height >= MIN_CROP_SIZE, "{handle} {r:?}");
                assert!(r.is_within(viewport()), "{handle} {r:?}");
                if !edges.west {
                    assert_eq!(r.x, rect.x, "{handle} moved west edge");
                }
                if !edges.east {
                    assert_eq!(r.right(), rect.right(), "{handle} moved east edge");
                }
                if !edges.north {
                    assert_eq!(r.y, rect.y, "{handle} moved north edge");
                }
                if !edges.south {
                    assert_eq!(r.bottom(), rect.bottom(), "{handle} moved south edge");
                }
            }
        }
    }

    #[test]
    fn west_resize_past_the_left_border_keeps_right_edge() {
        let rect = ViewportRect::new(20.0, 20.0, 100.0, 100.0);
        let r = resized(rect, ResizeHandle::West, -80.0, 0.0, viewport());
        assert_eq!(r, ViewportRect::new(0.0, 20.0, 120.0, 100.0));
    }

    #[test]
    fn pointer_sequence_drives_state_machine() {
        let mut editor = editor_with(ViewportRect::new(100.0, 100.0, 200.0, 200.0));

        let target = editor.pointer_pressed(PointerPos::new(150.0, 150.0)).unwrap();
        assert_eq!(target, PointerTarget::Body);
        assert!(matches!(editor.interaction(), Interaction::Dragging { .. }));

        assert!(editor.pointer_moved(PointerPos::new(160.0, 170.0)));
        assert!(editor.pointer_moved(PointerPos::new(170.0, 170.0)));
        assert_eq!(editor.rect(), ViewportRect::new(120.0, 120.0, 200.0, 200.0));
        assert_eq!(
            editor.interaction(),
            Interaction::Dragging {
                anchor: PointerPos::new(170.0, 170.0)
            }
        );

        assert!(editor.pointer_released());
        assert_eq!(editor.interaction(), Interaction::Idle);
        assert!(!editor.pointer_moved(PointerPos::new(400.0, 400.0)));
        assert!(!editor.pointer_released());
    }

    #[test]
    fn resize_through_pointer_events() {
        let mut editor = editor_with(ViewportRect::new(100.0, 100.0, 200.0, 200.0));
        editor
            .begin_resize(ResizeHandle::SouthEast, PointerPos::new(300.0, 300.0))
            .unwrap();
        editor.pointer_moved(PointerPos::new(330.0, 320.0));
        editor.pointer_released();
        assert_eq!(editor.rect(), ViewportRect::new(100.0, 100.0, 230.0, 220.0));
    }

    #[test]
    fn only_one_interaction_at_a_time() {
        let mut editor = CropEditor::new(viewport());
        editor.begin_drag(PointerPos::new(10.0, 10.0)).unwrap();
        assert_eq!(
            editor.begin_resize(ResizeHandle::North, PointerPos::new(0.0, 0.0)),
            Err(CropError::InteractionActive("drag"))
        );
    }

    #[test]
    fn rectangle_is_locked_during_interaction() {
        let mut editor = editor_with(ViewportRect::new(100.0, 100.0, 200.0, 200.0));
        editor.begin_drag(PointerPos::new(150.0, 150.0)).unwrap();
        assert!(editor.reset(viewport()).is_err());
        assert!(editor.place(ViewportRect::new(0.0, 0.0, 60.0, 60.0)).is_err());
        assert!(editor.set_viewport(ViewportSize::new(100.0, 100.0)).is_err());
        assert_eq!(editor.rect(), ViewportRect::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn reset_covers_current_viewport() {
        let mut editor = editor_with(ViewportRect::new(100.0, 100.0, 200.0, 200.0));
        let resized_viewport = ViewportSize::new(1024.0, 768.0);
        editor.reset(resized_viewport).unwrap();
        assert_eq!(editor.rect(), ViewportRect::new(0.0, 0.0, 1024.0, 768.0));
        assert_eq!(editor.viewport(), resized_viewport);
        assert_eq!(editor.reset(ViewportSize::default()), Err(CropError::EmptyViewport));
    }

    #[test]
    fn viewport_change_scales_rectangle() {
        let mut editor = editor_with(ViewportRect::new(500.0, 300.0, 250.0, 250.0));
        editor.set_viewport(ViewportSize::new(400.0, 300.0)).unwrap();
        assert_eq!(editor.rect(), ViewportRect::new(250.0, 150.0, 125.0, 125.0));

        editor.set_viewport(ViewportSize::new(1600.0, 1200.0)).unwrap();
        assert_eq!(editor.rect(), ViewportRect::new(1000.0, 600.0, 500.0, 500.0));

        let mut full = CropEditor::new(viewport());
        full.set_viewport(ViewportSize::new(1000.0, 700.0)).unwrap();
        assert_eq!(full.rect(), ViewportRect::new(0.0, 0.0, 1000.0, 700.0));
    }

    #[test]
    fn scaled_down_rectangle_keeps_minimum_size() {
        let mut editor = editor_with(ViewportRect::new(0.0, 0.0, 60.0, 60.0));
        editor.set_viewport(ViewportSize::new(400.0, 300.0)).unwrap();
        assert_eq!(editor.rect(), ViewportRect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn collapsed_viewport_keeps_crop() {
        let placed = ViewportRect::new(100.0, 100.0, 200.0, 200.0);
        let mut editor = editor_with(placed);

        assert_eq!(
            editor.set_viewport(ViewportSize::new(0.0, 0.0)),
            Err(CropError::EmptyViewport)
        );
        assert_eq!(editor.rect(), placed);
        assert_eq!(editor.viewport(), viewport());

        editor.set_viewport(viewport()).unwrap();
        assert_eq!(editor.rect(), placed);
    }

    #[test]
    fn cancel_keeps_geometry() {
        let mut editor = editor_with(ViewportRect::new(100.0, 100.0, 200.0, 200.0));
        editor.begin_drag(PointerPos::new(150.0, 150.0)).unwrap();
        editor.pointer_moved(PointerPos::new(155.0, 150.0));
        editor.cancel();
        assert!(!editor.is_active());
        assert_eq!(editor.rect().x, 105.0);
    }
}
