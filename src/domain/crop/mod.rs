// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mod.rs
//
// Crop rectangle: geometry, resize handles and the interaction editor.

mod editor;
mod geometry;
mod handle;

pub use editor::{CropEditor, CropError, Interaction, resized, translated};
pub use geometry::{PointerPos, ViewportRect, ViewportSize};
pub use handle::{Edges, PointerTarget, ResizeHandle, hit_test};
