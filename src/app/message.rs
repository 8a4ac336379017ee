// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: pointer events, user actions, and internal signals.

use std::path::PathBuf;

use crate::domain::export::ExportFormat;
use crate::domain::output::Preset;

#[derive(Debug, Clone)]
pub enum AppMessage {
    // Viewport.
    ViewportResized { width: f32, height: f32 },

    // Crop interaction (viewport-relative pointer positions).
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased,
    CancelInteraction,
    ResetCrop,

    // Export settings.
    WidthChanged(String),
    HeightChanged(String),
    ApplyPreset(Preset),
    AlphaChanged(f32),
    FormatChanged(ExportFormat),
    ToggleGrid,

    // Export.
    Export,
    ExportFinished(Result<PathBuf, String>),
    OpenLastExport,

    // Errors.
    ClearError,
}
