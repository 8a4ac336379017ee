// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Apply messages to the model. Side effects that need a runtime (export,
// opening files) are handed back to the caller as an `UpdateResult`.

use std::path::PathBuf;

use image::RgbaImage;

use super::{AppMessage, AppModel};
use crate::domain::crop::{PointerPos, ViewportSize};
use crate::domain::export::{ExportError, ExportRequest};
use crate::domain::frame::RenderSurface;
use crate::domain::output::BackgroundAlpha;

/// Work the front end has to run after an update.
#[derive(Debug)]
pub enum UpdateResult {
    None,
    /// Run the export pipeline and report back with `ExportFinished`.
    Export(ExportJob),
    /// Show an exported file with the desktop's default handler.
    Open(PathBuf),
}

/// Owned inputs of one export run.
#[derive(Debug)]
pub struct ExportJob {
    pub snapshot: RgbaImage,
    pub request: ExportRequest,
    pub dir: PathBuf,
}

impl ExportJob {
    pub async fn run(self) -> Result<PathBuf, ExportError> {
        crate::domain::export::export_to_dir(self.snapshot, self.request, self.dir).await
    }
}

pub fn update(model: &mut AppModel, message: AppMessage) -> UpdateResult {
    match message {
        // ---------------------------------------------------------------------
        // Viewport
        // ---------------------------------------------------------------------
        AppMessage::ViewportResized { width, height } => {
            let viewport = ViewportSize::new(width, height);
            if viewport != model.editor.viewport() {
                if let Err(e) = model.editor.set_viewport(viewport) {
                    log::debug!("Viewport change deferred: {e}");
                }
            }
        }

        // ---------------------------------------------------------------------
        // Crop interaction
        // ---------------------------------------------------------------------
        AppMessage::PointerPressed { x, y } => {
            match model.editor.pointer_pressed(PointerPos::new(x, y)) {
                Ok(target) => log::trace!("Pointer pressed on {target:?}"),
                Err(e) => log::debug!("Ignoring pointer press: {e}"),
            }
        }

        AppMessage::PointerMoved { x, y } => {
            model.editor.pointer_moved(PointerPos::new(x, y));
        }

        AppMessage::PointerReleased => {
            model.editor.pointer_released();
        }

        AppMessage::CancelInteraction => {
            model.editor.cancel();
        }

        AppMessage::ResetCrop => {
            let viewport = model.editor.viewport();
            match model.editor.reset(viewport) {
                Ok(()) => model.clear_error(),
                Err(e) => model.set_error(e.to_string()),
            }
        }

        // ---------------------------------------------------------------------
        // Export settings
        // ---------------------------------------------------------------------
        AppMessage::WidthChanged(raw) => {
            let result = model.output.set_width_text(&raw);
            model.width_text = raw;
            match result {
                Ok(_) => model.clear_error(),
                Err(e) => model.set_error(e.to_string()),
            }
        }

        AppMessage::HeightChanged(raw) => {
            let result = model.output.set_height_text(&raw);
            model.height_text = raw;
            match result {
                Ok(_) => model.clear_error(),
                Err(e) => model.set_error(e.to_string()),
            }
        }

        AppMessage::ApplyPreset(preset) => {
            model.set_output(preset.size());
            model.clear_error();
        }

        AppMessage::AlphaChanged(value) => match BackgroundAlpha::new(value) {
            Ok(alpha) => {
                model.alpha = alpha;
                if let Some(frame) = model.frame.as_mut() {
                    frame.set_background_alpha(alpha);
                }
            }
            Err(e) => model.set_error(e.to_string()),
        },

        AppMessage::FormatChanged(format) => {
            model.format = format;
        }

        AppMessage::ToggleGrid => {
            model.show_grid = !model.show_grid;
        }

        // ---------------------------------------------------------------------
        // Export
        // ---------------------------------------------------------------------
        AppMessage::Export => {
            if model.export_in_flight {
                model.set_error(ExportError::Busy.to_string());
                return UpdateResult::None;
            }

            let Some(snapshot) = model.frame.pixels().cloned() else {
                model.set_error(ExportError::SurfaceUnavailable.to_string());
                return UpdateResult::None;
            };

            let request = model.export_request();
            log::info!(
                "Exporting crop {} as {} {}",
                request.rect,
                request.output,
                request.format
            );

            model.export_in_flight = true;
            model.clear_error();
            return UpdateResult::Export(ExportJob {
                snapshot,
                request,
                dir: model.output_dir.clone(),
            });
        }

        AppMessage::ExportFinished(result) => {
            model.export_in_flight = false;
            match result {
                Ok(path) => {
                    log::info!("Export written to {}", path.display());
                    model.last_export = Some(path);
                }
                Err(e) => model.set_error(e),
            }
        }

        AppMessage::OpenLastExport => {
            if let Some(path) = model.last_export.clone() {
                return UpdateResult::Open(path);
            }
        }

        // ---------------------------------------------------------------------
        // Errors
        // ---------------------------------------------------------------------
        AppMessage::ClearError => model.clear_error(),
    }

    UpdateResult::None
}
