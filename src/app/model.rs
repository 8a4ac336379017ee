// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Application state.

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::domain::crop::{CropEditor, ViewportSize};
use crate::domain::export::{ExportFormat, ExportRequest};
use crate::domain::frame::StillFrame;
use crate::domain::output::{BackgroundAlpha, OutputSize};

// =============================================================================
// Model
// =============================================================================

pub struct AppModel {
    // Render surface.
    pub frame: Option<StillFrame>,

    // Crop.
    pub editor: CropEditor,
    pub show_grid: bool,

    // Export settings.
    pub output: OutputSize,
    pub width_text: String,
    pub height_text: String,
    pub alpha: BackgroundAlpha,
    pub format: ExportFormat,
    pub asset_name: String,
    pub output_dir: PathBuf,

    // Export state.
    pub export_in_flight: bool,
    pub last_export: Option<PathBuf>,

    // UI state.
    pub error: Option<String>,
}

impl AppModel {
    /// Build the startup state. Until a front end reports its viewport the
    /// viewport matches the frame's pixel size.
    pub fn new(config: &AppConfig, frame: Option<StillFrame>) -> Self {
        let alpha = config.alpha();
        let mut frame = frame;
        if let Some(frame) = frame.as_mut() {
            frame.set_background_alpha(alpha);
        }

        let viewport = frame
            .as_ref()
            .map(|f| {
                let (w, h) = f.dimensions();
                ViewportSize::new(w as f32, h as f32)
            })
            .unwrap_or_default();

        let asset_name = frame
            .as_ref()
            .and_then(StillFrame::asset_name)
            .map_or_else(|| config.asset_name.clone(), str::to_string);

        let output = config.output_size();

        Self {
            frame,
            editor: CropEditor::new(viewport),
            show_grid: config.show_grid,
            output,
            width_text: output.width().to_string(),
            height_text: output.height().to_string(),
            alpha,
            format: config.format(),
            asset_name,
            output_dir: config.resolved_output_dir(),
            export_in_flight: false,
            last_export: None,
            error: None,
        }
    }

    pub fn set_error<S: Into<String>>(&mut self, msg: S) {
        let msg = msg.into();
        log::warn!("{msg}");
        self.error = Some(msg);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the output size and keep the text fields in sync.
    pub fn set_output(&mut self, output: OutputSize) {
        self.output = output;
        self.width_text = output.width().to_string();
        self.height_text = output.height().to_string();
    }

    /// Snapshot of the current crop and settings for the export pipeline.
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            rect: self.editor.rect(),
            viewport: self.editor.viewport(),
            output: self.output,
            format: self.format,
            asset_name: self.asset_name.clone(),
        }
    }
}
