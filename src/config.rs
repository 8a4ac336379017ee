// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application with cosmic-config support.

#[cfg(feature = "gui")]
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use std::path::PathBuf;

use crate::constant::{DEFAULT_ASSET_NAME, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH};
use crate::domain::export::ExportFormat;
use crate::domain::output::{BackgroundAlpha, OutputSize};

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "gui", derive(CosmicConfigEntry), version = 1)]
pub struct AppConfig {
    /// Directory exports are written to.
    pub output_dir: Option<PathBuf>,
    /// Asset name used in export file names when the frame has none.
    pub asset_name: String,
    /// Output width used at startup.
    pub output_width: u32,
    /// Output height used at startup.
    pub output_height: u32,
    /// Background transparency used at startup (0 = opaque, 1 = transparent).
    pub background_alpha: f32,
    /// Export format name (`png` or `jpeg`).
    pub export_format: String,
    /// Draw rule-of-thirds lines inside the crop rectangle.
    pub show_grid: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir()
                .or_else(dirs::picture_dir)
                .or_else(dirs::home_dir),
            asset_name: DEFAULT_ASSET_NAME.to_string(),
            output_width: DEFAULT_OUTPUT_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            background_alpha: 0.0,
            export_format: ExportFormat::Png.extension().to_string(),
            show_grid: false,
        }
    }
}

impl AppConfig {
    pub fn output_size(&self) -> OutputSize {
        OutputSize::new(self.output_width, self.output_height)
    }

    /// Configured transparency; an unreadable value falls back to opaque.
    pub fn alpha(&self) -> BackgroundAlpha {
        BackgroundAlpha::new(self.background_alpha).unwrap_or_else(|e| {
            log::warn!("Ignoring configured background alpha: {e}");
            BackgroundAlpha::OPAQUE
        })
    }

    pub fn format(&self) -> ExportFormat {
        ExportFormat::from_name(&self.export_format).unwrap_or_else(|| {
            log::warn!("Unknown export format '{}', using PNG", self.export_format);
            ExportFormat::Png
        })
    }

    /// Read the persisted configuration together with its handler so
    /// changes can be written back.
    #[cfg(feature = "gui")]
    pub fn load_with_handler() -> (Self, Option<cosmic_config::Config>) {
        match cosmic_config::Config::new(crate::constant::APP_ID, Self::VERSION) {
            Ok(handler) => {
                let config = Self::get_entry(&handler).unwrap_or_default();
                (config, Some(handler))
            }
            Err(e) => {
                log::warn!("Failed to open config, using defaults: {e}");
                (Self::default(), None)
            }
        }
    }

    /// Read the persisted configuration, falling back to defaults.
    pub fn load() -> Self {
        #[cfg(feature = "gui")]
        {
            Self::load_with_handler().0
        }
        #[cfg(not(feature = "gui"))]
        {
            Self::default()
        }
    }

    /// Export directory, falling back to the working directory.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
