// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Smallest edge length of the crop rectangle in viewport pixels.
pub const MIN_CROP_SIZE: f32 = 50.0;

/// Smallest accepted output dimension in pixels.
pub const MIN_OUTPUT_DIMENSION: u32 = 1;

/// Largest accepted output dimension in pixels.
pub const MAX_OUTPUT_DIMENSION: u32 = 4096;

/// Output size used when nothing else is configured.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 1920;
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 1080;

/// Step of the background transparency slider.
pub const ALPHA_STEP: f32 = 0.01;

/// Viewer background colour (zinc-900) behind the rendered model.
pub const BACKGROUND_RGB: [u8; 3] = [24, 24, 27];

/// Asset name used in export file names when none is known.
pub const DEFAULT_ASSET_NAME: &str = "fox-model";

/// Drawn size of a resize handle in pixels.
pub const HANDLE_SIZE: f32 = 12.0;

/// Pointer hit area around a resize handle in pixels.
pub const HANDLE_HIT_SIZE: f32 = 24.0;

/// Initial window size of the desktop front end.
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

/// Width of the control panel next to the viewport.
pub const PANEL_WIDTH: f32 = 320.0;

/// Application id used for the desktop entry and persisted config.
pub const APP_ID: &str = "org.codeberg.wfx.Kitsune";
