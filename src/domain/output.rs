// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/output.rs
//
// Export settings: output size, resolution presets, background transparency.

use std::fmt;

use thiserror::Error;

use crate::constant::{
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, MAX_OUTPUT_DIMENSION, MIN_OUTPUT_DIMENSION,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingError {
    #[error("'{0}' is not a whole number of pixels")]
    NotANumber(String),
    #[error("transparency must be a number between 0 and 1")]
    InvalidAlpha,
}

/// Pixel dimensions of the exported image. Both sides stay within
/// `MIN_OUTPUT_DIMENSION..=MAX_OUTPUT_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputSize {
    width: u32,
    height: u32,
}

impl OutputSize {
    /// Build an output size, clamping each side into the valid range.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = clamp_dimension(width);
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = clamp_dimension(height);
    }

    /// Parse text from a width field and store it. Non-numeric input is
    /// rejected and leaves the size untouched.
    pub fn set_width_text(&mut self, raw: &str) -> Result<u32, SettingError> {
        let value = parse_dimension(raw)?;
        self.set_width(value);
        Ok(self.width)
    }

    pub fn set_height_text(&mut self, raw: &str) -> Result<u32, SettingError> {
        let value = parse_dimension(raw)?;
        self.set_height(value);
        Ok(self.height)
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_WIDTH, DEFAULT_OUTPUT_HEIGHT)
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_OUTPUT_DIMENSION, MAX_OUTPUT_DIMENSION)
}

/// Parse a dimension typed by the user. Accepts surrounding whitespace and
/// saturates huge values; negative numbers clamp to the minimum.
pub fn parse_dimension(raw: &str) -> Result<u32, SettingError> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SettingError::NotANumber(raw.to_string()));
    }
    if negative {
        return Ok(MIN_OUTPUT_DIMENSION);
    }
    Ok(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Resolution shortcuts offered next to the size fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Preset {
    #[value(name = "fhd")]
    FullHd,
    #[value(name = "hd")]
    Hd,
    #[value(name = "uhd")]
    UltraHd,
    #[value(name = "square")]
    Square,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::FullHd, Preset::Hd, Preset::UltraHd, Preset::Square];

    pub fn size(self) -> OutputSize {
        match self {
            Preset::FullHd => OutputSize::new(1920, 1080),
            Preset::Hd => OutputSize::new(1280, 720),
            Preset::UltraHd => OutputSize::new(3840, 2160),
            Preset::Square => OutputSize::new(1024, 1024),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        write!(f, "{}×{}", size.width(), size.height())
    }
}

/// Transparency of the viewer background: 0 is opaque, 1 fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackgroundAlpha(f32);

impl BackgroundAlpha {
    pub const OPAQUE: BackgroundAlpha = BackgroundAlpha(0.0);
    pub const TRANSPARENT: BackgroundAlpha = BackgroundAlpha(1.0);

    /// Clamp into `[0, 1]`. NaN is rejected.
    pub fn new(value: f32) -> Result<Self, SettingError> {
        if value.is_nan() {
            return Err(SettingError::InvalidAlpha);
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Opacity of the background colour.
    pub fn background_opacity(self) -> f32 {
        1.0 - self.0
    }
}

impl fmt::Display for BackgroundAlpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
