// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/geometry.rs
//
// Viewport-space geometry: pointer positions, viewport box, crop rectangle.

use std::fmt;
use std::str::FromStr;

use crate::constant::MIN_CROP_SIZE;

/// Pointer position relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset from `anchor` to `self`.
    pub fn delta_from(self, anchor: PointerPos) -> (f32, f32) {
        (self.x - anchor.x, self.y - anchor.y)
    }
}

/// On-screen size of the viewport bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Minimum crop edge on each axis. Falls back to the viewport extent
    /// when the viewport is smaller than [`MIN_CROP_SIZE`].
    pub fn min_crop(&self) -> (f32, f32) {
        (
            MIN_CROP_SIZE.min(self.width),
            MIN_CROP_SIZE.min(self.height),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Largest box with the aspect ratio of a `width` x `height` frame that
    /// fits inside `self`.
    pub fn contain(self, width: u32, height: u32) -> ViewportSize {
        if width == 0 || height == 0 || self.is_empty() {
            return ViewportSize::default();
        }
        let scale = (self.width / width as f32).min(self.height / height as f32);
        ViewportSize::new(width as f32 * scale, height as f32 * scale)
    }
}

/// Crop rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering the whole viewport.
    pub fn full(viewport: ViewportSize) -> Self {
        Self::new(0.0, 0.0, viewport.width, viewport.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: PointerPos) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Shrink and shift the rectangle until it satisfies the crop invariant
    /// for `viewport`: minimum size, non-negative origin, inside the box.
    pub fn fitted(self, viewport: ViewportSize) -> Self {
        let (min_w, min_h) = viewport.min_crop();
        let width = clamp_lenient(self.width, min_w, viewport.width);
        let height = clamp_lenient(self.height, min_h, viewport.height);
        let x = clamp_lenient(self.x, 0.0, viewport.width - width);
        let y = clamp_lenient(self.y, 0.0, viewport.height - height);
        Self::new(x, y, width, height)
    }

    /// Scale the rectangle from one viewport box onto another, per axis.
    /// An empty source box gives the full target box.
    pub fn scaled(self, from: ViewportSize, to: ViewportSize) -> Self {
        if from.is_empty() {
            return Self::full(to);
        }
        let sx = to.width / from.width;
        let sy = to.height / from.height;
        Self::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }

    /// Whether the rectangle satisfies the crop invariant for `viewport`.
    pub fn is_within(&self, viewport: ViewportSize) -> bool {
        let (min_w, min_h) = viewport.min_crop();
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= min_w
            && self.height >= min_h
            && self.right() <= viewport.width
            && self.bottom() <= viewport.height
    }

    /// Map the rectangle into the pixel grid of a surface of
    /// `surface_width` x `surface_height`, scaling each axis by
    /// `surface / viewport`. Returns `(x, y, width, height)` in whole pixels,
    /// or `None` when nothing of the surface is covered.
    pub fn to_surface_region(
        &self,
        viewport: ViewportSize,
        surface_width: u32,
        surface_height: u32,
    ) -> Option<(u32, u32, u32, u32)> {
        if viewport.is_empty() || surface_width == 0 || surface_height == 0 {
            return None;
        }

        let sx = surface_width as f32 / viewport.width;
        let sy = surface_height as f32 / viewport.height;

        let snap = |value: f32, limit: u32| -> u32 { (value.round().max(0.0) as u32).min(limit) };

        let left = snap(self.x * sx, surface_width);
        let top = snap(self.y * sy, surface_height);
        let right = snap(self.right() * sx, surface_width);
        let bottom = snap(self.bottom() * sy, surface_height);

        if right <= left || bottom <= top {
            return None;
        }

        Some((left, top, right - left, bottom - top))
    }
}

/// `f32::clamp` panics when `min > max`; prefer the lower bound then.
pub(crate) fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    if max < min {
        min
    } else {
        value.clamp(min, max)
    }
}

impl fmt::Display for ViewportRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.x.round(),
            self.y.round(),
            self.width.round(),
            self.height.round()
        )
    }
}

/// Parses `X,Y,W,H` as accepted by `--crop`.
impl FromStr for ViewportRect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, w, h] = parts.as_slice() else {
            return Err(format!("expected X,Y,W,H but got '{s}'"));
        };

        let parse = |name: &str, raw: &str| -> Result<f32, String> {
            let value: f32 = raw
                .parse()
                .map_err(|_| format!("{name} '{raw}' is not a number"))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(format!("{name} '{raw}' is not finite"))
            }
        };

        Ok(Self::new(
            parse("x", x)?,
            parse("y", y)?,
            parse("width", w)?,
            parse("height", h)?,
        ))
    }
}
