// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/frame.rs
//
// Render surfaces: the readable pixel buffer behind the viewport.

use std::path::Path;

use anyhow::Context;
use image::{ImageReader, Rgba, RgbaImage};

use super::output::BackgroundAlpha;
use crate::constant::BACKGROUND_RGB;

/// Anything that can hand out the pixels currently shown in the viewport.
pub trait RenderSurface {
    /// The live RGBA buffer, or `None` when nothing has been rendered yet.
    fn pixels(&self) -> Option<&RgbaImage>;
}

impl RenderSurface for RgbaImage {
    fn pixels(&self) -> Option<&RgbaImage> {
        Some(self)
    }
}

impl<S: RenderSurface> RenderSurface for Option<S> {
    fn pixels(&self) -> Option<&RgbaImage> {
        self.as_ref().and_then(RenderSurface::pixels)
    }
}

/// A pre-rendered frame of the model (transparent where there is no
/// geometry) composited over the viewer background.
#[derive(Debug, Clone)]
pub struct StillFrame {
    /// Asset name derived from the file, used in export file names.
    asset_name: Option<String>,
    /// Frame as rendered, before background compositing.
    rendered: RgbaImage,
    /// Frame over the background at the current transparency.
    composed: RgbaImage,
    alpha: BackgroundAlpha,
}

impl StillFrame {
    /// Load a frame image from disk.
    pub fn open(path: &Path, alpha: BackgroundAlpha) -> anyhow::Result<Self> {
        let rendered = ImageReader::open(path)
            .with_context(|| format!("Failed to open frame {}", path.display()))?
            .decode()
            .with_context(|| format!("Failed to decode frame {}", path.display()))?
            .to_rgba8();

        let asset_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string);

        log::info!(
            "Loaded frame {} ({}x{})",
            path.display(),
            rendered.width(),
            rendered.height()
        );

        let mut frame = Self::from_image(rendered, alpha);
        frame.asset_name = asset_name;
        Ok(frame)
    }

    pub fn from_image(rendered: RgbaImage, alpha: BackgroundAlpha) -> Self {
        let composed = compose_over_background(&rendered, alpha);
        Self {
            asset_name: None,
            rendered,
            composed,
            alpha,
        }
    }

    pub fn asset_name(&self) -> Option<&str> {
        self.asset_name.as_deref()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rendered.dimensions()
    }

    /// Recompose with a new background transparency.
    pub fn set_background_alpha(&mut self, alpha: BackgroundAlpha) {
        if alpha == self.alpha {
            return;
        }
        self.alpha = alpha;
        self.composed = compose_over_background(&self.rendered, alpha);
    }

    pub fn composed(&self) -> &RgbaImage {
        &self.composed
    }
}

impl RenderSurface for StillFrame {
    fn pixels(&self) -> Option<&RgbaImage> {
        Some(&self.composed)
    }
}

/// Composite `rendered` over the viewer background whose opacity is
/// `1 - alpha` (straight alpha, Porter-Duff "over").
pub fn compose_over_background(rendered: &RgbaImage, alpha: BackgroundAlpha) -> RgbaImage {
    let bg_a = alpha.background_opacity();
    let [bg_r, bg_g, bg_b] = BACKGROUND_RGB.map(f32::from);

    let mut out = RgbaImage::new(rendered.width(), rendered.height());
    for (src, dst) in rendered.pixels().zip(out.pixels_mut()) {
        let [r, g, b, a] = src.0;
        let src_a = f32::from(a) / 255.0;
        let out_a = src_a + bg_a * (1.0 - src_a);

        *dst = if out_a <= 0.0 {
            Rgba([0, 0, 0, 0])
        } else {
            let blend = |c: u8, bg: f32| -> u8 {
                let value = (f32::from(c) * src_a + bg * bg_a * (1.0 - src_a)) / out_a;
                value.round().clamp(0.0, 255.0) as u8
            };
            let alpha_byte = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
            Rgba([blend(r, bg_r), blend(g, bg_g), blend(b, bg_b), alpha_byte])
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> RgbaImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
        img
    }

    #[test]
    fn opaque_background_fills_empty_pixels() {
        let out = compose_over_background(&frame(), BackgroundAlpha::OPAQUE);
        assert_eq!(out.get_pixel(0, 0), &Rgba([200, 100, 50, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([24, 24, 27, 255]));
    }

    #[test]
    fn transparent_background_keeps_empty_pixels_clear() {
        let out = compose_over_background(&frame(), BackgroundAlpha::TRANSPARENT);
        assert_eq!(out.get_pixel(0, 0), &Rgba([200, 100, 50, 255]));
        assert_eq!(out.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn half_transparent_background() {
        let out = compose_over_background(&frame(), BackgroundAlpha::new(0.5).unwrap());
        assert_eq!(out.get_pixel(1, 0), &Rgba([24, 24, 27, 128]));
    }

    #[test]
    fn still_frame_recomposes_on_alpha_change() {
        let mut still = StillFrame::from_image(frame(), BackgroundAlpha::OPAQUE);
        assert_eq!(still.pixels().unwrap().get_pixel(1, 0)[3], 255);
        still.set_background_alpha(BackgroundAlpha::TRANSPARENT);
        assert_eq!(still.pixels().unwrap().get_pixel(1, 0)[3], 0);
        assert_eq!(still.dimensions(), (2, 1));
    }

    #[test]
    fn missing_surface_has_no_pixels() {
        let none: Option<StillFrame> = None;
        assert!(none.pixels().is_none());
    }

    #[test]
    fn open_reads_asset_name_from_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fox.png");
        frame().save(&path).unwrap();

        let still = StillFrame::open(&path, BackgroundAlpha::OPAQUE).unwrap();
        assert_eq!(still.asset_name(), Some("fox"));
        assert_eq!(still.composed().get_pixel(1, 0), &Rgba([24, 24, 27, 255]));
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StillFrame::open(&dir.path().join("nope.png"), BackgroundAlpha::OPAQUE).is_err());
    }
}
