// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/export.rs
//
// Export pipeline: crop the viewport region out of the render surface,
// resample it to the output size, encode and deliver the file.

use std::fmt;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage, imageops};
use thiserror::Error;

use super::crop::{ViewportRect, ViewportSize};
use super::frame::RenderSurface;
use super::output::OutputSize;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export failed: renderer not ready")]
    SurfaceUnavailable,
    #[error("export failed: crop rectangle {0} covers no pixels of the frame")]
    EmptyRegion(ViewportRect),
    #[error("export failed: could not encode {format}: {source}")]
    Encode {
        format: ExportFormat,
        #[source]
        source: image::ImageError,
    },
    #[error("export failed: encoder produced no data")]
    EmptyEncoding,
    #[error("export failed: could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("export failed: another export is still running")]
    Busy,
    #[error("export failed: worker stopped unexpectedly: {0}")]
    Worker(String),
}

/// Compressed still-image formats the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }

    /// Look a format up by name or extension (`png`, `jpeg`, `jpg`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpeg" | "jpg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("PNG"),
            ExportFormat::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// Everything the pipeline needs besides the surface itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub rect: ViewportRect,
    pub viewport: ViewportSize,
    pub output: OutputSize,
    pub format: ExportFormat,
    pub asset_name: String,
}

impl ExportRequest {
    /// `<asset>-<width>x<height>.<ext>`
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}.{}",
            sanitize_asset_name(&self.asset_name),
            self.output,
            self.format.extension()
        )
    }
}

/// Encoded export ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// Keep file names portable: anything outside `[A-Za-z0-9._-]` becomes `-`.
pub fn sanitize_asset_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        crate::constant::DEFAULT_ASSET_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Run the blit and encode for `request` against `surface`.
pub fn render_export(
    surface: &dyn RenderSurface,
    request: &ExportRequest,
) -> Result<ExportedImage, ExportError> {
    let pixels = surface.pixels().ok_or(ExportError::SurfaceUnavailable)?;
    let (surface_w, surface_h) = pixels.dimensions();

    let region = request
        .rect
        .to_surface_region(request.viewport, surface_w, surface_h)
        .ok_or(ExportError::EmptyRegion(request.rect))?;

    let resampled = resample_region(pixels, region, request.output);
    let bytes = encode(resampled, request.format)?;

    log::info!(
        "Exported {} ({} bytes) from surface region {:?}",
        request.file_name(),
        bytes.len(),
        region
    );

    Ok(ExportedImage {
        file_name: request.file_name(),
        width: request.output.width(),
        height: request.output.height(),
        format: request.format,
        bytes,
    })
}

/// Copy `region` (`x, y, width, height` in surface pixels) into a buffer of
/// exactly `output`, bilinear-filtered. Non-uniform scaling is allowed.
pub fn resample_region(
    source: &RgbaImage,
    region: (u32, u32, u32, u32),
    output: OutputSize,
) -> RgbaImage {
    let (x, y, width, height) = region;
    let cropped = imageops::crop_imm(source, x, y, width, height).to_image();

    if cropped.dimensions() == (output.width(), output.height()) {
        return cropped;
    }

    imageops::resize(
        &cropped,
        output.width(),
        output.height(),
        imageops::FilterType::Triangle,
    )
}

/// Encode into an in-memory file. JPEG drops the alpha channel.
pub fn encode(image: RgbaImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let image = match format {
        ExportFormat::Png => DynamicImage::ImageRgba8(image),
        ExportFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8()),
    };

    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, format.image_format())
        .map_err(|source| ExportError::Encode { format, source })?;

    let bytes = cursor.into_inner();
    if bytes.is_empty() {
        return Err(ExportError::EmptyEncoding);
    }
    Ok(bytes)
}

/// Write `exported` into `dir`. The bytes go to a temporary file first which
/// is renamed into place on success and removed on any failure.
pub fn save_export(dir: &Path, exported: &ExportedImage) -> Result<PathBuf, ExportError> {
    let target = dir.join(&exported.file_name);
    let io_err = |source| ExportError::Io {
        path: target.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut staging = tempfile::Builder::new()
        .prefix(".kitsune-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(io_err)?;
    staging.write_all(&exported.bytes).map_err(io_err)?;
    staging.flush().map_err(io_err)?;
    staging
        .persist(&target)
        .map_err(|persist| io_err(persist.error))?;

    log::info!("Saved {}", target.display());
    Ok(target)
}

/// Render, encode and save off the calling thread. Takes an owned snapshot
/// of the surface so the viewport may keep changing meanwhile.
pub async fn export_to_dir(
    snapshot: RgbaImage,
    request: ExportRequest,
    dir: PathBuf,
) -> Result<PathBuf, ExportError> {
    tokio::task::spawn_blocking(move || {
        let exported = render_export(&snapshot, &request)?;
        save_export(&dir, &exported)
    })
    .await
    .map_err(|join| ExportError::Worker(join.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};

    /// 200x100 frame with a distinct colour per pixel.
    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(200, 100, |x, y| Rgba([x as u8, y as u8, ((x + y) % 256) as u8, 255]))
    }

    fn request(rect: ViewportRect, output: OutputSize) -> ExportRequest {
        ExportRequest {
            rect,
            viewport: ViewportSize::new(200.0, 100.0),
            output,
            format: ExportFormat::Png,
            asset_name: "fox-model".into(),
        }
    }

    #[test]
    fn file_name_carries_output_size() {
        let req = request(ViewportRect::new(0.0, 0.0, 200.0, 100.0), OutputSize::new(1920, 1080));
        assert_eq!(req.file_name(), "fox-model-1920x1080.png");

        let jpeg = ExportRequest {
            format: ExportFormat::Jpeg,
            asset_name: "my fox/../model".into(),
            ..req
        };
        assert_eq!(jpeg.file_name(), "my-fox-..-model-1920x1080.jpg");
    }

    #[test]
    fn sanitize_falls_back_to_default_name() {
        assert_eq!(sanitize_asset_name("  "), "fox-model");
        assert_eq!(sanitize_asset_name(".."), "fox-model");
        assert_eq!(sanitize_asset_name("Fox_01"), "Fox_01");
    }

    #[test]
    fn missing_surface_is_reported() {
        let none: Option<RgbaImage> = None;
        let req = request(ViewportRect::new(0.0, 0.0, 50.0, 50.0), OutputSize::new(10, 10));
        assert!(matches!(
            render_export(&none, &req),
            Err(ExportError::SurfaceUnavailable)
        ));
    }

    #[test]
    fn empty_region_is_reported() {
        let req = request(ViewportRect::new(250.0, 0.0, 50.0, 50.0), OutputSize::new(10, 10));
        assert!(matches!(
            render_export(&gradient(), &req),
            Err(ExportError::EmptyRegion(_))
        ));
    }

    #[test]
    fn output_has_requested_size_regardless_of_aspect() {
        let req = request(ViewportRect::new(10.0, 10.0, 60.0, 60.0), OutputSize::new(1920, 1080));
        let exported = render_export(&gradient(), &req).unwrap();
        assert_eq!((exported.width, exported.height), (1920, 1080));

        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (1920, 1080));
    }

    #[test]
    fn same_size_export_reproduces_region_exactly() {
        let source = gradient();
        let rect = ViewportRect::new(30.0, 20.0, 120.0, 50.0);
        let req = request(rect, OutputSize::new(120, 50));
        let exported = render_export(&source, &req).unwrap();

        let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
        let expected = imageops::crop_imm(&source, 30, 20, 120, 50).to_image();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn region_scales_with_surface_density() {
        let source = gradient();
        let mut req = request(ViewportRect::new(10.0, 5.0, 50.0, 25.0), OutputSize::new(100, 50));
        req.viewport = ViewportSize::new(100.0, 50.0);

        let exported = render_export(&source, &req).unwrap();
        let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), source.get_pixel(20, 10));
    }

    #[test]
    fn jpeg_export_decodes() {
        let mut req = request(ViewportRect::new(0.0, 0.0, 200.0, 100.0), OutputSize::new(64, 32));
        req.format = ExportFormat::Jpeg;
        let exported = render_export(&gradient(), &req).unwrap();
        assert_eq!(&exported.bytes[..2], &[0xFF, 0xD8]);
        assert!(exported.file_name.ends_with(".jpg"));
    }

    #[test]
    fn save_writes_file_and_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let exported = ExportedImage {
            file_name: "fox-model-2x2.png".into(),
            width: 2,
            height: 2,
            format: ExportFormat::Png,
            bytes: vec![1, 2, 3],
        };

        let path = save_export(dir.path(), &exported).unwrap();
        assert_eq!(path, dir.path().join("fox-model-2x2.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn format_names() {
        assert_eq!(ExportFormat::from_name("JPG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_name("png"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_name("gif"), None);
    }

    #[tokio::test]
    async fn export_to_dir_runs_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(ViewportRect::new(0.0, 0.0, 200.0, 100.0), OutputSize::new(40, 20));

        let path = export_to_dir(gradient(), req, dir.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "fox-model-40x20.png");
        let saved = image::open(&path).unwrap();
        assert_eq!(saved.dimensions(), (40, 20));
    }
}
