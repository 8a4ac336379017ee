// SPDX-License-Identifier: GPL-3.0-or-later
// src/cli.rs
//
// Command line arguments and the headless export run.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use crate::app::{AppMessage, AppModel, UpdateResult, update};
use crate::config::AppConfig;
use crate::domain::crop::ViewportRect;
use crate::domain::export::ExportFormat;
use crate::domain::frame::StillFrame;
use crate::domain::output::Preset;

/// Crop and export rendered model frames.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "kitsune", version, about)]
pub struct Args {
    /// Rendered frame to crop (PNG, transparent where there is no model).
    pub frame: Option<PathBuf>,

    /// Export once and exit instead of opening the viewer window.
    #[arg(long)]
    pub export: bool,

    /// Output width in pixels (1-4096).
    #[arg(long)]
    pub width: Option<String>,

    /// Output height in pixels (1-4096).
    #[arg(long)]
    pub height: Option<String>,

    /// Resolution preset, applied before --width/--height.
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Crop rectangle in viewport pixels as X,Y,W,H.
    #[arg(long, allow_hyphen_values = true)]
    pub crop: Option<ViewportRect>,

    /// Background transparency, 0 (opaque) to 1 (transparent).
    #[arg(long)]
    pub alpha: Option<f32>,

    /// Image format of the export.
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Directory the export is written to.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Name used as the export file name prefix.
    #[arg(long)]
    pub asset_name: Option<String>,
}

impl Args {
    /// Settings from the command line as application messages, in the
    /// order they are applied.
    pub fn setting_messages(&self) -> Vec<AppMessage> {
        let mut messages = Vec::new();
        if let Some(preset) = self.preset {
            messages.push(AppMessage::ApplyPreset(preset));
        }
        if let Some(width) = &self.width {
            messages.push(AppMessage::WidthChanged(width.clone()));
        }
        if let Some(height) = &self.height {
            messages.push(AppMessage::HeightChanged(height.clone()));
        }
        if let Some(alpha) = self.alpha {
            messages.push(AppMessage::AlphaChanged(alpha));
        }
        if let Some(format) = self.format {
            messages.push(AppMessage::FormatChanged(format));
        }
        messages
    }

    /// Apply every command line override to `model`.
    pub fn apply(&self, model: &mut AppModel) -> anyhow::Result<()> {
        for message in self.setting_messages() {
            update(model, message);
            if let Some(error) = model.error.take() {
                bail!(error);
            }
        }

        if let Some(rect) = self.crop {
            model
                .editor
                .place(rect)
                .with_context(|| format!("Invalid crop rectangle {rect}"))?;
        }
        if let Some(name) = &self.asset_name {
            model.asset_name = name.clone();
        }
        if let Some(dir) = &self.out_dir {
            model.output_dir = dir.clone();
        }
        Ok(())
    }
}

/// Load the frame, apply the arguments and export once.
pub async fn run_export(args: &Args, config: AppConfig) -> anyhow::Result<PathBuf> {
    let frame_path = args
        .frame
        .as_deref()
        .context("No frame given; pass the rendered frame image to export")?;
    let frame = StillFrame::open(frame_path, config.alpha())?;

    let mut model = AppModel::new(&config, Some(frame));
    args.apply(&mut model)?;

    if let UpdateResult::Export(job) = update(&mut model, AppMessage::Export) {
        let result = job.run().await.map_err(|e| e.to_string());
        update(&mut model, AppMessage::ExportFinished(result));
    }

    if let Some(error) = model.error {
        bail!(error);
    }
    model
        .last_export
        .context("Export finished without writing a file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn write_frame(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("fox.png");
        RgbaImage::from_fn(400, 300, |x, _| {
            if x < 200 {
                Rgba([250, 120, 30, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
        .save(&path)
        .unwrap();
        path
    }

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "kitsune",
            "frame.png",
            "--export",
            "--preset",
            "uhd",
            "--crop",
            "10,20,300,200",
            "--format",
            "jpeg",
            "--alpha",
            "0.5",
        ])
        .unwrap();

        assert!(args.export);
        assert_eq!(args.preset, Some(Preset::UltraHd));
        assert_eq!(args.crop, Some(ViewportRect::new(10.0, 20.0, 300.0, 200.0)));
        assert_eq!(args.format, Some(ExportFormat::Jpeg));
        assert_eq!(args.setting_messages().len(), 3);
    }

    #[test]
    fn rejects_malformed_crop() {
        assert!(Args::try_parse_from(["kitsune", "--crop", "1,2,3"]).is_err());
    }

    #[test]
    fn invalid_width_aborts_before_export() {
        let config = AppConfig::default();
        let mut model = AppModel::new(&config, None);
        let args = Args {
            width: Some("wide".into()),
            ..Args::default()
        };
        let err = args.apply(&mut model).unwrap_err();
        assert!(err.to_string().contains("wide"));
    }

    #[tokio::test]
    async fn headless_export_writes_cropped_frame() {
        let dir = tempfile::tempdir().unwrap();
        let frame = write_frame(dir.path());
        let out = dir.path().join("out");

        let args = Args {
            frame: Some(frame),
            export: true,
            width: Some("100".into()),
            height: Some("100".into()),
            crop: Some(ViewportRect::new(250.0, 100.0, 100.0, 100.0)),
            alpha: Some(1.0),
            out_dir: Some(out.clone()),
            ..Args::default()
        };

        let path = run_export(&args, AppConfig::default()).await.unwrap();
        assert_eq!(path, out.join("fox-100x100.png"));

        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (100, 100));
        assert_eq!(img.get_pixel(50, 50)[3], 0);
    }

    #[tokio::test]
    async fn headless_export_without_frame_fails() {
        let err = run_export(&Args::default(), AppConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No frame"));
    }
}
