// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/panel.rs
//
// Export settings panel.

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget::{button, column, row, slider, text, text_input};

use crate::app::{AppMessage, AppModel};
use crate::constant::ALPHA_STEP;
use crate::domain::export::ExportFormat;
use crate::domain::output::Preset;
use crate::fl;

pub fn view(model: &AppModel) -> Element<'_, AppMessage> {
    column()
        .push(size_section(model))
        .push(crop_section(model))
        .push(background_section(model))
        .push(export_section(model))
        .push_maybe(error_section(model))
        .spacing(24)
        .width(Length::Fill)
        .into()
}

fn size_section(model: &AppModel) -> Element<'_, AppMessage> {
    let fields = row()
        .push(
            column()
                .push(text::caption(fl!("width", value = model.output.width())))
                .push(text_input("1920", &model.width_text).on_input(AppMessage::WidthChanged))
                .spacing(4),
        )
        .push(
            column()
                .push(text::caption(fl!("height", value = model.output.height())))
                .push(text_input("1080", &model.height_text).on_input(AppMessage::HeightChanged))
                .spacing(4),
        )
        .spacing(8);

    let presets = Preset::ALL.into_iter().fold(row().spacing(4), |row, preset| {
        let label = preset.to_string();
        let btn = if model.output == preset.size() {
            button::suggested(label)
        } else {
            button::standard(label)
        };
        row.push(btn.on_press(AppMessage::ApplyPreset(preset)))
    });

    column()
        .push(text::heading(fl!("export-size")))
        .push(fields)
        .push(presets)
        .spacing(8)
        .into()
}

fn crop_section(model: &AppModel) -> Element<'_, AppMessage> {
    let rect = model.editor.rect();
    let grid_label = if model.show_grid {
        fl!("hide-grid")
    } else {
        fl!("show-grid")
    };

    column()
        .push(text::heading(fl!("crop-area")))
        .push(text::caption(fl!("crop-help-title")))
        .push(text::caption(fl!("crop-help-move")))
        .push(text::caption(fl!("crop-help-resize")))
        .push(text::body(fl!(
            "crop-position",
            x = rect.x.round() as i64,
            y = rect.y.round() as i64
        )))
        .push(text::body(fl!(
            "crop-size",
            width = rect.width.round() as i64,
            height = rect.height.round() as i64
        )))
        .push(
            row()
                .push(button::standard(fl!("reset-full-view")).on_press(AppMessage::ResetCrop))
                .push(button::standard(grid_label).on_press(AppMessage::ToggleGrid))
                .spacing(8),
        )
        .spacing(8)
        .into()
}

fn background_section(model: &AppModel) -> Element<'_, AppMessage> {
    let alpha = model.alpha.value();

    column()
        .push(text::heading(fl!("background")))
        .push(text::body(fl!("transparency", value = model.alpha.to_string())))
        .push(slider(0.0..=1.0, alpha, AppMessage::AlphaChanged).step(ALPHA_STEP))
        .push(text::caption(fl!("transparency-hint")))
        .spacing(8)
        .into()
}

fn export_section(model: &AppModel) -> Element<'_, AppMessage> {
    let formats = [ExportFormat::Png, ExportFormat::Jpeg]
        .into_iter()
        .fold(row().spacing(4), |row, format| {
            let label = format.to_string();
            let btn = if model.format == format {
                button::suggested(label)
            } else {
                button::standard(label)
            };
            row.push(btn.on_press(AppMessage::FormatChanged(format)))
        });

    let export_label = if model.export_in_flight {
        fl!("export-running")
    } else {
        fl!("export-as", format = model.format.to_string())
    };
    let export_button = button::suggested(export_label)
        .on_press_maybe((!model.export_in_flight).then_some(AppMessage::Export))
        .width(Length::Fill);

    let mut section = column()
        .push(text::heading(fl!("format")))
        .push(formats)
        .push(export_button)
        .spacing(8);

    if let Some(path) = &model.last_export {
        section = section
            .push(text::caption(fl!(
                "last-export",
                path = path.display().to_string()
            )))
            .push(button::standard(fl!("open-export")).on_press(AppMessage::OpenLastExport));
    }

    section.into()
}

fn error_section(model: &AppModel) -> Option<Element<'_, AppMessage>> {
    let error = model.error.as_ref()?;
    Some(
        column()
            .push(text::body(error))
            .push(button::standard(fl!("dismiss")).on_press(AppMessage::ClearError))
            .spacing(8)
            .into(),
    )
}
