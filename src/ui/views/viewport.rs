// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/viewport.rs
//
// Render the viewport with the composed frame and the crop overlay.

use cosmic::Element;
use cosmic::iced::{ContentFit, Length};
use cosmic::iced_widget::stack;
use cosmic::widget::{container, image, image::Handle as ImageHandle, text};

use crate::app::{AppMessage, AppModel};
use crate::fl;
use crate::ui::widgets::crop_overlay;

pub fn view<'a>(model: &'a AppModel, frame: Option<&'a ImageHandle>) -> Element<'a, AppMessage> {
    let (Some(handle), Some(still)) = (frame, model.frame.as_ref()) else {
        return container(text(fl!("no-frame")))
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into();
    };

    // Contain keeps the frame's aspect ratio; the overlay measures the same
    // centered box, so viewport coordinates map to surface pixels by one scale.
    let picture = image(handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);

    let overlay = crop_overlay(
        still.dimensions(),
        model.editor.rect(),
        model.editor.viewport(),
        model.editor.interaction(),
        model.show_grid,
    );

    stack![picture, overlay].into()
}
