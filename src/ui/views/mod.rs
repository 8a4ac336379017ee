// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/mod.rs
//
// Window content: viewport on the left, settings panel on the right.

mod panel;
mod viewport;

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget::{container, image::Handle as ImageHandle, row};

use crate::app::{AppMessage, AppModel};
use crate::constant::PANEL_WIDTH;

pub fn view<'a>(model: &'a AppModel, frame: Option<&'a ImageHandle>) -> Element<'a, AppMessage> {
    row()
        .push(viewport::view(model, frame))
        .push(
            container(panel::view(model))
                .width(Length::Fixed(PANEL_WIDTH))
                .height(Length::Fill)
                .padding(16),
        )
        .spacing(8)
        .into()
}
