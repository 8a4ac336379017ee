// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/mod.rs
//
// Desktop front end built on libcosmic.

mod app;
mod views;
mod widgets;

use cosmic::iced::Size;

pub use app::{Flags, KitsuneApp};

use crate::Args;
use crate::constant::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Open the viewer window and block until it is closed.
pub fn run(args: Args) -> anyhow::Result<()> {
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    crate::i18n::init(&requested_languages);

    let settings = cosmic::app::Settings::default().size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    cosmic::app::run::<KitsuneApp>(settings, Flags::Args(args))?;
    Ok(())
}
