// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/app.rs
//
// COSMIC application wiring and main app struct.

use cosmic::app::Core;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::iced::keyboard::{self, Key, Modifiers, key::Named};
use cosmic::widget::image::Handle as ImageHandle;
use cosmic::{Action, ApplicationExt, Element, Task};

use crate::Args;
use crate::app::{AppMessage, AppModel, UpdateResult, update};
use crate::config::AppConfig;
use crate::constant::APP_ID;
use crate::domain::frame::StillFrame;
use crate::fl;

/// Flags passed from `main` into the application.
#[derive(Debug, Clone)]
pub enum Flags {
    Args(Args),
}

/// Main application type.
pub struct KitsuneApp {
    core: Core,
    model: AppModel,
    config: AppConfig,
    config_handler: Option<cosmic_config::Config>,
    frame_handle: Option<ImageHandle>,
}

impl cosmic::Application for KitsuneApp {
    type Executor = cosmic::SingleThreadExecutor;
    type Flags = Flags;
    type Message = AppMessage;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        let (config, config_handler) = AppConfig::load_with_handler();
        let Flags::Args(args) = flags;

        let mut load_error = None;
        let frame = args.frame.as_deref().and_then(|path| {
            StillFrame::open(path, config.alpha())
                .map_err(|e| {
                    log::error!("Failed to open frame {}: {e:#}", path.display());
                    load_error = Some(format!("{e:#}"));
                })
                .ok()
        });

        let mut model = AppModel::new(&config, frame);
        if let Err(e) = args.apply(&mut model) {
            model.set_error(format!("{e:#}"));
        }
        if let Some(e) = load_error {
            model.set_error(e);
        }

        let mut app = Self {
            core,
            model,
            config,
            config_handler,
            frame_handle: None,
        };
        app.refresh_frame_handle();
        app.set_header_title(fl!("app-title"));

        (app, Task::none())
    }

    fn update(&mut self, message: Self::Message) -> Task<Action<Self::Message>> {
        let persists = matches!(
            message,
            AppMessage::WidthChanged(_)
                | AppMessage::HeightChanged(_)
                | AppMessage::ApplyPreset(_)
                | AppMessage::AlphaChanged(_)
                | AppMessage::FormatChanged(_)
                | AppMessage::ToggleGrid
        );
        let alpha_changed = matches!(message, AppMessage::AlphaChanged(_));

        let result = update(&mut self.model, message);

        if alpha_changed {
            self.refresh_frame_handle();
        }
        if persists {
            self.save_config();
        }

        match result {
            UpdateResult::None => Task::none(),
            UpdateResult::Export(job) => Task::perform(job.run(), |result| {
                Action::App(AppMessage::ExportFinished(
                    result.map_err(|e| e.to_string()),
                ))
            }),
            UpdateResult::Open(path) => {
                if let Err(e) = open::that_detached(&path) {
                    self.model
                        .set_error(format!("Failed to open {}: {e}", path.display()));
                }
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        crate::ui::views::view(&self.model, self.frame_handle.as_ref())
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        keyboard::on_key_press(handle_key_press)
    }
}

impl KitsuneApp {
    /// Rebuild the displayed image after the composed frame changed.
    fn refresh_frame_handle(&mut self) {
        self.frame_handle = self.model.frame.as_ref().map(|frame| {
            let composed = frame.composed();
            ImageHandle::from_rgba(
                composed.width(),
                composed.height(),
                composed.as_raw().clone(),
            )
        });
    }

    /// Copy the persisted settings out of the model and save them.
    fn save_config(&mut self) {
        self.config.output_width = self.model.output.width();
        self.config.output_height = self.model.output.height();
        self.config.background_alpha = self.model.alpha.value();
        self.config.export_format = self.model.format.extension().to_string();
        self.config.show_grid = self.model.show_grid;

        if let Some(ref handler) = self.config_handler {
            if let Err(e) = self.config.write_entry(handler) {
                log::warn!("Failed to save config: {e:?}");
            }
        }
    }
}

/// Map raw key presses + modifiers into high-level application messages.
fn handle_key_press(key: Key, modifiers: Modifiers) -> Option<AppMessage> {
    // Ignore key presses when command-style modifiers are pressed.
    if modifiers.command() || modifiers.alt() || modifiers.logo() || modifiers.control() {
        return None;
    }

    match key.as_ref() {
        Key::Named(Named::Escape) => Some(AppMessage::CancelInteraction),
        Key::Named(Named::Enter) => Some(AppMessage::Export),
        Key::Character(ch) if ch.eq_ignore_ascii_case("e") => Some(AppMessage::Export),
        Key::Character(ch) if ch.eq_ignore_ascii_case("r") => Some(AppMessage::ResetCrop),
        Key::Character(ch) if ch.eq_ignore_ascii_case("g") => Some(AppMessage::ToggleGrid),
        _ => None,
    }
}
