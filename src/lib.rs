// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Kitsune: crop rendered model frames and export them at any resolution.

pub mod app;
pub mod cli;
pub mod config;
pub mod constant;
pub mod domain;

#[cfg(feature = "gui")]
pub mod i18n;
#[cfg(feature = "gui")]
pub mod ui;

pub use cli::Args;
