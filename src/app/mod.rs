// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Application layer: state, messages and the update function shared by the
// command line and the desktop front end.

pub mod message;
pub mod model;
pub mod update;

pub use message::AppMessage;
pub use model::AppModel;
pub use update::{ExportJob, UpdateResult, update};
