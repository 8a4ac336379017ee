// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Domain layer: crop geometry, export settings, render surfaces, export.
// Nothing in here depends on the UI toolkit.

pub mod crop;
pub mod export;
pub mod frame;
pub mod output;
