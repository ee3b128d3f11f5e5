// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text presentation for the command line.
//!
//! Renderers are pure: they read engine state and return a string.

use crate::config::UiFlags;

mod bookmarks;
mod outline;
mod step;
mod text;

pub use bookmarks::render_bookmarks;
pub use outline::render_outline;
pub use step::{render_nav_error, render_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub show_node_ids: bool,
    pub compact: bool,
}

impl From<UiFlags> for RenderOptions {
    fn from(ui: UiFlags) -> Self {
        Self { show_node_ids: ui.show_node_ids, compact: ui.compact_mode }
    }
}
