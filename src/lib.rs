// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Medflow: step-by-step navigation and collapsible flow diagrams over medical response
//! protocols.
//!
//! A [`model::Catalog`] of protocol graphs feeds two independent modes: [`nav::Navigator`]
//! walks one step at a time (possibly across protocols), and [`diagram::Diagram`] flattens the
//! whole catalog into a category-grouped graph whose parts can be collapsed. Bookmarks persist
//! through [`store::BookmarkStore`].

pub mod config;
pub mod diagram;
pub mod model;
pub mod nav;
pub mod query;
pub mod render;
pub mod store;
#[cfg(test)]
mod test_utils;
