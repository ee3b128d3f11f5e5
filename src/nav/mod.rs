// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Protocol walkthrough: the pure transition function and a catalog-bound navigator.

mod navigator;
mod state;

pub use navigator::Navigator;
pub use state::{NavError, NavEvent, NavigationState};
