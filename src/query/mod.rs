// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the catalog and the flat diagram.
//!
//! Queries provide derived views (outgoing choices, reachability) used by navigation and the
//! visibility engine.

pub mod choices;
pub mod flow;
