// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Full-catalog flow diagram with collapsible category groups.
//!
//! [`Diagram::build`] flattens every protocol into one graph with a synthetic header per
//! category; [`compute_visibility`] decides what is hidden under a [`CollapseSet`].

pub mod category;
pub mod graph;
pub mod visibility;

pub use category::{classify, matching_rules, Category, CategoryRule, Matcher};
pub use graph::{
    Diagram, DiagramEdge, DiagramKey, DiagramNode, DiagramNodeKind, DiagramSummary, EdgeTone,
    ProtocolSummary,
};
pub use visibility::{compute_visibility, CollapseSet, DiagramView, Visibility};
