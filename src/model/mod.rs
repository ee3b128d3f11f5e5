// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the graph document and its identifiers.
//!
//! A catalog holds protocols; protocols hold nodes addressed by qualified [`NodeRef`]s.

pub mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node_ref;
pub mod protocol;

pub use catalog::{Catalog, CatalogError, CatalogOverride};
pub use ids::{Id, IdError, NodeId, ProtocolId};
pub use node_ref::{NodeRef, ParseNodeRefError};
pub use protocol::{
    Condition, ContentAction, Next, Node, NodeContent, NodeType, OptionChoice, Protocol,
    ProtocolMetadata, Severity, TextOrList,
};
