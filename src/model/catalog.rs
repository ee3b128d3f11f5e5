// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::ProtocolId;
use super::node_ref::NodeRef;
use super::protocol::{Node, Protocol};

const BUILTIN_VERSION: &str = "1.0.0";
const BUILTIN_LANGUAGE: &str = "en";

const BUILTIN_PROTOCOLS: &[(&str, &str)] = &[
    ("protocols/cpr.json", include_str!("../../protocols/cpr.json")),
    ("protocols/abcde_medical.json", include_str!("../../protocols/abcde_medical.json")),
];

/// The immutable collection of protocol graphs the engine runs against.
///
/// Mirrors the graph document shape: `{ version, language, protocols }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub version: String,
    pub language: String,
    #[schemars(with = "BTreeMap<String, Protocol>")]
    pub protocols: BTreeMap<ProtocolId, Protocol>,
}

impl Catalog {
    pub fn new(version: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            language: language.into(),
            protocols: BTreeMap::new(),
        }
    }

    /// The protocols shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut catalog = Self::new(BUILTIN_VERSION, BUILTIN_LANGUAGE);
        for (name, raw) in BUILTIN_PROTOCOLS {
            let protocol: Protocol = serde_json::from_str(raw).map_err(|source| {
                CatalogError::Json { path: PathBuf::from(name), source }
            })?;
            catalog.protocols.insert(protocol.id.clone(), protocol);
        }
        Ok(catalog)
    }

    /// Parses a graph document. The map key is the protocol's identity; a body `id` that
    /// disagrees is overwritten with the key.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let mut catalog: Self = serde_json::from_str(raw)?;
        align_protocol_ids(&mut catalog.protocols);
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
            .map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })
    }

    pub fn protocol(&self, protocol_id: &str) -> Option<&Protocol> {
        self.protocols.get(protocol_id)
    }

    pub fn node(&self, node_ref: &NodeRef) -> Option<&Node> {
        self.protocols.get(node_ref.protocol_id())?.node(node_ref.node_id())
    }

    pub fn contains(&self, node_ref: &NodeRef) -> bool {
        self.node(node_ref).is_some()
    }

    pub fn protocol_ids(&self) -> impl Iterator<Item = &ProtocolId> {
        self.protocols.keys()
    }

    /// Every node of every protocol, qualified, in protocol then node id order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeRef, &Node)> {
        self.protocols.iter().flat_map(|(protocol_id, protocol)| {
            protocol
                .nodes
                .iter()
                .map(move |(node_id, node)| (NodeRef::new(protocol_id.clone(), node_id.clone()), node))
        })
    }

    pub fn node_count(&self) -> usize {
        self.protocols.values().map(|protocol| protocol.nodes.len()).sum()
    }

    /// Shallow merge: top-level fields are replaced when present, `protocols` is merged
    /// key by key with the override winning for a shared id.
    pub fn merge(mut self, overrides: CatalogOverride) -> Self {
        if let Some(version) = overrides.version {
            self.version = version;
        }
        if let Some(language) = overrides.language {
            self.language = language;
        }
        let mut protocols = overrides.protocols.unwrap_or_default();
        align_protocol_ids(&mut protocols);
        self.protocols.append(&mut protocols);
        self
    }
}

fn align_protocol_ids(protocols: &mut BTreeMap<ProtocolId, Protocol>) {
    for (key, protocol) in protocols.iter_mut() {
        if &protocol.id != key {
            tracing::warn!(key = %key, id = %protocol.id, "protocol id differs from its key");
            protocol.id = key.clone();
        }
    }
}

/// Partial graph document merged over a base [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<BTreeMap<String, Protocol>>")]
    pub protocols: Option<BTreeMap<ProtocolId, Protocol>>,
}

impl CatalogOverride {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid graph document at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
