// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ids::{IdError, NodeId, ProtocolId};

const SEPARATOR: char = ':';

/// Qualified node reference addressing a node across all protocols.
///
/// Canonical format: `<protocol_id>:<node_id>`, single separator, no escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef {
    protocol_id: ProtocolId,
    node_id: NodeId,
}

impl NodeRef {
    pub fn new(protocol_id: ProtocolId, node_id: NodeId) -> Self {
        Self { protocol_id, node_id }
    }

    pub fn protocol_id(&self) -> &ProtocolId {
        &self.protocol_id
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn parse(input: &str) -> Result<Self, ParseNodeRefError> {
        let (protocol_str, node_str) =
            input.split_once(SEPARATOR).ok_or(ParseNodeRefError::MissingSeparator)?;

        if protocol_str.is_empty() {
            return Err(ParseNodeRefError::EmptyProtocolId);
        }
        if node_str.is_empty() {
            return Err(ParseNodeRefError::EmptyNodeId);
        }

        // `protocol_str` cannot hold a separator after `split_once`.
        let protocol_id = ProtocolId::new(protocol_str).map_err(ParseNodeRefError::InvalidNodeId)?;
        let node_id = NodeId::new(node_str).map_err(ParseNodeRefError::InvalidNodeId)?;

        Ok(Self { protocol_id, node_id })
    }

    /// Resolves a raw transition target as seen from a node of `current_protocol`.
    ///
    /// Targets that already carry a separator are parsed as-is; bare node ids are
    /// qualified with `current_protocol`.
    pub fn qualify(raw: &str, current_protocol: &ProtocolId) -> Result<Self, ParseNodeRefError> {
        if raw.contains(SEPARATOR) {
            return Self::parse(raw);
        }
        if raw.is_empty() {
            return Err(ParseNodeRefError::EmptyNodeId);
        }
        let node_id = NodeId::new(raw).map_err(ParseNodeRefError::InvalidNodeId)?;
        Ok(Self { protocol_id: current_protocol.clone(), node_id })
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.protocol_id, self.node_id)
    }
}

impl FromStr for NodeRef {
    type Err = ParseNodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NodeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNodeRefError {
    #[error("node ref must have the form '<protocol>:<node>'")]
    MissingSeparator,
    #[error("node ref is missing protocol id")]
    EmptyProtocolId,
    #[error("node ref is missing node id")]
    EmptyNodeId,
    #[error("invalid node id: {0}")]
    InvalidNodeId(#[source] IdError),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{NodeRef, ParseNodeRefError};
    use crate::model::ProtocolId;

    fn pid(value: &str) -> ProtocolId {
        ProtocolId::new(value).expect("protocol id")
    }

    #[test]
    fn parses_and_formats_qualified_refs() {
        let parsed: NodeRef = "cpr:start_cpr".parse().expect("parse");
        assert_eq!(parsed.protocol_id().as_str(), "cpr");
        assert_eq!(parsed.node_id().as_str(), "start_cpr");
        assert_eq!(parsed.to_string(), "cpr:start_cpr");
    }

    #[test]
    fn unqualified_target_takes_the_resolving_protocol() {
        let qualified = NodeRef::qualify("foo", &pid("A")).expect("qualify");
        assert_eq!(qualified.to_string(), "A:foo");
    }

    #[test]
    fn qualified_target_ignores_the_resolving_protocol() {
        let qualified = NodeRef::qualify("abcde_medical:a_airway", &pid("cpr")).expect("qualify");
        assert_eq!(qualified.to_string(), "abcde_medical:a_airway");
    }

    #[rstest]
    #[case("start_cpr", ParseNodeRefError::MissingSeparator)]
    #[case(":start_cpr", ParseNodeRefError::EmptyProtocolId)]
    #[case("cpr:", ParseNodeRefError::EmptyNodeId)]
    fn rejects_malformed_refs(#[case] input: &str, #[case] expected: ParseNodeRefError) {
        assert_eq!(NodeRef::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn rejects_a_second_separator() {
        let err = NodeRef::parse("a:b:c").unwrap_err();
        assert!(matches!(err, ParseNodeRefError::InvalidNodeId(_)));
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let node_ref = NodeRef::parse("cpr:compressions").expect("parse");
        let json = serde_json::to_string(&node_ref).expect("serialize");
        assert_eq!(json, "\"cpr:compressions\"");
        let back: NodeRef = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, node_ref);
    }
}
