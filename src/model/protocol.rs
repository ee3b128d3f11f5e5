// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{NodeId, ProtocolId};

/// One clinical protocol: a directed graph of steps rooted at `start_node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    #[schemars(with = "String")]
    pub id: ProtocolId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[schemars(with = "String")]
    pub start_node: NodeId,
    #[schemars(with = "BTreeMap<String, Node>")]
    pub nodes: BTreeMap<NodeId, Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProtocolMetadata>,
}

impl Protocol {
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn start(&self) -> Option<&Node> {
        self.nodes.get(&self.start_node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Decision,
    Check,
    Question,
    Action,
    Diagnosis,
    Info,
    End,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Decision => "decision",
            Self::Check => "check",
            Self::Question => "question",
            Self::Action => "action",
            Self::Diagnosis => "diagnosis",
            Self::Info => "info",
            Self::End => "end",
        }
    }
}

/// Presentation hint only; never consulted for control flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Urgent,
    Warning,
    Stable,
    #[default]
    Normal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Stable => "stable",
            Self::Normal => "normal",
        }
    }
}

/// A single protocol step.
///
/// A node may carry several outgoing-choice sources; exactly one of them governs transitions
/// (see [`crate::query::choices::resolve_choices`]). A node with none is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[schemars(with = "String")]
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<NodeContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Next>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionChoice>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, title: impl Into<String>) -> Self {
        Self {
            id,
            node_type,
            title: title.into(),
            description: None,
            severity: None,
            content: None,
            next: None,
            conditions: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity.unwrap_or_default()
    }

    pub fn actions(&self) -> &[ContentAction] {
        self.content.as_ref().map(|content| content.actions.as_slice()).unwrap_or_default()
    }
}

/// Free-form educational fields. Only `actions` matters to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_to_look_for: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vitals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<TextOrList>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ContentAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// `next` holds either a single target or an ordered list of targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Next {
    One(String),
    Many(Vec<String>),
}

impl Next {
    /// Only the first target of a list is ever offered as a choice.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(target) => Some(target.as_str()),
            Self::Many(targets) => targets.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub label: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OptionChoice {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentAction {
    pub label: String,
    pub target: String,
}
