// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::model::{Catalog, NodeRef, NodeType, ParseNodeRefError, ProtocolId, Severity};
use crate::query::choices::{resolve_choices, ChoiceSource};
use crate::query::flow::outgoing_adjacency;

use super::category::{classify, Category};

const HEADER_PREFIX: &str = "header:";

/// Identifier of a node in the flat diagram: a synthetic group header or a protocol step.
///
/// Textual form is `header:<category>` or the qualified `protocol:node` reference. A protocol
/// literally named `header` whose node id equals a category key is shadowed by the header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagramKey {
    Header(Category),
    Node(NodeRef),
}

impl DiagramKey {
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }

    pub fn as_node_ref(&self) -> Option<&NodeRef> {
        match self {
            Self::Node(node_ref) => Some(node_ref),
            Self::Header(_) => None,
        }
    }
}

impl From<NodeRef> for DiagramKey {
    fn from(value: NodeRef) -> Self {
        Self::Node(value)
    }
}

impl From<Category> for DiagramKey {
    fn from(value: Category) -> Self {
        Self::Header(value)
    }
}

impl fmt::Display for DiagramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(category) => write!(f, "{HEADER_PREFIX}{}", category.key()),
            Self::Node(node_ref) => write!(f, "{node_ref}"),
        }
    }
}

impl FromStr for DiagramKey {
    type Err = ParseNodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(category) = s.strip_prefix(HEADER_PREFIX).and_then(Category::from_key) {
            return Ok(Self::Header(category));
        }
        NodeRef::parse(s).map(Self::Node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramNodeKind {
    Header { category: Category, member_count: usize },
    Step { node_type: NodeType, severity: Severity },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    key: DiagramKey,
    label: String,
    kind: DiagramNodeKind,
    parent_header: Option<DiagramKey>,
}

impl DiagramNode {
    pub fn key(&self) -> &DiagramKey {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &DiagramNodeKind {
        &self.kind
    }

    /// The header this step belongs to; `None` for headers.
    pub fn parent_header(&self) -> Option<&DiagramKey> {
        self.parent_header.as_ref()
    }

    pub fn is_header(&self) -> bool {
        self.key.is_header()
    }
}

/// Cosmetic classification of an edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeTone {
    Affirmative,
    Negative,
    Neutral,
}

const AFFIRMATIVE_TOKENS: &[&str] = &["Yes", "כן"];
const NEGATIVE_TOKENS: &[&str] = &["No", "לא"];

impl EdgeTone {
    pub fn of_label(label: &str) -> Self {
        if AFFIRMATIVE_TOKENS.iter().any(|token| label.contains(token)) {
            Self::Affirmative
        } else if NEGATIVE_TOKENS.iter().any(|token| label.contains(token)) {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    id: String,
    from: NodeRef,
    to: NodeRef,
    label: String,
    tone: EdgeTone,
    source: ChoiceSource,
}

impl DiagramEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_node(&self) -> &NodeRef {
        &self.from
    }

    pub fn to_node(&self) -> &NodeRef {
        &self.to
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tone(&self) -> EdgeTone {
        self.tone
    }

    pub fn source(&self) -> ChoiceSource {
        self.source
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolSummary {
    pub protocol_id: ProtocolId,
    pub name: String,
    pub node_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSummary {
    pub protocols: Vec<ProtocolSummary>,
    pub total_nodes: usize,
}

/// Flat visual graph spanning every protocol of a catalog.
///
/// Layout order: one header per non-empty category (display order), then steps in protocol and
/// node id order. Edges only connect steps; headers own their members via `parent_header`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
    index: BTreeMap<DiagramKey, usize>,
    outgoing: BTreeMap<DiagramKey, Vec<DiagramKey>>,
    summary: DiagramSummary,
}

impl Diagram {
    pub fn build(catalog: &Catalog) -> Self {
        let mut members: BTreeMap<Category, usize> = BTreeMap::new();
        let mut steps = Vec::<DiagramNode>::with_capacity(catalog.node_count());

        for (node_ref, node) in catalog.iter_nodes() {
            let category = classify(node_ref.node_id().as_str());
            *members.entry(category).or_default() += 1;
            steps.push(DiagramNode {
                key: DiagramKey::Node(node_ref),
                label: node.title.clone(),
                kind: DiagramNodeKind::Step { node_type: node.node_type, severity: node.severity() },
                parent_header: Some(DiagramKey::Header(category)),
            });
        }

        let mut nodes = Vec::<DiagramNode>::with_capacity(members.len() + steps.len());
        for (&category, &member_count) in &members {
            nodes.push(DiagramNode {
                key: DiagramKey::Header(category),
                label: category.label().to_owned(),
                kind: DiagramNodeKind::Header { category, member_count },
                parent_header: None,
            });
        }
        nodes.extend(steps);

        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.key.clone(), idx))
            .collect::<BTreeMap<_, _>>();

        let mut edges = Vec::<DiagramEdge>::new();
        for (from, node) in catalog.iter_nodes() {
            let choices = resolve_choices(catalog, node, from.protocol_id());
            for (idx, choice) in choices.into_iter().enumerate() {
                if !catalog.contains(&choice.target) {
                    tracing::warn!(from = %from, to = %choice.target, "dropping edge to missing node");
                    continue;
                }
                edges.push(DiagramEdge {
                    id: format!("{from}->{}#{idx}", choice.target),
                    from: from.clone(),
                    to: choice.target,
                    tone: EdgeTone::of_label(&choice.label),
                    label: choice.label,
                    source: choice.source,
                });
            }
        }

        let outgoing = outgoing_adjacency(&nodes, &edges);
        let summary = DiagramSummary {
            protocols: catalog
                .protocols
                .iter()
                .map(|(protocol_id, protocol)| ProtocolSummary {
                    protocol_id: protocol_id.clone(),
                    name: protocol.name.clone(),
                    node_count: protocol.nodes.len(),
                })
                .collect(),
            total_nodes: catalog.node_count(),
        };

        tracing::debug!(
            headers = members.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "built diagram"
        );

        Self { nodes, edges, index, outgoing, summary }
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn node(&self, key: &DiagramKey) -> Option<&DiagramNode> {
        self.index.get(key).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, key: &DiagramKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn headers(&self) -> impl Iterator<Item = &DiagramNode> {
        self.nodes.iter().filter(|node| node.is_header())
    }

    pub fn members<'a>(&'a self, header: &'a DiagramKey) -> impl Iterator<Item = &'a DiagramNode> + 'a {
        self.nodes.iter().filter(move |node| node.parent_header() == Some(header))
    }

    pub fn outgoing(&self) -> &BTreeMap<DiagramKey, Vec<DiagramKey>> {
        &self.outgoing
    }

    pub fn summary(&self) -> &DiagramSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagram, DiagramKey, DiagramNodeKind, EdgeTone};
    use crate::diagram::category::Category;
    use crate::model::fixtures::catalog_cpr_and_other;
    use crate::model::{Catalog, NodeRef};
    use crate::query::choices::ChoiceSource;

    fn key(value: &str) -> DiagramKey {
        value.parse().expect("diagram key")
    }

    #[test]
    fn headers_come_first_in_display_order_and_only_for_used_categories() {
        let diagram = Diagram::build(&catalog_cpr_and_other());
        let header_keys = diagram.headers().map(|n| n.key().to_string()).collect::<Vec<_>>();

        // start_cpr/compressions -> resuscitation, check_pulse -> circulation,
        // reassess -> assessment, end/node_x/node_y -> other.
        assert_eq!(
            header_keys,
            vec!["header:assessment", "header:circulation", "header:resuscitation", "header:other"]
        );
        assert!(diagram.nodes()[..4].iter().all(|n| n.is_header()));
        assert!(diagram.nodes()[4..].iter().all(|n| !n.is_header()));
    }

    #[test]
    fn every_step_records_its_header_and_header_counts_members() {
        let diagram = Diagram::build(&catalog_cpr_and_other());

        let start = diagram.node(&key("cpr:start_cpr")).expect("start node");
        assert_eq!(start.parent_header(), Some(&DiagramKey::Header(Category::Resuscitation)));

        for header in diagram.headers() {
            let DiagramNodeKind::Header { member_count, .. } = header.kind() else {
                panic!("expected header kind");
            };
            assert_eq!(diagram.members(header.key()).count(), *member_count);
        }
    }

    #[test]
    fn edges_are_qualified_labeled_and_toned() {
        let diagram = Diagram::build(&catalog_cpr_and_other());
        let from_start = diagram
            .edges()
            .iter()
            .filter(|e| e.from_node().to_string() == "cpr:start_cpr")
            .collect::<Vec<_>>();

        assert_eq!(from_start.len(), 2);
        assert_eq!(from_start[0].to_node().to_string(), "cpr:compressions");
        assert_eq!(from_start[0].tone(), EdgeTone::Affirmative);
        assert_eq!(from_start[1].tone(), EdgeTone::Negative);
        assert_eq!(from_start[0].source(), ChoiceSource::Condition);
        assert_eq!(from_start[0].id(), "cpr:start_cpr->cpr:compressions#0");

        let cross = diagram
            .edges()
            .iter()
            .find(|e| e.from_node().to_string() == "cpr:check_pulse")
            .expect("cross-protocol edge");
        assert_eq!(cross.to_node().to_string(), "other_protocol:node_x");
        assert_eq!(cross.tone(), EdgeTone::Neutral);
    }

    #[test]
    fn edges_follow_choice_precedence() {
        let diagram = Diagram::build(&catalog_cpr_and_other());
        let from_x = diagram
            .edges()
            .iter()
            .filter(|e| e.from_node().to_string() == "other_protocol:node_x")
            .map(|e| e.to_node().to_string())
            .collect::<Vec<_>>();
        assert_eq!(from_x, vec!["other_protocol:node_y"]);
    }

    #[test]
    fn edges_to_missing_nodes_are_dropped() {
        let mut catalog = catalog_cpr_and_other();
        let cpr = catalog.protocols.values_mut().next().expect("protocol");
        let end = cpr.nodes.values_mut().find(|n| n.id.as_str() == "end").expect("end");
        end.next = Some(crate::model::Next::One("ghost".to_owned()));

        let diagram = Diagram::build(&catalog);
        assert!(diagram.edges().iter().all(|e| catalog.contains(e.to_node())));
    }

    #[test]
    fn tone_tokens_include_hebrew() {
        assert_eq!(EdgeTone::of_label("כן"), EdgeTone::Affirmative);
        assert_eq!(EdgeTone::of_label("לא"), EdgeTone::Negative);
        assert_eq!(EdgeTone::of_label("Yes - No"), EdgeTone::Affirmative);
        assert_eq!(EdgeTone::of_label("Maybe"), EdgeTone::Neutral);
    }

    #[test]
    fn keys_parse_headers_and_refs() {
        assert_eq!(key("header:airway"), DiagramKey::Header(Category::Airway));
        assert_eq!(
            key("header:unknown"),
            DiagramKey::Node(NodeRef::parse("header:unknown").expect("ref"))
        );
        assert!("no_separator".parse::<DiagramKey>().is_err());
    }

    #[test]
    fn summary_counts_nodes_per_protocol() {
        let diagram = Diagram::build(&catalog_cpr_and_other());
        let summary = diagram.summary();
        assert_eq!(summary.total_nodes, 7);
        assert_eq!(summary.protocols.len(), 2);
        assert_eq!(summary.protocols[0].node_count, 5);
    }

    #[test]
    fn empty_catalog_builds_empty_diagram() {
        let diagram = Diagram::build(&Catalog::new("1", "en"));
        assert!(diagram.nodes().is_empty());
        assert!(diagram.edges().is_empty());
    }
}
