// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::Catalog;
use super::ids::{NodeId, ProtocolId};
use super::protocol::{Condition, ContentAction, Next, Node, NodeType, OptionChoice, Protocol};

pub(crate) fn pid(value: &str) -> ProtocolId {
    ProtocolId::new(value).expect("protocol id")
}

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn step(id: &str, node_type: NodeType, title: &str) -> Node {
    Node::new(nid(id), node_type, title)
}

pub(crate) fn condition(label: &str, target: &str) -> Condition {
    Condition { label: label.to_owned(), target: target.to_owned(), condition: None }
}

pub(crate) fn option(label: &str, target: &str) -> OptionChoice {
    OptionChoice { label: label.to_owned(), target: target.to_owned() }
}

pub(crate) fn action(label: &str, target: &str) -> ContentAction {
    ContentAction { label: label.to_owned(), target: target.to_owned() }
}

/// Protocol whose steps are plain `info` nodes without transitions.
pub(crate) fn protocol(id: &str, name: &str, start: &str, nodes: &[(&str, &str)]) -> Protocol {
    protocol_with(id, name, start, nodes.iter().map(|(id, title)| step(id, NodeType::Info, title)))
}

pub(crate) fn protocol_with(
    id: &str,
    name: &str,
    start: &str,
    nodes: impl IntoIterator<Item = Node>,
) -> Protocol {
    Protocol {
        id: pid(id),
        name: name.to_owned(),
        description: String::new(),
        version: "1.0".to_owned(),
        start_node: nid(start),
        nodes: nodes.into_iter().map(|node| (node.id.clone(), node)).collect(),
        metadata: None,
    }
}

/// `cpr` plus a second protocol reachable through a cross-protocol option.
///
/// ```text
/// cpr:start_cpr --Yes--> cpr:compressions --> cpr:check_pulse --Pulse present--> other_protocol:node_x
///              \--No---> cpr:reassess --> cpr:end             \--No pulse-----> cpr:compressions
/// other_protocol:node_x --Done--> other_protocol:node_y
/// ```
pub(crate) fn catalog_cpr_and_other() -> Catalog {
    let mut start = step("start_cpr", NodeType::Start, "Start CPR");
    start.conditions = vec![condition("Yes", "compressions"), condition("No", "reassess")];

    let mut compressions = step("compressions", NodeType::Action, "Chest compressions");
    compressions.next = Some(Next::One("check_pulse".to_owned()));

    let mut check_pulse = step("check_pulse", NodeType::Check, "Check pulse");
    check_pulse.options = vec![
        option("Pulse present", "other_protocol:node_x"),
        option("No pulse", "compressions"),
    ];

    let mut reassess = step("reassess", NodeType::Info, "Reassess");
    reassess.next = Some(Next::Many(vec!["end".to_owned(), "compressions".to_owned()]));

    let end = step("end", NodeType::End, "Handover");

    let mut node_x = step("node_x", NodeType::Action, "Post-resuscitation care");
    node_x.content = Some(super::protocol::NodeContent {
        actions: vec![action("Done", "node_y")],
        ..Default::default()
    });
    node_x.next = Some(Next::One("cpr:start_cpr".to_owned()));

    let node_y = step("node_y", NodeType::End, "Transport");

    let mut catalog = Catalog::new("1.0.0", "en");
    for protocol in [
        protocol_with(
            "cpr",
            "CPR",
            "start_cpr",
            [start, compressions, check_pulse, reassess, end],
        ),
        protocol_with("other_protocol", "Other", "node_x", [node_x, node_y]),
    ] {
        catalog.protocols.insert(protocol.id.clone(), protocol);
    }
    catalog
}
