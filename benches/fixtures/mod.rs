// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::collections::BTreeMap;

use medflow::model::{Catalog, Condition, Node, NodeId, NodeType, Protocol, ProtocolId};

// Cycled through so steps spread over every diagram category.
const PREFIXES: &[&str] = &["scene_", "a_", "b_", "c_", "d_", "e_", "cpr_", "assess_", "step_"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub protocols: usize,
    pub steps_per_protocol: usize,
    pub fanout: usize,
    /// Every `back_edge_every`-th step also links back to the protocol start (0 = never).
    pub back_edge_every: usize,
    /// Every `cross_link_every`-th step also links into the next protocol (0 = never).
    pub cross_link_every: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    LargeCyclic,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeCyclic => "large_cyclic",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => Params {
                protocols: 2,
                steps_per_protocol: 12,
                fanout: 2,
                back_edge_every: 0,
                cross_link_every: 6,
            },
            Self::Medium => Params {
                protocols: 8,
                steps_per_protocol: 60,
                fanout: 3,
                back_edge_every: 0,
                cross_link_every: 10,
            },
            Self::LargeCyclic => Params {
                protocols: 20,
                steps_per_protocol: 150,
                fanout: 3,
                back_edge_every: 7,
                cross_link_every: 5,
            },
        }
    }
}

fn protocol_id(idx: usize) -> String {
    format!("proto_{idx:02}")
}

fn step_id(idx: usize) -> String {
    format!("{}{idx:04}", PREFIXES[idx % PREFIXES.len()])
}

pub fn catalog(params: Params) -> Catalog {
    assert!(params.protocols >= 1, "protocols must be >= 1");
    assert!(params.steps_per_protocol >= 2, "steps_per_protocol must be >= 2");

    let mut catalog = Catalog::new("bench", "en");
    for p in 0..params.protocols {
        let id = ProtocolId::new(protocol_id(p)).expect("protocol id");
        let next_protocol = protocol_id((p + 1) % params.protocols);

        let mut nodes = BTreeMap::<NodeId, Node>::new();
        for s in 0..params.steps_per_protocol {
            let node_id = NodeId::new(step_id(s)).expect("node id");
            let node_type = if s == 0 { NodeType::Start } else { NodeType::Decision };
            let mut node = Node::new(node_id.clone(), node_type, format!("Step {s} of {id}"));

            for k in 1..=params.fanout {
                let target = s + k;
                if target < params.steps_per_protocol {
                    let label = if k == 1 { "Yes" } else { "No" };
                    node.conditions.push(condition(label, step_id(target)));
                }
            }
            if params.back_edge_every > 0 && s > 0 && s % params.back_edge_every == 0 {
                node.conditions.push(condition("Restart", step_id(0)));
            }
            if params.cross_link_every > 0 && s % params.cross_link_every == 0 {
                let target = step_id((s + 1) % params.steps_per_protocol);
                node.conditions.push(condition("Switch", format!("{next_protocol}:{target}")));
            }

            nodes.insert(node_id, node);
        }

        catalog.protocols.insert(
            id.clone(),
            Protocol {
                id,
                name: format!("Protocol {p}"),
                description: String::new(),
                version: "1.0.0".to_owned(),
                start_node: NodeId::new(step_id(0)).expect("node id"),
                nodes,
                metadata: None,
            },
        );
    }
    catalog
}

fn condition(label: &str, target: String) -> Condition {
    Condition { label: label.to_owned(), target, condition: None }
}

pub fn fixture(case: Case) -> Catalog {
    catalog(case.params())
}
