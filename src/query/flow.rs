// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::diagram::{Diagram, DiagramEdge, DiagramKey, DiagramNode};

pub(crate) fn outgoing_adjacency(
    nodes: &[DiagramNode],
    edges: &[DiagramEdge],
) -> BTreeMap<DiagramKey, Vec<DiagramKey>> {
    let mut outgoing: BTreeMap<DiagramKey, BTreeSet<DiagramKey>> = BTreeMap::new();

    for node in nodes {
        outgoing.entry(node.key().clone()).or_default();
    }

    for edge in edges {
        let to = DiagramKey::Node(edge.to_node().clone());
        outgoing
            .entry(DiagramKey::Node(edge.from_node().clone()))
            .or_default()
            .insert(to.clone());
        outgoing.entry(to).or_default();
    }

    outgoing
        .into_iter()
        .map(|(key, neighbors)| (key, neighbors.into_iter().collect()))
        .collect()
}

fn bfs_reachable(
    adjacency: &BTreeMap<DiagramKey, Vec<DiagramKey>>,
    start: &DiagramKey,
) -> BTreeSet<DiagramKey> {
    let mut visited: BTreeSet<DiagramKey> = BTreeSet::new();
    if !adjacency.contains_key(start) {
        return visited;
    }

    let mut queue: VecDeque<&DiagramKey> = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start);

    while let Some(key) = queue.pop_front() {
        for next in adjacency.get(key).into_iter().flatten() {
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }

    visited
}

/// Every node transitively reachable from `start` over outgoing edges, excluding `start`.
///
/// `start` stays excluded even when a cycle leads back to it.
pub fn descendants(
    adjacency: &BTreeMap<DiagramKey, Vec<DiagramKey>>,
    start: &DiagramKey,
) -> BTreeSet<DiagramKey> {
    let mut reached = bfs_reachable(adjacency, start);
    reached.remove(start);
    reached
}

/// Steps with no outgoing edge in the diagram.
pub fn dead_ends(diagram: &Diagram) -> Vec<DiagramKey> {
    diagram
        .outgoing()
        .iter()
        .filter_map(|(key, next)| (!key.is_header() && next.is_empty()).then(|| key.clone()))
        .collect()
}
