// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashMap};

use crate::query::flow::descendants;

use super::graph::{Diagram, DiagramEdge, DiagramKey, DiagramNode};

const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Identifiers currently toggled closed: headers and/or individual steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CollapseSet {
    keys: BTreeSet<DiagramKey>,
}

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `key` and returns whether it is collapsed afterwards.
    pub fn toggle(&mut self, key: DiagramKey) -> bool {
        if self.keys.remove(&key) {
            return false;
        }
        self.keys.insert(key);
        true
    }

    pub fn contains(&self, key: &DiagramKey) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagramKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl FromIterator<DiagramKey> for CollapseSet {
    fn from_iter<I: IntoIterator<Item = DiagramKey>>(iter: I) -> Self {
        Self { keys: iter.into_iter().collect() }
    }
}

/// Hidden flags for every node and edge of a [`Diagram`] under one collapse set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    hidden_nodes: BTreeSet<DiagramKey>,
    hidden_edges: Vec<bool>,
}

impl Visibility {
    pub fn is_node_hidden(&self, key: &DiagramKey) -> bool {
        self.hidden_nodes.contains(key)
    }

    /// `index` is the position of the edge in [`Diagram::edges`].
    pub fn is_edge_hidden(&self, index: usize) -> bool {
        self.hidden_edges.get(index).copied().unwrap_or(false)
    }

    pub fn hidden_nodes(&self) -> &BTreeSet<DiagramKey> {
        &self.hidden_nodes
    }

    pub fn edge_flags(&self) -> &[bool] {
        &self.hidden_edges
    }

    pub fn visible_nodes<'a>(&'a self, diagram: &'a Diagram) -> impl Iterator<Item = &'a DiagramNode> {
        diagram.nodes().iter().filter(move |node| !self.is_node_hidden(node.key()))
    }

    pub fn visible_edges<'a>(&'a self, diagram: &'a Diagram) -> impl Iterator<Item = &'a DiagramEdge> {
        diagram
            .edges()
            .iter()
            .enumerate()
            .filter(move |(idx, _)| !self.is_edge_hidden(*idx))
            .map(|(_, edge)| edge)
    }
}

/// Computes which nodes and edges are hidden under `collapsed`.
///
/// A collapsed header hides all of its members. A collapsed step hides every node reachable
/// from it over outgoing edges, but stays visible itself. Each traversal runs over the full
/// static edge list, so hidden nodes are not traversal barriers and the result does not depend
/// on the order of the collapse set. An edge is hidden iff either endpoint is hidden.
pub fn compute_visibility(diagram: &Diagram, collapsed: &CollapseSet) -> Visibility {
    let mut hidden_nodes: BTreeSet<DiagramKey> = BTreeSet::new();

    for key in collapsed.iter() {
        match key {
            DiagramKey::Header(_) => {
                hidden_nodes.extend(diagram.members(key).map(|node| node.key().clone()));
            }
            DiagramKey::Node(_) => {
                hidden_nodes.extend(descendants(diagram.outgoing(), key));
            }
        }
    }

    let hidden_edges = diagram
        .edges()
        .iter()
        .map(|edge| {
            hidden_nodes.contains(&DiagramKey::Node(edge.from_node().clone()))
                || hidden_nodes.contains(&DiagramKey::Node(edge.to_node().clone()))
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        collapsed = collapsed.len(),
        hidden_nodes = hidden_nodes.len(),
        hidden_edges = hidden_edges.iter().filter(|hidden| **hidden).count(),
        "computed diagram visibility"
    );

    Visibility { hidden_nodes, hidden_edges }
}

/// A diagram session: the static diagram, the user's collapse set and memoized visibility.
#[derive(Debug, Clone)]
pub struct DiagramView {
    diagram: Diagram,
    collapsed: CollapseSet,
    cache: HashMap<CollapseSet, Visibility>,
    cache_capacity: usize,
}

impl DiagramView {
    pub fn new(diagram: Diagram) -> Self {
        Self::with_cache_capacity(diagram, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(diagram: Diagram, cache_capacity: usize) -> Self {
        Self {
            diagram,
            collapsed: CollapseSet::new(),
            cache: HashMap::new(),
            cache_capacity: cache_capacity.max(1),
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn collapsed(&self) -> &CollapseSet {
        &self.collapsed
    }

    pub fn toggle(&mut self, key: DiagramKey) -> bool {
        self.collapsed.toggle(key)
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn visibility(&mut self) -> &Visibility {
        if !self.cache.contains_key(&self.collapsed) && self.cache.len() >= self.cache_capacity {
            self.cache.clear();
        }
        self.cache
            .entry(self.collapsed.clone())
            .or_insert_with(|| compute_visibility(&self.diagram, &self.collapsed))
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
