// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::diagram::{
    CollapseSet, Diagram, DiagramEdge, DiagramKey, DiagramNode, DiagramNodeKind, EdgeTone,
    Visibility,
};
use crate::model::NodeRef;
use crate::query::flow::dead_ends;

use super::text::{finish, truncate_with_ellipsis};
use super::RenderOptions;

const MAX_LABEL_LEN: usize = 48;

/// Text outline of the visible part of a diagram, grouped under category headers.
pub fn render_outline(
    diagram: &Diagram,
    visibility: &Visibility,
    collapsed: &CollapseSet,
    options: RenderOptions,
) -> String {
    let mut edges_by_source: BTreeMap<&NodeRef, Vec<&DiagramEdge>> = BTreeMap::new();
    for (idx, edge) in diagram.edges().iter().enumerate() {
        if !visibility.is_edge_hidden(idx) {
            edges_by_source.entry(edge.from_node()).or_default().push(edge);
        }
    }

    let summary = diagram.summary();
    let mut lines = Vec::<String>::new();
    lines.push(format!(
        "{} · {} steps",
        summary
            .protocols
            .iter()
            .map(|p| format!("{} ({})", p.name, p.node_count))
            .collect::<Vec<_>>()
            .join(", "),
        summary.total_nodes
    ));

    for header in diagram.headers() {
        let marker = if collapsed.contains(header.key()) { "[+]" } else { "[-]" };
        let count = match header.kind() {
            DiagramNodeKind::Header { member_count, .. } => *member_count,
            DiagramNodeKind::Step { .. } => 0,
        };
        lines.push(format!("{marker} {} ({count})", header.label()));

        for member in diagram.members(header.key()) {
            if visibility.is_node_hidden(member.key()) {
                continue;
            }
            lines.push(format!("    {}", step_line(member, collapsed, options)));

            if options.compact {
                continue;
            }
            let Some(node_ref) = member.key().as_node_ref() else {
                continue;
            };
            for edge in edges_by_source.get(node_ref).into_iter().flatten() {
                lines.push(format!("        {}", edge_line(diagram, edge, options)));
            }
        }
    }

    let hidden = visibility.hidden_nodes().len();
    if hidden > 0 {
        lines.push(format!("({hidden} steps hidden)"));
    }
    let terminal = dead_ends(diagram)
        .into_iter()
        .filter(|key| !visibility.is_node_hidden(key))
        .count();
    lines.push(format!("Terminal steps shown: {terminal}"));

    finish(lines)
}

fn step_line(node: &DiagramNode, collapsed: &CollapseSet, options: RenderOptions) -> String {
    let bullet = if collapsed.contains(node.key()) { "▸" } else { "•" };
    let label = truncate_with_ellipsis(node.label(), MAX_LABEL_LEN);
    if options.show_node_ids {
        format!("{bullet} {label} [{}]", node.key())
    } else {
        format!("{bullet} {label}")
    }
}

fn edge_line(diagram: &Diagram, edge: &DiagramEdge, options: RenderOptions) -> String {
    let arrow = match edge.tone() {
        EdgeTone::Affirmative => "✓→",
        EdgeTone::Negative => "✗→",
        EdgeTone::Neutral => "→",
    };
    let target = DiagramKey::Node(edge.to_node().clone());
    let title = diagram.node(&target).map(DiagramNode::label).unwrap_or_default();
    let title = truncate_with_ellipsis(title, MAX_LABEL_LEN);
    if options.show_node_ids {
        format!("{arrow} {}: {title} [{target}]", edge.label())
    } else {
        format!("{arrow} {}: {title}", edge.label())
    }
}
