// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Catalog, Next, Node, NodeRef, ProtocolId};

/// Label offered for a `next` transition whose target node cannot be found.
pub const CONTINUE_LABEL: &str = "Continue";

/// Which outgoing-choice source of a node produced a [`Choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceSource {
    Action,
    Condition,
    Option,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub target: NodeRef,
    pub source: ChoiceSource,
}

/// Resolves the outgoing choices of `node`, qualifying bare targets with `current_protocol`.
///
/// Precedence, first non-empty source wins: content actions, conditions, options, `next`.
/// Only the first `next` target is offered, labeled with its node's title.
/// Targets that do not form a valid reference are dropped.
pub fn resolve_choices(catalog: &Catalog, node: &Node, current_protocol: &ProtocolId) -> Vec<Choice> {
    let labeled: Vec<(&str, &str)>;
    let source;

    if !node.actions().is_empty() {
        labeled = node.actions().iter().map(|a| (a.label.as_str(), a.target.as_str())).collect();
        source = ChoiceSource::Action;
    } else if !node.conditions.is_empty() {
        labeled = node.conditions.iter().map(|c| (c.label.as_str(), c.target.as_str())).collect();
        source = ChoiceSource::Condition;
    } else if !node.options.is_empty() {
        labeled = node.options.iter().map(|o| (o.label.as_str(), o.target.as_str())).collect();
        source = ChoiceSource::Option;
    } else {
        return node
            .next
            .as_ref()
            .and_then(Next::first)
            .and_then(|raw| qualify_or_warn(node, raw, current_protocol))
            .map(|target| {
                let label = catalog
                    .node(&target)
                    .map(|next| next.title.clone())
                    .unwrap_or_else(|| CONTINUE_LABEL.to_owned());
                vec![Choice { label, target, source: ChoiceSource::Next }]
            })
            .unwrap_or_default();
    }

    labeled
        .into_iter()
        .filter_map(|(label, raw)| {
            let target = qualify_or_warn(node, raw, current_protocol)?;
            Some(Choice { label: label.to_owned(), target, source })
        })
        .collect()
}

fn qualify_or_warn(node: &Node, raw: &str, current_protocol: &ProtocolId) -> Option<NodeRef> {
    match NodeRef::qualify(raw, current_protocol) {
        Ok(target) => Some(target),
        Err(err) => {
            tracing::warn!(
                node = %node.id,
                protocol = %current_protocol,
                target = raw,
                "dropping malformed transition target: {err}"
            );
            None
        }
    }
}
