// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Catalog, NodeRef, ProtocolId};

/// Input to [`NavigationState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Start a protocol from its start node, discarding history.
    Activate(String),
    /// Move to a target; bare node ids resolve against the active protocol.
    Advance(String),
    Back,
    /// Re-activate the protocol that is active at the time of the event.
    Restart,
    /// Leave every protocol.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("protocol '{protocol_id}' not found")]
    ProtocolNotFound { protocol_id: String },
    #[error("node '{node_ref}' not found")]
    NodeNotFound { node_ref: String },
}

/// Position within the catalog: a history of visited steps, oldest first.
///
/// The current step is always the last history entry and the active protocol is the protocol
/// of that entry, so cross-protocol moves and `Back` switch protocols without extra bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    history: Vec<NodeRef>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[NodeRef] {
        &self.history
    }

    pub fn current(&self) -> Option<&NodeRef> {
        self.history.last()
    }

    pub fn active_protocol_id(&self) -> Option<&ProtocolId> {
        self.current().map(NodeRef::protocol_id)
    }

    pub fn is_active(&self) -> bool {
        !self.history.is_empty()
    }

    /// Pure transition. `self` is never modified; on error the caller keeps its old state.
    pub fn apply(&self, catalog: &Catalog, event: &NavEvent) -> Result<Self, NavError> {
        match event {
            NavEvent::Activate(protocol_id) => Self::activated(catalog, protocol_id),
            NavEvent::Advance(raw) => {
                let target = self.resolve_target(raw)?;
                if !catalog.contains(&target) {
                    return Err(NavError::NodeNotFound { node_ref: target.to_string() });
                }
                let mut history = self.history.clone();
                history.push(target);
                Ok(Self { history })
            }
            NavEvent::Back => {
                if self.history.len() <= 1 {
                    return Ok(self.clone());
                }
                let history = self.history[..self.history.len() - 1].to_vec();
                match history.last() {
                    Some(previous) if catalog.contains(previous) => Ok(Self { history }),
                    Some(previous) => Err(NavError::NodeNotFound { node_ref: previous.to_string() }),
                    None => Ok(Self { history }),
                }
            }
            NavEvent::Restart => match self.active_protocol_id() {
                Some(protocol_id) => Self::activated(catalog, protocol_id.as_str()),
                None => Ok(self.clone()),
            },
            NavEvent::Clear => Ok(Self::new()),
        }
    }

    fn activated(catalog: &Catalog, protocol_id: &str) -> Result<Self, NavError> {
        let (key, protocol) = catalog
            .protocols
            .get_key_value(protocol_id)
            .ok_or_else(|| NavError::ProtocolNotFound { protocol_id: protocol_id.to_owned() })?;
        let start = NodeRef::new(key.clone(), protocol.start_node.clone());
        if !catalog.contains(&start) {
            return Err(NavError::NodeNotFound { node_ref: start.to_string() });
        }
        Ok(Self { history: vec![start] })
    }

    fn resolve_target(&self, raw: &str) -> Result<NodeRef, NavError> {
        let parsed = match self.active_protocol_id() {
            Some(protocol_id) => NodeRef::qualify(raw, protocol_id),
            None => NodeRef::parse(raw),
        };
        parsed.map_err(|_| NavError::NodeNotFound { node_ref: raw.to_owned() })
    }
}
