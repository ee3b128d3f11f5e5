// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Catalog, Node, NodeRef, Protocol, ProtocolId};
use crate::query::choices::{resolve_choices, Choice};

use super::state::{NavError, NavEvent, NavigationState};

/// Stateful walk through a catalog. Every operation either fully succeeds or leaves the
/// navigator exactly as it was.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    catalog: &'a Catalog,
    state: NavigationState,
}

impl<'a> Navigator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog, state: NavigationState::new() }
    }

    pub fn with_state(catalog: &'a Catalog, state: NavigationState) -> Self {
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn activate(&mut self, protocol_id: &str) -> Result<(), NavError> {
        self.dispatch(NavEvent::Activate(protocol_id.to_owned()))
    }

    /// `target` is either `protocol:node` or a bare node id within the active protocol.
    pub fn advance(&mut self, target: &str) -> Result<(), NavError> {
        self.dispatch(NavEvent::Advance(target.to_owned()))
    }

    pub fn follow(&mut self, choice: &Choice) -> Result<(), NavError> {
        self.dispatch(NavEvent::Advance(choice.target.to_string()))
    }

    pub fn back(&mut self) -> Result<(), NavError> {
        self.dispatch(NavEvent::Back)
    }

    pub fn restart(&mut self) -> Result<(), NavError> {
        self.dispatch(NavEvent::Restart)
    }

    pub fn clear(&mut self) {
        self.state = NavigationState::new();
        tracing::debug!("navigation cleared");
    }

    pub fn current_ref(&self) -> Option<&NodeRef> {
        self.state.current()
    }

    pub fn current_node(&self) -> Option<&'a Node> {
        self.state.current().and_then(|node_ref| self.catalog.node(node_ref))
    }

    pub fn active_protocol_id(&self) -> Option<&ProtocolId> {
        self.state.active_protocol_id()
    }

    pub fn active_protocol(&self) -> Option<&'a Protocol> {
        self.state
            .active_protocol_id()
            .and_then(|protocol_id| self.catalog.protocol(protocol_id.as_str()))
    }

    /// Outgoing choices of the current step, or none while idle.
    pub fn choices(&self) -> Vec<Choice> {
        match (self.current_node(), self.state.active_protocol_id()) {
            (Some(node), Some(protocol_id)) => resolve_choices(self.catalog, node, protocol_id),
            _ => Vec::new(),
        }
    }

    pub fn history(&self) -> &[NodeRef] {
        self.state.history()
    }

    /// One-based position of the current step within the walk; zero while idle.
    pub fn step_number(&self) -> usize {
        self.state.history().len()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.history().len() > 1
    }

    pub fn is_terminal(&self) -> bool {
        self.current_node().is_some() && self.choices().is_empty()
    }

    fn dispatch(&mut self, event: NavEvent) -> Result<(), NavError> {
        match self.state.apply(self.catalog, &event) {
            Ok(next) => {
                tracing::debug!(
                    ?event,
                    from = ?self.state.current().map(ToString::to_string),
                    to = ?next.current().map(ToString::to_string),
                    "navigation transition"
                );
                self.state = next;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(?event, error = %err, "navigation rejected");
                Err(err)
            }
        }
    }
}
