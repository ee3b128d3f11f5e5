// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Catalog, NodeRef};

use super::kv::{KvStore, StoreError};

pub const BOOKMARKS_KEY: &str = "medflow.bookmarks";

/// Bookmarked references in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    refs: Vec<NodeRef>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node_ref: &NodeRef) -> bool {
        self.refs.contains(node_ref)
    }

    pub fn refs(&self) -> &[NodeRef] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Returns the set with `node_ref` added if absent, removed if present.
    pub fn toggled(&self, node_ref: &NodeRef) -> Self {
        let mut refs = self.refs.clone();
        match refs.iter().position(|existing| existing == node_ref) {
            Some(idx) => {
                refs.remove(idx);
            }
            None => refs.push(node_ref.clone()),
        }
        Self { refs }
    }

    /// Parses the stored record: a JSON array of `protocol:node` strings.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: Vec<NodeRef> = serde_json::from_str(raw)?;
        Ok(parsed.into_iter().collect())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.refs)
    }
}

impl FromIterator<NodeRef> for BookmarkSet {
    fn from_iter<I: IntoIterator<Item = NodeRef>>(iter: I) -> Self {
        let mut refs: Vec<NodeRef> = Vec::new();
        for node_ref in iter {
            if !refs.contains(&node_ref) {
                refs.push(node_ref);
            }
        }
        Self { refs }
    }
}

/// A bookmark resolved against the catalog for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub node_ref: NodeRef,
    pub title: String,
    pub protocol_name: String,
}

/// Bookmark set mirrored to a [`KvStore`] after every change.
#[derive(Debug)]
pub struct BookmarkStore<S> {
    kv: S,
    set: BookmarkSet,
}

impl<S: KvStore> BookmarkStore<S> {
    /// Reads the stored record once. Missing, unreadable or malformed data yields an empty set.
    pub fn load(kv: S) -> Self {
        let set = match kv.get(BOOKMARKS_KEY) {
            Ok(None) => BookmarkSet::new(),
            Ok(Some(raw)) => BookmarkSet::from_json(&raw).unwrap_or_else(|err| {
                tracing::warn!(key = BOOKMARKS_KEY, error = %err, "malformed bookmark data; starting empty");
                BookmarkSet::new()
            }),
            Err(err) => {
                tracing::warn!(key = BOOKMARKS_KEY, error = %err, "unable to read bookmarks; starting empty");
                BookmarkSet::new()
            }
        };
        tracing::debug!(count = set.len(), "loaded bookmarks");
        Self { kv, set }
    }

    pub fn set(&self) -> &BookmarkSet {
        &self.set
    }

    pub fn contains(&self, node_ref: &NodeRef) -> bool {
        self.set.contains(node_ref)
    }

    pub fn refs(&self) -> &[NodeRef] {
        self.set.refs()
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Flips `node_ref` and persists the whole set. Returns whether it is bookmarked afterwards.
    ///
    /// If persisting fails the in-memory set follows whatever the store now holds: unchanged
    /// when the write did not land, toggled when it landed before the error surfaced.
    pub fn toggle(&mut self, node_ref: &NodeRef) -> Result<bool, StoreError> {
        let next = self.set.toggled(node_ref);
        let raw = next
            .to_json()
            .map_err(|source| StoreError::Json { key: BOOKMARKS_KEY.to_owned(), source })?;
        if let Err(err) = self.kv.set(BOOKMARKS_KEY, &raw) {
            if matches!(self.kv.get(BOOKMARKS_KEY), Ok(Some(stored)) if stored == raw) {
                self.set = next;
            }
            tracing::warn!(node = %node_ref, error = %err, "failed to persist bookmarks");
            return Err(err);
        }
        self.set = next;

        let bookmarked = self.set.contains(node_ref);
        tracing::debug!(node = %node_ref, bookmarked, "toggled bookmark");
        Ok(bookmarked)
    }

    /// Bookmarks whose node still exists, in bookmark order.
    pub fn list(&self, catalog: &Catalog) -> Vec<BookmarkEntry> {
        self.set
            .refs()
            .iter()
            .filter_map(|node_ref| {
                let protocol = catalog.protocol(node_ref.protocol_id().as_str())?;
                let node = protocol.node(node_ref.node_id())?;
                Some(BookmarkEntry {
                    node_ref: node_ref.clone(),
                    title: node.title.clone(),
                    protocol_name: protocol.name.clone(),
                })
            })
            .collect()
    }
}
