// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Durable state: the key-value seam and the bookmark set persisted through it.

pub mod bookmarks;
pub mod kv;

pub use bookmarks::{BookmarkEntry, BookmarkSet, BookmarkStore, BOOKMARKS_KEY};
pub use kv::{DirKv, KvStore, MemoryKv, StoreError, WriteDurability};
