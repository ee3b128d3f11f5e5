// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::store::BookmarkEntry;

use super::text::finish;
use super::RenderOptions;

pub fn render_bookmarks(entries: &[BookmarkEntry], options: RenderOptions) -> String {
    if entries.is_empty() {
        return "No bookmarks.".to_owned();
    }

    let lines = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            if options.show_node_ids {
                format!("{:>3}. {} · {} [{}]", idx + 1, entry.protocol_name, entry.title, entry.node_ref)
            } else {
                format!("{:>3}. {} · {}", idx + 1, entry.protocol_name, entry.title)
            }
        })
        .collect();
    finish(lines)
}
