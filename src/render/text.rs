// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if text_len(text) <= max_len {
        return text.to_owned();
    }

    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Pushes `lines` under a `title:` line, each indented with a bullet.
pub(crate) fn push_section(out: &mut Vec<String>, title: &str, lines: &[&str]) {
    if lines.is_empty() {
        return;
    }
    out.push(format!("{title}:"));
    out.extend(lines.iter().map(|line| format!("  • {line}")));
}

/// Joins lines, dropping trailing blank lines.
pub(crate) fn finish(mut lines: Vec<String>) -> String {
    while matches!(lines.last(), Some(line) if line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
