// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Node, Severity};
use crate::nav::{NavError, Navigator};
use crate::query::choices::Choice;

use super::text::{finish, push_section};
use super::RenderOptions;

/// Text for the navigator's current step: header, body sections and numbered choices.
///
/// Returns `None` while the navigator is idle.
pub fn render_step(nav: &Navigator<'_>, bookmarked: bool, options: RenderOptions) -> Option<String> {
    let node = nav.current_node()?;
    let protocol = nav.active_protocol()?;
    let choices = nav.choices();

    let mut lines = Vec::<String>::new();
    let marker = if bookmarked { " ★" } else { "" };
    lines.push(format!("{} · step {}{marker}", protocol.name, nav.step_number()));
    lines.push(heading(node, options));

    if let Some(description) = node.description.as_deref() {
        lines.push(description.to_owned());
    }
    if !options.compact {
        push_content(&mut lines, node);
    }

    lines.push(String::new());
    if choices.is_empty() {
        lines.push("End of protocol.".to_owned());
    } else {
        lines.extend(render_choices(&choices, options));
    }
    Some(finish(lines))
}

/// Recoverable fallback screen for a rejected navigation.
pub fn render_nav_error(err: &NavError) -> String {
    let what = match err {
        NavError::ProtocolNotFound { protocol_id } => format!("Protocol '{protocol_id}' is not available."),
        NavError::NodeNotFound { node_ref } => format!("Step '{node_ref}' could not be found."),
    };
    format!("{what}\nPress r to restart the protocol or b to go back.")
}

fn heading(node: &Node, options: RenderOptions) -> String {
    let badge = match node.severity() {
        Severity::Normal => String::new(),
        severity => format!("[{}] ", severity.as_str().to_ascii_uppercase()),
    };
    if options.show_node_ids {
        format!("{badge}{} ({})", node.title, node.id)
    } else {
        format!("{badge}{}", node.title)
    }
}

fn push_content(lines: &mut Vec<String>, node: &Node) {
    let Some(content) = node.content.as_ref() else {
        return;
    };

    if let Some(method) = content.check_method.as_deref() {
        lines.push(format!("How to check: {method}"));
    }
    if let Some(look_for) = content.what_to_look_for.as_ref() {
        push_section(lines, "Look for", &look_for.lines());
    }
    push_section(lines, "Questions", &as_strs(&content.questions));
    push_section(lines, "Vitals", &as_strs(&content.vitals));
    push_section(lines, "Equipment", &as_strs(&content.equipment));
    if let Some(treatment) = content.treatment.as_ref() {
        push_section(lines, "Treatment", &treatment.lines());
    }
}

fn as_strs(items: &[String]) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}

fn render_choices(choices: &[Choice], options: RenderOptions) -> Vec<String> {
    choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            if options.show_node_ids {
                format!("  {}) {} → {}", idx + 1, choice.label, choice.target)
            } else {
                format!("  {}) {}", idx + 1, choice.label)
            }
        })
        .collect()
}
