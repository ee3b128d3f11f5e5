// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lexical grouping of protocol steps into diagram categories.
//!
//! Classification is a heuristic over node identifiers, not a declared field. Rules are tried
//! in table order and the first match wins, so an id that matches several rules (for example
//! `check_breathing_cpr`) lands in whichever category is listed first.

use std::fmt;

/// Diagram category. Declaration order is the display order of the group headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    SceneSafety,
    Assessment,
    Airway,
    Breathing,
    Circulation,
    Disability,
    Exposure,
    Resuscitation,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::SceneSafety,
        Self::Assessment,
        Self::Airway,
        Self::Breathing,
        Self::Circulation,
        Self::Disability,
        Self::Exposure,
        Self::Resuscitation,
        Self::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::SceneSafety => "scene_safety",
            Self::Assessment => "assessment",
            Self::Airway => "airway",
            Self::Breathing => "breathing",
            Self::Circulation => "circulation",
            Self::Disability => "disability",
            Self::Exposure => "exposure",
            Self::Resuscitation => "resuscitation",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SceneSafety => "Scene safety",
            Self::Assessment => "General assessment",
            Self::Airway => "A - Airway",
            Self::Breathing => "B - Breathing",
            Self::Circulation => "C - Circulation",
            Self::Disability => "D - Disability",
            Self::Exposure => "E - Exposure",
            Self::Resuscitation => "Resuscitation",
            Self::Other => "Other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Prefix(&'static str),
    Contains(&'static str),
}

impl Matcher {
    pub fn matches(self, node_id: &str) -> bool {
        match self {
            Self::Prefix(prefix) => node_id.starts_with(prefix),
            Self::Contains(needle) => node_id.contains(needle),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub matcher: Matcher,
    pub category: Category,
}

const fn rule(matcher: Matcher, category: Category) -> CategoryRule {
    CategoryRule { matcher, category }
}

/// Ordered rule table. Ids are lowercased before matching.
pub const RULES: &[CategoryRule] = &[
    rule(Matcher::Prefix("scene"), Category::SceneSafety),
    rule(Matcher::Contains("safety"), Category::SceneSafety),
    rule(Matcher::Contains("cpr"), Category::Resuscitation),
    rule(Matcher::Contains("compression"), Category::Resuscitation),
    rule(Matcher::Contains("aed"), Category::Resuscitation),
    rule(Matcher::Contains("defib"), Category::Resuscitation),
    rule(Matcher::Contains("shock"), Category::Resuscitation),
    rule(Matcher::Contains("rosc"), Category::Resuscitation),
    rule(Matcher::Contains("arrest"), Category::Resuscitation),
    rule(Matcher::Prefix("a_"), Category::Airway),
    rule(Matcher::Contains("airway"), Category::Airway),
    rule(Matcher::Prefix("b_"), Category::Breathing),
    rule(Matcher::Contains("breathing"), Category::Breathing),
    rule(Matcher::Contains("respiratory"), Category::Breathing),
    rule(Matcher::Contains("oxygen"), Category::Breathing),
    rule(Matcher::Prefix("c_"), Category::Circulation),
    rule(Matcher::Contains("circulation"), Category::Circulation),
    rule(Matcher::Contains("pulse"), Category::Circulation),
    rule(Matcher::Contains("bleeding"), Category::Circulation),
    rule(Matcher::Prefix("d_"), Category::Disability),
    rule(Matcher::Contains("disability"), Category::Disability),
    rule(Matcher::Contains("neuro"), Category::Disability),
    rule(Matcher::Prefix("e_"), Category::Exposure),
    rule(Matcher::Contains("exposure"), Category::Exposure),
    rule(Matcher::Contains("assess"), Category::Assessment),
    rule(Matcher::Contains("summary"), Category::Assessment),
    rule(Matcher::Prefix("start"), Category::Assessment),
];

pub fn classify(node_id: &str) -> Category {
    classify_with(RULES, node_id)
}

pub fn classify_with(rules: &[CategoryRule], node_id: &str) -> Category {
    let node_id = node_id.to_ascii_lowercase();
    rules
        .iter()
        .find(|rule| rule.matcher.matches(&node_id))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// Every rule matching `node_id`, in table order. The first entry is the one that wins.
pub fn matching_rules(node_id: &str) -> Vec<&'static CategoryRule> {
    let node_id = node_id.to_ascii_lowercase();
    RULES.iter().filter(|rule| rule.matcher.matches(&node_id)).collect()
}
