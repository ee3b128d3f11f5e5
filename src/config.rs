// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Medflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Medflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startup configuration: catalog overrides and feature flags.
//!
//! Both loaders are fallible only internally. A missing or broken document is logged and the
//! built-in value is used instead, so startup never blocks on configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{Catalog, CatalogOverride};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureFlags {
    pub version: String,
    pub features: Features,
    pub ui: UiFlags,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { version: "1.0.0".to_owned(), features: Features::default(), ui: UiFlags::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Features {
    pub enable_advanced_protocols: bool,
    pub enable_offline_mode: bool,
    pub enable_debug_mode: bool,
    pub enable_telemetry: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            enable_advanced_protocols: false,
            enable_offline_mode: true,
            enable_debug_mode: false,
            enable_telemetry: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiFlags {
    pub show_node_ids: bool,
    pub animate_transitions: bool,
    pub compact_mode: bool,
}

impl Default for UiFlags {
    fn default() -> Self {
        Self { show_node_ids: false, animate_transitions: true, compact_mode: false }
    }
}

/// Reads the flags document at `path`, or returns the defaults.
pub fn load_feature_flags(path: Option<&Path>) -> FeatureFlags {
    let Some(path) = path else {
        return FeatureFlags::default();
    };

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::info!(path = %path.display(), error = %err, "no feature flags found; using defaults");
            return FeatureFlags::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(flags) => {
            tracing::debug!(path = %path.display(), ?flags, "loaded feature flags");
            flags
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "malformed feature flags; using defaults");
            FeatureFlags::default()
        }
    }
}

/// Applies `initial` and then the document at `overrides_path` on top of `base`.
pub fn bootstrap_catalog(
    base: Catalog,
    initial: Option<CatalogOverride>,
    overrides_path: Option<&Path>,
) -> Catalog {
    let mut catalog = base;

    if let Some(initial) = initial {
        tracing::debug!("applying initial catalog override");
        catalog = catalog.merge(initial);
    }

    if let Some(path) = overrides_path {
        match CatalogOverride::from_path(path) {
            Ok(overrides) => {
                tracing::debug!(path = %path.display(), "applying catalog overrides");
                catalog = catalog.merge(overrides);
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(path = %path.display(), "no catalog overrides found");
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring catalog overrides");
            }
        }
    }

    tracing::info!(
        version = %catalog.version,
        language = %catalog.language,
        protocols = ?catalog.protocol_ids().map(|id| id.as_str()).collect::<Vec<_>>(),
        "catalog initialized"
    );
    catalog
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{bootstrap_catalog, load_feature_flags, FeatureFlags};
    use crate::model::fixtures::{catalog_cpr_and_other, protocol};
    use crate::model::{Catalog, CatalogOverride};
    use crate::test_utils::TempDir;

    #[test]
    fn defaults_match_bootstrap_values() {
        let flags = FeatureFlags::default();
        assert_eq!(flags.version, "1.0.0");
        assert!(flags.features.enable_offline_mode);
        assert!(!flags.features.enable_debug_mode);
        assert!(flags.ui.animate_transitions);
        assert!(!flags.ui.show_node_ids);
    }

    #[test]
    fn partial_flags_document_keeps_other_defaults() {
        let tmp = TempDir::new("flags");
        let path = tmp.path().join("feature-flags.json");
        std::fs::write(&path, r#"{"features":{"enableDebugMode":true},"ui":{"compactMode":true}}"#)
            .unwrap();

        let flags = load_feature_flags(Some(path.as_path()));
        assert!(flags.features.enable_debug_mode);
        assert!(flags.features.enable_offline_mode);
        assert!(flags.ui.compact_mode);
        assert!(flags.ui.animate_transitions);
        assert_eq!(flags.version, "1.0.0");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("missing.json"))]
    #[case(Some("broken.json"))]
    fn unusable_flags_fall_back_to_defaults(#[case] file: Option<&str>) {
        let tmp = TempDir::new("flags-fallback");
        std::fs::write(tmp.path().join("broken.json"), "{ nope").unwrap();

        let path = file.map(|name| tmp.path().join(name));
        assert_eq!(load_feature_flags(path.as_deref()), FeatureFlags::default());
    }

    #[test]
    fn overrides_apply_in_order_and_file_wins() {
        let tmp = TempDir::new("overrides");
        let path = tmp.path().join("flow-overrides.json");
        std::fs::write(
            &path,
            r#"{"language":"he","protocols":{"extra":{"id":"extra","name":"From file","startNode":"s","nodes":{"s":{"id":"s","type":"start","title":"S"}}}}}"#,
        )
        .unwrap();

        let initial = CatalogOverride {
            version: Some("2.0.0".to_owned()),
            language: Some("fr".to_owned()),
            protocols: Some(
                [protocol("extra", "Initial", "s", &[("s", "S")])]
                    .into_iter()
                    .map(|p| (p.id.clone(), p))
                    .collect(),
            ),
        };

        let catalog = bootstrap_catalog(catalog_cpr_and_other(), Some(initial), Some(path.as_path()));
        assert_eq!(catalog.version, "2.0.0");
        assert_eq!(catalog.language, "he");
        assert_eq!(catalog.protocol("extra").map(|p| p.name.as_str()), Some("From file"));
        assert!(catalog.protocol("cpr").is_some());
        assert!(catalog.protocol("other_protocol").is_some());
    }

    #[rstest]
    #[case("missing.json")]
    #[case("broken.json")]
    fn unusable_overrides_leave_base_untouched(#[case] file: &str) {
        let tmp = TempDir::new("overrides-fallback");
        std::fs::write(tmp.path().join("broken.json"), "[1,2").unwrap();

        let base = catalog_cpr_and_other();
        let catalog = bootstrap_catalog(base.clone(), None, Some(tmp.path().join(file).as_path()));
        assert_eq!(catalog, base);
    }

    #[test]
    fn builtin_base_without_overrides_is_unchanged() {
        let base = Catalog::builtin().expect("builtin");
        assert_eq!(bootstrap_catalog(base.clone(), None, None), base);
    }
}
