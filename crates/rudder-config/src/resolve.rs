// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot resolution of raw settings into the immutable router config.

use std::path::PathBuf;

use rudder_core::{ModelRef, Preference};

use crate::diagnostic::ConfigError;
use crate::model::{OnCloudUnavailable, OnLocalError, RouterSettings};
use crate::patterns::RoutingRules;
use crate::validation::{parse_preference, validate_settings};

/// The router configuration after validation and pattern compilation.
/// Created once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub preference: Preference,
    pub local_model: ModelRef,
    pub local_text_model: Option<ModelRef>,
    pub cloud_model: Option<ModelRef>,
    pub workspace_dir: Option<PathBuf>,
    pub auth_profile_file: Option<PathBuf>,
    pub rules: RoutingRules,
    pub on_cloud_unavailable: OnCloudUnavailable,
    pub on_local_error: OnLocalError,
}

impl RouterConfig {
    /// Resolve raw settings. Returns `Ok(None)` when the router is disabled,
    /// and all collected validation errors otherwise.
    pub fn from_settings(settings: &RouterSettings) -> Result<Option<Self>, Vec<ConfigError>> {
        if !settings.enabled {
            return Ok(None);
        }

        validate_settings(settings)?;

        // validate_settings guarantees the preference parses.
        let preference = parse_preference(&settings.preference)
            .expect("validated preference must parse");

        Ok(Some(Self {
            preference,
            local_model: settings.local_model.clone(),
            local_text_model: settings.local_text_model.clone(),
            cloud_model: settings.cloud_model.clone(),
            workspace_dir: settings.workspace_dir.clone(),
            auth_profile_file: settings.auth_profile_file.clone(),
            rules: RoutingRules::compile(&settings.routing),
            on_cloud_unavailable: settings.fallback.on_cloud_unavailable,
            on_local_error: settings.fallback.on_local_error,
        }))
    }
}
