// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the hybrid model router.
//!
//! The router consumes a subtree (`[router]`) of a larger host configuration
//! tree plus the top-level `[auth.profiles]` map. Unrecognized keys anywhere
//! in the tree are ignored: the host owns the rest of the file.

use std::collections::HashMap;
use std::path::PathBuf;

use rudder_core::ModelRef;
use serde::{Deserialize, Serialize};

/// The slice of the host configuration tree the router reads.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostConfig {
    /// The router block. Absent means the router is not installed.
    #[serde(default)]
    pub router: RouterSettings,

    /// Host auth section; only `profiles` is consumed.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// The `[router]` configuration block.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterSettings {
    /// Master switch. Absent or false means the wrapper is not installed.
    #[serde(default)]
    pub enabled: bool,

    /// Global dispatch bias. Parsed and validated in `validation`, so typos
    /// get a "did you mean" suggestion instead of a bare serde error.
    #[serde(default = "default_preference")]
    pub preference: String,

    /// Local tool-calling model. Required; the router refuses to install
    /// without it.
    #[serde(default = "default_local_model")]
    pub local_model: ModelRef,

    /// Local text-only model. `None` collapses `local-text` onto `local`.
    #[serde(default)]
    pub local_text_model: Option<ModelRef>,

    /// Remote cloud model. `None` disables all cloud routing.
    #[serde(default)]
    pub cloud_model: Option<ModelRef>,

    /// Directory holding the identity, personality, and user-profile files.
    /// `None` skips the identity preamble entirely.
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,

    /// Path to the agent-local auth profile file with OAuth tokens.
    #[serde(default)]
    pub auth_profile_file: Option<PathBuf>,

    /// Scoring and force-pattern settings.
    #[serde(default)]
    pub routing: RoutingSection,

    /// Degradation policy.
    #[serde(default)]
    pub fallback: FallbackSection,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            preference: default_preference(),
            local_model: default_local_model(),
            local_text_model: None,
            cloud_model: None,
            workspace_dir: None,
            auth_profile_file: None,
            routing: RoutingSection::default(),
            fallback: FallbackSection::default(),
        }
    }
}

fn default_preference() -> String {
    "prefer-local".to_string()
}

fn default_local_model() -> ModelRef {
    ModelRef::new("ollama", "functiongemma")
}

/// The `[router.routing]` block.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingSection {
    /// Score cutoff at or above which a prompt is treated as complex.
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: f32,

    /// Regex list forcing cloud routing. Compiled case-insensitively;
    /// invalid entries are dropped with a warning, never a startup failure.
    #[serde(default)]
    pub force_cloud_patterns: Vec<String>,

    /// Regex list forcing local routing. Same compilation rules.
    #[serde(default)]
    pub force_local_patterns: Vec<String>,

    /// Advisory response-token cap passed to local targets.
    #[serde(default = "default_max_local_response_tokens")]
    pub max_local_response_tokens: u32,
}

impl Default for RoutingSection {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            force_cloud_patterns: Vec::new(),
            force_local_patterns: Vec::new(),
            max_local_response_tokens: default_max_local_response_tokens(),
        }
    }
}

fn default_complexity_threshold() -> f32 {
    0.5
}

fn default_max_local_response_tokens() -> u32 {
    1024
}

/// The `[router.fallback]` block.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FallbackSection {
    /// What to do when a cloud-preferring branch finds no usable cloud model.
    #[serde(default)]
    pub on_cloud_unavailable: OnCloudUnavailable,

    /// Advisory policy for failures of the local backend. Parsed and carried
    /// but not acted on: an in-flight stream is never re-routed.
    #[serde(default)]
    pub on_local_error: OnLocalError,
}

/// Degradation choices when cloud is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnCloudUnavailable {
    LocalText,
    Local,
    Error,
}

impl Default for OnCloudUnavailable {
    fn default() -> Self {
        OnCloudUnavailable::LocalText
    }
}

/// Declared recovery policy for local backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnLocalError {
    Cloud,
    Error,
}

impl Default for OnLocalError {
    fn default() -> Self {
        OnLocalError::Cloud
    }
}

/// The host `[auth]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Auth profiles keyed by provider name.
    #[serde(default)]
    pub profiles: HashMap<String, AuthProfile>,
}

/// A single configured auth profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthProfile {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub oauth_token: Option<String>,
}

impl AuthProfile {
    /// The usable secret in this profile, API key first.
    pub fn secret(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .or(self.oauth_token.as_deref())
            .filter(|s| !s.is_empty())
    }
}
