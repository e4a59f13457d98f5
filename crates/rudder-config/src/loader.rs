// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./rudder.toml` > `~/.config/rudder/rudder.toml`
//! > `/etc/rudder/rudder.toml` with environment variable overrides via the
//! `RUDDER_` prefix. The router only reads its own subtree; everything else
//! in the host file is ignored.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HostConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/rudder/rudder.toml` (system-wide)
/// 3. `~/.config/rudder/rudder.toml` (user XDG config)
/// 4. `./rudder.toml` (local directory)
/// 5. `RUDDER_*` environment variables
pub fn load_config() -> Result<HostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HostConfig::default()))
        .merge(Toml::file("/etc/rudder/rudder.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("rudder/rudder.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("rudder.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an in-memory TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HostConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HostConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `RUDDER_ROUTER_LOCAL_MODEL` must map to
/// `router.local_model`, not `router.local.model`.
fn env_provider() -> Env {
    Env::prefixed("RUDDER_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: RUDDER_ROUTER_PREFERENCE -> "router_preference"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("router_routing_", "router.routing.", 1)
            .replacen("router_fallback_", "router.fallback.", 1)
            .replacen("router_", "router.", 1)
            .replacen("auth_", "auth.", 1);
        mapped.into()
    })
}
