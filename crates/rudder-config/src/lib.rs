// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Rudder hybrid model router.
//!
//! This crate owns the `[router]` subtree of the host configuration:
//! - [`model`]: serde structs with the documented defaults
//! - [`loader`]: Figment-layered loading (files + `RUDDER_` env overrides)
//! - [`validation`]: collect-all semantic validation
//! - [`patterns`]: case-insensitive force-pattern compilation (warn + skip)
//! - [`resolve`]: one-shot resolution into the immutable [`RouterConfig`]
//! - [`diagnostic`]: miette diagnostics with fuzzy suggestions

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod patterns;
pub mod resolve;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AuthConfig, AuthProfile, FallbackSection, HostConfig, OnCloudUnavailable, OnLocalError,
    RouterSettings, RoutingSection,
};
pub use patterns::RoutingRules;
pub use resolve::RouterConfig;
pub use validation::validate_settings;

/// Load from the XDG hierarchy and validate in one step.
pub fn load_and_validate() -> Result<HostConfig, Vec<ConfigError>> {
    let config = load_config().map_err(|e| vec![ConfigError::Other(e.to_string())])?;
    validate_settings(&config.router)?;
    Ok(config)
}

/// Load from an in-memory TOML string and validate in one step.
pub fn load_and_validate_str(toml_content: &str) -> Result<HostConfig, Vec<ConfigError>> {
    let config =
        load_config_from_str(toml_content).map_err(|e| vec![ConfigError::Other(e.to_string())])?;
    validate_settings(&config.router)?;
    Ok(config)
}
