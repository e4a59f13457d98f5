// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rudder route`: dry-run a prompt through the decision pipeline.
//!
//! Binds model references verbatim (no host catalog is reachable from the
//! CLI) and checks credentials against the real config and environment, so
//! the printed decision matches what an installed wrapper would do.

use std::path::Path;

use async_trait::async_trait;
use rudder_config::{ConfigError, RouterConfig};
use rudder_core::{Context, Message, Model, ModelCatalog, ModelRef, RudderError};
use rudder_router::{decide, resolve_models, CredentialResolver};

/// Catalog standing in for the host: every reference binds verbatim.
struct VerbatimCatalog;

#[async_trait]
impl ModelCatalog for VerbatimCatalog {
    async fn resolve(&self, reference: &ModelRef) -> Result<Model, RudderError> {
        Ok(Model {
            provider: reference.provider.clone(),
            id: reference.id.clone(),
            credentials_path: None,
        })
    }
}

/// Run the dry-run. Returns a process exit code.
pub async fn run(config_path: Option<&Path>, prompt: &str) -> i32 {
    let loaded = match config_path {
        Some(path) => rudder_config::load_config_from_path(path)
            .map_err(|e| vec![ConfigError::Other(e.to_string())]),
        None => rudder_config::load_config().map_err(|e| vec![ConfigError::Other(e.to_string())]),
    };

    let host = match loaded {
        Ok(host) => host,
        Err(errors) => {
            rudder_config::render_errors(&errors);
            return 1;
        }
    };

    let config = match RouterConfig::from_settings(&host.router) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("router: disabled, every call would use the host default model");
            return 0;
        }
        Err(errors) => {
            rudder_config::render_errors(&errors);
            return 1;
        }
    };

    let models = match resolve_models(&VerbatimCatalog, &config).await {
        Ok(models) => models,
        Err(error) => {
            eprintln!("Error: {error}");
            return 1;
        }
    };

    let credentials = CredentialResolver::load(
        host.auth.profiles.clone(),
        config.auth_profile_file.as_deref(),
    )
    .await;
    let cloud_credentialed = models
        .cloud
        .as_ref()
        .is_some_and(|model| credentials.has_credential(&model.provider));

    let context = Context::new(vec![Message::user(prompt)], vec![], String::new());
    match decide(&context, &config, &models, cloud_credentialed) {
        Ok(decision) => {
            println!("target:  {}", decision.target);
            println!("model:   {}", decision.model);
            println!("score:   {:.2}", decision.score);
            println!("reason:  {}", decision.reason);
            println!("tags:    [{}]", decision.tags.join(", "));
            0
        }
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}
