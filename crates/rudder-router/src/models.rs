// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding the three configured model references against the host catalog.

use rudder_config::RouterConfig;
use rudder_core::{ModelCatalog, ModelRef, RudderError};
use tracing::warn;

use crate::engine::ResolvedModels;

/// Resolve the three configured references.
///
/// A failure is fatal only for the local tool model; the router refuses to
/// install without it. Text and cloud references degrade to `None`, which
/// the decision engine's fallback chain absorbs.
pub async fn resolve_models(
    catalog: &dyn ModelCatalog,
    config: &RouterConfig,
) -> Result<ResolvedModels, RudderError> {
    let local = catalog.resolve(&config.local_model).await.map_err(|error| {
        RudderError::ModelResolve {
            reference: config.local_model.to_string(),
            message: format!("local tool model is required: {error}"),
        }
    })?;

    let local_text = resolve_optional(catalog, config.local_text_model.as_ref(), "local-text").await;
    let cloud = resolve_optional(catalog, config.cloud_model.as_ref(), "cloud").await;

    Ok(ResolvedModels {
        local,
        local_text,
        cloud,
    })
}

async fn resolve_optional(
    catalog: &dyn ModelCatalog,
    reference: Option<&ModelRef>,
    role: &str,
) -> Option<rudder_core::Model> {
    let reference = reference?;
    match catalog.resolve(reference).await {
        Ok(model) => Some(model),
        Err(error) => {
            warn!(role, reference = %reference, error = %error, "backend model unresolved, degrading");
            None
        }
    }
}
