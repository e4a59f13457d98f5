// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stream wrapper: a drop-in `StreamService` around the host's own.
//!
//! Per call: decide, log one line, resolve credentials on provider switch,
//! adapt the context, delegate. The downstream stream is returned verbatim;
//! the wrapper never transforms it and never retries a call whose response
//! has started streaming.

use std::sync::Arc;

use async_trait::async_trait;
use rudder_config::{diagnostic, HostConfig, RouterConfig};
use rudder_core::{
    CallOptions, Context, Decision, Model, ModelCatalog, ModelStream, RudderError, StreamService,
    Target,
};
use tracing::{debug, info, warn};

use crate::adapter::adapt_context;
use crate::credentials::CredentialResolver;
use crate::engine::{self, ResolvedModels};
use crate::identity;
use crate::models::resolve_models;

/// Routes each call to one of three backends and delegates to the host's
/// stream function. Construction resolves config, models, the identity
/// preamble, and the credential sources exactly once; everything else is
/// per-call.
pub struct HybridRouter {
    inner: Arc<dyn StreamService>,
    config: RouterConfig,
    models: ResolvedModels,
    preamble: String,
    credentials: CredentialResolver,
}

impl HybridRouter {
    /// Install the router around the host's stream function.
    ///
    /// Returns `Ok(None)` when the router block is disabled or absent: the
    /// host keeps calling its own function and behaviour is unchanged.
    /// Configuration errors and an unresolvable local tool model are fatal.
    pub async fn install(
        host: &HostConfig,
        catalog: &dyn ModelCatalog,
        inner: Arc<dyn StreamService>,
    ) -> Result<Option<Arc<Self>>, RudderError> {
        let config = match RouterConfig::from_settings(&host.router) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!("router disabled, wrapper not installed");
                return Ok(None);
            }
            Err(errors) => {
                return Err(RudderError::Config(diagnostic::join_errors(&errors)));
            }
        };

        let models = resolve_models(catalog, &config).await?;
        let preamble = identity::load_preamble(config.workspace_dir.as_deref()).await;
        let credentials = CredentialResolver::load(
            host.auth.profiles.clone(),
            config.auth_profile_file.as_deref(),
        )
        .await;

        info!(
            local = %models.local,
            local_text = ?models.local_text.as_ref().map(|m| m.to_string()),
            cloud = ?models.cloud.as_ref().map(|m| m.to_string()),
            preference = %config.preference,
            "[hybrid-router] installed"
        );

        Ok(Some(Arc::new(Self {
            inner,
            config,
            models,
            preamble,
            credentials,
        })))
    }

    /// Route a context without issuing the call. The decision carries the
    /// chosen target and model plus the classifier's score and tags.
    pub fn decide(&self, context: &Context) -> Result<Decision, RudderError> {
        let cloud_credentialed = self
            .models
            .cloud
            .as_ref()
            .is_some_and(|model| self.credentials.has_credential(&model.provider));
        engine::decide(context, &self.config, &self.models, cloud_credentialed)
    }

    /// The identity preamble composed at construction.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }
}

#[async_trait]
impl StreamService for HybridRouter {
    async fn stream(
        &self,
        model: &Model,
        context: &Context,
        options: &CallOptions,
    ) -> Result<ModelStream, RudderError> {
        let decision = self.decide(context)?;

        info!(
            model = %decision.model,
            score = decision.score,
            reason = %decision.reason,
            tags = ?decision.tags,
            "[hybrid-router] -> {}",
            decision.target
        );

        let mut effective_options = options.clone();

        // Credentials only change when the routed provider differs from the
        // call's default model provider.
        if decision.model.provider != model.provider {
            match self.credentials.resolve(&decision.model.provider) {
                Ok(key) => effective_options.api_key = Some(key),
                Err(error) => warn!(error = %error, "forwarding original options"),
            }
        }

        if matches!(decision.target, Target::Local | Target::LocalText) {
            effective_options.max_response_tokens =
                Some(self.config.rules.max_local_response_tokens);
        }

        let effective_context = adapt_context(context, decision.target, &self.preamble);

        self.inner
            .stream(&decision.model, &effective_context, &effective_options)
            .await
    }
}
