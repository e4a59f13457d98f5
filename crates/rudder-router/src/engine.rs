// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decision engine: turns a classification into a routed target and model.
//!
//! Resolution order: preference pins, cloud session affinity, force
//! shortcuts, cloud-capability gate, complexity threshold, simple-task
//! dispatch. Every branch produces a `Decision` carrying the chosen model,
//! the rule name, and the classifier's score and tags.

use rudder_config::{OnCloudUnavailable, RouterConfig};
use rudder_core::{Context, Decision, Model, Preference, Role, RudderError, Target};
use tracing::{debug, warn};

use crate::classifier::{
    self, is_post_tool_turn, Classification, REASON_FORCE_CLOUD, REASON_FORCE_LOCAL,
    REASON_POST_TOOL,
};

/// Providers whose assistant turns keep a post-tool continuation on cloud.
pub const CLOUD_PROVIDERS: &[&str] = &[
    "anthropic",
    "openai",
    "google",
    "openrouter",
    "xai",
    "groq",
    "mistral",
];

/// Tags whose prompts need capabilities a small local model lacks.
const CLOUD_CAPABILITY_TAGS: &[&str] = &["search", "recommendation", "real-time", "shopping"];

/// Tags that mark a low-scoring prompt as tool-shaped work for the local
/// tool model rather than the text model.
const TOOL_LIKE_TAGS: &[&str] = &[
    "file-read",
    "directory",
    "command",
    "tool-heavy-ctx",
    "post-tool",
    "confirmation",
];

/// Score at or above which a complex prompt skips the local text model even
/// under prefer-local.
const TEXT_MODEL_CEILING: f32 = 0.7;

/// The three backend references bound against the host catalog.
#[derive(Debug, Clone)]
pub struct ResolvedModels {
    /// Local tool-calling model. Mandatory.
    pub local: Model,
    /// Local text-only model.
    pub local_text: Option<Model>,
    /// Remote cloud model.
    pub cloud: Option<Model>,
}

impl ResolvedModels {
    /// The text target, degraded to local when no text model exists.
    fn text_or_local(&self) -> (Target, Model) {
        match &self.local_text {
            Some(model) => (Target::LocalText, model.clone()),
            None => (Target::Local, self.local.clone()),
        }
    }
}

/// Provider of the most recent assistant message, if any.
fn last_assistant_provider(context: &Context) -> Option<&str> {
    context
        .messages
        .iter()
        .rev()
        .find(|message| message.role == Role::Assistant)
        .and_then(|message| message.provider.as_deref())
}

/// True when a post-tool turn continues a cloud-initiated exchange.
fn has_cloud_affinity(context: &Context) -> bool {
    is_post_tool_turn(context)
        && last_assistant_provider(context)
            .is_some_and(|provider| CLOUD_PROVIDERS.contains(&provider))
}

/// Route a context to one of the three backends.
///
/// `cloud_credentialed` reports whether a credential exists for the cloud
/// model's provider; cloud is available only when the model is resolved
/// *and* credentialed.
pub fn decide(
    context: &Context,
    config: &RouterConfig,
    models: &ResolvedModels,
    cloud_credentialed: bool,
) -> Result<Decision, RudderError> {
    // Cloud is usable only when the model resolved and a credential exists.
    let cloud: Option<&Model> = models.cloud.as_ref().filter(|_| cloud_credentialed);
    let classification = classifier::classify(context, &config.rules);

    let decision = |target: Target, model: Model, reason: &str| Decision {
        target,
        model,
        score: classification.score,
        reason: reason.to_string(),
        tags: classification.tags.clone(),
    };

    // 1. Hard preference pins.
    if config.preference == Preference::LocalOnly {
        return Ok(decision(Target::Local, models.local.clone(), "pref:local-only"));
    }
    if config.preference == Preference::CloudOnly {
        if let Some(cloud) = cloud {
            return Ok(decision(Target::Cloud, cloud.clone(), "pref:cloud-only"));
        }
        warn!("preference is cloud-only but cloud is unavailable, using local");
        return Ok(decision(Target::Local, models.local.clone(), "pref:cloud-only"));
    }

    // 2. Cloud session affinity: a tool result following a cloud assistant
    // turn stays on cloud, checked before the classifier's post-tool
    // shortcut can send it local. Force-cloud semantics: without a
    // credential it degrades through the same chain as force-cloud.
    if has_cloud_affinity(context) {
        if let Some(cloud) = cloud {
            return Ok(decision(Target::Cloud, cloud.clone(), "cloud-affinity"));
        }
        return degrade_from_cloud(config, models, &classification, "cloud-affinity");
    }

    // 3. Force shortcuts from the classifier.
    if classification.reason == REASON_FORCE_CLOUD {
        if let Some(cloud) = cloud {
            return Ok(decision(Target::Cloud, cloud.clone(), "force-cloud"));
        }
        return degrade_from_cloud(config, models, &classification, "force-cloud");
    }
    if classification.reason == REASON_FORCE_LOCAL {
        return Ok(decision(Target::Local, models.local.clone(), "force-local"));
    }
    if classification.reason == REASON_POST_TOOL {
        return Ok(decision(Target::Local, models.local.clone(), "post-tool-turn"));
    }

    // 4. Cloud-capability gate: real-world lookups need the cloud model.
    let needs_cloud_capability = classification
        .tags
        .iter()
        .any(|tag| CLOUD_CAPABILITY_TAGS.contains(&tag.as_str()));
    if needs_cloud_capability {
        if let Some(cloud) = cloud {
            return Ok(decision(Target::Cloud, cloud.clone(), "cloud-capability"));
        }
    }

    // 5. Complexity threshold (inclusive).
    if classification.score >= config.rules.complexity_threshold {
        if config.preference == Preference::PreferLocal
            && classification.score < TEXT_MODEL_CEILING
        {
            if let Some(text_model) = &models.local_text {
                return Ok(decision(Target::LocalText, text_model.clone(), "complex+text"));
            }
        }
        if let Some(cloud) = cloud {
            return Ok(decision(Target::Cloud, cloud.clone(), "complex+cloud"));
        }
        let (target, model) = models.text_or_local();
        let reason = if target == Target::LocalText {
            "complex+text"
        } else {
            "complex+local"
        };
        return Ok(decision(target, model, reason));
    }

    // 6. Simple task.
    let is_tool_like = classification
        .tags
        .iter()
        .any(|tag| TOOL_LIKE_TAGS.contains(&tag.as_str()));
    if is_tool_like {
        return Ok(decision(Target::Local, models.local.clone(), "simple+tool"));
    }
    if config.preference == Preference::PreferCloud {
        if let Some(cloud) = cloud {
            return Ok(decision(Target::Cloud, cloud.clone(), "simple+cloud"));
        }
    }
    if let Some(text_model) = &models.local_text {
        return Ok(decision(Target::LocalText, text_model.clone(), "simple+text"));
    }
    Ok(decision(Target::Local, models.local.clone(), "simple+local"))
}

/// Degrade a cloud-requiring branch through the documented chain:
/// cloud -> local-text -> local, honoring `fallback.on_cloud_unavailable`.
fn degrade_from_cloud(
    config: &RouterConfig,
    models: &ResolvedModels,
    classification: &Classification,
    rule: &str,
) -> Result<Decision, RudderError> {
    let (target, model) = match config.on_cloud_unavailable {
        OnCloudUnavailable::Error => {
            return Err(RudderError::CloudUnavailable(format!(
                "rule `{rule}` requires cloud but no model or credential is available"
            )));
        }
        OnCloudUnavailable::Local => (Target::Local, models.local.clone()),
        OnCloudUnavailable::LocalText => models.text_or_local(),
    };
    debug!(rule, target = %target, "cloud unavailable, degrading");
    Ok(Decision {
        target,
        model,
        score: classification.score,
        reason: format!("{rule} (cloud unavailable)"),
        tags: classification.tags.clone(),
    })
}
