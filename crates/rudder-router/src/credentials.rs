// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloud credential presence checks and lazy resolution.
//!
//! Lookup order: configured auth profiles, the agent-local profile file
//! (OAuth tokens keyed `{provider}-...`), the fixed API-key env table, then
//! provider-specific OAuth env vars. The profile file is read once at
//! construction; resolved keys are cached per provider for the wrapper's
//! lifetime and never invalidated.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use rudder_config::AuthProfile;
use rudder_core::RudderError;
use tracing::{debug, warn};

/// Fixed provider-to-env-var table for API keys.
pub const ENV_KEYS: &[(&str, &str)] = &[
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("openai", "OPENAI_API_KEY"),
    ("google", "GOOGLE_API_KEY"),
    ("openrouter", "OPENROUTER_API_KEY"),
    ("groq", "GROQ_API_KEY"),
    ("xai", "XAI_API_KEY"),
    ("mistral", "MISTRAL_API_KEY"),
];

/// Provider-specific OAuth env vars, consulted last.
const OAUTH_ENV: &[(&str, &str)] = &[("anthropic", "ANTHROPIC_OAUTH_TOKEN")];

/// Resolves and caches cloud credentials per provider.
pub struct CredentialResolver {
    profiles: HashMap<String, AuthProfile>,
    /// Tokens from the agent-local profile file, keyed by provider.
    file_tokens: HashMap<String, String>,
    /// Monotonic per-provider cache; once resolved, a key is reused for the
    /// wrapper's lifetime.
    cache: RwLock<HashMap<String, String>>,
}

impl CredentialResolver {
    /// Build a resolver, reading the agent-local profile file exactly once.
    /// A missing or unreadable file is non-fatal.
    pub async fn load(
        profiles: HashMap<String, AuthProfile>,
        profile_file: Option<&Path>,
    ) -> Self {
        let file_tokens = match profile_file {
            Some(path) => read_profile_file(path).await,
            None => HashMap::new(),
        };
        Self {
            profiles,
            file_tokens,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Build a resolver from in-memory sources only (tests, hosts without a
    /// profile file).
    pub fn from_profiles(profiles: HashMap<String, AuthProfile>) -> Self {
        Self {
            profiles,
            file_tokens: HashMap::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// True when any source can produce a credential for the provider.
    pub fn has_credential(&self, provider: &str) -> bool {
        self.probe(provider).is_some()
    }

    /// Resolve a credential for the provider, caching the result. When every
    /// source is empty the typed error is returned for the caller to log;
    /// the call then proceeds with its original options.
    pub fn resolve(&self, provider: &str) -> Result<String, RudderError> {
        if let Some(cached) = self.cache.read().expect("cache lock").get(provider) {
            return Ok(cached.clone());
        }

        let key = self.probe(provider).ok_or_else(|| RudderError::CredentialResolve {
            provider: provider.to_string(),
            message: "no credential in auth profiles, agent profile file, or environment"
                .to_string(),
        })?;
        debug!(provider, "resolved cloud credential");
        self.cache
            .write()
            .expect("cache lock")
            .insert(provider.to_string(), key.clone());
        Ok(key)
    }

    /// Check sources in order without touching the cache.
    fn probe(&self, provider: &str) -> Option<String> {
        if let Some(secret) = self
            .profiles
            .get(provider)
            .and_then(|profile| profile.secret())
        {
            return Some(secret.to_string());
        }

        if let Some(token) = self.file_tokens.get(provider) {
            return Some(token.clone());
        }

        if let Some((_, var)) = ENV_KEYS.iter().find(|(name, _)| *name == provider) {
            if let Some(value) = non_empty_env(var) {
                return Some(value);
            }
        }

        if let Some((_, var)) = OAUTH_ENV.iter().find(|(name, _)| *name == provider) {
            if let Some(value) = non_empty_env(var) {
                return Some(value);
            }
        }

        None
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

/// Parse the agent-local profile file: a JSON object whose keys start with
/// the provider name (`anthropic-oauth`, `openai-default`, ...) and whose
/// values carry a token either directly or under a `token` field.
async fn read_profile_file(path: &Path) -> HashMap<String, String> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "auth profile file absent");
            return HashMap::new();
        }
        Err(error) => {
            let error = RudderError::CredentialResolve {
                provider: path.display().to_string(),
                message: format!("profile file unreadable: {error}"),
            };
            warn!(error = %error, "skipping agent profile file");
            return HashMap::new();
        }
    };

    let parsed: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(error) => {
            let error = RudderError::CredentialResolve {
                provider: path.display().to_string(),
                message: format!("profile file is not valid JSON: {error}"),
            };
            warn!(error = %error, "skipping agent profile file");
            return HashMap::new();
        }
    };

    let mut tokens = HashMap::new();
    if let Some(entries) = parsed.as_object() {
        for (key, value) in entries {
            let provider = key.split('-').next().unwrap_or(key);
            let token = match value {
                serde_json::Value::String(token) => Some(token.clone()),
                serde_json::Value::Object(fields) => fields
                    .get("token")
                    .or_else(|| fields.get("access_token"))
                    .and_then(|t| t.as_str())
                    .map(String::from),
                _ => None,
            };
            if let Some(token) = token.filter(|t| !t.is_empty()) {
                // First entry per provider wins; later profiles do not override.
                tokens.entry(provider.to_string()).or_insert(token);
            }
        }
    }
    tokens
}
