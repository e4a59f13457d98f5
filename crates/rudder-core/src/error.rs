// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rudder hybrid model router.

use thiserror::Error;

/// The primary error type used across the router crates.
#[derive(Debug, Error)]
pub enum RudderError {
    /// Configuration errors (missing required local model, invalid preference).
    /// Fatal during construction; the router refuses to install.
    #[error("configuration error: {0}")]
    Config(String),

    /// A backend's (provider, id) reference could not be bound to a model.
    /// Fatal for the local tool model, degradable otherwise.
    #[error("model resolution failed for {reference}: {message}")]
    ModelResolve { reference: String, message: String },

    /// Credential lookup failed for a provider or a credential source.
    /// Logged as warn; the call proceeds with the original options.
    #[error("credential resolution failed for `{provider}`: {message}")]
    CredentialResolve { provider: String, message: String },

    /// The cloud backend is required by policy but no credential is present.
    /// Only produced under `fallback.on_cloud_unavailable = "error"`.
    #[error("cloud backend unavailable: {0}")]
    CloudUnavailable(String),

    /// The delegated stream call failed.
    #[error("stream error: {message}")]
    Stream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
