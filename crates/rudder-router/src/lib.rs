// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid model routing for conversational agents.
//!
//! This crate intercepts every model invocation and routes it to a local
//! tool-calling model, a local text-only model, or a remote cloud model
//! based on a heuristic complexity classification of the conversation:
//!
//! - [`classifier`]: zero-cost prompt scoring with force-pattern shortcuts
//! - [`engine`]: the multi-dimensional routing decision
//! - [`adapter`]: per-target context rewriting and tool-schema reduction
//! - [`identity`]: the local-model identity preamble
//! - [`credentials`]: cloud credential presence and cached resolution
//! - [`models`]: binding configured references against the host catalog
//! - [`wrapper`]: the drop-in [`StreamService`] wrapper
//!
//! The common case (file operations, confirmations, greetings, short
//! factual questions) stays on cheap local inference; multi-step reasoning,
//! real-time knowledge, and code synthesis escalate to the cloud model.
//!
//! [`StreamService`]: rudder_core::StreamService

pub mod adapter;
pub mod classifier;
pub mod credentials;
pub mod engine;
pub mod identity;
pub mod models;
pub mod wrapper;

pub use adapter::adapt_context;
pub use classifier::{classify, Classification};
pub use credentials::CredentialResolver;
pub use engine::{decide, ResolvedModels, CLOUD_PROVIDERS};
pub use models::resolve_models;
pub use wrapper::HybridRouter;
