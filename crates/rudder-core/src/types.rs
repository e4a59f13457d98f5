// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router crates.

use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use futures_core::Stream;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::RudderError;
use crate::traits::tool::ToolHandler;

/// Reference to a backend model as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    /// Provider name, e.g. "ollama" or "anthropic".
    pub provider: String,
    /// Model identifier within the provider.
    pub id: String,
}

impl ModelRef {
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.id)
    }
}

/// A model reference bound against the host catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Provider name.
    pub provider: String,
    /// Model identifier.
    pub id: String,
    /// Optional path to provider credentials, as reported by the catalog.
    pub credentials_path: Option<PathBuf>,
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.id)
    }
}

/// The backend a call is dispatched to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Local tool-calling model.
    Local,
    /// Local text-only model (no tool calls).
    LocalText,
    /// Remote cloud model.
    Cloud,
}

/// Global dispatch bias for the decision engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Preference {
    PreferLocal,
    PreferCloud,
    LocalOnly,
    CloudOnly,
}

impl Default for Preference {
    fn default() -> Self {
        Preference::PreferLocal
    }
}

/// Message roles in a conversation context.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    User,
    Assistant,
    ToolResult,
    System,
}

/// A typed part of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    Text { text: String },
    ToolCall { name: String, args: serde_json::Value },
    ToolResult { content: serde_json::Value },
}

/// Message content: either a plain string or a list of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBody {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageBody {
    /// Joins all text parts with single spaces. Plain bodies pass through.
    pub fn joined_text(&self) -> String {
        match self {
            MessageBody::Text(text) => text.clone(),
            MessageBody::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Number of tool-call parts in this body.
    pub fn tool_call_count(&self) -> usize {
        match self {
            MessageBody::Text(_) => 0,
            MessageBody::Parts(parts) => parts
                .iter()
                .filter(|part| matches!(part, ContentPart::ToolCall { .. }))
                .count(),
        }
    }
}

/// One message in the conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageBody,
    /// Provider that produced this message, when known (assistant turns).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model that produced this message, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageBody::Text(text.into()),
            provider: None,
            model: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageBody::Text(text.into()),
            provider: None,
            model: None,
        }
    }

    pub fn tool_result(content: serde_json::Value) -> Self {
        Self {
            role: Role::ToolResult,
            content: MessageBody::Parts(vec![ContentPart::ToolResult { content }]),
            provider: None,
            model: None,
        }
    }

    /// Tags an assistant message with the provider that produced it.
    pub fn from_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

/// A tool made available to the model for this call.
///
/// The `handler` is opaque to the router: adaptation replaces `description`
/// and `parameters` but always carries the handler through unchanged so the
/// host can still dispatch by name.
#[derive(Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
    pub handler: Option<Arc<dyn ToolHandler>>,
}

impl ToolSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl std::fmt::Debug for ToolSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSchema")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

impl PartialEq for ToolSchema {
    /// Structural equality over the declarative fields; handlers compare by
    /// presence only (they are opaque).
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.parameters == other.parameters
            && self.handler.is_some() == other.handler.is_some()
    }
}

/// The bundle handed to a single inference call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolSchema>,
    pub system_prompt: String,
}

impl Context {
    pub fn new(messages: Vec<Message>, tools: Vec<ToolSchema>, system_prompt: impl Into<String>) -> Self {
        Self {
            messages,
            tools,
            system_prompt: system_prompt.into(),
        }
    }
}

/// Per-call options bag forwarded to the downstream stream function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallOptions {
    /// API key injected when the routed provider differs from the default.
    pub api_key: Option<String>,
    /// Advisory response-token cap, set for local targets.
    pub max_response_tokens: Option<u32>,
}

/// The record produced by the router for each call.
#[derive(Debug, Clone)]
pub struct Decision {
    pub target: Target,
    pub model: Model,
    /// Complexity score, clamped to [0, 1].
    pub score: f32,
    /// Name of the resolution rule that produced this decision.
    pub reason: String,
    /// Classifier tags describing which signals fired.
    pub tags: Vec<String>,
}

/// A single chunk of model output from the downstream stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChunk {
    pub event: StreamEvent,
    pub text: Option<String>,
}

/// Event kinds in a model output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    MessageStart,
    Delta,
    MessageStop,
}

/// The stream type returned by the wrapped stream function.
pub type ModelStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, RudderError>> + Send>>;
