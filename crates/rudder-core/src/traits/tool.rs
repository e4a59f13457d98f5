// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque tool execution seam.
//!
//! The router never invokes tools; it only carries handlers through context
//! adaptation so the host can keep dispatching by name.

use async_trait::async_trait;

use crate::error::RudderError;

/// Result of a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

/// Executes a tool call. Implemented by the host.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, RudderError>;
}
