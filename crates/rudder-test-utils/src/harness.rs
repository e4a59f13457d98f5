// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for contexts and router settings used across test suites.

use rudder_config::RouterSettings;
use rudder_core::{Context, Message, ModelRef};

/// A single-turn context ending on the given user text.
pub fn user_context(text: &str) -> Context {
    Context::new(
        vec![Message::user(text)],
        vec![],
        "the host's full system prompt",
    )
}

/// A context ending on a tool result, with the prior assistant turn tagged
/// with the producing provider.
pub fn post_tool_context(assistant_provider: &str) -> Context {
    Context::new(
        vec![
            Message::user("check the build status"),
            Message::assistant("running the check now").from_provider(assistant_provider),
            Message::tool_result(serde_json::json!({"exit_code": 0, "stdout": "ok"})),
        ],
        vec![],
        "the host's full system prompt",
    )
}

/// Enabled router settings with all three backends configured.
pub fn full_router_settings() -> RouterSettings {
    RouterSettings {
        enabled: true,
        local_model: ModelRef::new("ollama", "functiongemma"),
        local_text_model: Some(ModelRef::new("ollama", "gemma3")),
        cloud_model: Some(ModelRef::new("anthropic", "claude-sonnet-4-20250514")),
        ..RouterSettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rudder_core::Role;

    #[test]
    fn user_context_ends_on_user_turn() {
        let context = user_context("hello");
        assert_eq!(context.messages.last().unwrap().role, Role::User);
    }

    #[test]
    fn post_tool_context_ends_on_tool_result() {
        let context = post_tool_context("anthropic");
        assert_eq!(context.messages.last().unwrap().role, Role::ToolResult);
        assert_eq!(
            context.messages[1].provider.as_deref(),
            Some("anthropic")
        );
    }

    #[test]
    fn full_settings_enable_all_backends() {
        let settings = full_router_settings();
        assert!(settings.enabled);
        assert!(settings.local_text_model.is_some());
        assert!(settings.cloud_model.is_some());
    }
}
