// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-target context adaptation.
//!
//! Cloud calls pass through untouched. Local calls get a compact system
//! prompt and a reduced, simplified tool set: the 270M-class tool model
//! cannot reliably parse large schemas, so expressive power is traded for
//! call reliability. Adaptation is pure copy-on-write and idempotent.

use rudder_core::{Context, Target, ToolSchema};

/// Base instruction appended to the identity preamble for the tool model.
pub const TOOL_BASE: &str =
    "Use the provided tools to act on the user's request. Call one tool at a time \
     and answer briefly when no tool is needed.";

/// Base instruction appended to the identity preamble for the text model.
pub const TEXT_BASE: &str =
    "Answer directly and briefly in plain text. You cannot call tools.";

struct SimplifiedTool {
    name: &'static str,
    description: &'static str,
    required: &'static [&'static str],
}

/// The exhaustive simplified tool table for the local tool model. Tools in
/// the original context but not listed here are dropped for the local
/// target; names listed here but absent from the context are never
/// fabricated.
const SIMPLIFIED_TOOLS: &[SimplifiedTool] = &[
    SimplifiedTool {
        name: "read",
        description: "Read a file.",
        required: &["path"],
    },
    SimplifiedTool {
        name: "exec",
        description: "Run a shell command (ls, cat, git, date, echo, etc.).",
        required: &["command"],
    },
    SimplifiedTool {
        name: "write",
        description: "Write content to a file.",
        required: &["path", "content"],
    },
    SimplifiedTool {
        name: "edit",
        description: "Edit a file by replacing text.",
        required: &["path", "oldText", "newText"],
    },
];

fn simplified_parameters(required: &[&str]) -> serde_json::Value {
    let properties: serde_json::Map<String, serde_json::Value> = required
        .iter()
        .map(|name| (name.to_string(), serde_json::json!({"type": "string"})))
        .collect();
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Compose a system prompt from the identity preamble and a base instruction.
fn compose_prompt(preamble: &str, base: &str) -> String {
    if preamble.is_empty() {
        base.to_string()
    } else {
        format!("{preamble} {base}")
    }
}

/// The intersection of the context's tools with the simplified table, each a
/// copy of the original tool with description and parameters replaced and
/// the handler carried through so host dispatch still works.
fn simplify_tools(tools: &[ToolSchema]) -> Vec<ToolSchema> {
    SIMPLIFIED_TOOLS
        .iter()
        .filter_map(|entry| {
            tools.iter().find(|tool| tool.name == entry.name).map(|original| ToolSchema {
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                parameters: simplified_parameters(entry.required),
                handler: original.handler.clone(),
            })
        })
        .collect()
}

/// Rewrite a context for the chosen target. The input is never mutated; the
/// returned context is either structurally identical to the input (cloud) or
/// a fresh structure sharing no mutable state.
pub fn adapt_context(context: &Context, target: Target, preamble: &str) -> Context {
    match target {
        Target::Cloud => context.clone(),
        Target::Local => Context {
            messages: context.messages.clone(),
            tools: simplify_tools(&context.tools),
            system_prompt: compose_prompt(preamble, TOOL_BASE),
        },
        Target::LocalText => Context {
            messages: context.messages.clone(),
            tools: Vec::new(),
            system_prompt: compose_prompt(preamble, TEXT_BASE),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use rudder_core::{Message, RudderError, ToolHandler, ToolOutput};

    struct NoopHandler;

    #[async_trait]
    impl ToolHandler for NoopHandler {
        async fn invoke(&self, _input: serde_json::Value) -> Result<ToolOutput, RudderError> {
            Ok(ToolOutput {
                content: "ok".to_string(),
                is_error: false,
            })
        }
    }

    fn rich_tool(name: &str) -> ToolSchema {
        ToolSchema::new(
            name,
            format!("The host's verbose description of {name} with many details."),
            serde_json::json!({
                "type": "object",
                "properties": {
                    "path": {"type": "string", "description": "long-winded"},
                    "options": {"type": "object", "properties": {"recursive": {"type": "boolean"}}}
                }
            }),
        )
        .with_handler(Arc::new(NoopHandler))
    }

    fn host_context() -> Context {
        Context::new(
            vec![Message::user("read the notes")],
            vec![
                rich_tool("read"),
                rich_tool("exec"),
                rich_tool("browser"),
                rich_tool("edit"),
                rich_tool("message"),
            ],
            "the host's full system prompt",
        )
    }

    #[test]
    fn cloud_target_passes_context_through() {
        let context = host_context();
        let adapted = adapt_context(&context, Target::Cloud, "You are Nav.");
        assert_eq!(adapted, context);
    }

    #[test]
    fn local_target_keeps_only_table_tools() {
        let adapted = adapt_context(&host_context(), Target::Local, "You are Nav.");
        let names: Vec<&str> = adapted.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["read", "exec", "edit"]);
        assert!(adapted.tools.len() <= 4);
    }

    #[test]
    fn local_target_replaces_descriptions_and_schemas() {
        let adapted = adapt_context(&host_context(), Target::Local, "");
        let read = &adapted.tools[0];
        assert_eq!(read.description, "Read a file.");
        assert_eq!(read.parameters["required"], serde_json::json!(["path"]));
        assert_eq!(
            read.parameters["properties"]["path"],
            serde_json::json!({"type": "string"})
        );
    }

    #[test]
    fn local_target_preserves_handlers() {
        let adapted = adapt_context(&host_context(), Target::Local, "");
        assert!(adapted.tools.iter().all(|tool| tool.handler.is_some()));
    }

    #[test]
    fn missing_tools_are_not_fabricated() {
        let context = Context::new(vec![Message::user("hi")], vec![rich_tool("exec")], "host");
        let adapted = adapt_context(&context, Target::Local, "");
        let names: Vec<&str> = adapted.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["exec"]);
    }

    #[test]
    fn local_prompt_is_preamble_plus_tool_base() {
        let adapted = adapt_context(&host_context(), Target::Local, "You are Nav.");
        assert_eq!(adapted.system_prompt, format!("You are Nav. {TOOL_BASE}"));
    }

    #[test]
    fn empty_preamble_leaves_no_leading_space() {
        let adapted = adapt_context(&host_context(), Target::LocalText, "");
        assert_eq!(adapted.system_prompt, TEXT_BASE);
    }

    #[test]
    fn text_target_strips_all_tools() {
        let adapted = adapt_context(&host_context(), Target::LocalText, "You are Nav.");
        assert!(adapted.tools.is_empty());
        assert_eq!(adapted.system_prompt, format!("You are Nav. {TEXT_BASE}"));
    }

    #[test]
    fn adaptation_never_mutates_the_input() {
        let context = host_context();
        let before = context.clone();
        let _ = adapt_context(&context, Target::Local, "You are Nav.");
        let _ = adapt_context(&context, Target::LocalText, "You are Nav.");
        assert_eq!(context, before);
    }

    #[test]
    fn adaptation_is_idempotent_for_every_target() {
        let context = host_context();
        for target in [Target::Local, Target::LocalText, Target::Cloud] {
            let once = adapt_context(&context, target, "You are Nav.");
            let twice = adapt_context(&once, target, "You are Nav.");
            assert_eq!(once, twice, "target {target}");
        }
    }

    #[test]
    fn messages_are_carried_unchanged() {
        let context = host_context();
        let adapted = adapt_context(&context, Target::Local, "");
        assert_eq!(adapted.messages, context.messages);
    }
}
