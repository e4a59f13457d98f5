// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic prompt complexity classification.
//!
//! Scores the most recent user message into [0, 1] using zero-cost keyword
//! heuristics plus lightweight conversation features. No model pre-call, no
//! network, no latency. Force patterns and the post-tool shortcut return
//! before any scoring happens.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use rudder_config::RoutingRules;
use rudder_core::{Context, Role};
use tracing::debug;

/// Result of classifying a context's complexity.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Complexity score, clamped to [0, 1].
    pub score: f32,
    /// Which rule produced the score: a shortcut name or "heuristic".
    pub reason: &'static str,
    /// Signals that fired, in evaluation order.
    pub tags: Vec<String>,
}

/// Shortcut reasons returned before scoring.
pub const REASON_FORCE_CLOUD: &str = "force-cloud";
pub const REASON_FORCE_LOCAL: &str = "force-local";
pub const REASON_POST_TOOL: &str = "post-tool-turn";
pub const REASON_HEURISTIC: &str = "heuristic";

/// How many trailing messages the tool-heavy discount inspects.
const TOOL_HEAVY_WINDOW: usize = 10;
/// Tool-call parts above this count trigger the discount.
const TOOL_HEAVY_LIMIT: usize = 3;

struct KeywordFamily {
    pattern: Regex,
    weight: f32,
    tag: &'static str,
}

fn family(pattern: &str, weight: f32, tag: &'static str) -> KeywordFamily {
    KeywordFamily {
        pattern: RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("keyword family patterns are static"),
        weight,
        tag,
    }
}

/// Keyword families that raise the score. A family contributes its weight
/// once no matter how many of its keywords appear.
static COMPLEX_FAMILIES: LazyLock<Vec<KeywordFamily>> = LazyLock::new(|| {
    vec![
        family(r"\b(explain|describe|elaborate)\b", 0.15, "explanation"),
        family(r"\b(implement|create|build|develop)\b", 0.20, "implementation"),
        family(r"\b(refactor|optimize|improve|restructure)\b", 0.20, "refactoring"),
        family(r"\b(debug|fix|solve|troubleshoot)\b", 0.15, "debugging"),
        family(r"\b(analyze|compare|evaluate|review)\b", 0.15, "analysis"),
        family(r"\bwhy\b|\bhow does\b|\bwhat causes\b", 0.10, "reasoning"),
        family(r"\bstep by step\b|\bin detail\b|\bthoroughly\b", 0.15, "detail-request"),
        family(r"\b(write|generate|compose)\s+\w+", 0.15, "generation"),
        family(r"\b(find|search|look up|google|browse)\b", 0.35, "search"),
        family(r"\b(recommend|suggest|best|top|highest rated)\b", 0.30, "recommendation"),
        family(r"\b(latest|recent|current|today|news|price)\b", 0.30, "real-time"),
        family(r"\b(buy|purchase|order|shop|deal|discount)\b", 0.25, "shopping"),
        family(r"\b(summarize|plan|design|architect)\b", 0.20, "planning"),
        family(r"\b(help me|assist|guide)\b", 0.10, "assistance"),
    ]
});

/// Keyword families that lower the score (negative weights).
static SIMPLE_FAMILIES: LazyLock<Vec<KeywordFamily>> = LazyLock::new(|| {
    vec![
        family(r"\b(read|cat|show|display|print)\b.*\bfile\b", -0.25, "file-read"),
        family(r"\b(list|ls|dir)\b", -0.20, "directory"),
        family(r"\b(run|execute|exec)\b", -0.10, "command"),
        family(
            r"^(yes|no|ok|okay|sure|confirm|yep|nah)\s*[.!?]?$",
            -0.35,
            "confirmation",
        ),
        family(r"^(hello|hi|hey|thanks|thank you)\s*[.!?]?$", -0.30, "greeting"),
    ]
});

/// Tags that never count as genuine complexity for the multi-signal boost.
const NON_COMPLEXITY_TAGS: &[&str] = &[
    "long-prompt",
    "very-long-prompt",
    "file-read",
    "directory",
    "command",
    "confirmation",
    "greeting",
];

/// Extract the text of the most recent user message, walking from the end.
/// Text parts are joined with single spaces; no user message yields "".
pub fn last_user_text(context: &Context) -> String {
    context
        .messages
        .iter()
        .rev()
        .find(|message| message.role == Role::User)
        .map(|message| message.content.joined_text())
        .unwrap_or_default()
}

/// True when the conversation ends on a tool result, i.e. the model is only
/// being asked to summarise a tool's output.
pub fn is_post_tool_turn(context: &Context) -> bool {
    context
        .messages
        .last()
        .is_some_and(|message| message.role == Role::ToolResult)
}

/// Count tool-call content parts in the trailing message window.
fn recent_tool_call_count(context: &Context) -> usize {
    context
        .messages
        .iter()
        .rev()
        .take(TOOL_HEAVY_WINDOW)
        .map(|message| message.content.tool_call_count())
        .sum()
}

/// Classify a context's complexity against the compiled routing rules.
pub fn classify(context: &Context, rules: &RoutingRules) -> Classification {
    let text = last_user_text(context);

    // Force patterns short-circuit everything, cloud list first.
    for pattern in &rules.force_cloud {
        if pattern.is_match(&text) {
            return Classification {
                score: 1.0,
                reason: REASON_FORCE_CLOUD,
                tags: vec![pattern.as_str().to_string()],
            };
        }
    }
    for pattern in &rules.force_local {
        if pattern.is_match(&text) {
            return Classification {
                score: 0.0,
                reason: REASON_FORCE_LOCAL,
                tags: vec![pattern.as_str().to_string()],
            };
        }
    }

    if is_post_tool_turn(context) {
        return Classification {
            score: 0.0,
            reason: REASON_POST_TOOL,
            tags: vec!["post-tool".to_string()],
        };
    }

    let mut score: f32 = 0.0;
    let mut tags: Vec<String> = Vec::new();

    let word_count = text.split_whitespace().count();
    if word_count > 100 {
        score += 0.15;
        tags.push("long-prompt".to_string());
    }
    if word_count > 300 {
        score += 0.15;
        tags.push("very-long-prompt".to_string());
    }

    for family in COMPLEX_FAMILIES.iter() {
        if family.pattern.is_match(&text) {
            score += family.weight;
            tags.push(family.tag.to_string());
        }
    }

    for family in SIMPLE_FAMILIES.iter() {
        if family.pattern.is_match(&text) {
            score += family.weight;
            tags.push(family.tag.to_string());
        }
    }

    let complexity_tag_count = tags
        .iter()
        .filter(|tag| !NON_COMPLEXITY_TAGS.contains(&tag.as_str()))
        .count();
    if complexity_tag_count >= 2 {
        score += 0.15;
        tags.push("multi-signal".to_string());
    }
    if word_count > 12 && complexity_tag_count >= 1 {
        score += 0.10;
        tags.push("detailed-query".to_string());
    }

    if recent_tool_call_count(context) > TOOL_HEAVY_LIMIT {
        score -= 0.10;
        tags.push("tool-heavy-ctx".to_string());
    }

    let score = score.clamp(0.0, 1.0);
    debug!(score, word_count, tags = ?tags, "classified prompt");

    Classification {
        score,
        reason: REASON_HEURISTIC,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rudder_core::{ContentPart, Message, MessageBody};

    fn ctx(text: &str) -> Context {
        Context::new(vec![Message::user(text)], vec![], "host prompt")
    }

    fn rules_with(force_cloud: &[&str], force_local: &[&str]) -> RoutingRules {
        RoutingRules::compile(&rudder_config::RoutingSection {
            force_cloud_patterns: force_cloud.iter().map(|s| s.to_string()).collect(),
            force_local_patterns: force_local.iter().map(|s| s.to_string()).collect(),
            ..rudder_config::RoutingSection::default()
        })
    }

    #[test]
    fn empty_context_classifies_as_empty_string() {
        let classification = classify(&Context::default(), &RoutingRules::default());
        assert_eq!(classification.score, 0.0);
        assert_eq!(classification.reason, REASON_HEURISTIC);
        assert!(classification.tags.is_empty());
    }

    #[test]
    fn force_cloud_wins_over_force_local() {
        // Both lists match; cloud list is evaluated first.
        let rules = rules_with(&["explain"], &["explain"]);
        let classification = classify(&ctx("explain this"), &rules);
        assert_eq!(classification.reason, REASON_FORCE_CLOUD);
        assert_eq!(classification.score, 1.0);
        assert_eq!(classification.tags, vec!["explain".to_string()]);
    }

    #[test]
    fn force_local_returns_zero_score() {
        let rules = rules_with(&[], &["read.*file"]);
        let classification = classify(&ctx("read the file src/index.ts"), &rules);
        assert_eq!(classification.reason, REASON_FORCE_LOCAL);
        assert_eq!(classification.score, 0.0);
    }

    #[test]
    fn post_tool_turn_shortcuts_to_zero() {
        let mut context = ctx("search for the latest news");
        context
            .messages
            .push(Message::tool_result(serde_json::json!({"stdout": "ok"})));
        let classification = classify(&context, &RoutingRules::default());
        assert_eq!(classification.reason, REASON_POST_TOOL);
        assert_eq!(classification.score, 0.0);
        assert_eq!(classification.tags, vec!["post-tool".to_string()]);
    }

    #[test]
    fn force_patterns_beat_post_tool_shortcut() {
        let rules = rules_with(&["news"], &[]);
        let mut context = ctx("search for the latest news");
        context
            .messages
            .push(Message::tool_result(serde_json::json!({"stdout": "ok"})));
        let classification = classify(&context, &rules);
        assert_eq!(classification.reason, REASON_FORCE_CLOUD);
    }

    #[test]
    fn greetings_score_zero_after_clamp() {
        let classification = classify(&ctx("hello"), &RoutingRules::default());
        assert_eq!(classification.reason, REASON_HEURISTIC);
        assert_eq!(classification.score, 0.0);
        assert!(classification.tags.contains(&"greeting".to_string()));
    }

    #[test]
    fn confirmation_with_punctuation_matches() {
        let classification = classify(&ctx("yes!"), &RoutingRules::default());
        assert!(classification.tags.contains(&"confirmation".to_string()));
        assert_eq!(classification.score, 0.0);
    }

    #[test]
    fn real_time_family_fires_once_for_multiple_keywords() {
        let classification = classify(
            &ctx("what are the latest headlines today?"),
            &RoutingRules::default(),
        );
        assert_eq!(
            classification
                .tags
                .iter()
                .filter(|t| *t == "real-time")
                .count(),
            1
        );
        assert!((classification.score - 0.30).abs() < 1e-6);
    }

    #[test]
    fn multi_signal_boost_applies_at_two_complexity_tags() {
        let classification = classify(
            &ctx("implement and debug the parser"),
            &RoutingRules::default(),
        );
        assert!(classification.tags.contains(&"implementation".to_string()));
        assert!(classification.tags.contains(&"debugging".to_string()));
        assert!(classification.tags.contains(&"multi-signal".to_string()));
        // 0.20 + 0.15 + 0.15 multi-signal = 0.50
        assert!((classification.score - 0.50).abs() < 1e-6);
    }

    #[test]
    fn detailed_query_requires_both_length_and_a_complexity_tag() {
        let short = classify(&ctx("debug this"), &RoutingRules::default());
        assert!(!short.tags.contains(&"detailed-query".to_string()));

        let long = classify(
            &ctx("debug the connection pool so that it stops leaking sockets under sustained load please"),
            &RoutingRules::default(),
        );
        assert!(long.tags.contains(&"detailed-query".to_string()));
    }

    #[test]
    fn long_prompt_boosts_do_not_count_as_complexity_signals() {
        let filler = "lorem ipsum dolor sit amet consectetur ".repeat(30);
        let classification = classify(&ctx(&filler), &RoutingRules::default());
        assert!(classification.tags.contains(&"long-prompt".to_string()));
        assert!(!classification.tags.contains(&"multi-signal".to_string()));
        assert!(!classification.tags.contains(&"detailed-query".to_string()));
    }

    #[test]
    fn tool_heavy_context_discounts_score() {
        let tool_call = || ContentPart::ToolCall {
            name: "exec".into(),
            args: serde_json::json!({"command": "ls"}),
        };
        let mut messages = vec![Message::user("first question")];
        for _ in 0..4 {
            messages.push(Message {
                role: Role::Assistant,
                content: MessageBody::Parts(vec![tool_call()]),
                provider: None,
                model: None,
            });
            messages.push(Message::assistant("done"));
        }
        messages.push(Message::user("debug the failing step"));
        let context = Context::new(messages, vec![], "host prompt");

        let classification = classify(&context, &RoutingRules::default());
        assert!(classification.tags.contains(&"tool-heavy-ctx".to_string()));
        // debugging 0.15 - 0.10 discount
        assert!((classification.score - 0.05).abs() < 1e-6);
    }

    #[test]
    fn score_is_clamped_to_unit_interval() {
        let classification = classify(
            &ctx(
                "find and search the latest news today, recommend the best deal, buy it, \
                 then implement, refactor, debug, analyze, and explain everything step by step",
            ),
            &RoutingRules::default(),
        );
        assert_eq!(classification.score, 1.0);
    }

    #[test]
    fn last_user_text_joins_parts_with_spaces() {
        let context = Context::new(
            vec![
                Message::user("earlier"),
                Message::assistant("sure"),
                Message {
                    role: Role::User,
                    content: MessageBody::Parts(vec![
                        ContentPart::Text { text: "part one".into() },
                        ContentPart::Text { text: "part two".into() },
                    ]),
                    provider: None,
                    model: None,
                },
            ],
            vec![],
            "",
        );
        assert_eq!(last_user_text(&context), "part one part two");
    }

    #[test]
    fn adding_complex_keyword_never_decreases_score() {
        // Deterministic keyword-bag sweep: for every base text, appending a
        // complex keyword must not lower the score.
        let bases = [
            "",
            "hello",
            "run the tests",
            "what is 2 + 2",
            "implement the parser",
            "read the file src/main.rs please",
        ];
        for base in bases {
            let before = classify(&ctx(base), &RoutingRules::default()).score;
            for keyword in ["implement", "search", "latest", "debug", "architect"] {
                let after =
                    classify(&ctx(&format!("{base} {keyword}")), &RoutingRules::default()).score;
                assert!(
                    after >= before,
                    "adding `{keyword}` to `{base}` lowered score {before} -> {after}"
                );
            }
        }
    }

    #[test]
    fn adding_simple_keyword_never_increases_score() {
        // Appending keeps anchored families (greeting, confirmation) out of
        // the picture, so only the unanchored simple families can fire.
        let bases = ["implement the parser", "debug the pool", "what is 2 + 2"];
        for base in bases {
            let before = classify(&ctx(base), &RoutingRules::default()).score;
            for keyword in ["ls", "exec"] {
                let after =
                    classify(&ctx(&format!("{base} {keyword}")), &RoutingRules::default()).score;
                assert!(
                    after <= before,
                    "adding `{keyword}` to `{base}` raised score {before} -> {after}"
                );
            }
        }
    }
}
