// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity preamble assembly from workspace files.
//!
//! Small local models, absent a name, self-identify as their base family.
//! The preamble is the minimum intervention that suppresses this reliably.
//! It is prepended to both local system prompts and never sent to cloud.
//! All three files are optional and read exactly once at startup.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

/// Agent identity file: `**Name:**`, `**Full Name:**`, `**Vibe:**`.
pub const IDENTITY_FILE: &str = "IDENTITY.md";
/// Personality file: short bolded directives.
pub const PERSONALITY_FILE: &str = "PERSONALITY.md";
/// User profile file: `**What to call them:**`, falling back to `**Name:**`.
pub const USER_FILE: &str = "USER.md";

/// Base model families a nameless local model tends to claim to be.
const MODEL_FAMILIES: &[&str] = &["Gemma", "Llama", "Qwen"];

const MAX_DIRECTIVES: usize = 4;
const MAX_DIRECTIVE_LEN: usize = 80;

static BOLD_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("static pattern"));

/// Extract the value of a `**Label:** value` line, first match wins.
fn bold_label(text: &str, label: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r"\*\*{}:\*\*\s*(.+)", regex::escape(label)))
        .expect("escaped label pattern");
    pattern
        .captures(text)
        .map(|captures| captures[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Extract up to four short bolded directives, skipping `Label:` segments.
fn directives(text: &str) -> Vec<String> {
    BOLD_SEGMENT
        .captures_iter(text)
        .map(|captures| captures[1].trim().to_string())
        .filter(|segment| {
            !segment.is_empty() && !segment.contains(':') && segment.len() < MAX_DIRECTIVE_LEN
        })
        .map(|segment| segment.trim_end_matches('.').to_string())
        .take(MAX_DIRECTIVES)
        .collect()
}

async fn read_optional(dir: &Path, file: &str) -> Option<String> {
    let path = dir.join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Some(content),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "workspace file absent");
            None
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "failed to read workspace file");
            None
        }
    }
}

/// Build the identity preamble from the workspace directory.
///
/// Missing files and missing fields degrade gracefully; with no name at all
/// the result is the bare assistant sentence. `None` for the directory
/// yields an empty preamble (the base instructions stand alone).
pub async fn load_preamble(workspace_dir: Option<&Path>) -> String {
    let Some(dir) = workspace_dir else {
        return String::new();
    };

    let identity = read_optional(dir, IDENTITY_FILE).await;
    let personality = read_optional(dir, PERSONALITY_FILE).await;
    let user_profile = read_optional(dir, USER_FILE).await;

    compose_preamble(
        identity.as_deref(),
        personality.as_deref(),
        user_profile.as_deref(),
    )
}

/// Compose the preamble from raw file contents.
pub fn compose_preamble(
    identity: Option<&str>,
    personality: Option<&str>,
    user_profile: Option<&str>,
) -> String {
    let name = identity.and_then(|text| bold_label(text, "Name"));
    let full_name = identity.and_then(|text| bold_label(text, "Full Name"));
    let vibe = identity.and_then(|text| bold_label(text, "Vibe"));
    let user = user_profile.and_then(|text| {
        bold_label(text, "What to call them").or_else(|| bold_label(text, "Name"))
    });
    let directives = personality.map(directives).unwrap_or_default();

    let mut sentences: Vec<String> = Vec::new();

    match (&name, &full_name) {
        (Some(name), Some(full)) => {
            sentences.push(format!("You are {name} ({full}), a helpful AI assistant."));
        }
        (Some(name), None) => {
            sentences.push(format!("You are {name}, a helpful AI assistant."));
        }
        (None, _) => sentences.push("You are a helpful AI assistant.".to_string()),
    }

    if let Some(user) = &user {
        sentences.push(format!("You are assisting {user}."));
    }
    if let Some(vibe) = &vibe {
        sentences.push(format!("Your vibe: {vibe}."));
    }
    for directive in &directives {
        sentences.push(format!("{directive}."));
    }

    if let Some(name) = &name {
        sentences.push(format!(
            "Never say you are {}, or any other model. You are only {name}.",
            MODEL_FAMILIES.join(", ")
        ));
    }

    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: &str = "\
# Identity

**Name:** Nav
**Full Name:** Navigator
**Vibe:** calm and precise
";

    const PERSONALITY: &str = "\
# Personality

**Be concise.** Explanations stay short.
**Prefer plain language.**
**Labelled: not a directive**
**Never pad answers.**
**Ask before large changes.**
**A fifth directive that should be dropped.**
";

    const USER: &str = "\
**Name:** Morgan Reyes
**What to call them:** Mo
";

    #[test]
    fn full_preamble_composes_all_fields() {
        let preamble = compose_preamble(Some(IDENTITY), Some(PERSONALITY), Some(USER));
        assert!(preamble.starts_with("You are Nav (Navigator), a helpful AI assistant."));
        assert!(preamble.contains("You are assisting Mo."));
        assert!(preamble.contains("Your vibe: calm and precise."));
        assert!(preamble.contains("Be concise."));
        assert!(preamble.contains("Never pad answers."));
        assert!(preamble.ends_with("Never say you are Gemma, Llama, Qwen, or any other model. You are only Nav."));
    }

    #[test]
    fn directives_cap_at_four_and_skip_labels() {
        let extracted = directives(PERSONALITY);
        assert_eq!(
            extracted,
            vec![
                "Be concise",
                "Prefer plain language",
                "Never pad answers",
                "Ask before large changes",
            ]
        );
    }

    #[test]
    fn overlong_directives_are_skipped() {
        let text = format!("**{}**", "x".repeat(120));
        assert!(directives(&text).is_empty());
    }

    #[test]
    fn user_falls_back_to_name_label() {
        let preamble = compose_preamble(Some(IDENTITY), None, Some("**Name:** Morgan\n"));
        assert!(preamble.contains("You are assisting Morgan."));
    }

    #[test]
    fn missing_name_degrades_to_bare_assistant() {
        let preamble = compose_preamble(Some("**Vibe:** upbeat\n"), None, None);
        assert!(preamble.starts_with("You are a helpful AI assistant."));
        assert!(preamble.contains("Your vibe: upbeat."));
        assert!(!preamble.contains("Never say"));
    }

    #[test]
    fn all_files_missing_yields_bare_assistant() {
        assert_eq!(
            compose_preamble(None, None, None),
            "You are a helpful AI assistant."
        );
    }

    #[tokio::test]
    async fn load_preamble_without_workspace_is_empty() {
        assert_eq!(load_preamble(None).await, "");
    }

    #[tokio::test]
    async fn load_preamble_reads_workspace_files() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(IDENTITY_FILE), IDENTITY)
            .await
            .unwrap();
        tokio::fs::write(dir.path().join(USER_FILE), USER).await.unwrap();

        let preamble = load_preamble(Some(dir.path())).await;
        assert!(preamble.contains("You are Nav (Navigator)"));
        assert!(preamble.contains("You are assisting Mo."));
    }

    #[tokio::test]
    async fn load_preamble_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let preamble = load_preamble(Some(dir.path())).await;
        assert_eq!(preamble, "You are a helpful AI assistant.");
    }
}
