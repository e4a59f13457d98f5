// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics with fuzzy match suggestions.
//!
//! Invalid closed-set values (preference, fallback modes) get a
//! "did you mean?" suggestion via Jaro-Winkler string similarity.

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `prefer-locl` -> `prefer-local`
/// while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic context.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A closed-set key holds an unrecognized value.
    #[error("invalid value `{value}` for key `{key}`")]
    #[diagnostic(
        code(rudder::config::invalid_value),
        help("{}", format_invalid_value_help(suggestion.as_deref(), valid_values))
    )]
    InvalidValue {
        /// The offending key, dotted from the router block root.
        key: String,
        /// The unrecognized value.
        value: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Comma-separated list of accepted values.
        valid_values: String,
    },

    /// A semantic constraint on a config value failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(rudder::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for loader-level errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(rudder::config::other))]
    Other(String),
}

/// Format the help message for invalid-value errors.
fn format_invalid_value_help(suggestion: Option<&str>, valid_values: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid values: {valid_values}"),
        None => format!("valid values: {valid_values}"),
    }
}

/// Suggest a similar value using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// nothing in the valid set is close enough.
pub fn suggest_value(unknown: &str, valid_values: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &value in valid_values {
        let score = strsim::jaro_winkler(unknown, value);
        if score > best_score {
            best_score = score;
            best_match = Some(value.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

/// Flatten a list of config errors into a single fatal message.
pub fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_prefer_locl_for_prefer_local() {
        let valid = &["prefer-local", "prefer-cloud", "local-only", "cloud-only"];
        assert_eq!(
            suggest_value("prefer-locl", valid),
            Some("prefer-local".to_string())
        );
    }

    #[test]
    fn suggest_cloud_onyl_for_cloud_only() {
        let valid = &["prefer-local", "prefer-cloud", "local-only", "cloud-only"];
        assert_eq!(
            suggest_value("cloud-onyl", valid),
            Some("cloud-only".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["prefer-local", "prefer-cloud"];
        assert_eq!(suggest_value("zzzzzz", valid), None);
    }

    #[test]
    fn invalid_value_help_includes_suggestion() {
        let err = ConfigError::InvalidValue {
            key: "preference".into(),
            value: "prefer-locl".into(),
            suggestion: Some("prefer-local".into()),
            valid_values: "prefer-local, prefer-cloud".into(),
        };
        assert!(err.to_string().contains("prefer-locl"));
    }
}
