// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Force-pattern compilation and the compiled routing rules.
//!
//! Pattern lists are the operator's primary extension point: they are
//! evaluated before any score-based logic and short-circuit it, so a single
//! regex can pin any routing the operator disagrees with.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::model::RoutingSection;

/// Routing parameters after pattern compilation. Immutable after startup.
#[derive(Debug, Clone)]
pub struct RoutingRules {
    /// Score cutoff for "complex" (inclusive).
    pub complexity_threshold: f32,
    /// Compiled force-cloud patterns, in configuration order.
    pub force_cloud: Vec<Regex>,
    /// Compiled force-local patterns, in configuration order.
    pub force_local: Vec<Regex>,
    /// Advisory response-token cap for local targets.
    pub max_local_response_tokens: u32,
}

impl RoutingRules {
    /// Compile a routing section. Never fails: invalid patterns are logged
    /// at warn and skipped.
    pub fn compile(section: &RoutingSection) -> Self {
        Self {
            complexity_threshold: section.complexity_threshold,
            force_cloud: compile_patterns("force_cloud_patterns", &section.force_cloud_patterns),
            force_local: compile_patterns("force_local_patterns", &section.force_local_patterns),
            max_local_response_tokens: section.max_local_response_tokens,
        }
    }
}

impl Default for RoutingRules {
    fn default() -> Self {
        Self::compile(&RoutingSection::default())
    }
}

/// Compile a pattern list case-insensitively, dropping entries that fail.
pub fn compile_patterns(list_name: &str, patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| {
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(regex) => Some(regex),
                Err(error) => {
                    warn!(
                        list = list_name,
                        pattern = pattern.as_str(),
                        error = %error,
                        "dropping invalid routing pattern"
                    );
                    None
                }
            }
        })
        .collect()
}
