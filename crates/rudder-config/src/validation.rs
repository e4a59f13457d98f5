// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for router settings.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. All errors are collected; validation does not fail fast.

use std::str::FromStr;

use rudder_core::Preference;

use crate::diagnostic::{suggest_value, ConfigError};
use crate::model::RouterSettings;

/// Accepted spellings of the preference knob.
pub const VALID_PREFERENCES: &[&str] =
    &["prefer-local", "prefer-cloud", "local-only", "cloud-only"];

/// Validate deserialized router settings for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// every collected validation error.
pub fn validate_settings(settings: &RouterSettings) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if parse_preference(&settings.preference).is_none() {
        errors.push(ConfigError::InvalidValue {
            key: "router.preference".to_string(),
            value: settings.preference.clone(),
            suggestion: suggest_value(&settings.preference, VALID_PREFERENCES),
            valid_values: VALID_PREFERENCES.join(", "),
        });
    }

    if settings.local_model.provider.trim().is_empty()
        || settings.local_model.id.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "router.local_model must name a provider and an id".to_string(),
        });
    }

    for (key, reference) in [
        ("router.local_text_model", settings.local_text_model.as_ref()),
        ("router.cloud_model", settings.cloud_model.as_ref()),
    ] {
        if let Some(reference) = reference {
            if reference.provider.trim().is_empty() || reference.id.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} must name a provider and an id"),
                });
            }
        }
    }

    let threshold = settings.routing.complexity_threshold;
    if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
        errors.push(ConfigError::Validation {
            message: format!(
                "router.routing.complexity_threshold must be within [0.0, 1.0], got {threshold}"
            ),
        });
    }

    if settings.routing.max_local_response_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "router.routing.max_local_response_tokens must be positive".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse the preference string, returning `None` for unknown values.
pub fn parse_preference(value: &str) -> Option<Preference> {
    Preference::from_str(value.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rudder_core::ModelRef;

    #[test]
    fn default_settings_validate() {
        let settings = RouterSettings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn all_preferences_parse() {
        for (text, expected) in [
            ("prefer-local", Preference::PreferLocal),
            ("prefer-cloud", Preference::PreferCloud),
            ("local-only", Preference::LocalOnly),
            ("cloud-only", Preference::CloudOnly),
        ] {
            assert_eq!(parse_preference(text), Some(expected));
        }
    }

    #[test]
    fn misspelled_preference_gets_suggestion() {
        let settings = RouterSettings {
            preference: "prefer-locl".to_string(),
            ..RouterSettings::default()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::InvalidValue { suggestion: Some(s), .. } if s == "prefer-local"
        )));
    }

    #[test]
    fn empty_local_model_fails_validation() {
        let settings = RouterSettings {
            local_model: ModelRef::new("", ""),
            ..RouterSettings::default()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("local_model"))));
    }

    #[test]
    fn threshold_outside_unit_interval_fails() {
        let mut settings = RouterSettings::default();
        settings.routing.complexity_threshold = 1.5;
        let errors = validate_settings(&settings).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("complexity_threshold"))));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut settings = RouterSettings {
            preference: "nonsense".to_string(),
            local_model: ModelRef::new("", ""),
            ..RouterSettings::default()
        };
        settings.routing.complexity_threshold = -0.1;
        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
