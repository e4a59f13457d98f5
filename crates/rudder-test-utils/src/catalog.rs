// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock model catalog for deterministic testing.

use std::collections::HashSet;

use async_trait::async_trait;

use rudder_core::{Model, ModelCatalog, ModelRef, RudderError};

/// A catalog that binds any reference verbatim, except those marked failing.
pub struct StaticCatalog {
    failing: HashSet<String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
        }
    }

    /// Mark a `provider/id` reference as unresolvable.
    pub fn failing(mut self, reference: &str) -> Self {
        self.failing.insert(reference.to_string());
        self
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelCatalog for StaticCatalog {
    async fn resolve(&self, reference: &ModelRef) -> Result<Model, RudderError> {
        if self.failing.contains(&reference.to_string()) {
            return Err(RudderError::ModelResolve {
                reference: reference.to_string(),
                message: "not present in catalog".to_string(),
            });
        }
        Ok(Model {
            provider: reference.provider.clone(),
            id: reference.id.clone(),
            credentials_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_any_reference_verbatim() {
        let catalog = StaticCatalog::new();
        let model = catalog
            .resolve(&ModelRef::new("ollama", "functiongemma"))
            .await
            .unwrap();
        assert_eq!(model.provider, "ollama");
        assert_eq!(model.id, "functiongemma");
    }

    #[tokio::test]
    async fn failing_references_error() {
        let catalog = StaticCatalog::new().failing("ollama/functiongemma");
        assert!(catalog
            .resolve(&ModelRef::new("ollama", "functiongemma"))
            .await
            .is_err());
        assert!(catalog
            .resolve(&ModelRef::new("ollama", "gemma3"))
            .await
            .is_ok());
    }
}
