// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model resolution seam.

use async_trait::async_trait;

use crate::error::RudderError;
use crate::types::{Model, ModelRef};

/// Resolves a `(provider, id)` reference against the host's configuration
/// and credentials, producing a concrete model descriptor.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn resolve(&self, reference: &ModelRef) -> Result<Model, RudderError>;
}
