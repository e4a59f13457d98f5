// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stream-function seam the router wraps.

use async_trait::async_trait;

use crate::error::RudderError;
use crate::types::{CallOptions, Context, Model, ModelStream};

/// One inference call: `(model, context, options) -> stream`.
///
/// The host exposes a single implementation per agent; the router is
/// inserted by wrapping it with another implementation of the same trait.
/// The returned stream is opaque to the router and is never transformed.
#[async_trait]
pub trait StreamService: Send + Sync {
    async fn stream(
        &self,
        model: &Model,
        context: &Context,
        options: &CallOptions,
    ) -> Result<ModelStream, RudderError>;
}
