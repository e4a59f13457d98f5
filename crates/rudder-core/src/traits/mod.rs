// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary traits between the router and its host.
//!
//! The host supplies implementations of these seams; the router never
//! reaches past them. All traits use `#[async_trait]` for dynamic dispatch.

pub mod catalog;
pub mod stream;
pub mod tool;

pub use catalog::ModelCatalog;
pub use stream::StreamService;
pub use tool::{ToolHandler, ToolOutput};
