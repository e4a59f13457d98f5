// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rudder hybrid model router.
//!
//! This crate provides the shared types, error enum, and boundary traits
//! used throughout the Rudder workspace. The router crates build on these;
//! the host implements the traits.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RudderError;
pub use types::{
    CallOptions, ContentPart, Context, Decision, Message, MessageBody, Model, ModelRef,
    ModelStream, Preference, Role, StreamChunk, StreamEvent, Target, ToolSchema,
};

// Re-export the boundary traits at crate root.
pub use traits::{ModelCatalog, StreamService, ToolHandler, ToolOutput};
