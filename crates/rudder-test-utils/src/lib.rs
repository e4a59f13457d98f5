// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Rudder workspace.
//!
//! Deterministic mocks for the two host seams (stream function and model
//! catalog) plus context and settings builders. No network, no backends,
//! CI-runnable.

pub mod catalog;
pub mod harness;
pub mod mock_stream;

pub use catalog::StaticCatalog;
pub use harness::{full_router_settings, post_tool_context, user_context};
pub use mock_stream::{RecordedCall, RecordingStream};
