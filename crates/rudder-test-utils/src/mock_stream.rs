// SPDX-FileCopyrightText: 2026 Rudder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock stream function for deterministic testing.
//!
//! `RecordingStream` implements `StreamService` with pre-configured
//! responses and records every delegated call, enabling fast CI-runnable
//! tests without any model backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex as AsyncMutex;

use rudder_core::{
    CallOptions, Context, Model, ModelStream, RudderError, StreamChunk, StreamEvent,
    StreamService,
};

/// One delegated call as the downstream function saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: Model,
    pub context: Context,
    pub options: CallOptions,
}

/// A mock stream function that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue; when the queue is empty a default
/// "mock response" text is returned. Every call is recorded for assertions.
pub struct RecordingStream {
    responses: AsyncMutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingStream {
    /// Create a mock with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: AsyncMutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: AsyncMutex::new(VecDeque::from(responses)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Snapshot of all delegated calls so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// The most recent delegated call, if any.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().expect("calls lock").last().cloned()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for RecordingStream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamService for RecordingStream {
    async fn stream(
        &self,
        model: &Model,
        context: &Context,
        options: &CallOptions,
    ) -> Result<ModelStream, RudderError> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            model: model.clone(),
            context: context.clone(),
            options: options.clone(),
        });

        let text = self.next_response().await;
        let chunks = vec![
            Ok(StreamChunk {
                event: StreamEvent::MessageStart,
                text: None,
            }),
            Ok(StreamChunk {
                event: StreamEvent::Delta,
                text: Some(text),
            }),
            Ok(StreamChunk {
                event: StreamEvent::MessageStop,
                text: None,
            }),
        ];
        Ok(Box::pin(stream::iter(chunks)))
    }
}
