// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the errors reported by the render engine.

use thiserror::Error;

/// An error raised by the render engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The renderer could not be created.
    #[error("failed to initialize renderer: {0}")]
    InitializationFailed(String),
    /// The renderer could not be attached to the session.
    #[error("failed to bind session: {0}")]
    SessionBinding(String),
    /// A draw call failed.
    #[error("rendering failed: {0}")]
    RenderingFailed(String),
    /// The graphics context was lost.
    #[error("the graphics context was lost")]
    ContextLost,
}
