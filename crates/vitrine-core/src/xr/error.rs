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

//! Defines the errors reported by the host immersive platform.

use thiserror::Error;

/// An error reported by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrError {
    /// The platform has no immersive support at all.
    #[error("immersive sessions are not available on this platform")]
    Unavailable,
    /// The requested mode or feature is not supported.
    #[error("not supported: {0}")]
    NotSupported(String),
    /// The request was not made from a user gesture, or permission was denied.
    #[error("request not allowed: {0}")]
    NotAllowed(String),
    /// The object is in a state that does not allow the operation, e.g. the session has ended.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Any other platform-side failure.
    #[error("platform error: {0}")]
    Platform(String),
}
