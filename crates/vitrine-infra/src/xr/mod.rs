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

//! A simulated XR platform.
//!
//! Stands in for a device runtime: support probes, session grants and
//! hit-test grants are scripted up front, and tests or demos inject input
//! and platform-initiated ends through [`SimulatedSession`].

mod frame;
mod session;
mod system;

pub use frame::SimulatedFrame;
pub use session::{SimulatedHitTestSource, SimulatedSession};
pub use system::SimulatedXrSystem;

use vitrine_core::xr::XrError;

/// How a support probe for one mode answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeBehavior {
    /// The mode is supported.
    Supported,
    /// The mode is not supported.
    Unsupported,
    /// The probe itself fails.
    Fails(XrError),
}

impl ProbeBehavior {
    pub(crate) fn answer(&self) -> Result<bool, XrError> {
        match self {
            ProbeBehavior::Supported => Ok(true),
            ProbeBehavior::Unsupported => Ok(false),
            ProbeBehavior::Fails(err) => Err(err.clone()),
        }
    }
}

/// How the platform treats hit-testing in AR sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTestBehavior {
    /// The feature is granted and sources are handed out.
    #[default]
    Grant,
    /// The feature is granted but source requests are rejected.
    Reject,
    /// The feature is never granted.
    Absent,
}
