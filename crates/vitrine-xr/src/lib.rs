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

//! # Vitrine XR
//!
//! Drives an immersive (AR/VR) session on top of the host platform contracts
//! defined in `vitrine-core`.
//!
//! - [`CapabilityNegotiator`] picks the preferred immersive mode.
//! - [`SessionManager`] owns the one live session: acquisition, scene setup,
//!   per-frame hit-testing and rendering, placement, and teardown.
//! - [`AssetResolver`] turns asset URLs into placeable scene nodes and never fails.
//! - [`LaunchControl`] is the UI control that starts a session.

#![warn(missing_docs)]

pub mod asset;
pub mod capability;
pub mod config;
pub mod error;
pub mod launcher;
pub mod reticle;
pub mod session;

pub use asset::AssetResolver;
pub use capability::{CapabilityNegotiator, SupportReport};
pub use config::XrConfig;
pub use error::{ConfigError, SessionError};
pub use launcher::LaunchControl;
pub use reticle::Reticle;
pub use session::{FrameOutcome, PlacementTarget, SessionManager, SessionServices, SessionState};
