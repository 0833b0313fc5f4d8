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

//! # Vitrine Infra
//!
//! Concrete implementations of the contracts defined in `vitrine-core`:
//!
//! - [`asset`]: glTF model loading from the filesystem, plus an in-memory loader.
//! - [`xr`]: a simulated XR platform that scripts support, grants and input.
//! - [`graphics`]: a headless render engine that counts what it is asked to draw.
//! - [`ui`]: an overlay host that records and logs overlays.

#![warn(missing_docs)]

pub mod asset;
pub mod graphics;
pub mod ui;
pub mod xr;

pub use asset::{AssetFetcher, FileFetcher, GltfModelLoader, StaticModelLoader};
pub use graphics::{HeadlessRenderEngine, RenderCounters};
pub use ui::LogOverlayHost;
pub use xr::{
    HitTestBehavior, ProbeBehavior, SimulatedFrame, SimulatedSession, SimulatedXrSystem,
};
