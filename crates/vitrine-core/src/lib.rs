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

//! # Vitrine Core
//!
//! Foundational crate containing the math primitives, the engine-agnostic scene
//! description, and the interface contracts that the immersive session manager
//! drives: the host XR platform, the external render engine, the model loader
//! and the overlay host.

#![warn(missing_docs)]

pub mod asset;
pub mod catalog;
pub mod engine;
pub mod math;
pub mod scene;
pub mod ui;
pub mod xr;

pub use scene::{Camera, ObjectId, Scene, SceneNode, SceneNodeKind};
pub use xr::{SessionMode, XrError};
