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

//! Turns asset URLs into scene nodes.

mod environment;
mod resolver;

pub use resolver::AssetResolver;

use vitrine_core::math::Aabb;

/// Returns the uniform scale that makes the largest dimension of `bounds`
/// equal to `target_size`.
///
/// Returns `None` for invalid or degenerate bounds, in which case the model
/// keeps its authored size.
pub fn normalized_scale(bounds: &Aabb, target_size: f32) -> Option<f32> {
    let max_dimension = bounds.max_dimension();
    if max_dimension > 0.0 && max_dimension.is_finite() {
        Some(target_size / max_dimension)
    } else {
        None
    }
}
