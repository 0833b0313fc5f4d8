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

//! Provides the mathematics primitives used for poses and placement.
//!
//! The types follow a right-handed coordinate system with `+Y` up and the camera
//! looking down `-Z`, which is the convention of the host XR platforms. Matrices
//! are stored column-major so platform pose arrays can be copied verbatim.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, PI};

mod geometry;
mod matrix;
mod quaternion;
mod vector;

pub use self::geometry::Aabb;
pub use self::matrix::Mat4;
pub use self::quaternion::Quaternion;
pub use self::vector::{Vec3, Vec4};

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// # Examples
///
/// ```
/// use vitrine_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
