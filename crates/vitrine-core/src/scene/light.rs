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

//! Light sources added to the session scene.

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// The shape of a light's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Uniform light reaching every surface equally.
    Ambient,
    /// Parallel rays shining from `position` towards the origin.
    Directional {
        /// Where the light is placed; its direction points at the origin.
        position: Vec3,
    },
}

/// A light source in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// The kind of light.
    pub kind: LightKind,
    /// Color as `0xRRGGBB`.
    pub color: u32,
    /// Intensity multiplier, `1.0` being standard.
    pub intensity: f32,
}

impl Light {
    /// Creates a white ambient light.
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: 0xffffff,
            intensity,
        }
    }

    /// Creates a white directional light placed at `position`.
    pub fn directional(position: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { position },
            color: 0xffffff,
            intensity,
        }
    }

    /// The direction the light travels, for directional lights.
    pub fn direction(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Ambient => None,
            LightKind::Directional { position } => Some((-position).normalize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_points_at_origin() {
        let light = Light::directional(Vec3::new(0.0, 4.0, 0.0), 1.0);
        assert_eq!(light.direction(), Some(Vec3::new(0.0, -1.0, 0.0)));
        assert_eq!(Light::ambient(0.6).direction(), None);
    }
}
