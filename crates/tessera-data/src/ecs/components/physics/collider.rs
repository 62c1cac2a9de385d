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

use serde::{Deserialize, Serialize};
use tessera_core::math::Vec3;
use tessera_macros::Component;

/// Supported collider shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with half-extents.
    Box(Vec3),
    /// Sphere with radius.
    Sphere(f32),
    /// Capsule with half-height and radius.
    Capsule(f32, f32),
}

/// Component representing a collider attached to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 20)]
pub struct Collider {
    /// Shape of the collider.
    pub shape: ColliderShape,
    /// Friction coefficient.
    pub friction: f32,
    /// Restitution (bounciness) coefficient.
    pub restitution: f32,
    /// Whether this collider is a sensor (does not respond to forces).
    pub is_sensor: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self::new_sphere(0.5)
    }
}

impl Collider {
    /// Creates a new box collider.
    pub fn new_box(half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Box(half_extents),
            friction: 0.5,
            restitution: 0.0,
            is_sensor: false,
        }
    }

    /// Creates a new sphere collider.
    pub fn new_sphere(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere(radius),
            ..Self::new_box(Vec3::ZERO)
        }
    }
}
