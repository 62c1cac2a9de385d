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

//! Defines the Light component.
//!
//! The entity's `Transform` provides the position and orientation of the light.

use serde::{Deserialize, Serialize};
use tessera_core::math::LinearRgba;
use tessera_macros::Component;

/// The shape of a light source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Parallel rays along the entity's forward axis (sun-like).
    Directional,
    /// Omnidirectional light with a finite range.
    Point {
        /// Distance at which the light fades out.
        range: f32,
    },
    /// A cone of light along the entity's forward axis.
    Spot {
        /// Distance at which the light fades out.
        range: f32,
        /// Angle, in radians, of the fully lit inner cone.
        inner_cone_angle: f32,
        /// Angle, in radians, where the light reaches zero.
        outer_cone_angle: f32,
    },
}

/// A component that adds a light source to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 40)]
pub struct Light {
    /// The shape of the light source.
    pub kind: LightKind,
    /// Linear color of the emitted light.
    pub color: LinearRgba,
    /// Brightness multiplier.
    pub intensity: f32,
    /// Whether the light is currently active.
    pub enabled: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(LightKind::Directional)
    }
}

impl Light {
    /// Creates a new enabled white light of the given kind.
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: LinearRgba::WHITE,
            intensity: 1.0,
            enabled: true,
        }
    }

    /// Creates a new point light.
    pub fn point(range: f32) -> Self {
        Self::new(LightKind::Point { range })
    }
}
