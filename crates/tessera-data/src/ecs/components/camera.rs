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
use tessera_macros::Component;

/// Defines the type of camera projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectionType {
    /// Perspective projection with field of view.
    Perspective {
        /// The vertical field of view in radians.
        fov_y_radians: f32,
    },
    /// Orthographic projection with view bounds.
    Orthographic {
        /// The width of the orthographic view volume.
        width: f32,
        /// The height of the orthographic view volume.
        height: f32,
    },
}

/// A component that defines a camera's projection parameters.
///
/// The view itself comes from the entity's `Transform`; the projection math
/// belongs to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 30)]
pub struct Camera {
    /// The type of projection (perspective or orthographic).
    pub projection: ProjectionType,
    /// The aspect ratio of the viewport (width / height).
    pub aspect_ratio: f32,
    /// The distance to the near clipping plane.
    pub z_near: f32,
    /// The distance to the far clipping plane.
    pub z_far: f32,
    /// Whether this camera is the primary camera.
    pub is_active: bool,
}

impl Camera {
    /// Creates a new perspective camera with the given parameters.
    pub fn new_perspective(fov_y_radians: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            projection: ProjectionType::Perspective { fov_y_radians },
            aspect_ratio,
            z_near,
            z_far,
            is_active: true,
        }
    }

    /// Creates a new orthographic camera with the given parameters.
    pub fn new_orthographic(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        let aspect_ratio = if height > 0.0 { width / height } else { 1.0 };
        Self {
            projection: ProjectionType::Orthographic { width, height },
            aspect_ratio,
            z_near,
            z_far,
            is_active: true,
        }
    }

    /// Updates the aspect ratio, typically called when the window is resized.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }
}

impl Default for Camera {
    /// A 60 degree, 16:9 perspective camera.
    fn default() -> Self {
        Self::new_perspective(60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0)
    }
}
