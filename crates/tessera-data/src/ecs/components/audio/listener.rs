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

//! Defines the `AudioListener` component for 3D spatial audio.

use serde::{Deserialize, Serialize};
use tessera_macros::Component;

/// A component that defines the point of audition in the scene.
///
/// There should typically be only one `AudioListener` in a scene, attached
/// to the entity that represents the player or the main camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 80)]
pub struct AudioListener {
    /// Master gain applied to everything this listener hears.
    pub gain: f32,
}

impl Default for AudioListener {
    fn default() -> Self {
        Self { gain: 1.0 }
    }
}
