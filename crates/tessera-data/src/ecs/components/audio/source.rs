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

//! Defines the `AudioSource` component for emitting sound.

use serde::{Deserialize, Serialize};
use tessera_core::asset::{AssetHandle, Sound};
use tessera_macros::Component;

/// A component that makes an entity an emitter of sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 70)]
pub struct AudioSource {
    /// A handle to the sound data to be played.
    pub sound: AssetHandle<Sound>,
    /// The volume of the sound, where 1.0 is normal volume.
    pub volume: f32,
    /// Whether the sound should loop back to the beginning when it finishes.
    pub looping: bool,
    /// Whether the sound should start playing automatically when the scene starts.
    pub autoplay: bool,
}

impl AudioSource {
    /// Creates a new `AudioSource`.
    pub fn new(sound: AssetHandle<Sound>) -> Self {
        Self {
            sound,
            volume: 1.0,
            looping: false,
            autoplay: true,
        }
    }
}

impl Default for AudioSource {
    fn default() -> Self {
        Self::new(AssetHandle::INVALID)
    }
}
