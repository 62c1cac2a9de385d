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
use tessera_core::asset::{AssetHandle, Texture};
use tessera_core::math::LinearRgba;
use tessera_macros::Component;

/// Draws a textured quad with the entity's `Transform`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 60)]
pub struct SpriteRenderer {
    /// The sprite image.
    pub texture: AssetHandle<Texture>,
    /// Color multiplied with the texture.
    pub tint: LinearRgba,
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            texture: AssetHandle::INVALID,
            tint: LinearRgba::WHITE,
            flip_x: false,
            flip_y: false,
        }
    }
}
