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
use tessera_core::asset::{AssetHandle, Model, Texture};
use tessera_macros::Component;

/// Draws a model with the entity's `Transform`.
///
/// Both resources are referenced by handle; the rendering collaborator
/// resolves them every frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 50)]
pub struct MeshRenderer {
    /// The model to draw.
    pub model: AssetHandle<Model>,
    /// The albedo texture, or the invalid handle for an untextured model.
    pub texture: AssetHandle<Texture>,
    /// Whether the model occludes light.
    pub cast_shadows: bool,
}
