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
use tessera_core::asset::AssetHandle;
use tessera_macros::Component;

use crate::scene::Scene;

/// Nests another scene under this entity.
///
/// The nested scene is an asset like any other: only its handle is stored
/// here and persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Component)]
#[component(order = 90)]
pub struct SubScene {
    /// The nested scene.
    pub scene: AssetHandle<Scene>,
    /// Whether the nested scene should be instantiated when this scene starts.
    pub load_on_start: bool,
}
