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

use std::any::Any;
use tessera_data::scene::Scene;

/// A subsystem that caches per-scene state keyed by in-memory entity keys.
///
/// Such caches are only valid for the scene they were built from. The
/// [`SceneManager`](super::SceneManager) clears and rebuilds every
/// registered dependent whenever the active scene changes, before anyone can
/// observe the new scene.
pub trait SceneDependent: Any + Send {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// Drops everything derived from the previous scene.
    fn clear(&mut self);

    /// Rebuilds the cache by scanning `scene`.
    fn rebuild(&mut self, scene: &Scene);

    /// Returns a reference to the dependent as a `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to the dependent as a `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
