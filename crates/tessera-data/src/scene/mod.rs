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

//! Scenes, entity views, and the save/load algorithms.

mod definition;
mod entity;
mod error;
mod metadata;
#[allow(clippy::module_inception)]
mod scene;
pub mod snapshot;
mod validate;

pub use definition::*;
pub use entity::*;
pub use error::SceneError;
pub use metadata::EntityMetadata;
pub use scene::Scene;
pub use snapshot::{capture, restore};
pub use validate::ValidationIssue;

#[cfg(test)]
mod tests;
