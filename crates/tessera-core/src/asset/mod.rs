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

//! Provides the foundational traits and primitive types for Tessera's asset boundary.
//!
//! Components never own heavyweight resources. They hold an [`AssetHandle<T>`],
//! a small typed id, and an external asset collaborator resolves it on demand
//! through [`AssetResolver`]. Nothing in this module performs I/O.

mod handle;

pub use handle::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits enforce that handles to the asset may be shared across
/// threads and stored for the lifetime of the application.
///
/// # Examples
///
/// ```
/// use tessera_core::asset::Asset;
///
/// struct Texture {
///     // ... fields
/// }
///
/// impl Asset for Texture {}
/// ```
pub trait Asset: Send + Sync + 'static {}

/// Type-level tag for texture resources.
///
/// The concrete texture type lives with the rendering collaborator; the scene
/// core only needs the tag to keep handles of different kinds apart.
#[derive(Debug)]
pub enum Texture {}
impl Asset for Texture {}

/// Type-level tag for model (mesh) resources.
#[derive(Debug)]
pub enum Model {}
impl Asset for Model {}

/// Type-level tag for sound resources.
#[derive(Debug)]
pub enum Sound {}
impl Asset for Sound {}

/// The resolution contract implemented by asset collaborators.
///
/// Resolution is keyed by `(T, id)`. The invalid handle (id `0`) must never
/// resolve to a resource, and a handle whose referent was unloaded simply
/// stops resolving; callers re-resolve every time they need the resource.
pub trait AssetResolver<T: Asset> {
    /// The live resource a handle of kind `T` resolves to.
    type Resource: ?Sized;

    /// Returns the resource behind `handle`, if it is currently loaded.
    fn resolve(&self, handle: AssetHandle<T>) -> Option<&Self::Resource>;
}
