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

//! The backing store and the component registry.
//!
//! The [`World`] stores values per entity and knows nothing about hooks or
//! the catalogue. The [`ComponentRegistry`] is the closed list of catalogue
//! types and the only way generic code reaches them.

mod archive;
mod component;
mod components;
mod entity_store;
mod finite;
mod registry;
mod storage;
mod value;
mod world;

pub use archive::*;
pub use component::*;
pub use components::*;
pub use registry::*;
pub use value::ComponentValue;
pub use world::World;
