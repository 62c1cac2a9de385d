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

//! # Tessera Core
//!
//! Foundational crate containing the identity types, asset handles, file
//! container format, and collaborator contracts that the rest of the Tessera
//! workspace builds on. It knows nothing about concrete components or
//! storage; those live in `tessera-data`.

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod context;
pub mod ecs;
pub mod inspector;
pub mod math;
pub mod physics;
pub mod scene;
pub mod scripting;

pub use config::SerializationSettings;
pub use context::SceneContext;
