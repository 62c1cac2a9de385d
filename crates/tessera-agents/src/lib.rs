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

//! # Tessera Agents
//!
//! The orchestration layer: the [`SerializationAgent`] picks a lane and owns
//! file handling, the [`SceneManager`] owns the loaded scenes and keeps
//! dependent subsystems in step with the active one.
//!
//! [`SerializationAgent`]: serialization_agent::SerializationAgent
//! [`SceneManager`]: scene_manager::SceneManager

#![warn(missing_docs)]

pub mod physics_agent;
pub mod scene_manager;
pub mod serialization_agent;
