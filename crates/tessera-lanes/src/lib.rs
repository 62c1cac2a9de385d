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

//! # Tessera Lanes
//!
//! The serialization strategies ("lanes") that turn a [`Scene`] into bytes
//! and back. Each lane implements one [`SceneFormat`]; the agents layer picks
//! the lane and owns the file handling.
//!
//! [`Scene`]: tessera_data::scene::Scene
//! [`SceneFormat`]: tessera_core::scene::SceneFormat

#![warn(missing_docs)]

pub mod scene_lane;
