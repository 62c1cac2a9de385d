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

//! The component catalogue.
//!
//! Each type registers itself in the global catalogue; the position key
//! fixes its place in scene files.

mod audio;
mod camera;
mod light;
mod mesh_renderer;
mod physics;
mod sprite_renderer;
mod sub_scene;
mod transform;

pub use audio::*;
pub use camera::*;
pub use light::*;
pub use mesh_renderer::*;
pub use physics::*;
pub use sprite_renderer::*;
pub use sub_scene::*;
pub use transform::*;
