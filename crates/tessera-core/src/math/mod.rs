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

//! Plain-data math primitives carried by scene components.
//!
//! These types only need to be stored, compared, and persisted by the scene
//! core. Anything heavier (matrices, culling volumes) belongs to the rendering
//! and physics collaborators.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub mod color;
pub mod quaternion;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::quaternion::Quaternion;
pub use self::vector::Vec3;

/// Compares two floats with the crate-wide [`EPSILON`] tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
