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

//! # Physics Collaborator Contract
//!
//! The scene core never simulates anything. A component that needs a physics
//! body (see `RigidBody` in `tessera-data`) asks the provider held by the
//! [`SceneContext`](crate::context::SceneContext) for one when it is attached
//! and hands it back when it is detached.

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// Opaque handle to a rigid body owned by the physics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RigidBodyHandle(pub u64);

/// Defines the type of a rigid body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Responds to forces and collisions.
    #[default]
    Dynamic,
    /// Fixed in place, does not move.
    Static,
    /// Controlled by the user, not by forces.
    Kinematic,
}

/// Description for creating a rigid body.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyDesc {
    /// Initial position.
    pub position: Vec3,
    /// Initial rotation.
    pub rotation: Quaternion,
    /// Body type.
    pub body_type: BodyType,
    /// Linear velocity.
    pub linear_velocity: Vec3,
    /// Angular velocity.
    pub angular_velocity: Vec3,
    /// Mass of the body in kg (dynamic only).
    pub mass: f32,
}

/// Interface contract for any physics engine implementation.
///
/// Only the body lifecycle is part of the contract: stepping, queries, and
/// collider management stay private to the provider.
pub trait PhysicsProvider: Send + Sync {
    /// Adds a rigid body to the simulation.
    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle;

    /// Removes a rigid body from the simulation.
    ///
    /// Removing an unknown handle is a no-op.
    fn remove_body(&mut self, handle: RigidBodyHandle);
}
