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

use serde::{Deserialize, Serialize};
use tessera_core::inspector::InspectorUi;
use tessera_core::math::{Quaternion, Vec3};
use tessera_core::physics::{BodyType, RigidBodyDesc, RigidBodyHandle};

use crate::ecs::{inspect_fields, Component, Transform};
use crate::scene::EntityMut;

/// Component representing a rigid body in the physics simulation.
///
/// Attaching it registers a body with the physics collaborator of the scene
/// context (if there is one); detaching it releases the body. The runtime
/// handle is never persisted, so a loaded scene gets fresh bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Opaque handle used by the physics provider.
    #[serde(skip)]
    pub handle: Option<RigidBodyHandle>,
    /// Global type of the body (Static, Dynamic, Kinematic).
    pub body_type: BodyType,
    /// Mass of the body in kilograms.
    pub mass: f32,
    /// Whether to enable Continuous Collision Detection (CCD).
    pub ccd_enabled: bool,
    /// Current linear velocity.
    pub linear_velocity: Vec3,
    /// Current angular velocity.
    pub angular_velocity: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new_dynamic(1.0)
    }
}

impl RigidBody {
    /// Creates a new dynamic rigid body.
    pub fn new_dynamic(mass: f32) -> Self {
        Self {
            handle: None,
            body_type: BodyType::Dynamic,
            mass,
            ccd_enabled: false,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// Creates a new static rigid body.
    pub fn new_static() -> Self {
        Self {
            body_type: BodyType::Static,
            mass: 0.0,
            ..Self::new_dynamic(0.0)
        }
    }
}

impl Component for RigidBody {
    const NAME: &'static str = "RigidBody";

    fn on_added(entity: &mut EntityMut<'_>) {
        let (position, rotation) = entity
            .try_get::<Transform>()
            .map(|t| (t.translation, t.rotation))
            .unwrap_or((Vec3::ZERO, Quaternion::IDENTITY));
        let body = entity.get::<RigidBody>();
        let desc = RigidBodyDesc {
            position,
            rotation,
            body_type: body.body_type,
            linear_velocity: body.linear_velocity,
            angular_velocity: body.angular_velocity,
            mass: body.mass,
        };

        let Some(physics) = entity.context().physics_mut() else {
            return;
        };
        let handle = physics.add_body(desc);
        log::trace!("Registered physics body {handle:?} for entity {}", entity.guid());
        entity.get_mut::<RigidBody>().handle = Some(handle);
    }

    fn on_removed(entity: &mut EntityMut<'_>) {
        let Some(handle) = entity.get::<RigidBody>().handle else {
            return;
        };
        if let Some(physics) = entity.context().physics_mut() {
            physics.remove_body(handle);
            log::trace!("Released physics body {handle:?}");
        }
    }

    fn render_inspector(entity: &mut EntityMut<'_>, ui: &mut dyn InspectorUi) {
        let current = entity.get::<RigidBody>();
        let handle = current.handle;
        if let Some(mut edited) = inspect_fields(current, ui) {
            edited.handle = handle;
            *entity.get_mut::<RigidBody>() = edited;
        }
    }
}

crate::register_component!(RigidBody, 10);
