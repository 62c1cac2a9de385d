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

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tessera_core::{
    asset::AssetHandle,
    ecs::EntityHandle,
    math::{Quaternion, Vec3},
    physics::{BodyType, PhysicsProvider, RigidBodyDesc, RigidBodyHandle},
    SceneContext,
};
use tessera_data::{
    ecs::{AudioSource, Camera, Collider, Light, MeshRenderer, RigidBody, Transform},
    scene::Scene,
};

/// A physics world that only records which bodies exist.
#[derive(Clone, Default)]
pub struct FakePhysics {
    pub bodies: Arc<Mutex<BTreeMap<u64, RigidBodyDesc>>>,
    next: Arc<Mutex<u64>>,
}

impl FakePhysics {
    pub fn live_bodies(&self) -> Vec<RigidBodyHandle> {
        self.bodies
            .lock()
            .unwrap()
            .keys()
            .map(|id| RigidBodyHandle(*id))
            .collect()
    }
}

impl PhysicsProvider for FakePhysics {
    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        self.bodies.lock().unwrap().insert(*next, desc);
        RigidBodyHandle(*next)
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.lock().unwrap().remove(&handle.0);
    }
}

/// The two-entity scene: Player (g1) with a transform and a rigid body,
/// Child (g2) parented to it with a transform.
pub fn player_and_child(ctx: &mut SceneContext) -> Scene {
    let mut scene = Scene::new("Level");
    {
        let mut player = scene
            .create_entity_with_guid(ctx, EntityHandle::from("g1"), "Player")
            .unwrap();
        player.add_component(Transform {
            translation: Vec3::new(4.0, -1.5, 0.25),
            rotation: Quaternion::IDENTITY,
            scale: Vec3::new(2.0, 2.0, 2.0),
        });
        player.add_component(RigidBody {
            body_type: BodyType::Dynamic,
            mass: 80.0,
            linear_velocity: Vec3::new(0.0, 3.0, 0.0),
            ..Default::default()
        });
    }
    {
        let mut child = scene
            .create_entity_with_guid(ctx, EntityHandle::from("g2"), "Child")
            .unwrap();
        child.set_parent(Some(&EntityHandle::from("g1")));
        child.add_component(Transform::default());
    }
    scene
}

/// A scene touching most of the catalogue.
pub fn furnished_scene(ctx: &mut SceneContext) -> Scene {
    let mut scene = player_and_child(ctx);
    {
        let mut camera = scene.create_entity(ctx, "Camera");
        camera.add_component(Transform::default());
        camera.add_component(Camera::default());
        camera.metadata_mut().tag = "MainCamera".to_owned();
    }
    {
        let mut lamp = scene.create_entity(ctx, "Lamp");
        lamp.add_component(Light::point(12.0));
        lamp.metadata_mut().active = false;
    }
    {
        let mut crate_entity = scene.create_entity(ctx, "Crate");
        crate_entity.add_component(Transform::default());
        crate_entity.add_component(MeshRenderer {
            model: AssetHandle::new(3),
            texture: AssetHandle::new(9),
            cast_shadows: true,
        });
        crate_entity.add_component(Collider::default());
        crate_entity.add_component(AudioSource::new(AssetHandle::new(5)));
    }
    scene
}
