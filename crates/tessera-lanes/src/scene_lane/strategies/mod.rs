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

//! Defines the abstract contract for serialization strategies and their associated types.
//!
//! The core of this module is the [`SerializationStrategy`] trait, which provides
//! a unified interface for all serialization lanes. This allows the `SerializationAgent`
//! to manage and dispatch tasks to different strategies polymorphically.

mod binary_lane;
mod json_lane;
mod ron_lane;

pub use binary_lane::BinarySceneLane;
pub use json_lane::JsonSceneLane;
pub use ron_lane::RonSceneLane;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tessera_core::{
    scene::{HeaderError, SceneFormat},
    SceneContext,
};
use tessera_data::{
    ecs::ComponentRegistry,
    scene::{snapshot, Scene, SceneError, SerializedEntity},
};
use thiserror::Error;

/// An error that can occur during the serialization process.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// A component could not be written.
    #[error("Serialization failed: {0}")]
    Scene(#[from] SceneError),
    /// The JSON encoder failed.
    #[error("Serialization failed: JSON encoding - {0}")]
    Json(#[from] serde_json::Error),
    /// The RON encoder failed.
    #[error("Serialization failed: RON encoding - {0}")]
    Ron(#[from] ron::Error),
    /// The binary encoder failed.
    #[error("Serialization failed: binary encoding - {0}")]
    Binary(#[from] bincode::error::EncodeError),
    /// The payload could not be wrapped in a scene container.
    #[error("Serialization failed: {0}")]
    Header(#[from] HeaderError),
}

/// An error that can occur during the deserialization process.
///
/// Every variant is raised before a scene is handed back, so a failed load
/// never produces a partial scene.
#[derive(Debug, Error)]
pub enum DeserializationError {
    /// The binary container is missing, truncated, or of another version.
    #[error("Deserialization failed: Invalid format - {0}")]
    Header(#[from] HeaderError),
    /// The container was written by another strategy.
    #[error("Deserialization failed: payload written by `{found}`, expected `{expected}`")]
    StrategyMismatch {
        /// The id of the lane asked to decode.
        expected: &'static str,
        /// The id found in the header.
        found: String,
    },
    /// The JSON document is malformed.
    #[error("Deserialization failed: Invalid format - {0}")]
    Json(#[from] serde_json::Error),
    /// The RON document is malformed.
    #[error("Deserialization failed: Invalid format - {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// The binary payload is malformed.
    #[error("Deserialization failed: Invalid format - {0}")]
    Binary(#[from] bincode::error::DecodeError),
    /// The binary payload has bytes left after the last record.
    #[error("Deserialization failed: Invalid format - {0} trailing bytes after the last record")]
    TrailingBytes(usize),
    /// A record could not be turned into an entity.
    #[error("Deserialization failed: Scene population - {0}")]
    Scene(#[from] SceneError),
}

/// The abstract contract for a scene serialization strategy lane.
///
/// Each concrete implementation of this trait represents a different method
/// of converting a [`Scene`] to and from a persistent format. Lanes are
/// stateless between calls.
pub trait SerializationStrategy: Send + Sync {
    /// Returns the unique, versioned string identifier for this strategy.
    ///
    /// Binary lanes write it into the `SceneHeader`; the agent uses it to
    /// route a payload back to the lane that produced it.
    /// Example: `"TS_BINARY_V1"`.
    fn strategy_id(&self) -> &'static str;

    /// The format this lane reads and writes.
    fn format(&self) -> SceneFormat;

    /// Serializes every entity of `scene` into a byte payload.
    ///
    /// # Arguments
    /// * `scene` - The scene to be serialized.
    /// * `registry` - The component catalogue that decides which fields are written.
    fn serialize(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
    ) -> Result<Vec<u8>, SerializationError>;

    /// Builds a new scene named `name` from a byte payload.
    ///
    /// Restored components are attached through `registry`, so their
    /// `on_added` hooks run against `ctx`.
    fn deserialize(
        &self,
        data: &[u8],
        name: &str,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, DeserializationError>;
}

/// The top-level JSON document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct SceneDocument {
    pub(crate) entities: Vec<Map<String, Value>>,
}

impl SceneDocument {
    pub(crate) fn capture(
        scene: &Scene,
        registry: &ComponentRegistry,
    ) -> Result<Self, SerializationError> {
        let entities = snapshot::capture(scene, registry)
            .iter_mut()
            .map(|record| record.write_json(registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entities })
    }

    pub(crate) fn restore(
        &self,
        name: &str,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, DeserializationError> {
        let records = self
            .entities
            .iter()
            .map(|map| SerializedEntity::read_json(map, registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshot::restore(name, records, ctx, registry)?)
    }
}
