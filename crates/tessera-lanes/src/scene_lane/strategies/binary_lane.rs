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

//! A serialization strategy writing a compact, versioned binary container.

use super::{DeserializationError, SerializationError, SerializationStrategy};
use bincode::config;
use tessera_core::{
    scene::{SceneFile, SceneFormat},
    SceneContext,
};
use tessera_data::{
    ecs::ComponentRegistry,
    scene::{snapshot, BinaryRecord, Scene, SerializedEntity},
};

/// Writes scenes as a [`SceneFile`]: the fixed header followed by the
/// bincode-encoded list of [`BinaryRecord`]s.
///
/// Each record carries the entity metadata and one named, bincode-encoded
/// entry per present component, so the binary form holds exactly the
/// content of the text document.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinarySceneLane;

impl BinarySceneLane {
    /// The identifier of this strategy, written into the header.
    pub const STRATEGY_ID: &'static str = "TS_BINARY_V1";

    /// Creates a new instance of the lane.
    pub fn new() -> Self {
        Self
    }
}

impl SerializationStrategy for BinarySceneLane {
    fn strategy_id(&self) -> &'static str {
        Self::STRATEGY_ID
    }

    fn format(&self) -> SceneFormat {
        SceneFormat::Binary
    }

    fn serialize(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
    ) -> Result<Vec<u8>, SerializationError> {
        let records = snapshot::capture(scene, registry)
            .iter_mut()
            .map(|record| record.write_binary(registry))
            .collect::<Result<Vec<_>, _>>()?;

        let payload = bincode::encode_to_vec(&records, config::standard())?;
        let file = SceneFile::new(Self::STRATEGY_ID, payload)?;
        log::debug!(
            "{} wrote {} entities in a {} byte payload",
            Self::STRATEGY_ID,
            records.len(),
            file.payload.len()
        );
        Ok(file.to_bytes())
    }

    fn deserialize(
        &self,
        data: &[u8],
        name: &str,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, DeserializationError> {
        let file = SceneFile::from_bytes(data)?;
        let found = file.header.strategy_id_str()?;
        if found != Self::STRATEGY_ID {
            return Err(DeserializationError::StrategyMismatch {
                expected: Self::STRATEGY_ID,
                found: found.to_owned(),
            });
        }

        let (records, read): (Vec<BinaryRecord>, usize) =
            bincode::decode_from_slice(&file.payload, config::standard())?;
        if read != file.payload.len() {
            return Err(DeserializationError::TrailingBytes(file.payload.len() - read));
        }

        let records = records
            .iter()
            .map(|record| SerializedEntity::read_binary(record, registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshot::restore(name, records, ctx, registry)?)
    }
}
