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

//! The agent responsible for managing scene serialization.
//!
//! This agent acts as the primary entry point for all serialization tasks. It holds a
//! registry of available [`SerializationStrategy`] lanes, selects one from a
//! [`SceneFormat`] or a [`SerializationGoal`], detects the format of incoming
//! bytes, and performs the file I/O.

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tessera_core::{
    scene::{HeaderError, SceneFile, SceneFormat, SceneHeader, SerializationGoal},
    SceneContext, SerializationSettings,
};
use tessera_data::{ecs::ComponentRegistry, scene::Scene};
use tessera_lanes::scene_lane::{
    BinarySceneLane, DeserializationError, JsonSceneLane, RonSceneLane, SerializationError,
    SerializationStrategy,
};
use thiserror::Error;

/// The name given to scenes loaded from bytes without a file name.
pub const UNTITLED_SCENE: &str = "Untitled";

/// An error that can occur within the `SerializationAgent`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No registered strategy handles the requested format or id.
    #[error("no serialization strategy registered for `{0}`")]
    StrategyNotFound(String),
    /// The scene file header is invalid or corrupted.
    #[error("invalid scene header: {0}")]
    InvalidHeader(#[from] HeaderError),
    /// The selected lane failed to encode the scene.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// The selected lane rejected the payload.
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
    /// The file could not be read or written.
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// The agent responsible for the entire scene serialization process.
pub struct SerializationAgent {
    /// A registry of all available serialization strategies, keyed by their unique ID.
    strategies: HashMap<&'static str, Box<dyn SerializationStrategy>>,
    settings: SerializationSettings,
}

impl SerializationAgent {
    /// Creates a new `SerializationAgent` with default settings and all
    /// built-in strategies.
    pub fn new() -> Self {
        Self::with_settings(SerializationSettings::default())
    }

    /// Creates an agent configured by `settings`.
    pub fn with_settings(settings: SerializationSettings) -> Self {
        let pretty = settings.pretty;
        let mut agent = Self {
            strategies: HashMap::new(),
            settings,
        };
        agent.register_strategy(JsonSceneLane::new().with_pretty(pretty));
        agent.register_strategy(RonSceneLane::new().with_pretty(pretty));
        agent.register_strategy(BinarySceneLane::new());
        agent
    }

    /// Adds a strategy, replacing any strategy registered under the same id.
    pub fn register_strategy(&mut self, strategy: impl SerializationStrategy + 'static) {
        let id = strategy.strategy_id();
        if self.strategies.insert(id, Box::new(strategy)).is_some() {
            log::warn!("Replaced serialization strategy {id}");
        }
    }

    /// The settings the agent was built with.
    pub fn settings(&self) -> &SerializationSettings {
        &self.settings
    }

    /// Returns the strategy writing `format`.
    pub fn strategy_for(
        &self,
        format: SceneFormat,
    ) -> Result<&dyn SerializationStrategy, AgentError> {
        self.strategies
            .values()
            .find(|strategy| strategy.format() == format)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| AgentError::StrategyNotFound(format.to_string()))
    }

    fn strategy_by_id(&self, id: &str) -> Result<&dyn SerializationStrategy, AgentError> {
        self.strategies
            .get(id)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| AgentError::StrategyNotFound(id.to_owned()))
    }

    /// Serializes `scene` in `format`.
    pub fn save_scene(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
        format: SceneFormat,
    ) -> Result<Vec<u8>, AgentError> {
        let strategy = self.strategy_for(format)?;
        let bytes = strategy.serialize(scene, registry)?;
        log::info!(
            "Saved scene `{}` ({} entities) with {}",
            scene.name(),
            scene.len(),
            strategy.strategy_id()
        );
        Ok(bytes)
    }

    /// Serializes `scene` in the format that best serves `goal`.
    pub fn save_scene_for_goal(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
        goal: SerializationGoal,
    ) -> Result<(SceneFormat, Vec<u8>), AgentError> {
        let format = SceneFormat::for_goal(goal);
        log::debug!("Goal {goal:?} selects the {format} format");
        Ok((format, self.save_scene(scene, registry, format)?))
    }

    /// Decides how `bytes` should be read.
    ///
    /// The binary magic wins over everything; otherwise the hint is used, and
    /// without a hint the bytes are taken to be JSON.
    pub fn detect_format(bytes: &[u8], hint: Option<SceneFormat>) -> SceneFormat {
        if SceneFile::is_scene_file(bytes) {
            SceneFormat::Binary
        } else {
            hint.unwrap_or(SceneFormat::Json)
        }
    }

    /// Builds a scene named `name` from `bytes`.
    ///
    /// Binary payloads are routed by the strategy id in their header. Nothing
    /// is returned unless the whole payload was read successfully.
    pub fn load_scene(
        &self,
        bytes: &[u8],
        name: &str,
        hint: Option<SceneFormat>,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, AgentError> {
        let strategy = match Self::detect_format(bytes, hint) {
            SceneFormat::Binary if SceneFile::is_scene_file(bytes) => {
                let header = SceneHeader::from_bytes(bytes)?;
                self.strategy_by_id(header.strategy_id_str()?)?
            }
            format => self.strategy_for(format)?,
        };

        let scene = strategy.deserialize(bytes, name, ctx, registry)?;
        log::info!(
            "Loaded scene `{name}` ({} entities) with {}",
            scene.len(),
            strategy.strategy_id()
        );
        Ok(scene)
    }

    /// Writes `scene` to `path` in the format named by its extension, or
    /// in the configured default format. Returns the format used.
    pub fn save_to_path(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
        path: impl AsRef<Path>,
    ) -> Result<SceneFormat, AgentError> {
        let path = path.as_ref();
        let format = SceneFormat::from_path(path).unwrap_or(self.settings.default_format);
        self.save_to_path_as(scene, registry, path, format)?;
        Ok(format)
    }

    /// Writes `scene` to `path` in `format`.
    ///
    /// With atomic writes enabled the bytes go to a temporary file next to
    /// `path` that replaces it only once fully written, so a failed save
    /// leaves any previous file untouched.
    pub fn save_to_path_as(
        &self,
        scene: &Scene,
        registry: &ComponentRegistry,
        path: impl AsRef<Path>,
        format: SceneFormat,
    ) -> Result<(), AgentError> {
        let path = path.as_ref();
        let bytes = self.save_scene(scene, registry, format)?;
        let written = if self.settings.atomic_writes {
            write_atomic(path, &bytes)
        } else {
            fs::write(path, &bytes)
        };
        written.map_err(|source| AgentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Loads the scene stored at `path`, named after the file stem.
    pub fn load_from_path(
        &self,
        path: impl AsRef<Path>,
        ctx: &mut SceneContext,
        registry: &ComponentRegistry,
    ) -> Result<Scene, AgentError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| AgentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(UNTITLED_SCENE);
        self.load_scene(&bytes, name, SceneFormat::from_path(path), ctx, registry)
    }
}

impl Default for SerializationAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
