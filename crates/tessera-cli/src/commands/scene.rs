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

use crate::helpers::*;
use anyhow::{Context, Result};
use std::path::Path;
use tessera_agents::serialization_agent::SerializationAgent;
use tessera_core::{scene::SceneFormat, SceneContext};
use tessera_data::{
    ecs::ComponentRegistry,
    scene::{Entity, Scene},
};

fn load(agent: &SerializationAgent, path: &Path) -> Result<Scene> {
    let mut ctx = SceneContext::new();
    agent
        .load_from_path(path, &mut ctx, &ComponentRegistry::global())
        .with_context(|| format!("Failed to load scene '{}'", path.display()))
}

/// One line per entity: GUID, name, flags, parent and components.
pub fn describe_entity(entity: Entity<'_>, registry: &ComponentRegistry) -> String {
    let meta = entity.metadata();
    let components: Vec<&str> = registry
        .iter()
        .filter(|descriptor| descriptor.present(entity))
        .map(|descriptor| descriptor.name())
        .collect();

    let mut line = format!("{} \"{}\"", meta.guid(), meta.name);
    if !meta.tag.is_empty() {
        line.push_str(&format!(" #{}", meta.tag));
    }
    if !meta.active {
        line.push_str(" (inactive)");
    }
    if meta.has_parent() {
        line.push_str(&format!(" <- {}", meta.parent_entity));
    }
    line.push_str(&format!(" [{}]", components.join(", ")));
    line
}

pub fn inspect(agent: &SerializationAgent, path: &Path) -> Result<()> {
    print_task_start(&format!("Inspecting {}", path.display()));
    let scene = load(agent, path)?;
    let registry = ComponentRegistry::global();

    println!(
        "{}Scene:{} {} ({} entities)",
        BOLD,
        RESET,
        scene.name(),
        scene.len()
    );
    for entity in scene.iter() {
        println!("  {}", describe_entity(entity, &registry));
    }
    Ok(())
}

/// Rewrites `input` as `output`. Without an explicit `format` the output
/// extension decides, then the configured default.
pub fn convert(
    agent: &SerializationAgent,
    input: &Path,
    output: &Path,
    format: Option<SceneFormat>,
) -> Result<SceneFormat> {
    print_task_start(&format!("Converting {}", input.display()));
    let scene = load(agent, input)?;
    let format = format
        .or_else(|| SceneFormat::from_path(output))
        .unwrap_or(agent.settings().default_format);

    agent
        .save_to_path_as(&scene, &ComponentRegistry::global(), output, format)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    print_success(&format!(
        "Wrote {} entities to '{}' as {format}",
        scene.len(),
        output.display()
    ));
    Ok(format)
}

/// Loads the scene and reports its structural issues. Returns how many
/// were found.
pub fn validate(agent: &SerializationAgent, path: &Path) -> Result<usize> {
    print_task_start(&format!("Validating {}", path.display()));
    let scene = load(agent, path)?;

    let issues = scene.validate();
    for issue in &issues {
        print_warning(&issue.to_string());
    }
    if issues.is_empty() {
        print_success(&format!("{} entities, no issues", scene.len()));
    }
    Ok(issues.len())
}
