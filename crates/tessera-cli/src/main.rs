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

// Scene tooling for Tessera
// Run with: tessera <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tessera_agents::serialization_agent::SerializationAgent;
use tessera_core::scene::SceneFormat;

use crate::commands::{scene, tessera_config};

#[derive(Parser)]
#[command(name = "tessera", version, about = "Inspect, convert and validate Tessera scene files")]
struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = "Tessera.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every entity of a scene with its components
    Inspect {
        /// Scene file (.json, .ron or .tscene)
        file: PathBuf,
    },
    /// Rewrite a scene in another format
    Convert {
        /// Scene file to read
        input: PathBuf,
        /// Scene file to write
        output: PathBuf,
        /// Output format: json, ron or binary (defaults to the output extension)
        #[arg(long)]
        format: Option<SceneFormat>,
    },
    /// Check the parent hierarchy of a scene; fails if any issue is found
    Validate {
        /// Scene file (.json, .ron or .tscene)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = tessera_config::load_config(&cli.config)?;
    let agent = SerializationAgent::with_settings(config.serialization);

    match cli.command {
        Commands::Inspect { file } => scene::inspect(&agent, &file),
        Commands::Convert {
            input,
            output,
            format,
        } => scene::convert(&agent, &input, &output, format).map(|_| ()),
        Commands::Validate { file } => {
            let issues = scene::validate(&agent, &file)?;
            if issues > 0 {
                helpers::print_error(&format!("{issues} issue(s) found"));
                anyhow::bail!("'{}' failed validation", file.display());
            }
            Ok(())
        }
    }
}
