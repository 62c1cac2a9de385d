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
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tessera_core::SerializationSettings;

/// Represents the structure of the `Tessera.toml` configuration file.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct TesseraConfig {
    /// How scenes are written.
    pub serialization: SerializationSettings,
}

/// Loads the configuration at `path`, or the defaults if there is no file.
pub fn load_config(path: &Path) -> Result<TesseraConfig> {
    if !path.exists() {
        log::debug!("No '{}' found. Using default configuration.", path.display());
        return Ok(TesseraConfig::default());
    }

    print_info(&format!("Found '{}'. Loading configuration.", path.display()));
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
    parse_config(&config_str)
        .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
}

fn parse_config(text: &str) -> Result<TesseraConfig> {
    Ok(toml::from_str(text)?)
}
