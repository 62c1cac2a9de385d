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

//! Format-level vocabulary shared by every scene loader.
//!
//! The scene data model itself lives in `tessera-data`; this module only
//! defines how a persisted scene is framed and how callers pick an encoding.

mod format;
mod serialization;

pub use format::*;
pub use serialization::*;
