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

//! Entity identity: the in-memory key and the durable GUID.
//!
//! An [`EntityId`] is only meaningful inside the running process and the
//! scene that issued it. An [`EntityHandle`] survives save/load and is the
//! only supported way to reference one entity from another.

pub mod entity;
pub mod guid;

pub use entity::EntityId;
pub use guid::{EntityHandle, IdGenerator, SeededIdGenerator, UuidGenerator};
