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

//! Provides the public, backend-agnostic contracts of the render hardware interface.
//!
//! This module defines the "common language" between the engine's drawing code
//! and a native graphics backend: pipeline-state descriptors, vertex
//! declarations, native handles, the traits resources and the shader subsystem
//! implement, and the error types of the dispatch path.
//!
//! The 'how' lives in `khora-infra`, whose GLES dispatch core implements these
//! contracts on top of a [`NativeGl`] context.

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::{ConfigurationError, PreconditionError, RhiError};
pub use self::traits::{
    ActiveShader, IndexBufferResource, NativeGl, RenderSurface, SurfaceInfo,
    VertexBufferResource,
};
