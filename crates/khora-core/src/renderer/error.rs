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

//! Defines the hierarchy of error types for the render hardware interface.

use crate::renderer::api::pipeline::PrimitiveType;
use crate::renderer::api::resource::{FramebufferStatus, SurfaceId};
use crate::renderer::api::vertex::VertexElementType;
use std::fmt;

/// Content or platform configuration the backend cannot express.
///
/// These indicate a bug in content or in the caller and are fatal by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A vertex element uses an encoding the backend has no attribute format for.
    UnsupportedElementType(VertexElementType),
    /// The primitive type has no native topology.
    UnsupportedPrimitiveType(PrimitiveType),
    /// A render target's storage cannot be attached to a framebuffer.
    UnsupportedSurfaceBacking {
        /// The offending surface.
        surface: SurfaceId,
    },
    /// A freshly created framebuffer failed its completeness check.
    IncompleteFramebuffer {
        /// The color target.
        color: Option<SurfaceId>,
        /// The depth target.
        depth: Option<SurfaceId>,
        /// The status reported by the driver.
        status: FramebufferStatus,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::UnsupportedElementType(ty) => {
                write!(f, "Unsupported vertex element type: {ty:?}")
            }
            ConfigurationError::UnsupportedPrimitiveType(ty) => {
                write!(f, "Unsupported primitive type: {ty:?}")
            }
            ConfigurationError::UnsupportedSurfaceBacking { surface } => {
                write!(f, "Render target {surface} has no attachable backing")
            }
            ConfigurationError::IncompleteFramebuffer {
                color,
                depth,
                status,
            } => {
                write!(
                    f,
                    "Framebuffer for color {} / depth {} is incomplete: {status}",
                    fmt_target(color),
                    fmt_target(depth)
                )
            }
        }
    }
}

fn fmt_target(id: &Option<SurfaceId>) -> String {
    id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

impl std::error::Error for ConfigurationError {}

/// A caller broke a usage contract of the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// An allocation was requested while the previous one is still outstanding.
    ScratchArenaBusy {
        /// The arena's label.
        arena: &'static str,
    },
    /// An allocation does not fit in the arena, even when it is empty.
    ScratchAllocationTooLarge {
        /// The arena's label.
        arena: &'static str,
        /// Requested size, rounded up to the arena's alignment.
        requested: usize,
        /// The arena's capacity.
        capacity: usize,
    },
    /// An `end_*_up` call had no matching `begin_*_up`.
    UpDrawNotBegun,
    /// A `begin_*_up` call was made while another immediate draw is pending.
    UpDrawInProgress,
    /// A stream index is outside the stream table.
    StreamIndexOutOfRange {
        /// The requested stream.
        stream: u32,
    },
    /// The index stride is not one the requested path supports.
    UnsupportedIndexStride {
        /// The stride in bytes.
        stride: u32,
    },
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::ScratchArenaBusy { arena } => {
                write!(f, "Scratch arena '{arena}' already has an outstanding allocation")
            }
            PreconditionError::ScratchAllocationTooLarge {
                arena,
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "Scratch arena '{arena}' cannot hold {requested} bytes (capacity {capacity})"
                )
            }
            PreconditionError::UpDrawNotBegun => {
                write!(f, "Immediate draw ended without a matching begin")
            }
            PreconditionError::UpDrawInProgress => {
                write!(f, "Immediate draw begun while another one is pending")
            }
            PreconditionError::StreamIndexOutOfRange { stream } => {
                write!(f, "Vertex stream index {stream} is out of range")
            }
            PreconditionError::UnsupportedIndexStride { stride } => {
                write!(f, "Unsupported index stride: {stride} bytes")
            }
        }
    }
}

impl std::error::Error for PreconditionError {}

/// The top-level error type of the render hardware interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RhiError {
    /// An error in content or platform configuration.
    Configuration(ConfigurationError),
    /// A usage contract was violated by the caller.
    Precondition(PreconditionError),
}

impl fmt::Display for RhiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RhiError::Configuration(err) => write!(f, "Configuration error: {err}"),
            RhiError::Precondition(err) => write!(f, "Precondition violated: {err}"),
        }
    }
}

impl std::error::Error for RhiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RhiError::Configuration(err) => Some(err),
            RhiError::Precondition(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for RhiError {
    fn from(err: ConfigurationError) -> Self {
        RhiError::Configuration(err)
    }
}

impl From<PreconditionError> for RhiError {
    fn from(err: PreconditionError) -> Self {
        RhiError::Precondition(err)
    }
}

impl RhiError {
    /// Returns `true` if this is a precondition violation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, RhiError::Precondition(_))
    }
}
