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

//! Capability traits implemented by resource objects that own GPU memory.
//!
//! The dispatch core never downcasts a resource: it asks for exactly the
//! capability it needs and resolves it into a plain value once per call.

use crate::renderer::api::{GlBuffer, SurfaceBacking, SurfaceId};

/// A surface that can be bound as a color or depth render target.
pub trait RenderSurface {
    /// The surface's stable identity.
    fn unique_id(&self) -> SurfaceId;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// The storage backing the surface.
    fn backing(&self) -> SurfaceBacking;

    /// `true` for a depth surface that exists only to satisfy an API contract
    /// and must not be attached.
    fn is_placeholder(&self) -> bool {
        false
    }
}

/// A persistent vertex buffer.
pub trait VertexBufferResource {
    /// The native buffer object.
    fn native_buffer(&self) -> GlBuffer;
}

/// A persistent index buffer.
pub trait IndexBufferResource {
    /// The native buffer object.
    fn native_buffer(&self) -> GlBuffer;

    /// Bytes per index, 2 or 4.
    fn index_stride(&self) -> u32;
}

/// A render target resolved to the values the dispatcher keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceInfo {
    /// The surface's identity.
    pub id: SurfaceId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// The storage backing the surface.
    pub backing: SurfaceBacking,
    /// Whether the surface is a placeholder.
    pub placeholder: bool,
}

impl SurfaceInfo {
    /// Resolves a surface's capabilities.
    pub fn of(surface: &dyn RenderSurface) -> Self {
        Self {
            id: surface.unique_id(),
            width: surface.width(),
            height: surface.height(),
            backing: surface.backing(),
            placeholder: surface.is_placeholder(),
        }
    }

    /// Returns `true` if both surfaces have the same dimensions.
    pub fn same_size(&self, other: &SurfaceInfo) -> bool {
        self.width == other.width && self.height == other.height
    }
}
