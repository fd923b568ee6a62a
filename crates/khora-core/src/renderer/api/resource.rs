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

//! Native object handles and the resource descriptions the dispatch core reads
//! from render targets and buffers.

use std::fmt;
use std::num::NonZeroU16;

/// A native buffer object name. `GlBuffer::NONE` unbinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlBuffer(pub u32);

impl GlBuffer {
    /// The reserved "no buffer" name.
    pub const NONE: Self = Self(0);
}

/// A native texture object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlTexture(pub u32);

/// A native renderbuffer object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlRenderbuffer(pub u32);

/// A native framebuffer object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlFramebuffer(pub u32);

impl GlFramebuffer {
    /// The window-system provided framebuffer (the back buffer).
    pub const DEFAULT: Self = Self(0);
}

/// The stable identity of a render target surface.
///
/// Identities are 16 bits wide because a framebuffer is keyed by a
/// `(color, depth)` pair packed into 32 bits. Zero is reserved for "no target".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(NonZeroU16);

impl SurfaceId {
    /// Creates an identity, or `None` for the reserved value 0.
    pub const fn new(id: u16) -> Option<Self> {
        match NonZeroU16::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw identity.
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pixel formats the framebuffer path needs to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// 8-bit RGBA color.
    Rgba8,
    /// 5-6-5 packed color.
    Rgb565,
    /// Combined 24-bit depth and 8-bit stencil.
    DepthStencil,
    /// Depth-only format used for shadow maps. Has no stencil component.
    ShadowDepth,
}

impl SurfaceFormat {
    /// Returns `true` if the format carries a stencil component.
    pub fn has_stencil(self) -> bool {
        matches!(self, SurfaceFormat::DepthStencil)
    }
}

/// What storage backs a render target surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceBacking {
    /// The window's back buffer. Only pairs with the default depth buffer.
    DefaultBackBuffer,
    /// A renderbuffer, with a separate stencil renderbuffer for depth targets
    /// that carry one.
    Renderbuffer {
        /// The color or depth renderbuffer.
        buffer: GlRenderbuffer,
        /// The stencil renderbuffer, if any.
        stencil: Option<GlRenderbuffer>,
    },
    /// Mip level 0 of a 2D texture.
    Texture {
        /// The texture object.
        texture: GlTexture,
        /// The texture's format.
        format: SurfaceFormat,
    },
    /// No storage the framebuffer path can attach.
    Unbacked,
}

/// The width of an index, derived from an index buffer's stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexType {
    /// Maps a stride in bytes to an index type.
    pub fn from_stride(stride: u32) -> Option<Self> {
        match stride {
            2 => Some(IndexType::U16),
            4 => Some(IndexType::U32),
            _ => None,
        }
    }

    /// The size of one index in bytes.
    pub fn size(self) -> usize {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Where the native API reads vertex or index data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataAddress {
    /// A byte offset into the currently bound buffer object.
    Offset(usize),
    /// The address of client (CPU) memory. It stays valid until the draw call
    /// that consumes it returns.
    Client(usize),
}

impl DataAddress {
    /// Returns the same kind of address moved forward by `bytes`.
    #[must_use]
    pub fn advanced(self, bytes: usize) -> Self {
        match self {
            DataAddress::Offset(o) => DataAddress::Offset(o + bytes),
            DataAddress::Client(a) => DataAddress::Client(a + bytes),
        }
    }
}

/// A framebuffer attachment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferAttachment {
    /// The first color attachment.
    Color0,
    /// The depth attachment.
    Depth,
    /// The stencil attachment.
    Stencil,
}

/// The result of a framebuffer completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferStatus {
    /// The framebuffer can be rendered to.
    Complete,
    /// An attachment is not attachment-complete.
    IncompleteAttachment,
    /// No image is attached.
    MissingAttachment,
    /// Attached images have different dimensions.
    IncompleteDimensions,
    /// The combination of formats is not supported by the implementation.
    Unsupported,
    /// Any other status code reported by the driver.
    Other(u32),
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferStatus::Complete => write!(f, "complete"),
            FramebufferStatus::IncompleteAttachment => write!(f, "incomplete attachment"),
            FramebufferStatus::MissingAttachment => write!(f, "missing attachment"),
            FramebufferStatus::IncompleteDimensions => write!(f, "incomplete dimensions"),
            FramebufferStatus::Unsupported => write!(f, "unsupported"),
            FramebufferStatus::Other(code) => write!(f, "status {code:#x}"),
        }
    }
}
