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

//! Vertex declarations and the per-slot attribute bindings derived from them.

use super::resource::{DataAddress, GlBuffer};
use crate::khora_bitflags;
use std::borrow::Cow;
use std::fmt;

/// Number of vertex attribute slots a program can read.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

/// Number of vertex streams that can be bound at once.
pub const MAX_VERTEX_STREAMS: usize = 16;

/// What a vertex element means to the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElementUsage {
    /// Object-space position.
    Position,
    /// Texture coordinate set; the usage index selects the set (0..=7).
    TextureCoordinate,
    /// Skinning weights.
    BlendWeight,
    /// Skinning bone indices.
    BlendIndices,
    /// Normal vector.
    Normal,
    /// Tangent vector.
    Tangent,
    /// Binormal vector.
    Binormal,
    /// Vertex color; the usage index selects the set (0 or 1).
    Color,
}

/// How a vertex element is encoded in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElementType {
    /// No data. Never valid in a bound declaration.
    None,
    /// One 32-bit float.
    Float1,
    /// Two 32-bit floats.
    Float2,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
    /// Four unsigned bytes holding a packed normal.
    PackedNormal,
    /// Four unsigned bytes.
    UByte4,
    /// Four unsigned bytes normalized to `[0.0, 1.0]`.
    UByte4N,
    /// Four unsigned bytes of color, normalized.
    Color,
    /// Two signed 16-bit integers.
    Short2,
    /// Two signed 16-bit integers normalized to `[-1.0, 1.0]`.
    Short2N,
    /// Two 16-bit floats.
    Half2,
    /// 11-11-10 packed normal. Console-only.
    Pos3N,
}

/// One attribute of a vertex declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexElement {
    /// Which stream the data comes from.
    pub stream_index: u8,
    /// Byte offset of the attribute within one vertex of that stream.
    pub offset: u32,
    /// The encoding of the data.
    pub element_type: VertexElementType,
    /// The semantic.
    pub usage: VertexElementUsage,
    /// Index within the semantic (texcoord set, color set, ...).
    pub usage_index: u8,
}

impl VertexElement {
    /// Creates an element.
    pub const fn new(
        stream_index: u8,
        offset: u32,
        element_type: VertexElementType,
        usage: VertexElementUsage,
        usage_index: u8,
    ) -> Self {
        Self {
            stream_index,
            offset,
            element_type,
            usage,
            usage_index,
        }
    }

    /// The semantic this element feeds.
    pub fn semantic(&self) -> VertexSemantic {
        VertexSemantic {
            usage: self.usage,
            index: self.usage_index,
        }
    }
}

/// An immutable, named list of vertex elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexDeclaration {
    name: Cow<'static, str>,
    elements: Vec<VertexElement>,
}

impl VertexDeclaration {
    /// Creates a declaration from its elements.
    pub fn new(name: impl Into<Cow<'static, str>>, elements: Vec<VertexElement>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// The declaration's debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The elements, in declaration order.
    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }
}

/// A semantic plus its index, e.g. `TexCoord1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexSemantic {
    /// The semantic.
    pub usage: VertexElementUsage,
    /// Index within the semantic.
    pub index: u8,
}

impl VertexSemantic {
    /// Creates a semantic.
    pub const fn new(usage: VertexElementUsage, index: u8) -> Self {
        Self { usage, index }
    }
}

impl fmt::Display for VertexSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.usage {
            VertexElementUsage::Position => "Position",
            VertexElementUsage::TextureCoordinate => "TexCoord",
            VertexElementUsage::BlendWeight => "BlendWeight",
            VertexElementUsage::BlendIndices => "BlendIndices",
            VertexElementUsage::Normal => "Normal",
            VertexElementUsage::Tangent => "Tangent",
            VertexElementUsage::Binormal => "Binormal",
            VertexElementUsage::Color => "Color",
        };
        write!(f, "{name}{}", self.index)
    }
}

/// The wire format of one attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribFormat {
    /// 32-bit float.
    Float,
    /// Unsigned byte.
    UnsignedByte,
    /// Signed 16-bit integer.
    Short,
    /// 16-bit float.
    HalfFloat,
}

khora_bitflags! {
    /// A set of vertex attribute slots, one bit per slot.
    pub struct AttribMask: u16 {
        /// Every slot.
        const ALL = 0xFFFF;
    }
}

impl AttribMask {
    /// The mask holding only `slot`. Slots outside `0..16` give the empty mask.
    pub const fn slot(slot: u32) -> Self {
        if slot < MAX_VERTEX_ATTRIBUTES as u32 {
            Self::from_bits_truncate(1 << slot)
        } else {
            Self::EMPTY
        }
    }

    /// Returns `true` if `slot` is in the set.
    pub const fn has_slot(&self, slot: u32) -> bool {
        self.intersects(Self::slot(slot))
    }

    /// Iterates the set slots in ascending order.
    pub fn slots(self) -> impl Iterator<Item = u32> {
        (0..MAX_VERTEX_ATTRIBUTES as u32).filter(move |s| self.has_slot(*s))
    }
}

/// Everything the native API needs to source one vertex attribute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribBinding {
    /// The array buffer the data lives in, or `GlBuffer::NONE` for client memory.
    pub buffer: GlBuffer,
    /// Components per vertex, 1 to 4.
    pub count: u8,
    /// Component format.
    pub format: AttribFormat,
    /// Whether integer data is normalized.
    pub normalize: bool,
    /// Byte distance between consecutive vertices.
    pub stride: u32,
    /// Where the first vertex's data starts.
    pub address: DataAddress,
}

/// A vertex buffer bound to a stream, resolved to its native handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexStream {
    /// The buffer object.
    pub buffer: GlBuffer,
    /// Byte distance between vertices. Zero means "one value for every vertex".
    pub stride: u32,
    /// Byte offset of the first vertex.
    pub offset: u32,
}
