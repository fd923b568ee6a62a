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

//! Static lookup tables: vertex semantics to attribute slots, element types to
//! attribute formats, primitive types to native topologies.

use khora_core::renderer::api::{
    AttribFormat, PrimitiveMode, PrimitiveType, VertexElement, VertexElementType,
    VertexElementUsage, VertexSemantic, MAX_VERTEX_ATTRIBUTES,
};
use khora_core::renderer::ConfigurationError;

/// The first abstract slot a semantic occupies. Semantics with several sets
/// (colors, texture coordinates) take consecutive slots from there.
pub const fn bind_location(usage: VertexElementUsage) -> u32 {
    match usage {
        VertexElementUsage::Position => 0,
        VertexElementUsage::BlendWeight => 1,
        VertexElementUsage::Normal => 2,
        VertexElementUsage::Color => 3,
        VertexElementUsage::Tangent => 5,
        VertexElementUsage::Binormal => 6,
        VertexElementUsage::BlendIndices => 7,
        VertexElementUsage::TextureCoordinate => 8,
    }
}

/// The abstract slot an element feeds. May be `>= 16` for out-of-range usage
/// indices, in which case no shader consumes it.
pub fn abstract_slot(element: &VertexElement) -> u32 {
    bind_location(element.usage) + u32::from(element.usage_index)
}

/// Reverse of [`abstract_slot`], used to name a slot nothing was bound to.
pub fn semantic_for_slot(slot: u32) -> Option<VertexSemantic> {
    use VertexElementUsage::*;
    let (usage, index) = match slot {
        0 => (Position, 0),
        1 => (BlendWeight, 0),
        2 => (Normal, 0),
        3 => (Color, 0),
        4 => (Color, 1),
        5 => (Tangent, 0),
        6 => (Binormal, 0),
        7 => (BlendIndices, 0),
        8..=15 => (TextureCoordinate, (slot - 8) as u8),
        _ => return None,
    };
    Some(VertexSemantic::new(usage, index))
}

/// Component layout of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLayout {
    /// Components per vertex.
    pub count: u8,
    /// Component format.
    pub format: AttribFormat,
    /// Whether integer components are normalized.
    pub normalize: bool,
}

impl AttribLayout {
    const fn new(count: u8, format: AttribFormat, normalize: bool) -> Self {
        Self {
            count,
            format,
            normalize,
        }
    }
}

/// Looks up the attribute layout of an element type.
///
/// ## Errors
/// * `ConfigurationError::UnsupportedElementType` - for `None` and `Pos3N`,
///   which have no GLES equivalent.
pub fn attrib_layout(element_type: VertexElementType) -> Result<AttribLayout, ConfigurationError> {
    use AttribFormat::*;
    let layout = match element_type {
        VertexElementType::Float1 => AttribLayout::new(1, Float, false),
        VertexElementType::Float2 => AttribLayout::new(2, Float, false),
        VertexElementType::Float3 => AttribLayout::new(3, Float, false),
        VertexElementType::Float4 => AttribLayout::new(4, Float, false),
        VertexElementType::PackedNormal => AttribLayout::new(4, UnsignedByte, false),
        VertexElementType::UByte4 => AttribLayout::new(4, UnsignedByte, false),
        VertexElementType::UByte4N => AttribLayout::new(4, UnsignedByte, true),
        VertexElementType::Color => AttribLayout::new(4, UnsignedByte, true),
        VertexElementType::Short2 => AttribLayout::new(2, Short, false),
        VertexElementType::Short2N => AttribLayout::new(2, Short, true),
        VertexElementType::Half2 => AttribLayout::new(2, HalfFloat, false),
        VertexElementType::None | VertexElementType::Pos3N => {
            return Err(ConfigurationError::UnsupportedElementType(element_type))
        }
    };
    Ok(layout)
}

/// Translates a primitive type to its native topology.
///
/// ## Errors
/// * `ConfigurationError::UnsupportedPrimitiveType` - for quads and point sprites.
pub fn primitive_mode(primitive: PrimitiveType) -> Result<PrimitiveMode, ConfigurationError> {
    match primitive {
        PrimitiveType::TriangleList => Ok(PrimitiveMode::Triangles),
        PrimitiveType::TriangleStrip => Ok(PrimitiveMode::TriangleStrip),
        PrimitiveType::LineList => Ok(PrimitiveMode::Lines),
        PrimitiveType::QuadList | PrimitiveType::PointSprite => {
            Err(ConfigurationError::UnsupportedPrimitiveType(primitive))
        }
    }
}

/// Number of vertices or indices a draw of `count` primitives consumes.
///
/// With `single_triangle` set every draw collapses to one triangle.
///
/// ## Errors
/// * `ConfigurationError::UnsupportedPrimitiveType` - see [`primitive_mode`].
pub fn calc_num_elements(
    primitive: PrimitiveType,
    count: u32,
    single_triangle: bool,
) -> Result<u32, ConfigurationError> {
    let mode = primitive_mode(primitive)?;
    if single_triangle {
        return Ok(3);
    }
    Ok(match mode {
        PrimitiveMode::Triangles => count.saturating_mul(3),
        PrimitiveMode::TriangleStrip => count.saturating_add(2),
        PrimitiveMode::Lines => count.saturating_mul(2),
    })
}

/// Returns `true` if `slot` addresses a real attribute slot.
pub(crate) fn is_valid_slot(slot: u32) -> bool {
    (slot as usize) < MAX_VERTEX_ATTRIBUTES
}
