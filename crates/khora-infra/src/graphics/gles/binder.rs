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

//! Per-draw vertex attribute binding.
//!
//! Only elements the active program consumes are bound, so the cost of a bind
//! follows the program, not the mesh. Zero-stride streams are replaced by a
//! neutral fallback buffer and reported as degraded. Slots the program reads
//! but nothing feeds are reported as missing.

use super::layout::{abstract_slot, attrib_layout, is_valid_slot, semantic_for_slot};
use super::state::StateApplier;
use khora_core::renderer::api::{
    AttribBinding, AttribFormat, AttribMask, DataAddress, GlBuffer, NullColor, VertexDeclaration,
    VertexElementUsage, VertexSemantic, VertexStream, MAX_VERTEX_ATTRIBUTES, MAX_VERTEX_STREAMS,
};
use khora_core::renderer::{ActiveShader, ConfigurationError, NativeGl};

/// Texels in each fallback buffer.
pub const FALLBACK_TEXELS: usize = 64 * 1024;

/// Stride of the fallback buffers in bytes.
pub const FALLBACK_STRIDE: u32 = 4;

/// The texel every zero-stride blend weight reads, as a native-endian word.
pub const NULL_WEIGHT_TEXEL: u32 = 0xff00_00ff;

/// Where the vertex data of a draw comes from.
#[derive(Debug, Clone, Copy)]
pub enum AttribSource<'a> {
    /// The persistent stream table set with `set_stream_source`.
    Streams(&'a [Option<VertexStream>; MAX_VERTEX_STREAMS]),
    /// One block of interleaved immediate-mode data.
    Immediate {
        /// Address of the first vertex.
        address: DataAddress,
        /// Bytes per vertex.
        stride: u32,
    },
}

/// The outcome of one attribute bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// `false` when the program reads a slot nothing was bound to.
    pub success: bool,
    /// The concrete slots bound.
    pub bound: AttribMask,
    /// Semantics the program reads that had no data.
    pub missing: Vec<VertexSemantic>,
    /// Semantics fed from a fallback buffer because their stream has no stride.
    pub degraded: Vec<VertexSemantic>,
}

/// Lazily created neutral buffers bound in place of zero-stride streams.
#[derive(Debug, Clone)]
pub struct FallbackBuffers {
    null_color: NullColor,
    color: Option<GlBuffer>,
    weight: Option<GlBuffer>,
}

impl FallbackBuffers {
    /// Fallbacks whose color buffer holds `null_color`.
    pub fn new(null_color: NullColor) -> Self {
        Self {
            null_color,
            color: None,
            weight: None,
        }
    }

    fn create<G: NativeGl>(gl: &mut G, texel: u32) -> GlBuffer {
        let texels = vec![texel; FALLBACK_TEXELS];
        gl.create_static_buffer(bytemuck::cast_slice(&texels))
    }

    /// The buffer a zero-stride attribute with `usage` reads from.
    pub fn buffer_for<G: NativeGl>(&mut self, gl: &mut G, usage: VertexElementUsage) -> GlBuffer {
        if usage == VertexElementUsage::BlendWeight {
            *self
                .weight
                .get_or_insert_with(|| Self::create(gl, NULL_WEIGHT_TEXEL))
        } else {
            let texel = u32::from_ne_bytes(self.null_color.rgba8());
            *self.color.get_or_insert_with(|| Self::create(gl, texel))
        }
    }
}

/// Finds the semantic that feeds concrete `slot` under the program's remap.
fn semantic_for_program_slot<S: ActiveShader + ?Sized>(shader: &S, slot: u32) -> Option<VertexSemantic> {
    (0..MAX_VERTEX_ATTRIBUTES as u32)
        .find(|&abstract_slot| shader.remap(abstract_slot) == Some(slot))
        .and_then(semantic_for_slot)
        .or_else(|| semantic_for_slot(slot))
}

/// Binds every attribute of `declaration` the program consumes.
///
/// ## Arguments
/// * `applier` - Receives the per-slot bindings and the enabled mask.
/// * `declaration` - The vertex layout of the draw.
/// * `source` - The persistent stream table or the immediate-mode block.
/// * `shader` - The active program's slot usage and remap.
/// * `fallbacks` - Buffers substituted for zero-stride streams.
///
/// ## Returns
/// A [`BindReport`]. A failed bind is not an error: the caller decides
/// whether to draw with a fallback program or skip the draw.
///
/// ## Errors
/// * `ConfigurationError::UnsupportedElementType` - a consumed element has an
///   encoding with no attribute format.
pub fn bind_attributes<G, S>(
    applier: &mut StateApplier<G>,
    declaration: &VertexDeclaration,
    source: AttribSource<'_>,
    shader: &S,
    fallbacks: &mut FallbackBuffers,
) -> Result<BindReport, ConfigurationError>
where
    G: NativeGl,
    S: ActiveShader + ?Sized,
{
    let used = shader.used_attrib_mask();
    let mut report = BindReport::default();

    for element in declaration.elements() {
        let abstract_index = abstract_slot(element);
        if !is_valid_slot(abstract_index) {
            continue;
        }
        let Some(slot) = shader.remap(abstract_index) else {
            continue;
        };
        if !is_valid_slot(slot) || !used.has_slot(slot) || report.bound.has_slot(slot) {
            continue;
        }

        let layout = attrib_layout(element.element_type)?;
        let binding = match source {
            AttribSource::Streams(streams) => {
                let Some(stream) = streams
                    .get(element.stream_index as usize)
                    .copied()
                    .flatten()
                else {
                    // Nothing bound to this stream: reported below as missing.
                    continue;
                };
                if stream.stride == 0 {
                    report.degraded.push(element.semantic());
                    AttribBinding {
                        buffer: fallbacks.buffer_for(applier.gl_mut(), element.usage),
                        count: 4,
                        format: AttribFormat::UnsignedByte,
                        normalize: true,
                        stride: FALLBACK_STRIDE,
                        address: DataAddress::Offset(0),
                    }
                } else {
                    AttribBinding {
                        buffer: stream.buffer,
                        count: layout.count,
                        format: layout.format,
                        normalize: layout.normalize,
                        stride: stream.stride,
                        address: DataAddress::Offset(stream.offset as usize + element.offset as usize),
                    }
                }
            }
            AttribSource::Immediate { address, stride } => {
                // A zero stride has no fallback here: the slot stays missing.
                if element.stream_index != 0 || stride == 0 {
                    continue;
                }
                AttribBinding {
                    buffer: GlBuffer::NONE,
                    count: layout.count,
                    format: layout.format,
                    normalize: layout.normalize,
                    stride,
                    address: address.advanced(element.offset as usize),
                }
            }
        };

        applier.set_attrib(slot, &binding);
        report.bound.insert(AttribMask::slot(slot));
    }

    applier.prepare_attributes(report.bound);

    let unmet = used & !report.bound;
    report.success = unmet.is_empty();
    if !report.success {
        report.missing = unmet
            .slots()
            .filter_map(|slot| semantic_for_program_slot(shader, slot))
            .collect();
        let names = report
            .missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        log::warn!(
            "Material '{}' draws '{}' without vertex data for: {names}",
            shader.material_name().unwrap_or("<unknown>"),
            declaration.name(),
        );
    }
    if !report.degraded.is_empty() {
        log::trace!(
            "Vertex declaration '{}': {} zero-stride attribute(s) bound to fallbacks",
            declaration.name(),
            report.degraded.len()
        );
    }

    Ok(report)
}
