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

//! The record of the last value handed to the native context for every
//! cacheable piece of state.
//!
//! Every field is an `Option`: `None` means the native value is unknown, so the
//! next request for that state must reach the driver whatever its value.

use khora_core::renderer::api::{
    AttribBinding, AttribMask, BlendFactor, BlendOperation, ColorWrites, CompareFunction,
    CullMode, FillMode, GlBuffer, GlFramebuffer, StencilOperation, MAX_VERTEX_ATTRIBUTES,
};
use khora_core::renderer::SurfaceInfo;

/// Stencil comparison for one face: function, reference and read mask.
pub type StencilFunc = (CompareFunction, u32, u32);

/// Stencil operations for one face: fail, depth-fail and pass.
pub type StencilOps = (StencilOperation, StencilOperation, StencilOperation);

/// A rectangle in native coordinates: x, y, width, height.
pub type NativeRect = [i32; 4];

/// The color and depth targets the bound framebuffer was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundTargets {
    /// The color target, `None` for "no color target".
    pub color: Option<SurfaceInfo>,
    /// The depth target, `None` for "no depth target".
    pub depth: Option<SurfaceInfo>,
}

/// Indices into the per-face stencil arrays.
pub(crate) const FRONT: usize = 0;
pub(crate) const BACK: usize = 1;

/// The shadow of the native context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowState {
    // Vertex input
    pub array_buffer: Option<GlBuffer>,
    pub element_array_buffer: Option<GlBuffer>,
    pub attribs: [Option<AttribBinding>; MAX_VERTEX_ATTRIBUTES],
    pub enabled_attribs: Option<AttribMask>,

    // Rasterizer
    pub fill_mode: Option<FillMode>,
    pub cull_mode: Option<CullMode>,
    /// Slope-scaled and constant bias, already scaled for the native API.
    pub depth_bias: Option<(f32, f32)>,

    // Depth
    pub depth_test: Option<bool>,
    pub depth_func: Option<CompareFunction>,
    pub depth_write: Option<bool>,

    // Stencil, indexed by `FRONT` and `BACK`
    pub stencil_test: Option<bool>,
    pub stencil_func: [Option<StencilFunc>; 2],
    pub stencil_ops: [Option<StencilOps>; 2],
    pub stencil_write_mask: Option<u32>,

    // Blend
    pub blend: Option<bool>,
    pub blend_func: Option<[BlendFactor; 4]>,
    pub blend_equation: Option<(BlendOperation, BlendOperation)>,
    pub alpha_test: Option<bool>,
    pub alpha_func: Option<(CompareFunction, f32)>,

    // Output
    pub color_writes: Option<ColorWrites>,
    pub viewport: Option<NativeRect>,
    pub depth_range: Option<(f32, f32)>,
    pub scissor_test: Option<bool>,
    pub scissor: Option<NativeRect>,

    // Clear values
    pub clear_color: Option<[f32; 4]>,
    pub clear_depth: Option<f32>,
    pub clear_stencil: Option<u32>,

    // Framebuffer
    pub framebuffer: Option<GlFramebuffer>,
    pub render_targets: Option<BoundTargets>,
}

impl ShadowState {
    /// Forgets every recorded value.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if no value is known.
    pub fn is_unknown(&self) -> bool {
        *self == Self::default()
    }

    /// Forgets every value that refers to `buffer`.
    ///
    /// ## Returns
    /// The number of attribute slots that referenced the buffer.
    pub fn forget_buffer(&mut self, buffer: GlBuffer) -> usize {
        if self.array_buffer == Some(buffer) {
            self.array_buffer = None;
        }
        if self.element_array_buffer == Some(buffer) {
            self.element_array_buffer = None;
        }
        let mut forgotten = 0;
        for attrib in self.attribs.iter_mut() {
            if matches!(attrib, Some(binding) if binding.buffer == buffer) {
                *attrib = None;
                forgotten += 1;
            }
        }
        forgotten
    }
}
