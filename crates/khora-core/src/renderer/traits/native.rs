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

use crate::renderer::api::*;
use std::fmt::Debug;

/// The native, state-machine graphics context the dispatch core drives.
///
/// Every method maps to one native entry point. Implementations do not cache
/// anything: redundant-call elimination happens above this trait, so a call
/// made here always reaches the driver.
///
/// All methods take `&mut self` because the context is owned by the render
/// thread and mutated by every call.
pub trait NativeGl: Debug {
    // --- Vertex input ---

    /// Binds `buffer` as the array buffer. `GlBuffer::NONE` unbinds.
    fn bind_array_buffer(&mut self, buffer: GlBuffer);

    /// Binds `buffer` as the element array buffer. `GlBuffer::NONE` unbinds.
    fn bind_element_array_buffer(&mut self, buffer: GlBuffer);

    /// Points attribute `slot` at the data described by `binding`.
    ///
    /// ## Arguments
    /// * `slot` - The concrete attribute slot, `0..16`.
    /// * `binding` - Component layout, stride and address. The buffer named in
    ///   the binding is already bound as the array buffer.
    fn vertex_attrib_pointer(&mut self, slot: u32, binding: &AttribBinding);

    /// Enables the attribute array for `slot`.
    fn enable_vertex_attrib_array(&mut self, slot: u32);

    /// Disables the attribute array for `slot`.
    fn disable_vertex_attrib_array(&mut self, slot: u32);

    /// Creates a buffer object holding `data` for the life of the context.
    fn create_static_buffer(&mut self, data: &[u8]) -> GlBuffer;

    // --- Fixed-function state ---

    /// Enables or disables a server-side capability.
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    /// Selects the faces culled while `Capability::CullFace` is enabled.
    /// Never called with `CullMode::None`.
    fn cull_face(&mut self, mode: CullMode);

    /// Selects how polygons are rasterized.
    fn polygon_mode(&mut self, mode: FillMode);

    /// Sets the slope-scaled and constant depth offsets.
    fn polygon_offset(&mut self, slope_scale: f32, units: f32);

    /// Sets the depth comparison.
    fn depth_func(&mut self, func: CompareFunction);

    /// Enables or disables depth writes.
    fn depth_mask(&mut self, write: bool);

    /// Sets the stencil comparison for `face`.
    fn stencil_func(&mut self, face: StencilFace, func: CompareFunction, reference: u32, mask: u32);

    /// Sets the stencil operations for `face`.
    fn stencil_op(
        &mut self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    );

    /// Sets the stencil write mask for both faces.
    fn stencil_mask(&mut self, mask: u32);

    /// Sets separate color and alpha blend factors.
    fn blend_func(
        &mut self,
        color_src: BlendFactor,
        color_dst: BlendFactor,
        alpha_src: BlendFactor,
        alpha_dst: BlendFactor,
    );

    /// Sets separate color and alpha blend equations.
    fn blend_equation(&mut self, color: BlendOperation, alpha: BlendOperation);

    /// Sets the fixed-function alpha test.
    fn alpha_func(&mut self, func: CompareFunction, reference: f32);

    /// Selects which color channels are written.
    fn color_mask(&mut self, mask: ColorWrites);

    /// Sets the viewport in native (bottom-left origin) coordinates.
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Sets the depth range.
    fn depth_range(&mut self, near: f32, far: f32);

    /// Sets the scissor rectangle in native (bottom-left origin) coordinates.
    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32);

    // --- Clears ---

    /// Sets the color used by color clears.
    fn clear_color(&mut self, rgba: [f32; 4]);

    /// Sets the depth used by depth clears.
    fn clear_depth(&mut self, depth: f32);

    /// Sets the value used by stencil clears.
    fn clear_stencil(&mut self, value: u32);

    /// Clears the selected attachments of the bound framebuffer.
    fn clear(&mut self, flags: ClearFlags);

    // --- Framebuffers ---

    /// Creates a framebuffer object.
    fn gen_framebuffer(&mut self) -> GlFramebuffer;

    /// Deletes a framebuffer object.
    fn delete_framebuffer(&mut self, framebuffer: GlFramebuffer);

    /// Binds a framebuffer. `GlFramebuffer::DEFAULT` selects the back buffer.
    fn bind_framebuffer(&mut self, framebuffer: GlFramebuffer);

    /// Attaches a renderbuffer to the bound framebuffer.
    fn framebuffer_renderbuffer(
        &mut self,
        attachment: FramebufferAttachment,
        renderbuffer: GlRenderbuffer,
    );

    /// Attaches a texture level to the bound framebuffer.
    fn framebuffer_texture_2d(
        &mut self,
        attachment: FramebufferAttachment,
        texture: GlTexture,
        mip_level: u32,
    );

    /// Checks the completeness of the bound framebuffer.
    fn check_framebuffer_status(&mut self) -> FramebufferStatus;

    // --- Draws ---

    /// Draws `count` vertices starting at `first`.
    fn draw_arrays(&mut self, mode: PrimitiveMode, first: u32, count: u32);

    /// Draws `count` indices of `index_type` read from `indices`.
    fn draw_elements(
        &mut self,
        mode: PrimitiveMode,
        count: u32,
        index_type: IndexType,
        indices: DataAddress,
    );
}
