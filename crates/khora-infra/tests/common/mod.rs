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

//! Shared fixtures for the GLES dispatch core integration tests: a `NativeGl`
//! that records every call, and minimal surfaces, buffers and shaders.

#![allow(dead_code)]

use khora_core::renderer::api::*;
use khora_core::renderer::{
    ActiveShader, IndexBufferResource, NativeGl, RenderSurface, VertexBufferResource,
};
use khora_infra::GlesRhi;
use std::sync::Arc;

/// Routes `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording native context
// ─────────────────────────────────────────────────────────────────────────────

/// One native call, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    BindArrayBuffer(GlBuffer),
    BindElementArrayBuffer(GlBuffer),
    VertexAttribPointer(u32, AttribBinding),
    EnableAttrib(u32),
    DisableAttrib(u32),
    CreateStaticBuffer {
        buffer: GlBuffer,
        len: usize,
        first_texel: [u8; 4],
    },
    SetCapability(Capability, bool),
    CullFace(CullMode),
    PolygonMode(FillMode),
    PolygonOffset(f32, f32),
    DepthFunc(CompareFunction),
    DepthMask(bool),
    StencilFunc(StencilFace, CompareFunction, u32, u32),
    StencilOp(StencilFace, StencilOperation, StencilOperation, StencilOperation),
    StencilMask(u32),
    BlendFunc(BlendFactor, BlendFactor, BlendFactor, BlendFactor),
    BlendEquation(BlendOperation, BlendOperation),
    AlphaFunc(CompareFunction, f32),
    ColorMask(ColorWrites),
    Viewport(i32, i32, i32, i32),
    DepthRange(f32, f32),
    Scissor(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    ClearStencil(u32),
    Clear(ClearFlags),
    GenFramebuffer(GlFramebuffer),
    DeleteFramebuffer(GlFramebuffer),
    BindFramebuffer(GlFramebuffer),
    FramebufferRenderbuffer(FramebufferAttachment, GlRenderbuffer),
    FramebufferTexture2d(FramebufferAttachment, GlTexture, u32),
    CheckFramebufferStatus,
    DrawArrays(PrimitiveMode, u32, u32),
    DrawElements(PrimitiveMode, u32, IndexType, DataAddress),
}

impl GlCall {
    /// Returns `true` for the two draw calls.
    pub fn is_draw(&self) -> bool {
        matches!(self, GlCall::DrawArrays(..) | GlCall::DrawElements(..))
    }
}

/// A `NativeGl` that records every call and hands out increasing handles.
#[derive(Debug)]
pub struct RecordingGl {
    pub calls: Vec<GlCall>,
    next_handle: u32,
    /// What `check_framebuffer_status` answers.
    pub framebuffer_status: FramebufferStatus,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            next_handle: 100,
            framebuffer_status: FramebufferStatus::Complete,
        }
    }
}

impl RecordingGl {
    /// Drains the calls recorded so far.
    pub fn take(&mut self) -> Vec<GlCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    /// The recorded draw calls.
    pub fn draws(&self) -> Vec<GlCall> {
        self.calls.iter().filter(|c| c.is_draw()).cloned().collect()
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl NativeGl for RecordingGl {
    fn bind_array_buffer(&mut self, buffer: GlBuffer) {
        self.calls.push(GlCall::BindArrayBuffer(buffer));
    }

    fn bind_element_array_buffer(&mut self, buffer: GlBuffer) {
        self.calls.push(GlCall::BindElementArrayBuffer(buffer));
    }

    fn vertex_attrib_pointer(&mut self, slot: u32, binding: &AttribBinding) {
        self.calls.push(GlCall::VertexAttribPointer(slot, *binding));
    }

    fn enable_vertex_attrib_array(&mut self, slot: u32) {
        self.calls.push(GlCall::EnableAttrib(slot));
    }

    fn disable_vertex_attrib_array(&mut self, slot: u32) {
        self.calls.push(GlCall::DisableAttrib(slot));
    }

    fn create_static_buffer(&mut self, data: &[u8]) -> GlBuffer {
        let buffer = GlBuffer(self.handle());
        let mut first_texel = [0; 4];
        first_texel.copy_from_slice(&data[..4]);
        self.calls.push(GlCall::CreateStaticBuffer {
            buffer,
            len: data.len(),
            first_texel,
        });
        buffer
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.calls.push(GlCall::SetCapability(capability, enabled));
    }

    fn cull_face(&mut self, mode: CullMode) {
        self.calls.push(GlCall::CullFace(mode));
    }

    fn polygon_mode(&mut self, mode: FillMode) {
        self.calls.push(GlCall::PolygonMode(mode));
    }

    fn polygon_offset(&mut self, slope_scale: f32, units: f32) {
        self.calls.push(GlCall::PolygonOffset(slope_scale, units));
    }

    fn depth_func(&mut self, func: CompareFunction) {
        self.calls.push(GlCall::DepthFunc(func));
    }

    fn depth_mask(&mut self, write: bool) {
        self.calls.push(GlCall::DepthMask(write));
    }

    fn stencil_func(&mut self, face: StencilFace, func: CompareFunction, reference: u32, mask: u32) {
        self.calls
            .push(GlCall::StencilFunc(face, func, reference, mask));
    }

    fn stencil_op(
        &mut self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    ) {
        self.calls
            .push(GlCall::StencilOp(face, fail, depth_fail, pass));
    }

    fn stencil_mask(&mut self, mask: u32) {
        self.calls.push(GlCall::StencilMask(mask));
    }

    fn blend_func(
        &mut self,
        color_src: BlendFactor,
        color_dst: BlendFactor,
        alpha_src: BlendFactor,
        alpha_dst: BlendFactor,
    ) {
        self.calls
            .push(GlCall::BlendFunc(color_src, color_dst, alpha_src, alpha_dst));
    }

    fn blend_equation(&mut self, color: BlendOperation, alpha: BlendOperation) {
        self.calls.push(GlCall::BlendEquation(color, alpha));
    }

    fn alpha_func(&mut self, func: CompareFunction, reference: f32) {
        self.calls.push(GlCall::AlphaFunc(func, reference));
    }

    fn color_mask(&mut self, mask: ColorWrites) {
        self.calls.push(GlCall::ColorMask(mask));
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(GlCall::Viewport(x, y, width, height));
    }

    fn depth_range(&mut self, near: f32, far: f32) {
        self.calls.push(GlCall::DepthRange(near, far));
    }

    fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(GlCall::Scissor(x, y, width, height));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(GlCall::ClearColor(rgba));
    }

    fn clear_depth(&mut self, depth: f32) {
        self.calls.push(GlCall::ClearDepth(depth));
    }

    fn clear_stencil(&mut self, value: u32) {
        self.calls.push(GlCall::ClearStencil(value));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.calls.push(GlCall::Clear(flags));
    }

    fn gen_framebuffer(&mut self) -> GlFramebuffer {
        let framebuffer = GlFramebuffer(self.handle());
        self.calls.push(GlCall::GenFramebuffer(framebuffer));
        framebuffer
    }

    fn delete_framebuffer(&mut self, framebuffer: GlFramebuffer) {
        self.calls.push(GlCall::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&mut self, framebuffer: GlFramebuffer) {
        self.calls.push(GlCall::BindFramebuffer(framebuffer));
    }

    fn framebuffer_renderbuffer(
        &mut self,
        attachment: FramebufferAttachment,
        renderbuffer: GlRenderbuffer,
    ) {
        self.calls
            .push(GlCall::FramebufferRenderbuffer(attachment, renderbuffer));
    }

    fn framebuffer_texture_2d(
        &mut self,
        attachment: FramebufferAttachment,
        texture: GlTexture,
        mip_level: u32,
    ) {
        self.calls
            .push(GlCall::FramebufferTexture2d(attachment, texture, mip_level));
    }

    fn check_framebuffer_status(&mut self) -> FramebufferStatus {
        self.calls.push(GlCall::CheckFramebufferStatus);
        self.framebuffer_status
    }

    fn draw_arrays(&mut self, mode: PrimitiveMode, first: u32, count: u32) {
        self.calls.push(GlCall::DrawArrays(mode, first, count));
    }

    fn draw_elements(
        &mut self,
        mode: PrimitiveMode,
        count: u32,
        index_type: IndexType,
        indices: DataAddress,
    ) {
        self.calls
            .push(GlCall::DrawElements(mode, count, index_type, indices));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// A render target with fixed properties.
#[derive(Debug, Clone, Copy)]
pub struct MockSurface {
    pub id: u16,
    pub width: u32,
    pub height: u32,
    pub backing: SurfaceBacking,
    pub placeholder: bool,
}

impl MockSurface {
    /// A renderbuffer-backed color target.
    pub fn color(id: u16, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            backing: SurfaceBacking::Renderbuffer {
                buffer: GlRenderbuffer(u32::from(id) + 1000),
                stencil: None,
            },
            placeholder: false,
        }
    }

    /// A renderbuffer-backed depth target with a separate stencil renderbuffer.
    pub fn depth(id: u16, width: u32, height: u32) -> Self {
        Self {
            backing: SurfaceBacking::Renderbuffer {
                buffer: GlRenderbuffer(u32::from(id) + 1000),
                stencil: Some(GlRenderbuffer(u32::from(id) + 2000)),
            },
            ..Self::color(id, width, height)
        }
    }

    /// A texture-backed target.
    pub fn texture(id: u16, width: u32, height: u32, format: SurfaceFormat) -> Self {
        Self {
            backing: SurfaceBacking::Texture {
                texture: GlTexture(u32::from(id) + 3000),
                format,
            },
            ..Self::color(id, width, height)
        }
    }

    /// The window's back buffer.
    pub fn back_buffer(id: u16, width: u32, height: u32) -> Self {
        Self {
            backing: SurfaceBacking::DefaultBackBuffer,
            ..Self::color(id, width, height)
        }
    }
}

impl RenderSurface for MockSurface {
    fn unique_id(&self) -> SurfaceId {
        SurfaceId::new(self.id).unwrap()
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn backing(&self) -> SurfaceBacking {
        self.backing
    }

    fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// A persistent vertex buffer.
#[derive(Debug, Clone, Copy)]
pub struct MockVertexBuffer(pub GlBuffer);

impl VertexBufferResource for MockVertexBuffer {
    fn native_buffer(&self) -> GlBuffer {
        self.0
    }
}

/// A persistent index buffer.
#[derive(Debug, Clone, Copy)]
pub struct MockIndexBuffer {
    pub buffer: GlBuffer,
    pub stride: u32,
}

impl IndexBufferResource for MockIndexBuffer {
    fn native_buffer(&self) -> GlBuffer {
        self.buffer
    }

    fn index_stride(&self) -> u32 {
        self.stride
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shader
// ─────────────────────────────────────────────────────────────────────────────

/// A program that reads a fixed set of slots through the identity remap.
#[derive(Debug, Clone)]
pub struct MockShader {
    pub bound: bool,
    pub used: AttribMask,
    pub fallback_selections: u32,
}

impl MockShader {
    /// A bound program reading `slots`.
    pub fn reading(slots: &[u32]) -> Self {
        let used = slots
            .iter()
            .fold(AttribMask::EMPTY, |mask, &slot| mask | AttribMask::slot(slot));
        Self {
            bound: true,
            used,
            fallback_selections: 0,
        }
    }
}

impl ActiveShader for MockShader {
    fn is_program_bound(&self) -> bool {
        self.bound
    }

    fn used_attrib_mask(&self) -> AttribMask {
        self.used
    }

    fn remap(&self, abstract_slot: u32) -> Option<u32> {
        self.used.has_slot(abstract_slot).then_some(abstract_slot)
    }

    fn material_name(&self) -> Option<&str> {
        Some("M_Test")
    }

    fn select_fallback_program(&mut self) {
        self.fallback_selections += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Declarations and dispatchers
// ─────────────────────────────────────────────────────────────────────────────

/// Abstract slots of the semantics used below.
pub const POSITION: u32 = 0;
pub const NORMAL: u32 = 2;
pub const COLOR0: u32 = 3;
pub const TEXCOORD0: u32 = 8;

/// Position (Float3) and Color0 (Color), interleaved in stream 0.
pub fn position_color_declaration() -> Arc<VertexDeclaration> {
    Arc::new(VertexDeclaration::new(
        "PositionColor",
        vec![
            VertexElement::new(0, 0, VertexElementType::Float3, VertexElementUsage::Position, 0),
            VertexElement::new(0, 12, VertexElementType::Color, VertexElementUsage::Color, 0),
        ],
    ))
}

/// Position, Normal and Color0, with the color in its own stream.
pub fn position_normal_color_declaration() -> Arc<VertexDeclaration> {
    Arc::new(VertexDeclaration::new(
        "PositionNormalColor",
        vec![
            VertexElement::new(0, 0, VertexElementType::Float3, VertexElementUsage::Position, 0),
            VertexElement::new(0, 12, VertexElementType::Float3, VertexElementUsage::Normal, 0),
            VertexElement::new(1, 0, VertexElementType::Color, VertexElementUsage::Color, 0),
        ],
    ))
}

/// Settings that return errors instead of aborting, and skip broken meshes.
pub fn test_settings() -> RhiSettings {
    RhiSettings {
        violation_policy: ViolationPolicy::ReturnError,
        missing_attribute_policy: MissingAttributePolicy::SkipDraw,
        ..RhiSettings::default()
    }
}

/// A dispatcher over a fresh recording context.
pub fn rhi(shader: MockShader, settings: RhiSettings) -> GlesRhi<RecordingGl, MockShader> {
    init_logging();
    GlesRhi::new(RecordingGl::default(), shader, settings)
}
