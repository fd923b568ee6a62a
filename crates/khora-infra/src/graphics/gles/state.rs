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

//! Compare-and-set front for every native state call.
//!
//! [`StateApplier`] owns the native context together with its [`ShadowState`].
//! A request only reaches the driver when it differs from the shadowed value,
//! and the shadow is updated as the call is made.

use super::shadow::{BoundTargets, NativeRect, ShadowState, BACK, FRONT};
use khora_core::renderer::api::*;
use khora_core::renderer::NativeGl;

/// Scale from normalized depth units to a 24-bit depth buffer.
const DEPTH_BIAS_SCALE: f32 = ((1u32 << 24) - 1) as f32;

const POLYGON_OFFSET_CAPS: [Capability; 3] = [
    Capability::PolygonOffsetFill,
    Capability::PolygonOffsetLine,
    Capability::PolygonOffsetPoint,
];

/// Applies a cached boolean capability.
fn apply_capability<G: NativeGl>(
    gl: &mut G,
    cache: &mut Option<bool>,
    capability: Capability,
    enabled: bool,
) -> bool {
    if *cache == Some(enabled) {
        return false;
    }
    gl.set_capability(capability, enabled);
    *cache = Some(enabled);
    true
}

/// Owns the native context and filters redundant state changes.
#[derive(Debug)]
pub struct StateApplier<G: NativeGl> {
    gl: G,
    shadow: ShadowState,
    depth_bias_offset: f32,
    flip_height: Option<u32>,
    dummy_depth_stencil: bool,
    requested_depth: Option<DepthState>,
    requested_stencil: Option<StencilState>,
    depth_state_overrides: u64,
}

impl<G: NativeGl> StateApplier<G> {
    /// Wraps a native context. Nothing is known about its state yet.
    pub fn new(gl: G, depth_bias_offset: f32) -> Self {
        Self {
            gl,
            shadow: ShadowState::default(),
            depth_bias_offset,
            flip_height: Some(0),
            dummy_depth_stencil: false,
            requested_depth: None,
            requested_stencil: None,
            depth_state_overrides: 0,
        }
    }

    /// The native context.
    pub fn gl(&self) -> &G {
        &self.gl
    }

    /// The native context, for calls that are never cached (draws, creation).
    pub fn gl_mut(&mut self) -> &mut G {
        &mut self.gl
    }

    /// The shadow state.
    pub fn shadow(&self) -> &ShadowState {
        &self.shadow
    }

    /// Forgets every shadowed value so the next request of each state is
    /// forwarded to the driver.
    pub fn invalidate(&mut self) {
        log::debug!("StateApplier: shadow state invalidated");
        self.shadow.invalidate();
    }

    /// Number of depth or stencil requests overridden by the dummy depth buffer.
    pub fn depth_state_overrides(&self) -> u64 {
        self.depth_state_overrides
    }

    /// Sets the height viewports and scissors are flipped against. `None`
    /// leaves rectangles unflipped, for targets that render into a texture.
    pub fn set_flip_height(&mut self, height: Option<u32>) {
        self.flip_height = height;
    }

    // --- Vertex input ---

    /// Binds the array buffer.
    pub fn bind_array_buffer(&mut self, buffer: GlBuffer) -> bool {
        if self.shadow.array_buffer == Some(buffer) {
            return false;
        }
        self.gl.bind_array_buffer(buffer);
        self.shadow.array_buffer = Some(buffer);
        true
    }

    /// Binds the element array buffer.
    pub fn bind_element_array_buffer(&mut self, buffer: GlBuffer) -> bool {
        if self.shadow.element_array_buffer == Some(buffer) {
            return false;
        }
        self.gl.bind_element_array_buffer(buffer);
        self.shadow.element_array_buffer = Some(buffer);
        true
    }

    /// Points `slot` at `binding`. The array buffer is only bound when the
    /// pointer itself has to be re-issued.
    pub fn set_attrib(&mut self, slot: u32, binding: &AttribBinding) -> bool {
        let Some(cached) = self.shadow.attribs.get_mut(slot as usize) else {
            return false;
        };
        if cached.as_ref() == Some(binding) {
            return false;
        }
        *cached = Some(*binding);
        self.bind_array_buffer(binding.buffer);
        self.gl.vertex_attrib_pointer(slot, binding);
        true
    }

    /// Enables exactly the slots in `mask`.
    ///
    /// Only slots whose state differs are touched. When the enabled set is
    /// unknown every slot is set explicitly.
    pub fn prepare_attributes(&mut self, mask: AttribMask) {
        let changed = match self.shadow.enabled_attribs {
            Some(current) => current ^ mask,
            None => AttribMask::ALL,
        };
        for slot in changed.slots() {
            if mask.has_slot(slot) {
                self.gl.enable_vertex_attrib_array(slot);
            } else {
                self.gl.disable_vertex_attrib_array(slot);
            }
        }
        self.shadow.enabled_attribs = Some(mask);
    }

    /// Forgets every binding that refers to a buffer about to be deleted.
    pub fn on_vertex_buffer_deleted(&mut self, buffer: GlBuffer) {
        let slots = self.shadow.forget_buffer(buffer);
        if slots > 0 {
            log::trace!("StateApplier: buffer {buffer:?} deleted, {slots} attribute slot(s) forgotten");
        }
    }

    // --- Rasterizer ---

    /// Applies fill mode, culling and depth bias.
    pub fn set_rasterizer(&mut self, state: &RasterizerState) {
        if self.shadow.fill_mode != Some(state.fill_mode) {
            self.gl.polygon_mode(state.fill_mode);
            self.shadow.fill_mode = Some(state.fill_mode);
        }

        if self.shadow.cull_mode != Some(state.cull_mode) {
            let culling = state.cull_mode != CullMode::None;
            let was_culling = self.shadow.cull_mode.map(|m| m != CullMode::None);
            if was_culling != Some(culling) {
                self.gl.set_capability(Capability::CullFace, culling);
            }
            if culling {
                self.gl.cull_face(state.cull_mode);
            }
            self.shadow.cull_mode = Some(state.cull_mode);
        }

        let units = if state.depth_bias != 0.0 {
            (state.depth_bias + self.depth_bias_offset) * DEPTH_BIAS_SCALE
        } else {
            0.0
        };
        let bias = (state.slope_scale_depth_bias, units);
        if self.shadow.depth_bias == Some(bias) {
            return;
        }
        let is_zero = |b: (f32, f32)| b.0 == 0.0 && b.1 == 0.0;
        let was_zero = self.shadow.depth_bias.map(is_zero);
        if is_zero(bias) {
            if was_zero != Some(true) {
                for cap in POLYGON_OFFSET_CAPS {
                    self.gl.set_capability(cap, false);
                }
            }
        } else {
            if was_zero != Some(false) {
                for cap in POLYGON_OFFSET_CAPS {
                    self.gl.set_capability(cap, true);
                }
            }
            self.gl.polygon_offset(bias.0, bias.1);
        }
        self.shadow.depth_bias = Some(bias);
    }

    // --- Depth and stencil ---

    /// Enables or disables the dummy depth-stencil override.
    ///
    /// While active, depth and stencil writes are forced off and the depth
    /// comparison is forced to `Always`. Leaving the mode re-applies the last
    /// requested states. Without a request only the overridden fields are
    /// touched, and leaving the mode forgets them instead of restoring them.
    pub fn set_dummy_depth_stencil(&mut self, active: bool) {
        if self.dummy_depth_stencil == active {
            return;
        }
        self.dummy_depth_stencil = active;
        log::debug!(
            "StateApplier: dummy depth-stencil {}",
            if active { "active" } else { "released" }
        );
        match self.requested_depth {
            Some(depth) => self.set_depth(&depth),
            None if active => {
                if self.shadow.depth_func != Some(CompareFunction::Always) {
                    self.gl.depth_func(CompareFunction::Always);
                    self.shadow.depth_func = Some(CompareFunction::Always);
                }
                self.apply_depth_write(false);
            }
            None => {
                self.shadow.depth_func = None;
                self.shadow.depth_write = None;
            }
        }
        match self.requested_stencil {
            Some(stencil) => self.set_stencil(&stencil),
            None if active => self.apply_stencil_write_mask(0),
            None => self.shadow.stencil_write_mask = None,
        }
    }

    /// Returns `true` while the dummy depth-stencil override is active.
    pub fn is_dummy_depth_stencil(&self) -> bool {
        self.dummy_depth_stencil
    }

    /// Applies the depth test. The comparison is only sent while the test is on.
    pub fn set_depth(&mut self, state: &DepthState) {
        self.requested_depth = Some(*state);
        let mut effective = *state;
        if self.dummy_depth_stencil {
            effective.write_enabled = false;
            effective.compare = CompareFunction::Always;
            if effective != *state {
                self.depth_state_overrides += 1;
                log::debug!(
                    "StateApplier: depth request {state:?} overridden while the dummy depth buffer is bound"
                );
            }
        }

        apply_capability(
            &mut self.gl,
            &mut self.shadow.depth_test,
            Capability::DepthTest,
            effective.test_enabled,
        );
        if effective.test_enabled && self.shadow.depth_func != Some(effective.compare) {
            self.gl.depth_func(effective.compare);
            self.shadow.depth_func = Some(effective.compare);
        }
        self.apply_depth_write(effective.write_enabled);
    }

    fn apply_depth_write(&mut self, write: bool) {
        if self.shadow.depth_write != Some(write) {
            self.gl.depth_mask(write);
            self.shadow.depth_write = Some(write);
        }
    }

    /// Applies the stencil test.
    pub fn set_stencil(&mut self, state: &StencilState) {
        self.requested_stencil = Some(*state);
        let mut write_mask = state.write_mask;
        if self.dummy_depth_stencil && write_mask != 0 {
            write_mask = 0;
            self.depth_state_overrides += 1;
            log::debug!(
                "StateApplier: stencil write mask {:#x} overridden while the dummy depth buffer is bound",
                state.write_mask
            );
        }

        apply_capability(
            &mut self.gl,
            &mut self.shadow.stencil_test,
            Capability::StencilTest,
            state.enabled,
        );
        if state.enabled {
            if state.two_sided {
                self.apply_stencil_face(StencilFace::Back, &state.face, state);
                self.apply_stencil_face(StencilFace::Front, &state.ccw_face, state);
            } else {
                self.apply_stencil_face(StencilFace::FrontAndBack, &state.face, state);
            }
        }
        self.apply_stencil_write_mask(write_mask);
    }

    fn apply_stencil_face(&mut self, face: StencilFace, desc: &StencilFaceState, state: &StencilState) {
        let faces: &[usize] = match face {
            StencilFace::Front => &[FRONT],
            StencilFace::Back => &[BACK],
            StencilFace::FrontAndBack => &[FRONT, BACK],
        };
        let func = (desc.compare, state.reference, state.read_mask);
        if faces.iter().any(|&f| self.shadow.stencil_func[f] != Some(func)) {
            self.gl.stencil_func(face, func.0, func.1, func.2);
            for &f in faces {
                self.shadow.stencil_func[f] = Some(func);
            }
        }
        let ops = (desc.fail_op, desc.depth_fail_op, desc.pass_op);
        if faces.iter().any(|&f| self.shadow.stencil_ops[f] != Some(ops)) {
            self.gl.stencil_op(face, ops.0, ops.1, ops.2);
            for &f in faces {
                self.shadow.stencil_ops[f] = Some(ops);
            }
        }
    }

    fn apply_stencil_write_mask(&mut self, mask: u32) {
        if self.shadow.stencil_write_mask != Some(mask) {
            self.gl.stencil_mask(mask);
            self.shadow.stencil_write_mask = Some(mask);
        }
    }

    // --- Blend ---

    /// Applies blending and the alpha test.
    pub fn set_blend(&mut self, state: &BlendState) {
        apply_capability(&mut self.gl, &mut self.shadow.blend, Capability::Blend, state.enabled);
        if state.enabled {
            let alpha = if state.separate_alpha {
                state.alpha
            } else {
                state.color
            };
            let factors = [
                state.color.src_factor,
                state.color.dst_factor,
                alpha.src_factor,
                alpha.dst_factor,
            ];
            if self.shadow.blend_func != Some(factors) {
                self.gl
                    .blend_func(factors[0], factors[1], factors[2], factors[3]);
                self.shadow.blend_func = Some(factors);
            }
            let equations = (state.color.operation, alpha.operation);
            if self.shadow.blend_equation != Some(equations) {
                self.gl.blend_equation(equations.0, equations.1);
                self.shadow.blend_equation = Some(equations);
            }
        }

        apply_capability(
            &mut self.gl,
            &mut self.shadow.alpha_test,
            Capability::AlphaTest,
            state.alpha_test.is_some(),
        );
        if let Some(test) = state.alpha_test {
            let func = (test.compare, test.reference);
            if self.shadow.alpha_func != Some(func) {
                self.gl.alpha_func(func.0, func.1);
                self.shadow.alpha_func = Some(func);
            }
        }
    }

    // --- Output ---

    /// Applies the color write mask.
    pub fn set_color_mask(&mut self, mask: ColorWrites) -> bool {
        if self.shadow.color_writes == Some(mask) {
            return false;
        }
        self.gl.color_mask(mask);
        self.shadow.color_writes = Some(mask);
        true
    }

    fn flip(&self, min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> NativeRect {
        let width = max_x.saturating_sub(min_x) as i32;
        let height = max_y.saturating_sub(min_y) as i32;
        let y = match self.flip_height {
            Some(target_height) => target_height as i32 - max_y as i32,
            None => min_y as i32,
        };
        [min_x as i32, y, width, height]
    }

    /// Applies the viewport and its depth range.
    pub fn set_viewport(&mut self, viewport: &Viewport) {
        let rect = self.flip(viewport.min_x, viewport.min_y, viewport.max_x, viewport.max_y);
        if self.shadow.viewport != Some(rect) {
            self.gl.viewport(rect[0], rect[1], rect[2], rect[3]);
            self.shadow.viewport = Some(rect);
        }
        let range = (viewport.min_z, viewport.max_z);
        if self.shadow.depth_range != Some(range) {
            self.gl.depth_range(range.0, range.1);
            self.shadow.depth_range = Some(range);
        }
    }

    /// Applies the scissor test and, while it is on, its rectangle.
    pub fn set_scissor(&mut self, enabled: bool, rect: &ScissorRect) {
        apply_capability(
            &mut self.gl,
            &mut self.shadow.scissor_test,
            Capability::ScissorTest,
            enabled,
        );
        if enabled {
            let native = self.flip(rect.min_x, rect.min_y, rect.max_x, rect.max_y);
            if self.shadow.scissor != Some(native) {
                self.gl.scissor(native[0], native[1], native[2], native[3]);
                self.shadow.scissor = Some(native);
            }
        }
    }

    // --- Clears ---

    /// Clears the selected attachments of the bound framebuffer.
    ///
    /// The write masks a clear depends on are forced on for the duration of the
    /// clear and restored afterwards.
    pub fn clear(&mut self, flags: ClearFlags, color: [f32; 4], depth: f32, stencil: u32) {
        if flags.is_empty() {
            return;
        }
        if flags.contains(ClearFlags::COLOR) && self.shadow.clear_color != Some(color) {
            self.gl.clear_color(color);
            self.shadow.clear_color = Some(color);
        }
        if flags.contains(ClearFlags::DEPTH) && self.shadow.clear_depth != Some(depth) {
            self.gl.clear_depth(depth);
            self.shadow.clear_depth = Some(depth);
        }
        if flags.contains(ClearFlags::STENCIL) && self.shadow.clear_stencil != Some(stencil) {
            self.gl.clear_stencil(stencil);
            self.shadow.clear_stencil = Some(stencil);
        }

        let saved_color = self.shadow.color_writes;
        let saved_depth = self.shadow.depth_write;
        let saved_stencil = self.shadow.stencil_write_mask;

        if flags.contains(ClearFlags::COLOR) {
            self.set_color_mask(ColorWrites::ALL);
        }
        if flags.contains(ClearFlags::DEPTH) {
            self.apply_depth_write(true);
        }
        if flags.contains(ClearFlags::STENCIL) {
            self.apply_stencil_write_mask(u32::MAX);
        }

        self.gl.clear(flags);

        if let Some(mask) = saved_color {
            self.set_color_mask(mask);
        }
        if let Some(write) = saved_depth {
            self.apply_depth_write(write);
        }
        if let Some(mask) = saved_stencil {
            self.apply_stencil_write_mask(mask);
        }
    }

    // --- Framebuffers ---

    /// Binds a framebuffer.
    pub fn bind_framebuffer(&mut self, framebuffer: GlFramebuffer) -> bool {
        if self.shadow.framebuffer == Some(framebuffer) {
            return false;
        }
        self.gl.bind_framebuffer(framebuffer);
        self.shadow.framebuffer = Some(framebuffer);
        true
    }

    /// The targets the bound framebuffer was built from, if known.
    pub fn render_targets(&self) -> Option<BoundTargets> {
        self.shadow.render_targets
    }

    /// Records the targets the bound framebuffer was built from.
    pub fn set_render_targets(&mut self, targets: Option<BoundTargets>) {
        self.shadow.render_targets = targets;
    }

    /// Forgets the bound framebuffer, e.g. after deleting it.
    pub fn forget_framebuffer(&mut self) {
        self.shadow.framebuffer = None;
        self.shadow.render_targets = None;
    }
}
