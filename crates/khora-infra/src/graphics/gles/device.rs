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

//! The engine-facing draw entry points of the GLES backend.

use super::arena::ScratchArena;
use super::binder::{bind_attributes, AttribSource, BindReport, FallbackBuffers};
use super::framebuffer::FramebufferCache;
use super::layout::{calc_num_elements, primitive_mode};
use super::shadow::BoundTargets;
use super::state::StateApplier;
use khora_core::renderer::api::*;
use khora_core::renderer::{
    ActiveShader, IndexBufferResource, NativeGl, PreconditionError, RenderSurface, RhiError,
    SurfaceInfo, VertexBufferResource,
};
use anyhow::Context;
use khora_core::telemetry::Metric;
use std::path::Path;
use std::sync::Arc;

/// Parameters of an immediate-mode draw, recorded at `begin_*` and consumed at `end_*`.
#[derive(Debug, Clone, Copy)]
struct UpDrawParams {
    primitive: PrimitiveType,
    mode: PrimitiveMode,
    primitive_count: u32,
    vertex_stride: u32,
    vertex_size: usize,
    indexed: bool,
}

/// The render hardware interface on top of a GLES-class native context.
///
/// `GlesRhi` owns the native context, its shadow state, the framebuffer cache
/// and the immediate-mode scratch arenas. It is confined to the render thread.
#[derive(Debug)]
pub struct GlesRhi<G: NativeGl, S: ActiveShader> {
    settings: RhiSettings,
    applier: StateApplier<G>,
    shader: S,
    streams: [Option<VertexStream>; MAX_VERTEX_STREAMS],
    declaration: Option<Arc<VertexDeclaration>>,
    fallbacks: FallbackBuffers,
    framebuffers: FramebufferCache,
    vertex_arena: ScratchArena,
    index_arena: ScratchArena,
    pending_up: Option<UpDrawParams>,
    targets: BoundTargets,
    last_bind: Option<BindReport>,
    stats: RhiStats,
}

impl<G: NativeGl, S: ActiveShader> GlesRhi<G, S> {
    /// Creates the dispatcher.
    ///
    /// ## Arguments
    /// * `gl` - The native context. Its state is treated as unknown.
    /// * `shader` - The shader subsystem's view of the bound program.
    /// * `settings` - Arena sizes and escalation policies.
    pub fn new(gl: G, shader: S, settings: RhiSettings) -> Self {
        let vertex_arena = ScratchArena::new("vertex", settings.vertex_scratch_bytes());
        let index_arena = ScratchArena::new("index", settings.index_scratch_bytes());
        log::info!(
            "GlesRhi: created with {} B vertex / {} B index scratch, {:?} on violations",
            vertex_arena.capacity(),
            index_arena.capacity(),
            settings.violation_policy
        );
        Self {
            applier: StateApplier::new(gl, settings.depth_bias_offset),
            shader,
            streams: [None; MAX_VERTEX_STREAMS],
            declaration: None,
            fallbacks: FallbackBuffers::new(settings.null_color),
            framebuffers: FramebufferCache::new(settings.check_framebuffer_status),
            vertex_arena,
            index_arena,
            pending_up: None,
            targets: BoundTargets::default(),
            last_bind: None,
            stats: RhiStats::default(),
            settings,
        }
    }

    /// Creates the dispatcher with settings read from a JSON file.
    ///
    /// ## Errors
    /// Fails if the file cannot be read or parsed.
    pub fn from_settings_file(gl: G, shader: S, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let settings = RhiSettings::load(path)
            .with_context(|| format!("GlesRhi: cannot configure from '{}'", path.display()))?;
        Ok(Self::new(gl, shader, settings))
    }

    /// Logs `err` and escalates it according to the violation policy.
    fn escalate<T>(&self, err: impl Into<RhiError>) -> Result<T, RhiError> {
        let err = err.into();
        log::error!("GlesRhi: {err}");
        match self.settings.violation_policy {
            ViolationPolicy::Abort => panic!("GlesRhi: {err}"),
            ViolationPolicy::ReturnError => Err(err),
        }
    }

    // --- Accessors ---

    /// The settings the dispatcher was created with.
    pub fn settings(&self) -> &RhiSettings {
        &self.settings
    }

    /// The native context.
    pub fn native(&self) -> &G {
        self.applier.gl()
    }

    /// The native context, mutably.
    pub fn native_mut(&mut self) -> &mut G {
        self.applier.gl_mut()
    }

    /// The state applier and its shadow.
    pub fn state(&self) -> &StateApplier<G> {
        &self.applier
    }

    /// The shader subsystem.
    pub fn shader(&self) -> &S {
        &self.shader
    }

    /// The shader subsystem, mutably.
    pub fn shader_mut(&mut self) -> &mut S {
        &mut self.shader
    }

    /// The report of the last attribute bind.
    pub fn last_bind_report(&self) -> Option<&BindReport> {
        self.last_bind.as_ref()
    }

    /// Number of cached framebuffer objects.
    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    /// Returns `true` while a depth target is kept bound in place of the "no
    /// depth target" the caller asked for. Depth and stencil writes are forced
    /// off and the depth comparison is forced to `Always` during that time.
    pub fn is_using_dummy_depth_stencil(&self) -> bool {
        self.applier.is_dummy_depth_stencil()
    }

    /// A snapshot of the running counters.
    pub fn stats(&self) -> RhiStats {
        RhiStats {
            framebuffers_created: self.framebuffers.created(),
            framebuffer_invalidations: self.framebuffers.invalidated(),
            depth_state_overrides: self.applier.depth_state_overrides(),
            scratch_vertex_high_water: self.vertex_arena.high_water() as u64,
            scratch_index_high_water: self.index_arena.high_water() as u64,
            ..self.stats.clone()
        }
    }

    /// The running counters as telemetry metrics.
    pub fn metrics(&self) -> Vec<Metric> {
        self.stats().to_metrics()
    }

    // --- Vertex input ---

    /// Binds a persistent vertex buffer to a stream, or clears the stream.
    ///
    /// ## Errors
    /// * `PreconditionError::StreamIndexOutOfRange` - `stream >= 16`.
    pub fn set_stream_source(
        &mut self,
        stream: u32,
        buffer: Option<&dyn VertexBufferResource>,
        stride: u32,
        offset: u32,
    ) -> Result<(), RhiError> {
        let Some(slot) = self.streams.get_mut(stream as usize) else {
            return self.escalate(PreconditionError::StreamIndexOutOfRange { stream });
        };
        *slot = buffer.map(|buffer| VertexStream {
            buffer: buffer.native_buffer(),
            stride,
            offset,
        });
        Ok(())
    }

    /// Sets the vertex layout of the following draws.
    pub fn set_vertex_declaration(&mut self, declaration: Arc<VertexDeclaration>) {
        self.declaration = Some(declaration);
    }

    /// Binds the vertex attributes of a draw.
    ///
    /// ## Returns
    /// `true` if the draw should be dispatched.
    fn bind_vertex_input(&mut self, immediate: Option<(DataAddress, u32)>) -> Result<bool, RhiError> {
        if !self.shader.is_program_bound() {
            log::warn!("GlesRhi: draw skipped, no program is bound");
            self.stats.skipped_draws += 1;
            return Ok(false);
        }
        let Some(declaration) = self.declaration.clone() else {
            log::warn!("GlesRhi: draw skipped, no vertex declaration is set");
            self.stats.skipped_draws += 1;
            return Ok(false);
        };

        let source = match immediate {
            Some((address, stride)) => AttribSource::Immediate { address, stride },
            None => AttribSource::Streams(&self.streams),
        };
        let result = bind_attributes(
            &mut self.applier,
            &declaration,
            source,
            &self.shader,
            &mut self.fallbacks,
        );
        let report = match result {
            Ok(report) => report,
            Err(err) => return self.escalate(err),
        };

        self.stats.degraded_bindings += report.degraded.len() as u64;
        let draw = if report.success {
            true
        } else {
            self.stats.invalid_meshes += 1;
            match self.settings.missing_attribute_policy {
                MissingAttributePolicy::FallbackColor => {
                    self.shader.select_fallback_program();
                    true
                }
                MissingAttributePolicy::SkipDraw => {
                    self.stats.skipped_draws += 1;
                    false
                }
            }
        };
        self.last_bind = Some(report);
        Ok(draw)
    }

    /// Forgets every reference to a vertex buffer that is about to be deleted.
    pub fn on_vertex_buffer_deleted(&mut self, buffer: GlBuffer) {
        for stream in self.streams.iter_mut() {
            if matches!(stream, Some(s) if s.buffer == buffer) {
                *stream = None;
            }
        }
        self.applier.on_vertex_buffer_deleted(buffer);
    }

    // --- Draws ---

    fn checked_mode(&self, primitive: PrimitiveType) -> Result<PrimitiveMode, RhiError> {
        match primitive_mode(primitive) {
            Ok(mode) => Ok(mode),
            Err(err) => self.escalate(err),
        }
    }

    fn element_count(&self, primitive: PrimitiveType, primitive_count: u32) -> Result<u32, RhiError> {
        Ok(calc_num_elements(
            primitive,
            primitive_count,
            self.settings.debug_single_triangle,
        )?)
    }

    /// Draws indexed primitives from persistent buffers.
    ///
    /// ## Arguments
    /// * `index_buffer` - Where the indices are read from.
    /// * `primitive` - The primitive type.
    /// * `base_vertex` - Added to every index. GLES has no base vertex, so
    ///   only 0 is honoured.
    /// * `min_index`, `num_vertices` - The range of vertices referenced.
    /// * `start_index` - First index to read.
    /// * `primitive_count` - Number of primitives.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_indexed_primitive(
        &mut self,
        index_buffer: &dyn IndexBufferResource,
        primitive: PrimitiveType,
        base_vertex: i32,
        min_index: u32,
        num_vertices: u32,
        start_index: u32,
        primitive_count: u32,
    ) -> Result<(), RhiError> {
        let mode = self.checked_mode(primitive)?;
        let stride = index_buffer.index_stride();
        let Some(index_type) = IndexType::from_stride(stride) else {
            return self.escalate(PreconditionError::UnsupportedIndexStride { stride });
        };
        if base_vertex != 0 {
            log::trace!("GlesRhi: base vertex {base_vertex} ignored ({min_index}..+{num_vertices})");
        }

        let draw = self.bind_vertex_input(None)?;
        self.applier
            .bind_element_array_buffer(index_buffer.native_buffer());
        if !draw {
            return Ok(());
        }

        let count = self.element_count(primitive, primitive_count)?;
        let offset = start_index as usize * index_type.size();
        self.applier
            .gl_mut()
            .draw_elements(mode, count, index_type, DataAddress::Offset(offset));
        self.stats.draw_calls += 1;
        self.stats.primitives_drawn += u64::from(primitive_count);
        Ok(())
    }

    /// Draws non-indexed primitives from persistent buffers, starting at `base_vertex`.
    pub fn draw_primitive(
        &mut self,
        primitive: PrimitiveType,
        base_vertex: u32,
        primitive_count: u32,
    ) -> Result<(), RhiError> {
        let mode = self.checked_mode(primitive)?;
        if !self.bind_vertex_input(None)? {
            return Ok(());
        }
        let count = self.element_count(primitive, primitive_count)?;
        self.applier.gl_mut().draw_arrays(mode, base_vertex, count);
        self.stats.draw_calls += 1;
        self.stats.primitives_drawn += u64::from(primitive_count);
        Ok(())
    }

    fn begin_up(&self) -> Result<(), RhiError> {
        if self.pending_up.is_some() {
            return self.escalate(PreconditionError::UpDrawInProgress);
        }
        Ok(())
    }

    /// Starts an indexed immediate-mode draw and returns the vertex and index
    /// memory to fill. The draw is issued by [`Self::end_draw_indexed_primitive_up`].
    ///
    /// ## Errors
    /// * `PreconditionError::UpDrawInProgress` - an immediate draw is pending.
    /// * `PreconditionError::UnsupportedIndexStride` - `index_stride != 2`.
    /// * `PreconditionError::ScratchArenaBusy` / `ScratchAllocationTooLarge` -
    ///   the data does not fit the arenas.
    #[allow(clippy::too_many_arguments)]
    pub fn begin_draw_indexed_primitive_up(
        &mut self,
        primitive: PrimitiveType,
        primitive_count: u32,
        num_vertices: u32,
        vertex_stride: u32,
        min_vertex_index: u32,
        num_indices: u32,
        index_stride: u32,
    ) -> Result<(&mut [u8], &mut [u8]), RhiError> {
        self.begin_up()?;
        let mode = self.checked_mode(primitive)?;
        if index_stride != 2 {
            return self.escalate(PreconditionError::UnsupportedIndexStride {
                stride: index_stride,
            });
        }
        let vertex_size = vertex_stride as usize * num_vertices as usize;
        let index_size = index_stride as usize * num_indices as usize;
        if let Err(err) = self.vertex_arena.check(vertex_size) {
            return self.escalate(err);
        }
        if let Err(err) = self.index_arena.check(index_size) {
            return self.escalate(err);
        }
        log::trace!("GlesRhi: immediate indexed draw from vertex {min_vertex_index}, {vertex_size} B + {index_size} B");

        self.pending_up = Some(UpDrawParams {
            primitive,
            mode,
            primitive_count,
            vertex_stride,
            vertex_size,
            indexed: true,
        });
        let vertices = self.vertex_arena.allocate(vertex_size)?;
        let indices = self.index_arena.allocate(index_size)?;
        Ok((vertices, indices))
    }

    /// Issues the draw started by [`Self::begin_draw_indexed_primitive_up`].
    ///
    /// Both arenas are released whether or not the draw is dispatched.
    pub fn end_draw_indexed_primitive_up(&mut self) -> Result<(), RhiError> {
        let params = self.take_pending_up(true)?;
        let result = self.dispatch_up(
            params,
            DataAddress::Client(self.vertex_arena.base_address()),
            Some(DataAddress::Client(self.index_arena.base_address())),
        );
        self.vertex_arena.deallocate();
        self.index_arena.deallocate();
        result
    }

    /// Starts a non-indexed immediate-mode draw and returns the vertex memory
    /// to fill. The draw is issued by [`Self::end_draw_primitive_up`].
    pub fn begin_draw_primitive_up(
        &mut self,
        primitive: PrimitiveType,
        primitive_count: u32,
        num_vertices: u32,
        vertex_stride: u32,
    ) -> Result<&mut [u8], RhiError> {
        self.begin_up()?;
        let mode = self.checked_mode(primitive)?;
        let vertex_size = vertex_stride as usize * num_vertices as usize;
        if let Err(err) = self.vertex_arena.check(vertex_size) {
            return self.escalate(err);
        }
        self.pending_up = Some(UpDrawParams {
            primitive,
            mode,
            primitive_count,
            vertex_stride,
            vertex_size,
            indexed: false,
        });
        Ok(self.vertex_arena.allocate(vertex_size)?)
    }

    /// Issues the draw started by [`Self::begin_draw_primitive_up`].
    ///
    /// The vertex arena is released whether or not the draw is dispatched.
    pub fn end_draw_primitive_up(&mut self) -> Result<(), RhiError> {
        let params = self.take_pending_up(false)?;
        let result = self.dispatch_up(
            params,
            DataAddress::Client(self.vertex_arena.base_address()),
            None,
        );
        self.vertex_arena.deallocate();
        result
    }

    fn take_pending_up(&mut self, indexed: bool) -> Result<UpDrawParams, RhiError> {
        match self.pending_up {
            Some(params) if params.indexed == indexed => {
                self.pending_up = None;
                Ok(params)
            }
            _ => self.escalate(PreconditionError::UpDrawNotBegun),
        }
    }

    fn dispatch_up(
        &mut self,
        params: UpDrawParams,
        vertices: DataAddress,
        indices: Option<DataAddress>,
    ) -> Result<(), RhiError> {
        log::trace!(
            "GlesRhi: dispatching {} B of immediate vertex data",
            params.vertex_size
        );
        let draw = self.bind_vertex_input(Some((vertices, params.vertex_stride)))?;
        if indices.is_some() {
            self.applier.bind_element_array_buffer(GlBuffer::NONE);
        }
        if !draw {
            return Ok(());
        }

        let count = self.element_count(params.primitive, params.primitive_count)?;
        match indices {
            Some(indices) => {
                self.applier
                    .gl_mut()
                    .draw_elements(params.mode, count, IndexType::U16, indices)
            }
            None => self.applier.gl_mut().draw_arrays(params.mode, 0, count),
        }
        self.stats.draw_calls_up += 1;
        self.stats.primitives_drawn_up += u64::from(params.primitive_count);
        Ok(())
    }

    /// Draws non-indexed primitives from caller-owned memory.
    pub fn draw_primitive_up(
        &mut self,
        primitive: PrimitiveType,
        primitive_count: u32,
        vertex_data: &[u8],
        vertex_stride: u32,
    ) -> Result<(), RhiError> {
        let mode = self.checked_mode(primitive)?;
        let params = UpDrawParams {
            primitive,
            mode,
            primitive_count,
            vertex_stride,
            vertex_size: vertex_data.len(),
            indexed: false,
        };
        self.dispatch_up(params, DataAddress::Client(vertex_data.as_ptr() as usize), None)
    }

    /// Draws indexed primitives from caller-owned memory. Indices are 16-bit.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_indexed_primitive_up(
        &mut self,
        primitive: PrimitiveType,
        min_vertex_index: u32,
        num_vertices: u32,
        primitive_count: u32,
        index_data: &[u8],
        index_stride: u32,
        vertex_data: &[u8],
        vertex_stride: u32,
    ) -> Result<(), RhiError> {
        let mode = self.checked_mode(primitive)?;
        if index_stride != 2 {
            return self.escalate(PreconditionError::UnsupportedIndexStride {
                stride: index_stride,
            });
        }
        log::trace!("GlesRhi: caller-owned indexed draw over vertices {min_vertex_index}..+{num_vertices}");
        let params = UpDrawParams {
            primitive,
            mode,
            primitive_count,
            vertex_stride,
            vertex_size: vertex_data.len(),
            indexed: true,
        };
        self.dispatch_up(
            params,
            DataAddress::Client(vertex_data.as_ptr() as usize),
            Some(DataAddress::Client(index_data.as_ptr() as usize)),
        )
    }

    // --- Render targets ---

    /// Sets the color and depth targets of the following draws, then resets
    /// the viewport to the full color target.
    ///
    /// When the color target is unchanged, no depth target is requested, and
    /// the current depth target has the color target's size, the depth target
    /// stays bound as a dummy instead of switching framebuffers. See
    /// [`Self::is_using_dummy_depth_stencil`].
    ///
    /// ## Errors
    /// * `ConfigurationError` - a target cannot be attached, or the framebuffer
    ///   is incomplete.
    pub fn set_render_target(
        &mut self,
        color: Option<&dyn RenderSurface>,
        depth: Option<&dyn RenderSurface>,
    ) -> Result<(), RhiError> {
        let color = color.map(SurfaceInfo::of);
        let mut depth = depth.map(SurfaceInfo::of);

        let mut dummy = false;
        if self.settings.reuse_depth_for_null_target && depth.is_none() {
            if let (Some(new_color), Some(current_color), Some(current_depth)) =
                (color, self.targets.color, self.targets.depth)
            {
                if new_color.id == current_color.id && current_depth.same_size(&new_color) {
                    depth = Some(current_depth);
                    dummy = true;
                }
            }
        }
        self.applier.set_dummy_depth_stencil(dummy);

        let targets = BoundTargets { color, depth };
        if self.applier.render_targets() == Some(targets) {
            self.targets = targets;
            return Ok(());
        }

        match (color, depth) {
            (None, None) => {
                self.applier.bind_framebuffer(GlFramebuffer::DEFAULT);
            }
            (None, Some(_)) => {
                // Depth-only: nothing to render color to, so only record the pair.
                self.targets = targets;
                self.applier.set_render_targets(Some(targets));
                return Ok(());
            }
            (Some(color), depth) => {
                let created =
                    self.framebuffers
                        .get_or_create(&mut self.applier, &color, depth.as_ref());
                let framebuffer = match created {
                    Ok(framebuffer) => framebuffer,
                    Err(err) => return self.escalate(err),
                };
                self.applier.bind_framebuffer(framebuffer);
            }
        }

        self.targets = targets;
        self.applier.set_render_targets(Some(targets));
        if let Some(color) = color {
            let flip_height = match color.backing {
                SurfaceBacking::Texture { .. } => None,
                _ => Some(color.height),
            };
            self.applier.set_flip_height(flip_height);
            self.applier.set_viewport(&Viewport {
                min_x: 0,
                min_y: 0,
                min_z: 0.0,
                max_x: color.width,
                max_y: color.height,
                max_z: 1.0,
            });
        }
        Ok(())
    }

    /// Deletes every framebuffer that renders to the destroyed surface.
    ///
    /// ## Returns
    /// The number of framebuffers deleted.
    pub fn on_render_target_destroyed(&mut self, id: SurfaceId) -> usize {
        let removed = self.framebuffers.invalidate_for_target(&mut self.applier, id);
        let references = |info: Option<SurfaceInfo>| info.is_some_and(|i| i.id == id);
        if references(self.targets.color) || references(self.targets.depth) {
            self.targets = BoundTargets::default();
            self.applier.set_render_targets(None);
            self.applier.set_dummy_depth_stencil(false);
        }
        removed
    }

    /// Deletes every cached framebuffer object.
    pub fn release_framebuffers(&mut self) {
        self.framebuffers.clear(&mut self.applier);
    }

    /// Clears the current render target.
    ///
    /// While the dummy depth buffer is bound, depth and stencil clears are
    /// dropped so the reused buffer keeps its contents.
    pub fn clear(&mut self, request: &ClearRequest) {
        let mut flags = ClearFlags::EMPTY;
        if request.color.is_some() {
            flags |= ClearFlags::COLOR;
        }
        if request.depth.is_some() {
            flags |= ClearFlags::DEPTH;
        }
        if request.stencil.is_some() {
            flags |= ClearFlags::STENCIL;
        }
        if self.applier.is_dummy_depth_stencil() {
            flags.remove(ClearFlags::DEPTH | ClearFlags::STENCIL);
        }
        self.applier.clear(
            flags,
            request.color.unwrap_or_default(),
            request.depth.unwrap_or(1.0),
            request.stencil.unwrap_or(0),
        );
    }

    // --- Pipeline state ---

    /// Sets fill mode, culling and depth bias.
    pub fn set_rasterizer_state(&mut self, state: &RasterizerState) {
        self.applier.set_rasterizer(state);
    }

    /// Sets the depth test.
    pub fn set_depth_state(&mut self, state: &DepthState) {
        self.applier.set_depth(state);
    }

    /// Sets the stencil test.
    pub fn set_stencil_state(&mut self, state: &StencilState) {
        self.applier.set_stencil(state);
    }

    /// Sets blending and the alpha test.
    pub fn set_blend_state(&mut self, state: &BlendState) {
        self.applier.set_blend(state);
    }

    /// Enables or disables writes to every color channel.
    pub fn set_color_write_enable(&mut self, enabled: bool) {
        let mask = if enabled {
            ColorWrites::ALL
        } else {
            ColorWrites::EMPTY
        };
        self.set_color_write_mask(mask);
    }

    /// Selects the color channels written.
    pub fn set_color_write_mask(&mut self, mask: ColorWrites) {
        self.applier.set_color_mask(mask);
    }

    /// Sets the viewport.
    pub fn set_viewport(&mut self, viewport: &Viewport) {
        self.applier.set_viewport(viewport);
    }

    /// Enables or disables the scissor test and sets its rectangle.
    pub fn set_scissor_rect(&mut self, enabled: bool, rect: &ScissorRect) {
        self.applier.set_scissor(enabled, rect);
    }

    // --- Context management ---

    /// Forgets every shadowed value. Call after the native context was touched
    /// by foreign code, reset or lost.
    pub fn invalidate_state(&mut self) {
        self.applier.invalidate();
    }

    /// Drops the pending stream table and declaration, and disables every
    /// attribute array.
    pub fn clear_gpu_resources(&mut self) {
        self.streams = [None; MAX_VERTEX_STREAMS];
        self.declaration = None;
        self.applier.prepare_attributes(AttribMask::EMPTY);
    }
}
