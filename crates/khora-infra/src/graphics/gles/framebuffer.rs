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

//! Framebuffer objects cached by the identities of their color and depth targets.

use super::state::StateApplier;
use khora_core::renderer::api::{
    FramebufferAttachment, FramebufferStatus, GlFramebuffer, SurfaceBacking, SurfaceId,
};
use khora_core::renderer::{ConfigurationError, NativeGl, SurfaceInfo};
use std::collections::HashMap;

/// Packs a `(color, depth)` pair into a cache key. A missing target contributes 0.
pub fn composite_key(color: Option<SurfaceId>, depth: Option<SurfaceId>) -> u32 {
    let half = |id: Option<SurfaceId>| id.map_or(0, |id| u32::from(id.get()));
    half(color) | (half(depth) << 16)
}

fn key_references(key: u32, id: SurfaceId) -> bool {
    let id = u32::from(id.get());
    (key & 0xFFFF) == id || (key >> 16) == id
}

/// A cache of framebuffer objects keyed by [`composite_key`].
#[derive(Debug, Default)]
pub struct FramebufferCache {
    entries: HashMap<u32, GlFramebuffer>,
    check_status: bool,
    created: u64,
    invalidated: u64,
}

impl FramebufferCache {
    /// Creates an empty cache. With `check_status`, every new framebuffer is
    /// validated before use.
    pub fn new(check_status: bool) -> Self {
        Self {
            check_status,
            ..Default::default()
        }
    }

    /// Number of cached framebuffers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached framebuffer for a pair, if any.
    pub fn get(&self, color: Option<SurfaceId>, depth: Option<SurfaceId>) -> Option<GlFramebuffer> {
        self.entries.get(&composite_key(color, depth)).copied()
    }

    /// Framebuffers created so far.
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Framebuffers deleted because one of their targets was destroyed.
    pub fn invalidated(&self) -> u64 {
        self.invalidated
    }

    /// Returns the framebuffer rendering to `color` and `depth`, creating it on
    /// first use. The back buffer maps to `GlFramebuffer::DEFAULT` and is
    /// never cached.
    ///
    /// A newly created framebuffer is left bound.
    ///
    /// ## Errors
    /// * `ConfigurationError::UnsupportedSurfaceBacking` - a target's storage
    ///   cannot be attached.
    /// * `ConfigurationError::IncompleteFramebuffer` - the completeness check failed.
    pub fn get_or_create<G: NativeGl>(
        &mut self,
        applier: &mut StateApplier<G>,
        color: &SurfaceInfo,
        depth: Option<&SurfaceInfo>,
    ) -> Result<GlFramebuffer, ConfigurationError> {
        if color.backing == SurfaceBacking::DefaultBackBuffer {
            return Ok(GlFramebuffer::DEFAULT);
        }
        let depth = depth.filter(|d| !d.placeholder);
        let key = composite_key(Some(color.id), depth.map(|d| d.id));
        if let Some(&framebuffer) = self.entries.get(&key) {
            log::trace!("FramebufferCache: hit for key {key:#010x}");
            return Ok(framebuffer);
        }

        let framebuffer = applier.gl_mut().gen_framebuffer();
        applier.bind_framebuffer(framebuffer);

        let attached = Self::attach_color(applier, color)
            .and_then(|()| depth.map_or(Ok(()), |d| Self::attach_depth(applier, d)));
        if let Err(err) = attached {
            Self::discard(applier, framebuffer);
            return Err(err);
        }

        if self.check_status {
            let status = applier.gl_mut().check_framebuffer_status();
            if status != FramebufferStatus::Complete {
                Self::discard(applier, framebuffer);
                return Err(ConfigurationError::IncompleteFramebuffer {
                    color: Some(color.id),
                    depth: depth.map(|d| d.id),
                    status,
                });
            }
        }

        log::info!(
            "FramebufferCache: created {framebuffer:?} for color {} / depth {}",
            color.id,
            depth.map_or_else(|| "none".to_string(), |d| d.id.to_string())
        );
        self.entries.insert(key, framebuffer);
        self.created += 1;
        Ok(framebuffer)
    }

    fn attach_color<G: NativeGl>(
        applier: &mut StateApplier<G>,
        color: &SurfaceInfo,
    ) -> Result<(), ConfigurationError> {
        let gl = applier.gl_mut();
        match color.backing {
            SurfaceBacking::Renderbuffer { buffer, .. } => {
                gl.framebuffer_renderbuffer(FramebufferAttachment::Color0, buffer);
            }
            SurfaceBacking::Texture { texture, .. } => {
                gl.framebuffer_texture_2d(FramebufferAttachment::Color0, texture, 0);
            }
            SurfaceBacking::DefaultBackBuffer | SurfaceBacking::Unbacked => {
                return Err(ConfigurationError::UnsupportedSurfaceBacking { surface: color.id });
            }
        }
        Ok(())
    }

    fn attach_depth<G: NativeGl>(
        applier: &mut StateApplier<G>,
        depth: &SurfaceInfo,
    ) -> Result<(), ConfigurationError> {
        let gl = applier.gl_mut();
        match depth.backing {
            SurfaceBacking::Renderbuffer { buffer, stencil } => {
                gl.framebuffer_renderbuffer(FramebufferAttachment::Depth, buffer);
                if let Some(stencil) = stencil {
                    gl.framebuffer_renderbuffer(FramebufferAttachment::Stencil, stencil);
                }
            }
            SurfaceBacking::Texture { texture, format } => {
                gl.framebuffer_texture_2d(FramebufferAttachment::Depth, texture, 0);
                if format.has_stencil() {
                    gl.framebuffer_texture_2d(FramebufferAttachment::Stencil, texture, 0);
                }
            }
            SurfaceBacking::DefaultBackBuffer | SurfaceBacking::Unbacked => {
                return Err(ConfigurationError::UnsupportedSurfaceBacking { surface: depth.id });
            }
        }
        Ok(())
    }

    fn discard<G: NativeGl>(applier: &mut StateApplier<G>, framebuffer: GlFramebuffer) {
        applier.gl_mut().delete_framebuffer(framebuffer);
        applier.forget_framebuffer();
    }

    /// Deletes every framebuffer that references `id` as its color or depth target.
    ///
    /// ## Returns
    /// The number of framebuffers deleted.
    pub fn invalidate_for_target<G: NativeGl>(
        &mut self,
        applier: &mut StateApplier<G>,
        id: SurfaceId,
    ) -> usize {
        let mut removed = 0;
        // Restart the scan after every removal until a full pass finds nothing.
        loop {
            let hit = self
                .entries
                .iter()
                .find(|&(&key, _)| key_references(key, id))
                .map(|(&key, &framebuffer)| (key, framebuffer));
            let Some((key, framebuffer)) = hit else {
                break;
            };
            self.entries.remove(&key);
            if applier.shadow().framebuffer == Some(framebuffer) {
                applier.forget_framebuffer();
            }
            applier.gl_mut().delete_framebuffer(framebuffer);
            removed += 1;
        }
        if removed > 0 {
            log::debug!("FramebufferCache: target {id} destroyed, {removed} framebuffer(s) deleted");
            self.invalidated += removed as u64;
        }
        removed
    }

    /// Deletes every cached framebuffer.
    pub fn clear<G: NativeGl>(&mut self, applier: &mut StateApplier<G>) {
        for (_, framebuffer) in self.entries.drain() {
            if applier.shadow().framebuffer == Some(framebuffer) {
                applier.forget_framebuffer();
            }
            applier.gl_mut().delete_framebuffer(framebuffer);
        }
    }
}
