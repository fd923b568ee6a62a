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

//! Runtime settings of the render hardware interface.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default vertex scratch arena size, in KiB.
pub const DEFAULT_VERTEX_SCRATCH_KB: u32 = 32;

/// What happens when a configuration error or a precondition violation is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViolationPolicy {
    /// Log the diagnostic and panic.
    #[default]
    Abort,
    /// Log the diagnostic and return the error to the caller.
    ReturnError,
}

/// What a draw does when the active shader reads a slot nothing was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingAttributePolicy {
    /// Switch the shader to its flat-color fallback and draw anyway.
    FallbackColor,
    /// Skip the draw entirely.
    SkipDraw,
}

impl Default for MissingAttributePolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            MissingAttributePolicy::FallbackColor
        } else {
            MissingAttributePolicy::SkipDraw
        }
    }
}

/// The value fed to zero-stride attributes other than blend weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NullColor {
    /// Opaque black.
    #[default]
    Black,
    /// Opaque white.
    White,
}

impl NullColor {
    /// The texel written to the fallback buffer, as RGBA8.
    pub fn rgba8(self) -> [u8; 4] {
        match self {
            NullColor::Black => [0x00, 0x00, 0x00, 0xff],
            NullColor::White => [0xff, 0xff, 0xff, 0xff],
        }
    }
}

/// Settings of the render hardware interface.
///
/// Every field has a default, so a settings file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhiSettings {
    /// Size of the immediate-mode vertex arena in KiB. Zero selects the default.
    pub vertex_scratch_kb: u32,
    /// Size of the immediate-mode index arena in KiB. Zero derives it from the
    /// vertex arena.
    pub index_scratch_kb: u32,
    /// How configuration errors and precondition violations escalate.
    pub violation_policy: ViolationPolicy,
    /// What a draw with missing attribute data does.
    pub missing_attribute_policy: MissingAttributePolicy,
    /// The value zero-stride color-like attributes read.
    pub null_color: NullColor,
    /// Draws every primitive as a single triangle, to isolate fill-rate cost.
    pub debug_single_triangle: bool,
    /// Added to every constant depth bias before it is scaled.
    pub depth_bias_offset: f32,
    /// Keeps the previous depth buffer bound when a target is set without one,
    /// instead of switching framebuffers.
    pub reuse_depth_for_null_target: bool,
    /// Validates every new framebuffer with a completeness check.
    pub check_framebuffer_status: bool,
}

impl Default for RhiSettings {
    fn default() -> Self {
        Self {
            vertex_scratch_kb: DEFAULT_VERTEX_SCRATCH_KB,
            index_scratch_kb: 0,
            violation_policy: ViolationPolicy::default(),
            missing_attribute_policy: MissingAttributePolicy::default(),
            null_color: NullColor::default(),
            debug_single_triangle: false,
            depth_bias_offset: 0.0,
            reuse_depth_for_null_target: true,
            check_framebuffer_status: true,
        }
    }
}

impl RhiSettings {
    /// Parses settings from a JSON document.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse RHI settings")
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read RHI settings from '{}'", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("In '{}'", path.display()))
    }

    /// Capacity of the vertex arena in bytes.
    pub fn vertex_scratch_bytes(&self) -> usize {
        let kb = if self.vertex_scratch_kb == 0 {
            DEFAULT_VERTEX_SCRATCH_KB
        } else {
            self.vertex_scratch_kb
        };
        kb as usize * 1024
    }

    /// Capacity of the index arena in bytes.
    pub fn index_scratch_bytes(&self) -> usize {
        if self.index_scratch_kb == 0 {
            self.vertex_scratch_bytes() / 32
        } else {
            self.index_scratch_kb as usize * 1024
        }
    }
}
