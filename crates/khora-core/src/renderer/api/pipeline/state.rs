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

//! State descriptors consumed by the `set_*_state` family.

use super::enums::*;
use crate::khora_bitflags;

/// Describes rasterization: fill mode, face culling and depth bias.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RasterizerState {
    /// How polygons are filled.
    pub fill_mode: FillMode,
    /// Which faces are culled.
    pub cull_mode: CullMode,
    /// Constant depth bias, in normalized depth units. It is scaled to the
    /// 24-bit depth range before it reaches the native API.
    pub depth_bias: f32,
    /// Depth bias that scales with the polygon's depth slope.
    pub slope_scale_depth_bias: f32,
}

/// Describes the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthState {
    /// If `true`, fragments are tested against the depth buffer.
    pub test_enabled: bool,
    /// If `true`, depth values are written to the depth buffer.
    pub write_enabled: bool,
    /// The comparison used while the test is enabled.
    pub compare: CompareFunction,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            test_enabled: true,
            write_enabled: true,
            compare: CompareFunction::LessEqual,
        }
    }
}

/// Describes the stencil test and operations for one face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StencilFaceState {
    /// The comparison function used for the stencil test.
    pub compare: CompareFunction,
    /// The operation to perform if the stencil test fails.
    pub fail_op: StencilOperation,
    /// The operation to perform if the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOperation,
    /// The operation to perform if both the stencil and depth tests pass.
    pub pass_op: StencilOperation,
}

/// Describes the stencil test.
///
/// In one-sided mode `face` applies to both faces. In two-sided mode `face`
/// applies to clockwise (back) faces and `ccw_face` to counter-clockwise
/// (front) faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilState {
    /// If `true`, the stencil test is enabled.
    pub enabled: bool,
    /// If `true`, `ccw_face` is honoured separately.
    pub two_sided: bool,
    /// Primary face state.
    pub face: StencilFaceState,
    /// Counter-clockwise face state, used in two-sided mode only.
    pub ccw_face: StencilFaceState,
    /// Reference value for the comparison.
    pub reference: u32,
    /// Mask applied when reading the stencil buffer.
    pub read_mask: u32,
    /// Mask applied when writing the stencil buffer.
    pub write_mask: u32,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            enabled: false,
            two_sided: false,
            face: StencilFaceState::default(),
            ccw_face: StencilFaceState::default(),
            reference: 0,
            read_mask: 0xFF,
            write_mask: 0xFF,
        }
    }
}

/// Describes a complete blend equation for a set of color components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponentDescriptor {
    /// The blend factor for the source color (from the fragment shader).
    pub src_factor: BlendFactor,
    /// The blend factor for the destination color (already in the framebuffer).
    pub dst_factor: BlendFactor,
    /// The operation to combine the source and destination factors.
    pub operation: BlendOperation,
}

impl BlendComponentDescriptor {
    /// `src * 1 + dst * 0`, i.e. blending has no visible effect.
    pub const REPLACE: Self = Self {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::Zero,
        operation: BlendOperation::Add,
    };
}

/// Fixed-function alpha test parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaTest {
    /// The comparison applied to the fragment alpha.
    pub compare: CompareFunction,
    /// The reference alpha, in `[0.0, 1.0]`.
    pub reference: f32,
}

/// Describes color blending and the alpha test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendState {
    /// If `true`, blending is enabled.
    pub enabled: bool,
    /// If `true`, `alpha` is applied separately; otherwise `color` drives both.
    pub separate_alpha: bool,
    /// The blend equation for the RGB components.
    pub color: BlendComponentDescriptor,
    /// The blend equation for the alpha component.
    pub alpha: BlendComponentDescriptor,
    /// The alpha test, if enabled.
    pub alpha_test: Option<AlphaTest>,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            enabled: false,
            separate_alpha: false,
            color: BlendComponentDescriptor::REPLACE,
            alpha: BlendComponentDescriptor::REPLACE,
            alpha_test: None,
        }
    }
}

khora_bitflags! {
    /// A mask controlling which color channels are written to a render target.
    pub struct ColorWrites: u8 {
        /// Enable writes to the red channel.
        const RED = 1 << 0;
        /// Enable writes to the green channel.
        const GREEN = 1 << 1;
        /// Enable writes to the blue channel.
        const BLUE = 1 << 2;
        /// Enable writes to the alpha channel.
        const ALPHA = 1 << 3;
        /// Enable writes to all four channels.
        const ALL = 0b1111;
    }
}

khora_bitflags! {
    /// The buffers touched by a clear.
    pub struct ClearFlags: u8 {
        /// The color attachment.
        const COLOR = 1 << 0;
        /// The depth attachment.
        const DEPTH = 1 << 1;
        /// The stencil attachment.
        const STENCIL = 1 << 2;
    }
}

/// A viewport in render-target pixels, with a top-left origin, plus its depth range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub min_x: u32,
    /// Top edge.
    pub min_y: u32,
    /// Near depth.
    pub min_z: f32,
    /// Right edge (exclusive).
    pub max_x: u32,
    /// Bottom edge (exclusive).
    pub max_y: u32,
    /// Far depth.
    pub max_z: f32,
}

/// A scissor rectangle in render-target pixels, with a top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScissorRect {
    /// Left edge.
    pub min_x: u32,
    /// Top edge.
    pub min_y: u32,
    /// Right edge (exclusive).
    pub max_x: u32,
    /// Bottom edge (exclusive).
    pub max_y: u32,
}

/// A request to clear some of the current render target's attachments.
/// `None` leaves the corresponding attachment untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClearRequest {
    /// Linear RGBA clear color.
    pub color: Option<[f32; 4]>,
    /// Clear depth.
    pub depth: Option<f32>,
    /// Clear stencil value.
    pub stencil: Option<u32>,
}

impl ClearRequest {
    /// Clears every attachment with the conventional values.
    pub fn all(color: [f32; 4]) -> Self {
        Self {
            color: Some(color),
            depth: Some(1.0),
            stencil: Some(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_writes_all_contains_every_channel() {
        let rgba = ColorWrites::RED | ColorWrites::GREEN | ColorWrites::BLUE | ColorWrites::ALPHA;
        assert_eq!(rgba, ColorWrites::ALL);
        assert!(!ColorWrites::ALL.without(ColorWrites::ALPHA).contains(ColorWrites::ALL));
    }

    #[test]
    fn test_default_blend_state_is_opaque() {
        let blend = BlendState::default();
        assert!(!blend.enabled);
        assert_eq!(blend.color, BlendComponentDescriptor::REPLACE);
        assert!(blend.alpha_test.is_none());
    }

    #[test]
    fn test_clear_all_touches_every_attachment() {
        let req = ClearRequest::all([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(req.depth, Some(1.0));
        assert_eq!(req.stencil, Some(0));
        assert!(ClearRequest::default().color.is_none());
    }
}
