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

//! Enums for fixed-function pipeline state.

/// The kind of primitive a draw call assembles from its vertices or indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Every three elements form an isolated triangle.
    TriangleList,
    /// Each element after the first two forms a triangle with the previous two.
    TriangleStrip,
    /// Every two elements form an isolated line.
    LineList,
    /// Every four elements form a quad. Not available on GLES-class hardware.
    QuadList,
    /// Point sprites. Not available through the generic draw path.
    PointSprite,
}

/// The native topology a [`PrimitiveType`] is translated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    /// `GL_TRIANGLES`.
    Triangles,
    /// `GL_TRIANGLE_STRIP`.
    TriangleStrip,
    /// `GL_LINES`.
    Lines,
}

/// Which faces are discarded before rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// No culling is performed.
    #[default]
    None,
    /// Cull front-facing triangles.
    Front,
    /// Cull back-facing triangles.
    Back,
}

/// How polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// Polygons are filled.
    #[default]
    Solid,
    /// Polygons are drawn as outlines.
    Wireframe,
    /// Only polygon vertices are drawn.
    Point,
}

/// The comparison function used for depth, stencil and alpha testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// The test never passes.
    Never,
    /// The test passes if the new value is less than the existing value.
    Less,
    /// The test passes if the new value is equal to the existing value.
    Equal,
    /// The test passes if the new value is less than or equal to the existing value.
    LessEqual,
    /// The test passes if the new value is greater than the existing value.
    Greater,
    /// The test passes if the new value is not equal to the existing value.
    NotEqual,
    /// The test passes if the new value is greater than or equal to the existing value.
    GreaterEqual,
    /// The test always passes.
    #[default]
    Always,
}

/// An operation to perform on a stencil buffer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOperation {
    /// Keep the existing stencil value.
    #[default]
    Keep,
    /// Set the stencil value to 0.
    Zero,
    /// Replace the stencil value with the reference value.
    Replace,
    /// Bitwise invert the stencil value.
    Invert,
    /// Increment the stencil value, clamping at the maximum value.
    IncrementClamp,
    /// Decrement the stencil value, clamping at 0.
    DecrementClamp,
    /// Increment the stencil value, wrapping to 0 on overflow.
    IncrementWrap,
    /// Decrement the stencil value, wrapping to the maximum value on underflow.
    DecrementWrap,
}

/// Selects which face a stencil function or operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilFace {
    /// Front-facing (counter-clockwise) primitives.
    Front,
    /// Back-facing (clockwise) primitives.
    Back,
    /// Both faces at once.
    FrontAndBack,
}

/// A factor in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// `0.0`.
    Zero,
    /// `1.0`.
    One,
    /// The source color.
    SrcColor,
    /// `1.0 - src.rgb`.
    OneMinusSrcColor,
    /// The source alpha (`src.a`).
    SrcAlpha,
    /// `1.0 - src.a`.
    OneMinusSrcAlpha,
    /// The destination color.
    DstColor,
    /// `1.0 - dst.rgb`.
    OneMinusDstColor,
    /// The destination alpha.
    DstAlpha,
    /// `1.0 - dst.a`.
    OneMinusDstAlpha,
}

/// The operation used to combine source and destination colors in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOperation {
    /// `source + destination`.
    #[default]
    Add,
    /// `source - destination`.
    Subtract,
    /// `destination - source`.
    ReverseSubtract,
    /// `min(source, destination)`.
    Min,
    /// `max(source, destination)`.
    Max,
}

/// Native server-side capabilities toggled with enable/disable calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Face culling.
    CullFace,
    /// Depth testing.
    DepthTest,
    /// Stencil testing.
    StencilTest,
    /// Color blending.
    Blend,
    /// Fixed-function alpha test.
    AlphaTest,
    /// Scissor test.
    ScissorTest,
    /// Polygon offset for filled polygons.
    PolygonOffsetFill,
    /// Polygon offset for lines.
    PolygonOffsetLine,
    /// Polygon offset for points.
    PolygonOffsetPoint,
}
