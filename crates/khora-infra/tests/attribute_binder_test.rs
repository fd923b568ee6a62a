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

//! Integration tests for per-draw attribute binding: proportionality to the
//! program's usage, degraded versus missing data, and the dispatch outcome.

mod common;

use common::*;
use khora_core::renderer::api::*;
use khora_infra::graphics::gles::binder::{
    bind_attributes, AttribSource, FallbackBuffers, FALLBACK_STRIDE, FALLBACK_TEXELS,
    NULL_WEIGHT_TEXEL,
};
use khora_infra::graphics::gles::StateApplier;

fn applier() -> StateApplier<RecordingGl> {
    init_logging();
    StateApplier::new(RecordingGl::default(), 0.0)
}

fn streams(entries: &[(usize, u32, u32)]) -> [Option<VertexStream>; MAX_VERTEX_STREAMS] {
    let mut table = [None; MAX_VERTEX_STREAMS];
    for &(index, buffer, stride) in entries {
        table[index] = Some(VertexStream {
            buffer: GlBuffer(buffer),
            stride,
            offset: 0,
        });
    }
    table
}

fn pointers(calls: &[GlCall]) -> Vec<(u32, AttribBinding)> {
    calls
        .iter()
        .filter_map(|c| match c {
            GlCall::VertexAttribPointer(slot, binding) => Some((*slot, *binding)),
            _ => None,
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Proportionality
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_binding_is_proportional_to_program_usage() {
    use VertexElementType as T;
    use VertexElementUsage as U;
    let declaration = VertexDeclaration::new(
        "Wide",
        vec![
            VertexElement::new(0, 0, T::Float3, U::Position, 0),
            VertexElement::new(0, 12, T::PackedNormal, U::Normal, 0),
            VertexElement::new(0, 16, T::Color, U::Color, 0),
            VertexElement::new(0, 20, T::PackedNormal, U::Tangent, 0),
            VertexElement::new(0, 24, T::Half2, U::TextureCoordinate, 0),
            VertexElement::new(0, 28, T::Half2, U::TextureCoordinate, 1),
        ],
    );
    let table = streams(&[(0, 5, 32)]);
    let shader = MockShader::reading(&[POSITION]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::Black);

    let report = bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Streams(&table),
        &shader,
        &mut fallbacks,
    )
    .unwrap();

    assert!(report.success);
    assert_eq!(report.bound, AttribMask::slot(POSITION));
    let bound = pointers(&applier.gl().calls);
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].0, POSITION);
    assert_eq!(bound[0].1.address, DataAddress::Offset(0));
}

#[test]
fn test_unsupported_element_type_is_a_configuration_error() {
    let declaration = VertexDeclaration::new(
        "Packed",
        vec![VertexElement::new(
            0,
            0,
            VertexElementType::Pos3N,
            VertexElementUsage::Position,
            0,
        )],
    );
    let table = streams(&[(0, 5, 8)]);
    let shader = MockShader::reading(&[POSITION]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::Black);

    let result = bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Streams(&table),
        &shader,
        &mut fallbacks,
    );
    assert!(result.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Degraded versus missing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zero_stride_stream_is_degraded_not_missing() {
    let declaration = position_normal_color_declaration();
    let table = streams(&[(0, 5, 24), (1, 6, 0)]);
    let shader = MockShader::reading(&[POSITION, COLOR0]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::Black);

    let report = bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Streams(&table),
        &shader,
        &mut fallbacks,
    )
    .unwrap();

    assert!(report.success);
    assert!(report.missing.is_empty());
    assert_eq!(
        report.degraded,
        vec![VertexSemantic::new(VertexElementUsage::Color, 0)]
    );

    let calls = &applier.gl().calls;
    let created = calls.iter().find_map(|c| match c {
        GlCall::CreateStaticBuffer {
            buffer,
            len,
            first_texel,
        } => Some((*buffer, *len, *first_texel)),
        _ => None,
    });
    let (fallback, len, texel) = created.expect("fallback buffer created");
    assert_eq!(len, FALLBACK_TEXELS * 4);
    assert_eq!(texel, NullColor::Black.rgba8());

    let color = pointers(calls)
        .into_iter()
        .find(|(slot, _)| *slot == COLOR0)
        .map(|(_, binding)| binding)
        .unwrap();
    assert_eq!(color.buffer, fallback);
    assert_eq!(color.stride, FALLBACK_STRIDE);
    assert_eq!(color.count, 4);
    assert_eq!(color.format, AttribFormat::UnsignedByte);
    assert!(color.normalize);
}

#[test]
fn test_blend_weight_fallback_uses_null_weight_texel() {
    let declaration = VertexDeclaration::new(
        "Skinned",
        vec![
            VertexElement::new(0, 0, VertexElementType::Float3, VertexElementUsage::Position, 0),
            VertexElement::new(1, 0, VertexElementType::UByte4N, VertexElementUsage::BlendWeight, 0),
        ],
    );
    let table = streams(&[(0, 5, 12), (1, 6, 0)]);
    let shader = MockShader::reading(&[POSITION, 1]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::White);

    bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Streams(&table),
        &shader,
        &mut fallbacks,
    )
    .unwrap();

    assert!(applier.gl().calls.contains(&GlCall::CreateStaticBuffer {
        buffer: GlBuffer(101),
        len: FALLBACK_TEXELS * 4,
        first_texel: NULL_WEIGHT_TEXEL.to_ne_bytes(),
    }));
}

#[test]
fn test_fallback_buffers_are_created_once() {
    let declaration = position_normal_color_declaration();
    let table = streams(&[(0, 5, 24), (1, 6, 0)]);
    let shader = MockShader::reading(&[POSITION, COLOR0]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::White);

    for _ in 0..3 {
        bind_attributes(
            &mut applier,
            &declaration,
            AttribSource::Streams(&table),
            &shader,
            &mut fallbacks,
        )
        .unwrap();
    }

    let created = applier
        .gl()
        .count(|c| matches!(c, GlCall::CreateStaticBuffer { .. }));
    assert_eq!(created, 1);
}

#[test]
fn test_empty_stream_reports_missing_semantic() {
    let declaration = position_normal_color_declaration();
    let table = streams(&[(0, 5, 24)]);
    let shader = MockShader::reading(&[POSITION, COLOR0]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::Black);

    let report = bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Streams(&table),
        &shader,
        &mut fallbacks,
    )
    .unwrap();

    assert!(!report.success);
    assert!(report.degraded.is_empty());
    assert_eq!(
        report.missing,
        vec![VertexSemantic::new(VertexElementUsage::Color, 0)]
    );
    assert_eq!(report.bound, AttribMask::slot(POSITION));
}

#[test]
fn test_immediate_source_reads_stream_zero_only() {
    let declaration = position_normal_color_declaration();
    let shader = MockShader::reading(&[POSITION, NORMAL, COLOR0]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::Black);

    let report = bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Immediate {
            address: DataAddress::Client(0x1000),
            stride: 24,
        },
        &shader,
        &mut fallbacks,
    )
    .unwrap();

    // Color0 lives in stream 1, which immediate-mode data cannot feed.
    assert!(!report.success);
    let bound = pointers(&applier.gl().calls);
    assert_eq!(bound.len(), 2);
    assert_eq!(bound[1].0, NORMAL);
    assert_eq!(bound[1].1.address, DataAddress::Client(0x1000 + 12));
    assert_eq!(bound[1].1.buffer, GlBuffer::NONE);
}

#[test]
fn test_large_stream_offset_is_added_without_overflow() {
    let declaration = position_normal_color_declaration();
    let mut table = [None; MAX_VERTEX_STREAMS];
    table[0] = Some(VertexStream {
        buffer: GlBuffer(5),
        stride: 24,
        offset: u32::MAX - 4,
    });
    let shader = MockShader::reading(&[POSITION, NORMAL]);
    let mut applier = applier();
    let mut fallbacks = FallbackBuffers::new(NullColor::Black);

    let report = bind_attributes(
        &mut applier,
        &declaration,
        AttribSource::Streams(&table),
        &shader,
        &mut fallbacks,
    )
    .unwrap();

    assert!(report.success);
    let bound = pointers(&applier.gl().calls);
    assert_eq!(bound[1].0, NORMAL);
    assert_eq!(
        bound[1].1.address,
        DataAddress::Offset(u32::MAX as usize - 4 + 12)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// End to end through the dispatcher
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mesh_without_normals_is_skipped_for_a_lit_program() {
    let mut rhi = rhi(
        MockShader::reading(&[POSITION, NORMAL, COLOR0]),
        test_settings(),
    );
    let vertices = MockVertexBuffer(GlBuffer(5));
    rhi.set_stream_source(0, Some(&vertices), 16, 0).unwrap();
    rhi.set_vertex_declaration(position_color_declaration());

    rhi.draw_primitive(PrimitiveType::TriangleList, 0, 4).unwrap();

    assert!(rhi.native().draws().is_empty());
    assert!(!rhi.native().calls.iter().any(|c| matches!(
        c,
        GlCall::VertexAttribPointer(NORMAL, _) | GlCall::EnableAttrib(NORMAL)
    )));
    let report = rhi.last_bind_report().unwrap();
    assert!(!report.success);
    assert!(!report.bound.has_slot(NORMAL));
    assert_eq!(
        report.missing,
        vec![VertexSemantic::new(VertexElementUsage::Normal, 0)]
    );
    let stats = rhi.stats();
    assert_eq!(stats.invalid_meshes, 1);
    assert_eq!(stats.skipped_draws, 1);
    assert_eq!(stats.draw_calls, 0);
}

#[test]
fn test_mesh_with_normals_draws_for_a_lit_program() {
    let mut rhi = rhi(
        MockShader::reading(&[POSITION, NORMAL, COLOR0]),
        test_settings(),
    );
    let positions = MockVertexBuffer(GlBuffer(5));
    let colors = MockVertexBuffer(GlBuffer(6));
    rhi.set_stream_source(0, Some(&positions), 24, 0).unwrap();
    rhi.set_stream_source(1, Some(&colors), 4, 0).unwrap();
    rhi.set_vertex_declaration(position_normal_color_declaration());

    rhi.draw_primitive(PrimitiveType::TriangleList, 0, 4).unwrap();

    assert_eq!(
        rhi.native().draws(),
        vec![GlCall::DrawArrays(PrimitiveMode::Triangles, 0, 12)]
    );
    assert!(rhi.last_bind_report().unwrap().success);
    assert_eq!(rhi.stats().invalid_meshes, 0);
}

#[test]
fn test_fallback_color_policy_draws_with_the_fallback_program() {
    let settings = RhiSettings {
        missing_attribute_policy: MissingAttributePolicy::FallbackColor,
        ..test_settings()
    };
    let mut rhi = rhi(MockShader::reading(&[POSITION, NORMAL, COLOR0]), settings);
    let vertices = MockVertexBuffer(GlBuffer(5));
    rhi.set_stream_source(0, Some(&vertices), 16, 0).unwrap();
    rhi.set_vertex_declaration(position_color_declaration());

    rhi.draw_primitive(PrimitiveType::TriangleList, 0, 1).unwrap();

    assert_eq!(rhi.native().draws().len(), 1);
    assert_eq!(rhi.shader().fallback_selections, 1);
    assert_eq!(rhi.stats().invalid_meshes, 1);
    assert_eq!(rhi.stats().skipped_draws, 0);
}
