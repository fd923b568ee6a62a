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

//! Running counters of the dispatch core and their metric export.

use crate::telemetry::metrics::{Metric, MetricId};

/// Namespace of every metric exported from [`RhiStats`].
pub const RHI_METRICS_NAMESPACE: &str = "rhi";

/// Running counters of the dispatch core. They are never reset implicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RhiStats {
    /// Draws dispatched from persistent buffers.
    pub draw_calls: u64,
    /// Primitives dispatched from persistent buffers.
    pub primitives_drawn: u64,
    /// Immediate-mode draws dispatched.
    pub draw_calls_up: u64,
    /// Primitives dispatched from immediate-mode data.
    pub primitives_drawn_up: u64,
    /// Draws skipped because attribute data was missing.
    pub skipped_draws: u64,
    /// Attribute bindings that left a slot the shader reads unbound.
    pub invalid_meshes: u64,
    /// Zero-stride attributes replaced by a fallback buffer.
    pub degraded_bindings: u64,
    /// Framebuffer objects created.
    pub framebuffers_created: u64,
    /// Framebuffer objects deleted because a target was destroyed.
    pub framebuffer_invalidations: u64,
    /// Depth or stencil requests overridden while the dummy depth buffer is bound.
    pub depth_state_overrides: u64,
    /// Largest vertex arena allocation seen, in bytes.
    pub scratch_vertex_high_water: u64,
    /// Largest index arena allocation seen, in bytes.
    pub scratch_index_high_water: u64,
}

impl RhiStats {
    /// Exports the counters as telemetry metrics.
    pub fn to_metrics(&self) -> Vec<Metric> {
        let counter = |name: &str, description: &str, value: u64| {
            Metric::new_counter(
                MetricId::new(RHI_METRICS_NAMESPACE, name),
                description,
                value,
            )
        };
        let draws = |source: &str, value: u64| {
            Metric::new_counter(
                MetricId::new(RHI_METRICS_NAMESPACE, "draw_calls").with_label("source", source),
                "Draw calls dispatched",
                value,
            )
        };

        vec![
            draws("buffer", self.draw_calls),
            draws("immediate", self.draw_calls_up),
            counter(
                "primitives_drawn",
                "Primitives dispatched from persistent buffers",
                self.primitives_drawn,
            ),
            counter(
                "primitives_drawn_up",
                "Primitives dispatched from immediate data",
                self.primitives_drawn_up,
            ),
            counter("skipped_draws", "Draws skipped for missing data", self.skipped_draws),
            counter("invalid_meshes", "Meshes with unbound attributes", self.invalid_meshes),
            counter(
                "degraded_bindings",
                "Zero-stride attributes replaced by a fallback",
                self.degraded_bindings,
            ),
            counter(
                "framebuffers_created",
                "Framebuffer objects created",
                self.framebuffers_created,
            ),
            counter(
                "framebuffer_invalidations",
                "Framebuffer objects deleted with their target",
                self.framebuffer_invalidations,
            ),
            counter(
                "depth_state_overrides",
                "Depth or stencil requests overridden by the dummy depth buffer",
                self.depth_state_overrides,
            ),
            Metric::new_gauge(
                MetricId::new(RHI_METRICS_NAMESPACE, "scratch_high_water")
                    .with_label("arena", "vertex"),
                "Largest immediate vertex allocation",
                "bytes",
                self.scratch_vertex_high_water as f64,
            ),
            Metric::new_gauge(
                MetricId::new(RHI_METRICS_NAMESPACE, "scratch_high_water")
                    .with_label("arena", "index"),
                "Largest immediate index allocation",
                "bytes",
                self.scratch_index_high_water as f64,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::metrics::MetricType;

    #[test]
    fn test_metrics_carry_namespace_and_labels() {
        let stats = RhiStats {
            draw_calls: 4,
            draw_calls_up: 2,
            invalid_meshes: 1,
            ..Default::default()
        };
        let metrics = stats.to_metrics();

        assert!(metrics
            .iter()
            .all(|m| m.metadata.id.namespace == RHI_METRICS_NAMESPACE));

        let immediate = metrics
            .iter()
            .find(|m| m.metadata.id.to_string() == "rhi:draw_calls[source=immediate]")
            .unwrap();
        assert_eq!(immediate.value.as_counter(), Some(2));

        let invalid = metrics
            .iter()
            .find(|m| m.metadata.id.name == "invalid_meshes")
            .unwrap();
        assert_eq!(invalid.metadata.metric_type, MetricType::Counter);
        assert_eq!(invalid.value.as_counter(), Some(1));
    }
}
