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

//! Metric identifiers and values.

use std::fmt::{self, Display};
use std::time::Instant;

/// A structured identifier for a metric: a namespace, a name and sorted labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricId {
    /// The broad category of the metric (e.g. "rhi").
    pub namespace: String,
    /// The specific name of the metric (e.g. "draw_calls").
    pub name: String,
    /// Key-value pairs for dimensional filtering, sorted by key.
    pub labels: Vec<(String, String)>,
}

impl MetricId {
    /// Creates a new `MetricId` with a namespace and a name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            labels: Vec::new(),
        }
    }

    /// Adds a label. Labels stay sorted by key so equal ids hash equally.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self.labels.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)?;
        if !self.labels.is_empty() {
            let labels = self
                .labels
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "[{labels}]")?;
        }
        Ok(())
    }
}

/// The fundamental type of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// A value that only increases.
    Counter,
    /// A value that can go up or down.
    Gauge,
}

/// The value of a metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// A monotonically increasing count.
    Counter(u64),
    /// A sampled level.
    Gauge(f64),
}

impl MetricValue {
    /// Returns the [`MetricType`] corresponding to this value.
    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricValue::Counter(_) => MetricType::Counter,
            MetricValue::Gauge(_) => MetricType::Gauge,
        }
    }

    /// Returns the value as an `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Counter(v) => *v as f64,
            MetricValue::Gauge(v) => *v,
        }
    }

    /// Returns the value if it is a `Counter`.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            MetricValue::Gauge(_) => None,
        }
    }

    /// Returns the value if it is a `Gauge`.
    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            MetricValue::Gauge(v) => Some(*v),
            MetricValue::Counter(_) => None,
        }
    }
}

/// Descriptive metadata about a metric.
#[derive(Debug, Clone)]
pub struct MetricMetadata {
    /// The metric's identifier.
    pub id: MetricId,
    /// The type of the metric.
    pub metric_type: MetricType,
    /// What the metric measures.
    pub description: String,
    /// The unit of measurement (e.g. "count", "bytes").
    pub unit: String,
    /// When the value was sampled.
    pub sampled_at: Instant,
}

/// A metric value together with its metadata.
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric's metadata.
    pub metadata: MetricMetadata,
    /// The sampled value.
    pub value: MetricValue,
}

impl Metric {
    fn sample(
        id: MetricId,
        description: impl Into<String>,
        unit: impl Into<String>,
        value: MetricValue,
    ) -> Self {
        Self {
            metadata: MetricMetadata {
                id,
                metric_type: value.metric_type(),
                description: description.into(),
                unit: unit.into(),
                sampled_at: Instant::now(),
            },
            value,
        }
    }

    /// Creates a `Counter` metric, measured in "count".
    pub fn new_counter(id: MetricId, description: impl Into<String>, value: u64) -> Self {
        Self::sample(id, description, "count", MetricValue::Counter(value))
    }

    /// Creates a `Gauge` metric.
    pub fn new_gauge(
        id: MetricId,
        description: impl Into<String>,
        unit: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::sample(id, description, unit, MetricValue::Gauge(value))
    }
}
