//! Observability: operation counters and the sink they flow through.
//!
//! Codec logic never touches `metrics` directly; every event goes through
//! `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventState};
pub use sink::{MetricsEvent, MetricsSink, OpKind, metrics_reset_all, metrics_snapshot, with_metrics_sink};
