//! Metrics sink boundary.
//!
//! All instrumentation flows through MetricsEvent and MetricsSink.
//! This module is the only bridge between codec logic and the
//! thread-local metrics state.

use crate::obs::metrics::{self, EventState};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// OpKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    Create,
    Update,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Validate {
        entity_path: &'static str,
        ok: bool,
    },
    Write {
        kind: OpKind,
        entity_path: &'static str,
        fields_written: u64,
    },
    StoreFailure {
        kind: OpKind,
        entity_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Validate { entity_path, ok } => metrics::with_state_mut(|m| {
                m.ops.validate_calls = m.ops.validate_calls.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.validate_calls = entry.validate_calls.saturating_add(1);

                if !ok {
                    m.ops.validate_failures = m.ops.validate_failures.saturating_add(1);
                    entry.validate_failures = entry.validate_failures.saturating_add(1);
                }
            }),

            MetricsEvent::Write {
                kind,
                entity_path,
                fields_written,
            } => metrics::with_state_mut(|m| {
                m.ops.fields_written = m.ops.fields_written.saturating_add(fields_written);
                let entry = m.entities.entry(entity_path.to_string()).or_default();

                match kind {
                    OpKind::Create => {
                        m.ops.create_calls = m.ops.create_calls.saturating_add(1);
                        entry.create_calls = entry.create_calls.saturating_add(1);
                    }
                    OpKind::Update => {
                        m.ops.update_calls = m.ops.update_calls.saturating_add(1);
                        entry.update_calls = entry.update_calls.saturating_add(1);
                    }
                }
            }),

            MetricsEvent::StoreFailure { entity_path, .. } => metrics::with_state_mut(|m| {
                m.ops.store_failures = m.ops.store_failures.saturating_add(1);
                let entry = m.entities.entry(entity_path.to_string()).or_default();
                entry.store_failures = entry.store_failures.saturating_add(1);
            }),
        }
    }
}

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GlobalMetricsSink.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_snapshot() -> EventState {
    metrics::snapshot()
}

/// Reset all metrics state on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
/// The previous sink is restored on every exit, including unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::RefCell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    const VALIDATE_OK: MetricsEvent = MetricsEvent::Validate {
        entity_path: "tests::Note",
        ok: true,
    };

    #[test]
    fn override_captures_and_restores() {
        metrics_reset_all();
        let sink = Rc::new(CaptureSink::default());

        with_metrics_sink(sink.clone(), || record(VALIDATE_OK));
        assert_eq!(sink.events.borrow().as_slice(), &[VALIDATE_OK]);
        assert_eq!(metrics_snapshot().ops.validate_calls, 0);

        record(VALIDATE_OK);
        assert_eq!(sink.events.borrow().len(), 1);
        assert_eq!(metrics_snapshot().ops.validate_calls, 1);
    }

    #[test]
    fn nested_overrides_unwind_in_order() {
        let outer = Rc::new(CaptureSink::default());
        let inner = Rc::new(CaptureSink::default());

        with_metrics_sink(outer.clone(), || {
            with_metrics_sink(inner.clone(), || record(VALIDATE_OK));
            record(VALIDATE_OK);
        });

        assert_eq!(outer.events.borrow().len(), 1);
        assert_eq!(inner.events.borrow().len(), 1);
    }

    #[test]
    fn override_is_restored_after_panic() {
        metrics_reset_all();
        let sink = Rc::new(CaptureSink::default());

        let result = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || panic!("boom"));
        }));
        assert!(result.is_err());

        record(VALIDATE_OK);
        assert!(sink.events.borrow().is_empty());
        assert_eq!(metrics_snapshot().ops.validate_calls, 1);
    }

    #[test]
    fn global_sink_counts_per_entity() {
        metrics_reset_all();

        record(MetricsEvent::Validate {
            entity_path: "tests::Note",
            ok: false,
        });
        record(MetricsEvent::Write {
            kind: OpKind::Update,
            entity_path: "tests::Note",
            fields_written: 2,
        });

        let state = metrics_snapshot();
        assert_eq!(state.ops.validate_failures, 1);
        assert_eq!(state.ops.update_calls, 1);
        assert_eq!(state.ops.fields_written, 2);

        let note = &state.entities["tests::Note"];
        assert_eq!(note.validate_failures, 1);
        assert_eq!(note.update_calls, 1);
    }
}
