use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for codec operations.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Codec entrypoints
    pub validate_calls: u64,
    pub create_calls: u64,
    pub update_calls: u64,

    // Outcomes
    pub validate_failures: u64,
    pub fields_written: u64,
    pub store_failures: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub validate_calls: u64,
    pub validate_failures: u64,
    pub create_calls: u64,
    pub update_calls: u64,
    pub store_failures: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|state| f(&mut state.borrow_mut()))
}

pub(crate) fn snapshot() -> EventState {
    EVENT_STATE.with(|state| state.borrow().clone())
}

pub(crate) fn reset_all() {
    EVENT_STATE.with(|state| *state.borrow_mut() = EventState::default());
}
