use crate::{data::ValidatedData, error::InternalError, value::Value};
use snipdb_schema::node::Entity;

///
/// EntityKind
///
/// A persisted record type with a schema. Field access goes through
/// `Value` so codecs and stores stay generic over the concrete struct.
///

pub trait EntityKind: Clone {
    /// Fully-qualified Rust type path (for diagnostics and metrics).
    const PATH: &'static str;

    /// Authoritative schema for this entity.
    const MODEL: &'static Entity;

    /// Primary key as assigned by the store.
    fn key(&self) -> u64;

    /// Build a fresh entity from validated data and a store-assigned key.
    fn from_data(key: u64, data: &ValidatedData) -> Result<Self, InternalError>;

    /// Current value of a schema field, `None` if the entity has no such field.
    fn get_value(&self, field: &str) -> Option<Value>;

    /// Overwrite one writable field with an already-validated value.
    fn set_value(&mut self, field: &str, value: Value) -> Result<(), InternalError>;
}
