//! Declarative schema nodes for SnipDB records.
//!
//! A schema is plain `'static` data: entities own a field list, fields carry
//! their kind, constraints and default. Codecs consume these nodes directly,
//! so an explicit field list and one selected from an entity share the same
//! representation.

pub mod error;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for field schema identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// Maximum length for entity schema identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::{ErrorTree, SchemaError},
        node::*,
        types::{Arg, ChoiceSet, FieldKind, InputHint, Primitive},
        validate::ValidateNode,
    };
    pub use serde::Serialize;
}
