//! Core runtime for SnipDB: wire values, the validation pass, record
//! codecs, partial-update merging, store collaborators and metrics.

// public exports are one module level down
pub mod codec;
pub mod data;
pub mod error;
pub mod merge;
pub mod obs;
pub mod store;
pub mod traits;
pub mod validate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        codec::Codec,
        data::ValidatedData,
        traits::EntityKind,
        value::{Value, WireMap},
    };
}
