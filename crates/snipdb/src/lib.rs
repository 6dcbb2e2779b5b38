//! SnipDB: a schema-first record codec for code snippets.
//!
//! ## Crate layout
//! - `choice`: `Language` / `Style` vocabularies and their choice sets.
//! - `codec`: the explicit and model-derived snippet codecs.
//! - `error`: public error taxonomy.
//! - `snippet`: the `Snippet` record and its entity schema.
//!
//! Runtime pieces (validation, stores, metrics) live in `snipdb-core`;
//! schema nodes in `snipdb-schema`. Both are re-exported.

pub use snipdb_config as config;
pub use snipdb_core as core;
pub use snipdb_schema as schema;

pub mod choice;
pub mod codec;
pub mod error;
pub mod snippet;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        choice::{Language, Style},
        codec::{SnippetCodec, SnippetModelCodec, SnippetStore, snippet_store},
        error::{Error, ErrorKind},
        snippet::Snippet,
    };
    pub use snipdb_core::{
        data::ValidatedData,
        store::Store as _,
        traits::EntityKind as _,
        value::{Value, WireMap},
    };
}
