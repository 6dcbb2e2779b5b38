//! The two snippet codecs.
//!
//! `SnippetCodec` restates every field by hand; `SnippetModelCodec` selects
//! the same fields from `Snippet::MODEL`. Both wrap `Codec<Snippet>` and
//! must stay interchangeable.

use crate::{
    Error,
    choice::{DEFAULT_LANGUAGE, DEFAULT_STYLE, LANGUAGE_SET, STYLE_SET},
    snippet::{Snippet, TITLE_MAX_LEN},
};
use derive_more::Deref;
use snipdb_config::{CodecConfig, StoreConfig};
use snipdb_core::{
    codec::{Codec, CodecOptions},
    data::ValidatedData,
    store::MemoryStore,
    value::WireMap,
};
use snipdb_schema::{
    node::Field,
    types::{Arg, InputHint},
};
use tracing::debug;

/// Fields read and written by the model-derived codec, in output order.
pub const MODEL_SELECTION: [&str; 6] = ["id", "title", "code", "linenos", "language", "style"];

static EXPLICIT_FIELDS: [Field; 6] = [
    Field::int("id").read_only(),
    Field::text("title")
        .optional()
        .allow_blank()
        .max_length(TITLE_MAX_LEN)
        .default(Arg::Text("")),
    Field::text("code").hint(InputHint::TextArea),
    Field::bool("linenos").default(Arg::Bool(false)),
    Field::choice("language", &LANGUAGE_SET).default(Arg::Text(DEFAULT_LANGUAGE.as_str())),
    Field::choice("style", &STYLE_SET).default(Arg::Text(DEFAULT_STYLE.as_str())),
];

/// In-memory snippet store.
pub type SnippetStore = MemoryStore<Snippet>;

#[must_use]
pub const fn snippet_store(config: &StoreConfig) -> SnippetStore {
    MemoryStore::with_first_key(config.first_id)
}

const fn codec_options(config: &CodecConfig) -> CodecOptions {
    CodecOptions {
        debug: config.debug,
        reject_unknown: config.reject_unknown_fields,
    }
}

///
/// snippet_codec
///
/// Newtype over `Codec<Snippet>` with config wiring and JSON helpers.
///

macro_rules! snippet_codec {
    ($(#[$meta:meta])* $name:ident, $build:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Deref)]
        pub struct $name(Codec<Snippet>);

        impl $name {
            pub fn new() -> Result<Self, Error> {
                Ok(Self($build?))
            }

            pub fn from_config(config: &CodecConfig) -> Result<Self, Error> {
                let codec = Self::new()?;
                debug!(
                    codec = codec.name(),
                    debug = config.debug,
                    reject_unknown = config.reject_unknown_fields,
                    "codec configured"
                );

                Ok(Self(codec.0.with_options(codec_options(config))))
            }

            #[must_use]
            pub fn debug(self) -> Self {
                Self(self.0.debug())
            }

            /// Decode a JSON body and validate it for a create.
            pub fn validate_json(&self, body: &str) -> Result<ValidatedData, Error> {
                let input = WireMap::from_json_str(body)?;

                Ok(self.0.validate(&input)?)
            }

            /// Decode a JSON body and validate only the keys it carries.
            pub fn validate_json_partial(&self, body: &str) -> Result<ValidatedData, Error> {
                let input = WireMap::from_json_str(body)?;

                Ok(self.0.validate_partial(&input)?)
            }

            /// Render a snippet as a JSON object.
            #[must_use]
            pub fn to_json(&self, snippet: &Snippet) -> serde_json::Value {
                self.0.to_representation(snippet).to_json()
            }

            #[must_use]
            pub fn into_inner(self) -> Codec<Snippet> {
                self.0
            }
        }
    };
}

snippet_codec!(
    /// Snippet codec with a hand-written field list.
    SnippetCodec,
    Codec::from_fields("SnippetCodec", &EXPLICIT_FIELDS)
);

snippet_codec!(
    /// Snippet codec whose fields are selected from `Snippet::MODEL`.
    SnippetModelCodec,
    Codec::from_model("SnippetModelCodec", &MODEL_SELECTION)
);

///
/// TESTS
///
