//! Record codec: declared fields in, validated data and persisted
//! entities out.
//!
//! A codec is a field list plus options. It can be declared by hand
//! (`from_fields`) or selected from the entity schema (`from_model`);
//! both forms run the exact same code paths afterwards.

mod describe;

#[cfg(test)]
mod tests;

pub use describe::FieldDescriptor;

use crate::{
    data::ValidatedData,
    error::InternalError,
    merge::merge_fields,
    obs::sink::{self, MetricsEvent, OpKind},
    store::Store,
    traits::EntityKind,
    validate::{ValidateMode, ValidateOptions, ValidationError, validate_fields},
    value::WireMap,
};
use snipdb_schema::{
    error::{ErrorTree, SchemaError},
    node::Field,
    validate::ValidateNode,
};
use std::{collections::BTreeSet, marker::PhantomData};
use tracing::{debug, error, warn};

///
/// CodecOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CodecOptions {
    /// Emit per-field resolution detail at debug level.
    pub debug: bool,

    /// Report input keys that match no declared field.
    pub reject_unknown: bool,
}

///
/// Codec
///

#[derive(Clone, Debug)]
pub struct Codec<E: EntityKind> {
    name: &'static str,
    fields: Vec<Field>,
    options: CodecOptions,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> Codec<E> {
    // ======================================================================
    // Construction & configuration
    // ======================================================================

    /// Build from a hand-written field list.
    pub fn from_fields(name: &'static str, fields: &[Field]) -> Result<Self, SchemaError> {
        Self::build(name, fields.to_vec())
    }

    /// Build by selecting fields from `E::MODEL`, in the order given.
    pub fn from_model(name: &'static str, selected: &[&str]) -> Result<Self, SchemaError> {
        E::MODEL.check()?;
        let fields = E::MODEL.select(selected)?;

        Self::build(name, fields)
    }

    fn build(name: &'static str, fields: Vec<Field>) -> Result<Self, SchemaError> {
        let mut errs = ErrorTree::new();
        let mut seen = BTreeSet::new();

        for field in &fields {
            if !seen.insert(field.ident) {
                errs.add(format!("duplicate field '{}'", field.ident));
            }
            if E::MODEL.get_field(field.ident).is_none() {
                errs.add_at(field.ident, format!("not a field of {}", E::MODEL.ident));
            }
            errs.add_result_at(field.ident, field.validate());
        }

        errs.result()
            .map_err(|errs| SchemaError::invalid(name, errs))?;

        Ok(Self {
            name,
            fields,
            options: CodecOptions::default(),
            _marker: PhantomData,
        })
    }

    #[must_use]
    pub const fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.options.debug = true;
        self
    }

    // ======================================================================
    // Accessors
    // ======================================================================

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    #[must_use]
    pub const fn options(&self) -> CodecOptions {
        self.options
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.options.debug {
            debug!(codec = self.name, entity = E::PATH, "{}", s.as_ref());
        }
    }

    // ======================================================================
    // Validation
    // ======================================================================

    /// Resolve every writable field: input, else default, else required.
    pub fn validate(&self, input: &WireMap) -> Result<ValidatedData, ValidationError> {
        self.run_validate(input, ValidateMode::Full)
    }

    /// Validate only the supplied fields, for partial updates.
    pub fn validate_partial(&self, input: &WireMap) -> Result<ValidatedData, ValidationError> {
        self.run_validate(input, ValidateMode::Partial)
    }

    fn run_validate(
        &self,
        input: &WireMap,
        mode: ValidateMode,
    ) -> Result<ValidatedData, ValidationError> {
        let options = ValidateOptions {
            mode,
            reject_unknown: self.options.reject_unknown,
        };
        let result = validate_fields(&self.fields, input, options);

        sink::record(MetricsEvent::Validate {
            entity_path: E::PATH,
            ok: result.is_ok(),
        });

        match &result {
            Ok(data) => {
                if self.options.debug {
                    for (field, value) in data.iter() {
                        let source = if input.contains_key(*field) {
                            "input"
                        } else {
                            "default"
                        };
                        self.debug_log(format!("{field} <- {source} {value:?}"));
                    }
                }
            }
            Err(err) => {
                warn!(
                    codec = self.name,
                    entity = E::PATH,
                    mode = ?mode,
                    error_count = err.issues.issue_count(),
                    "validation failed: {err}"
                );
            }
        }

        result
    }

    // ======================================================================
    // Writes
    // ======================================================================

    /// Persist a new entity built from validated data; the store assigns the key.
    pub fn create<S: Store<E>>(&self, store: &S, data: &ValidatedData) -> Result<E, InternalError> {
        self.debug_log(format!("create with fields {:?}", data.fields().collect::<Vec<_>>()));

        let entity = store.create(data).map_err(|err| self.store_failed(OpKind::Create, err))?;

        sink::record(MetricsEvent::Write {
            kind: OpKind::Create,
            entity_path: E::PATH,
            fields_written: data.len() as u64,
        });
        debug!(codec = self.name, entity = E::PATH, key = entity.key(), "created");

        Ok(entity)
    }

    /// Merge validated data onto `entity` and persist it.
    ///
    /// Fields absent from `data` keep their current value. The entity is
    /// only modified once the store accepts the merged record.
    pub fn update<'a, S: Store<E>>(
        &self,
        store: &S,
        entity: &'a mut E,
        data: &ValidatedData,
    ) -> Result<&'a mut E, InternalError> {
        let key = entity.key();
        let mut merged = entity.clone();
        let written = merge_fields(&mut merged, &self.fields, data)?;

        if merged.key() != key {
            return Err(InternalError::codec_invariant(format!(
                "update changed the key of {} from {key} to {}",
                E::PATH,
                merged.key()
            )));
        }
        self.debug_log(format!("update {key}: wrote {written:?}"));

        store
            .save(&merged)
            .map_err(|err| self.store_failed(OpKind::Update, err))?;
        *entity = merged;

        sink::record(MetricsEvent::Write {
            kind: OpKind::Update,
            entity_path: E::PATH,
            fields_written: written.len() as u64,
        });
        debug!(codec = self.name, entity = E::PATH, key, "updated");

        Ok(entity)
    }

    /// Create when there is no instance, update it otherwise.
    pub fn save<S: Store<E>>(
        &self,
        store: &S,
        instance: Option<&mut E>,
        data: &ValidatedData,
    ) -> Result<E, InternalError> {
        match instance {
            Some(entity) => self.update(store, entity, data).cloned(),
            None => self.create(store, data),
        }
    }

    fn store_failed(&self, kind: OpKind, err: InternalError) -> InternalError {
        if err.is_store_failure() {
            sink::record(MetricsEvent::StoreFailure {
                kind,
                entity_path: E::PATH,
            });
        }
        error!(
            codec = self.name,
            entity = E::PATH,
            op = ?kind,
            origin = %err.origin,
            class = %err.class,
            "write failed: {err}"
        );

        err
    }

    // ======================================================================
    // Representation
    // ======================================================================

    /// Render every declared field (read-only ones included) of `entity`.
    #[must_use]
    pub fn to_representation(&self, entity: &E) -> WireMap {
        let mut out = WireMap::new();

        for field in &self.fields {
            match entity.get_value(field.ident) {
                Some(value) => {
                    out.insert(field.ident.to_string(), value);
                }
                None => self.debug_log(format!("{} has no value for {}", E::PATH, field.ident)),
            }
        }

        out
    }

    /// Per-field metadata for form rendering and schema introspection.
    #[must_use]
    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(FieldDescriptor::from_field).collect()
    }
}
