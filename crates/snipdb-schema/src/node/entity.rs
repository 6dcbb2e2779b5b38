use crate::{
    MAX_ENTITY_NAME_LEN, err,
    error::{ErrorTree, SchemaError},
    node::{Field, FieldList, PrimaryKey, PrimaryKeySource},
    types::FieldKind,
    validate::{ValidateNode, validate_ident},
};
use serde::Serialize;
use std::collections::BTreeSet;

///
/// Entity
///
/// Schema for one persisted record type. The field list is authoritative:
/// codecs that reflect over the entity select fields from it by name.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Entity {
    pub ident: &'static str,
    pub path: &'static str,
    pub primary_key: PrimaryKey,
    pub fields: FieldList,
}

impl Entity {
    /// Return the primary key field if it exists on the entity.
    #[must_use]
    pub fn get_pk_field(&self) -> Option<&'static Field> {
        self.fields.get(self.primary_key.field)
    }

    #[must_use]
    pub fn get_field(&self, ident: &str) -> Option<&'static Field> {
        self.fields.get(ident)
    }

    /// Fields that input may write, in declaration order.
    pub fn writable_fields(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter().filter(|f| f.is_writable())
    }

    /// Copy out the named fields, in the order given.
    pub fn select(&self, idents: &[&str]) -> Result<Vec<Field>, SchemaError> {
        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(idents.len());

        for &ident in idents {
            if !seen.insert(ident) {
                return Err(SchemaError::DuplicateSelection {
                    field: ident.to_string(),
                });
            }
            let field = self.get_field(ident).ok_or_else(|| SchemaError::UnknownField {
                entity: self.ident,
                field: ident.to_string(),
            })?;
            fields.push(*field);
        }

        Ok(fields)
    }

    /// Validate and wrap failures with the entity path.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.validate()
            .map_err(|errs| SchemaError::invalid(self.path, errs))
    }
}

impl ValidateNode for Entity {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        validate_ident(self.ident, MAX_ENTITY_NAME_LEN, &mut errs);
        errs.add_result_at("fields", self.fields.validate());

        match self.get_pk_field() {
            None => err!(
                errs,
                "primary key field '{}' is not declared",
                self.primary_key.field
            ),
            Some(pk) => {
                if pk.kind != FieldKind::Int {
                    err!(errs, "primary key field '{}' must be an int", pk.ident);
                }
                if self.primary_key.source == PrimaryKeySource::Internal && !pk.read_only {
                    err!(
                        errs,
                        "store-assigned primary key '{}' must be read-only",
                        pk.ident
                    );
                }
            }
        }

        errs.result()
    }
}

///
/// TESTS
///
