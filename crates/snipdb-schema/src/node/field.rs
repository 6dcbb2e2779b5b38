use crate::{
    err,
    error::ErrorTree,
    types::{Arg, ChoiceSet, FieldKind, InputHint},
    validate::{ValidateNode, validate_field_ident},
};
use convert_case::{Case, Casing};
use serde::Serialize;
use std::{collections::BTreeSet, ops::Not};

///
/// FieldList
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldList {
    pub fields: &'static [Field],
}

impl FieldList {
    #[must_use]
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    // get
    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter()
    }
}

impl ValidateNode for FieldList {
    fn validate(&self) -> Result<(), ErrorTree> {
        validate_fields(self.fields)
    }
}

/// Validate a field slice: per-field invariants plus unique identifiers.
pub(crate) fn validate_fields(fields: &[Field]) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();
    let mut seen = BTreeSet::new();

    for field in fields {
        if !seen.insert(field.ident) {
            err!(errs, "duplicate field '{}'", field.ident);
        }
        errs.add_result_at(field.ident, field.validate());
    }

    errs.result()
}

///
/// Field
///
/// One declared field: wire shape, constraints and optional default.
/// Built with the `const` builders so schemas can live in statics.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Field {
    pub ident: &'static str,
    pub kind: FieldKind,

    #[serde(skip_serializing_if = "Not::not")]
    pub read_only: bool,

    pub required: bool,
    pub allow_blank: bool,
    pub allow_null: bool,
    pub trim_whitespace: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Arg>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<InputHint>,
}

impl Field {
    /// A required, non-null field with no default.
    #[must_use]
    pub const fn new(ident: &'static str, kind: FieldKind) -> Self {
        Self {
            ident,
            kind,
            read_only: false,
            required: true,
            allow_blank: false,
            allow_null: false,
            trim_whitespace: true,
            max_length: None,
            default: None,
            hint: None,
        }
    }

    #[must_use]
    pub const fn bool(ident: &'static str) -> Self {
        Self::new(ident, FieldKind::Bool)
    }

    #[must_use]
    pub const fn int(ident: &'static str) -> Self {
        Self::new(ident, FieldKind::Int)
    }

    #[must_use]
    pub const fn text(ident: &'static str) -> Self {
        Self::new(ident, FieldKind::Text)
    }

    #[must_use]
    pub const fn choice(ident: &'static str, set: &'static ChoiceSet) -> Self {
        Self::new(ident, FieldKind::Choice(set))
    }

    /// Output only; never read from input.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.required = false;
        self
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub const fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    #[must_use]
    pub const fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    #[must_use]
    pub const fn keep_whitespace(mut self) -> Self {
        self.trim_whitespace = false;
        self
    }

    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Attach a default; a field with a default is never required.
    #[must_use]
    pub const fn default(mut self, arg: Arg) -> Self {
        self.default = Some(arg);
        self.required = false;
        self
    }

    #[must_use]
    pub const fn hint(mut self, hint: InputHint) -> Self {
        self.hint = Some(hint);
        self
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        !self.read_only
    }

    #[must_use]
    pub const fn input_hint(&self) -> InputHint {
        match self.hint {
            Some(hint) => hint,
            None => InputHint::for_kind(self.kind),
        }
    }

    /// Human label derived from the identifier (`linenos` -> `Linenos`).
    #[must_use]
    pub fn label(&self) -> String {
        self.ident.to_case(Case::Title)
    }

    fn validate_default(&self, arg: Arg, errs: &mut ErrorTree) {
        if !arg.fits(self.kind) {
            err!(
                errs,
                "default {arg} does not fit a {} field",
                self.kind.primitive()
            );
            return;
        }

        match (arg, self.kind) {
            (Arg::Text(value), FieldKind::Choice(set)) if !set.contains(value) => {
                err!(errs, "default {arg} is not a member of {}", set.ident);
            }
            (Arg::Text(value), FieldKind::Text) => {
                if value.is_empty() && !self.allow_blank {
                    err!(errs, "default is blank but the field does not allow blank");
                }
                if let Some(max) = self.max_length {
                    let len = value.chars().count();
                    if len > max {
                        err!(errs, "default length ({len}) exceeds max_length of {max}");
                    }
                }
            }
            _ => {}
        }
    }
}

impl ValidateNode for Field {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        validate_field_ident(self.ident, &mut errs);

        if self.read_only && self.required {
            errs.add("read-only field cannot be required");
        }

        if let Some(arg) = self.default {
            if self.read_only {
                errs.add("read-only field cannot carry a default");
            }
            if self.required {
                errs.add("required field cannot carry a default");
            }
            self.validate_default(arg, &mut errs);
        }

        if !self.kind.is_text() {
            if self.max_length.is_some() {
                err!(errs, "max_length only applies to text fields");
            }
            if self.allow_blank {
                err!(errs, "allow_blank only applies to text fields");
            }
        }

        if let FieldKind::Choice(set) = self.kind {
            if set.is_empty() {
                err!(errs, "choice set {} is empty", set.ident);
            }
            let distinct: BTreeSet<_> = set.values.iter().collect();
            if distinct.len() != set.len() {
                err!(errs, "choice set {} contains duplicates", set.ident);
            }
        }

        errs.result()
    }
}

///
/// TESTS
///
