//! Field resolution and validation.
//!
//! One ordered pass over a field list turns an untyped `WireMap` into
//! `ValidatedData`: input value if present and valid, else the declared
//! default, else a required-field issue. Issues are collected per field;
//! the pass never stops at the first failure.

mod coerce;
mod validator;


pub use validator::{MaxLength, NotBlank, OneOf, Validator};

use crate::{
    data::ValidatedData,
    value::{Value, WireMap},
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use snipdb_schema::node::Field;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// Messages
///
/// Human-readable issue texts, stable so clients can match on them.
///

pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const NULL: &str = "This field may not be null.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const INVALID_TEXT: &str = "Not a valid string.";
    pub const INVALID_BOOL: &str = "Must be a valid boolean.";
    pub const INVALID_INT: &str = "A valid integer is required.";
    pub const UNKNOWN_FIELD: &str = "Unknown field.";

    #[must_use]
    pub fn max_length(max: usize) -> String {
        format!("Ensure this field has no more than {max} characters.")
    }

    #[must_use]
    pub fn invalid_choice(input: &str) -> String {
        format!("\"{input}\" is not a valid choice.")
    }
}

///
/// IssueMap
///
/// Field name -> issue messages, in the order they were raised.
///

#[derive(
    Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct IssueMap(BTreeMap<String, Vec<String>>);

impl IssueMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages raised for one field (empty if none).
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        !self.messages(field).is_empty()
    }

    /// Total number of messages across all fields.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

///
/// ValidationError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("validation failed for {} field(s): {}", .issues.len(), field_list(&.issues))]
pub struct ValidationError {
    pub issues: IssueMap,
}

impl ValidationError {
    #[must_use]
    pub const fn issues(&self) -> &IssueMap {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> IssueMap {
        self.issues
    }

    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.mentions(field)
    }
}

fn field_list(issues: &IssueMap) -> String {
    issues.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

///
/// IssueContext
///
/// Narrow interface exposed to validators for reporting issues.
/// Implemented by scopes that pin every issue to one field.
///

pub trait IssueContext {
    fn add_issue(&mut self, message: String);
}

impl dyn IssueContext + '_ {
    pub fn issue(&mut self, message: impl Into<String>) {
        self.add_issue(message.into());
    }
}

///
/// FieldScope
///
/// IssueContext that files every issue under a single field.
///

pub struct FieldScope<'a> {
    field: &'a str,
    issues: &'a mut IssueMap,
    raised: usize,
}

impl<'a> FieldScope<'a> {
    #[must_use]
    pub const fn new(field: &'a str, issues: &'a mut IssueMap) -> Self {
        Self {
            field,
            issues,
            raised: 0,
        }
    }

    pub fn issue(&mut self, message: impl Into<String>) {
        self.add_issue(message.into());
    }

    /// Whether this scope raised anything.
    #[must_use]
    pub const fn has_issues(&self) -> bool {
        self.raised > 0
    }
}

impl IssueContext for FieldScope<'_> {
    fn add_issue(&mut self, message: String) {
        self.raised += 1;
        self.issues.add(self.field, message);
    }
}

///
/// ValidateMode
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValidateMode {
    /// Every writable field resolves; defaults fill gaps.
    #[default]
    Full,

    /// Only supplied fields are validated; no defaults, nothing required.
    Partial,
}

///
/// ValidateOptions
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateOptions {
    pub mode: ValidateMode,

    /// Report keys that match no declared field instead of ignoring them.
    pub reject_unknown: bool,
}

/// Resolve `input` against `fields`, collecting every issue.
pub fn validate_fields(
    fields: &[Field],
    input: &WireMap,
    options: ValidateOptions,
) -> Result<ValidatedData, ValidationError> {
    let mut issues = IssueMap::new();
    let mut data = ValidatedData::default();

    for field in fields.iter().filter(|f| f.is_writable()) {
        let mut scope = FieldScope::new(field.ident, &mut issues);

        match input.get(field.ident) {
            Some(raw) => {
                if let Some(value) = coerce::coerce(field, raw, &mut scope) {
                    data.insert(field.ident, value);
                }
            }
            None if options.mode == ValidateMode::Partial => {}
            None => match field.default {
                Some(arg) => data.insert(field.ident, Value::from(arg)),
                None if field.required => {
                    scope.issue(messages::REQUIRED);
                }
                None => {}
            },
        }
    }

    if options.reject_unknown {
        for key in input.keys() {
            if !fields.iter().any(|f| f.ident == key.as_str()) {
                issues.add(key.clone(), messages::UNKNOWN_FIELD);
            }
        }
    }

    if issues.is_empty() {
        Ok(data)
    } else {
        Err(ValidationError { issues })
    }
}
