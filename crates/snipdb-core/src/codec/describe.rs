use crate::value::Value;
use serde::Serialize;
use snipdb_schema::{
    node::Field,
    types::{InputHint, Primitive},
};

///
/// FieldDescriptor
///
/// Serializable description of one codec field, as a form renderer or an
/// OPTIONS-style endpoint would consume it.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: String,
    pub kind: Primitive,
    pub required: bool,
    pub read_only: bool,
    pub allow_blank: bool,
    pub allow_null: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<&'static [&'static str]>,

    pub input_hint: InputHint,
}

impl FieldDescriptor {
    #[must_use]
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.ident,
            label: field.label(),
            kind: field.kind.primitive(),
            required: field.required,
            read_only: field.read_only,
            allow_blank: field.allow_blank,
            allow_null: field.allow_null,
            max_length: field.max_length,
            default: field.default.map(Value::from),
            choices: field.kind.choices().map(|set| set.values),
            input_hint: field.input_hint(),
        }
    }
}
