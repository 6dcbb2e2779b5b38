use crate::{
    error::InternalError,
    value::{Value, WireMap},
};
use derive_more::Deref;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// ValidatedData
///
/// Output of a successful validation pass. Every value is already in the
/// canonical form of its field (text, bool, choice name), so consumers
/// only need shape checks, not constraint checks.
///

#[derive(Clone, Debug, Default, Deref, PartialEq, Serialize)]
pub struct ValidatedData(BTreeMap<&'static str, Value>);

impl ValidatedData {
    pub(crate) fn insert(&mut self, field: &'static str, value: Value) {
        self.0.insert(field, value);
    }

    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_text)
    }

    #[must_use]
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.0.get(field).and_then(Value::as_bool)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Text value of a field that validation guarantees is present.
    pub fn require_text(&self, field: &str) -> Result<&str, InternalError> {
        self.text(field).ok_or_else(|| missing(field))
    }

    #[must_use]
    pub fn to_wire(&self) -> WireMap {
        self.0
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect()
    }
}

fn missing(field: &str) -> InternalError {
    InternalError::codec_invariant(format!(
        "validated data has no usable value for '{field}'"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidatedData {
        let mut data = ValidatedData::default();
        data.insert("code", Value::Text("print(1)".into()));
        data.insert("linenos", Value::Bool(true));
        data
    }

    #[test]
    fn typed_getters_check_shape() {
        let data = sample();

        assert_eq!(data.text("code"), Some("print(1)"));
        assert_eq!(data.flag("linenos"), Some(true));
        assert_eq!(data.text("linenos"), None);
        assert_eq!(data.flag("missing"), None);
    }

    #[test]
    fn require_reports_the_field() {
        let err = sample().require_text("title").expect_err("title missing");

        assert!(err.message.contains("'title'"));
    }

    #[test]
    fn to_wire_keeps_every_field() {
        let wire = sample().to_wire();

        assert_eq!(wire.len(), 2);
        assert_eq!(wire.get("linenos"), Some(&Value::Bool(true)));
    }
}
