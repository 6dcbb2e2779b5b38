use crate::choice::{
    DEFAULT_LANGUAGE, DEFAULT_STYLE, LANGUAGE_SET, Language, STYLE_SET, Style, UnknownChoice,
};
use serde::{Deserialize, Serialize};
use snipdb_core::{data::ValidatedData, error::InternalError, traits::EntityKind, value::Value};
use snipdb_schema::{
    node::{Entity, Field, FieldList, PrimaryKey},
    types::{Arg, InputHint},
};
use std::str::FromStr;

/// Longest title accepted on input, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Schema of the stored snippet record.
pub static SNIPPET_FIELDS: [Field; 6] = [
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

pub static SNIPPET_MODEL: Entity = Entity {
    ident: "snippet",
    path: "snipdb::snippet::Snippet",
    primary_key: PrimaryKey::internal("id"),
    fields: FieldList::new(&SNIPPET_FIELDS),
};

///
/// Snippet
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snippet {
    pub id: u64,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl EntityKind for Snippet {
    const PATH: &'static str = "snipdb::snippet::Snippet";
    const MODEL: &'static Entity = &SNIPPET_MODEL;

    fn key(&self) -> u64 {
        self.id
    }

    fn from_data(key: u64, data: &ValidatedData) -> Result<Self, InternalError> {
        Ok(Self {
            id: key,
            title: data.text("title").unwrap_or_default().to_string(),
            code: data.require_text("code")?.to_string(),
            linenos: data.flag("linenos").unwrap_or_default(),
            language: choice_or(data, "language", DEFAULT_LANGUAGE)?,
            style: choice_or(data, "style", DEFAULT_STYLE)?,
        })
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Uint(self.id),
            "title" => self.title.as_str().into(),
            "code" => self.code.as_str().into(),
            "linenos" => self.linenos.into(),
            "language" => self.language.as_str().into(),
            "style" => self.style.as_str().into(),
            _ => return None,
        };

        Some(value)
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), InternalError> {
        let shape = value.kind_label();
        match (field, value) {
            ("title", Value::Text(v)) => self.title = v,
            ("code", Value::Text(v)) => self.code = v,
            ("linenos", Value::Bool(v)) => self.linenos = v,
            ("language", Value::Text(v)) => self.language = parse_choice(&v)?,
            ("style", Value::Text(v)) => self.style = parse_choice(&v)?,
            _ => {
                return Err(InternalError::entity_invariant(format!(
                    "cannot set snippet.{field} from a {shape} value"
                )));
            }
        }

        Ok(())
    }
}

fn parse_choice<T: FromStr<Err = UnknownChoice>>(s: &str) -> Result<T, InternalError> {
    s.parse()
        .map_err(|err: UnknownChoice| InternalError::entity_invariant(err.to_string()))
}

fn choice_or<T: FromStr<Err = UnknownChoice>>(
    data: &ValidatedData,
    field: &str,
    default: T,
) -> Result<T, InternalError> {
    data.text(field).map_or(Ok(default), parse_choice)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use snipdb_schema::validate::ValidateNode;

    #[test]
    fn model_schema_is_valid() {
        SNIPPET_MODEL.check().expect("snippet schema");
        SNIPPET_MODEL.fields.validate().expect("snippet fields");
    }

    #[test]
    fn every_writable_field_round_trips_through_values() {
        let mut snippet = Snippet {
            id: 3,
            title: "t".into(),
            code: "c".into(),
            linenos: true,
            language: Language::Rust,
            style: Style::Monokai,
        };
        let copy = snippet.clone();

        for field in SNIPPET_MODEL.writable_fields() {
            let value = copy.get_value(field.ident).expect("declared field");
            snippet.set_value(field.ident, value).expect("same shape");
        }

        assert_eq!(snippet, copy);
    }

    #[test]
    fn set_value_rejects_wrong_shapes() {
        let mut snippet = Snippet::default();

        assert!(snippet.set_value("linenos", Value::from("yes")).is_err());
        assert!(snippet.set_value("style", Value::from("neon")).is_err());
        assert!(snippet.set_value("id", Value::Uint(9)).is_err());
        assert_eq!(snippet, Snippet::default());
    }

    #[test]
    fn get_value_covers_the_model() {
        let snippet = Snippet::default();

        for field in SNIPPET_MODEL.fields.iter() {
            assert!(snippet.get_value(field.ident).is_some(), "{}", field.ident);
        }
        assert_eq!(snippet.get_value("owner"), None);
    }
}
