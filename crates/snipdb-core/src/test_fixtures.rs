use crate::{
    data::ValidatedData,
    error::{InternalError, StoreError},
    store::Store,
    traits::EntityKind,
    value::Value,
};
use snipdb_schema::{
    node::{Entity, Field, FieldList, PrimaryKey},
    types::{Arg, ChoiceSet, InputHint},
};

pub const COLORS: ChoiceSet = ChoiceSet {
    ident: "Color",
    values: &["blue", "green", "red"],
};

pub static NOTE_FIELDS: [Field; 5] = [
    Field::int("id").read_only(),
    Field::text("title")
        .optional()
        .allow_blank()
        .max_length(10)
        .default(Arg::Text("")),
    Field::text("body").hint(InputHint::TextArea),
    Field::bool("pinned").default(Arg::Bool(false)),
    Field::choice("color", &COLORS).default(Arg::Text("blue")),
];

pub static NOTE_MODEL: Entity = Entity {
    ident: "note",
    path: "test_fixtures::Note",
    primary_key: PrimaryKey::internal("id"),
    fields: FieldList::new(&NOTE_FIELDS),
};

///
/// Note
/// Minimal entity used to exercise codecs without the snippet facade.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub pinned: bool,
    pub color: String,
}

impl EntityKind for Note {
    const PATH: &'static str = "test_fixtures::Note";
    const MODEL: &'static Entity = &NOTE_MODEL;

    fn key(&self) -> u64 {
        self.id
    }

    fn from_data(key: u64, data: &ValidatedData) -> Result<Self, InternalError> {
        Ok(Self {
            id: key,
            title: data.text("title").unwrap_or_default().to_string(),
            body: data.require_text("body")?.to_string(),
            pinned: data.flag("pinned").unwrap_or_default(),
            color: data.text("color").unwrap_or("blue").to_string(),
        })
    }

    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "title" => Some(self.title.as_str().into()),
            "body" => Some(self.body.as_str().into()),
            "pinned" => Some(self.pinned.into()),
            "color" => Some(self.color.as_str().into()),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), InternalError> {
        let shape = value.kind_label();
        match (field, value) {
            ("title", Value::Text(v)) => self.title = v,
            ("body", Value::Text(v)) => self.body = v,
            ("pinned", Value::Bool(v)) => self.pinned = v,
            ("color", Value::Text(v)) => self.color = v,
            _ => {
                return Err(InternalError::entity_invariant(format!(
                    "cannot set note.{field} from a {shape} value"
                )));
            }
        }

        Ok(())
    }
}

///
/// FailingStore
/// Store that rejects every write with the configured error.
///

pub struct FailingStore(pub StoreError);

impl Store<Note> for FailingStore {
    fn create(&self, _: &ValidatedData) -> Result<Note, InternalError> {
        Err(self.0.clone().into())
    }

    fn save(&self, _: &Note) -> Result<(), InternalError> {
        Err(self.0.clone().into())
    }
}
