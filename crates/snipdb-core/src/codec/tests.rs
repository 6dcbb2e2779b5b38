use super::*;
use crate::{
    error::{ErrorClass, ErrorOrigin, StoreError},
    obs::{metrics_reset_all, metrics_snapshot},
    store::MemoryStore,
    test_fixtures::{FailingStore, NOTE_FIELDS, Note},
    value::Value,
};
use serde_json::json;
use snipdb_schema::{
    node::Field,
    types::{Arg, InputHint, Primitive},
};

const ALL: [&str; 5] = ["id", "title", "body", "pinned", "color"];

fn explicit() -> Codec<Note> {
    Codec::from_fields("NoteCodec", &NOTE_FIELDS).expect("valid note fields")
}

fn derived() -> Codec<Note> {
    Codec::from_model("NoteModelCodec", &ALL).expect("valid note selection")
}

fn input(json: serde_json::Value) -> WireMap {
    WireMap::from_json(json).expect("object")
}

fn stored_note(store: &MemoryStore<Note>) -> Note {
    let codec = explicit();
    let data = codec
        .validate(&input(json!({
            "title": "old",
            "body": "print(1)",
            "pinned": true,
            "color": "red",
        })))
        .expect("valid");

    codec.create(store, &data).expect("create")
}

#[test]
fn create_assigns_key_and_applies_defaults() {
    let store = MemoryStore::new();
    let codec = explicit();

    let data = codec.validate(&input(json!({ "body": "x" }))).expect("valid");
    let note = codec.create(&store, &data).expect("create");

    assert_eq!(
        note,
        Note {
            id: 1,
            title: String::new(),
            body: "x".into(),
            pinned: false,
            color: "blue".into(),
        }
    );
    assert_eq!(store.get(1), Some(note));
}

#[test]
fn keys_increase_per_create() {
    let store = MemoryStore::with_first_key(100);

    let first = stored_note(&store);
    let second = stored_note(&store);

    assert_eq!((first.id, second.id), (100, 101));
    assert_eq!(store.len(), 2);
}

#[test]
fn empty_update_changes_nothing() {
    let store = MemoryStore::new();
    let codec = explicit();
    let mut note = stored_note(&store);
    let before = note.clone();

    let data = codec.validate_partial(&WireMap::new()).expect("empty is valid");
    let updated = codec.update(&store, &mut note, &data).expect("update");

    assert_eq!(*updated, before);
    assert_eq!(store.get(before.id), Some(before));
}

#[test]
fn update_overwrites_only_supplied_fields() {
    let store = MemoryStore::new();
    let codec = explicit();
    let mut note = stored_note(&store);
    let before = note.clone();

    let data = codec
        .validate_partial(&input(json!({ "title": "new", "id": 77 })))
        .expect("valid");
    codec.update(&store, &mut note, &data).expect("update");

    assert_eq!(note.title, "new");
    assert_eq!(note.id, before.id);
    assert_eq!(note.body, before.body);
    assert_eq!(note.pinned, before.pinned);
    assert_eq!(note.color, before.color);
    assert_eq!(store.get(before.id), Some(note));
}

#[test]
fn failed_save_leaves_entity_untouched() {
    let codec = explicit();
    let store = FailingStore(StoreError::Unavailable {
        message: "offline".into(),
    });
    let mut note = Note {
        id: 5,
        title: "keep".into(),
        body: "b".into(),
        pinned: false,
        color: "green".into(),
    };
    let before = note.clone();

    let data = codec
        .validate_partial(&input(json!({ "title": "lost" })))
        .expect("valid");
    let err = codec
        .update(&store, &mut note, &data)
        .expect_err("store is down");

    assert_eq!(err.origin, ErrorOrigin::Store);
    assert_eq!(err.class, ErrorClass::Unavailable);
    assert_eq!(note, before);
}

#[test]
fn saving_unknown_entity_is_not_found() {
    let store = MemoryStore::new();
    let codec = explicit();
    let mut ghost = Note {
        id: 42,
        title: String::new(),
        body: "b".into(),
        pinned: false,
        color: "blue".into(),
    };

    let err = codec
        .update(&store, &mut ghost, &ValidatedData::default())
        .expect_err("nothing stored under 42");

    assert_eq!(
        err.store_error(),
        Some(&StoreError::NotFound {
            entity: "note",
            key: 42
        })
    );
}

#[test]
fn create_failure_propagates_and_counts() {
    metrics_reset_all();
    let codec = explicit();
    let store = FailingStore(StoreError::Conflict {
        entity: "note",
        message: "dup".into(),
    });

    let data = codec.validate(&input(json!({ "body": "b" }))).expect("valid");
    let err = codec.create(&store, &data).expect_err("conflict");

    assert_eq!(err.class, ErrorClass::Conflict);
    let ops = metrics_snapshot().ops;
    assert_eq!(ops.store_failures, 1);
    assert_eq!(ops.create_calls, 0);
}

#[test]
fn create_from_partial_data_is_an_invariant_violation() {
    let store = MemoryStore::new();
    let codec = explicit();

    let data = codec
        .validate_partial(&input(json!({ "title": "no body" })))
        .expect("valid partial");
    let err = codec.create(&store, &data).expect_err("body missing");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert!(store.is_empty());
}

#[test]
fn save_dispatches_on_instance() {
    let store = MemoryStore::new();
    let codec = explicit();

    let data = codec.validate(&input(json!({ "body": "b" }))).expect("valid");
    let created = codec.save(&store, None, &data).expect("create");
    assert_eq!(created.id, 1);

    let mut existing = created;
    let patch = codec
        .validate_partial(&input(json!({ "pinned": "on" })))
        .expect("valid");
    let updated = codec
        .save(&store, Some(&mut existing), &patch)
        .expect("update");

    assert!(updated.pinned);
    assert_eq!(store.len(), 1);
}

#[test]
fn representation_includes_read_only_key() {
    let store = MemoryStore::new();
    let codec = explicit();
    let note = stored_note(&store);

    let wire = codec.to_representation(&note);

    assert_eq!(
        wire.to_json(),
        json!({
            "id": 1,
            "title": "old",
            "body": "print(1)",
            "pinned": true,
            "color": "red",
        })
    );
}

#[test]
fn representation_round_trips_through_validate() {
    let store = MemoryStore::new();
    let codec = explicit();
    let note = stored_note(&store);

    let data = codec
        .validate(&codec.to_representation(&note))
        .expect("representation is valid input");
    let copy = Note::from_data(note.id, &data).expect("rebuild");

    assert_eq!(copy, note);
    assert!(!data.contains_key("id"));
}

#[test]
fn explicit_and_derived_codecs_agree() {
    let a = explicit();
    let b = derived();

    assert_eq!(a.describe(), b.describe());

    for body in [
        json!({ "body": "x" }),
        json!({ "title": "01234567890", "color": "nope" }),
        json!({ "body": " ", "pinned": "sometimes" }),
        json!({ "body": "y", "title": "", "pinned": false, "color": "green" }),
    ] {
        let map = input(body);
        assert_eq!(a.validate(&map), b.validate(&map));
        assert_eq!(a.validate_partial(&map), b.validate_partial(&map));
    }
}

#[test]
fn describe_reports_constraints() {
    let descriptors = explicit().describe();
    let by_name = |name: &str| {
        descriptors
            .iter()
            .find(|d| d.name == name)
            .unwrap_or_else(|| panic!("no descriptor for {name}"))
    };

    let id = by_name("id");
    assert!(id.read_only);
    assert!(!id.required);
    assert_eq!(id.kind, Primitive::Int);

    let title = by_name("title");
    assert_eq!(title.max_length, Some(10));
    assert_eq!(title.default, Some(Value::Text(String::new())));
    assert!(title.allow_blank);

    let body = by_name("body");
    assert!(body.required);
    assert_eq!(body.input_hint, InputHint::TextArea);

    let color = by_name("color");
    assert_eq!(color.choices, Some(&["blue", "green", "red"][..]));
    assert_eq!(color.label, "Color");
}

#[test]
fn derived_codec_rejects_unknown_selection() {
    let err = Codec::<Note>::from_model("Bad", &["id", "subtitle"]).expect_err("no subtitle");

    assert!(matches!(err, SchemaError::UnknownField { .. }));
}

#[test]
fn explicit_codec_rejects_bad_default() {
    static BAD: [Field; 2] = [
        Field::text("body"),
        Field::choice("color", &crate::test_fixtures::COLORS).default(Arg::Text("purple")),
    ];

    let err = Codec::<Note>::from_fields("Bad", &BAD).expect_err("purple is not a color");
    let SchemaError::Invalid { route, errors } = err else {
        panic!("expected invalid schema");
    };

    assert_eq!(route, "Bad");
    assert_eq!(
        errors.flatten(),
        vec![(
            "color".to_string(),
            "default \"purple\" is not a member of Color".to_string()
        )]
    );
}

#[test]
fn explicit_codec_rejects_fields_missing_from_model() {
    static EXTRA: [Field; 2] = [Field::text("body"), Field::text("subtitle").optional()];

    assert!(Codec::<Note>::from_fields("Extra", &EXTRA).is_err());
}

#[test]
fn validation_metrics_are_recorded() {
    metrics_reset_all();
    let codec = explicit().debug();

    let _ = codec.validate(&input(json!({ "body": "ok" })));
    let _ = codec.validate(&input(json!({})));

    let state = metrics_snapshot();
    assert_eq!(state.ops.validate_calls, 2);
    assert_eq!(state.ops.validate_failures, 1);
    assert_eq!(state.entities["test_fixtures::Note"].validate_calls, 2);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_body_with_optional_subset_validates(
            body in "[a-z][a-z0-9 ]{0,40}",
            title in proptest::option::of("[a-z]{0,10}"),
            pinned in proptest::option::of(any::<bool>()),
            color in proptest::option::of(prop::sample::select(vec!["blue", "green", "red"])),
        ) {
            let mut map = WireMap::new();
            map.insert("body".into(), Value::from(body.as_str()));
            if let Some(t) = &title { map.insert("title".into(), Value::from(t.as_str())); }
            if let Some(p) = pinned { map.insert("pinned".into(), Value::Bool(p)); }
            if let Some(c) = color { map.insert("color".into(), Value::from(c)); }

            let data = explicit().validate(&map).expect("valid input");

            prop_assert_eq!(data.text("body"), Some(body.trim()));
            prop_assert_eq!(data.text("title"), Some(title.as_deref().unwrap_or("")));
            prop_assert_eq!(data.flag("pinned"), Some(pinned.unwrap_or(false)));
            prop_assert_eq!(data.text("color"), Some(color.unwrap_or("blue")));
        }

        #[test]
        fn overlong_title_is_always_rejected(title in "[a-z]{11,40}") {
            let mut map = WireMap::new();
            map.insert("body".into(), Value::from("b"));
            map.insert("title".into(), Value::from(title));

            let err = explicit().validate(&map).expect_err("title too long");
            prop_assert!(err.mentions("title"));
            prop_assert!(!err.mentions("body"));
        }
    }
}
