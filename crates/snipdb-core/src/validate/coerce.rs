use crate::{
    validate::{FieldScope, MaxLength, NotBlank, OneOf, Validator, messages},
    value::Value,
};
use snipdb_schema::{
    node::Field,
    types::{ChoiceSet, FieldKind},
};

const TRUE_WORDS: [&str; 6] = ["t", "y", "yes", "true", "on", "1"];
const FALSE_WORDS: [&str; 6] = ["f", "n", "no", "false", "off", "0"];

/// Coerce one raw input value to the canonical form of `field`.
/// Returns `None` once an issue has been raised against the scope.
pub(super) fn coerce(field: &Field, raw: &Value, scope: &mut FieldScope<'_>) -> Option<Value> {
    if raw.is_null() {
        if field.allow_null {
            return Some(Value::Null);
        }
        scope.issue(messages::NULL);
        return None;
    }

    match field.kind {
        FieldKind::Bool => coerce_bool(raw, scope).map(Value::Bool),
        FieldKind::Choice(set) => coerce_choice(set, raw, scope).map(Value::Text),
        FieldKind::Int => coerce_int(raw, scope).map(Value::Int),
        FieldKind::Text => coerce_text(field, raw, scope).map(Value::Text),
    }
}

// Numbers are accepted and carried as their decimal text.
fn coerce_text(field: &Field, raw: &Value, scope: &mut FieldScope<'_>) -> Option<String> {
    let text = match raw {
        Value::Text(s) => s.clone(),
        Value::Int(_) | Value::Uint(_) | Value::Float(_) => raw.scalar_text()?,
        _ => {
            scope.issue(messages::INVALID_TEXT);
            return None;
        }
    };

    let text = if field.trim_whitespace {
        text.trim().to_string()
    } else {
        text
    };

    if text.is_empty() && field.allow_blank {
        return Some(text);
    }

    NotBlank.validate(&text, scope);
    if let Some(max) = field.max_length {
        MaxLength::new(max).validate(&text, scope);
    }

    if scope.has_issues() { None } else { Some(text) }
}

#[allow(clippy::float_cmp)]
fn coerce_bool(raw: &Value, scope: &mut FieldScope<'_>) -> Option<bool> {
    let parsed = match raw {
        Value::Bool(b) => Some(*b),
        Value::Int(1) | Value::Uint(1) => Some(true),
        Value::Int(0) | Value::Uint(0) => Some(false),
        Value::Float(v) if *v == 1.0 => Some(true),
        Value::Float(v) if *v == 0.0 => Some(false),
        Value::Text(s) => {
            if TRUE_WORDS.iter().any(|w| spelled_as(s, w)) {
                Some(true)
            } else if FALSE_WORDS.iter().any(|w| spelled_as(s, w)) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    };

    if parsed.is_none() {
        scope.issue(messages::INVALID_BOOL);
    }

    parsed
}

// lower, UPPER or Title spelling of `word`; mixed case does not count
fn spelled_as(input: &str, word: &str) -> bool {
    if input == word || input == word.to_ascii_uppercase() {
        return true;
    }

    let mut chars = word.chars();
    chars.next().is_some_and(|first| {
        let title = format!("{}{}", first.to_ascii_uppercase(), chars.as_str());
        input == title
    })
}

fn coerce_choice(set: &ChoiceSet, raw: &Value, scope: &mut FieldScope<'_>) -> Option<String> {
    let Some(text) = raw.scalar_text() else {
        scope.issue(messages::invalid_choice(raw.kind_label()));
        return None;
    };

    OneOf::new(set).validate(&text, scope);

    if scope.has_issues() { None } else { Some(text) }
}

fn coerce_int(raw: &Value, scope: &mut FieldScope<'_>) -> Option<i64> {
    let parsed = match raw {
        Value::Int(v) => Some(*v),
        Value::Uint(v) => i64::try_from(*v).ok(),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    };

    if parsed.is_none() {
        scope.issue(messages::INVALID_INT);
    }

    parsed
}
