use serde::Serialize;
use std::fmt;

///
/// Primitive
///
/// Wire-level shape of a field, independent of its constraints.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Choice,
    Int,
    Text,
}

impl Primitive {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Choice => "choice",
            Self::Int => "int",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ChoiceSet
///
/// A closed set of legal wire names for an enumerated field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ChoiceSet {
    pub ident: &'static str,
    pub values: &'static [&'static str],
}

impl ChoiceSet {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Choice(&'static ChoiceSet),
    Int,
    Text,
}

impl FieldKind {
    #[must_use]
    pub const fn primitive(self) -> Primitive {
        match self {
            Self::Bool => Primitive::Bool,
            Self::Choice(_) => Primitive::Choice,
            Self::Int => Primitive::Int,
            Self::Text => Primitive::Text,
        }
    }

    #[must_use]
    pub const fn choices(self) -> Option<&'static ChoiceSet> {
        match self {
            Self::Choice(set) => Some(set),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

///
/// InputHint
///
/// Rendering hint for form front-ends. Has no effect on validation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum InputHint {
    Checkbox,
    Number,
    Select,
    Text,
    TextArea,
}

impl InputHint {
    /// Hint used when a field declares none.
    #[must_use]
    pub const fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Self::Checkbox,
            FieldKind::Choice(_) => Self::Select,
            FieldKind::Int => Self::Number,
            FieldKind::Text => Self::Text,
        }
    }
}

///
/// Arg
///
/// A literal default value attached to a field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arg {
    Bool(bool),
    Int(i64),
    Text(&'static str),
}

impl Arg {
    /// Whether this literal can seed a field of `kind`.
    #[must_use]
    pub const fn fits(self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Bool(_), FieldKind::Bool)
                | (Self::Int(_), FieldKind::Int)
                | (Self::Text(_), FieldKind::Text | FieldKind::Choice(_))
        )
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "\"{v}\""),
        }
    }
}

///
/// TESTS
///
