use serde::Serialize;

///
/// PrimaryKey
///
/// Structured primary-key metadata for an entity schema.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PrimaryKey {
    pub field: &'static str,
    pub source: PrimaryKeySource,
}

impl PrimaryKey {
    /// A key assigned by the store on create.
    #[must_use]
    pub const fn internal(field: &'static str) -> Self {
        Self {
            field,
            source: PrimaryKeySource::Internal,
        }
    }

    /// A key supplied by the caller rather than the store.
    #[must_use]
    pub const fn external(field: &'static str) -> Self {
        Self {
            field,
            source: PrimaryKeySource::External,
        }
    }
}

///
/// PrimaryKeySource
///
/// Declares where primary-key values originate.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum PrimaryKeySource {
    #[default]
    Internal,

    External,
}
