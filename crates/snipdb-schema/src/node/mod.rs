mod entity;
mod field;
mod primary_key;

pub use entity::Entity;
pub use field::{Field, FieldList};
pub use primary_key::{PrimaryKey, PrimaryKeySource};
