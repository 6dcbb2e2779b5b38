use crate::{data::ValidatedData, error::InternalError, traits::EntityKind};
use snipdb_schema::node::Field;

/// Apply validated data onto an entity, field by field.
///
/// Writable fields present in `data` overwrite the entity's value; absent
/// fields keep the current value. Read-only fields are never touched.
/// Returns the names of the fields that were written.
pub fn merge_fields<E: EntityKind>(
    entity: &mut E,
    fields: &[Field],
    data: &ValidatedData,
) -> Result<Vec<&'static str>, InternalError> {
    let mut written = Vec::new();

    for field in fields.iter().filter(|f| f.is_writable()) {
        if let Some(value) = data.get(field.ident) {
            entity
                .set_value(field.ident, value.clone())
                .map_err(|err| {
                    InternalError::new(
                        err.class,
                        err.origin,
                        format!("merge failed at {}: {}", field.ident, err.message),
                    )
                })?;
            written.push(field.ident);
        }
    }

    Ok(written)
}
