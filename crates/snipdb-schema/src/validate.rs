//! Local schema invariants.

use crate::{MAX_FIELD_NAME_LEN, error::ErrorTree};
use convert_case::{Case, Casing};

///
/// ValidateNode
///
/// Implemented by every schema node. Validation collects all problems
/// into an `ErrorTree` rather than stopping at the first one.
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

/// Check a schema identifier: non-empty, bounded and snake_case.
pub fn validate_ident(ident: &str, max_len: usize, errs: &mut ErrorTree) {
    if ident.is_empty() {
        errs.add("identifier is empty");
        return;
    }

    let len = ident.len();
    if len > max_len {
        crate::err!(errs, "identifier '{ident}' is too long ({len} > {max_len})");
    }

    if ident.to_case(Case::Snake) != ident {
        crate::err!(errs, "identifier '{ident}' is not snake_case");
    }
}

/// Field identifiers share one length bound.
pub fn validate_field_ident(ident: &str, errs: &mut ErrorTree) {
    validate_ident(ident, MAX_FIELD_NAME_LEN, errs);
}
