use crate::validate::{IssueContext, messages};
use snipdb_schema::types::ChoiceSet;

///
/// Validator
///
/// A single constraint check. Validators never fail hard; they report
/// through the context and let the caller decide.
///

pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T, ctx: &mut dyn IssueContext);
}

///
/// MaxLength
/// Counts Unicode scalar values, not bytes.
///

pub struct MaxLength {
    max: usize,
}

impl MaxLength {
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator<str> for MaxLength {
    fn validate(&self, value: &str, ctx: &mut dyn IssueContext) {
        if value.chars().count() > self.max {
            ctx.issue(messages::max_length(self.max));
        }
    }
}

///
/// NotBlank
///

pub struct NotBlank;

impl Validator<str> for NotBlank {
    fn validate(&self, value: &str, ctx: &mut dyn IssueContext) {
        if value.is_empty() {
            ctx.issue(messages::BLANK);
        }
    }
}

///
/// OneOf
///

pub struct OneOf<'a> {
    set: &'a ChoiceSet,
}

impl<'a> OneOf<'a> {
    #[must_use]
    pub const fn new(set: &'a ChoiceSet) -> Self {
        Self { set }
    }
}

impl Validator<str> for OneOf<'_> {
    fn validate(&self, value: &str, ctx: &mut dyn IssueContext) {
        if !self.set.contains(value) {
            ctx.issue(messages::invalid_choice(value));
        }
    }
}
