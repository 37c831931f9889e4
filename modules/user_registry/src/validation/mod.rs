//! Request validation: reusable field rules and a collector that turns
//! rule failures into the per-field map of a validation problem.

pub mod rules;

pub use rules::Rule;

use problem_details::FieldErrors;

/// Implemented by every inbound request model.
pub trait Validate {
    /// `Err` carries every failing field with its joined messages.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Accumulates rule failures field by field.
#[derive(Debug, Default)]
pub struct Violations(FieldErrors);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `rules` against `value` and record the joined failures under `field`.
    pub fn check(&mut self, field: &str, value: &str, rules: &[Rule]) -> &mut Self {
        if let Some(message) = rules::apply(value, rules) {
            self.add(field, message);
        }
        self
    }

    /// Record a failure message under `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_one_joined_message_per_field() {
        let mut v = Violations::new();
        v.check("phoneNumber", "+234-801", &[Rule::MustNotExceed(5), Rule::PhoneNumberCharacters])
            .check("firstName", "Ada", &[Rule::IsRequired]);

        let errors = v.into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors["phoneNumber"],
            vec!["Exceeds 5 characters. | Contains unallowed characters.".to_string()]
        );
    }

    #[test]
    fn no_failures_is_ok() {
        let mut v = Violations::new();
        v.check("userId", "01J0ABCDEF", &[Rule::IsRequired, Rule::UserIdCharacters]);
        assert!(v.is_empty());
        assert!(v.into_result().is_ok());
    }
}
