//! Per-field validation errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";

/// Accumulated validation failures, keyed by field name. Rendered as the
/// body of a 400 response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Require a present, non-blank string field.
pub(crate) fn required(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Some(v) => Some(v),
    }
}

/// Reject a blank value on an optional field, pass everything else through.
pub(crate) fn not_blank(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("username", REQUIRED);
        errors.add("password", REQUIRED);

        assert_eq!(errors.0.len(), 2);
        assert_eq!(errors.0["username"], vec![REQUIRED.to_string()]);
    }

    #[test]
    fn test_into_result_passes_value_through_when_clean() {
        let errors = FieldErrors::new();
        assert_eq!(errors.into_result(42).unwrap(), 42);
    }

    #[test]
    fn test_required_flags_missing_and_blank() {
        let mut errors = FieldErrors::new();
        assert!(required(&mut errors, "title", None).is_none());
        assert!(required(&mut errors, "content", Some("  ".to_string())).is_none());
        assert_eq!(errors.0["title"], vec![REQUIRED.to_string()]);
        assert_eq!(errors.0["content"], vec![BLANK.to_string()]);
    }
}
