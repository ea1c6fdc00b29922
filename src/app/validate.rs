use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::fields::{FieldModel, FieldName};

/// Blocking notice shown when validation fails.
pub const VALIDATION_NOTICE: &str = "Please fill in all required fields with valid information.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Fields that must be filled before the card counts as complete.
pub const REQUIRED_FIELDS: [FieldName; 2] = [FieldName::FullName, FieldName::Email];

/// Result of validating the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Fields to mark as invalid, in form order.
    pub invalid: Vec<FieldName>,
}

impl ValidationReport {
    /// Whether every check passed.
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Check required fields and the email format.
pub fn validate(fields: &FieldModel) -> ValidationReport {
    let mut invalid: Vec<FieldName> = REQUIRED_FIELDS
        .into_iter()
        .filter(|f| fields.value(*f).is_none())
        .collect();

    if let Some(email) = fields.value(FieldName::Email)
        && !is_valid_email(email)
    {
        invalid.push(FieldName::Email);
    }

    ValidationReport { invalid }
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
#[path = "../../tests/unit/app/validate.rs"]
mod tests;
