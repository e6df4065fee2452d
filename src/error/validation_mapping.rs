use std::borrow::Cow;

use validator::ValidationErrors;

use super::app_error::ValidationIssue;

/// Flattens validator output into wire-level issues. Every request DTO in
/// this API validates flat fields only, so nested struct and list errors
/// never occur here; `field_errors()` covers the whole set.
pub(super) fn collect_validation_issues(errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(Cow::to_string)
                .unwrap_or_else(|| format!("{field} is invalid"));
            issues.push(ValidationIssue {
                field: field.to_string(),
                message,
                code: error.code.to_string(),
            });
        }
    }
    issues
}
