use validator::{Validate, ValidationError, ValidationErrors};

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

/// Runs the derived rules, then rejects whitespace-only values for `fields`.
pub fn validate_not_blank<T: Validate>(
    val: &T,
    fields: &[(&'static str, &str)],
) -> Result<(), ValidationErrors> {
    let mut errors = match validate(val) {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    for (field, value) in fields {
        if value.trim().is_empty() && !errors.field_errors().contains_key(field) {
            let mut error = ValidationError::new("blank");
            error.message = Some(format!("{} must not be blank", field).into());
            errors.add(*field, error);
        }
    }
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Trims optional free text, treating blank as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
