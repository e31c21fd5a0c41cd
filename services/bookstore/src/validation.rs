//! Input validation predicates shared by the request DTOs
//!
//! Every predicate accepts the empty string; presence is enforced
//! separately with `length(min = ..)` or `required`.

use regex::Regex;
use std::{borrow::Cow, sync::OnceLock};
use validator::{ValidationError, ValidationErrors};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Letters only
pub fn validate_alpha(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(invalid("alpha", "must contain English letters only"))
    }
}

/// Letters and digits only
pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(invalid("alphanumeric", "must contain English letters and digits only"))
    }
}

/// Code points below 128 only
pub fn validate_ascii(value: &str) -> Result<(), ValidationError> {
    if value.is_ascii() {
        Ok(())
    } else {
        Err(invalid("ascii", "must contain ASCII characters only"))
    }
}

/// Syntactic email check
pub fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("Failed to compile email regex")
    });

    if value.is_empty() || (value.len() <= 254 && regex.is_match(value)) {
        Ok(())
    } else {
        Err(invalid("email", "must be a valid email address"))
    }
}

/// JSON name of a struct field: `phone_number` becomes `phoneNumber`
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Flatten field diagnostics into `field: message; field: message`
///
/// Fields carry their JSON names and are ordered by name so the output is
/// stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            (wire_name(field), messages)
        })
        .collect();
    fields.sort();

    fields
        .into_iter()
        .map(|(field, messages)| format!("{}: {}", field, messages))
        .collect::<Vec<_>>()
        .join("; ")
}
