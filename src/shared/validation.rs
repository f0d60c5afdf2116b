use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::features::prompt_builder::models::{OutputFormat, UseCase};
use crate::shared::constants::{
    DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, DESCRIPTION_TOO_LONG_MESSAGE,
    DESCRIPTION_TOO_SHORT_MESSAGE, INVALID_FORMAT_MESSAGE, INVALID_USE_CASE_MESSAGE,
};

/// Description must be 10-500 characters (Unicode scalar values, not bytes).
///
/// Uses separate messages for the lower and upper bound.
pub fn validate_description_length(value: &str) -> Result<(), ValidationError> {
    let chars = value.chars().count();

    if chars < DESCRIPTION_MIN_CHARS {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed(DESCRIPTION_TOO_SHORT_MESSAGE)));
    }
    if chars > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed(DESCRIPTION_TOO_LONG_MESSAGE)));
    }

    Ok(())
}

pub fn validate_use_case(value: &str) -> Result<(), ValidationError> {
    value.parse::<UseCase>().map(|_| ()).map_err(|_| {
        ValidationError::new("use_case").with_message(Cow::Borrowed(INVALID_USE_CASE_MESSAGE))
    })
}

pub fn validate_format(value: &str) -> Result<(), ValidationError> {
    value.parse::<OutputFormat>().map(|_| ()).map_err(|_| {
        ValidationError::new("format").with_message(Cow::Borrowed(INVALID_FORMAT_MESSAGE))
    })
}

/// Flatten validation errors into `field: message` lines, sorted by field name.
///
/// Fields are named as they appear in the camelCase request body.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = wire_field_name(field);
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    messages.sort();
    messages
}

/// `use_case` -> `useCase`
fn wire_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}
