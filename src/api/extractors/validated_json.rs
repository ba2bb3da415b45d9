//! Validated JSON extractor - Combines deserialization with validation.

use std::borrow::Cow;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::MSG_NOT_BLANK;
use crate::errors::{AppError, FieldErrors};

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed bodies are rejected as a bad request; bodies that parse but
/// break a field rule are rejected with a `{field: message}` map.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use branch_registry::api::extractors::{not_blank, ValidatedJson};
///
/// #[derive(Deserialize, Validate)]
/// struct UpdateBranchRequest {
///     #[validate(custom(function = "not_blank"))]
///     phone_number: String,
/// }
///
/// async fn update(ValidatedJson(payload): ValidatedJson<UpdateBranchRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::Validation(field_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Reject empty and whitespace-only text
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::Borrowed(MSG_NOT_BLANK));
        return Err(error);
    }
    Ok(())
}

/// Flatten validation errors into one message per (camelCase) field
pub(crate) fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let message = errs
            .first()
            .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "is invalid".to_string());
        fields.entry(camel_case(field)).or_insert(message);
    }
    fields
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(custom(function = "not_blank"))]
        phone_number: String,
        #[validate(email(message = "must be a well-formed email address"))]
        email_address: String,
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("022555666").is_ok());
    }

    #[test]
    fn errors_are_keyed_by_camel_case_field() {
        let probe = Probe {
            phone_number: " ".to_string(),
            email_address: "not-an-email".to_string(),
        };
        let fields = field_errors(&probe.validate().unwrap_err());

        assert_eq!(fields.get("phoneNumber").map(String::as_str), Some(MSG_NOT_BLANK));
        assert_eq!(
            fields.get("emailAddress").map(String::as_str),
            Some("must be a well-formed email address")
        );
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(camel_case("email_address"), "emailAddress");
        assert_eq!(camel_case("name"), "name");
        assert_eq!(camel_case("phoneNumber"), "phoneNumber");
    }
}
