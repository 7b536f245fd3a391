//! Shared validation helpers for HTTP request payloads.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Newtype for request field names so error builders cannot mix them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// An `invalid_request` error annotated with the offending field and value.
pub(crate) fn invalid_field_error(
    field: FieldName,
    code: &'static str,
    message: impl Into<String>,
    value: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": code,
    }))
}

/// Parse a path or payload UUID, reporting the field on failure.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        invalid_field_error(
            field,
            "invalid_uuid",
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}
