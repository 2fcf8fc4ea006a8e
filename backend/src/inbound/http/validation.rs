//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are deserialised leniently (optional fields, raw JSON
//! values for amounts and item maps) and checked here so that clients get a
//! field-specific `invalid_request` instead of a generic parse failure.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::domain::{Error, ItemRequest, Menu, item_requests_from_json};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankName,
    InvalidAmount,
    InvalidItems,
    UnknownMenu,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankName => "blank_name",
            ErrorCode::InvalidAmount => "invalid_amount",
            ErrorCode::InvalidItems => "invalid_items",
            ErrorCode::UnknownMenu => "unknown_menu",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Parse the `{menu}` path segment.
pub(crate) fn parse_menu(raw: &str) -> Result<Menu, Error> {
    Menu::from_str(raw).map_err(|_| {
        ValidationError::new("menu", "menu must be general or team")
            .with_value(ErrorCode::UnknownMenu, raw)
    })
}

/// Require a present, non-blank name.
pub(crate) fn require_name(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let name = value.ok_or_else(|| missing_field_error(field))?;
    if name.trim().is_empty() {
        let field = field.as_str();
        return Err(ValidationError::new(field, format!("{field} must not be blank"))
            .with_code(ErrorCode::BlankName));
    }
    Ok(name)
}

/// Require a JSON number and convert it to an exact decimal.
///
/// Strings, booleans and other non-numeric values are rejected even when
/// they look numeric.
pub(crate) fn parse_amount(value: Option<Value>, field: FieldName) -> Result<Decimal, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    let invalid = |value: Value| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} must be a JSON number"))
            .with_value(ErrorCode::InvalidAmount, value)
    };
    let Value::Number(number) = &value else {
        return Err(invalid(value));
    };
    let text = number.to_string();
    match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(amount) => Ok(amount),
        Err(_) => Err(invalid(value)),
    }
}

/// Require an object mapping product names to quantities.
pub(crate) fn parse_items(value: Option<Value>, field: FieldName) -> Result<Vec<ItemRequest>, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    item_requests_from_json(&value).ok_or_else(|| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} must be an object of product quantities"))
            .with_value(ErrorCode::InvalidItems, value)
    })
}
