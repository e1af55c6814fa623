//! Request payload parsing and validation.
//!
//! # Responsibilities
//! - Turn raw body bytes into a JSON object
//! - Validate `name` and `price` into typed values
//! - Build full records (create/replace) or partial patches (update)
//!
//! # Design Decisions
//! - An empty body counts as `{}`
//! - `name` is always checked before `price`
//! - A patch is fully validated before any field is applied

use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::model::{Price, ProductRecord};

/// Rejections produced while reading a product payload.
///
/// The messages are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Invalid JSON payload")]
    InvalidJson,

    #[error("Field 'name' is required and must be a non-empty string")]
    InvalidName,

    #[error("Field 'price' is required and must be a non-negative number")]
    InvalidPrice,
}

/// Parse a request body into a JSON object.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, PayloadError> {
    if body.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "Payload is not a JSON object");
            Err(PayloadError::InvalidJson)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Payload is not valid JSON");
            Err(PayloadError::InvalidJson)
        }
    }
}

/// Validate a full record: both fields are required.
pub fn record_from_object(payload: &Map<String, Value>) -> Result<ProductRecord, PayloadError> {
    let name = validate_name(payload.get("name"))?;
    let price = validate_price(payload.get("price"))?;
    Ok(ProductRecord::new(name, price))
}

/// Parse and validate a full record from raw bytes.
pub fn parse_record(body: &[u8]) -> Result<ProductRecord, PayloadError> {
    record_from_object(&parse_object(body)?)
}

/// Fields to overwrite on an existing record. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
}

impl ProductPatch {
    /// Validate every field present in the payload.
    pub fn from_object(payload: &Map<String, Value>) -> Result<Self, PayloadError> {
        let name = match payload.get("name") {
            Some(value) => Some(validate_name(Some(value))?),
            None => None,
        };
        let price = match payload.get("price") {
            Some(value) => Some(validate_price(Some(value))?),
            None => None,
        };
        Ok(Self { name, price })
    }

    /// Parse and validate a patch from raw bytes.
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        Self::from_object(&parse_object(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// Shallow merge into `record`.
    pub fn apply(self, record: &mut ProductRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
    }
}

fn validate_name(value: Option<&Value>) -> Result<String, PayloadError> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err(PayloadError::InvalidName),
    }
}

fn validate_price(value: Option<&Value>) -> Result<Price, PayloadError> {
    match value {
        Some(Value::Number(number)) => Price::new(number.clone()).ok_or(PayloadError::InvalidPrice),
        _ => Err(PayloadError::InvalidPrice),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
