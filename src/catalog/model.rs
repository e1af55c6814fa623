//! Product data types.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;
use serde_json::Number;

/// Store-assigned product identifier: a decimal-digit string.
///
/// The original spelling is kept, so `"007"` and `"7"` are different keys,
/// while the numeric value drives id allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parse an id, rejecting empty, non-digit, or out-of-range strings.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse::<u64>().ok()?;
        Some(Self(raw.to_string()))
    }

    /// Numeric value of the id.
    pub fn value(&self) -> u64 {
        // Construction guarantees the digits fit in a u64.
        self.0.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative price, kept as the JSON number the client sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Price(Number);

impl Price {
    /// Accepts any JSON number that is not below zero.
    pub fn new(number: Number) -> Option<Self> {
        match number.as_f64() {
            Some(value) if value >= 0.0 => Some(Self(number)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(Number::from(value))
    }
}

/// A product's stored fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    /// Trimmed, never empty.
    pub name: String,
    pub price: Price,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A record together with its id, as returned by create/replace/update/delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub record: ProductRecord,
}

impl Product {
    pub fn new(id: ProductId, record: ProductRecord) -> Self {
        Self { id, record }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_id_parse() {
        assert_eq!(ProductId::parse("42").map(|id| id.value()), Some(42));
        assert_eq!(ProductId::parse("007").map(|id| id.value()), Some(7));
        assert!(ProductId::parse("").is_none());
        assert!(ProductId::parse("abc").is_none());
        assert!(ProductId::parse("-1").is_none());
        assert!(ProductId::parse("99999999999999999999999").is_none());
    }

    #[test]
    fn test_price_rejects_negative() {
        assert!(Price::new(Number::from(0)).is_some());
        assert!(Price::new(Number::from(-1)).is_none());
        assert!(Number::from_f64(-0.5).and_then(Price::new).is_none());
        assert!(Number::from_f64(19.99).and_then(Price::new).is_some());
    }

    #[test]
    fn test_product_serializes_flat() {
        let product = Product::new(
            ProductId::from(2),
            ProductRecord::new("Mouse", Price::from(25)),
        );
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"id": "2", "name": "Mouse", "price": 25})
        );
    }

    #[test]
    fn test_float_price_keeps_representation() {
        let price = Number::from_f64(9.5).and_then(Price::new).unwrap();
        let record = ProductRecord::new("Cable", price);
        assert_eq!(serde_json::to_value(&record).unwrap()["price"], json!(9.5));
    }
}
