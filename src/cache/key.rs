//! Cache keys.
//!
//! Clients address cache entries with a JSON string or number. Both forms are
//! normalized to one string so that `5` and `"5"` name the same entry.

use std::fmt;

use serde_json::Value;

use crate::error::AppError;

/// Message returned for any key that is not a string or number.
pub const INVALID_KEY_MESSAGE: &str = "Key must be a string or number";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from a raw JSON value, rejecting anything that is not a
    /// string or a number.
    pub fn from_json(value: &Value) -> Result<Self, AppError> {
        match value {
            Value::String(s) => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(number_key(n))),
            _ => Err(AppError::InvalidKey(INVALID_KEY_MESSAGE.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
