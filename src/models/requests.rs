//! Request DTOs for the photo server API
//!
//! Defines the structure of incoming JSON request bodies.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::AppError;
use crate::records::{ContactDetails, RecordKind, UserDetails};

/// Request body for POST /api/add-details
///
/// Fields stay raw JSON and are cast when the record is built, so `"12345"`
/// is accepted as a pincode and `123` as a username.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddDetailsRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
    #[serde(default)]
    pub pincode: Option<Value>,
}

impl AddDetailsRequest {
    /// The record this request creates: credentials plus a pincode.
    ///
    /// Fails when a field cannot be cast to its stored type.
    pub fn into_record_kind(self) -> Result<RecordKind, AppError> {
        Ok(RecordKind::Details(UserDetails {
            username: cast_string("username", self.username)?,
            password: cast_string("password", self.password)?,
            details: Some(ContactDetails {
                pincode: cast_number("pincode", self.pincode)?,
                ..Default::default()
            }),
            ..Default::default()
        }))
    }
}

fn cast_failed(field: &str, value: &Value, target: &str) -> AppError {
    AppError::Validation(format!(
        "Cast to {} failed for value {} at path \"{}\"",
        target, value, field
    ))
}

/// Scalars become their string form; arrays and objects do not cast.
fn cast_string(field: &str, value: Option<Value>) -> Result<Option<String>, AppError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(cast_failed(field, &other, "string")),
    }
}

/// Numbers pass through, numeric strings are parsed, booleans become 1/0
/// and a blank string is no value.
fn cast_number(field: &str, value: Option<Value>) -> Result<Option<Number>, AppError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n)),
        Some(Value::Bool(b)) => Ok(Some(Number::from(u8::from(b)))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Some(Number::from(i)));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Some)
                .ok_or_else(|| cast_failed(field, &Value::String(s.clone()), "Number"))
        }
        Some(other) => Err(cast_failed(field, &other, "Number")),
    }
}

/// Request body carrying only a cache key (get and delete routes).
///
/// The key stays raw JSON so that its type can be checked by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheKeyRequest {
    #[serde(default)]
    pub key: Value,
}

/// Request body for PUT /api/update-details/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub details: Option<ContactDetails>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl UpdateDetailsRequest {
    /// The value written to the cache. `details` is always present, empty
    /// when the body had none.
    pub fn cached_value(&self) -> UserDetails {
        UserDetails {
            username: self.username.clone(),
            password: self.password.clone(),
            details: Some(self.details.clone().unwrap_or_default()),
            profile_picture: self.profile_picture.clone(),
            dob: self.dob.clone(),
            key: (!self.key.is_null()).then(|| self.key.clone()),
        }
    }
}
