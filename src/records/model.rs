//! User record shapes.
//!
//! Each of the three creation routes produces a different kind of record;
//! they share only the identifier. On the wire a record is one flat JSON
//! object: `{"_id": ..., <kind fields>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::RecordId;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub kind: RecordKind,
}

/// What a record was created from.
///
/// Untagged: variants are told apart by their fields, so the order below
/// matters when reading records back (most specific first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordKind {
    /// Multi-file upload
    Gallery { photos: Vec<StoredImage> },
    /// Single-file upload
    Image(StoredImage),
    /// Detail creation
    Details(UserDetails),
}

/// One file saved in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Generated file name
    pub photo: String,
    /// Relative path with forward slashes
    pub photopath: String,
}

/// Free-form user details. Every field is optional and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ContactDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Client-side cache correlation token; never checked against the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
