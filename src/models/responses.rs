//! Response DTOs for the photo server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::records::{RecordId, UserDetails, UserRecord};

/// Response body for POST /upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file: UserRecord,
}

impl UploadResponse {
    pub fn new(file: UserRecord) -> Self {
        Self {
            message: "File uploaded successfully".to_string(),
            file,
        }
    }
}

/// Response body for POST /uploadMultiple
#[derive(Debug, Clone, Serialize)]
pub struct UploadMultipleResponse {
    pub message: String,
    pub files: UserRecord,
}

impl UploadMultipleResponse {
    pub fn new(files: UserRecord) -> Self {
        Self {
            message: "Files uploaded successfully".to_string(),
            files,
        }
    }
}

/// Response body for POST /api/add-details
#[derive(Debug, Clone, Serialize)]
pub struct AddDetailsResponse {
    pub msg: String,
    pub id: RecordId,
}

impl AddDetailsResponse {
    pub fn new(id: RecordId) -> Self {
        Self {
            msg: "Successfully created".to_string(),
            id,
        }
    }
}

/// Response body for OPTIONS /api/get-details
#[derive(Debug, Clone, Serialize)]
pub struct DetailsResponse {
    pub data: Value,
}

/// Response body for PUT /api/update-details/:id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsResponse {
    pub status: u16,
    pub success: bool,
    pub updated_data: UserDetails,
}

impl UpdateDetailsResponse {
    pub fn new(updated_data: UserDetails) -> Self {
        Self {
            status: 200,
            success: true,
            updated_data,
        }
    }
}

/// Response body for DELETE /api/delete-details/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteDetailsResponse {
    pub status: u16,
    pub success: bool,
}

impl DeleteDetailsResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            success: true,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Details cache counters
    pub cache: CacheStats,
    /// Share of cache lookups that were hits
    pub hit_rate: f64,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: CacheStats) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            hit_rate: cache.hit_rate(),
            cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RecordKind, StoredImage};
    use serde_json::json;

    fn image_record() -> UserRecord {
        UserRecord {
            id: RecordId::parse("ABCDEFGHIJ").unwrap(),
            kind: RecordKind::Image(StoredImage {
                photo: "1.png".into(),
                photopath: "uploads/1.png".into(),
            }),
        }
    }

    #[test]
    fn test_upload_response_serialize() {
        let json = serde_json::to_value(UploadResponse::new(image_record())).unwrap();
        assert_eq!(json["message"], "File uploaded successfully");
        assert_eq!(json["file"]["_id"], "ABCDEFGHIJ");
        assert_eq!(json["file"]["photopath"], "uploads/1.png");
    }

    #[test]
    fn test_add_details_response_serialize() {
        let resp = AddDetailsResponse::new(RecordId::parse("QWERTY").unwrap());
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json, json!({"msg": "Successfully created", "id": "QWERTY"}));
    }

    #[test]
    fn test_update_response_is_camel_case() {
        let resp = UpdateDetailsResponse::new(UserDetails::default());
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json, json!({"status": 200, "success": true, "updatedData": {}}));
    }

    #[test]
    fn test_delete_response_serialize() {
        let json = serde_json::to_value(DeleteDetailsResponse::ok()).unwrap();
        assert_eq!(json, json!({"status": 200, "success": true}));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(CacheStats::new());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
        assert!(json.contains("total_entries"));
        assert!(json.contains("hit_rate"));
    }
}
