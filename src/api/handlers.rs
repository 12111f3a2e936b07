//! API Handlers
//!
//! HTTP request handlers for each photo server endpoint. Every handler makes
//! one call into the record store, the blob store, or the cache.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, FromRequest, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, info, warn};

use crate::blobs::{content_type_for, BlobStore};
use crate::cache::{CacheKey, CacheStore};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AddDetailsRequest, AddDetailsResponse, CacheKeyRequest, DeleteDetailsResponse,
    DetailsResponse, HealthResponse, UpdateDetailsRequest, UpdateDetailsResponse,
    UploadMultipleResponse, UploadResponse,
};
use crate::records::{RecordKind, RecordStore, Records, StoredImage, UserRecord};

/// Most files accepted by a single multi-file upload.
pub const MAX_UPLOAD_FILES: usize = 10;

/// Application state shared across all handlers.
///
/// Every store is injected here; nothing is a module-level singleton.
#[derive(Clone)]
pub struct AppState {
    /// Details cache, shared and locked per operation
    pub cache: Arc<RwLock<CacheStore>>,
    /// User records
    pub records: Records,
    /// Uploaded files
    pub blobs: BlobStore,
}

impl AppState {
    /// Creates a new AppState from already-built stores.
    pub fn new(cache: CacheStore, records: Arc<dyn RecordStore>, blobs: BlobStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            records: Records::new(records),
            blobs,
        }
    }

    /// Creates a new AppState from configuration and a record store.
    pub fn from_config(config: &Config, records: Arc<dyn RecordStore>) -> Self {
        Self::new(
            CacheStore::new(config.cache_ttl),
            records,
            BlobStore::new(&config.upload_dir),
        )
    }
}

/// JSON body extractor whose rejections use the app's error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

// == Uploads ==

/// A file pulled out of a multipart body, not yet written to disk.
struct UploadedFile {
    file_name: String,
    bytes: axum::body::Bytes,
}

/// Collects the file parts named `field`. Parts without a filename, or with
/// an empty one, are plain form values and are skipped. More than `limit` files is an error.
async fn collect_files(
    mut multipart: Multipart,
    field: &str,
    limit: usize,
) -> Result<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let Some(file_name) = part
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };
        if files.len() == limit {
            return Err(AppError::Validation(format!(
                "Too many files: at most {} allowed in '{}'",
                limit, field
            )));
        }

        let bytes = part
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        files.push(UploadedFile { file_name, bytes });
    }

    Ok(files)
}

async fn save_all(blobs: &BlobStore, files: &[UploadedFile]) -> Result<Vec<StoredImage>> {
    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        stored.push(blobs.save(&file.bytes, &file.file_name).await?);
    }
    Ok(stored)
}

/// Handler for POST /upload
///
/// Saves the `photo` file and creates a record pointing at it.
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let no_file = || AppError::Validation("No file uploaded".to_string());

    let multipart = multipart.map_err(|_| no_file())?;
    let files = collect_files(multipart, "photo", 1).await?;
    let file = files.first().ok_or_else(no_file)?;

    let image = state.blobs.save(&file.bytes, &file.file_name).await?;
    let record = state.records.create(RecordKind::Image(image)).await?;
    info!(id = %record.id, "Single image uploaded");

    Ok(Json(UploadResponse::new(record)))
}

/// Handler for POST /uploadMultiple
///
/// Saves up to [`MAX_UPLOAD_FILES`] `photos` files and creates one record
/// listing all of them.
pub async fn upload_multiple_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadMultipleResponse>> {
    let no_files = || AppError::Validation("Please upload files".to_string());

    let multipart = multipart.map_err(|_| no_files())?;
    let files = collect_files(multipart, "photos", MAX_UPLOAD_FILES).await?;
    if files.is_empty() {
        return Err(no_files());
    }

    let photos = save_all(&state.blobs, &files).await?;
    let record = state.records.create(RecordKind::Gallery { photos }).await?;
    info!(id = %record.id, count = files.len(), "Images uploaded");

    Ok(Json(UploadMultipleResponse::new(record)))
}

/// Handler for GET /:filename
///
/// Sends the stored file; any failure is a plain-text 404.
pub async fn file_handler(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    match state.blobs.read(&filename).await {
        Ok(Some(bytes)) => (
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            Body::from(bytes),
        )
            .into_response(),
        Ok(None) => {
            debug!(filename = %filename, "File not found");
            (StatusCode::NOT_FOUND, "Image not found").into_response()
        }
        Err(e) => {
            error!(filename = %filename, error = %e, "Failed to read file");
            (StatusCode::NOT_FOUND, "Image not found").into_response()
        }
    }
}

/// Handler for GET /images/:id
pub async fn image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>> {
    state
        .records
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))
}

// == Details ==

/// Handler for POST /api/add-details
///
/// Fields that cannot be cast and store failures both answer 400 on this
/// route.
pub async fn add_details_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<AddDetailsRequest>,
) -> Result<(StatusCode, Json<AddDetailsResponse>)> {
    let failed = |e: &dyn std::fmt::Display| {
        warn!(error = %e, "Failed to create user");
        AppError::Validation("Failed to create user".to_string())
    };

    let kind = req.into_record_kind().map_err(|e| failed(&e))?;
    let record = state.records.create(kind).await.map_err(|e| failed(&e))?;

    Ok((StatusCode::CREATED, Json(AddDetailsResponse::new(record.id))))
}

/// Handler for OPTIONS /api/get-details
pub async fn get_details_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<CacheKeyRequest>,
) -> Result<Json<DetailsResponse>> {
    let key = CacheKey::from_json(&req.key)?;

    // Write lock: lookups update stats and drop expired entries
    let mut cache = state.cache.write().await;
    let data = cache.get(&key).map_err(not_in_cache)?;

    Ok(Json(DetailsResponse { data }))
}

/// Handler for PUT /api/update-details/:id
///
/// Overwrites an existing cache entry; an absent key is never created. The
/// record store is not touched and `id` is only logged.
pub async fn update_details_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateDetailsRequest>,
) -> Result<Json<UpdateDetailsResponse>> {
    let key = CacheKey::from_json(&req.key)?;
    let updated = req.cached_value();
    let value = serde_json::to_value(&updated).map_err(|e| AppError::Validation(e.to_string()))?;

    let mut cache = state.cache.write().await;
    cache.replace(key.clone(), value).map_err(not_in_cache)?;
    debug!(id = %id, key = %key, "Cached details updated");

    Ok(Json(UpdateDetailsResponse::new(updated)))
}

/// Handler for DELETE /api/delete-details/:id
pub async fn delete_details_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<CacheKeyRequest>,
) -> Result<Json<DeleteDetailsResponse>> {
    let key = CacheKey::from_json(&req.key)?;

    let mut cache = state.cache.write().await;
    cache.delete(&key).map_err(not_in_cache)?;
    debug!(id = %id, key = %key, "Cached details deleted");

    Ok(Json(DeleteDetailsResponse::ok()))
}

/// Collapses cache misses (absent or expired) into one client-facing 404.
fn not_in_cache(err: AppError) -> AppError {
    match err {
        AppError::NotFound(_) | AppError::Expired(_) => {
            AppError::NotFound("Data not found in cache".to_string())
        }
        other => other,
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.cache.read().await.stats();
    Json(HealthResponse::healthy(stats))
}
