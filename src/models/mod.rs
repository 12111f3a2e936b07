//! Request and Response models for the photo server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddDetailsRequest, CacheKeyRequest, UpdateDetailsRequest};
pub use responses::{
    AddDetailsResponse, DeleteDetailsResponse, DetailsResponse, HealthResponse,
    UpdateDetailsResponse, UploadMultipleResponse, UploadResponse,
};
