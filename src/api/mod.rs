//! API Module
//!
//! HTTP handlers and routing for the photo server.
//!
//! # Endpoints
//! - `POST /upload`, `POST /uploadMultiple` - Multipart image uploads
//! - `GET /:filename` - Stored file bytes
//! - `GET /images/:id` - User record lookup
//! - `/api/*-details` - Detail creation and the details cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
