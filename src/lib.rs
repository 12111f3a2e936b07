//! Photo Vault - image uploads, user records and a details cache
//!
//! Accepts image uploads onto disk, keeps user records in a document-style
//! store, and serves a TTL cache of user details.

pub mod api;
pub mod blobs;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
