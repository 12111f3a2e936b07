//! Cache Module
//!
//! In-memory details cache with a fixed TTL per entry and a background sweep.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::{CacheKey, INVALID_KEY_MESSAGE};
pub use stats::CacheStats;
pub use store::CacheStore;
