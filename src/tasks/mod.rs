//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: Removes expired details-cache entries every check period

mod cleanup;

pub use cleanup::spawn_cleanup_task;
