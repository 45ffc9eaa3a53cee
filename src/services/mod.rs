//! Service layer for business logic.
//!
//! This module contains services that coordinate the engine components with
//! the file system.

pub mod profiles;

// Re-export commonly used types
pub use profiles::{ProfileRejected, ProfileService};
