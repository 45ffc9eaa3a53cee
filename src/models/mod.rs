//! Data models for keys, remaps, search crafts and profiles.
//!
//! Models are plain serde structures shared by the engine components and
//! the profile store.

pub mod key;
pub mod profile;
pub mod remap;
pub mod search_craft;

// Re-export all model types
pub use key::{KeyCategory, KeyIdentifier, LayoutPosition};
pub use profile::{CustomKeyRecord, Profile, SearchCraftFailure};
pub use remap::{RemapEntry, RemapTarget};
pub use search_craft::SearchCraftEntry;
