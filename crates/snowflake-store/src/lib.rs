//! # Snowflake Store
//!
//! Versioned storage for scene cards and their workflow state.
//!
//! Every write appends a new version; deletes append a tombstone, so the
//! full history of a scene stays queryable.

pub mod record;
pub mod store;

pub use record::SceneRecord;
pub use store::{InMemorySceneStore, SceneStore, StoreEntry};
