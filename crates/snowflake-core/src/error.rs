//! Error types for the Snowflake scene engine.
//!
//! Rule failures are not errors: they are returned as
//! [`Violation`](crate::triage::Violation) data. Errors here are reserved for
//! malformed input shapes and for the surrounding service plumbing.

use thiserror::Error;
use uuid::Uuid;

use crate::triage::Verdict;

/// Main error type for scene engine operations.
#[derive(Error, Debug, Clone)]
pub enum SceneError {
    /// The scene card could not be built from its input shape.
    #[error("Scene card construction failed: {message}")]
    Construction {
        scene_id: Option<Uuid>,
        message: String,
    },

    /// A scene was rejected by triage and cannot move to drafting.
    #[error("Scene {scene_id} is not draftable (verdict {verdict})")]
    NotDraftable { scene_id: Uuid, verdict: Verdict },

    /// Configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scene store error.
    #[error("Scene store error: {message}")]
    StoreError { message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Resource not found.
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    /// A live resource already holds this ID.
    #[error("Resource already exists: {resource_type} with id {id}")]
    AlreadyExists { resource_type: String, id: String },

    /// Connection error.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Internal error (should not happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SceneError {
    /// Shorthand for a construction error.
    pub fn construction(scene_id: Option<Uuid>, message: impl Into<String>) -> Self {
        SceneError::Construction {
            scene_id,
            message: message.into(),
        }
    }

    /// Returns true if the caller must fix the input shape.
    pub fn is_construction(&self) -> bool {
        matches!(self, SceneError::Construction { .. })
    }

    /// Returns the scene ID if available.
    pub fn scene_id(&self) -> Option<Uuid> {
        match self {
            SceneError::Construction { scene_id, .. } => *scene_id,
            SceneError::NotDraftable { scene_id, .. } => Some(*scene_id),
            _ => None,
        }
    }
}

/// Convenience Result type for scene engine operations.
pub type Result<T> = std::result::Result<T, SceneError>;

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::SerializationError(err.to_string())
    }
}
