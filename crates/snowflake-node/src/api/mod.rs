//! REST API handlers.

pub mod chain;
pub mod error;
pub mod health;
pub mod scene;

pub use error::ApiError;
