//! # Snowflake SDK
//!
//! Client SDK for interacting with Snowflake scene nodes.

pub mod client;

pub use client::{
    ChainReport, DraftedScene, LinkReport, PlannedScene, SceneClient, SceneSummary, SceneView,
};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::client::SceneClient;
    pub use snowflake_core::prelude::*;
}
