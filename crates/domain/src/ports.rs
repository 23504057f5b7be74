//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Hierarchy, LoadedHierarchy};

/// Error type for hierarchy store operations
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },
    #[error("Hierarchy not found: {0}")]
    NotFound(String),
    #[error("Store lock poisoned: {0}")]
    Lock(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for loading and saving the category hierarchy
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    /// Load a fresh snapshot of the hierarchy
    async fn load(&self) -> Result<LoadedHierarchy, HierarchyError>;

    /// Replace the stored hierarchy
    async fn save(&self, hierarchy: &Hierarchy) -> Result<(), HierarchyError>;

    /// Load the hierarchy, substituting an empty one when it cannot be read
    async fn load_or_empty(&self) -> Hierarchy {
        match self.load().await {
            Ok(loaded) => loaded.hierarchy,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load hierarchy, using an empty one");
                Hierarchy::empty()
            }
        }
    }
}
