//! phrase-tagger adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `hierarchy`: JSON-file and in-memory hierarchy stores

mod hierarchy_fs;
mod hierarchy_memory;

/// Re-exports for hierarchy adapters
pub mod hierarchy {
    pub use crate::hierarchy_fs::FsHierarchyStore as FilesystemHierarchyStore;
    pub use crate::hierarchy_memory::InMemoryHierarchyStore;
}
