//! phrase-tagger domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Hierarchy nodes and match tallies
//! - `normalize`: Accent/case/punctuation-insensitive string canonicalization
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Phrase classification, report rendering and hierarchy editing

pub mod model;
pub mod normalize;
pub mod ports;
pub mod usecases;

pub use model::*;
pub use normalize::{Normalizer, normalize};
pub use ports::*;
