//! Core types for the graft design-sync pipeline.
//!
//! This crate provides the foundational types used across all other graft crates:
//! - Raw design-tool node tree types (as delivered by the remote file API)
//! - The canonical component model (parsed components, variants, style bag)
//! - Design token and remote variable types
//! - Error types
//! - Persistence collaborator traits with in-memory implementations

pub mod errors;
pub mod model;
pub mod node;
pub mod store;
pub mod tokens;
pub mod types;

pub use errors::*;
pub use model::*;
pub use node::*;
pub use store::*;
pub use tokens::*;
pub use types::*;
