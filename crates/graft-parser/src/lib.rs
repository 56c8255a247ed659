//! Design graph parser for graft.
//!
//! Walks a design file's node tree and discovers components and their variants:
//! - Pages, frames, sections and groups are transparent containers
//! - A COMPONENT becomes one component with no variants
//! - A COMPONENT_SET becomes one component whose direct COMPONENT children are its
//!   variants
//!
//! Each component is classified into a library category by an ordered keyword table
//! that can be loaded from JSON (see [`ClassificationRules`]).

mod parser;
mod rules;

pub use parser::{parse, parse_file_json, GraphParser, ParseOutcome, DEFAULT_MAX_TRAVERSAL_DEPTH};
pub use rules::{CategoryRule, ClassificationRules, IconRule};

use thiserror::Error;

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that abort a parse. Malformed nodes never do; they are reported in
/// [`ParseOutcome::skipped`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file or rule table is not valid JSON of the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule table that cannot classify anything.
    #[error("invalid classification rules: {0}")]
    InvalidRules(String),
}
