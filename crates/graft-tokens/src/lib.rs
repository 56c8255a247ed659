//! Design variable import and divergence detection.
//!
//! This crate handles:
//! - Value canonicalisation (remote variable value -> token string)
//! - Token type inference from the declared type and the variable name
//! - Upserting remote variables into a project's token store
//! - Diffing a remote variable set against stored tokens
//!
//! Import and divergence detection share one value conversion path, so a token that
//! was just imported never shows up as modified.

mod diff;
mod import;
mod infer;
mod value;

use graft_core::VariableConversionError;

/// Result type for value conversion.
pub type Result<T> = std::result::Result<T, VariableConversionError>;

pub use diff::{detect_divergences, DivergenceCounts};
pub use import::import_variables;
pub use infer::{infer_token_type, NamePredicate, TypeRule, TYPE_RULES};
pub use value::{canonicalize, default_mode_value, resolve_value, values_equal, MAX_ALIAS_DEPTH};
