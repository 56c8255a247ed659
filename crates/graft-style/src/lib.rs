//! Style normalisation for graft.
//!
//! Two pure steps, defined once and shared by every consumer (code emitters and the
//! preview renderer alike):
//! - [`extract`]: raw design node to the sparse [`ComponentProperties`] bag
//! - [`css`]: canonical properties to an ordered CSS declaration bag
//!
//! [`ComponentProperties`]: graft_core::ComponentProperties

pub mod css;
mod extract;

pub use css::{component_css, element_css, style_css, text_css, CssProperties};
pub use extract::{
    extract, extract_with, visual_style, ExtractOptions, Extracted, DEFAULT_MAX_DEPTH,
};
