//! Component source generation from canonical design properties.
//!
//! Every target consumes the same [`ComponentRecord`](graft_core::ComponentRecord)
//! and the same CSS translation from `graft-style`; emitters only differ in syntax.
//!
//! # Features
//!
//! - `react` - React function components (TSX)
//! - `vue` - Vue single-file components
//! - `angular` - Angular standalone components
//!
//! # Example
//!
//! ```ignore
//! use graft_codegen::{generate, Framework};
//!
//! let framework: Framework = "react".parse()?;
//! let file = generate(&component, framework)?;
//! println!("{}", file.code);
//! ```

pub mod error;
pub mod framework;
pub mod generators;
mod markup;
mod naming;
pub mod preview;
pub mod theme;

pub use error::{CodegenError, Result};
pub use framework::Framework;
pub use generators::{
    generate, generate_batch, generate_with, generator_for, CodeGenerator, GenerateOptions,
    GeneratedCode, TemplateEngine,
};
pub use naming::component_identifier;
pub use preview::{render_preview, render_preview_with};
pub use theme::{css_variable_name, generate_theme, GeneratedTheme};

// Re-export framework-specific generators
#[cfg(feature = "react")]
pub use generators::ReactGenerator;

#[cfg(feature = "vue")]
pub use generators::VueGenerator;

#[cfg(feature = "angular")]
pub use generators::AngularGenerator;
