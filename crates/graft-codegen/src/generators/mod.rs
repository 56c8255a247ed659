//! Code generators for the supported UI frameworks.

#[cfg(feature = "angular")]
mod angular;
#[cfg(feature = "react")]
mod react;
#[cfg(feature = "vue")]
mod vue;

mod templates;

#[cfg(feature = "angular")]
pub use angular::AngularGenerator;
#[cfg(feature = "react")]
pub use react::ReactGenerator;
#[cfg(feature = "vue")]
pub use vue::VueGenerator;

pub use templates::{indent, TemplateEngine};

use graft_core::{ComponentProperties, ComponentRecord, UnsupportedFrameworkError};
use graft_style::{component_css, CssProperties, DEFAULT_MAX_DEPTH};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::framework::Framework;
use crate::naming::{component_identifier, js_string};

/// Common trait for code generators.
///
/// Generation is a pure function of the component and the options: the same input
/// always yields byte-identical output.
pub trait CodeGenerator: Send + Sync {
    /// Target framework.
    fn framework(&self) -> Framework;

    /// Generate the source file of one component.
    fn generate_component(
        &self,
        component: &ComponentRecord,
        options: &GenerateOptions,
    ) -> Result<GeneratedCode>;
}

/// Options for code generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Child elements nested deeper than this are replaced by a comment.
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub framework: Framework,
    /// Language tag: `tsx`, `vue` or `typescript`.
    pub language: &'static str,
    pub file_name: String,
    pub code: String,
}

/// Build the generator for a framework.
pub fn generator_for(framework: Framework) -> Result<Box<dyn CodeGenerator>> {
    match framework {
        #[cfg(feature = "react")]
        Framework::React => Ok(Box::new(ReactGenerator::new()?)),
        #[cfg(feature = "vue")]
        Framework::Vue => Ok(Box::new(VueGenerator::new()?)),
        #[cfg(feature = "angular")]
        Framework::Angular => Ok(Box::new(AngularGenerator::new()?)),
        #[allow(unreachable_patterns)]
        other => Err(UnsupportedFrameworkError(other.to_string()).into()),
    }
}

/// Generate one component with default options.
pub fn generate(component: &ComponentRecord, framework: Framework) -> Result<GeneratedCode> {
    generate_with(component, framework, &GenerateOptions::default())
}

/// Generate one component.
pub fn generate_with(
    component: &ComponentRecord,
    framework: Framework,
    options: &GenerateOptions,
) -> Result<GeneratedCode> {
    generator_for(framework)?.generate_component(component, options)
}

/// Generate many components in parallel. Results keep the input order.
pub fn generate_batch(
    components: &[ComponentRecord],
    framework: Framework,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedCode>> {
    let generator = generator_for(framework)?;
    debug!(framework = %framework, count = components.len(), "generating batch");
    components
        .par_iter()
        .map(|component| generator.generate_component(component, options))
        .collect()
}

/// Framework-neutral facts about a component, computed once per generation.
pub(crate) struct ComponentView<'c> {
    /// PascalCase identifier.
    pub ident: String,
    /// Variant names as JS string literals, first occurrence order.
    pub variants: Vec<String>,
    pub default_variant: String,
    pub root_css: CssProperties,
    pub properties: &'c ComponentProperties,
}

impl<'c> ComponentView<'c> {
    pub(crate) fn new(component: &'c ComponentRecord) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for variant in &component.variants {
            if !names.contains(&variant.name.as_str()) {
                names.push(&variant.name);
            }
        }
        if names.is_empty() {
            names.push("default");
        }
        let variants: Vec<String> = names.iter().map(|n| js_string(n)).collect();

        Self {
            ident: component_identifier(&component.name),
            default_variant: variants[0].clone(),
            variants,
            root_css: component_css(&component.properties),
            properties: &component.properties,
        }
    }
}

/// A CSS rule block.
pub(crate) fn css_rule(selector: &str, css: &CssProperties) -> String {
    if css.is_empty() {
        return format!("{} {{}}", selector);
    }
    let mut lines = vec![format!("{} {{", selector)];
    for (property, value) in css.iter() {
        lines.push(format!("  {}: {};", property, value));
    }
    lines.push("}".to_string());
    lines.join("\n")
}
