//! Template engine for file skeletons.

use crate::error::{CodegenError, Result};
use convert_case::{Case, Casing};
use handlebars::Handlebars;
use serde::Serialize;

/// Template engine using Handlebars.
///
/// Output is source code, not HTML: escaping is disabled and every value is escaped
/// by the emitter for its own target before it reaches a template.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl Default for TemplateEngine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Whether a template is registered under `name`.
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.has_template(name) {
            return Err(CodegenError::TemplateNotFound(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Kebab case helper
        handlebars.register_helper(
            "kebab_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&param.to_case(Case::Kebab))?;
                    Ok(())
                },
            ),
        );

        // Indent every non-blank line of a block
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(2) as usize;

                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );

        // Join helper
        handlebars.register_helper(
            "join",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let arr = h.param(0).and_then(|v| v.value().as_array());
                    let sep = h
                        .param(1)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or(", ");

                    if let Some(items) = arr {
                        let joined = items
                            .iter()
                            .filter_map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(sep);
                        out.write(&joined)?;
                    }
                    Ok(())
                },
            ),
        );
    }
}

/// Prefix every non-blank line with `spaces` spaces.
pub fn indent(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
