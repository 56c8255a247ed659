//! React function component generator (TypeScript).

use graft_core::ComponentRecord;
use serde::Serialize;

use super::templates::TemplateEngine;
use super::{CodeGenerator, ComponentView, GenerateOptions, GeneratedCode};
use crate::error::Result;
use crate::framework::Framework;
use crate::markup::{jsx_style_entries, Dialect, MarkupRenderer};

const TEMPLATE_NAME: &str = "react_component";

const TEMPLATE: &str = r#"import React from 'react';

export type {{name}}Variant = {{join variants " | "}};

export interface {{name}}Props {
  variant?: {{name}}Variant;
  children?: React.ReactNode;
}

const rootStyle: React.CSSProperties = {{root_style}};

export function {{name}}({ variant = {{default_variant}}, children }: {{name}}Props) {
  return (
    <div style={rootStyle} data-variant={variant}>
{{body}}
    </div>
  );
}

export default {{name}};
"#;

#[derive(Serialize)]
struct ReactData<'a> {
    name: &'a str,
    variants: &'a [String],
    default_variant: &'a str,
    root_style: String,
    body: String,
}

/// React code generator.
pub struct ReactGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> ReactGenerator<'a> {
    /// Create a new React generator.
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        engine.register_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { engine })
    }

    /// Root style as a multi-line object literal.
    fn style_object(view: &ComponentView<'_>) -> String {
        let entries = jsx_style_entries(&view.root_css);
        if entries.is_empty() {
            return "{}".to_string();
        }
        let mut lines = vec!["{".to_string()];
        lines.extend(entries.into_iter().map(|entry| format!("  {},", entry)));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

impl CodeGenerator for ReactGenerator<'_> {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn generate_component(
        &self,
        component: &ComponentRecord,
        options: &GenerateOptions,
    ) -> Result<GeneratedCode> {
        let view = ComponentView::new(component);
        let body = MarkupRenderer {
            dialect: Dialect::Jsx,
            placeholder: "{children}",
            max_depth: options.max_depth,
        }
        .render(view.properties, 6);

        let code = self.engine.render(
            TEMPLATE_NAME,
            &ReactData {
                name: &view.ident,
                variants: &view.variants,
                default_variant: &view.default_variant,
                root_style: Self::style_object(&view),
                body: body.text(),
            },
        )?;

        Ok(GeneratedCode {
            framework: Framework::React,
            language: Framework::React.language(),
            file_name: format!("{}.tsx", view.ident),
            code,
        })
    }
}
