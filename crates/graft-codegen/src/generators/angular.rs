//! Angular standalone component generator.

use graft_core::ComponentRecord;
use serde::Serialize;

use super::templates::TemplateEngine;
use super::{css_rule, CodeGenerator, ComponentView, GenerateOptions, GeneratedCode};
use crate::error::Result;
use crate::framework::Framework;
use crate::markup::{Dialect, MarkupRenderer};
use crate::naming::kebab;

const TEMPLATE_NAME: &str = "angular_component";

const TEMPLATE: &str = r#"import { Component, Input } from '@angular/core';

export type {{name}}Variant = {{join variants " | "}};

@Component({
  selector: 'app-{{kebab_case name}}',
  standalone: true,
  template: `
    <div class="root" [attr.data-variant]="variant">
{{body}}
    </div>
  `,
  styles: [`
{{indent styles 4}}
  `],
})
export class {{name}}Component {
  @Input() variant: {{name}}Variant = {{default_variant}};
}
"#;

#[derive(Serialize)]
struct AngularData<'a> {
    name: &'a str,
    variants: &'a [String],
    default_variant: &'a str,
    body: String,
    styles: String,
}

/// Angular code generator.
pub struct AngularGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> AngularGenerator<'a> {
    /// Create a new Angular generator.
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        engine.register_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { engine })
    }
}

/// Make text safe inside a TS template literal.
fn template_literal_safe(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

impl CodeGenerator for AngularGenerator<'_> {
    fn framework(&self) -> Framework {
        Framework::Angular
    }

    fn generate_component(
        &self,
        component: &ComponentRecord,
        options: &GenerateOptions,
    ) -> Result<GeneratedCode> {
        let view = ComponentView::new(component);
        let body = MarkupRenderer {
            dialect: Dialect::Html,
            placeholder: "<ng-content></ng-content>",
            max_depth: options.max_depth,
        }
        .render(view.properties, 6);

        let code = self.engine.render(
            TEMPLATE_NAME,
            &AngularData {
                name: &view.ident,
                variants: &view.variants,
                default_variant: &view.default_variant,
                body: template_literal_safe(&body.text()),
                styles: template_literal_safe(&css_rule(".root", &view.root_css)),
            },
        )?;

        Ok(GeneratedCode {
            framework: Framework::Angular,
            language: Framework::Angular.language(),
            file_name: format!("{}.component.ts", kebab(&view.ident)),
            code,
        })
    }
}
