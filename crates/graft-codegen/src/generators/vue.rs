//! Vue single-file component generator (`<script setup lang="ts">`).

use graft_core::ComponentRecord;
use serde::Serialize;

use super::templates::TemplateEngine;
use super::{css_rule, CodeGenerator, ComponentView, GenerateOptions, GeneratedCode};
use crate::error::Result;
use crate::framework::Framework;
use crate::markup::{Dialect, MarkupRenderer};
use crate::naming::kebab;

const TEMPLATE_NAME: &str = "vue_component";

const TEMPLATE: &str = r#"<template>
  <div class="{{class_name}}" :data-variant="variant">
{{body}}
  </div>
</template>

<script setup lang="ts">
type {{name}}Variant = {{join variants " | "}};

withDefaults(defineProps<{ variant?: {{name}}Variant }>(), {
  variant: {{default_variant}},
});
</script>

<style scoped>
{{styles}}
</style>
"#;

#[derive(Serialize)]
struct VueData<'a> {
    name: &'a str,
    class_name: String,
    variants: &'a [String],
    default_variant: &'a str,
    body: String,
    styles: String,
}

/// Vue code generator.
pub struct VueGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> VueGenerator<'a> {
    /// Create a new Vue generator.
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        engine.register_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { engine })
    }
}

impl CodeGenerator for VueGenerator<'_> {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn generate_component(
        &self,
        component: &ComponentRecord,
        options: &GenerateOptions,
    ) -> Result<GeneratedCode> {
        let view = ComponentView::new(component);
        let class_name = kebab(&view.ident);
        let body = MarkupRenderer {
            dialect: Dialect::Html,
            placeholder: "<slot />",
            max_depth: options.max_depth,
        }
        .render(view.properties, 4);

        let code = self.engine.render(
            TEMPLATE_NAME,
            &VueData {
                name: &view.ident,
                styles: css_rule(&format!(".{}", class_name), &view.root_css),
                class_name,
                variants: &view.variants,
                default_variant: &view.default_variant,
                body: body.text(),
            },
        )?;

        Ok(GeneratedCode {
            framework: Framework::Vue,
            language: Framework::Vue.language(),
            file_name: format!("{}.vue", view.ident),
            code,
        })
    }
}
