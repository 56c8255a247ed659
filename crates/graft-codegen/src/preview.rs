//! Standalone HTML preview of a component.

use graft_core::ComponentRecord;

use crate::generators::GenerateOptions;
use crate::markup::{Dialect, MarkupRenderer};
use crate::naming::escape_attr;

/// Render an HTML fragment with default options.
pub fn render_preview(component: &ComponentRecord) -> String {
    render_preview_with(component, &GenerateOptions::default())
}

/// Render an HTML fragment using the same CSS translation as the emitters.
pub fn render_preview_with(component: &ComponentRecord, options: &GenerateOptions) -> String {
    let dialect = Dialect::Html;
    let root_css = graft_style::component_css(&component.properties);
    let body = MarkupRenderer {
        dialect,
        placeholder: "",
        max_depth: options.max_depth,
    }
    .render(&component.properties, 2);

    let open = format!(
        "<div class=\"graft-preview\" data-component=\"{}\" data-node-id=\"{}\"{}>",
        escape_attr(&component.name),
        escape_attr(&component.node_id),
        dialect.style_attr(&root_css)
    );
    if body.lines.is_empty() {
        return format!("{}</div>\n", open);
    }
    format!("{}\n{}\n</div>\n", open, body.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{ChildElement, Color, ComponentProperties, CornerRadii, NodeType, Paint};

    #[test]
    fn test_empty_preview() {
        let html = render_preview(&ComponentRecord::new("Card", "1:1"));
        assert_eq!(
            html,
            "<div class=\"graft-preview\" data-component=\"Card\" data-node-id=\"1:1\"></div>\n"
        );
    }

    #[test]
    fn test_preview_matches_emitter_css() {
        let mut props = ComponentProperties::new();
        props.style.corner_radii = Some(CornerRadii::new(4.0, 4.0, 0.0, 0.0));
        props.style.fills.push(Paint::solid(Color::rgb(1.0, 1.0, 1.0)));
        props.child_elements = vec![ChildElement::new(NodeType::Text, "2").with_text("Hi")];
        let component = ComponentRecord::new("Tab \"A\"", "1:1").with_properties(props);

        let html = render_preview(&component);
        assert_eq!(
            html,
            "<div class=\"graft-preview\" data-component=\"Tab &quot;A&quot;\" data-node-id=\"1:1\" \
             style=\"background-color: #ffffff; border-radius: 4px 4px 0px 0px\">\n  <span>Hi</span>\n</div>\n"
        );
    }
}
