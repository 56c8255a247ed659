//! Depth-capped body renderer shared by every emitter and the preview.

use convert_case::{Case, Casing};
use graft_core::{ChildElement, ComponentProperties, NodeType};
use graft_style::{element_css, text_css, CssProperties};
use tracing::warn;

use crate::naming::{escape_attr, escape_text, js_string};

/// How a target spells markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    /// JSX: `style={{ camelCase: 'value' }}`, `{/* */}` comments.
    Jsx,
    /// HTML-like templates (Vue, Angular, preview): `style="k: v"`, `<!-- -->` comments.
    Html,
}

impl Dialect {
    /// ` style=...` attribute, or nothing for an empty bag.
    pub(crate) fn style_attr(&self, css: &CssProperties) -> String {
        if css.is_empty() {
            return String::new();
        }
        match self {
            Self::Jsx => format!(" style={{{{ {} }}}}", jsx_style_entries(css).join(", ")),
            Self::Html => format!(" style=\"{}\"", escape_attr(&css.to_inline())),
        }
    }

    fn comment(&self, text: &str) -> String {
        match self {
            Self::Jsx => format!("{{/* {} */}}", text),
            Self::Html => format!("<!-- {} -->", text),
        }
    }
}

/// `key: 'value'` entries of a React style object.
pub(crate) fn jsx_style_entries(css: &CssProperties) -> Vec<String> {
    css.iter()
        .map(|(property, value)| format!("{}: {}", property.to_case(Case::Camel), js_string(value)))
        .collect()
}

/// Rendered body lines plus the number of subtrees cut at the depth cap.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Markup {
    pub lines: Vec<String>,
    pub truncated: usize,
}

impl Markup {
    pub(crate) fn text(&self) -> String {
        self.lines.join("\n")
    }
}

pub(crate) struct MarkupRenderer<'a> {
    pub dialect: Dialect,
    /// Emitted when the component has neither children nor text.
    pub placeholder: &'a str,
    pub max_depth: usize,
}

enum Step<'e> {
    Open(&'e ChildElement, usize),
    Close(usize),
}

impl MarkupRenderer<'_> {
    /// Render the body of a component, each line indented by `indent` spaces.
    ///
    /// Child elements win, even when all of them are hidden; without them each text
    /// record renders on its own with font styling only; without either the
    /// placeholder is emitted.
    pub(crate) fn render(&self, props: &ComponentProperties, indent: usize) -> Markup {
        if !props.child_elements.is_empty() {
            return self.render_children(&props.child_elements, indent);
        }

        let pad = " ".repeat(indent);
        let lines = if props.text_contents.is_empty() {
            if self.placeholder.is_empty() {
                Vec::new()
            } else {
                vec![format!("{}{}", pad, self.placeholder)]
            }
        } else {
            props
                .text_contents
                .iter()
                .map(|text| {
                    let css = text.style.as_ref().map(text_css).unwrap_or_default();
                    format!(
                        "{}<span{}>{}</span>",
                        pad,
                        self.dialect.style_attr(&css),
                        escape_text(&text.characters)
                    )
                })
                .collect()
        };
        Markup {
            lines,
            truncated: 0,
        }
    }

    fn render_children(&self, children: &[ChildElement], indent: usize) -> Markup {
        let mut lines = Vec::new();
        let mut truncated = 0;
        let mut stack: Vec<Step<'_>> = children.iter().rev().map(|c| Step::Open(c, 1)).collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Close(pad) => lines.push(format!("{}</div>", " ".repeat(pad))),
                Step::Open(element, depth) => {
                    if !element.visible {
                        continue;
                    }
                    let pad = indent + (depth - 1) * 2;
                    let spaces = " ".repeat(pad);
                    if depth > self.max_depth {
                        truncated += 1;
                        lines.push(format!(
                            "{}{}",
                            spaces,
                            self.dialect.comment("nested content truncated")
                        ));
                        continue;
                    }

                    let style = self.dialect.style_attr(&element_css(element));
                    if element.node_type == NodeType::Text {
                        let text = element.text.as_deref().unwrap_or_default();
                        lines.push(format!("{}<span{}>{}</span>", spaces, style, escape_text(text)));
                    } else if element.children.iter().any(|c| c.visible) {
                        lines.push(format!("{}<div{}>", spaces, style));
                        stack.push(Step::Close(pad));
                        stack.extend(element.children.iter().rev().map(|c| Step::Open(c, depth + 1)));
                    } else {
                        lines.push(format!("{}<div{}></div>", spaces, style));
                    }
                }
            }
        }

        if truncated > 0 {
            warn!(dropped = truncated, max_depth = self.max_depth, "generated markup truncated at depth cap");
        }
        Markup { lines, truncated }
    }
}
