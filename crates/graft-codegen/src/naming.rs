//! Identifiers, literals and escaping shared by the emitters.

use std::sync::OnceLock;

use convert_case::{Case, Casing};
use regex::Regex;

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("separator regex"))
}

/// PascalCase type name for a design component name.
///
/// Separators of any kind split words; the result is always a valid identifier.
pub fn component_identifier(name: &str) -> String {
    let words = non_alphanumeric().replace_all(name, " ");
    let ident = words.trim().to_case(Case::Pascal);
    match ident.chars().next() {
        None => "Component".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{}", ident),
        Some(_) => ident,
    }
}

/// kebab-case form of an identifier, for selectors and class names.
pub fn kebab(ident: &str) -> String {
    ident.to_case(Case::Kebab)
}

/// JavaScript string literal. Single quotes unless the value contains one.
pub fn js_string(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Escape text content for JSX, Vue and Angular templates alike.
///
/// Braces are entity-encoded since all three targets treat them as interpolation.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '`' => out.push_str("&#96;"),
            '\\' => out.push_str("&#92;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_identifier() {
        assert_eq!(component_identifier("Primary Button"), "PrimaryButton");
        assert_eq!(component_identifier("button/primary-lg"), "ButtonPrimaryLg");
        assert_eq!(component_identifier("2 Column Card"), "Component2ColumnCard");
        assert_eq!(component_identifier("  ***  "), "Component");
    }

    #[test]
    fn test_kebab() {
        assert_eq!(kebab("PrimaryButton"), "primary-button");
    }

    #[test]
    fn test_js_string_quote_choice() {
        assert_eq!(js_string("flex"), "'flex'");
        assert_eq!(js_string("'Inter'"), "\"'Inter'\"");
        assert_eq!(js_string("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & {c}"), "a &lt; b &amp; &#123;c&#125;");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
    }
}
