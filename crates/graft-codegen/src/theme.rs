//! Design tokens to a CSS custom-property sheet and a typed TS theme object.

use std::sync::OnceLock;

use graft_core::{Token, TokenType};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::naming::js_string;

/// Theme output for a token set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedTheme {
    /// `:root { --name: value; }` sheet.
    pub css: String,
    /// `export const theme = { ... } as const;` module.
    pub typescript: String,
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("css variable regex"))
}

/// CSS custom property name for a token, e.g. `color/primary-500` -> `--color-primary-500`.
pub fn css_variable_name(token_name: &str) -> Option<String> {
    let lower = token_name.to_lowercase();
    let slug = separators().replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        None
    } else {
        Some(format!("--{}", slug))
    }
}

fn css_value(token: &Token) -> String {
    let value = token
        .value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string();
    match token.token_type {
        // Bare numbers become lengths so `var(--spacing-md)` works as one.
        TokenType::Spacing | TokenType::BorderRadius if value.parse::<f64>().is_ok_and(f64::is_finite) => {
            format!("{}px", value)
        }
        _ => value,
    }
}

/// Emit the theme for a set of tokens, in input order.
///
/// Tokens whose names collapse to the same CSS variable keep the first occurrence.
pub fn generate_theme(tokens: &[Token]) -> GeneratedTheme {
    let mut variables: IndexMap<String, &Token> = IndexMap::new();
    for token in tokens {
        let Some(name) = css_variable_name(&token.name) else {
            debug!(token = token.name.as_str(), "token name has no usable characters");
            continue;
        };
        if variables.contains_key(&name) {
            debug!(token = token.name.as_str(), variable = name.as_str(), "duplicate css variable");
            continue;
        }
        variables.insert(name, token);
    }

    let mut css = vec![":root {".to_string()];
    for (name, token) in &variables {
        css.push(format!("  {}: {};", name, css_value(token)));
    }
    css.push("}".to_string());

    let mut groups: IndexMap<&str, Vec<&Token>> = IndexMap::new();
    for token in variables.values() {
        groups.entry(token.category.as_str()).or_default().push(token);
    }

    let mut ts = vec!["export const theme = {".to_string()];
    for (category, tokens) in &groups {
        ts.push(format!("  {}: {{", js_string(category)));
        for token in tokens {
            ts.push(format!("    {}: {},", js_string(&token.name), js_string(&token.value)));
        }
        ts.push("  },".to_string());
    }
    ts.push("} as const;".to_string());
    ts.push(String::new());
    ts.push("export type Theme = typeof theme;".to_string());

    GeneratedTheme {
        css: css.join("\n") + "\n",
        typescript: ts.join("\n") + "\n",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::TokenType;

    fn tokens() -> Vec<Token> {
        let mut primary = Token::new("p1", "color/primary-500", "#3b82f6", TokenType::Color);
        primary.category = "brand-colors".to_string();
        vec![
            primary,
            Token::new("p1", "Spacing/MD", "16", TokenType::Spacing),
            Token::new("p1", "spacing md", "99", TokenType::Spacing),
        ]
    }

    #[test]
    fn test_css_variable_name() {
        assert_eq!(css_variable_name("color/primary-500").as_deref(), Some("--color-primary-500"));
        assert_eq!(css_variable_name("  Font Family / Body ").as_deref(), Some("--font-family-body"));
        assert_eq!(css_variable_name("///"), None);
    }

    #[test]
    fn test_css_sheet() {
        let theme = generate_theme(&tokens());
        assert_eq!(
            theme.css,
            ":root {\n  --color-primary-500: #3b82f6;\n  --spacing-md: 16px;\n}\n"
        );
    }

    #[test]
    fn test_typescript_groups_by_category() {
        let theme = generate_theme(&tokens());
        assert_eq!(
            theme.typescript,
            "export const theme = {\n  'brand-colors': {\n    'color/primary-500': '#3b82f6',\n  },\n  'spacing': {\n    'Spacing/MD': '16',\n  },\n} as const;\n\nexport type Theme = typeof theme;\n"
        );
    }

    #[test]
    fn test_values_cannot_escape_the_declaration() {
        let token = Token::new("p1", "evil", "red; } body { display: none", TokenType::Other);
        let theme = generate_theme(&[token]);
        assert!(theme.css.contains("  --evil: red  body  display: none;"));
    }

    #[test]
    fn test_length_tokens_get_px() {
        let tokens = [
            Token::new("p1", "radius/sm", "4", TokenType::BorderRadius),
            Token::new("p1", "spacing/lg", "1.5rem", TokenType::Spacing),
            Token::new("p1", "opacity/muted", "0.5", TokenType::Opacity),
            Token::new("p1", "z-index/modal", "100", TokenType::ZIndex),
        ];
        let theme = generate_theme(&tokens);
        assert!(theme.css.contains("  --radius-sm: 4px;"));
        assert!(theme.css.contains("  --spacing-lg: 1.5rem;"));
        assert!(theme.css.contains("  --opacity-muted: 0.5;"));
        assert!(theme.css.contains("  --z-index-modal: 100;"));
        assert!(theme.typescript.contains("'radius/sm': '4',"));
    }

    #[test]
    fn test_empty_token_set() {
        let theme = generate_theme(&[]);
        assert_eq!(theme.css, ":root {\n}\n");
    }
}
