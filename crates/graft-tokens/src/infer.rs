//! Token type inference.

use graft_core::{ResolvedType, TokenType};

/// Condition on the lower-cased variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePredicate {
    Any,
    ContainsAny(&'static [&'static str]),
}

impl NamePredicate {
    fn matches(&self, name_lower: &str) -> bool {
        match self {
            Self::Any => true,
            Self::ContainsAny(needles) => needles.iter().any(|n| name_lower.contains(n)),
        }
    }
}

/// One inference rule: declared type plus name condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRule {
    pub resolved: ResolvedType,
    pub name: NamePredicate,
    pub token_type: TokenType,
}

/// Inference rules, tested in order. Anything unmatched is [`TokenType::Other`].
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        resolved: ResolvedType::Color,
        name: NamePredicate::Any,
        token_type: TokenType::Color,
    },
    TypeRule {
        resolved: ResolvedType::Float,
        name: NamePredicate::ContainsAny(&["spacing"]),
        token_type: TokenType::Spacing,
    },
    TypeRule {
        resolved: ResolvedType::Float,
        name: NamePredicate::ContainsAny(&["radius"]),
        token_type: TokenType::BorderRadius,
    },
    TypeRule {
        resolved: ResolvedType::Float,
        name: NamePredicate::ContainsAny(&["opacity"]),
        token_type: TokenType::Opacity,
    },
    TypeRule {
        resolved: ResolvedType::Float,
        name: NamePredicate::ContainsAny(&["z-index", "zindex"]),
        token_type: TokenType::ZIndex,
    },
    TypeRule {
        resolved: ResolvedType::String,
        name: NamePredicate::ContainsAny(&["font"]),
        token_type: TokenType::Typography,
    },
];

/// Infer the token type of a remote variable.
pub fn infer_token_type(resolved: ResolvedType, name: &str) -> TokenType {
    let name_lower = name.to_lowercase();
    TYPE_RULES
        .iter()
        .find(|rule| rule.resolved == resolved && rule.name.matches(&name_lower))
        .map(|rule| rule.token_type)
        .unwrap_or(TokenType::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always_color() {
        assert_eq!(infer_token_type(ResolvedType::Color, "brand/anything"), TokenType::Color);
    }

    #[test]
    fn test_float_by_name() {
        assert_eq!(infer_token_type(ResolvedType::Float, "Spacing/md"), TokenType::Spacing);
        assert_eq!(infer_token_type(ResolvedType::Float, "radius/lg"), TokenType::BorderRadius);
        assert_eq!(infer_token_type(ResolvedType::Float, "opacity/disabled"), TokenType::Opacity);
        assert_eq!(infer_token_type(ResolvedType::Float, "zIndex/modal"), TokenType::ZIndex);
        assert_eq!(infer_token_type(ResolvedType::Float, "z-index/toast"), TokenType::ZIndex);
        assert_eq!(infer_token_type(ResolvedType::Float, "size/icon"), TokenType::Other);
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(
            infer_token_type(ResolvedType::Float, "spacing/radius-gap"),
            TokenType::Spacing
        );
    }

    #[test]
    fn test_string_and_boolean() {
        assert_eq!(infer_token_type(ResolvedType::String, "font/family"), TokenType::Typography);
        assert_eq!(infer_token_type(ResolvedType::String, "copy/cta"), TokenType::Other);
        assert_eq!(infer_token_type(ResolvedType::Boolean, "font/enabled"), TokenType::Other);
        assert_eq!(infer_token_type(ResolvedType::Float, "font/size"), TokenType::Other);
    }
}
