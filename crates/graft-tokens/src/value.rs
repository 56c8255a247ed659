//! Remote variable value to canonical token string.

use std::collections::HashSet;

use graft_core::{Color, RemoteVariable, RemoteVariableSet, VariableConversionError};
use serde_json::{Map, Number, Value};

use crate::Result;

/// Longest alias chain followed before giving up.
pub const MAX_ALIAS_DEPTH: usize = 16;

/// The raw value of a variable in its collection's default mode.
///
/// Falls back to the first mode in payload order when the collection is unknown or
/// has no value for its default mode.
pub fn default_mode_value<'a>(set: &RemoteVariableSet, variable: &'a RemoteVariable) -> Option<&'a Value> {
    set.variable_collections
        .get(&variable.variable_collection_id)
        .and_then(|collection| variable.values_by_mode.get(&collection.default_mode_id))
        .or_else(|| variable.values_by_mode.values().next())
}

/// Canonical string value of a variable, following alias chains through `set`.
pub fn resolve_value(set: &RemoteVariableSet, variable: &RemoteVariable) -> Result<String> {
    let name = variable.name.as_str();
    let mut current = variable;
    let mut visited: HashSet<&str> = HashSet::new();

    for _ in 0..=MAX_ALIAS_DEPTH {
        let value = default_mode_value(set, current).ok_or_else(|| {
            VariableConversionError::MissingModeValue {
                name: current.name.clone(),
            }
        })?;

        let Some(alias_id) = alias_target(value) else {
            return canonicalize(name, value);
        };
        if !visited.insert(alias_id) {
            return Err(VariableConversionError::AliasCycle {
                name: name.to_string(),
            });
        }
        current = set
            .variables
            .get(alias_id)
            .ok_or_else(|| VariableConversionError::UnresolvedAlias {
                name: name.to_string(),
                alias_id: alias_id.to_string(),
            })?;
    }

    Err(VariableConversionError::AliasCycle {
        name: name.to_string(),
    })
}

/// Canonical string form of a single raw value.
///
/// Colour objects become `#rrggbb` (or `rgba(...)` when translucent), numbers print
/// in full precision without a trailing fraction when integral, other objects and arrays are kept as
/// compact JSON. Aliases are not followed here; see [`resolve_value`].
pub fn canonicalize(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Err(VariableConversionError::NullValue {
            name: name.to_string(),
        }),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(canonical_number(n)),
        Value::String(s) => Ok(s.clone()),
        Value::Object(map) => match color_from(map) {
            Some(color) => Ok(color.to_css()),
            None => serde_json::to_string(value).map_err(|err| {
                VariableConversionError::UnsupportedShape {
                    name: name.to_string(),
                    shape: err.to_string(),
                }
            }),
        },
        Value::Array(_) => serde_json::to_string(value).map_err(|err| {
            VariableConversionError::UnsupportedShape {
                name: name.to_string(),
                shape: err.to_string(),
            }
        }),
    }
}

/// Whether two canonical values denote the same thing.
///
/// Surrounding whitespace is ignored and hex colours compare case-insensitively.
pub fn values_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a.starts_with('#') && b.starts_with('#') {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Integers verbatim, floats in their shortest round-trip form without exponent.
fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() => format!("{}", f),
        _ => n.to_string(),
    }
}

fn alias_target(value: &Value) -> Option<&str> {
    let map = value.as_object()?;
    if map.get("type").and_then(Value::as_str) != Some("VARIABLE_ALIAS") {
        return None;
    }
    map.get("id").and_then(Value::as_str)
}

fn color_from(map: &Map<String, Value>) -> Option<Color> {
    let channel = |key: &str| map.get(key).and_then(Value::as_f64);
    let (r, g, b) = (channel("r")?, channel("g")?, channel("b")?);
    Some(Color::rgba(r, g, b, channel("a").unwrap_or(1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{ResolvedType, VariableCollection};
    use serde_json::json;

    fn set_with(variables: Vec<(&str, RemoteVariable)>) -> RemoteVariableSet {
        let mut set = RemoteVariableSet::new().with_collection("VC:1", VariableCollection::new("Brand", "m1"));
        for (id, variable) in variables {
            set = set.with_variable(id, variable);
        }
        set
    }

    fn var(name: &str, value: Value) -> RemoteVariable {
        RemoteVariable::new(name, ResolvedType::Color, "VC:1").with_value("m1", value)
    }

    #[test]
    fn test_canonicalize_scalars() {
        assert_eq!(canonicalize("x", &json!(16)).unwrap(), "16");
        assert_eq!(canonicalize("x", &json!(16.0)).unwrap(), "16");
        assert_eq!(canonicalize("x", &json!(0.5)).unwrap(), "0.5");
        assert_eq!(canonicalize("x", &json!("Inter")).unwrap(), "Inter");
        assert_eq!(canonicalize("x", &json!(true)).unwrap(), "true");
    }

    #[test]
    fn test_canonicalize_keeps_full_precision() {
        let a = canonicalize("x", &json!(0.12344)).unwrap();
        let b = canonicalize("x", &json!(0.12341)).unwrap();
        assert_eq!(a, "0.12344");
        assert_eq!(b, "0.12341");
        assert!(!values_equal(&a, &b));
        assert_eq!(canonicalize("x", &json!(0.07999999821186066)).unwrap(), "0.07999999821186066");
        assert_eq!(canonicalize("x", &json!(-0.0)).unwrap(), "0");
    }

    #[test]
    fn test_canonicalize_large_numbers() {
        assert_eq!(canonicalize("x", &json!(1e20)).unwrap(), "100000000000000000000");
        assert_eq!(canonicalize("x", &json!(u64::MAX)).unwrap(), "18446744073709551615");
        assert_eq!(canonicalize("x", &json!(i64::MIN)).unwrap(), i64::MIN.to_string());
    }

    #[test]
    fn test_canonicalize_colors() {
        let opaque = json!({"r": 0.231, "g": 0.51, "b": 0.965, "a": 1});
        assert_eq!(canonicalize("c", &opaque).unwrap(), "#3b82f6");
        let translucent = json!({"r": 0, "g": 0, "b": 0, "a": 0.5});
        assert_eq!(canonicalize("c", &translucent).unwrap(), "rgba(0,0,0,0.5)");
        let no_alpha = json!({"r": 1, "g": 1, "b": 1});
        assert_eq!(canonicalize("c", &no_alpha).unwrap(), "#ffffff");
    }

    #[test]
    fn test_canonicalize_other_shapes_as_json() {
        assert_eq!(canonicalize("x", &json!({"k": 1})).unwrap(), r#"{"k":1}"#);
        assert_eq!(canonicalize("x", &json!([1, 2])).unwrap(), "[1,2]");
    }

    #[test]
    fn test_null_is_an_error() {
        assert_eq!(
            canonicalize("x", &Value::Null),
            Err(VariableConversionError::NullValue { name: "x".to_string() })
        );
    }

    #[test]
    fn test_default_mode_wins_over_first() {
        let variable = RemoteVariable::new("space/md", ResolvedType::Float, "VC:1")
            .with_value("m0", json!(8))
            .with_value("m1", json!(16));
        let set = set_with(vec![]);
        assert_eq!(default_mode_value(&set, &variable), Some(&json!(16)));
    }

    #[test]
    fn test_unknown_collection_uses_first_mode() {
        let variable = RemoteVariable::new("space/md", ResolvedType::Float, "VC:missing")
            .with_value("a", json!(4))
            .with_value("b", json!(8));
        let set = set_with(vec![]);
        assert_eq!(resolve_value(&set, &variable).unwrap(), "4");
    }

    #[test]
    fn test_missing_mode_value() {
        let variable = RemoteVariable::new("space/md", ResolvedType::Float, "VC:1");
        let set = set_with(vec![]);
        assert!(matches!(
            resolve_value(&set, &variable),
            Err(VariableConversionError::MissingModeValue { .. })
        ));
    }

    #[test]
    fn test_alias_chain_resolves() {
        let base = var("color/blue-500", json!({"r": 0, "g": 0, "b": 1, "a": 1}));
        let mid = var("color/primary", json!({"type": "VARIABLE_ALIAS", "id": "V:base"}));
        let top = var("color/button", json!({"type": "VARIABLE_ALIAS", "id": "V:mid"}));
        let set = set_with(vec![("V:base", base), ("V:mid", mid), ("V:top", top.clone())]);
        assert_eq!(resolve_value(&set, &top).unwrap(), "#0000ff");
    }

    #[test]
    fn test_alias_cycle_is_an_error() {
        let a = var("a", json!({"type": "VARIABLE_ALIAS", "id": "V:b"}));
        let b = var("b", json!({"type": "VARIABLE_ALIAS", "id": "V:a"}));
        let set = set_with(vec![("V:a", a.clone()), ("V:b", b)]);
        assert_eq!(
            resolve_value(&set, &a),
            Err(VariableConversionError::AliasCycle { name: "a".to_string() })
        );
    }

    #[test]
    fn test_unresolved_alias() {
        let a = var("a", json!({"type": "VARIABLE_ALIAS", "id": "V:gone"}));
        let set = set_with(vec![("V:a", a.clone())]);
        assert!(matches!(
            resolve_value(&set, &a),
            Err(VariableConversionError::UnresolvedAlias { alias_id, .. }) if alias_id == "V:gone"
        ));
    }

    #[test]
    fn test_values_equal() {
        assert!(values_equal("#FF0000", "#ff0000"));
        assert!(values_equal(" 16 ", "16"));
        assert!(!values_equal("Inter", "inter"));
        assert!(!values_equal("#ff0000", "#ff0001"));
    }
}
