//! Canonical properties to CSS declarations.
//!
//! This is the one place visual rules live. Emitters for every framework and the
//! preview renderer consume [`CssProperties`] and only differ in how they spell a
//! declaration, which keeps their output visually equivalent.

use graft_core::{
    format_number, ChildElement, ComponentProperties, Effect, EffectType, LayoutMode, NodeType,
    Paint, PaintType, TypeStyle, VisualStyle,
};
use indexmap::IndexMap;
use serde::Serialize;

/// Ordered CSS declarations keyed by kebab-case property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CssProperties(IndexMap<String, String>);

impl CssProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, keeping the position of an existing key.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate declarations in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append declarations from another bag.
    pub fn extend(&mut self, other: CssProperties) {
        self.0.extend(other.0);
    }

    /// `prop: value; prop: value` form for a `style` attribute.
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Declarations for a component root.
pub fn component_css(props: &ComponentProperties) -> CssProperties {
    style_css(&props.style)
}

/// Declarations for a child element. TEXT fills colour the glyphs, not the box.
pub fn element_css(element: &ChildElement) -> CssProperties {
    if element.node_type != NodeType::Text {
        return style_css(&element.style);
    }

    let mut css = element
        .typography
        .as_ref()
        .map(text_css)
        .unwrap_or_default();
    if let Some(color) = first_solid(&element.style.fills) {
        css.insert("color", color);
    }
    if let Some(opacity) = element.style.opacity.filter(|o| *o < 1.0) {
        css.insert("opacity", format_number(opacity));
    }
    css
}

/// Box declarations for a node's visual style.
pub fn style_css(style: &VisualStyle) -> CssProperties {
    let mut css = CssProperties::new();

    // Layout
    let direction = match style.layout_mode {
        Some(LayoutMode::Horizontal) => Some("row"),
        Some(LayoutMode::Vertical) => Some("column"),
        _ => None,
    };
    if let Some(direction) = direction {
        css.insert("display", "flex");
        css.insert("flex-direction", direction);
        if let Some(gap) = style.item_spacing {
            css.insert("gap", px(gap));
        }
    }
    if style.has_padding() {
        css.insert(
            "padding",
            [
                style.padding_top,
                style.padding_right,
                style.padding_bottom,
                style.padding_left,
            ]
            .iter()
            .map(|side| px(side.unwrap_or(0.0)))
            .collect::<Vec<_>>()
            .join(" "),
        );
    }

    // Size
    if let Some(width) = style.width {
        css.insert("width", px(width));
    }
    if let Some(height) = style.height {
        css.insert("height", px(height));
    }

    // Background: a solid fill wins over any gradient.
    if let Some(color) = first_solid(&style.fills) {
        css.insert("background-color", color);
    } else if let Some(gradient) = first_gradient(&style.fills) {
        css.insert("background", gradient);
    }

    // Border: only the first stroke counts.
    if let Some(stroke) = style.strokes.iter().find(|p| p.is_visible()) {
        if let Some(color) = stroke.effective_color() {
            css.insert(
                "border",
                format!(
                    "{} solid {}",
                    px(style.stroke_weight.unwrap_or(1.0)),
                    color.to_css()
                ),
            );
        }
    }

    if let Some(radii) = style.corner_radii {
        css.insert(
            "border-radius",
            format!(
                "{} {} {} {}",
                px(radii.top_left),
                px(radii.top_right),
                px(radii.bottom_right),
                px(radii.bottom_left)
            ),
        );
    } else if let Some(radius) = style.corner_radius {
        css.insert("border-radius", px(radius));
    }

    let shadows: Vec<String> = style.effects.iter().filter_map(shadow_layer).collect();
    if !shadows.is_empty() {
        css.insert("box-shadow", shadows.join(", "));
    }

    if let Some(opacity) = style.opacity.filter(|o| *o < 1.0) {
        css.insert("opacity", format_number(opacity));
    }

    css
}

/// Font declarations for a text style.
pub fn text_css(style: &TypeStyle) -> CssProperties {
    let mut css = CssProperties::new();
    if let Some(family) = &style.font_family {
        css.insert("font-family", format!("'{}'", family.replace('\'', "")));
    }
    if let Some(size) = style.font_size {
        css.insert("font-size", px(size));
    }
    if let Some(weight) = style.font_weight {
        css.insert("font-weight", format_number(weight));
    }
    if let Some(line_height) = style.line_height_px {
        css.insert("line-height", px(line_height));
    }
    if let Some(spacing) = style.letter_spacing.filter(|s| *s != 0.0) {
        css.insert("letter-spacing", px(spacing));
    }
    if let Some(align) = style.text_align_horizontal.as_deref().and_then(text_align) {
        css.insert("text-align", align);
    }
    css
}

fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

fn text_align(value: &str) -> Option<&'static str> {
    match value {
        "LEFT" => Some("left"),
        "CENTER" => Some("center"),
        "RIGHT" => Some("right"),
        "JUSTIFIED" => Some("justify"),
        _ => None,
    }
}

fn first_solid(paints: &[Paint]) -> Option<String> {
    paints
        .iter()
        .filter(|p| p.is_visible() && p.paint_type == PaintType::Solid)
        .find_map(|p| p.effective_color())
        .map(|c| c.to_css())
}

fn first_gradient(paints: &[Paint]) -> Option<String> {
    let paint = paints.iter().find(|p| {
        p.is_visible()
            && matches!(
                p.paint_type,
                PaintType::GradientLinear | PaintType::GradientRadial
            )
            && !p.gradient_stops.is_empty()
    })?;

    let opacity = paint.opacity.unwrap_or(1.0);
    let stops = paint
        .gradient_stops
        .iter()
        .map(|stop| {
            format!(
                "{} {}%",
                stop.color.with_opacity(opacity).to_css(),
                format_number(stop.position * 100.0)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    Some(match paint.paint_type {
        PaintType::GradientRadial => format!("radial-gradient(circle, {})", stops),
        _ => format!("linear-gradient({}deg, {})", gradient_angle(paint), stops),
    })
}

/// CSS angle of a linear gradient from its handles; top-to-bottom without them.
fn gradient_angle(paint: &Paint) -> String {
    match paint.gradient_handle_positions.as_slice() {
        [start, end, ..] => {
            let (dx, dy) = (end.x - start.x, end.y - start.y);
            if dx == 0.0 && dy == 0.0 {
                return "180".to_string();
            }
            // CSS measures clockwise from "up"; handle space has y pointing down.
            let degrees = dx.atan2(-dy).to_degrees().rem_euclid(360.0);
            format_number(degrees.round())
        }
        _ => "180".to_string(),
    }
}

fn shadow_layer(effect: &Effect) -> Option<String> {
    let inset = match effect.effect_type {
        EffectType::DropShadow => "",
        EffectType::InnerShadow => "inset ",
        _ => return None,
    };
    if !effect.is_visible() {
        return None;
    }
    let offset = effect.offset.unwrap_or_default();
    let color = effect
        .color
        .map(|c| c.to_css())
        .unwrap_or_else(|| "#000000".to_string());
    Some(format!(
        "{}{} {} {} {} {}",
        inset,
        px(offset.x),
        px(offset.y),
        px(effect.radius),
        px(effect.spread.unwrap_or(0.0)),
        color
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{Color, ColorStop, CornerRadii, Vector};

    fn style() -> VisualStyle {
        VisualStyle::default()
    }

    #[test]
    fn test_empty_style_has_no_declarations() {
        assert!(style_css(&style()).is_empty());
    }

    #[test]
    fn test_four_corner_radius_order() {
        let mut s = style();
        s.corner_radii = Some(CornerRadii::new(4.0, 4.0, 0.0, 0.0));
        let css = style_css(&s);
        insta::assert_json_snapshot!(css, @r###"
        {
          "border-radius": "4px 4px 0px 0px"
        }
        "###);
    }

    #[test]
    fn test_scalar_radius() {
        let mut s = style();
        s.corner_radius = Some(8.0);
        assert_eq!(style_css(&s).get("border-radius"), Some("8px"));
    }

    #[test]
    fn test_solid_fill_wins_over_gradient() {
        let mut s = style();
        s.fills.push(Paint::gradient(
            PaintType::GradientLinear,
            vec![ColorStop {
                position: 0.0,
                color: Color::rgb(0.0, 0.0, 0.0),
            }],
        ));
        s.fills.push(Paint::solid(Color::rgb(1.0, 0.0, 0.0)));

        let css = style_css(&s);
        assert_eq!(css.get("background-color"), Some("#ff0000"));
        assert!(!css.contains("background"));
    }

    #[test]
    fn test_linear_gradient_stops() {
        let mut s = style();
        s.fills.push(Paint::gradient(
            PaintType::GradientLinear,
            vec![
                ColorStop {
                    position: 0.0,
                    color: Color::rgb(1.0, 1.0, 1.0),
                },
                ColorStop {
                    position: 0.5,
                    color: Color::rgba(0.0, 0.0, 0.0, 0.5),
                },
            ],
        ));
        assert_eq!(
            style_css(&s).get("background"),
            Some("linear-gradient(180deg, #ffffff 0%, rgba(0,0,0,0.5) 50%)")
        );
    }

    #[test]
    fn test_gradient_angle_from_handles() {
        let mut paint = Paint::gradient(
            PaintType::GradientLinear,
            vec![ColorStop {
                position: 1.0,
                color: Color::rgb(0.0, 0.0, 0.0),
            }],
        );
        paint.gradient_handle_positions = vec![Vector::new(0.0, 0.5), Vector::new(1.0, 0.5)];
        assert_eq!(gradient_angle(&paint), "90");
    }

    #[test]
    fn test_radial_gradient() {
        let mut s = style();
        s.fills.push(Paint::gradient(
            PaintType::GradientRadial,
            vec![ColorStop {
                position: 1.0,
                color: Color::rgb(0.0, 0.0, 0.0),
            }],
        ));
        assert_eq!(
            style_css(&s).get("background"),
            Some("radial-gradient(circle, #000000 100%)")
        );
    }

    #[test]
    fn test_only_first_stroke_becomes_border() {
        let mut s = style();
        s.strokes.push(Paint::solid(Color::rgb(0.0, 0.0, 0.0)));
        s.strokes.push(Paint::solid(Color::rgb(1.0, 1.0, 1.0)));
        s.stroke_weight = Some(2.0);
        assert_eq!(style_css(&s).get("border"), Some("2px solid #000000"));
    }

    #[test]
    fn test_shadows_keep_order_and_skip_blurs() {
        let mut s = style();
        s.effects.push(Effect::drop_shadow(
            Color::rgba(0.0, 0.0, 0.0, 0.25),
            Vector::new(0.0, 4.0),
            8.0,
        ));
        s.effects.push(Effect {
            effect_type: EffectType::LayerBlur,
            visible: None,
            color: None,
            offset: None,
            radius: 4.0,
            spread: None,
        });
        let mut inner = Effect::drop_shadow(Color::rgb(1.0, 1.0, 1.0), Vector::new(1.0, 1.0), 0.0);
        inner.effect_type = EffectType::InnerShadow;
        s.effects.push(inner);

        assert_eq!(
            style_css(&s).get("box-shadow"),
            Some("0px 4px 8px 0px rgba(0,0,0,0.25), inset 1px 1px 0px 0px #ffffff")
        );
    }

    #[test]
    fn test_flex_layout() {
        let mut s = style();
        s.layout_mode = Some(LayoutMode::Horizontal);
        s.item_spacing = Some(8.0);
        s.padding_top = Some(4.0);
        s.padding_left = Some(12.0);
        let css = style_css(&s);
        assert_eq!(
            css.to_inline(),
            "display: flex; flex-direction: row; gap: 8px; padding: 4px 0px 0px 12px"
        );
    }

    #[test]
    fn test_no_layout_mode_means_no_flex() {
        let mut s = style();
        s.layout_mode = Some(LayoutMode::None);
        s.item_spacing = Some(8.0);
        let css = style_css(&s);
        assert!(!css.contains("display"));
        assert!(!css.contains("gap"));
    }

    #[test]
    fn test_text_element_uses_color_not_background() {
        let mut element = ChildElement::new(NodeType::Text, "1").with_text("Hi");
        element.style.fills.push(Paint::solid(Color::rgb(0.0, 0.0, 0.0)));
        element.typography = Some(TypeStyle {
            font_family: Some("Inter".to_string()),
            font_size: Some(14.0),
            font_weight: Some(600.0),
            text_align_horizontal: Some("CENTER".to_string()),
            ..Default::default()
        });

        let css = element_css(&element);
        assert_eq!(
            css.to_inline(),
            "font-family: 'Inter'; font-size: 14px; font-weight: 600; text-align: center; color: #000000"
        );
    }

    #[test]
    fn test_invisible_paints_are_ignored() {
        let mut s = style();
        let mut hidden = Paint::solid(Color::rgb(1.0, 0.0, 0.0));
        hidden.visible = Some(false);
        s.fills.push(hidden);
        s.fills.push(Paint::solid(Color::rgb(0.0, 1.0, 0.0)));
        assert_eq!(style_css(&s).get("background-color"), Some("#00ff00"));
    }
}
