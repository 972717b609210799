#![allow(clippy::unwrap_used)]

use serde_json::json;

use crate::style::{Align, FontWeight, Style, TextAlign, color_to_rgba, container_css, text_css};

fn overrides(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

mod resolve {
    use super::*;

    #[test]
    fn no_override_gives_defaults() {
        let style = Style::resolve(None);

        assert_eq!(style, Style::default());
        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.font_weight, FontWeight::Keyword("bold".into()));
        assert_eq!(style.text_align, TextAlign::Center);
        assert_eq!(style.background_opacity, 0.4);
        assert!(style.font_family.is_none());
    }

    #[test]
    fn override_applies_key_by_key() {
        let partial = overrides(json!({ "fontSize": 48, "textAlign": "left", "border": true }));

        let style = Style::resolve(Some(&partial));

        assert_eq!(style.font_size, 48.0);
        assert_eq!(style.text_align, TextAlign::Left);
        assert!(style.border);
        assert_eq!(style.padding, 12.0);
        assert_eq!(style.font_color, "#ffffff");
    }

    #[test]
    fn invalid_values_are_skipped_individually() {
        let partial = overrides(json!({
            "fontSize": "huge",
            "textAlign": "justify",
            "padding": 4,
            "unknownKey": 1
        }));

        let style = Style::resolve(Some(&partial));

        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.text_align, TextAlign::Center);
        assert_eq!(style.padding, 4.0);
    }

    #[test]
    fn null_clears_optional_field_only() {
        let with_family = overrides(json!({ "fontFamily": "Cantarell" }));
        assert_eq!(
            Style::resolve(Some(&with_family)).font_family.as_deref(),
            Some("Cantarell")
        );

        let partial = overrides(json!({ "fontFamily": null, "fontSize": null }));
        let style = Style::resolve(Some(&partial));

        assert!(style.font_family.is_none());
        assert_eq!(style.font_size, 32.0);
    }

    #[test]
    fn font_weight_accepts_numbers_and_keywords() {
        let numeric = Style::resolve(Some(&overrides(json!({ "fontWeight": 300 }))));
        assert_eq!(numeric.font_weight.as_number(), Some(300));

        let text = Style::resolve(Some(&overrides(json!({ "fontWeight": "600" }))));
        assert_eq!(text.font_weight.as_number(), Some(600));

        assert_eq!(FontWeight::Keyword("normal".into()).as_number(), Some(400));
        assert_eq!(Style::default().font_weight.as_number(), Some(700));
    }
}

mod colors {
    use super::*;

    #[test]
    fn short_hex_with_opacity() {
        assert_eq!(color_to_rgba("#fff", 0.5), "rgba(255,255,255,0.5)");
    }

    #[test]
    fn long_hex_with_and_without_hash() {
        assert_eq!(color_to_rgba("#1a2B3c", 1.0), "rgba(26,43,60,1)");
        assert_eq!(color_to_rgba("000000", 0.4), "rgba(0,0,0,0.4)");
    }

    #[test]
    fn rgb_function() {
        assert_eq!(color_to_rgba("rgb(10, 20,30)", 0.25), "rgba(10,20,30,0.25)");
    }

    #[test]
    fn unknown_color_passes_through() {
        assert_eq!(color_to_rgba("tomato", 0.5), "tomato");
        assert_eq!(color_to_rgba("rgba(1,2,3,0.1)", 0.5), "rgba(1,2,3,0.1)");
    }
}

mod css {
    use super::*;

    #[test]
    fn default_container() {
        assert_eq!(
            container_css(&Style::default()),
            "background-color: rgba(0,0,0,0.4); border-radius: 8px; padding: 12px"
        );
    }

    #[test]
    fn container_with_border_and_shadow() {
        let style = Style {
            background: false,
            border: true,
            border_width: 2.0,
            box_shadow: true,
            margin: 5.0,
            max_width: 300.0,
            ..Style::default()
        };

        assert_eq!(
            container_css(&style),
            "border-radius: 8px; border: 2px solid rgba(255,255,255,0.5); \
             box-shadow: 0px 4px 12px 0px rgba(0,0,0,0.3); padding: 12px; \
             margin: 5px; max-width: 300px"
        );
    }

    #[test]
    fn border_needs_width() {
        let style = Style { border: true, border_radius: 0.0, ..Style::default() };

        assert!(!container_css(&style).contains("border"));
    }

    #[test]
    fn default_text() {
        assert_eq!(
            text_css(&Style::default()),
            "font-size: 32px; font-weight: bold; color: #ffffff; text-align: center; \
             text-shadow: 1px 1px 3px rgba(0,0,0,0.8)"
        );
    }

    #[test]
    fn text_with_family_opacity_and_spacing() {
        let style = Style {
            font_family: Some("Noto Sans".into()),
            font_opacity: 0.5,
            letter_spacing: -1.5,
            text_shadow: false,
            text_align: TextAlign::Right,
            ..Style::default()
        };

        assert_eq!(
            style.text_css(),
            "font-family: \"Noto Sans\"; font-size: 32px; font-weight: bold; \
             color: rgba(255,255,255,0.5); letter-spacing: -1.5px; text-align: right"
        );
    }

    #[test]
    fn alignment_maps_to_node_alignment() {
        assert_eq!(Align::from(TextAlign::Left), Align::Start);
        assert_eq!(Align::from(TextAlign::Center), Align::Center);
        assert_eq!(Align::from(TextAlign::Right), Align::End);
    }
}
