//! Tests for Ghostty field validation.

use super::{FieldSchema, GhosttySchemaValidator};
use crate::schema::{Config, Format, Setting, SettingType, SettingValue};

fn ghostty(settings: &[(&str, Option<SettingValue>)]) -> Config {
    settings
        .iter()
        .fold(Config::new("ghostty", Format::Custom), |config, (name, value)| {
            let kind = value.as_ref().map_or(SettingType::String, SettingValue::kind);
            let mut setting = Setting::new(*name, kind);
            setting.default.clone_from(value);
            config.with_setting(setting)
        })
}

mod validate_field {
    use super::*;

    #[test]
    fn accepts_known_fields_with_matching_values() {
        let v = GhosttySchemaValidator::new();

        for (field, value) in [
            ("cursor-color", SettingValue::from("#ff0000")),
            ("cursor-color", SettingValue::from("#f00")),
            ("background", SettingValue::from("black")),
            ("cursor-style", SettingValue::from("block")),
            ("window-padding-x", SettingValue::from(10)),
            ("font-family", SettingValue::from("JetBrains Mono")),
            ("cursor-invert-fg-bg", SettingValue::from(true)),
        ] {
            let result = v.validate_field(field, &value);
            assert!(result.valid, "{field}: {:?}", result.errors);
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = GhosttySchemaValidator::new().validate_field("cursor-blink", &true.into());

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec!["field 'cursor-blink' is not a valid Ghostty configuration option"]
        );
    }

    #[test]
    fn enum_value_outside_list() {
        let result =
            GhosttySchemaValidator::new().validate_field("cursor-style", &"triangle".into());

        assert_eq!(
            result.errors,
            vec!["field 'cursor-style' must be one of: block, bar, underline, outline"]
        );
    }

    #[test]
    fn malformed_color() {
        let result = GhosttySchemaValidator::new().validate_field("cursor-color", &"#ff00".into());

        assert_eq!(
            result.errors,
            vec!["field 'cursor-color' must be a valid color (hex or named color)"]
        );
    }

    #[test]
    fn color_of_wrong_type() {
        let result = GhosttySchemaValidator::new().validate_field("cursor-color", &123.into());

        assert_eq!(
            result.errors,
            vec!["field 'cursor-color' must be of type color"]
        );
    }

    #[test]
    fn number_given_as_text() {
        let result = GhosttySchemaValidator::new().validate_field("font-size", &"big".into());

        assert_eq!(result.errors, vec!["field 'font-size' must be of type number"]);
    }

    #[test]
    fn added_field_is_accepted() {
        let v = GhosttySchemaValidator::new().with_field("scrollback-limit", FieldSchema::Number);

        assert!(v.validate_field("scrollback-limit", &10_000.into()).valid);
        assert_eq!(v.field("scrollback-limit"), Some(FieldSchema::Number));
    }
}

mod validate_config {
    use super::*;

    #[test]
    fn valid_config_passes() {
        let config = ghostty(&[
            ("font-family", Some("Fira Code".into())),
            ("font-size", Some(14.into())),
            ("cursor-style", Some("bar".into())),
            ("background", Some("#282c34".into())),
        ]);

        let result = GhosttySchemaValidator::new().validate_config(&config);

        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn every_bad_field_is_reported() {
        let config = ghostty(&[
            ("cursor-blink", Some(true.into())),
            ("window-padding", Some(10.into())),
            ("cursor-style", Some("triangle".into())),
            ("cursor-color", Some("#zzzzzz".into())),
            ("font-size", Some(12.into())),
        ]);

        let result = GhosttySchemaValidator::new().validate_config(&config);

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 4);
        for field in ["cursor-blink", "window-padding", "cursor-style", "cursor-color"] {
            assert!(
                result.errors.iter().any(|e| e.contains(field)),
                "no error for {field}: {:?}",
                result.errors
            );
        }
    }

    #[test]
    fn unknown_field_without_default_is_still_rejected() {
        let config = ghostty(&[("keybind", None), ("font-family", None)]);

        let result = GhosttySchemaValidator::new().validate_config(&config);

        assert_eq!(
            result.errors,
            vec!["field 'keybind' is not a valid Ghostty configuration option"]
        );
    }
}
