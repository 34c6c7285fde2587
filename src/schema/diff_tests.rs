//! Tests for config diffing.

use super::{Config, Format, Setting, SettingValue, diff};

fn config(settings: &[(&str, &str)]) -> Config {
    settings.iter().fold(Config::new("app", Format::Custom), |c, (k, v)| {
        c.with_setting(Setting::inferred(*k, v))
    })
}

#[test]
fn identical_configs_have_no_changes() {
    let a = config(&[("x", "1"), ("y", "true")]);
    let result = diff(&a, &a.clone());

    assert!(!result.has_changes());
    assert_eq!(result.unchanged.len(), 2);
    assert_eq!(result.summary(), "No changes");
}

#[test]
fn detects_added_modified_removed() {
    let old = config(&[("keep", "1"), ("change", "a"), ("drop", "z")]);
    let new = config(&[("keep", "1"), ("change", "b"), ("fresh", "true")]);

    let result = diff(&old, &new);

    assert!(result.has_changes());
    assert!(result.added.contains_key("fresh"));
    assert!(result.removed.contains_key("drop"));
    assert!(result.unchanged.contains_key("keep"));

    let change = &result.modified["change"];
    assert_eq!(change.old, Some(SettingValue::from("a")));
    assert_eq!(change.new, Some(SettingValue::from("b")));
}

#[test]
fn summary_lists_nonzero_groups_in_order() {
    let old = config(&[("keep", "1"), ("drop", "z")]);
    let new = config(&[("keep", "1"), ("fresh", "2")]);

    assert_eq!(diff(&old, &new).summary(), "+1 added, -1 removed, =1 unchanged");
}
