use std::{collections::HashMap, fs};

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = read_settings_file(&dir.path().join("ecm.toml")).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.control_order, "5N6N7N8N9N");
    assert_eq!(settings.line_width, 70);
}

#[test]
fn file_overrides_only_what_it_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ecm.toml");
    fs::write(
        &path,
        "cipher_order = \"0R1N2R3N4R\"\nmachine = \"CSP2900\"\nnavy_init = true\n",
    )
    .expect("write settings");

    let settings = read_settings_file(&path).expect("parse");
    assert_eq!(settings.cipher_order, "0R1N2R3N4R");
    assert_eq!(settings.machine, "CSP2900");
    assert!(settings.navy_init);
    assert_eq!(settings.index_pos, "00000");
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ecm.toml");
    fs::write(&path, "group_size = \"five\"\n").expect("write settings");

    let err = read_settings_file(&path).expect_err("bad type");
    assert!(err.to_string().contains("failed to parse settings file"));
}

#[test]
fn app_prefix_wins_over_ecm_prefix() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("ECM_CONTROL_POS", "AAAAA"),
            ("APP__CONTROL_POS", "BBBBB"),
            ("ECM_INDEX_ORDER", "4N3N2N1N0N"),
        ]),
    );
    assert_eq!(settings.control_pos, "BBBBB");
    assert_eq!(settings.index_order, "4N3N2N1N0N");
}

#[test]
fn unparseable_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("ECM_LINE_WIDTH", "wide"),
            ("ECM_GROUP_SIZE", "4"),
            ("ECM_NAVY_INIT", "maybe"),
        ]),
    );
    assert_eq!(settings.line_width, 70);
    assert_eq!(settings.group_size, 4);
    assert!(!settings.navy_init);

    apply_env(&mut settings, env(&[("APP__NAVY_INIT", "TRUE")]));
    assert!(settings.navy_init);
}
