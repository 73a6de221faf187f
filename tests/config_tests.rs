use std::fs;
use tempfile::TempDir;
use yamlkit::config::{Config, FlowStyle, LineBreak, NonPrintableStyle, ScalarStyle};
use yamlkit::{Error, NullPolicy};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.indent, 2);
    assert_eq!(config.width, 80);
    assert_eq!(config.scalar_style, ScalarStyle::DoubleQuoted);
    assert_eq!(config.flow_style, FlowStyle::Block);
    assert_eq!(config.null_policy, NullPolicy::RemoveOnNull);
}

#[test]
fn test_all_default_values() {
    let config = Config::default();

    // Layout
    assert_eq!(config.indent, 2);
    assert_eq!(config.width, 80);
    assert_eq!(config.max_key_length, 128);
    assert!(!config.canonical);
    assert!(!config.pretty_flow);
    assert!(config.split_lines);

    // Scalars
    assert!(config.allow_unicode);
    assert_eq!(config.line_break, LineBreak::Unix);
    assert_eq!(config.non_printable_style, NonPrintableStyle::Escape);

    // Binding
    assert!(!config.only_exposed_fields);
    assert!(!config.only_enum_name_mentioned);
    assert!(!config.exclude_null_values);
    assert_eq!(config.timezone, "UTC");

    // Paths and JSON
    assert_eq!(config.path_separator, '.');
    assert!(config.json_pretty);
}

#[test]
fn test_serialize_default_config() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).expect("Failed to serialize config");

    assert!(toml_str.contains("indent = 2"));
    assert!(toml_str.contains("width = 80"));
    assert!(toml_str.contains("scalar_style = \"double-quoted\""));
    assert!(toml_str.contains("flow_style = \"block\""));
    assert!(toml_str.contains("line_break = \"unix\""));
    assert!(toml_str.contains("null_policy = \"remove-on-null\""));
    assert!(toml_str.contains("timezone = \"UTC\""));
}

#[test]
fn test_deserialize_partial_config() {
    let toml_str = r#"
        indent = 4
        scalar_style = "plain"
        only_enum_name_mentioned = true
    "#;

    let config = Config::from_toml_str(toml_str).expect("Failed to parse config");

    assert_eq!(config.indent, 4);
    assert_eq!(config.scalar_style, ScalarStyle::Plain);
    assert!(config.only_enum_name_mentioned);

    // Everything else keeps its default
    assert_eq!(config.width, 80);
    assert_eq!(config.flow_style, FlowStyle::Block);
    assert_eq!(config.path_separator, '.');
}

#[test]
fn test_deserialize_empty_config() {
    let config = Config::from_toml_str("").expect("Failed to parse empty config");
    assert_eq!(config, Config::default());
}

#[test]
fn test_toml_round_trip() {
    let config = Config {
        indent: 3,
        width: 60,
        scalar_style: ScalarStyle::Folded,
        flow_style: FlowStyle::Auto,
        line_break: LineBreak::Windows,
        null_policy: NullPolicy::StoreNull,
        path_separator: '/',
        timezone: "Europe/Berlin".to_string(),
        ..Config::default()
    };

    let text = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    let err = Config::from_toml_str("scalar_style = \"fancy\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    assert!(matches!(
        Config::from_toml_str("indent = 1"),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Config::from_toml_str("indent = 8\nwidth = 8"),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Config::from_toml_str("max_key_length = 0"),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Config::from_toml_str("timezone = \"  \""),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Config::from_toml_str("path_separator = \"\\\\\""),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "width = 120\nexclude_null_values = true\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.width, 120);
    assert!(config.exclude_null_values);
}

#[test]
fn test_load_from_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_load_from_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "indent = \"wide\"\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/yamlkit/config.toml"));
    }
}
