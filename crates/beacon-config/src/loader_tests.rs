use super::*;
use crate::schema::LogFormat;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_empty_config() {
    let config = ConfigLoader::load_str("").unwrap();
    assert_eq!(config.client.flush_at, 20);
    assert!(config.integrations.is_empty());
}

#[test]
fn test_expand_path() {
    let expanded = ConfigLoader::expand_path("~/.beacon");
    assert!(!expanded.starts_with('~'));
}

#[test]
fn test_load_full_config() {
    let content = r#"
        [client]
        write_key = "wk_123"
        debug = true
        flush_at = 5

        [integrations]
        Firebase = true
        Adjust = false
        Amplitude = { api_key = "abc", track_sessions = true }

        [logging]
        level = "debug"
        format = "json"
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.client.write_key, "wk_123");
    assert!(config.client.debug);
    assert_eq!(config.client.flush_at, 5);

    assert!(config.integrations["Firebase"].is_enabled());
    assert!(!config.integrations["Adjust"].is_enabled());
    let amplitude = &config.integrations["Amplitude"];
    assert!(amplitude.is_enabled());
    assert_eq!(amplitude.get::<String>("api_key"), Some("abc".to_string()));
    assert_eq!(amplitude.get::<bool>("track_sessions"), Some(true));

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[client]").unwrap();
    writeln!(file, "write_key = \"from-file\"").unwrap();

    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.client.write_key, "from-file");
}

#[test]
fn test_load_nonexistent_file() {
    let result = ConfigLoader::load(Path::new("/nonexistent/path/beacon.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_load_invalid_toml() {
    let result = ConfigLoader::load_str("invalid = [unclosed");
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_invalid_integration_settings() {
    let content = r#"
        [integrations]
        Firebase = "yes"
    "#;
    assert!(matches!(
        ConfigLoader::load_str(content),
        Err(ConfigError::TomlParse(_))
    ));
}

#[test]
fn test_env_var_expansion() {
    // SAFETY: variable name is unique to this test.
    unsafe { env::set_var("BEACON_TEST_WRITE_KEY", "wk_env") };
    let content = r#"
        [client]
        write_key = "prefix-${BEACON_TEST_WRITE_KEY}-suffix"
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.client.write_key, "prefix-wk_env-suffix");
}

#[test]
fn test_env_var_in_integration_options() {
    // SAFETY: variable name is unique to this test.
    unsafe { env::set_var("BEACON_TEST_AMPLITUDE_KEY", "amp_env") };
    let content = r#"
        [client]
        write_key = "wk"

        [integrations]
        Amplitude = { api_key = "${BEACON_TEST_AMPLITUDE_KEY}", tags = ["${BEACON_TEST_AMPLITUDE_KEY}"] }
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    let amplitude = &config.integrations["Amplitude"];
    assert_eq!(amplitude.get::<String>("api_key"), Some("amp_env".to_string()));
    assert_eq!(
        amplitude.get::<Vec<String>>("tags"),
        Some(vec!["amp_env".to_string()])
    );
}

#[test]
fn test_env_var_value_stays_inside_its_string() {
    // SAFETY: variable name is unique to this test.
    unsafe { env::set_var("BEACON_TEST_QUOTED_KEY", "a\"\nflush_at = 0\nx = \"") };
    let content = r#"
        [client]
        write_key = "${BEACON_TEST_QUOTED_KEY}"
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.client.write_key, "a\"\nflush_at = 0\nx = \"");
    assert_eq!(config.client.flush_at, 20);
}

#[test]
fn test_env_var_value_not_expanded_twice() {
    // SAFETY: variable name is unique to this test.
    unsafe { env::set_var("BEACON_TEST_NESTED_REF", "${BEACON_TEST_NEVER_SET}") };
    let content = r#"
        [client]
        write_key = "${BEACON_TEST_NESTED_REF}"
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.client.write_key, "${BEACON_TEST_NEVER_SET}");
}

#[test]
fn test_env_var_in_comment_ignored() {
    let content = r#"
        # set ${BEACON_TEST_COMMENT_ONLY} to override
        [client]
        write_key = "wk_literal" # or ${BEACON_TEST_COMMENT_ONLY}
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.client.write_key, "wk_literal");
}

#[test]
fn test_env_var_missing() {
    let content = r#"
        [client]
        write_key = "${BEACON_TEST_DEFINITELY_UNSET}"
    "#;
    let result = ConfigLoader::load_str(content);
    assert!(
        matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "BEACON_TEST_DEFINITELY_UNSET")
    );
}
