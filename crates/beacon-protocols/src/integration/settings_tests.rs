use super::*;
use serde_json::json;

#[test]
fn test_deserialize_true() {
    let settings: IntegrationSettings = serde_json::from_value(json!(true)).unwrap();
    assert!(settings.is_enabled());
    assert!(settings.options().is_empty());
}

#[test]
fn test_deserialize_false() {
    let settings: IntegrationSettings = serde_json::from_value(json!(false)).unwrap();
    assert!(!settings.is_enabled());
    assert_eq!(settings, IntegrationSettings::disabled());
}

#[test]
fn test_deserialize_object() {
    let settings: IntegrationSettings =
        serde_json::from_value(json!({ "api_key": "abc", "track_sessions": true })).unwrap();
    assert!(settings.is_enabled());
    assert_eq!(settings.get::<String>("api_key"), Some("abc".to_string()));
    assert_eq!(settings.get::<bool>("track_sessions"), Some(true));
}

#[test]
fn test_deserialize_rejects_other_types() {
    let result: Result<IntegrationSettings, _> = serde_json::from_value(json!("yes"));
    assert!(result.is_err());
}

#[test]
fn test_get_missing_or_mistyped() {
    let settings: IntegrationSettings =
        serde_json::from_value(json!({ "api_key": "abc" })).unwrap();
    assert!(settings.get::<String>("missing").is_none());
    assert!(settings.get::<u32>("api_key").is_none());
}

#[test]
fn test_serialize_forms() {
    assert_eq!(
        serde_json::to_value(IntegrationSettings::disabled()).unwrap(),
        json!(false)
    );
    assert_eq!(
        serde_json::to_value(IntegrationSettings::enabled()).unwrap(),
        json!(true)
    );

    let mut options = IntegrationOptions::new();
    options.insert("api_key".to_string(), json!("abc"));
    assert_eq!(
        serde_json::to_value(IntegrationSettings::with_options(options)).unwrap(),
        json!({ "api_key": "abc" })
    );
}

#[test]
fn test_empty_object_is_enabled() {
    let settings: IntegrationSettings = serde_json::from_value(json!({})).unwrap();
    assert!(settings.is_enabled());
}

#[test]
fn test_every_constructor_round_trips() {
    let mut options = IntegrationOptions::new();
    options.insert("api_key".to_string(), json!("abc"));

    let values = [
        IntegrationSettings::enabled(),
        IntegrationSettings::disabled(),
        IntegrationSettings::default(),
        IntegrationSettings::with_options(options),
        IntegrationSettings::with_options(IntegrationOptions::new()),
        serde_json::from_value(json!(false)).unwrap(),
    ];

    for settings in values {
        if !settings.is_enabled() {
            assert!(settings.options().is_empty());
        }
        let wire = serde_json::to_value(&settings).unwrap();
        let back: IntegrationSettings = serde_json::from_value(wire).unwrap();
        assert_eq!(back, settings);
    }
}
