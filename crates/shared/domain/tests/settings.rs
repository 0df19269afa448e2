use autoapi_domain::settings::{ConventionSettings, LoggingSettings, Settings};
use serde_json::json;

#[test]
fn settings_defaults_are_sane() {
    let conv = ConventionSettings::default();
    assert!(!conv.enable);
    assert_eq!(conv.default_http_verb, "POST");
    assert_eq!(conv.default_api_prefix.as_deref(), Some("api"));
    assert_eq!(
        conv.remove_service_postfixes.as_deref(),
        Some(&["AppService".to_owned(), "ApplicationService".to_owned()][..])
    );
    assert_eq!(conv.remove_action_postfixes, vec!["Async".to_owned()]);
    assert_eq!(conv.body_binding_ignored_types, vec!["IFormFile".to_owned()]);

    let logging = LoggingSettings::default();
    assert_eq!(logging.level, "info");
    assert!(logging.path.is_none());
}

#[test]
fn settings_deserialize_with_partial_sections() {
    let raw = json!({
        "auto_api": {
            "enable": true,
            "default_area_name": "v2",
            "default_http_verb": "PUT",
            "remove_service_postfixes": null,
            "http_verbs": { "search": "GET" }
        },
        "logging": { "level": "debug", "json": true }
    });

    let settings: Settings = serde_json::from_value(raw).expect("settings deserialize");
    assert!(settings.auto_api.enable);
    assert_eq!(settings.auto_api.default_area_name.as_deref(), Some("v2"));
    assert_eq!(settings.auto_api.default_http_verb, "PUT");
    assert!(settings.auto_api.remove_service_postfixes.is_none());
    assert_eq!(settings.auto_api.remove_action_postfixes, vec!["Async".to_owned()]);
    assert_eq!(settings.auto_api.http_verbs.get("search").map(String::as_str), Some("GET"));
    assert_eq!(settings.logging.level, "debug");
    assert!(settings.logging.json);
}

#[test]
fn empty_document_yields_defaults() {
    let settings: Settings = serde_json::from_value(json!({})).expect("settings deserialize");
    assert!(!settings.auto_api.enable);
    assert_eq!(settings.logging.level, "info");
}
