use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use vastucraft::{
    Config, ConversationEngine, ConversationState, Error, FieldKey, LoggingSink,
    DEFAULT_MODEL, FORM_RELAY_ENDPOINT, GENERATIVE_LANGUAGE_BASE,
};

fn config_from(vars: &[(&str, &str)]) -> vastucraft::Result<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]).expect("Empty environment should be valid");

    assert!(config.relay_access_key.is_none());
    assert_eq!(config.relay_endpoint, FORM_RELAY_ENDPOINT);
    assert!(config.assistant_api_key.is_none());
    assert_eq!(config.assistant_model, DEFAULT_MODEL);
    assert_eq!(config.typing_delay, Duration::from_millis(1500));
    assert!(!config.ai_summary);
}

#[test]
fn test_config_reads_all_variables() {
    let config = config_from(&[
        ("WEB3FORMS_ACCESS_KEY", "relay-key"),
        ("FORM_RELAY_ENDPOINT", "http://localhost:8080/submit"),
        ("GEMINI_API_KEY", "gemini-key"),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
        ("CONCIERGE_TYPING_DELAY_MS", "250"),
        ("CONCIERGE_AI_SUMMARY", "yes"),
    ])
    .expect("Valid environment");

    assert_eq!(config.relay_access_key.as_deref(), Some("relay-key"));
    assert_eq!(config.relay_endpoint, "http://localhost:8080/submit");
    assert_eq!(config.assistant_api_key.as_deref(), Some("gemini-key"));
    assert_eq!(config.assistant_model, "gemini-2.0-flash");
    assert_eq!(config.typing_delay, Duration::from_millis(250));
    assert!(config.ai_summary);
}

#[test]
fn test_config_falls_back_to_generic_api_key() {
    let config = config_from(&[("API_KEY", "generic"), ("WEB3FORMS_ACCESS_KEY", "  ")])
        .expect("Valid environment");
    assert_eq!(config.assistant_api_key.as_deref(), Some("generic"));
    assert!(config.relay_access_key.is_none());
}

#[test]
fn test_config_rejects_bad_values() {
    for vars in [
        vec![("FORM_RELAY_ENDPOINT", "not a url")],
        vec![("FORM_RELAY_ENDPOINT", "ftp://example.com/submit")],
        vec![("CONCIERGE_TYPING_DELAY_MS", "soon")],
        vec![("CONCIERGE_AI_SUMMARY", "maybe")],
    ] {
        match config_from(&vars) {
            Err(Error::Config(_)) => {}
            other => panic!("Expected config error for {:?}, got {:?}", vars, other),
        }
    }
}

#[test]
fn test_field_keys_follow_step_order() {
    assert_eq!(FieldKey::for_step(0), Some(FieldKey::Name));
    assert_eq!(FieldKey::for_step(2), Some(FieldKey::PlotSize));
    assert_eq!(FieldKey::for_step(4), Some(FieldKey::Contact));
    assert_eq!(FieldKey::for_step(5), None);
    assert_eq!(FieldKey::PlotSize.as_str(), "plotSize");
}

#[tokio::test]
async fn test_state_serialization_and_save() {
    let mut engine = ConversationEngine::new(Arc::new(LoggingSink));
    engine.submit_answer("Priya").await;
    engine.submit_answer("Ahmedabad").await;

    let json = serde_json::to_value(engine.state()).expect("Failed to serialize state");
    assert_eq!(json["current_step"], 2);
    assert_eq!(json["collected_fields"]["name"], "Priya");
    assert_eq!(json["collected_fields"]["location"], "Ahmedabad");
    assert_eq!(json["transcript"][0]["sender"], "bot");
    assert_eq!(json["transcript"][1]["sender"], "user");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("history").join("priya.json");
    engine.state().save_to(&path).expect("Failed to save state");

    let saved = std::fs::read_to_string(&path).expect("Failed to read saved state");
    let restored: ConversationState = serde_json::from_str(&saved).expect("Failed to parse saved state");
    assert_eq!(restored.current_step, 2);
    assert_eq!(restored.transcript.len(), engine.transcript().len());
    assert_eq!(restored.collected_fields, *engine.collected_fields());
}

#[tokio::test]
async fn test_collected_fields_iterate_in_step_order() {
    let mut engine = ConversationEngine::new(Arc::new(LoggingSink));
    for answer in ["Priya", "Ahmedabad", "1800 sq ft"] {
        engine.submit_answer(answer).await;
    }

    let fields: Vec<(FieldKey, &str)> = engine.collected_fields().iter().collect();
    assert_eq!(
        fields,
        vec![
            (FieldKey::Name, "Priya"),
            (FieldKey::Location, "Ahmedabad"),
            (FieldKey::PlotSize, "1800 sq ft"),
        ]
    );
}

#[test]
fn test_config_assistant_base_url() {
    let config = config_from(&[]).expect("Empty environment should be valid");
    assert_eq!(config.assistant_base_url, GENERATIVE_LANGUAGE_BASE);

    let config = config_from(&[("GEMINI_BASE_URL", "http://127.0.0.1:9000/v1beta/models")])
        .expect("Valid environment");
    assert_eq!(config.assistant_base_url, "http://127.0.0.1:9000/v1beta/models");

    match config_from(&[("GEMINI_BASE_URL", "generativelanguage")]) {
        Err(Error::Config(message)) => assert!(message.contains("GEMINI_BASE_URL")),
        other => panic!("Expected config error, got {:?}", other),
    }
}
