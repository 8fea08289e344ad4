use serde_json::json;
use vastucraft::{
    ContactInquiry, FormPayload, GenerateContentResponse, LeadSubmission, RelayResponse,
    VastuAssistant,
};

fn sample_lead() -> LeadSubmission {
    LeadSubmission {
        name: "Priya".to_string(),
        location: "Ahmedabad".to_string(),
        plot_size: "1800 sq ft".to_string(),
        requirements: "3BHK villa, Vastu-compliant".to_string(),
        contact: "priya@example.com".to_string(),
    }
}

#[test]
fn test_generate_content_response_parsing() {
    let response_json = json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Place the kitchen in the South-East corner. " },
                        { "text": "Book a Discovery Call for a full analysis." }
                    ]
                },
                "finishReason": "STOP",
                "index": 0
            }
        ],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 40,
            "totalTokenCount": 160
        },
        "modelVersion": "gemini-2.5-flash"
    });

    let response: GenerateContentResponse =
        serde_json::from_value(response_json).expect("Failed to parse response");

    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.model_version.as_deref(), Some("gemini-2.5-flash"));

    let usage = response.usage_metadata.as_ref().expect("Missing usage");
    assert_eq!(usage.prompt_token_count, 120);
    assert_eq!(usage.total_token_count, 160);

    assert_eq!(
        response.text().as_deref(),
        Some("Place the kitchen in the South-East corner. Book a Discovery Call for a full analysis.")
    );
}

#[test]
fn test_response_without_text_yields_none() {
    let blocked: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [ { "finishReason": "SAFETY" } ]
    }))
    .expect("Failed to parse blocked response");
    assert!(blocked.text().is_none());

    let empty: GenerateContentResponse =
        serde_json::from_value(json!({})).expect("Failed to parse empty response");
    assert!(empty.candidates.is_empty());
    assert!(empty.text().is_none());

    let whitespace: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [ { "content": { "role": "model", "parts": [ { "text": "  " } ] } } ]
    }))
    .expect("Failed to parse whitespace response");
    assert!(whitespace.text().is_none());
}

#[test]
fn test_assistant_request_shape() {
    let request = VastuAssistant::build_request("Is a North-East entrance good?", "Be brief.");
    let body = serde_json::to_value(&request).expect("Failed to serialize request");

    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Is a North-East entrance good?");
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
    assert!(body["systemInstruction"].get("role").is_none());
    assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_unconfigured_assistant_answers_without_network() {
    let assistant = VastuAssistant::new(Some("   ".to_string()), "gemini-2.5-flash".to_string());
    assert!(!assistant.is_configured());

    let reply = assistant.ask("Which way should my bed face?").await;
    assert!(reply.is_error);
    assert!(reply.text.contains("unavailable"));
}

#[test]
fn test_lead_payload_fields() {
    let payload = FormPayload::for_lead("relay-key", &sample_lead(), None);
    let body = serde_json::to_value(&payload).expect("Failed to serialize payload");

    assert_eq!(body["access_key"], "relay-key");
    assert_eq!(body["subject"], "New Project Concierge Lead: Priya");
    assert_eq!(body["from_name"], "VastuCraft Concierge");
    assert_eq!(body["Name"], "Priya");
    assert_eq!(body["Location"], "Ahmedabad");
    assert_eq!(body["Plot_Size"], "1800 sq ft");
    assert_eq!(body["Requirements"], "3BHK villa, Vastu-compliant");
    assert_eq!(body["Contact_Info"], "priya@example.com");
    assert_eq!(body["Status"], "Pending Review");
    assert!(body.get("AI_Summary").is_none());

    let message = body["message"].as_str().expect("Missing fallback message");
    for line in [
        "Name: Priya",
        "Location: Ahmedabad",
        "Plot Size: 1800 sq ft",
        "Requirements: 3BHK villa, Vastu-compliant",
        "Contact Info: priya@example.com",
    ] {
        assert!(message.contains(line), "fallback message missing '{}'", line);
    }
}

#[test]
fn test_lead_payload_with_summary() {
    let payload = FormPayload::for_lead("relay-key", &sample_lead(), Some("- Villa on a 1800 sq ft plot"));
    let body = serde_json::to_value(&payload).expect("Failed to serialize payload");
    assert_eq!(body["AI_Summary"], "- Villa on a 1800 sq ft plot");
}

#[test]
fn test_relay_response_parsing() {
    let ok: RelayResponse = serde_json::from_value(json!({
        "success": true,
        "message": "Email sent successfully!"
    }))
    .expect("Failed to parse success");
    assert!(ok.success);

    let rejected: RelayResponse = serde_json::from_value(json!({ "success": false }))
        .expect("Failed to parse rejection");
    assert!(!rejected.success);
    assert!(rejected.message.is_none());
}

#[test]
fn test_contact_inquiry_validation() {
    let mut inquiry = ContactInquiry {
        name: "Rohan".to_string(),
        email: "rohan@example.com".to_string(),
        phone: None,
        service: "Vastu Consulting".to_string(),
        message: "Need a Vastu audit for my office.".to_string(),
    };
    assert!(inquiry.validate().is_ok());

    let body = serde_json::to_value(&inquiry).expect("Failed to serialize inquiry");
    assert!(body.get("phone").is_none());

    inquiry.email = "not-an-email".to_string();
    assert!(inquiry.validate().is_err());

    inquiry.email = "rohan@example.com".to_string();
    inquiry.message = "  ".to_string();
    let err = inquiry.validate().unwrap_err();
    assert!(err.to_string().contains("message"));
}
