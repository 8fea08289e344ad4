use crate::error::{Error, Result};
use crate::request::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::sink::LeadSubmission;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

/// Base URL of the generative-language REST API
pub const GENERATIVE_LANGUAGE_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Fixed persona for the free-form Q&A widget
pub const SYSTEM_INSTRUCTION: &str = "You are VastuBot, an expert AI assistant for VastuCraft AI Studio.
Your goal is to provide helpful, preliminary advice on Vastu Shastra and modern construction technology.

Studio Context:
- We are a hybrid architecture studio led by Ar. Vidhi Gajjar (Architect/Vastu Expert) and Swetang Gajjar (AI Specialist).
- We combine traditional Vastu with AI-driven construction quality control.
- We are based in Gujarat (Ahmedabad, Gandhinagar, Surat).

Guidelines:
- Answer questions about Vastu directions (North, East, etc.) and room placements clearly.
- If a user asks about construction defects or smart buildings, mention Swetang's AI vision technology.
- If a user asks about architectural planning or RERA, mention Vidhi's expertise.
- Always end by suggesting they \"Book a Discovery Call\" or \"Upload their floor plan\" for a professional analysis.
- Keep responses concise (under 150 words) and professional but warm.";

const SUMMARY_INSTRUCTION: &str = "You are an intake assistant for VastuCraft AI Studio, an architecture and Vastu consulting practice in Gujarat. \
Summarize the client's project brief for the studio team in three to five short bullet points. \
Note any Vastu considerations implied by the requirements. Do not invent facts that are not in the brief.";

const TEMPERATURE: f32 = 0.7;

const UNAVAILABLE_TEXT: &str = "I'm sorry, but the AI service is currently unavailable (API Key missing). Please contact the studio directly.";
const CONNECTION_TEXT: &str = "I'm sorry, I'm having trouble connecting to the Vastu knowledge base right now. Please try again later.";
const EMPTY_TEXT: &str = "I didn't get a response.";

/// Answer shown in the Q&A widget
///
/// `is_error` lets a renderer style failures differently; the text is always
/// presentable as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub is_error: bool,
}

impl AssistantReply {
    fn answer(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn unavailable(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_error: true,
        }
    }
}

/// Produces a short brief of a lead for the studio team
///
/// Used by the concierge to attach an optional summary to a submission.
#[async_trait]
pub trait LeadSummarizer: Send + Sync {
    async fn summarize(&self, lead: &LeadSubmission) -> Result<String>;
}

/// Stateless client for the VastuBot Q&A assistant
///
/// Every question is sent on its own with the fixed [`SYSTEM_INSTRUCTION`];
/// no history is kept between calls.
///
/// # Example
///
/// ```rust
/// use vastucraft::VastuAssistant;
///
/// let assistant = VastuAssistant::new(None, "gemini-2.5-flash".to_string());
/// assert!(!assistant.is_configured());
/// assert_eq!(assistant.model(), "gemini-2.5-flash");
///
/// let local = assistant.with_base_url("http://127.0.0.1:8080/v1beta/models/");
/// assert_eq!(local.base_url(), "http://127.0.0.1:8080/v1beta/models");
/// ```
#[derive(Clone)]
pub struct VastuAssistant {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
    model: String,
}

impl VastuAssistant {
    /// Create a new assistant client
    ///
    /// A missing or blank key is allowed; [`ask`](Self::ask) then answers with
    /// an "unavailable" message instead of calling out.
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: GENERATIVE_LANGUAGE_BASE.to_string(),
            client: reqwest::Client::new(),
            model,
        }
    }

    /// Send requests to `{base_url}/{model}:generateContent` instead of the
    /// public endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a raw `generateContent` request
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] - If no API key is configured
    /// - [`Error::Header`] - If the API key header can't be created
    /// - [`Error::Request`] - If the HTTP request fails
    /// - [`Error::Response`] - If the API returns a non-success status code
    /// - [`Error::Parse`] - If the API response can't be parsed
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("Assistant API key is missing".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| Error::Header("Failed to create x-goog-api-key header".to_string()))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if let Ok(error_json) = serde_json::from_str::<Value>(&text) {
                if let Some(error_msg) = error_json
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                {
                    return Err(Error::Response(
                        error_msg.to_string(),
                        Some(status.as_u16()),
                    ));
                }
            }

            return Err(Error::Response(text, Some(status.as_u16())));
        }

        let response_text = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)?;
        Ok(parsed)
    }

    /// Ask VastuBot a question
    ///
    /// Never fails: problems are logged and mapped to an apologetic reply with
    /// `is_error` set.
    pub async fn ask(&self, query: &str) -> AssistantReply {
        if !self.is_configured() {
            tracing::error!("Assistant API key is missing");
            return AssistantReply::unavailable(UNAVAILABLE_TEXT);
        }

        let request = Self::build_request(query, SYSTEM_INSTRUCTION);
        match self.generate_content(&request).await {
            Ok(response) => {
                AssistantReply::answer(response.text().unwrap_or_else(|| EMPTY_TEXT.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "Assistant request failed");
                AssistantReply::unavailable(CONNECTION_TEXT)
            }
        }
    }

    /// Request for a single question with the given instruction
    pub fn build_request(query: &str, instruction: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(query)],
            system_instruction: Some(Content::instruction(instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(TEMPERATURE),
                max_output_tokens: None,
            }),
        }
    }
}

#[async_trait]
impl LeadSummarizer for VastuAssistant {
    async fn summarize(&self, lead: &LeadSubmission) -> Result<String> {
        let brief = format!(
            "Client: {}\nProject location: {}\nPlot size: {}\nRequirements: {}",
            lead.name, lead.location, lead.plot_size, lead.requirements
        );
        let request = Self::build_request(&brief, SUMMARY_INSTRUCTION);
        let response = self.generate_content(&request).await?;
        response
            .text()
            .ok_or_else(|| Error::Other("Assistant returned an empty summary".to_string()))
    }
}
