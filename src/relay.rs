use crate::error::{Error, Result};
use crate::sink::{LeadSink, LeadSubmission};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Default form-relay submission endpoint
pub const FORM_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Sender label attached to concierge leads
pub const CONCIERGE_SENDER: &str = "VastuCraft Concierge";

/// Sender label attached to contact-form inquiries
pub const WEBSITE_SENDER: &str = "VastuCraft Website";

/// Review status every new lead starts in
pub const PENDING_REVIEW: &str = "Pending Review";

/// JSON body for a concierge lead
///
/// Field names are what the relay forwards to the studio inbox, so they are
/// human-readable rather than snake_case.
///
/// # Example
///
/// ```rust
/// use vastucraft::{FormPayload, LeadSubmission};
///
/// let lead = LeadSubmission {
///     name: "Priya".to_string(),
///     location: "Ahmedabad".to_string(),
///     plot_size: "1800 sq ft".to_string(),
///     requirements: "3BHK villa".to_string(),
///     contact: "priya@example.com".to_string(),
/// };
///
/// let body = serde_json::to_value(FormPayload::for_lead("key", &lead, None)).unwrap();
/// assert_eq!(body["subject"], "New Project Concierge Lead: Priya");
/// assert_eq!(body["Plot_Size"], "1800 sq ft");
/// assert_eq!(body["Status"], "Pending Review");
/// assert!(body.get("AI_Summary").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormPayload {
    pub access_key: String,
    pub subject: String,
    pub from_name: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Plot_Size")]
    pub plot_size: String,
    #[serde(rename = "Requirements")]
    pub requirements: String,
    #[serde(rename = "Contact_Info")]
    pub contact_info: String,
    #[serde(rename = "Status")]
    pub status: String,
    pub message: String,
    #[serde(rename = "AI_Summary", skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl FormPayload {
    pub fn for_lead(access_key: &str, lead: &LeadSubmission, summary: Option<&str>) -> Self {
        Self {
            access_key: access_key.to_string(),
            subject: format!("New Project Concierge Lead: {}", lead.name),
            from_name: CONCIERGE_SENDER.to_string(),
            name: lead.name.clone(),
            location: lead.location.clone(),
            plot_size: lead.plot_size.clone(),
            requirements: lead.requirements.clone(),
            contact_info: lead.contact.clone(),
            status: PENDING_REVIEW.to_string(),
            message: lead.fallback_message(),
            ai_summary: summary.map(str::to_string),
        }
    }
}

/// Inquiry from the general contact form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
}

impl ContactInquiry {
    /// Check that the fields the form marks as required are filled in
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Other(format!("The {} field is required", field)));
            }
        }
        if !self.email.contains('@') {
            return Err(Error::Other("Please enter a valid email address".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct InquiryPayload<'a> {
    access_key: &'a str,
    subject: &'static str,
    from_name: &'static str,
    #[serde(flatten)]
    inquiry: &'a ContactInquiry,
}

/// Acknowledgement returned by the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the third-party form relay
///
/// Posts JSON bodies to the relay, which forwards them to the studio's inbox.
/// One attempt per call, no retries; the transport's default timeout applies.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use vastucraft::{ContactInquiry, FormRelay, FORM_RELAY_ENDPOINT};
///
/// let relay = FormRelay::new("your-access-key".to_string(), FORM_RELAY_ENDPOINT.to_string());
///
/// relay.submit_inquiry(&ContactInquiry {
///     name: "Rohan".to_string(),
///     email: "rohan@example.com".to_string(),
///     phone: None,
///     service: "Vastu Consulting".to_string(),
///     message: "Looking for a site visit next week.".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FormRelay {
    access_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl FormRelay {
    pub fn new(access_key: String, endpoint: String) -> Self {
        Self {
            access_key,
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a contact-form inquiry
    ///
    /// Unlike concierge leads, failures are returned so the form can show them.
    pub async fn submit_inquiry(&self, inquiry: &ContactInquiry) -> Result<RelayResponse> {
        inquiry.validate()?;
        let payload = InquiryPayload {
            access_key: &self.access_key,
            subject: "New Inquiry | VastuCraft AI",
            from_name: WEBSITE_SENDER,
            inquiry,
        };
        self.post(&payload).await
    }

    /// Post any serializable body and interpret the relay's answer
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] - If the HTTP request fails
    /// - [`Error::Response`] - On a non-success status or `success: false`
    /// - [`Error::Parse`] - If the acknowledgement can't be parsed
    pub async fn post<T: Serialize + ?Sized>(&self, body: &T) -> Result<RelayResponse> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<RelayResponse>(&text) {
            Ok(ack) if ack.success && status.is_success() => Ok(ack),
            Ok(ack) => Err(Error::Response(
                ack.message
                    .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
                Some(status.as_u16()),
            )),
            Err(_) if !status.is_success() => Err(Error::Response(text, Some(status.as_u16()))),
            Err(e) => Err(Error::Parse(e)),
        }
    }
}

#[async_trait]
impl LeadSink for FormRelay {
    async fn submit(&self, lead: &LeadSubmission, summary: Option<&str>) -> Result<()> {
        let payload = FormPayload::for_lead(&self.access_key, lead, summary);
        let ack = self.post(&payload).await?;
        tracing::debug!(relay_message = ?ack.message, "Form relay accepted lead");
        Ok(())
    }
}
