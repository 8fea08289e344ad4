use crate::error::Result;
use crate::state::{CollectedFields, FieldKey};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A completed intake, ready to be handed to a [`LeadSink`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub location: String,
    pub plot_size: String,
    pub requirements: String,
    pub contact: String,
}

impl LeadSubmission {
    /// Build a submission from collected answers
    ///
    /// Returns `None` unless all five fields are present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vastucraft::{CollectedFields, LeadSubmission};
    ///
    /// assert!(LeadSubmission::from_fields(&CollectedFields::default()).is_none());
    /// ```
    pub fn from_fields(fields: &CollectedFields) -> Option<Self> {
        Some(Self {
            name: fields.get(FieldKey::Name)?.to_string(),
            location: fields.get(FieldKey::Location)?.to_string(),
            plot_size: fields.get(FieldKey::PlotSize)?.to_string(),
            requirements: fields.get(FieldKey::Requirements)?.to_string(),
            contact: fields.get(FieldKey::Contact)?.to_string(),
        })
    }

    /// Plain-text rendering for mail clients that ignore structured fields
    pub fn fallback_message(&self) -> String {
        format!(
            "New Lead Details:\n\
             --------------------------------\n\
             Name: {}\n\
             Location: {}\n\
             Plot Size: {}\n\
             Requirements: {}\n\
             Contact Info: {}\n\
             \n\
             Status: Pending Manual Review\n",
            self.name, self.location, self.plot_size, self.requirements, self.contact
        )
    }
}

/// Destination for completed leads
///
/// The engine calls [`submit`](LeadSink::submit) exactly once per completed
/// conversation and never retries. Any `Err` switches the engine to its
/// degraded acknowledgement; the conversation still completes.
///
/// # Built-in Implementations
///
/// - [`FormRelay`](crate::FormRelay): posts the lead to the form-relay service
/// - [`LoggingSink`]: logs the lead and reports success (dry runs)
///
/// # Example
///
/// ```rust
/// use vastucraft::{LeadSink, LeadSubmission, Result};
/// use async_trait::async_trait;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct InMemorySink {
///     leads: Mutex<Vec<LeadSubmission>>,
/// }
///
/// #[async_trait]
/// impl LeadSink for InMemorySink {
///     async fn submit(&self, lead: &LeadSubmission, _summary: Option<&str>) -> Result<()> {
///         self.leads.lock().unwrap().push(lead.clone());
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Deliver one lead, optionally with an AI-written summary attached
    async fn submit(&self, lead: &LeadSubmission, summary: Option<&str>) -> Result<()>;
}

/// Sink that only logs leads
///
/// Used when no relay access key is configured so the concierge can still be
/// exercised end to end.
pub struct LoggingSink;

#[async_trait]
impl LeadSink for LoggingSink {
    async fn submit(&self, lead: &LeadSubmission, summary: Option<&str>) -> Result<()> {
        tracing::info!(
            name = %lead.name,
            location = %lead.location,
            plot_size = %lead.plot_size,
            contact = %lead.contact,
            has_summary = summary.is_some(),
            "Lead captured (dry run, not forwarded)"
        );
        Ok(())
    }
}
