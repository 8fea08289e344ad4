//! The guided lead-intake conversation.
//!
//! A [`ConversationEngine`] asks five fixed questions in order, records one
//! answer per question and, after the last one, hands the lead to a
//! [`LeadSink`]. Answering is split in two phases so a presentation layer can
//! show a typing indicator in between: [`accept_answer`] records the user's
//! message immediately, [`deliver_reply`] appends the concierge's reply later.
//! [`submit_answer`] runs both back to back.
//!
//! [`accept_answer`]: ConversationEngine::accept_answer
//! [`deliver_reply`]: ConversationEngine::deliver_reply
//! [`submit_answer`]: ConversationEngine::submit_answer

use crate::assistant::LeadSummarizer;
use crate::error::{Error, Result};
use crate::message::TranscriptEntry;
use crate::sink::{LeadSink, LeadSubmission};
use crate::state::{CollectedFields, ConversationState, FieldKey};
use std::sync::Arc;

/// Number of questions in the intake
pub const STEP_COUNT: usize = FieldKey::ALL.len();

/// First message of every conversation
pub const GREETING: &str = "Namaste! I'm your VastuCraft Concierge. Let's start planning your dream project. What is your name?";

/// Studio phone number offered when a lead could not be forwarded
pub const STUDIO_PHONE: &str = "+91-9104518311";

const LOCATION_PROMPT: &str = "Pleasure to meet you, {name}. Where is your project located? (City/Area)";
const PLOT_SIZE_PROMPT: &str = "Great location! Now, what is the approximate plot size or built-up area? (e.g., 1200 sq ft)";
const REQUIREMENTS_PROMPT: &str = "Got it. Finally, tell me a bit about your vision or requirements. Are you looking for a modern home, office, or specific Vastu compliance?";
const CONTACT_PROMPT: &str = "Thank you. Lastly, how can we reach you? Please share your Email or Phone Number so we can send you the detailed report.";

/// Handle for a reply that has been earned but not yet delivered
///
/// Carries the step it answers and the engine epoch it was minted in, so a
/// reply scheduled before a [`reset`](ConversationEngine::reset) is recognised
/// as stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    step: usize,
    epoch: u64,
}

impl PendingReply {
    pub fn step(&self) -> usize {
        self.step
    }
}

/// What [`ConversationEngine::deliver_reply`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The next question was asked
    Prompted,
    /// The lead was accepted by the sink and the conversation completed
    Submitted,
    /// The sink failed; the conversation still completed with a softer message
    SubmissionFailed,
    /// The reply belonged to an earlier conversation and was discarded
    Stale,
}

/// Five-step lead-intake state machine
///
/// # Example
///
/// ```rust
/// # async fn example() {
/// use vastucraft::{ConversationEngine, LoggingSink};
/// use std::sync::Arc;
///
/// let mut engine = ConversationEngine::new(Arc::new(LoggingSink));
///
/// for answer in ["Priya", "Ahmedabad", "1800 sq ft", "3BHK villa", "priya@example.com"] {
///     assert!(engine.submit_answer(answer).await);
/// }
///
/// assert!(engine.is_complete());
/// assert!(!engine.submit_answer("anything else").await);
/// # }
/// ```
pub struct ConversationEngine {
    state: ConversationState,
    sink: Arc<dyn LeadSink>,
    summarizer: Option<Arc<dyn LeadSummarizer>>,
    epoch: u64,
}

impl ConversationEngine {
    /// Start a conversation that will deliver its lead to `sink`
    pub fn new(sink: Arc<dyn LeadSink>) -> Self {
        Self {
            state: ConversationState::new(),
            sink,
            summarizer: None,
            epoch: 0,
        }
    }

    /// Attach a summarizer whose output travels with the lead
    ///
    /// The summary is best effort: if it fails the lead is submitted without it.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn LeadSummarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.state.transcript
    }

    pub fn collected_fields(&self) -> &CollectedFields {
        &self.state.collected_fields
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    /// True once the contact step has been answered and the lead handled
    pub fn is_complete(&self) -> bool {
        self.state.current_step >= STEP_COUNT
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.state.is_awaiting_response
    }

    /// Record an answer for the current step
    ///
    /// Blank input, input while a reply is still pending and input after
    /// completion are ignored and leave the state untouched. Accepted text is
    /// stored verbatim; only its non-blankness is checked.
    pub fn accept_answer(&mut self, raw: &str) -> Option<PendingReply> {
        if raw.trim().is_empty() || self.state.is_awaiting_response {
            return None;
        }
        let key = FieldKey::for_step(self.state.current_step)?;

        self.state.transcript.push(TranscriptEntry::user(raw));
        self.state.collected_fields.record(key, raw.to_string());
        self.state.is_awaiting_response = true;

        Some(PendingReply {
            step: self.state.current_step,
            epoch: self.epoch,
        })
    }

    /// Append the concierge's reply for a previously accepted answer
    ///
    /// For the first four steps this asks the next question. For the contact
    /// step it submits the lead, once, and appends the acknowledgement. Either
    /// way the step advances and the typing flag clears.
    pub async fn deliver_reply(&mut self, pending: PendingReply) -> ReplyOutcome {
        if pending.epoch != self.epoch
            || pending.step != self.state.current_step
            || !self.state.is_awaiting_response
        {
            tracing::warn!(
                step = pending.step,
                epoch = pending.epoch,
                current_epoch = self.epoch,
                "Discarding reply scheduled for an earlier conversation"
            );
            return ReplyOutcome::Stale;
        }

        let outcome = match self.prompt_after(pending.step) {
            Some(prompt) => {
                self.state.transcript.push(TranscriptEntry::bot(prompt));
                ReplyOutcome::Prompted
            }
            None => self.finalize().await,
        };

        self.state.current_step += 1;
        self.state.is_awaiting_response = false;
        outcome
    }

    /// Accept an answer and deliver the reply without any delay
    ///
    /// Returns `false` if the answer was ignored.
    pub async fn submit_answer(&mut self, raw: &str) -> bool {
        match self.accept_answer(raw) {
            Some(pending) => {
                self.deliver_reply(pending).await;
                true
            }
            None => false,
        }
    }

    /// Throw the conversation away and greet again
    ///
    /// Any [`PendingReply`] handed out before this call becomes stale.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = ConversationState::new();
    }

    fn prompt_after(&self, step: usize) -> Option<String> {
        match step {
            0 => {
                let name = self.state.collected_fields.get(FieldKey::Name).unwrap_or_default();
                Some(LOCATION_PROMPT.replace("{name}", name))
            }
            1 => Some(PLOT_SIZE_PROMPT.to_string()),
            2 => Some(REQUIREMENTS_PROMPT.to_string()),
            3 => Some(CONTACT_PROMPT.to_string()),
            _ => None,
        }
    }

    async fn finalize(&mut self) -> ReplyOutcome {
        let lead = LeadSubmission::from_fields(&self.state.collected_fields);

        let result = match &lead {
            Some(lead) => self.submit_lead(lead).await,
            None => Err(Error::Other("Intake finished with missing fields".to_string())),
        };

        let name = self.state.collected_fields.get(FieldKey::Name).unwrap_or_default();
        let location = self.state.collected_fields.get(FieldKey::Location).unwrap_or_default();

        match result {
            Ok(()) => {
                tracing::info!(name = %name, location = %location, "Lead submitted");
                let contact = self.state.collected_fields.get(FieldKey::Contact).unwrap_or_default();
                let text = format!(
                    "Thank you, {}! I've securely recorded your project details. Ar. Vidhi Gajjar and our team will review your requirements for {} and contact you at {} shortly to discuss the next steps.",
                    name, location, contact
                );
                self.state.transcript.push(TranscriptEntry::bot(text));
                ReplyOutcome::Submitted
            }
            Err(e) => {
                tracing::error!(error = %e, name = %name, "Failed to submit lead");
                let text = format!(
                    "Thank you, {}! I've noted your details for {}, but there was a slight issue sending them to our server. Please feel free to call us directly at {}!",
                    name, location, STUDIO_PHONE
                );
                self.state.transcript.push(TranscriptEntry::bot(text));
                ReplyOutcome::SubmissionFailed
            }
        }
    }

    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<()> {
        let summary = match &self.summarizer {
            Some(summarizer) => match summarizer.summarize(lead).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "Lead summary unavailable, submitting without it");
                    None
                }
            },
            None => None,
        };

        self.sink.submit(lead, summary.as_deref()).await
    }
}
