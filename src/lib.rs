/*!
Lead-intake concierge and Vastu Q&A assistant for the VastuCraft studio.

The heart of the crate is [`ConversationEngine`], a guided five-question
conversation that collects a prospective client's name, project location, plot
size, requirements and contact details, then hands the completed lead to a
[`LeadSink`]. Around it sit:

- [`ConciergeSession`]: runs an engine with a cancelable "typing" pause before each reply
- [`FormRelay`]: the production sink, posting leads and contact-form inquiries to a form relay
- [`VastuAssistant`]: a stateless client for free-form Vastu questions
- [`Config`]: environment-driven settings for all of the above

## Quick Start

```rust,no_run
# async fn example() -> Result<(), Box<dyn std::error::Error>> {
use vastucraft::{ConversationEngine, FormRelay, FORM_RELAY_ENDPOINT};
use std::sync::Arc;

let relay = FormRelay::new("your-access-key".to_string(), FORM_RELAY_ENDPOINT.to_string());
let mut engine = ConversationEngine::new(Arc::new(relay));

for answer in ["Priya", "Ahmedabad", "1800 sq ft", "3BHK villa, Vastu-compliant", "priya@example.com"] {
    engine.submit_answer(answer).await;
}

for entry in engine.transcript() {
    println!("{}: {}", entry.sender.as_str(), entry.text);
}
# Ok(())
# }
```

Submission problems never surface as errors from the engine: the visitor
always reaches the final acknowledgement, only its wording changes.
*/

pub use assistant::{
    AssistantReply, LeadSummarizer, VastuAssistant, DEFAULT_MODEL, GENERATIVE_LANGUAGE_BASE,
};
pub use config::Config;
pub use engine::{ConversationEngine, PendingReply, ReplyOutcome, GREETING, STEP_COUNT};
pub use error::{Error, Result};
pub use message::{Sender, TranscriptEntry};
pub use relay::{ContactInquiry, FormPayload, FormRelay, RelayResponse, FORM_RELAY_ENDPOINT};
pub use request::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    UsageMetadata,
};
pub use session::{ConciergeSession, DEFAULT_TYPING_DELAY};
pub use sink::{LeadSink, LeadSubmission, LoggingSink};
pub use state::{CollectedFields, ConversationState, FieldKey};

pub mod assistant;
pub mod config;
pub mod engine;
pub mod error;
pub mod message;
pub mod relay;
pub mod request;
pub mod session;
pub mod sink;
pub mod state;
