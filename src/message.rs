use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The concierge
    Bot,
    /// The visitor answering the questions
    User,
}

impl Sender {
    /// Label used when rendering or exporting a transcript
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Bot => "bot",
            Sender::User => "user",
        }
    }
}

/// One message in a concierge transcript
///
/// Entries are created by the engine and never edited afterwards. The text is
/// stored exactly as it was typed or generated.
///
/// # Example
///
/// ```rust
/// use vastucraft::{Sender, TranscriptEntry};
///
/// let entry = TranscriptEntry::user("  Priya ");
/// assert_eq!(entry.sender, Sender::User);
/// assert_eq!(entry.text, "  Priya ");
/// assert!(!entry.is_bot());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique identifier, used by renderers as a stable key
    pub id: Uuid,
    /// Author of the message
    pub sender: Sender,
    /// Literal message content
    pub text: String,
    /// When the entry was appended
    pub sent_at: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Create a bot-authored entry
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into())
    }

    /// Create a user-authored entry
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into())
    }

    fn new(sender: Sender, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text,
            sent_at: Utc::now(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
