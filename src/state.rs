use crate::engine::GREETING;
use crate::error::{Error, Result};
use crate::message::TranscriptEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The five questions of the intake, in the order they are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    Location,
    PlotSize,
    Requirements,
    Contact,
}

impl FieldKey {
    /// All keys in step order
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Name,
        FieldKey::Location,
        FieldKey::PlotSize,
        FieldKey::Requirements,
        FieldKey::Contact,
    ];

    /// Key collected at the given zero-based step, if that step collects one
    pub fn for_step(step: usize) -> Option<FieldKey> {
        Self::ALL.get(step).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Location => "location",
            FieldKey::PlotSize => "plotSize",
            FieldKey::Requirements => "requirements",
            FieldKey::Contact => "contact",
        }
    }
}

/// Answers collected so far, keyed by the question they answer
///
/// Only the engine inserts values, and only for the key of the step being
/// answered, so keys are always a prefix of [`FieldKey::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedFields(BTreeMap<FieldKey, String>);

impl CollectedFields {
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over populated fields in step order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub(crate) fn record(&mut self, key: FieldKey, value: String) {
        self.0.insert(key, value);
    }
}

/// Everything one concierge conversation has accumulated
///
/// `current_step` ranges over `0..=5`: values below five name the question
/// being waited on, five means the lead was submitted and the conversation is
/// idle until reset.
///
/// # Example
///
/// ```rust
/// use vastucraft::ConversationState;
///
/// let state = ConversationState::new();
/// assert_eq!(state.current_step, 0);
/// assert_eq!(state.transcript.len(), 1);
/// assert!(state.collected_fields.is_empty());
/// assert!(!state.is_awaiting_response);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub current_step: usize,
    pub collected_fields: CollectedFields,
    pub transcript: Vec<TranscriptEntry>,
    pub is_awaiting_response: bool,
}

impl ConversationState {
    /// Fresh state seeded with the concierge greeting
    pub fn new() -> Self {
        Self {
            current_step: 0,
            collected_fields: CollectedFields::default(),
            transcript: vec![TranscriptEntry::bot(GREETING)],
            is_awaiting_response: false,
        }
    }

    /// Write the state as pretty JSON, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Other(format!("Failed to create history directory: {}", e)))?;
        }

        let json_data = serde_json::to_string_pretty(self)?;
        fs::write(path, json_data)
            .map_err(|e| Error::Other(format!("Failed to write transcript file: {}", e)))?;
        Ok(())
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
