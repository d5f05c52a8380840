use chrono::{DateTime, Utc};

use super::participant::Participant;

/// A chat message. `sequence` alone defines its position in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Participant,
    content: String,
    sequence: u64,
    sent_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(sender: Participant, content: String, sequence: u64) -> Self {
        Self {
            sender,
            content,
            sequence,
            sent_at: Utc::now(),
        }
    }

    pub fn sender(&self) -> &Participant {
        &self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns the display line: `<sender name>: <content>`.
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.sender().name(), self.content())
    }
}
