use thiserror::Error;

use super::participant::ParticipantId;

/// Failures surfaced by the chat core. None of them leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("participant name must not be missing, empty, or blank")]
    InvalidName,
    #[error("participant {id} is not registered in this chat")]
    UnknownParticipant { id: ParticipantId },
    #[error("participant {id} is already registered in this chat")]
    DuplicateParticipant { id: ParticipantId },
    #[error("no session could be opened for participant {id}")]
    SessionUnavailable { id: ParticipantId },
}
