//! Append-only message history plus the current participant set.

use super::{error::ChatError, message::Message, participant::Participant};

/// Owned chat state. Participants keep registration order; history keeps
/// strictly increasing `sequence` and is never rewritten.
#[derive(Debug)]
pub struct ChatLog {
    participants: Vec<Participant>,
    history: Vec<Message>,
    next_sequence: u64,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            history: Vec::new(),
            next_sequence: 1,
        }
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_participant(&mut self, participant: Participant) -> Result<(), ChatError> {
        if self.contains(&participant) {
            return Err(ChatError::DuplicateParticipant {
                id: participant.id(),
            });
        }

        self.participants.push(participant);
        Ok(())
    }

    /// Removes `participant` if present. Returns whether anything was removed;
    /// removing an absent participant is not an error.
    pub fn remove_participant(&mut self, participant: &Participant) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != participant);
        self.participants.len() != before
    }

    pub fn contains(&self, participant: &Participant) -> bool {
        self.participants.iter().any(|p| p == participant)
    }

    /// The single write path for chat content.
    ///
    /// # Errors
    /// Returns `ChatError::UnknownParticipant` if `sender` is not currently a
    /// participant; the history and sequence counter are left untouched.
    pub fn append_message(
        &mut self,
        sender: &Participant,
        content: &str,
    ) -> Result<Message, ChatError> {
        if !self.contains(sender) {
            return Err(ChatError::UnknownParticipant { id: sender.id() });
        }

        let message = Message::new(sender.clone(), content.to_owned(), self.next_sequence);
        self.next_sequence += 1;
        self.history.push(message.clone());

        Ok(message)
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    pub fn history(&self) -> Vec<Message> {
        self.history.clone()
    }

    pub(crate) fn participants_in_order(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn message_count(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::IdentityRegistry;

    fn people(names: &[&str]) -> Vec<Participant> {
        let mut registry = IdentityRegistry::new();
        names
            .iter()
            .map(|name| registry.create(name).expect("name is valid"))
            .collect()
    }

    #[test]
    fn keeps_registration_order() {
        let mut log = ChatLog::new();
        let group = people(&["Alice", "Bob", "Carol"]);
        for p in &group {
            log.add_participant(p.clone()).expect("first registration");
        }

        assert_eq!(log.participants(), group);
        assert_eq!(log.participant_count(), 3);
    }

    #[test]
    fn rejects_duplicate_registration() {
        let mut log = ChatLog::new();
        let alice = people(&["Alice"]).remove(0);
        log.add_participant(alice.clone()).expect("first registration");

        let result = log.add_participant(alice.clone());

        assert_eq!(
            result,
            Err(ChatError::DuplicateParticipant { id: alice.id() })
        );
        assert_eq!(log.participant_count(), 1);
    }

    #[test]
    fn removing_absent_participant_is_a_no_op() {
        let mut log = ChatLog::new();
        let group = people(&["Alice", "Bob"]);
        log.add_participant(group[0].clone()).expect("registration");

        assert!(!log.remove_participant(&group[1]));
        assert!(log.remove_participant(&group[0]));
        assert!(!log.remove_participant(&group[0]));
        assert_eq!(log.participant_count(), 0);
    }

    #[test]
    fn append_assigns_increasing_sequence_numbers() {
        let mut log = ChatLog::new();
        let alice = people(&["Alice"]).remove(0);
        log.add_participant(alice.clone()).expect("registration");

        let first = log.append_message(&alice, "one").expect("sender is active");
        let second = log.append_message(&alice, "two").expect("sender is active");

        assert_eq!(first.sequence(), 1);
        assert_eq!(second.sequence(), 2);
        assert_eq!(log.message_count(), 2);
    }

    #[test]
    fn append_rejects_unknown_sender_without_consuming_sequence() {
        let mut log = ChatLog::new();
        let group = people(&["Alice", "Mallory"]);
        log.add_participant(group[0].clone()).expect("registration");

        let result = log.append_message(&group[1], "hello");
        let next = log.append_message(&group[0], "hi").expect("sender is active");

        assert_eq!(
            result,
            Err(ChatError::UnknownParticipant { id: group[1].id() })
        );
        assert_eq!(next.sequence(), 1);
        assert_eq!(log.message_count(), 1);
    }

    #[test]
    fn history_survives_sender_leaving() {
        let mut log = ChatLog::new();
        let alice = people(&["Alice"]).remove(0);
        log.add_participant(alice.clone()).expect("registration");
        log.append_message(&alice, "bye").expect("sender is active");

        log.remove_participant(&alice);

        let history = log.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender(), &alice);
    }

    #[test]
    fn snapshots_are_not_affected_by_later_mutations() {
        let mut log = ChatLog::new();
        let group = people(&["Alice", "Bob"]);
        log.add_participant(group[0].clone()).expect("registration");
        log.append_message(&group[0], "first").expect("sender is active");

        let participants = log.participants();
        let history = log.history();

        log.add_participant(group[1].clone()).expect("registration");
        log.append_message(&group[1], "second").expect("sender is active");
        log.remove_participant(&group[0]);

        assert_eq!(participants, vec![group[0].clone()]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content(), "first");
    }
}
