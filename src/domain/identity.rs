use uuid::Uuid;

use super::{
    error::ChatError,
    participant::{Participant, ParticipantId},
};

/// Mints participants whose ids are never repeated for the lifetime of the
/// registry. Only a counter is kept, not the issued ids.
#[derive(Debug)]
pub struct IdentityRegistry {
    registry: Uuid,
    issued: u64,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self {
            registry: Uuid::new_v4(),
            issued: 0,
        }
    }
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a participant named `name` (surrounding whitespace trimmed).
    ///
    /// # Errors
    /// Returns `ChatError::InvalidName` for an empty or whitespace-only name;
    /// no id is issued in that case.
    pub fn create(&mut self, name: &str) -> Result<Participant, ChatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChatError::InvalidName);
        }

        self.issued += 1;
        let id = ParticipantId::new(self.registry, self.issued);

        Ok(Participant::new(id, name.to_owned()))
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn issued_count(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn creates_participant_with_trimmed_name() {
        let mut registry = IdentityRegistry::new();

        let participant = registry.create("  Alice \n").expect("name is valid");

        assert_eq!(participant.name(), "Alice");
        assert_eq!(registry.issued_count(), 1);
    }

    #[test]
    fn rejects_empty_name_without_issuing_id() {
        let mut registry = IdentityRegistry::new();

        assert_eq!(registry.create(""), Err(ChatError::InvalidName));
        assert_eq!(registry.issued_count(), 0);
    }

    #[test]
    fn rejects_whitespace_only_name() {
        let mut registry = IdentityRegistry::new();

        assert_eq!(registry.create(" \t\n "), Err(ChatError::InvalidName));
    }

    #[test]
    fn issues_distinct_ids_for_identical_names() {
        let mut registry = IdentityRegistry::new();

        let ids: HashSet<_> = (0..100)
            .map(|_| registry.create("Alice").expect("name is valid").id())
            .collect();

        assert_eq!(ids.len(), 100);
        assert_eq!(registry.issued_count(), 100);
    }

    #[test]
    fn separate_registries_do_not_share_ids() {
        let mut first = IdentityRegistry::new();
        let mut second = IdentityRegistry::new();

        let a = first.create("Alice").expect("name is valid");
        let b = second.create("Alice").expect("name is valid");

        assert_ne!(a.id(), b.id());
    }
}
