use std::{
    fmt,
    hash::{Hash, Hasher},
};

use uuid::Uuid;

/// Opaque participant identity. Compared by value, never by name.
///
/// `registry` is random per identity registry and `serial` counts up within
/// it, so one registry never repeats an id and two registries collide only if
/// their v4 uuids do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId {
    registry: Uuid,
    serial: u64,
}

impl ParticipantId {
    pub(crate) fn new(registry: Uuid, serial: u64) -> Self {
        Self { registry, serial }
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.registry.simple(), self.serial)
    }
}

/// A uniquely identified chat member. Immutable once minted by the identity registry.
#[derive(Debug, Clone)]
pub struct Participant {
    id: ParticipantId,
    name: String,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
