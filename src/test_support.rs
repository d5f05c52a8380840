use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{bail, Result};

use crate::{
    domain::{message::Message, participant::Participant},
    usecases::contracts::{SessionFactory, SessionListener},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Opened {
        backlog: usize,
    },
    Count(usize),
    Message {
        sequence: u64,
        text: String,
        is_self: bool,
    },
    Announcement(String),
}

impl Notification {
    pub fn message(message: &Message, is_self: bool) -> Self {
        Self::Message {
            sequence: message.sequence(),
            text: message.display_line(),
            is_self,
        }
    }

    pub fn sequence(&self) -> Option<u64> {
        match self {
            Self::Message { sequence, .. } => Some(*sequence),
            _ => None,
        }
    }
}

/// Every notification delivered to recording sessions, tagged with the
/// session owner's name, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<(String, Notification)>>>);

impl Journal {
    fn lock(&self) -> MutexGuard<'_, Vec<(String, Notification)>> {
        self.0.lock().expect("journal lock should not be poisoned")
    }

    fn record(&self, owner: &str, notification: Notification) {
        self.lock().push((owner.to_owned(), notification));
    }

    pub fn entries(&self) -> Vec<(String, Notification)> {
        self.lock().clone()
    }

    pub fn for_session(&self, owner: &str) -> Vec<Notification> {
        self.lock()
            .iter()
            .filter(|(name, _)| name == owner)
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    pub fn last_count(&self, owner: &str) -> Option<usize> {
        self.for_session(owner)
            .into_iter()
            .rev()
            .find_map(|notification| match notification {
                Notification::Count(count) => Some(count),
                _ => None,
            })
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Error,
    Panic,
    /// The factory itself panics while opening the session.
    PanicOnOpen,
}

pub struct RecordingFactory {
    journal: Journal,
    failures: HashMap<String, Failure>,
}

impl RecordingFactory {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            failures: HashMap::new(),
        }
    }

    /// Sessions opened for `name` misbehave on every notification.
    pub fn failing(mut self, name: &str, failure: Failure) -> Self {
        self.failures.insert(name.to_owned(), failure);
        self
    }
}

impl SessionFactory for RecordingFactory {
    fn open_session(
        &mut self,
        participant: &Participant,
        backlog: &[Message],
    ) -> Box<dyn SessionListener> {
        let failure = self.failures.get(participant.name()).copied();
        if failure == Some(Failure::PanicOnOpen) {
            panic!("session factory refused {}", participant.name());
        }
        if failure.is_none() {
            self.journal.record(
                participant.name(),
                Notification::Opened {
                    backlog: backlog.len(),
                },
            );
        }

        Box::new(RecordingSession {
            owner: participant.name().to_owned(),
            journal: self.journal.clone(),
            failure,
        })
    }
}

struct RecordingSession {
    owner: String,
    journal: Journal,
    failure: Option<Failure>,
}

impl RecordingSession {
    fn deliver(&self, notification: Notification) -> Result<()> {
        match self.failure {
            Some(Failure::Error) => bail!("session for {} is broken", self.owner),
            Some(Failure::Panic | Failure::PanicOnOpen) => {
                panic!("session for {} panicked", self.owner)
            }
            None => {
                self.journal.record(&self.owner, notification);
                Ok(())
            }
        }
    }
}

impl SessionListener for RecordingSession {
    fn on_participant_count_changed(&mut self, count: usize) -> Result<()> {
        self.deliver(Notification::Count(count))
    }

    fn on_message(&mut self, message: &Message, is_self: bool) -> Result<()> {
        self.deliver(Notification::message(message, is_self))
    }

    fn on_server_announcement(&mut self, text: &str) -> Result<()> {
        self.deliver(Notification::Announcement(text.to_owned()))
    }
}
