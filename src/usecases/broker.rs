//! The single coordination point of a chat.
//!
//! A [`Broker`] owns the [`ChatLog`], the identity registry, and one
//! [`SessionListener`] per active participant. Every operation runs under one
//! lock: the log is mutated first, then the resulting event is delivered to
//! each session in participant registration order before the lock is released,
//! so sessions never observe events from two operations interleaved.

use std::{
    collections::HashMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::domain::{
    chat_log::ChatLog,
    error::ChatError,
    identity::IdentityRegistry,
    message::Message,
    participant::{Participant, ParticipantId},
};

use super::contracts::{SessionFactory, SessionListener};

const PARTICIPANT_ADMITTED: &str = "CHAT_PARTICIPANT_ADMITTED";
const PARTICIPANT_DISMISSED: &str = "CHAT_PARTICIPANT_DISMISSED";
const DISMISS_NOT_REGISTERED: &str = "CHAT_DISMISS_NOT_REGISTERED";
const MESSAGE_APPENDED: &str = "CHAT_MESSAGE_APPENDED";
const ADMIT_REJECTED: &str = "CHAT_ADMIT_REJECTED";
const SEND_REJECTED: &str = "CHAT_SEND_REJECTED";
const LISTENER_FAILED: &str = "CHAT_LISTENER_FAILED";
const LISTENER_PANICKED: &str = "CHAT_LISTENER_PANICKED";
const SESSION_OPEN_PANICKED: &str = "CHAT_SESSION_OPEN_PANICKED";

pub struct Broker {
    inner: Mutex<BrokerInner>,
}

struct BrokerInner {
    identities: IdentityRegistry,
    log: ChatLog,
    sessions: HashMap<ParticipantId, Box<dyn SessionListener>>,
    factory: Box<dyn SessionFactory>,
}

impl Broker {
    pub fn new(factory: impl SessionFactory + 'static) -> Self {
        Self {
            inner: Mutex::new(BrokerInner {
                identities: IdentityRegistry::new(),
                log: ChatLog::new(),
                sessions: HashMap::new(),
                factory: Box::new(factory),
            }),
        }
    }

    /// Admits a new participant and opens its session.
    ///
    /// Every session (the new one included) then receives the updated
    /// participant count, followed by `"<name> has joined the chat!"`.
    ///
    /// # Errors
    /// Returns `ChatError::InvalidName` when `name` is `None`, empty, or blank,
    /// and `ChatError::SessionUnavailable` when the session factory panics.
    /// Nothing is registered and nobody is notified in either case.
    pub fn admit(&self, name: Option<&str>) -> Result<Participant, ChatError> {
        let mut inner = self.lock();

        let participant = match inner.identities.create(name.unwrap_or_default()) {
            Ok(participant) => participant,
            Err(error) => {
                tracing::debug!(code = ADMIT_REJECTED, error = %error, "admission rejected");
                return Err(error);
            }
        };

        // The session is opened before anything is registered, so a factory
        // panic leaves the log and the session map untouched.
        let backlog = inner.log.history();
        let factory = &mut inner.factory;
        let session = match panic::catch_unwind(AssertUnwindSafe(|| {
            factory.open_session(&participant, &backlog)
        })) {
            Ok(session) => session,
            Err(_) => {
                tracing::warn!(
                    code = SESSION_OPEN_PANICKED,
                    participant_id = %participant.id(),
                    "session factory panicked; admission abandoned"
                );
                return Err(ChatError::SessionUnavailable {
                    id: participant.id(),
                });
            }
        };

        inner.log.add_participant(participant.clone())?;
        inner.sessions.insert(participant.id(), session);

        tracing::info!(
            code = PARTICIPANT_ADMITTED,
            participant_id = %participant.id(),
            name = participant.name(),
            active_sessions = inner.sessions.len(),
            "participant admitted"
        );

        inner.broadcast_count();
        let announcement = format!("{} has joined the chat!", participant.name());
        inner.fan_out("server_announcement", |session, _| {
            session.on_server_announcement(&announcement)
        });

        Ok(participant)
    }

    /// Removes `participant` and closes its session.
    ///
    /// Remaining sessions receive the new participant count, then
    /// `"<name> has left the chat!"`. Dismissing a participant that is not
    /// registered changes nothing and notifies nobody. Returns whether the
    /// participant was active.
    pub fn dismiss(&self, participant: &Participant) -> bool {
        let mut inner = self.lock();

        if !inner.log.remove_participant(participant) {
            tracing::debug!(
                code = DISMISS_NOT_REGISTERED,
                participant_id = %participant.id(),
                "dismiss ignored for participant that is not registered"
            );
            return false;
        }
        inner.sessions.remove(&participant.id());

        tracing::info!(
            code = PARTICIPANT_DISMISSED,
            participant_id = %participant.id(),
            name = participant.name(),
            active_sessions = inner.sessions.len(),
            "participant dismissed"
        );

        inner.broadcast_count();
        let announcement = format!("{} has left the chat!", participant.name());
        inner.fan_out("server_announcement", |session, _| {
            session.on_server_announcement(&announcement)
        });

        true
    }

    /// Appends a message from `sender` and delivers it to every session.
    /// Only the sender's own session sees `is_self == true`.
    ///
    /// # Errors
    /// Returns `ChatError::UnknownParticipant` when `sender` is not active;
    /// the history is unchanged and nobody is notified.
    pub fn send(&self, sender: &Participant, content: &str) -> Result<Message, ChatError> {
        let mut inner = self.lock();

        let message = match inner.log.append_message(sender, content) {
            Ok(message) => message,
            Err(error) => {
                tracing::debug!(code = SEND_REJECTED, error = %error, "send rejected");
                return Err(error);
            }
        };

        tracing::debug!(
            code = MESSAGE_APPENDED,
            sequence = message.sequence(),
            sender_id = %sender.id(),
            "message appended"
        );

        let sender_id = sender.id();
        inner.fan_out("message", |session, id| {
            session.on_message(&message, id == sender_id)
        });

        Ok(message)
    }

    pub fn active_session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn participant_count(&self) -> usize {
        self.lock().log.participant_count()
    }

    pub fn message_count(&self) -> usize {
        self.lock().log.message_count()
    }

    /// Active participants in registration order, as of this call.
    pub fn participants(&self) -> Vec<Participant> {
        self.lock().log.participants()
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock().log.history()
    }

    fn lock(&self) -> MutexGuard<'_, BrokerInner> {
        // Factory and listener panics are caught inside the lock, and every
        // operation validates before it mutates, so a poisoned guard still
        // holds a state where the log and the session map agree.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Broker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Broker")
            .field("participants", &inner.log.participant_count())
            .field("messages", &inner.log.message_count())
            .field("active_sessions", &inner.sessions.len())
            .finish_non_exhaustive()
    }
}

impl BrokerInner {
    fn broadcast_count(&mut self) {
        let count = self.log.participant_count();
        self.fan_out("participant_count", |session, _| {
            session.on_participant_count_changed(count)
        });
    }

    /// Delivers one event to every session in registration order. A session
    /// that fails or panics is logged and skipped.
    fn fan_out<F>(&mut self, event: &'static str, mut notify: F)
    where
        F: FnMut(&mut dyn SessionListener, ParticipantId) -> anyhow::Result<()>,
    {
        let Self { log, sessions, .. } = self;

        for participant in log.participants_in_order() {
            let id = participant.id();
            let Some(session) = sessions.get_mut(&id) else {
                continue;
            };

            match panic::catch_unwind(AssertUnwindSafe(|| notify(session.as_mut(), id))) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => tracing::warn!(
                    code = LISTENER_FAILED,
                    event,
                    participant_id = %id,
                    error = %error,
                    "session listener failed; continuing delivery"
                ),
                Err(_) => tracing::warn!(
                    code = LISTENER_PANICKED,
                    event,
                    participant_id = %id,
                    "session listener panicked; continuing delivery"
                ),
            }
        }
    }
}
