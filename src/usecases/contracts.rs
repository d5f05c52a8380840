use anyhow::Result;

use crate::domain::{
    events::AppEvent, message::Message, participant::Participant, shell_state::ShellState,
};

/// Outward push channel for one participant's session.
///
/// Invoked synchronously by the broker while it holds its lock, so an
/// implementation must not call back into the same broker. An `Err` (or a
/// panic) is logged by the broker and does not stop delivery to other sessions.
pub trait SessionListener: Send {
    fn on_participant_count_changed(&mut self, count: usize) -> Result<()>;
    fn on_message(&mut self, message: &Message, is_self: bool) -> Result<()>;
    fn on_server_announcement(&mut self, text: &str) -> Result<()>;
}

/// Opens the session bound to a newly admitted participant.
///
/// `backlog` is the history as it stood at admission time.
pub trait SessionFactory: Send {
    fn open_session(
        &mut self,
        participant: &Participant,
        backlog: &[Message],
    ) -> Box<dyn SessionListener>;
}

/// Name-acquisition boundary. `Ok(None)` means no value was provided.
pub trait NameSource {
    fn request_name(&mut self) -> Result<Option<String>>;
}

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn state_mut(&mut self) -> &mut ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}
