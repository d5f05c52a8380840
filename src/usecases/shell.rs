use std::sync::Arc;

use anyhow::Result;

use crate::domain::{
    error::ChatError, events::AppEvent, participant::Participant, shell_state::ShellState,
};

use super::{
    broker::Broker,
    contracts::{NameSource, ShellOrchestrator},
};

pub const USAGE: &str =
    "commands: /join [name], /leave <name>, /say <name> <text> (or <name>: <text>), /who, /history, /quit";

/// Drives a shared broker from console intents on behalf of every local user.
pub struct ChatOrchestrator<N>
where
    N: NameSource,
{
    state: ShellState,
    broker: Arc<Broker>,
    names: N,
}

impl<N> ChatOrchestrator<N>
where
    N: NameSource,
{
    pub fn new(broker: Arc<Broker>, names: N) -> Self {
        Self {
            state: ShellState::default(),
            broker,
            names,
        }
    }

    fn join(&mut self, name: Option<String>) -> Result<()> {
        let name = match name {
            Some(name) => Some(name),
            None => self.names.request_name()?,
        };

        match self.broker.admit(name.as_deref()) {
            Ok(participant) => {
                tracing::debug!(participant_id = %participant.id(), "console user joined");
            }
            Err(ChatError::InvalidName) => {
                self.state
                    .push_notice("A non-empty name is required to add a user.");
            }
            Err(error) => self.state.push_notice(error.to_string()),
        }

        Ok(())
    }

    fn leave(&mut self, name: &str) {
        let Some(participant) = self.find_active(name) else {
            self.state
                .push_notice(format!("No active user named \"{name}\"."));
            return;
        };

        self.broker.dismiss(&participant);

        if self.broker.active_session_count() == 0 {
            tracing::info!("last session closed; stopping console shell");
            self.state.stop();
        }
    }

    fn say(&mut self, from: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let Some(sender) = self.find_active(from) else {
            self.state
                .push_notice(format!("No active user named \"{from}\"."));
            return;
        };

        if let Err(error) = self.broker.send(&sender, text) {
            self.state.push_notice(error.to_string());
        }
    }

    fn roster(&mut self) {
        let participants = self.broker.participants();
        let names: Vec<_> = participants.iter().map(Participant::name).collect();

        self.state.push_notice(format!(
            "Current User Count: {} ({})",
            participants.len(),
            names.join(", ")
        ));
    }

    fn history(&mut self) {
        let history = self.broker.history();
        if history.is_empty() {
            self.state.push_notice("No messages yet.");
            return;
        }

        for message in history {
            self.state
                .push_notice(format!("#{} {}", message.sequence(), message.display_line()));
        }
    }

    /// Console users are addressed by name; the earliest registered match wins.
    fn find_active(&self, name: &str) -> Option<Participant> {
        let name = name.trim();
        self.broker
            .participants()
            .into_iter()
            .find(|participant| participant.name() == name)
    }
}

impl<N> ShellOrchestrator for ChatOrchestrator<N>
where
    N: NameSource,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::JoinRequested(name) => self.join(name)?,
            AppEvent::LeaveRequested(name) => self.leave(&name),
            AppEvent::MessageSubmitted { from, text } => self.say(&from, &text),
            AppEvent::RosterRequested => self.roster(),
            AppEvent::HistoryRequested => self.history(),
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::Unrecognized(input) => {
                self.state
                    .push_notice(format!("Unrecognized input \"{input}\"; {USAGE}"));
            }
        }

        Ok(())
    }
}
