//! Domain layer: participants, messages, and the chat log.

pub mod chat_log;
pub mod error;
pub mod events;
pub mod identity;
pub mod message;
pub mod participant;
pub mod shell_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
