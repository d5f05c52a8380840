//! Use case layer: the chat broker and the console workflow around it.

pub mod bootstrap;
pub mod broker;
pub mod context;
pub mod contracts;
pub mod shell;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
