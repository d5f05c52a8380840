//! UI layer: a line-oriented console standing in for per-user chat windows.

pub mod console;
pub mod event_source;
pub mod name_prompt;
pub mod shell;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
