use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, ShellOrchestrator},
    shell::USAGE,
};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        active_sessions = context.broker.active_session_count(),
        "starting console shell"
    );
    println!("{USAGE}");

    while orchestrator.state().is_running() {
        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }

        for notice in orchestrator.state_mut().drain_notices() {
            println!("* {notice}");
        }
    }

    tracing::info!(
        participants = context.broker.participant_count(),
        messages = context.broker.message_count(),
        "console shell stopped"
    );

    Ok(())
}
