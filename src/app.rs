use std::sync::Arc;

use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain::{self, participant::Participant},
    infra,
    ui::{
        self, console::ConsoleSessionFactory, event_source::LineEventSource,
        name_prompt::PromptNameSource,
    },
    usecases::{self, bootstrap, broker::Broker, contracts::NameSource, shell::ChatOrchestrator},
};

const FIRST_USER_REJECTED: &str = "CHAT_FIRST_USER_REJECTED";

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run { name } => {
            let context = bootstrap::bootstrap(cli.config.as_deref(), |config| {
                ConsoleSessionFactory::new(ui::console::stdout_sink(), config.console.clone())
            })?;

            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let mut names = PromptNameSource::stdio();
            if admit_first_user(&context.broker, name, &mut names)?.is_none() {
                eprintln!("A non-empty name is required to start the chat.");
                return Ok(());
            }

            let mut source = LineEventSource::stdin();
            let mut orchestrator = ChatOrchestrator::new(Arc::clone(&context.broker), names);
            ui::shell::start(&context, &mut source, &mut orchestrator)?;
        }
    }

    Ok(())
}

/// Admits the first user, asking `names` when no name was given up front.
/// Returns `None` when no valid name was provided.
fn admit_first_user(
    broker: &Broker,
    name: Option<String>,
    names: &mut dyn NameSource,
) -> Result<Option<Participant>> {
    let name = match name {
        Some(name) => Some(name),
        None => names.request_name()?,
    };

    match broker.admit(name.as_deref()) {
        Ok(participant) => Ok(Some(participant)),
        Err(error) => {
            tracing::warn!(code = FIRST_USER_REJECTED, error = %error, "first user was not admitted");
            Ok(None)
        }
    }
}
