//! Console sessions: every participant's view is a stream of `[owner] ...`
//! lines written to one shared sink.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Result;

use crate::{
    domain::{message::Message, participant::Participant},
    infra::config::ConsoleConfig,
    usecases::contracts::{SessionFactory, SessionListener},
};

pub type SharedSink = Arc<Mutex<Box<dyn Write + Send>>>;

pub fn stdout_sink() -> SharedSink {
    Arc::new(Mutex::new(Box::new(io::stdout())))
}

pub struct ConsoleSessionFactory {
    sink: SharedSink,
    config: ConsoleConfig,
}

impl ConsoleSessionFactory {
    pub fn new(sink: SharedSink, config: ConsoleConfig) -> Self {
        Self { sink, config }
    }
}

impl SessionFactory for ConsoleSessionFactory {
    fn open_session(
        &mut self,
        participant: &Participant,
        backlog: &[Message],
    ) -> Box<dyn SessionListener> {
        let mut session = ConsoleSession {
            owner: participant.name().to_owned(),
            sink: Arc::clone(&self.sink),
            show_timestamps: self.config.show_timestamps,
        };

        if self.config.replay_history {
            for message in backlog {
                if let Err(error) = session.on_message(message, false) {
                    tracing::warn!(error = %error, "failed to replay history into new session");
                    break;
                }
            }
        }

        Box::new(session)
    }
}

pub struct ConsoleSession {
    owner: String,
    sink: SharedSink,
    show_timestamps: bool,
}

impl ConsoleSession {
    fn write_line(&self, body: &str) -> Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(sink, "[{}] {}", self.owner, body)?;
        sink.flush()?;
        Ok(())
    }

    fn render_message(&self, message: &Message, is_self: bool) -> String {
        let direction = if is_self { ">" } else { "<" };
        if self.show_timestamps {
            format!(
                "{direction} {} {}",
                message.sent_at().format("%H:%M:%S"),
                message.display_line()
            )
        } else {
            format!("{direction} {}", message.display_line())
        }
    }
}

impl SessionListener for ConsoleSession {
    fn on_participant_count_changed(&mut self, count: usize) -> Result<()> {
        self.write_line(&format!("Current User Count: {count}"))
    }

    fn on_message(&mut self, message: &Message, is_self: bool) -> Result<()> {
        self.write_line(&self.render_message(message, is_self))
    }

    fn on_server_announcement(&mut self, text: &str) -> Result<()> {
        self.write_line(&format!("-- {text} --"))
    }
}
