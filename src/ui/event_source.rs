use std::io::{self, BufRead};

use anyhow::Result;

use crate::{domain::events::AppEvent, usecases::contracts::AppEventSource};

/// Line-oriented input. Stdin is read through its shared handle on every call,
/// so the event source and the name prompt can both consume it.
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Reads one console command per line. End of input counts as quitting.
pub struct LineEventSource<R> {
    reader: R,
}

impl LineEventSource<io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: LineInput> LineEventSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: LineInput> AppEventSource for LineEventSource<R> {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Some(AppEvent::QuitRequested));
        }

        Ok(parse_line(&line))
    }
}

pub fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Some(match line.split_once(':') {
            Some((from, text)) if !from.trim().is_empty() => AppEvent::MessageSubmitted {
                from: from.trim().to_owned(),
                text: text.trim().to_owned(),
            },
            _ => AppEvent::Unrecognized(line.to_owned()),
        });
    };

    let (verb, rest) = command
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((command, ""));

    let event = match verb {
        "join" => AppEvent::JoinRequested((!rest.is_empty()).then(|| rest.to_owned())),
        "leave" if !rest.is_empty() => AppEvent::LeaveRequested(rest.to_owned()),
        "say" => match rest.split_once(char::is_whitespace) {
            Some((from, text)) => AppEvent::MessageSubmitted {
                from: from.to_owned(),
                text: text.trim().to_owned(),
            },
            None => AppEvent::Unrecognized(line.to_owned()),
        },
        "who" => AppEvent::RosterRequested,
        "history" => AppEvent::HistoryRequested,
        "quit" | "exit" => AppEvent::QuitRequested,
        _ => AppEvent::Unrecognized(line.to_owned()),
    };

    Some(event)
}
