use std::io::{self, Write};

use anyhow::Result;

use crate::usecases::contracts::NameSource;

use super::event_source::LineInput;

const NAME_PROMPT: &str = "Please enter a name for the new user.";

/// Asks for a name on `output` and reads one line from `input`. End of input
/// or an empty line means no value was provided.
pub struct PromptNameSource<R, W> {
    input: R,
    output: W,
}

impl PromptNameSource<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: LineInput, W: Write> PromptNameSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: LineInput, W: Write> NameSource for PromptNameSource<R, W> {
    fn request_name(&mut self) -> Result<Option<String>> {
        writeln!(self.output, "{NAME_PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let name = line.trim();
        Ok((!name.is_empty()).then(|| name.to_owned()))
    }
}
