use anyhow::Result;
use inquire::{InquireError, Text};
use std::io::{self, IsTerminal, Lines, StdinLock};

pub const PROMPT: &str = ">>>";

/// Where interactive commands come from.
pub enum LineReader {
    /// Line-edited prompt on a terminal.
    Terminal,
    /// Plain lines from piped stdin.
    Piped(Lines<StdinLock<'static>>),
}

impl LineReader {
    pub fn detect() -> Self {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            LineReader::Terminal
        } else {
            LineReader::Piped(stdin.lines())
        }
    }

    /// Next input line, or `None` once the user cancels or input ends.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            LineReader::Terminal => match Text::new(PROMPT).prompt() {
                Ok(line) => Ok(Some(line)),
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
                Err(err) => Err(err.into()),
            },
            LineReader::Piped(lines) => Ok(lines.next().transpose()?),
        }
    }
}
