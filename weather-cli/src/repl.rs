use std::io::{self, Write};

use tracing::warn;
use weather_core::{Session, Temperature, WeatherError, WeatherService, render};

use crate::{
    command::{Command, ParseError},
    input::LineReader,
};

pub const INVALID_CITY: &str = "Invalid city name.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read-eval-print loop over a weather service and the session's unit.
///
/// Every failure is printed and the loop carries on; only `exit` or the end
/// of input stops it.
#[derive(Debug)]
pub struct Repl {
    service: WeatherService,
    session: Session,
}

impl Repl {
    pub fn new(service: WeatherService, session: Session) -> Self {
        Self { service, session }
    }

    pub async fn run(&mut self, input: &mut LineReader) -> anyhow::Result<()> {
        let mut stdout = io::stdout();

        while let Some(line) = input.next_line()? {
            if self.handle_line(&line, &mut stdout).await? == Flow::Exit {
                break;
            }
        }

        Ok(())
    }

    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        match Command::parse(line) {
            Ok(command) => self.execute(command, out).await,
            Err(ParseError::Empty) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        let unit = self.session.unit();

        match command {
            Command::Current { city } => {
                match self.service.current_temperature(&city, unit).await {
                    Ok(Some(temp)) => {
                        writeln!(out, "Current temp is {}", Temperature::new(temp, unit))?
                    }
                    Ok(None) => writeln!(out, "{INVALID_CITY}")?,
                    Err(err) => report(out, &err)?,
                }
            }
            Command::Forecast { city, days } => {
                let lines = self
                    .service
                    .forecast(&city, days, unit)
                    .await
                    .and_then(|found| found.map(|f| render(&f, days, unit)).transpose());

                match lines {
                    Ok(Some(lines)) => {
                        for line in lines {
                            writeln!(out, "{line}")?;
                        }
                    }
                    Ok(None) => writeln!(out, "{INVALID_CITY}")?,
                    Err(err) => report(out, &err)?,
                }
            }
            Command::SetUnit { unit } => {
                if let Err(err) = self.session.set_unit(&unit) {
                    writeln!(out, "{err}")?;
                }
            }
            Command::GetUnit => writeln!(out, "{}", self.session.unit())?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}

fn report<W: Write>(out: &mut W, err: &WeatherError) -> io::Result<()> {
    warn!(error = %err, "command failed");
    writeln!(out, "Error: {err}")
}
