use anyhow::Context;
use clap::{Parser, Subcommand};
use std::{io, path::PathBuf};
use weather_core::{Config, Session, TemperatureUnit, WeatherService};

use crate::{command::Command, input::LineReader, repl::Repl};

/// Top-level CLI struct.
///
/// Without a subcommand the interactive prompt starts.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup CLI")]
pub struct Cli {
    /// TOML file overriding service endpoints and the request timeout.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity on stderr (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Action>,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Show the current temperature in a city.
    Current {
        /// City name, e.g. "New York".
        #[arg(required = true)]
        city: Vec<String>,

        /// c, f, celsius or fahrenheit.
        #[arg(short, long, default_value = "celsius")]
        unit: TemperatureUnit,
    },

    /// Show 6-hour min/max temperature windows for the coming days.
    Forecast {
        /// City name, e.g. "New York".
        #[arg(required = true)]
        city: Vec<String>,

        /// Number of days, starting today.
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        /// c, f, celsius or fahrenheit.
        #[arg(short, long, default_value = "celsius")]
        unit: TemperatureUnit,
    },
}

impl Action {
    fn into_command(self) -> (Command, TemperatureUnit) {
        match self {
            Action::Current { city, unit } => (
                Command::Current {
                    city: city.join(" "),
                },
                unit,
            ),
            Action::Forecast { city, days, unit } => (
                Command::Forecast {
                    city: city.join(" "),
                    days,
                },
                unit,
            ),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let service =
            WeatherService::from_config(&config).context("Failed to set up weather clients")?;

        match self.command {
            None => {
                let mut repl = Repl::new(service, Session::default());
                repl.run(&mut LineReader::detect()).await
            }
            Some(action) => {
                let (command, unit) = action.into_command();
                let mut repl = Repl::new(service, Session::new(unit));
                repl.execute(command, &mut io::stdout()).await?;
                Ok(())
            }
        }
    }
}
