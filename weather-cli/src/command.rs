use thiserror::Error;

pub const HELP: &str = "Unknown command. Available commands:\n\tcurrent %city%\n\tforecast %city% %days%\n\tsetunit %unit%\n\tgetunit\n\texit";

/// One line of interactive input, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Current { city: String },
    Forecast { city: String, days: u32 },
    SetUnit { unit: String },
    GetUnit,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    /// Unknown command word, wrong arity, or a non-numeric day count.
    #[error("{}", HELP)]
    Unknown,

    #[error("Number of days must be at least 1.")]
    ZeroDays,

    #[error("Number of days is out of range.")]
    DaysOutOfRange,
}

impl Command {
    /// Tokenize on whitespace; the first word picks the command.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => Err(ParseError::Empty),
            ["current", city @ ..] if !city.is_empty() => Ok(Command::Current {
                city: city.join(" "),
            }),
            ["forecast", city @ .., days] if !city.is_empty() && is_digits(days) => {
                Ok(Command::Forecast {
                    city: city.join(" "),
                    days: parse_days(days)?,
                })
            }
            ["setunit", unit] => Ok(Command::SetUnit {
                unit: unit.to_string(),
            }),
            ["getunit"] => Ok(Command::GetUnit),
            ["exit"] => Ok(Command::Exit),
            _ => Err(ParseError::Unknown),
        }
    }
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_days(token: &str) -> Result<u32, ParseError> {
    match token.parse::<u32>() {
        Ok(0) => Err(ParseError::ZeroDays),
        Ok(days) => Ok(days),
        Err(_) => Err(ParseError::DaysOutOfRange),
    }
}
