use crate::domain::model::Position;
use crate::utils::error::{MapError, Result};
use crate::utils::validation::validate_coordinates;
use std::str::FromStr;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Same as clicking the map at this position.
    Click(Position),
    SelectStop(String),
    Close,
    List,
    Quit,
}

fn parse_position(lat: &str, lon: &str) -> Result<Position> {
    let parse = |value: &str| {
        value.trim().parse::<f64>().map_err(|_| MapError::CommandError {
            message: format!("'{}' is not a number", value.trim()),
        })
    };
    let position = Position::new(parse(lat)?, parse(lon)?);
    validate_coordinates("position", position.latitude, position.longitude).map_err(|e| {
        MapError::CommandError {
            message: e.to_string(),
        }
    })?;
    Ok(position)
}

impl FromStr for Command {
    type Err = MapError;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        let (head, rest) = match input.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (input, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "close" => Ok(Command::Close),
            "list" | "ls" => Ok(Command::List),
            "stop" if !rest.is_empty() => Ok(Command::SelectStop(rest.to_string())),
            "stop" => Err(MapError::CommandError {
                message: "stop needs an id".to_string(),
            }),
            "click" => Self::parse_coordinates(rest),
            _ => Self::parse_coordinates(input),
        }
    }
}

impl Command {
    /// Accepts "50.11 8.68" and "50.11,8.68".
    fn parse_coordinates(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        match parts.as_slice() {
            [lat, lon] => Ok(Command::Click(parse_position(lat, lon)?)),
            _ => Err(MapError::CommandError {
                message: format!("unknown command '{}'", input),
            }),
        }
    }
}
