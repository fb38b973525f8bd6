//! Chat command parsing.
//!
//! Finds game commands in free-form player messages. Only `roll` exists so
//! far: `roll 2d6+1`, `I roll 1d20 for initiative`, ...

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::dice::DiceError;

/// The word `roll` followed, anywhere later, by a dice expression.
#[allow(clippy::unwrap_used)]
static ROLL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\broll\b.*?(\d+d\d+(?:[+-]\d+)?)").unwrap());

/// A command found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Roll the given dice expression.
    Roll(String),
}

/// Reply produced for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReply {
    pub message: String,
    /// Whether only the sender should see the reply.
    pub private: bool,
}

impl CommandReply {
    /// Reply visible to the whole channel.
    #[must_use]
    pub fn public(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            private: false,
        }
    }
}

/// Errors from running commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No commands found: {0}")]
    NoCommands(String),

    #[error(transparent)]
    Dice(#[from] DiceError),
}

/// Extracts every command in `message`, in message order.
#[must_use]
pub fn parse_commands(message: &str) -> Vec<Command> {
    ROLL_REGEX
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|dice| vec![Command::Roll(dice.as_str().to_string())])
        .unwrap_or_default()
}
