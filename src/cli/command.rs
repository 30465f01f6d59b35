//! Menu commands.

use std::str::FromStr;

use crate::common::config::EXIT_CHOICE;
use crate::common::Error;

/// One entry of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddBid,
    DisplayAll,
    FindBid,
    RemoveBid,
    Exit,
}

impl Command {
    /// Map a menu number to its command.
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Command::AddBid),
            2 => Some(Command::DisplayAll),
            3 => Some(Command::FindBid),
            4 => Some(Command::RemoveBid),
            EXIT_CHOICE => Some(Command::Exit),
            _ => None,
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        text.parse::<u32>()
            .ok()
            .and_then(Command::from_choice)
            .ok_or_else(|| Error::InvalidChoice(text.to_string()))
    }
}
