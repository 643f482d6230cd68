//! Command module
//!
//! Describes possible commands used during gameplay.
use variantly;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    Drop(String),
    Help,
    Inventory,
    ListSaves,
    Load,
    LoadAutosave,
    Look,
    MoveTo(String),
    Quit,
    Save,
    Status,
    Take(String),
    Unknown,
    UseItem(String),
}

/// Parses an input line into a `Command`.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Item names may
/// span several words; anything unrecognized becomes `Command::Unknown`.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["quit" | "exit"] => Command::Quit,
        ["look" | "l"] => Command::Look,
        ["go" | "move", direction] => Command::MoveTo((*direction).to_string()),
        ["take" | "get", item @ ..] if !item.is_empty() => Command::Take(item.join(" ")),
        ["drop", item @ ..] if !item.is_empty() => Command::Drop(item.join(" ")),
        ["use", item @ ..] if !item.is_empty() => Command::UseItem(item.join(" ")),
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["status"] => Command::Status,
        ["save"] => Command::Save,
        ["load"] => Command::Load,
        ["load", "autosave"] => Command::LoadAutosave,
        ["saves"] => Command::ListSaves,
        ["help" | "?"] => Command::Help,
        _ => Command::Unknown,
    }
}
