//! Game-level failures that are reported to the player without ending the session.
//!
//! Unexpected internal failures travel as plain `anyhow::Error`s; the REPL tells the
//! two apart at the dispatch boundary by downcasting to [`GameError`].

use thiserror::Error;

use crate::item::Stat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// An item's effect could not be applied.
    #[error("Cannot use {item}: {reason}")]
    CannotUse { item: String, reason: String },
    #[error("your {stat} cannot go any higher")]
    StatOverflow { stat: Stat },
    #[error("No saved game found in slot \"{slot}\".")]
    NoSavedGame { slot: String },
    #[error("Saved game \"{slot}\" could not be read: {reason}")]
    CorruptSave { slot: String, reason: String },
    #[error("Saved game refers to an unknown room \"{room}\". Load aborted.")]
    UnknownRoom { room: String },
    #[error("Saved game contains an item that cannot be restored: \"{item}\". Load aborted.")]
    UnknownItem { item: String },
}
