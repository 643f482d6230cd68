//! `repl::system` module
//!
//! Contains repl loop handlers for commands that are for system utilities.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::save_files::{apply_snapshot, collect_save_slots, load_snapshot, save_game, save_path};
use crate::spinners::SpinnerType;
use crate::{CAVEQUEST_VERSION, GameWorld, View, ViewItem, repl::ReplControl};

const HELP_LINES: &[(&str, &str)] = &[
    ("look, l", "describe the room you are in"),
    ("go <direction>", "walk through an exit (also: move)"),
    ("take <item>", "pick something up (also: get)"),
    ("drop <item>", "put something down"),
    ("use <item>", "use a carried item"),
    ("inventory, inv, i", "list what you carry"),
    ("status", "show your health and strength"),
    ("save", "save your progress"),
    ("load", "restore your last save"),
    ("load autosave", "restore the latest autosave"),
    ("saves", "list saved games"),
    ("help, ?", "show this list"),
    ("quit, exit", "leave the game"),
    ("attack / run", "your options during a fight"),
];

/// Quit the game.
pub fn quit_handler(world: &GameWorld, view: &mut View) -> ReplControl {
    info!(
        "{} quit after {} turns with {} health",
        world.player.name, world.turn_count, world.player.health
    );
    info!("ending inventory:");
    world.player.inventory.iter().for_each(|i| info!("- {}", i.name));

    view.push(ViewItem::QuitSummary {
        name: world.player.name.clone(),
        turns: world.turn_count,
        health: world.player.health.max(0),
    });
    view.push(ViewItem::EngineMessage(
        world.spin_spinner(SpinnerType::QuitMsg, "Thanks for playing!"),
    ));
    ReplControl::Quit
}

/// Show available commands.
pub fn help_handler(view: &mut View) {
    view.push(ViewItem::Help(
        HELP_LINES
            .iter()
            .map(|(command, description)| ((*command).to_string(), (*description).to_string()))
            .collect(),
    ));
}

/// Save the player's state to `slot`.
///
/// # Errors
/// - if the save file cannot be written
pub fn save_handler(world: &GameWorld, view: &mut View, save_dir: &Path, slot: &str) -> Result<()> {
    let path = save_game(world, save_dir, slot).with_context(|| format!("saving game to slot '{slot}'"))?;
    info!("player saved game to \"{slot}\"");
    view.push(ViewItem::GameSaved {
        slot: slot.to_string(),
        path: path.display().to_string(),
    });
    Ok(())
}

/// Restore the player's state from `slot`.
///
/// Nothing changes unless the whole save is valid.
///
/// # Errors
/// - `GameError::NoSavedGame` if the slot is empty
/// - `GameError::CorruptSave`, `GameError::UnknownRoom` or `GameError::UnknownItem`
pub fn load_handler(world: &mut GameWorld, view: &mut View, save_dir: &Path, slot: &str) -> Result<()> {
    let snapshot = load_snapshot(save_dir, slot)?;
    if !snapshot.version_matches() {
        warn!(
            "player loaded '{slot}' (v{}), current version is v{CAVEQUEST_VERSION}",
            snapshot.version
        );
        view.push(ViewItem::EngineMessage(format!(
            "Warning: '{slot}' was saved by v{}; this is v{CAVEQUEST_VERSION}.",
            snapshot.version
        )));
    }
    apply_snapshot(world, &snapshot, slot)?;
    info!("player reloaded game from slot '{slot}'");
    view.push(ViewItem::GameLoaded {
        slot: slot.to_string(),
        path: save_path(save_dir, slot).display().to_string(),
    });
    world.player_room_ref()?.show(view);
    Ok(())
}

/// List save files found in `save_dir`.
///
/// # Errors
/// - if the save directory exists but cannot be read
pub fn list_saves_handler(view: &mut View, save_dir: &Path) -> Result<()> {
    let entries = collect_save_slots(save_dir)?;
    view.push(ViewItem::SavedGamesList {
        directory: save_dir.display().to_string(),
        entries,
    });
    Ok(())
}
