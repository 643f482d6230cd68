//! Save-game serialization and discovery.
//!
//! A save captures the player only: name, stats, location and the names of carried
//! items. Rooms, placed items and monsters always come from the world data, so a
//! restored game keeps the live world's rooms exactly as they are.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use log::{info, warn};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::health::MAX_HEALTH;
use crate::item::catalog_item;
use crate::{CAVEQUEST_VERSION, GameWorld};

pub const SAVE_DIR: &str = "saved_games";
pub const SAVE_SLOT: &str = "savegame";
pub const AUTOSAVE_SLOT: &str = "autosave";
const SAVE_PREFIX: &str = "cavequest-";
const SAVE_EXTENSION: &str = "ron";

/// Serialized player state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub health: i32,
    pub strength: i32,
    pub location: String,
    pub inventory: Vec<String>,
}

/// Everything written to a save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    #[serde(default)]
    pub version: String,
    pub player: PlayerSnapshot,
}

impl SaveSnapshot {
    /// Capture the current player state from the world.
    pub fn capture(world: &GameWorld) -> Self {
        let player = &world.player;
        Self {
            version: CAVEQUEST_VERSION.to_string(),
            player: PlayerSnapshot {
                name: player.name.clone(),
                health: player.health,
                strength: player.strength,
                location: player.location.clone(),
                inventory: player.inventory_names(),
            },
        }
    }

    pub fn version_matches(&self) -> bool {
        self.version == CAVEQUEST_VERSION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Path of the file backing `slot` inside `dir`.
pub fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{SAVE_PREFIX}{slot}.{SAVE_EXTENSION}"))
}

/// Write a snapshot to `slot`, replacing any earlier save there.
///
/// The data is written to a temporary file first and renamed into place, so a
/// reader never sees a half-written save.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_snapshot(snapshot: &SaveSnapshot, dir: &Path, slot: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = save_path(dir, slot);
    let staging = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
    let ron = ron::ser::to_string_pretty(snapshot, PrettyConfig::default())
        .with_context(|| format!("serializing save for slot '{slot}'"))?;
    fs::write(&staging, ron).with_context(|| format!("writing {}", staging.display()))?;
    fs::rename(&staging, &path).with_context(|| format!("moving save into place at {}", path.display()))?;
    info!("saved slot '{slot}' to {}", path.display());
    Ok(path)
}

/// Capture the world and write it to `slot`.
///
/// # Errors
/// Returns an error if the save cannot be written.
pub fn save_game(world: &GameWorld, dir: &Path, slot: &str) -> Result<PathBuf> {
    write_snapshot(&SaveSnapshot::capture(world), dir, slot)
}

/// Read the snapshot stored in `slot`.
///
/// # Errors
/// - `GameError::NoSavedGame` if the slot has never been written
/// - `GameError::CorruptSave` if the file cannot be read or parsed
pub fn load_snapshot(dir: &Path, slot: &str) -> Result<SaveSnapshot, GameError> {
    let path = save_path(dir, slot);
    if !path.is_file() {
        return Err(GameError::NoSavedGame { slot: slot.to_string() });
    }
    let raw = fs::read_to_string(&path).map_err(|err| GameError::CorruptSave {
        slot: slot.to_string(),
        reason: trim_error(&err),
    })?;
    ron::from_str::<SaveSnapshot>(&raw).map_err(|err| {
        warn!("failed to parse save '{slot}' ({}): {err}", path.display());
        GameError::CorruptSave {
            slot: slot.to_string(),
            reason: trim_error(&err),
        }
    })
}

/// Restore the player from a snapshot.
///
/// Everything is checked before anything changes: an unknown room, an item name
/// missing from the catalog or health outside `1..=MAX_HEALTH` leaves the world
/// untouched. `slot` names the save in error messages.
///
/// # Errors
/// - `GameError::UnknownRoom`, `GameError::UnknownItem` or `GameError::CorruptSave`
pub fn apply_snapshot(world: &mut GameWorld, snapshot: &SaveSnapshot, slot: &str) -> Result<(), GameError> {
    let saved = &snapshot.player;
    if !world.rooms.contains_key(&saved.location) {
        return Err(GameError::UnknownRoom {
            room: saved.location.clone(),
        });
    }
    if !(1..=MAX_HEALTH).contains(&saved.health) {
        return Err(GameError::CorruptSave {
            slot: slot.to_string(),
            reason: format!("player health {} is outside 1..={MAX_HEALTH}", saved.health),
        });
    }
    let inventory = saved
        .inventory
        .iter()
        .map(|name| catalog_item(name).ok_or_else(|| GameError::UnknownItem { item: name.clone() }))
        .collect::<Result<Vec<_>, _>>()?;

    let player = &mut world.player;
    player.name.clone_from(&saved.name);
    player.health = saved.health;
    player.strength = saved.strength;
    player.location.clone_from(&saved.location);
    player.inventory = inventory;
    info!("restored {} at {}", player.name, player.location);
    Ok(())
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot));
    Ok(slots)
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some(SAVE_EXTENSION) {
        return None;
    }
    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
    let slot = stem.strip_prefix(SAVE_PREFIX)?;
    if slot.is_empty() {
        return None;
    }
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot {
        slot: slot.to_string(),
        path,
        modified,
    })
}

/// Format a human-friendly modified time relative to now.
pub fn format_modified(modified: SystemTime) -> String {
    match SystemTime::now().duration_since(modified) {
        Ok(delta) => format_duration(delta),
        Err(_) => "in the future".to_string(),
    }
}

/// Convert a duration into a compact "time ago" string.
fn format_duration(duration: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = MINUTE * 60;
    const DAY: u64 = HOUR * 24;

    let secs = duration.as_secs();
    if secs < 30 {
        "just now".to_string()
    } else if secs < MINUTE {
        format!("{secs}s ago")
    } else if secs < HOUR {
        format!("{}m ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h ago", secs / HOUR)
    } else {
        format!("{}d ago", secs / DAY)
    }
}

/// Clamp verbose error messages to a readable length.
fn trim_error(err: &impl ToString) -> String {
    let message = err.to_string();
    if message.chars().count() <= 120 {
        return message;
    }
    let mut trimmed: String = message.chars().take(117).collect();
    trimmed.push_str("...");
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{HEALTH_POTION, STRENGTH_SPELL};
    use crate::{Player, Room};
    use anyhow::Result;
    use tempfile::tempdir;

    fn small_world() -> GameWorld {
        let mut world = GameWorld::new_empty();
        world.add_room(Room::new("Entrance", "Cave mouth."));
        world.add_room(Room::new("Hall", "Torchlit hall."));
        world.player = Player::new("Tester", "Hall");
        world
    }

    #[test]
    fn save_path_uses_prefix_and_extension() {
        let path = save_path(Path::new("saves"), SAVE_SLOT);
        assert_eq!(path, Path::new("saves/cavequest-savegame.ron"));
    }

    #[test]
    fn missing_slot_is_no_saved_game() {
        let dir = tempdir().unwrap();
        assert_eq!(
            load_snapshot(dir.path(), SAVE_SLOT).unwrap_err(),
            GameError::NoSavedGame {
                slot: SAVE_SLOT.to_string()
            }
        );
    }

    #[test]
    fn garbage_file_is_corrupt() -> Result<()> {
        let dir = tempdir()?;
        fs::write(save_path(dir.path(), SAVE_SLOT), "this is not ron")?;
        let err = load_snapshot(dir.path(), SAVE_SLOT).unwrap_err();
        assert!(matches!(err, GameError::CorruptSave { .. }));
        Ok(())
    }

    #[test]
    fn saved_player_is_restored() -> Result<()> {
        let dir = tempdir()?;
        let mut world = small_world();
        world.player.health = 42;
        world.player.strength = 15;
        world.player.pick_up(catalog_item(HEALTH_POTION).unwrap());
        world.player.pick_up(catalog_item(STRENGTH_SPELL).unwrap());
        save_game(&world, dir.path(), SAVE_SLOT)?;

        let mut fresh = small_world();
        fresh.player = Player::new("Someone Else", "Entrance");
        let snapshot = load_snapshot(dir.path(), SAVE_SLOT)?;
        assert!(snapshot.version_matches());
        apply_snapshot(&mut fresh, &snapshot, SAVE_SLOT)?;
        assert_eq!(fresh.player, world.player);
        Ok(())
    }

    #[test]
    fn unknown_room_leaves_player_untouched() {
        let mut world = small_world();
        let before = world.player.clone();
        let mut snapshot = SaveSnapshot::capture(&world);
        snapshot.player.location = "Dungeon".into();
        snapshot.player.health = 5;
        let err = apply_snapshot(&mut world, &snapshot, SAVE_SLOT).unwrap_err();
        assert_eq!(err, GameError::UnknownRoom { room: "Dungeon".into() });
        assert_eq!(world.player, before);
    }

    #[test]
    fn unknown_item_aborts_restore() {
        let mut world = small_world();
        let before = world.player.clone();
        let mut snapshot = SaveSnapshot::capture(&world);
        snapshot.player.inventory = vec![HEALTH_POTION.into(), "Vorpal Sword".into()];
        snapshot.player.strength = 99;
        let err = apply_snapshot(&mut world, &snapshot, SAVE_SLOT).unwrap_err();
        assert_eq!(err, GameError::UnknownItem { item: "Vorpal Sword".into() });
        assert_eq!(world.player, before);
    }

    #[test]
    fn health_outside_the_cap_is_corrupt() {
        let mut world = small_world();
        let before = world.player.clone();
        for health in [0, MAX_HEALTH + 1, 500] {
            let mut snapshot = SaveSnapshot::capture(&world);
            snapshot.player.health = health;
            let err = apply_snapshot(&mut world, &snapshot, SAVE_SLOT).unwrap_err();
            assert_eq!(
                err,
                GameError::CorruptSave {
                    slot: SAVE_SLOT.to_string(),
                    reason: format!("player health {health} is outside 1..={MAX_HEALTH}"),
                }
            );
            assert_eq!(world.player, before);
        }
    }

    #[test]
    fn collect_save_slots_skips_unrelated_files() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path();
        fs::write(path.join("cavequest-alpha.ron"), "()")?;
        fs::write(path.join("cavequest-autosave.ron"), "()")?;
        fs::write(path.join("notes.txt"), "ignore me")?;
        fs::write(path.join("other-game.ron"), "()")?;
        fs::create_dir_all(path.join("nested"))?;

        let slots = collect_save_slots(path)?;
        let names: Vec<_> = slots.iter().map(|s| s.slot.as_str()).collect();
        assert_eq!(names, vec!["alpha", "autosave"]);
        Ok(())
    }

    #[test]
    fn collect_save_slots_handles_missing_directory() -> Result<()> {
        let dir = tempdir()?;
        assert!(collect_save_slots(&dir.path().join("missing"))?.is_empty());
        Ok(())
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(Duration::from_secs(5)), "just now");
        assert_eq!(format_duration(Duration::from_secs(45)), "45s ago");
        assert_eq!(format_duration(Duration::from_secs(600)), "10m ago");
        assert_eq!(format_duration(Duration::from_secs(7_200)), "2h ago");
        assert_eq!(format_duration(Duration::from_secs(172_800)), "2d ago");
    }
}
