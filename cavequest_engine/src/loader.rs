//! Loader utilities for building a `GameWorld` from TOML world data.
//!
//! The built-in cave is compiled into the binary; a config may point at another
//! world file instead. Either way the data is validated as a whole before any
//! runtime structure is built, and every problem is reported at once.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use cavequest_data::{WorldDef, validate_world};
use log::info;

use crate::config::GameConfig;
use crate::item::{ITEM_CATALOG, catalog_item};
use crate::{GameWorld, Monster, Player, Room};

/// The built-in world data.
pub const DEFAULT_WORLD: &str = include_str!("../data/world.toml");

/// Load the world selected by `config`.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or validation.
pub fn load_world(config: &GameConfig) -> Result<GameWorld> {
    let def = match &config.world_file {
        Some(path) => load_worlddef(path)?,
        None => parse_worlddef(DEFAULT_WORLD).context("while parsing built-in world")?,
    };
    build_world(&def, &config.player_name)
}

/// Build the built-in cave for a player called `player_name`.
///
/// # Errors
/// Returns an error only if the embedded world data is broken.
pub fn default_world(player_name: &str) -> Result<GameWorld> {
    build_world(&parse_worlddef(DEFAULT_WORLD)?, player_name)
}

/// Read and parse a world file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading world file {}", path.display()))?;
    parse_worlddef(&raw).with_context(|| format!("parsing world file {}", path.display()))
}

/// Parse world data from TOML text.
///
/// # Errors
/// Returns an error on malformed TOML or missing required fields.
pub fn parse_worlddef(raw: &str) -> Result<WorldDef> {
    toml::from_str(raw).context("deserializing world TOML")
}

/// Validate the world data and return a single aggregated error.
fn validate_worlddef(def: &WorldDef) -> Result<()> {
    let errors = validate_world(def, ITEM_CATALOG);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("world validation failed:\n{details}");
}

/// Build the runtime world from validated data.
///
/// # Errors
/// Returns an error describing every validation failure if the data is inconsistent.
pub fn build_world(def: &WorldDef, player_name: &str) -> Result<GameWorld> {
    validate_worlddef(def)?;

    let mut world = GameWorld::new_empty();
    world.title.clone_from(&def.game.title);
    world.intro.clone_from(&def.game.intro);

    for room_def in &def.rooms {
        let mut room = Room::new(&room_def.name, &room_def.desc);
        for exit in &room_def.exits {
            room.connect(&exit.direction, &exit.to);
        }
        world.add_room(room);
    }
    info!("{} rooms added to GameWorld", world.rooms.len());

    for placement in &def.items {
        let item = catalog_item(&placement.item).ok_or_else(|| anyhow!("unknown item '{}'", placement.item))?;
        world
            .rooms
            .get_mut(&placement.room)
            .ok_or_else(|| anyhow!("unknown room '{}'", placement.room))?
            .add_item(item);
    }
    info!("{} items placed in GameWorld", def.items.len());

    for monster_def in &def.monsters {
        world
            .rooms
            .get_mut(&monster_def.room)
            .ok_or_else(|| anyhow!("unknown room '{}'", monster_def.room))?
            .monster = Some(Monster::new(&monster_def.name, monster_def.health));
    }
    info!("{} monsters added to GameWorld", def.monsters.len());

    let mut player = Player::new(player_name, &def.game.player.start_room);
    player.health = def.game.player.health;
    player.strength = def.game.player.strength;
    info!("player \"{}\" added to GameWorld at {}", player.name, player.location);
    world.player = player;

    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{HEAL_SPELL, HEALTH_POTION, STRENGTH_SPELL};

    #[test]
    fn built_in_world_matches_the_cave() {
        let world = default_world("Hero").unwrap();
        assert_eq!(world.title, "Cave Quest");
        assert_eq!(world.rooms.len(), 3);
        assert_eq!(world.player.location, "Entrance");
        assert_eq!(world.player.health, 100);
        assert_eq!(world.player.strength, 10);
        assert!(world.player.inventory.is_empty());

        let hall = &world.rooms["Hall"];
        assert_eq!(hall.destination("south"), Some("Entrance"));
        assert_eq!(hall.destination("east"), Some("Treasure Room"));
        let names: Vec<_> = hall.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec![HEALTH_POTION, HEAL_SPELL, STRENGTH_SPELL]);
        assert_eq!(hall.monster, Some(Monster::new("Goblin", 30)));

        assert_eq!(world.rooms["Entrance"].destination("north"), Some("Hall"));
        assert_eq!(world.rooms["Treasure Room"].destination("west"), Some("Hall"));
        assert!(world.rooms["Treasure Room"].monster.is_none());
    }

    #[test]
    fn player_name_comes_from_caller() {
        let world = default_world("Ada").unwrap();
        assert_eq!(world.player.name, "Ada");
    }

    #[test]
    fn all_errors_are_reported_together() {
        let mut def = parse_worlddef(DEFAULT_WORLD).unwrap();
        def.rooms[0].exits[0].to = "Nowhere".into();
        def.items[0].item = "Vorpal Sword".into();
        let message = format!("{:#}", build_world(&def, "Hero").unwrap_err());
        assert!(message.contains("Nowhere"));
        assert!(message.contains("Vorpal Sword"));
    }

    #[test]
    fn world_file_from_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.toml");
        fs::write(
            &path,
            r#"
            [game]
            title = "Tiny"
            [game.player]
            start_room = "Closet"
            [[rooms]]
            name = "Closet"
            desc = "Cramped."
            "#,
        )
        .unwrap();
        let config = GameConfig {
            world_file: Some(path),
            ..GameConfig::default()
        };
        let world = load_world(&config).unwrap();
        assert_eq!(world.title, "Tiny");
        assert_eq!(world.player.location, "Closet");
    }

    #[test]
    fn padded_start_room_is_rejected() {
        let raw = r#"
            [game]
            title = "Tiny"
            [game.player]
            start_room = " Closet"
            [[rooms]]
            name = "Closet"
            desc = "Cramped."
            "#;
        let def = parse_worlddef(raw).unwrap();
        let message = format!("{:#}", build_world(&def, "Hero").unwrap_err());
        assert!(message.contains("missing room ' Closet' (player start room)"), "{message}");
    }

    #[test]
    fn missing_world_file_is_an_error() {
        let config = GameConfig {
            world_file: Some("does/not/exist.toml".into()),
            ..GameConfig::default()
        };
        assert!(load_world(&config).is_err());
    }
}
