//! Data structures representing the game world.
//!
//! [`GameWorld`] owns every room and the player. It is built once by the loader
//! and then mutated by the REPL for the rest of the session.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use gametools::Spinner;
use log::info;

use crate::CAVEQUEST_VERSION;
use crate::spinners::{SpinnerType, default_spinners};
use crate::{Player, Room};

/// Methods common to any named thing in the world.
pub trait WorldObject {
    fn name(&self) -> &str;
    fn describe(&self) -> String;
}

/// Complete state of the running game.
#[derive(Debug, Clone, Default)]
pub struct GameWorld {
    pub title: String,
    pub intro: String,
    pub rooms: HashMap<String, Room>,
    pub player: Player,
    pub spinners: HashMap<SpinnerType, Spinner<String>>,
    pub turn_count: usize,
    pub version: String,
}

impl GameWorld {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> GameWorld {
        let world = Self {
            spinners: default_spinners(),
            version: CAVEQUEST_VERSION.to_string(),
            ..Self::default()
        };
        info!("new, empty 'GameWorld' created");
        world
    }

    /// Returns a random line from the selected spinner type, or a supplied default.
    pub fn spin_spinner(&self, spin_type: SpinnerType, default: &'static str) -> String {
        self.spinners
            .get(&spin_type)
            .and_then(gametools::Spinner::spin)
            .unwrap_or(default.to_string())
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.name.clone(), room);
    }

    /// Obtain a reference to the room the player occupies.
    /// # Errors
    /// - if the player's location names no known room
    pub fn player_room_ref(&self) -> Result<&Room> {
        self.rooms
            .get(&self.player.location)
            .ok_or_else(|| anyhow!("player location '{}' is not a known room", self.player.location))
    }

    /// Obtain a mutable reference to the room the player occupies.
    /// # Errors
    /// - if the player's location names no known room
    pub fn player_room_mut(&mut self) -> Result<&mut Room> {
        let location = &self.player.location;
        self.rooms
            .get_mut(location)
            .ok_or_else(|| anyhow!("player location '{location}' is not a known room"))
    }

    /// Move the player through the exit in `direction`.
    ///
    /// Returns the name of the new room, or `None` (with no state change) if the
    /// current room has no such exit.
    /// # Errors
    /// - if the player's current room or the exit's destination is missing
    pub fn move_player(&mut self, direction: &str) -> Result<Option<String>> {
        let Some(destination) = self.player_room_ref()?.destination(direction).map(str::to_string) else {
            return Ok(None);
        };
        if !self.rooms.contains_key(&destination) {
            return Err(anyhow!(
                "exit '{direction}' from '{}' leads to unknown room '{destination}'",
                self.player.location
            ));
        }
        info!("{} moved {direction} to {destination}", self.player.name);
        self.player.location.clone_from(&destination);
        Ok(Some(destination))
    }
}
