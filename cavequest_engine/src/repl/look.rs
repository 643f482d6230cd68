//! `repl::look` module
//!
//! Handlers for examining the surroundings and the player.

use anyhow::Result;

use crate::health::LivingEntity;
use crate::{GameWorld, View, ViewItem};

/// Describe the player's current room.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn look_handler(world: &GameWorld, view: &mut View) -> Result<()> {
    world.player_room_ref()?.show(view);
    Ok(())
}

/// Show the player's stats and location.
pub fn status_handler(world: &GameWorld, view: &mut View) {
    let player = &world.player;
    view.push(ViewItem::PlayerStatus {
        name: player.name.clone(),
        location: player.location.clone(),
        health: player.display_health(),
        strength: player.strength,
    });
}
