//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location

use anyhow::{Result, anyhow};
use log::info;

use crate::spinners::SpinnerType;
use crate::{GameWorld, View, ViewItem};

/// Move the player through the exit named `direction`, if there is one.
///
/// # Errors
/// - if the player's room or the exit's destination is missing from the world
pub fn move_to_handler(world: &mut GameWorld, view: &mut View, direction: &str) -> Result<()> {
    let Some(destination) = world.move_player(direction)? else {
        info!("{} tried to go {direction} from {}", world.player.name, world.player.location);
        view.push(ViewItem::ActionFailure(
            world.spin_spinner(SpinnerType::NoExit, "You can't go that way."),
        ));
        return Ok(());
    };

    let travel = world.spin_spinner(SpinnerType::Movement, "You head");
    view.push(ViewItem::TransitionMessage(format!("{travel} {direction} to the {destination}.")));
    world
        .rooms
        .get(&destination)
        .ok_or_else(|| anyhow!("room '{destination}' vanished after move"))?
        .show(view);
    Ok(())
}
