//! `repl::inventory` module
//!
//! Handlers for picking up, dropping, using and listing items.

use anyhow::Result;
use log::info;

use crate::player::UseOutcome;
use crate::{GameWorld, View, ViewItem};

/// Move an item from the current room to the player's inventory.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn take_handler(world: &mut GameWorld, view: &mut View, item_name: &str) -> Result<()> {
    let Some(item) = world.player_room_mut()?.take_item(item_name) else {
        view.push(ViewItem::ActionFailure(format!("There is no {item_name} here.")));
        return Ok(());
    };
    view.push(ViewItem::ActionSuccess(format!("You take the {}.", item.name)));
    world.player.pick_up(item);
    Ok(())
}

/// Move an item from the player's inventory to the current room.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn drop_handler(world: &mut GameWorld, view: &mut View, item_name: &str) -> Result<()> {
    // the room must exist before the item leaves the inventory
    world.player_room_ref()?;
    let Some(item) = world.player.remove_item(item_name) else {
        view.push(ViewItem::ActionFailure(format!("You don't have a {item_name}.")));
        return Ok(());
    };
    info!("{} dropped {} in {}", world.player.name, item.name, world.player.location);
    view.push(ViewItem::ActionSuccess(format!("You drop the {}.", item.name)));
    world.player_room_mut()?.add_item(item);
    Ok(())
}

/// Use a carried item on the player.
///
/// # Errors
/// - `GameError::CannotUse` if the item's effect fails
pub fn use_handler(world: &mut GameWorld, view: &mut View, item_name: &str) -> Result<()> {
    match world.player.use_item(item_name)? {
        UseOutcome::Used { message, .. } => view.push(ViewItem::ActionSuccess(message)),
        UseOutcome::NotCarried => view.push(ViewItem::ActionFailure(format!("You don't have a {item_name}."))),
    }
    Ok(())
}

/// List carried items.
pub fn inv_handler(world: &GameWorld, view: &mut View) {
    view.push(ViewItem::Inventory(world.player.inventory_names()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::item::{HEALTH_POTION, STRENGTH_SPELL, catalog_item};
    use crate::loader::default_world;

    fn in_hall() -> GameWorld {
        let mut world = default_world("Hero").unwrap();
        world.player.location = "Hall".into();
        world
    }

    #[test]
    fn take_is_case_insensitive_and_moves_item() {
        let mut world = in_hall();
        let mut view = View::recording();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        assert_eq!(world.player.inventory_names(), vec![HEALTH_POTION]);
        assert_eq!(world.rooms["Hall"].items.len(), 2);
        assert_eq!(view.items, vec![ViewItem::ActionSuccess("You take the Health Potion.".into())]);
    }

    #[test]
    fn taking_missing_item_reports_failure() {
        let mut world = default_world("Hero").unwrap();
        let mut view = View::recording();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        assert!(world.player.inventory.is_empty());
        assert_eq!(
            view.items,
            vec![ViewItem::ActionFailure("There is no health potion here.".into())]
        );
    }

    #[test]
    fn drop_returns_item_to_room() {
        let mut world = default_world("Hero").unwrap();
        world.player.pick_up(catalog_item(STRENGTH_SPELL).unwrap());
        let mut view = View::recording();
        drop_handler(&mut world, &mut view, "strength").unwrap();
        assert!(world.player.inventory.is_empty());
        assert_eq!(world.rooms["Entrance"].items.len(), 1);
    }

    #[test]
    fn use_potion_heals_and_consumes() {
        let mut world = in_hall();
        world.player.health = 40;
        let mut view = View::recording();
        take_handler(&mut world, &mut view, "health potion").unwrap();
        use_handler(&mut world, &mut view, "health potion").unwrap();
        assert_eq!(world.player.health, 90);
        assert!(world.player.inventory.is_empty());
        assert!(view.items.contains(&ViewItem::ActionSuccess("You feel rejuvenated!".into())));
    }

    #[test]
    fn use_without_item_reports_failure() {
        let mut world = default_world("Hero").unwrap();
        let mut view = View::recording();
        use_handler(&mut world, &mut view, "heal").unwrap();
        assert!(view.items[0].is_action_failure());
    }

    #[test]
    fn failed_effect_surfaces_cannot_use() {
        let mut world = default_world("Hero").unwrap();
        world.player.pick_up(catalog_item(STRENGTH_SPELL).unwrap());
        world.player.strength = i32::MAX;
        let mut view = View::recording();
        let err = use_handler(&mut world, &mut view, "strength").unwrap_err();
        assert!(matches!(err.downcast_ref::<GameError>(), Some(GameError::CannotUse { .. })));
        assert_eq!(world.player.inventory.len(), 1);
    }

    #[test]
    fn inventory_lists_names_in_order() {
        let mut world = in_hall();
        let mut view = View::recording();
        take_handler(&mut world, &mut view, "strength").unwrap();
        take_handler(&mut world, &mut view, "heal").unwrap();
        view.items.clear();
        inv_handler(&world, &mut view);
        assert_eq!(
            view.items,
            vec![ViewItem::Inventory(vec!["Strength".into(), "Heal".into()])]
        );
    }
}
