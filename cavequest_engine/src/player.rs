//! The player character: stats, location and inventory.

use log::info;

use crate::error::GameError;
use crate::health::LivingEntity;
use crate::{Item, WorldObject};

pub const DEFAULT_PLAYER_NAME: &str = "Hero";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub strength: i32,
    /// Carried items in pickup order; duplicates are separate instances.
    pub inventory: Vec<Item>,
    /// Name of the room the player is standing in.
    pub location: String,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            health: 100,
            strength: 10,
            inventory: Vec::new(),
            location: String::new(),
        }
    }
}

/// Result of asking the player to use something by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    Used { item: String, message: String },
    NotCarried,
}

impl Player {
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            ..Self::default()
        }
    }

    pub fn pick_up(&mut self, item: Item) {
        info!("{} picked up {}", self.name, item.name);
        self.inventory.push(item);
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|item| item.matches(name))
    }

    /// Remove and return the first carried item matching `name`.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.inventory.iter().position(|item| item.matches(name))?;
        Some(self.inventory.remove(index))
    }

    /// Use the first carried item matching `name`.
    ///
    /// # Errors
    /// - `GameError::CannotUse` if the item's effect fails; the item stays in the inventory.
    pub fn use_item(&mut self, name: &str) -> Result<UseOutcome, GameError> {
        let Some(item) = self.find_item(name).cloned() else {
            return Ok(UseOutcome::NotCarried);
        };
        let message = item.use_on(self).map_err(|err| GameError::CannotUse {
            item: item.name.clone(),
            reason: err.to_string(),
        })?;
        Ok(UseOutcome::Used {
            item: item.name,
            message,
        })
    }

    pub fn inventory_names(&self) -> Vec<String> {
        self.inventory.iter().map(|item| item.name.clone()).collect()
    }
}

impl WorldObject for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!("Player {} is at {}", self.name, self.location)
    }
}

impl LivingEntity for Player {
    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{HEAL_SPELL, HEALTH_POTION, STRENGTH_SPELL, catalog_item};

    fn carrying(items: &[&str]) -> Player {
        let mut player = Player::new("Hero", "Hall");
        for name in items {
            player.pick_up(catalog_item(name).unwrap());
        }
        player
    }

    #[test]
    fn new_player_has_default_stats() {
        let player = Player::new("Ada", "Entrance");
        assert_eq!(player.health, 100);
        assert_eq!(player.strength, 10);
        assert!(player.inventory.is_empty());
        assert_eq!(player.describe(), "Player Ada is at Entrance");
    }

    #[test]
    fn remove_item_takes_first_match_only() {
        let mut player = carrying(&[HEALTH_POTION, HEAL_SPELL, HEALTH_POTION]);
        let removed = player.remove_item("health potion").unwrap();
        assert_eq!(removed.name, HEALTH_POTION);
        assert_eq!(player.inventory_names(), vec![HEAL_SPELL, HEALTH_POTION]);
    }

    #[test]
    fn using_missing_item_reports_not_carried() {
        let mut player = carrying(&[]);
        assert_eq!(player.use_item("Health Potion").unwrap(), UseOutcome::NotCarried);
    }

    #[test]
    fn using_strength_spell_consumes_it() {
        let mut player = carrying(&[STRENGTH_SPELL]);
        let outcome = player.use_item("strength").unwrap();
        assert_eq!(
            outcome,
            UseOutcome::Used {
                item: STRENGTH_SPELL.to_string(),
                message: "You cast Strength.".to_string(),
            }
        );
        assert_eq!(player.strength, 15);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn failed_use_is_wrapped_as_cannot_use() {
        let mut player = carrying(&[STRENGTH_SPELL]);
        player.strength = i32::MAX;
        let err = player.use_item("Strength").unwrap_err();
        assert!(matches!(err, GameError::CannotUse { ref item, .. } if item == STRENGTH_SPELL));
        assert_eq!(player.inventory.len(), 1);
    }
}
