//! Item types and related helpers.
//!
//! Every item carries an explicit [`ItemEffect`] instead of executable behavior, so
//! items can be rebuilt from their names alone. The fixed catalog of items the
//! game knows how to construct lives here too; the loader uses it to stock rooms
//! and the save system uses it to restore inventories.

use std::cmp;
use std::fmt::Display;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::health::MAX_HEALTH;
use crate::{Player, WorldObject};

pub const HEALTH_POTION: &str = "Health Potion";
pub const HEAL_SPELL: &str = "Heal";
pub const STRENGTH_SPELL: &str = "Strength";

/// Names of every item [`catalog_item`] can construct.
pub const ITEM_CATALOG: &[&str] = &[HEALTH_POTION, HEAL_SPELL, STRENGTH_SPELL];

pub const HEALTH_POTION_EFFECT: ItemEffect = ItemEffect::Heal(50);
pub const HEALING_EFFECT: ItemEffect = ItemEffect::Heal(10);
pub const STRENGTH_EFFECT: ItemEffect = ItemEffect::StatBoost(Stat::Strength, 5);

/// Player attributes an effect can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Health,
    Strength,
}

impl Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stat::Health => write!(f, "health"),
            Stat::Strength => write!(f, "strength"),
        }
    }
}

/// What happens to the player when an item is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Restore health, capped at [`MAX_HEALTH`].
    Heal(i32),
    /// Permanently raise a stat.
    StatBoost(Stat, i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    HealthPotion,
    Spell { effect: ItemEffect },
}

/// A collectible object that can be carried and used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
}

impl WorldObject for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

impl Item {
    pub fn health_potion() -> Item {
        Item {
            name: HEALTH_POTION.to_string(),
            description: "A potion that restores health.".to_string(),
            kind: ItemKind::HealthPotion,
        }
    }

    pub fn spell(name: &str, description: &str, effect: ItemEffect) -> Item {
        Item {
            name: name.to_string(),
            description: description.to_string(),
            kind: ItemKind::Spell { effect },
        }
    }

    pub fn effect(&self) -> ItemEffect {
        match &self.kind {
            ItemKind::HealthPotion => HEALTH_POTION_EFFECT,
            ItemKind::Spell { effect } => *effect,
        }
    }

    /// Every item currently in the game is used up when used.
    pub fn is_consumable(&self) -> bool {
        match self.kind {
            ItemKind::HealthPotion | ItemKind::Spell { .. } => true,
        }
    }

    /// Case-insensitive name comparison used by every item lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Apply this item's effect to `player`, then remove it from their inventory
    /// if it is consumable. Returns the flavor line to show the player.
    ///
    /// # Errors
    /// Returns the effect's failure untouched; the inventory is left as it was.
    pub fn use_on(&self, player: &mut Player) -> Result<String, GameError> {
        apply_effect(player, self.effect())?;
        if self.is_consumable() {
            player.remove_item(&self.name);
        }
        info!("{} used {} ({:?})", player.name, self.name, self.effect());
        Ok(match self.kind {
            ItemKind::HealthPotion => "You feel rejuvenated!".to_string(),
            ItemKind::Spell { .. } => format!("You cast {}.", self.name),
        })
    }
}

/// Apply a single effect to the player.
///
/// # Errors
/// - `GameError::StatOverflow` if a stat boost would overflow the stat.
pub fn apply_effect(player: &mut Player, effect: ItemEffect) -> Result<(), GameError> {
    match effect {
        ItemEffect::Heal(amount) => {
            player.health = cmp::min(MAX_HEALTH, player.health.saturating_add(amount));
        },
        ItemEffect::StatBoost(stat, amount) => {
            let value = match stat {
                Stat::Health => &mut player.health,
                Stat::Strength => &mut player.strength,
            };
            *value = value.checked_add(amount).ok_or(GameError::StatOverflow { stat })?;
        },
    }
    Ok(())
}

/// Construct a fresh instance of a catalog item by its exact name.
pub fn catalog_item(name: &str) -> Option<Item> {
    match name {
        HEALTH_POTION => Some(Item::health_potion()),
        HEAL_SPELL => Some(Item::spell(HEAL_SPELL, "A spell that heals you.", HEALING_EFFECT)),
        STRENGTH_SPELL => Some(Item::spell(
            STRENGTH_SPELL,
            "A spell that increases your strength.",
            STRENGTH_EFFECT,
        )),
        _ => None,
    }
}
