use std::ops::RangeInclusive;

use crate::dice::GameRng;
use crate::health::LivingEntity;
use crate::WorldObject;

/// Damage a monster deals per hit.
pub const MONSTER_ATTACK: RangeInclusive<i32> = 5..=15;

/// A hostile creature guarding a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    pub name: String,
    pub health: i32,
}

impl Monster {
    pub fn new(name: &str, health: i32) -> Self {
        Self {
            name: name.to_string(),
            health,
        }
    }

    /// Roll the damage for this monster's next hit.
    pub fn draw_attack(&self, rng: &mut GameRng) -> i32 {
        rng.roll(MONSTER_ATTACK)
    }
}

impl WorldObject for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        format!("A fearsome {} with {} health.", self.name, self.display_health())
    }
}

impl LivingEntity for Monster {
    fn health(&self) -> i32 {
        self.health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
    }
}
