//! Health Module
//!
//! Shared health behavior for the player and monsters.

use crate::WorldObject;

/// Healing never raises health above this value.
pub const MAX_HEALTH: i32 = 100;

/// Possible life states for living entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Dead,
}

/// Abilities common to game entities that are alive.
///
/// Health is signed: a big enough hit may push it below zero for the moment
/// between the damage and the defeat check.
pub trait LivingEntity: WorldObject {
    fn health(&self) -> i32;
    fn set_health(&mut self, health: i32);

    /// Subtract `amount` from current health.
    fn damage(&mut self, amount: i32) {
        self.set_health(self.health().saturating_sub(amount));
    }

    fn life_state(&self) -> LifeState {
        if self.health() > 0 {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }

    /// Health as shown to the player (never below zero).
    fn display_health(&self) -> i32 {
        self.health().max(0)
    }
}
