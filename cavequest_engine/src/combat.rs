//! Turn-based fights between the player and the monster in their room.
//!
//! A fight is a sequence of player actions. Each call to [`resolve_action`]
//! settles exactly one action (and the monster's reply) and reports whether the
//! fight goes on. The REPL reads every action through the same input port it
//! uses for commands, so no separate input loop lives here.

use std::ops::RangeInclusive;

use anyhow::{Result, anyhow};
use log::info;

use crate::dice::GameRng;
use crate::health::{LifeState, LivingEntity};
use crate::spinners::SpinnerType;
use crate::view::{View, ViewItem};
use crate::world::GameWorld;

/// Damage the player deals per hit.
pub const PLAYER_ATTACK: RangeInclusive<i32> = 10..=20;

/// Running away always heads this way.
pub const ESCAPE_DIRECTION: &str = "south";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    /// The fight continues; the player acts next.
    PlayerTurn,
    MonsterDefeated,
    PlayerDefeated,
    Fled,
}

impl CombatState {
    pub fn is_over(self) -> bool {
        !matches!(self, CombatState::PlayerTurn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Run,
    Invalid(String),
}

impl CombatAction {
    pub fn parse(input: &str) -> CombatAction {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "attack" => CombatAction::Attack,
            "run" => CombatAction::Run,
            _ => CombatAction::Invalid(normalized),
        }
    }
}

/// Settle one player action against the monster in the player's room.
///
/// # Errors
/// - if the player is not in a known room or there is no monster to fight
pub fn resolve_action(
    world: &mut GameWorld,
    view: &mut View,
    rng: &mut GameRng,
    action: &CombatAction,
) -> Result<CombatState> {
    match action {
        CombatAction::Attack => attack(world, view, rng),
        CombatAction::Run => run_away(world, view),
        CombatAction::Invalid(text) => {
            view.push(ViewItem::ActionFailure(format!(
                "Invalid action \"{text}\". Type \"attack\" or \"run\"."
            )));
            Ok(CombatState::PlayerTurn)
        },
    }
}

fn attack(world: &mut GameWorld, view: &mut View, rng: &mut GameRng) -> Result<CombatState> {
    let damage = rng.roll(PLAYER_ATTACK);
    let (monster_name, monster_health, retaliation) = {
        let room = world.player_room_mut()?;
        let room_name = room.name.clone();
        let monster = room
            .monster
            .as_mut()
            .ok_or_else(|| anyhow!("no monster to fight in '{room_name}'"))?;
        monster.damage(damage);
        let name = monster.name.clone();
        let health = monster.display_health();
        let defeated = monster.life_state() == LifeState::Dead;
        let retaliation = if defeated { None } else { Some(monster.draw_attack(rng)) };
        if defeated {
            room.monster = None;
        }
        (name, health, retaliation)
    };

    view.push(ViewItem::PlayerAttack {
        monster: monster_name.clone(),
        damage,
        monster_health,
    });

    let Some(monster_damage) = retaliation else {
        info!("{} defeated the {monster_name}", world.player.name);
        view.push(ViewItem::MonsterDefeated(monster_name));
        return Ok(CombatState::MonsterDefeated);
    };

    world.player.damage(monster_damage);
    view.push(ViewItem::MonsterAttack {
        monster: monster_name.clone(),
        damage: monster_damage,
        player_health: world.player.display_health(),
    });

    if world.player.life_state() == LifeState::Dead {
        info!("{} was defeated by the {monster_name}", world.player.name);
        view.push(ViewItem::PlayerDefeated);
        return Ok(CombatState::PlayerDefeated);
    }
    Ok(CombatState::PlayerTurn)
}

fn run_away(world: &mut GameWorld, view: &mut View) -> Result<CombatState> {
    view.push(ViewItem::ActionSuccess("You run away!".to_string()));
    if let Some(destination) = world.move_player(ESCAPE_DIRECTION)? {
        let room = world
            .rooms
            .get(&destination)
            .ok_or_else(|| anyhow!("escape destination '{destination}' vanished"))?;
        room.show(view);
    } else {
        info!("{} found no way out to the {ESCAPE_DIRECTION}", world.player.name);
        view.push(ViewItem::ActionFailure(
            world.spin_spinner(SpinnerType::NoExit, "You can't go that way."),
        ));
    }
    Ok(CombatState::Fled)
}
