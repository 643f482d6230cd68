//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the command handlers that manipulate the [`GameWorld`]. While a
//! monster shares the player's room, the loop reads combat actions instead of
//! commands, one action per pass.

pub mod input;
pub mod inventory;
pub mod look;
pub mod movement;
pub mod system;

pub use input::{InputEvent, InputManager, LineInput, ScriptedInput};
pub use inventory::*;
pub use look::*;
pub use movement::*;
pub use system::*;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::autosave::Autosaver;
use crate::combat::{CombatAction, CombatState, resolve_action};
use crate::command::{Command, parse_command};
use crate::dice::GameRng;
use crate::error::GameError;
use crate::health::LivingEntity;
use crate::save_files::{AUTOSAVE_SLOT, SAVE_SLOT, SaveSnapshot};
use crate::spinners::SpinnerType;
use crate::{GameWorld, View, ViewItem};

/// Control flow signal used by handlers to exit the REPL.
pub enum ReplControl {
    Continue,
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Quit,
    Defeated,
}

/// Everything the REPL needs for one play session.
pub struct GameSession {
    pub world: GameWorld,
    pub view: View,
    pub rng: GameRng,
    pub save_dir: PathBuf,
    autosaver: Option<Autosaver>,
}

impl GameSession {
    pub fn new(world: GameWorld, rng: GameRng, save_dir: PathBuf) -> Self {
        Self {
            world,
            view: View::new(),
            rng,
            save_dir,
            autosaver: None,
        }
    }

    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    #[must_use]
    pub fn with_autosaver(mut self, autosaver: Autosaver) -> Self {
        self.autosaver = Some(autosaver);
        self
    }

    /// Hand the current state to the autosave thread, if one is running.
    fn checkpoint(&self) {
        if let Some(autosaver) = &self.autosaver {
            autosaver.submit(SaveSnapshot::capture(&self.world));
        }
    }

    /// Stop background work and return the world.
    pub fn finish(self) -> GameWorld {
        if let Some(autosaver) = self.autosaver {
            autosaver.shutdown();
        }
        self.world
    }
}

/// Run the main read–eval–print loop until the player quits or is defeated.
///
/// # Errors
/// - if input cannot be read or the player's room is missing from the world
pub fn run_repl(session: &mut GameSession, input: &mut dyn LineInput) -> Result<GameOutcome> {
    let mut in_combat = false;
    look_handler(&session.world, &mut session.view)?;
    session.view.flush();

    loop {
        if session.world.player_room_ref()?.monster.is_some() {
            if let Some(outcome) = combat_turn(session, input, &mut in_combat)? {
                return Ok(outcome);
            }
            continue;
        }

        let prompt = format!(
            "\n[{}|HP {}|Turn {}]> ",
            session.world.player.location,
            session.world.player.display_health(),
            session.world.turn_count
        );
        let line = match input.read_line(&prompt).context("reading player input")? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => "quit".to_string(),
            InputEvent::Interrupted => {
                session.view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                session.view.flush();
                continue;
            },
        };

        let command = parse_command(&line);
        if takes_turn(&command) {
            session.world.turn_count += 1;
            info!("================> TURN {} <================", session.world.turn_count);
        }
        let control = dispatch_command(session, &command);
        session.checkpoint();
        session.view.flush();
        if let ReplControl::Quit = control {
            return Ok(GameOutcome::Quit);
        }
    }
}

/// Read and settle one combat action. Returns an outcome if the session is over.
fn combat_turn(session: &mut GameSession, input: &mut dyn LineInput, in_combat: &mut bool) -> Result<Option<GameOutcome>> {
    if !*in_combat {
        if let Some(monster) = &session.world.player_room_ref()?.monster {
            info!("{} encounters the {}", session.world.player.name, monster.name);
            session.view.push(ViewItem::MonsterEncounter {
                name: monster.name.clone(),
                health: monster.display_health(),
            });
        }
        *in_combat = true;
        session.view.flush();
    }

    let prompt = format!(
        "\n[HP {}] Do you [attack] or [run]? ",
        session.world.player.display_health()
    );
    let line = match input.read_line(&prompt).context("reading combat action")? {
        InputEvent::Line(line) => line,
        InputEvent::Eof => {
            quit_handler(&session.world, &mut session.view);
            session.view.flush();
            return Ok(Some(GameOutcome::Quit));
        },
        InputEvent::Interrupted => {
            session.view.push(ViewItem::EngineMessage("Action canceled.".to_string()));
            session.view.flush();
            return Ok(None);
        },
    };

    let action = CombatAction::parse(&line);
    let state = match resolve_action(&mut session.world, &mut session.view, &mut session.rng, &action) {
        Ok(state) => state,
        Err(err) => {
            report_error(&mut session.view, &err);
            session.view.flush();
            return Ok(None);
        },
    };
    if !matches!(action, CombatAction::Invalid(_)) {
        session.world.turn_count += 1;
    }
    if state.is_over() {
        *in_combat = false;
    }
    if state == CombatState::PlayerDefeated {
        session.view.flush();
        return Ok(Some(GameOutcome::Defeated));
    }
    session.checkpoint();
    session.view.flush();
    Ok(None)
}

fn takes_turn(command: &Command) -> bool {
    matches!(
        command,
        Command::MoveTo(_)
            | Command::Take(_)
            | Command::Drop(_)
            | Command::UseItem(_)
            | Command::Look
            | Command::Inventory
            | Command::Status
    )
}

/// Run one command, reporting any failure to the player instead of propagating it.
pub fn dispatch_command(session: &mut GameSession, command: &Command) -> ReplControl {
    match execute_command(session, command) {
        Ok(control) => control,
        Err(err) => {
            report_error(&mut session.view, &err);
            ReplControl::Continue
        },
    }
}

fn execute_command(session: &mut GameSession, command: &Command) -> Result<ReplControl> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;
    let GameSession {
        world, view, save_dir, ..
    } = session;

    match command {
        Quit => return Ok(quit_handler(world, view)),
        Look => look_handler(world, view)?,
        MoveTo(direction) => move_to_handler(world, view, direction)?,
        Take(item) => take_handler(world, view, item)?,
        Drop(item) => drop_handler(world, view, item)?,
        UseItem(item) => use_handler(world, view, item)?,
        Inventory => inv_handler(world, view),
        Status => status_handler(world, view),
        Save => save_handler(world, view, save_dir, SAVE_SLOT)?,
        Load => load_handler(world, view, save_dir, SAVE_SLOT)?,
        LoadAutosave => load_handler(world, view, save_dir, AUTOSAVE_SLOT)?,
        ListSaves => list_saves_handler(view, save_dir)?,
        Help => help_handler(view),
        Unknown => view.push(ViewItem::ActionFailure(world.spin_spinner(
            SpinnerType::UnrecognizedCommand,
            "I don't understand that command.",
        ))),
    }
    Ok(ReplControl::Continue)
}

/// Game-level failures are shown as-is; anything else is logged as unexpected.
fn report_error(view: &mut View, err: &anyhow::Error) {
    if let Some(game_err) = err.downcast_ref::<GameError>() {
        warn!("{game_err}");
        view.push(ViewItem::Error(game_err.to_string()));
    } else {
        error!("unexpected failure: {err:#}");
        view.push(ViewItem::Error(format!("An error occurred: {err:#}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{STRENGTH_SPELL, catalog_item};
    use crate::loader::default_world;

    fn session() -> GameSession {
        GameSession::new(default_world("Hero").unwrap(), GameRng::new(11), PathBuf::from("unused"))
            .with_view(View::recording())
    }

    #[test]
    fn unknown_command_gets_a_reply() {
        let mut session = session();
        let control = dispatch_command(&mut session, &Command::Unknown);
        assert!(matches!(control, ReplControl::Continue));
        let ViewItem::ActionFailure(msg) = &session.view.items[0] else {
            panic!("expected failure message");
        };
        assert!(msg.starts_with("I don't understand"));
    }

    #[test]
    fn game_errors_are_reported_not_propagated() {
        let mut session = session();
        session.world.player.pick_up(catalog_item(STRENGTH_SPELL).unwrap());
        session.world.player.strength = i32::MAX;
        let control = dispatch_command(&mut session, &Command::UseItem("strength".into()));
        assert!(matches!(control, ReplControl::Continue));
        assert!(matches!(&session.view.items[0], ViewItem::Error(msg) if msg.starts_with("Cannot use Strength")));
    }

    #[test]
    fn unexpected_errors_are_reported_too() {
        let mut session = session();
        session.world.player.location = "Nowhere".into();
        let control = dispatch_command(&mut session, &Command::Look);
        assert!(matches!(control, ReplControl::Continue));
        assert!(matches!(&session.view.items[0], ViewItem::Error(msg) if msg.starts_with("An error occurred")));
    }

    #[test]
    fn only_gameplay_commands_take_turns() {
        assert!(takes_turn(&Command::MoveTo("north".into())));
        assert!(!takes_turn(&Command::Help));
        assert!(!takes_turn(&Command::Unknown));
        assert!(!takes_turn(&Command::Save));
    }
}
