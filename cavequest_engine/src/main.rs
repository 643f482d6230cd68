#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Cave Quest **
//! Terminal front end: load config and world, start autosave, run the REPL.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use cavequest_engine::autosave::Autosaver;
use cavequest_engine::config::{config_path, load_config};
use cavequest_engine::dice::GameRng;
use cavequest_engine::repl::InputManager;
use cavequest_engine::style::GameStyle;
use cavequest_engine::{GameOutcome, GameSession, WorldObject, load_world, run_repl};

fn main() -> Result<ExitCode> {
    env_logger::init();
    let config_path = config_path();
    let config = load_config(&config_path).with_context(|| format!("while loading {}", config_path.display()))?;

    info!("Start: loading Cave Quest world...");
    let world = load_world(&config).context("while loading GameWorld")?;
    info!("GameWorld loaded successfully.");

    let rng = config.rng_seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!("combat rng seeded with {}", rng.seed());

    println!("{:^64}", world.title.to_uppercase().bright_yellow().underline());
    println!("\nWelcome, {}! {}\n", world.player.name().bold().bright_blue(), world.player.describe());
    if !world.intro.is_empty() {
        println!("{}", world.intro.description_style());
    }

    let autosaver = Autosaver::spawn(config.save_dir.clone(), config.autosave_interval())?;
    let mut session = GameSession::new(world, rng, config.save_dir.clone()).with_autosaver(autosaver);
    let mut input = InputManager::new();
    let outcome = run_repl(&mut session, &mut input)?;

    match outcome {
        GameOutcome::Quit => {
            session.finish();
            Ok(ExitCode::SUCCESS)
        },
        GameOutcome::Defeated => {
            info!("player defeated; exiting");
            Ok(ExitCode::FAILURE)
        },
    }
}
