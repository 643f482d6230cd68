#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
//! ** Cave Quest **
//! A small turn-based cave crawl: rooms, items, one monster per room, and saves.

pub const CAVEQUEST_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod autosave;
pub mod combat;
pub mod command;
pub mod config;
pub mod data_paths;
pub mod dice;
pub mod error;
pub mod health;
pub mod item;
pub mod loader;
pub mod monster;
pub mod player;
pub mod repl;
pub mod room;
pub mod save_files;
pub mod spinners;
pub mod style;
pub mod view;
pub mod world;

pub use error::GameError;
pub use item::Item;
pub use loader::{default_world, load_world};
pub use monster::Monster;
pub use player::Player;
pub use repl::{GameOutcome, GameSession, run_repl};
pub use room::Room;
pub use view::{View, ViewItem};
pub use world::{GameWorld, WorldObject};
