//! View module.
//! Handlers never print directly. They push [`ViewItem`]s into the [`View`], which
//! groups them by section and renders everything at the end of the turn.

use colored::Colorize;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::save_files::{SaveSlot, format_modified};
use crate::style::GameStyle;

const ICON_SUCCESS: &str = "\u{2611}"; // ✔
const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_ENGINE: &str = "⚙";
const ICON_HARMED: &str = "\u{2623}";
const ICON_DEATH: &str = "☠";
const ICON_SWORD: &str = "⚔";

/// Aggregates everything to be shown for one pass through the REPL.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewItem>,
    /// Everything flushed so far; only kept when the view is not printing.
    pub transcript: Vec<ViewItem>,
    echo: bool,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    /// Create a view that renders to the terminal.
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
            transcript: Vec::new(),
            echo: true,
        }
    }

    /// Create a view that records flushed items instead of printing them.
    pub fn recording() -> Self {
        Self {
            echo: false,
            ..Self::new()
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Render (or record) the current frame and clear it.
    pub fn flush(&mut self) {
        if self.echo {
            self.width = termwidth();
            self.render();
            self.items.clear();
        } else {
            self.transcript.append(&mut self.items);
        }
    }

    fn render(&self) {
        for section in [
            Section::Transition,
            Section::Environment,
            Section::DirectResult,
            Section::Combat,
            Section::System,
        ] {
            let entries: Vec<&ViewItem> = self.items.iter().filter(|item| item.section() == section).collect();
            if entries.is_empty() {
                continue;
            }
            if let Some(label) = section.label() {
                println!("{:.>width$}\n", label.section_style(), width = self.width);
            }
            for item in entries {
                self.render_item(item);
            }
            println!();
        }
    }

    fn wrapped(&self, text: &str) -> String {
        fill(text, self.width.max(20))
    }

    #[allow(clippy::too_many_lines)]
    fn render_item(&self, item: &ViewItem) {
        match item {
            ViewItem::TransitionMessage(msg) => println!("{}", self.wrapped(msg).italic()),
            ViewItem::RoomDescription { name, description } => {
                println!("{}", name.room_titlebar_style());
                println!("{}", self.wrapped(description).description_style());
            },
            ViewItem::RoomItems(names) => {
                if names.is_empty() {
                    println!("{} {}", "Items here:".subheading_style(), "nothing".dimmed());
                } else {
                    let listed: Vec<String> = names.iter().map(|n| n.item_style().to_string()).collect();
                    println!("{} {}", "Items here:".subheading_style(), listed.join(", "));
                }
            },
            ViewItem::RoomMonster { name, health } => {
                println!("You see a {} here! ({health} hp)", name.monster_style());
            },
            ViewItem::RoomExits(exits) => {
                if exits.is_empty() {
                    println!("{}", "There are no obvious exits.".dimmed());
                } else {
                    println!("{}", "Exits:".subheading_style());
                    for exit in exits {
                        println!("   {} -> {}", exit.direction.exit_style(), exit.destination.room_style());
                    }
                }
            },
            ViewItem::ActionSuccess(msg) => {
                println!("{}", self.wrapped(&format!("{} {msg}", ICON_SUCCESS.success_style())));
            },
            ViewItem::ActionFailure(msg) => {
                println!(
                    "{}",
                    self.wrapped(&format!("{} {}", ICON_FAILURE.bright_red(), msg.denied_style()))
                );
            },
            ViewItem::Error(msg) => println!("{} {}", ICON_ERROR.error_style(), msg.error_style()),
            ViewItem::Inventory(names) => {
                println!("{}:", "Inventory".subheading_style());
                if names.is_empty() {
                    println!("   {}", "You have... nothing at all.".italic().dimmed());
                } else {
                    for name in names {
                        println!("   {}", name.item_style());
                    }
                }
            },
            ViewItem::PlayerStatus {
                name,
                location,
                health,
                strength,
            } => {
                println!("{}", name.subheading_style());
                println!("{:10} {}", "Location:", location.room_style());
                println!("{:10} {health}", "Health:");
                println!("{:10} {strength}", "Strength:");
            },
            ViewItem::MonsterEncounter { name, health } => {
                println!(
                    "{} You encounter a {}! ({health} hp)",
                    ICON_SWORD.combat_style(),
                    name.monster_style()
                );
            },
            ViewItem::PlayerAttack {
                monster,
                damage,
                monster_health,
            } => println!(
                "You attack the {} for {} damage! Its health is now {monster_health}.",
                monster.monster_style(),
                damage.to_string().combat_style()
            ),
            ViewItem::MonsterAttack {
                monster,
                damage,
                player_health,
            } => println!(
                "{:<3}The {} attacks you for {} damage! Your health is now {player_health}.",
                ICON_HARMED.bright_yellow(),
                monster.monster_style(),
                damage.to_string().combat_style()
            ),
            ViewItem::MonsterDefeated(name) => {
                println!("{} You defeated the {}!", ICON_SUCCESS.success_style(), name.monster_style());
            },
            ViewItem::PlayerDefeated => {
                println!("{} {}", ICON_DEATH.error_style(), "You have been defeated!".error_style().bold());
            },
            ViewItem::EngineMessage(msg) => println!("{} {}", ICON_ENGINE.dimmed(), msg.italic()),
            ViewItem::GameSaved { slot, path } => {
                println!("{}: \"{slot}\" ({path})", "Game Saved".success_style().bold());
            },
            ViewItem::GameLoaded { slot, path } => {
                println!("{}: \"{slot}\" ({path})", "Game Loaded".success_style().bold());
            },
            ViewItem::SavedGamesList { directory, entries } => {
                println!("{}", format!("Saved games in {directory}/").subheading_style());
                if entries.is_empty() {
                    println!("    {}", "No saved games found. Use `save` to create one.".italic());
                }
                for entry in entries {
                    match entry.modified {
                        Some(modified) => println!(
                            "  • {} saved {}",
                            entry.slot.as_str().item_style(),
                            format_modified(modified).dimmed()
                        ),
                        None => println!("  • {}", entry.slot.as_str().item_style()),
                    }
                }
            },
            ViewItem::Help(lines) => {
                println!("{}", "Commands".subheading_style());
                for (command, description) in lines {
                    println!("   {:<24} {}", command.item_style(), description.dimmed());
                }
            },
            ViewItem::QuitSummary { name, turns, health } => {
                println!(
                    "{:^width$}",
                    "GAME OVER".black().on_yellow(),
                    width = self.width
                );
                println!("{:10} {}", "Player:", name.subheading_style());
                println!("{:10} {turns}", "Turns:");
                println!("{:10} {health}", "Health:");
            },
        }
    }
}

/// Subsections of the output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    /// Movement text shown before the scene.
    Transition,
    /// Room description, items, monster and exits.
    Environment,
    /// Direct results of the player's command.
    DirectResult,
    /// Combat exchanges.
    Combat,
    /// Meta/game-system feedback (saves, help, quit).
    System,
}

impl Section {
    fn label(self) -> Option<&'static str> {
        match self {
            Section::Transition => None,
            Section::Environment => Some("scene"),
            Section::DirectResult => Some("results"),
            Section::Combat => Some("combat"),
            Section::System => Some("game"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitLine {
    pub direction: String,
    pub destination: String,
}

/// The various kinds of information and messages that may be shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    EngineMessage(String),
    Error(String),
    GameLoaded {
        slot: String,
        path: String,
    },
    GameSaved {
        slot: String,
        path: String,
    },
    Help(Vec<(String, String)>),
    Inventory(Vec<String>),
    MonsterAttack {
        monster: String,
        damage: i32,
        player_health: i32,
    },
    MonsterDefeated(String),
    MonsterEncounter {
        name: String,
        health: i32,
    },
    PlayerAttack {
        monster: String,
        damage: i32,
        monster_health: i32,
    },
    PlayerDefeated,
    PlayerStatus {
        name: String,
        location: String,
        health: i32,
        strength: i32,
    },
    QuitSummary {
        name: String,
        turns: usize,
        health: i32,
    },
    RoomDescription {
        name: String,
        description: String,
    },
    RoomExits(Vec<ExitLine>),
    RoomItems(Vec<String>),
    RoomMonster {
        name: String,
        health: i32,
    },
    SavedGamesList {
        directory: String,
        entries: Vec<SaveSlot>,
    },
    TransitionMessage(String),
}

impl ViewItem {
    /// Classify a view item into a top-level output section.
    pub fn section(&self) -> Section {
        match self {
            ViewItem::TransitionMessage(_) => Section::Transition,
            ViewItem::RoomDescription { .. }
            | ViewItem::RoomItems(_)
            | ViewItem::RoomMonster { .. }
            | ViewItem::RoomExits(_) => Section::Environment,
            ViewItem::ActionSuccess(_)
            | ViewItem::ActionFailure(_)
            | ViewItem::Error(_)
            | ViewItem::Inventory(_)
            | ViewItem::PlayerStatus { .. } => Section::DirectResult,
            ViewItem::MonsterEncounter { .. }
            | ViewItem::PlayerAttack { .. }
            | ViewItem::MonsterAttack { .. }
            | ViewItem::MonsterDefeated(_)
            | ViewItem::PlayerDefeated => Section::Combat,
            ViewItem::EngineMessage(_)
            | ViewItem::GameLoaded { .. }
            | ViewItem::GameSaved { .. }
            | ViewItem::SavedGamesList { .. }
            | ViewItem::Help(_)
            | ViewItem::QuitSummary { .. } => Section::System,
        }
    }
}
