use serde::{Deserialize, Serialize};

/// Rooms are referenced by their display name throughout world data.
pub type RoomName = String;

/// Top-level world data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub items: Vec<ItemPlacementDef>,
    #[serde(default)]
    pub monsters: Vec<MonsterDef>,
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    pub player: PlayerDef,
}

/// Starting stats and location for the player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub start_room: RoomName,
    #[serde(default = "default_health")]
    pub health: i32,
    #[serde(default = "default_strength")]
    pub strength: i32,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            start_room: String::new(),
            health: default_health(),
            strength: default_strength(),
        }
    }
}

fn default_health() -> i32 {
    100
}

fn default_strength() -> i32 {
    10
}

/// Room definition used by the engine at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub name: RoomName,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
}

/// A single directed edge. Reverse travel needs its own exit on the destination room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub direction: String,
    pub to: RoomName,
}

/// Places one instance of a catalog item in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPlacementDef {
    /// Catalog name of the item (e.g. "Health Potion").
    pub item: String,
    pub room: RoomName,
}

/// A monster guarding a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterDef {
    pub name: String,
    pub health: i32,
    pub room: RoomName,
}
