use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `WorldDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    Unreachable { room: String, start: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::Unreachable { room, start } => {
                write!(f, "room '{room}' cannot be reached from '{start}'")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a `WorldDef`.
///
/// `item_kinds` lists the item names the engine knows how to construct.
///
/// ```
/// use cavequest_data::{GameDef, PlayerDef, RoomDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     game: GameDef {
///         title: "Demo".into(),
///         intro: String::new(),
///         player: PlayerDef {
///             start_room: "Entrance".into(),
///             ..PlayerDef::default()
///         },
///     },
///     rooms: vec![RoomDef {
///         name: "Entrance".into(),
///         desc: "A cave mouth.".into(),
///         exits: Vec::new(),
///     }],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world, &["Health Potion"]).is_empty());
/// ```
pub fn validate_world(world: &WorldDef, item_kinds: &[&str]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut rooms = HashSet::new();
    track_ids("room", world.rooms.iter().map(|r| r.name.as_str()), &mut rooms, &mut errors);
    let kinds: HashSet<String> = item_kinds.iter().map(|k| (*k).to_string()).collect();

    let start = world.game.player.start_room.as_str();
    if start.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "player start room missing".to_string(),
        });
    } else {
        check_ref("room", start, &rooms, "player start room".to_string(), &mut errors);
    }

    if world.game.player.health <= 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("player starting health must be positive ({})", world.game.player.health),
        });
    }

    for room in &world.rooms {
        let mut directions = HashSet::new();
        for exit in &room.exits {
            if !directions.insert(exit.direction.to_lowercase()) {
                errors.push(ValidationError::DuplicateId {
                    kind: "exit",
                    id: format!("{} -> {}", room.name, exit.direction),
                });
            }
            check_ref(
                "room",
                &exit.to,
                &rooms,
                format!("room '{}' exit '{}'", room.name, exit.direction),
                &mut errors,
            );
        }
    }

    for placement in &world.items {
        check_ref("item kind", &placement.item, &kinds, "item placement".to_string(), &mut errors);
        check_ref(
            "room",
            &placement.room,
            &rooms,
            format!("placement of '{}'", placement.item),
            &mut errors,
        );
    }

    let mut guarded = HashSet::new();
    for monster in &world.monsters {
        check_ref(
            "room",
            &monster.room,
            &rooms,
            format!("monster '{}'", monster.name),
            &mut errors,
        );
        if monster.health <= 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("monster '{}' health must be positive ({})", monster.name, monster.health),
            });
        }
        // at most one monster per room
        if !guarded.insert(monster.room.as_str()) {
            errors.push(ValidationError::DuplicateId {
                kind: "monster room",
                id: monster.room.clone(),
            });
        }
    }

    if rooms.contains(start) {
        for room in unreachable_rooms(world, start) {
            errors.push(ValidationError::Unreachable {
                room,
                start: start.to_string(),
            });
        }
    }

    errors
}

/// Breadth-first walk over exits, returning every room never visited from `start`.
fn unreachable_rooms(world: &WorldDef, start: &str) -> Vec<String> {
    let edges: HashMap<&str, Vec<&str>> = world
        .rooms
        .iter()
        .map(|room| (room.name.as_str(), room.exits.iter().map(|e| e.to.as_str()).collect()))
        .collect();

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for &next in edges.get(current).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    world
        .rooms
        .iter()
        .filter(|room| !seen.contains(room.name.as_str()))
        .map(|room| room.name.clone())
        .collect()
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: &[&str] = &["Health Potion", "Heal", "Strength"];

    fn room(name: &str, exits: &[(&str, &str)]) -> RoomDef {
        RoomDef {
            name: name.to_string(),
            desc: format!("Room {name}"),
            exits: exits
                .iter()
                .map(|(direction, to)| ExitDef {
                    direction: (*direction).to_string(),
                    to: (*to).to_string(),
                })
                .collect(),
        }
    }

    fn base_world() -> WorldDef {
        WorldDef {
            game: GameDef {
                title: "Demo".into(),
                intro: String::new(),
                player: PlayerDef {
                    start_room: "Entrance".into(),
                    ..PlayerDef::default()
                },
            },
            rooms: vec![
                room("Entrance", &[("north", "Hall")]),
                room("Hall", &[("south", "Entrance")]),
            ],
            ..WorldDef::default()
        }
    }

    #[test]
    fn valid_world_has_no_errors() {
        assert!(validate_world(&base_world(), KINDS).is_empty());
    }

    #[test]
    fn duplicate_rooms_are_reported() {
        let mut world = base_world();
        world.rooms.push(room("Hall", &[]));

        let errors = validate_world(&world, KINDS);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateId { kind, id } if *kind == "room" && id == "Hall"))
        );
    }

    #[test]
    fn dangling_exits_are_reported() {
        let mut world = base_world();
        world.rooms[1].exits.push(ExitDef {
            direction: "east".into(),
            to: "Vault".into(),
        });

        let errors = validate_world(&world, KINDS);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "room" && id == "Vault")
        ));
    }

    #[test]
    fn one_way_edges_leave_rooms_unreachable() {
        let mut world = base_world();
        // Treasure Room points back to the Hall but nothing leads in
        world.rooms.push(room("Treasure Room", &[("west", "Hall")]));

        let errors = validate_world(&world, KINDS);
        assert_eq!(
            errors,
            vec![ValidationError::Unreachable {
                room: "Treasure Room".into(),
                start: "Entrance".into(),
            }]
        );
    }

    #[test]
    fn padded_start_room_must_match_exactly() {
        let mut world = base_world();
        world.game.player.start_room = " Entrance".into();

        let errors = validate_world(&world, KINDS);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "room" && id == " Entrance")
        ));
    }

    #[test]
    fn unknown_item_kinds_are_reported() {
        let mut world = base_world();
        world.items.push(ItemPlacementDef {
            item: "Vorpal Sword".into(),
            room: "Hall".into(),
        });

        let errors = validate_world(&world, KINDS);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "item kind" && id == "Vorpal Sword")
        ));
    }

    #[test]
    fn two_monsters_in_one_room_are_rejected() {
        let mut world = base_world();
        for name in ["Goblin", "Troll"] {
            world.monsters.push(MonsterDef {
                name: name.into(),
                health: 30,
                room: "Hall".into(),
            });
        }

        let errors = validate_world(&world, KINDS);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateId { kind, .. } if *kind == "monster room"))
        );
    }

    #[test]
    fn world_defs_deserialize_from_toml() {
        let raw = r#"
            [game]
            title = "Demo"
            [game.player]
            start_room = "Entrance"

            [[rooms]]
            name = "Entrance"
            desc = "A cave mouth."
        "#;
        let world: WorldDef = toml::from_str(raw).unwrap();
        assert_eq!(world.game.player.health, 100);
        assert_eq!(world.game.player.strength, 10);
        assert!(validate_world(&world, KINDS).is_empty());
    }
}
