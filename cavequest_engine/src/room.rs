//! Rooms and their exits.
//!
//! Rooms are stored in the world by name and connect to each other through
//! direction keys. A room may hold any number of items and at most one monster.

use std::collections::HashMap;

use crate::health::LivingEntity;
use crate::view::{ExitLine, View, ViewItem};
use crate::{Item, Monster, WorldObject};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub items: Vec<Item>,
    /// Lowercase direction -> destination room name.
    pub connections: HashMap<String, String>,
    pub monster: Option<Monster>,
}

impl WorldObject for Room {
    fn name(&self) -> &str {
        &self.name
    }

    /// Room name, description, item listing and any monster present.
    fn describe(&self) -> String {
        let items = if self.items.is_empty() {
            "nothing".to_string()
        } else {
            self.items.iter().map(|item| item.name.as_str()).collect::<Vec<_>>().join(", ")
        };
        let mut text = format!("{}: {}\nItems here: {items}", self.name, self.description);
        if let Some(monster) = &self.monster {
            text.push_str(&format!("\nYou see a {} here!", monster.name));
        }
        text
    }
}

impl Room {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    /// Add or replace the exit in `direction`.
    pub fn connect(&mut self, direction: &str, to: &str) {
        self.connections.insert(direction.trim().to_lowercase(), to.to_string());
    }

    /// Destination room name for `direction`, if an exit exists.
    pub fn destination(&self, direction: &str) -> Option<&str> {
        self.connections
            .get(&direction.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove and return the first item whose name matches, ignoring case.
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.matches(name))?;
        Some(self.items.remove(index))
    }

    /// Exits sorted by direction for stable display.
    pub fn exit_lines(&self) -> Vec<ExitLine> {
        let mut exits: Vec<ExitLine> = self
            .connections
            .iter()
            .map(|(direction, destination)| ExitLine {
                direction: direction.clone(),
                destination: destination.clone(),
            })
            .collect();
        exits.sort_by(|a, b| a.direction.cmp(&b.direction));
        exits
    }

    /// Push a full description of this room to the view.
    pub fn show(&self, view: &mut View) {
        view.push(ViewItem::RoomDescription {
            name: self.name.clone(),
            description: self.description.clone(),
        });
        view.push(ViewItem::RoomItems(
            self.items.iter().map(|item| item.name.clone()).collect(),
        ));
        if let Some(monster) = &self.monster {
            view.push(ViewItem::RoomMonster {
                name: monster.name.clone(),
                health: monster.display_health(),
            });
        }
        view.push(ViewItem::RoomExits(self.exit_lines()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{HEALTH_POTION, catalog_item};

    fn hall() -> Room {
        let mut room = Room::new("Hall", "A large hall with torches on the walls.");
        room.connect("south", "Entrance");
        room.connect("East", "Treasure Room");
        room
    }

    #[test]
    fn connect_normalizes_direction() {
        let room = hall();
        assert_eq!(room.destination("east"), Some("Treasure Room"));
        assert_eq!(room.destination("EAST"), Some("Treasure Room"));
        assert_eq!(room.destination("up"), None);
    }

    #[test]
    fn connect_replaces_existing_exit() {
        let mut room = hall();
        room.connect("south", "Cellar");
        assert_eq!(room.destination("south"), Some("Cellar"));
        assert_eq!(room.connections.len(), 2);
    }

    #[test]
    fn take_item_removes_first_match() {
        let mut room = hall();
        room.add_item(catalog_item(HEALTH_POTION).unwrap());
        room.add_item(catalog_item(HEALTH_POTION).unwrap());
        assert!(room.take_item("health potion").is_some());
        assert_eq!(room.items.len(), 1);
        assert!(room.take_item("sword").is_none());
    }

    #[test]
    fn describe_lists_items_and_monster() {
        let mut room = hall();
        assert!(room.describe().ends_with("Items here: nothing"));
        room.add_item(catalog_item(HEALTH_POTION).unwrap());
        room.monster = Some(Monster::new("Goblin", 30));
        let text = room.describe();
        assert!(text.starts_with("Hall: A large hall"));
        assert!(text.contains("Items here: Health Potion"));
        assert!(text.ends_with("You see a Goblin here!"));
    }

    #[test]
    fn exit_lines_are_sorted() {
        let room = hall();
        let directions: Vec<_> = room.exit_lines().into_iter().map(|e| e.direction).collect();
        assert_eq!(directions, vec!["east", "south"]);
    }
}
