use std::collections::HashMap;

use gametools::{Spinner, Wedge};

/// Pools of interchangeable flavor text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinnerType {
    Movement,
    NoExit,
    QuitMsg,
    UnrecognizedCommand,
}

impl SpinnerType {
    fn lines(self) -> &'static [&'static str] {
        match self {
            SpinnerType::Movement => &[
                "You make your way",
                "You head",
                "You pick your way",
                "You press on",
            ],
            SpinnerType::NoExit => &[
                "You can't go that way.",
                "Solid rock blocks your path.",
                "There's no passage in that direction.",
            ],
            SpinnerType::QuitMsg => &[
                "Thanks for playing!",
                "The cave will wait for your return.",
                "Farewell, adventurer.",
            ],
            SpinnerType::UnrecognizedCommand => &[
                "I don't understand that command.",
                "I don't understand that. Try \"help\".",
            ],
        }
    }
}

/// Build the built-in spinner map used by every new world.
pub fn default_spinners() -> HashMap<SpinnerType, Spinner<String>> {
    [
        SpinnerType::Movement,
        SpinnerType::NoExit,
        SpinnerType::QuitMsg,
        SpinnerType::UnrecognizedCommand,
    ]
    .into_iter()
    .map(|kind| {
        let wedges = kind.lines().iter().map(|line| Wedge::new((*line).to_string())).collect();
        (kind, Spinner::new(wedges))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_spinner_has_text() {
        let spinners = default_spinners();
        assert_eq!(spinners.len(), 4);
        for spinner in spinners.values() {
            assert!(spinner.spin().is_some());
        }
    }

    #[test]
    fn unrecognized_lines_all_say_so() {
        let spinners = default_spinners();
        for _ in 0..10 {
            let line = spinners[&SpinnerType::UnrecognizedCommand].spin().unwrap();
            assert!(line.starts_with("I don't understand"));
        }
    }
}
