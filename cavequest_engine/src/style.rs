//! Terminal colors for Cave Quest output.
//!
//! [`GameStyle`] is blanket-implemented for anything that derefs to text, so
//! literals, `String`s and borrowed names can all be styled in place.

use colored::{ColoredString, Colorize};

type Rgb = (u8, u8, u8);

const GOLD: Rgb = (220, 180, 40);
const BLOOD: Rgb = (200, 50, 50);
const TORCH: Rgb = (223, 77, 10);
const DAMP_STONE: Rgb = (102, 208, 250);
const MOSS: Rgb = (110, 220, 110);
const ALARM: Rgb = (230, 30, 30);
const EMBER: Rgb = (230, 80, 80);
const SHADOW: Rgb = (75, 80, 75);

fn paint(text: &str, (r, g, b): Rgb) -> ColoredString {
    text.truecolor(r, g, b)
}

/// Named styles for each kind of game text.
pub trait GameStyle {
    fn styled_text(&self) -> &str;

    fn item_style(&self) -> ColoredString {
        paint(self.styled_text(), GOLD)
    }
    fn monster_style(&self) -> ColoredString {
        paint(self.styled_text(), BLOOD).bold()
    }
    fn room_style(&self) -> ColoredString {
        paint(self.styled_text(), TORCH)
    }
    fn room_titlebar_style(&self) -> ColoredString {
        paint(self.styled_text(), TORCH).bold().underline()
    }
    fn description_style(&self) -> ColoredString {
        paint(self.styled_text(), DAMP_STONE).italic()
    }
    fn exit_style(&self) -> ColoredString {
        paint(self.styled_text(), MOSS).italic()
    }
    fn success_style(&self) -> ColoredString {
        paint(self.styled_text(), MOSS)
    }
    fn error_style(&self) -> ColoredString {
        paint(self.styled_text(), ALARM)
    }
    fn denied_style(&self) -> ColoredString {
        paint(self.styled_text(), ALARM).italic()
    }
    fn combat_style(&self) -> ColoredString {
        paint(self.styled_text(), EMBER)
    }
    fn subheading_style(&self) -> ColoredString {
        self.styled_text().underline()
    }
    /// Section label, shown in brackets.
    fn section_style(&self) -> ColoredString {
        paint(&format!("[{}]", self.styled_text()), SHADOW)
    }
}

impl<T: AsRef<str> + ?Sized> GameStyle for T {
    fn styled_text(&self) -> &str {
        self.as_ref()
    }
}
