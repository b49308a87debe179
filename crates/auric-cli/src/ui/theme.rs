//! Explicit UI theme passed through every render call.
//!
//! There is no ambient theme state: the active [`Theme`] lives on the app and
//! flows into draw functions as a value, with a single top-level toggle.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub gain: Color,
    pub loss: Color,
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(15, 17, 22),
            panel: Color::Rgb(28, 31, 40),
            text: Color::Rgb(226, 232, 240),
            muted: Color::Rgb(100, 110, 130),
            accent: Color::Rgb(245, 180, 60),
            gain: Color::Rgb(74, 222, 128),
            loss: Color::Rgb(248, 113, 113),
        }
    }

    pub const fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(246, 247, 249),
            panel: Color::Rgb(255, 255, 255),
            text: Color::Rgb(20, 26, 38),
            muted: Color::Rgb(130, 140, 155),
            accent: Color::Rgb(180, 125, 20),
            gain: Color::Rgb(22, 140, 70),
            loss: Color::Rgb(190, 40, 40),
        }
    }

    /// The single theme switch: dark <-> light.
    pub const fn toggled(self) -> Self {
        match self.name.as_bytes() {
            b"dark" => Self::light(),
            _ => Self::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let theme = Theme::dark();
        assert_eq!(theme.toggled().name, "light");
        assert_eq!(theme.toggled().toggled().name, "dark");
    }
}
