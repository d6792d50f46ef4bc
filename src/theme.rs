use ratatui::style::Color;

use crate::{config::ThemeName, timer::Accent};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub work_color: Color,
    pub relax_color: Color,
    pub border_color: Color,
    pub muted_color: Color,
    pub background: Color,
}

impl Theme {
    pub fn get(name: ThemeName) -> Self {
        match name {
            ThemeName::Nord => Theme {
                work_color: Color::Rgb(191, 97, 106),
                relax_color: Color::Rgb(163, 190, 140),
                border_color: Color::Rgb(76, 86, 106),
                muted_color: Color::Rgb(136, 192, 208),
                background: Color::Rgb(46, 52, 64),
            },
            ThemeName::Dracula => Theme {
                work_color: Color::Rgb(255, 85, 85),
                relax_color: Color::Rgb(80, 250, 123),
                border_color: Color::Rgb(98, 114, 164),
                muted_color: Color::Rgb(189, 147, 249),
                background: Color::Rgb(40, 42, 54),
            },
            ThemeName::Gruvbox => Theme {
                work_color: Color::Rgb(251, 73, 52),
                relax_color: Color::Rgb(184, 187, 38),
                border_color: Color::Rgb(146, 131, 116),
                muted_color: Color::Rgb(213, 196, 161),
                background: Color::Rgb(40, 40, 40),
            },
            ThemeName::Default => Theme {
                work_color: Color::Red,
                relax_color: Color::Green,
                border_color: Color::DarkGray,
                muted_color: Color::Gray,
                background: Color::Black,
            },
        }
    }

    pub fn accent(&self, accent: Accent) -> Color {
        match accent {
            Accent::Work => self.work_color,
            Accent::Relax => self.relax_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accents() {
        let theme = Theme::get(ThemeName::Default);
        assert_eq!(theme.accent(Accent::Work), Color::Red);
        assert_eq!(theme.accent(Accent::Relax), Color::Green);
    }

    #[test]
    fn test_every_theme_distinguishes_phases() {
        let mut name = ThemeName::Default;
        for _ in 0..4 {
            let theme = Theme::get(name);
            assert_ne!(theme.accent(Accent::Work), theme.accent(Accent::Relax));
            name = name.next();
        }
    }
}
