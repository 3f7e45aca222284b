use ratatui::style::{Color, Modifier, Style};

use crate::models::{Rating, Theme};

pub struct Palette {
    pub base: Style,
    pub accent: Style,
    pub muted: Style,
    pub done: Style,
    pub error: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                accent: Style::default().fg(Color::Blue),
                muted: Style::default().fg(Color::DarkGray).bg(Color::White),
                done: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
                error: Style::default().fg(Color::Red),
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                accent: Style::default().fg(Color::Yellow),
                muted: Style::default().fg(Color::DarkGray).bg(Color::Black),
                done: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
                error: Style::default().fg(Color::LightRed),
            },
        }
    }
}

/// "★★★☆☆"
pub fn stars(rating: Option<Rating>) -> String {
    let filled = rating.map_or(0, Rating::stars);
    (1..=Rating::MAX)
        .map(|i| if i <= filled { '★' } else { '☆' })
        .collect()
}
