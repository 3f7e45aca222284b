use chrono::Utc;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::detail;
use super::palette::Palette;
use super::screens::{GroceryScreen, SavedScreen, SearchScreen};
use crate::models::{GroceryItem, Rating};
use crate::state::{Action, ClientState};

pub enum AppAction {
    Continue,         // Nothing to do
    Dispatch(Action), // Hand to the session
    Exit,             // q pressed
}

/// One tab of the client
pub(crate) trait Screen {
    fn title(&self) -> &'static str;
    fn render(&self, state: &ClientState, palette: &Palette, frame: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyCode, state: &ClientState) -> AppAction;
    /// Help line shown in the footer
    fn hints(&self) -> &'static str;
    /// While true, the screen receives every key, including global ones
    fn is_editing(&self) -> bool {
        false
    }
}

pub struct LarderApp {
    screens: Vec<Box<dyn Screen>>,
    active: usize,
    notice: Option<String>,
}

impl Default for LarderApp {
    fn default() -> Self {
        Self::new()
    }
}

impl LarderApp {
    pub fn new() -> Self {
        Self {
            screens: vec![
                Box::new(SearchScreen::new()),
                Box::new(SavedScreen::new()),
                Box::new(GroceryScreen::new()),
            ],
            active: 0,
            notice: None,
        }
    }

    /// One-off message for the footer, e.g. a startup warning
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn active_tab(&self) -> &'static str {
        self.screens[self.active].title()
    }

    pub fn handle_key(&mut self, key: KeyCode, state: &ClientState) -> AppAction {
        self.notice = None;

        // The recipe detail overlay takes every key while open
        if state.detail.is_some() {
            return detail_key(key, state);
        }

        if self.screens[self.active].is_editing() {
            return self.screens[self.active].handle_key(key, state);
        }

        match key {
            KeyCode::Char('q') => AppAction::Exit,
            KeyCode::Tab => {
                self.active = (self.active + 1) % self.screens.len();
                AppAction::Continue
            }
            KeyCode::BackTab => {
                self.active = (self.active + self.screens.len() - 1) % self.screens.len();
                AppAction::Continue
            }
            KeyCode::Char('t') => AppAction::Dispatch(Action::ToggleTheme),
            _ => self.screens[self.active].handle_key(key, state),
        }
    }

    pub fn render(&self, state: &ClientState, frame: &mut Frame) {
        let palette = Palette::for_theme(state.theme);
        frame.render_widget(Block::default().style(palette.base), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(1),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let titles: Vec<Line> = self.screens.iter().map(|s| Line::from(s.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .style(palette.base)
            .highlight_style(palette.accent.add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Larder ({} theme)", state.theme)),
            );
        frame.render_widget(tabs, chunks[0]);

        if state.detail.is_some() {
            detail::render(state, &palette, frame, chunks[1]);
        } else {
            self.screens[self.active].render(state, &palette, frame, chunks[1]);
        }

        let footer_text = match &self.notice {
            Some(notice) => notice.clone(),
            None if state.detail.is_some() => detail::HINTS.to_string(),
            None => format!(
                "{} | Tab: switch  t: theme  q: quit",
                self.screens[self.active].hints()
            ),
        };
        let footer = Paragraph::new(footer_text)
            .style(palette.muted)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }
}

fn detail_key(key: KeyCode, state: &ClientState) -> AppAction {
    let Some(recipe) = state.detail.as_ref().and_then(|d| d.recipe.as_ref()) else {
        // Still loading: only closing makes sense
        return match key {
            KeyCode::Esc | KeyCode::Backspace => AppAction::Dispatch(Action::DetailClosed),
            _ => AppAction::Continue,
        };
    };

    match key {
        KeyCode::Esc | KeyCode::Backspace => AppAction::Dispatch(Action::DetailClosed),
        KeyCode::Char('s') => {
            if state.is_saved(recipe.id) {
                AppAction::Dispatch(Action::UnsaveRecipe {
                    recipe_id: recipe.id,
                })
            } else {
                AppAction::Dispatch(Action::SaveRecipe {
                    recipe: recipe.clone(),
                    saved_at: Utc::now(),
                })
            }
        }
        KeyCode::Char('g') => {
            let items = recipe
                .extended_ingredients
                .iter()
                .map(|i| GroceryItem::new(i.original.trim()))
                .collect();
            AppAction::Dispatch(Action::AddGroceryItems { items })
        }
        KeyCode::Char(c) => match rating_key(c) {
            Some(rating) => AppAction::Dispatch(Action::RateRecipe {
                recipe_id: recipe.id,
                rating,
            }),
            None => AppAction::Continue,
        },
        _ => AppAction::Continue,
    }
}

/// '1'..='5' as a star rating
pub(crate) fn rating_key(c: char) -> Option<Rating> {
    let stars = c.to_digit(10)?;
    u8::try_from(stars)
        .ok()
        .and_then(|s| Rating::try_from(s).ok())
}
