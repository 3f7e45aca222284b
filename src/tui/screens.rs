use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::{AppAction, Screen, rating_key};
use super::palette::{Palette, stars};
use crate::models::{GroceryItem, parse_ingredient_query};
use crate::state::{Action, ClientState};

/// Move a list cursor, staying inside `len` items
fn step(selected: usize, len: usize, key: KeyCode) -> usize {
    match key {
        KeyCode::Up => selected.saturating_sub(1),
        KeyCode::Down if len > 0 => (selected + 1).min(len - 1),
        _ => selected,
    }
}

fn clamp(selected: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| selected.min(len - 1))
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected: usize,
    title: String,
    palette: &Palette,
) {
    let mut list_state = ListState::default().with_selected(clamp(selected, items.len()));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(palette.accent)
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub(crate) struct SearchScreen {
    current_input: String,
    terms: Vec<String>,
    selected: usize,
    editing: bool,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self {
            current_input: String::new(),
            terms: Vec::new(),
            selected: 0,
            editing: false,
        }
    }

    fn commit_input(&mut self) {
        for term in parse_ingredient_query(&self.current_input) {
            if !self.terms.contains(&term) {
                self.terms.push(term);
            }
        }
        self.current_input.clear();
    }
}

impl Screen for SearchScreen {
    fn title(&self) -> &'static str {
        "Search"
    }

    fn hints(&self) -> &'static str {
        if self.editing {
            "Type an ingredient, Enter to add (Enter on empty to search), Esc: browse results"
        } else {
            "/: edit ingredients  Enter: open  s: save/unsave  x: clear ingredients"
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn render(&self, state: &ClientState, palette: &Palette, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let mut spans: Vec<Span> = self
            .terms
            .iter()
            .map(|t| Span::styled(format!("[{t}] "), palette.accent))
            .collect();
        spans.push(Span::raw(self.current_input.as_str()));
        let input_title = if self.editing {
            "What's in your kitchen? (editing)"
        } else {
            "What's in your kitchen?"
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .block(Block::default().borders(Borders::ALL).title(input_title)),
            chunks[0],
        );

        let search = &state.search;
        let title = if search.status.in_flight {
            "Searching...".to_string()
        } else if let Some(error) = &search.status.error {
            format!("Results - {error}")
        } else {
            format!("Results ({})", search.results.len())
        };

        let items: Vec<ListItem> = search
            .results
            .iter()
            .map(|recipe| {
                let marker = if state.is_saved(recipe.id) { " (saved)" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", stars(recipe.user_rating))),
                    Span::raw(recipe.title.clone()),
                    Span::styled(marker, palette.muted),
                ]))
            })
            .collect();
        render_list(frame, chunks[1], items, self.selected, title, palette);
    }

    fn handle_key(&mut self, key: KeyCode, state: &ClientState) -> AppAction {
        if self.editing {
            return match key {
                KeyCode::Char(c) => {
                    self.current_input.push(c);
                    AppAction::Continue
                }
                KeyCode::Backspace => {
                    if self.current_input.pop().is_none() {
                        self.terms.pop();
                    }
                    AppAction::Continue
                }
                KeyCode::Enter if self.current_input.trim().is_empty() => {
                    if self.terms.is_empty() {
                        return AppAction::Continue;
                    }
                    self.editing = false;
                    self.selected = 0;
                    AppAction::Dispatch(Action::SearchRequested {
                        ingredients: self.terms.clone(),
                    })
                }
                KeyCode::Enter => {
                    self.commit_input();
                    AppAction::Continue
                }
                KeyCode::Esc => {
                    self.editing = false;
                    AppAction::Continue
                }
                _ => AppAction::Continue,
            };
        }

        let results = &state.search.results;
        match key {
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.editing = true;
                AppAction::Continue
            }
            KeyCode::Char('x') => {
                self.terms.clear();
                AppAction::Continue
            }
            KeyCode::Up | KeyCode::Down => {
                self.selected = step(self.selected, results.len(), key);
                AppAction::Continue
            }
            KeyCode::Enter => match clamp(self.selected, results.len()) {
                Some(i) => AppAction::Dispatch(Action::DetailRequested {
                    recipe_id: results[i].id,
                }),
                None => AppAction::Continue,
            },
            KeyCode::Char('s') => match clamp(self.selected, results.len()) {
                Some(i) if state.is_saved(results[i].id) => {
                    AppAction::Dispatch(Action::UnsaveRecipe {
                        recipe_id: results[i].id,
                    })
                }
                Some(i) => AppAction::Dispatch(Action::SaveRecipe {
                    recipe: results[i].clone(),
                    saved_at: chrono::Utc::now(),
                }),
                None => AppAction::Continue,
            },
            _ => AppAction::Continue,
        }
    }
}

pub(crate) struct SavedScreen {
    selected: usize,
}

impl SavedScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Screen for SavedScreen {
    fn title(&self) -> &'static str {
        "Saved"
    }

    fn hints(&self) -> &'static str {
        "Enter: open  1-5: rate  d: unsave  g: build grocery list from all saved"
    }

    fn render(&self, state: &ClientState, palette: &Palette, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = state
            .saved_recipes
            .iter()
            .map(|saved| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", stars(saved.recipe.user_rating))),
                    Span::raw(saved.recipe.title.clone()),
                    Span::styled(
                        format!("  saved {}", saved.saved_at.format("%Y-%m-%d")),
                        palette.muted,
                    ),
                ]))
            })
            .collect();

        let title = match (&state.grocery_status.error, state.grocery_status.in_flight) {
            (_, true) => "Saved recipes - building grocery list...".to_string(),
            (Some(error), false) => format!("Saved recipes - {error}"),
            (None, false) => format!("Saved recipes ({})", state.saved_recipes.len()),
        };
        render_list(frame, area, items, self.selected, title, palette);
    }

    fn handle_key(&mut self, key: KeyCode, state: &ClientState) -> AppAction {
        let saved = &state.saved_recipes;
        let current = clamp(self.selected, saved.len()).map(|i| saved[i].id());

        match key {
            KeyCode::Up | KeyCode::Down => {
                self.selected = step(self.selected, saved.len(), key);
                AppAction::Continue
            }
            KeyCode::Enter => match current {
                Some(recipe_id) => AppAction::Dispatch(Action::DetailRequested { recipe_id }),
                None => AppAction::Continue,
            },
            KeyCode::Char('d') => match current {
                Some(recipe_id) => AppAction::Dispatch(Action::UnsaveRecipe { recipe_id }),
                None => AppAction::Continue,
            },
            KeyCode::Char('g') => AppAction::Dispatch(Action::GroceryListRequested {
                recipe_ids: saved.iter().map(|s| s.id()).collect(),
            }),
            KeyCode::Char(c) => match (current, rating_key(c)) {
                (Some(recipe_id), Some(rating)) => {
                    AppAction::Dispatch(Action::RateRecipe { recipe_id, rating })
                }
                _ => AppAction::Continue,
            },
            _ => AppAction::Continue,
        }
    }
}

pub(crate) struct GroceryScreen {
    current_input: String,
    selected: usize,
    editing: bool,
}

impl GroceryScreen {
    pub fn new() -> Self {
        Self {
            current_input: String::new(),
            selected: 0,
            editing: false,
        }
    }
}

impl Screen for GroceryScreen {
    fn title(&self) -> &'static str {
        "Grocery"
    }

    fn hints(&self) -> &'static str {
        if self.editing {
            "Type an item, Enter to add, Esc to cancel"
        } else {
            "a: add item  Space: check  d: remove  c: clear completed"
        }
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn render(&self, state: &ClientState, palette: &Palette, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let items: Vec<ListItem> = state
            .grocery_list
            .iter()
            .map(|item| {
                if item.checked {
                    ListItem::new(Line::styled(format!("[x] {}", item.name), palette.done))
                } else {
                    ListItem::new(format!("[ ] {}", item.name))
                }
            })
            .collect();

        let (checked, total) = state.grocery_progress();
        let title = format!("Grocery list - {checked} of {total} completed");
        render_list(frame, chunks[0], items, self.selected, title, palette);

        let input_title = if self.editing {
            "New item (Enter to add)"
        } else {
            "Press a to add an item"
        };
        frame.render_widget(
            Paragraph::new(self.current_input.as_str())
                .block(Block::default().borders(Borders::ALL).title(input_title)),
            chunks[1],
        );
    }

    fn handle_key(&mut self, key: KeyCode, state: &ClientState) -> AppAction {
        if self.editing {
            return match key {
                KeyCode::Char(c) => {
                    self.current_input.push(c);
                    AppAction::Continue
                }
                KeyCode::Backspace => {
                    self.current_input.pop();
                    AppAction::Continue
                }
                KeyCode::Enter => {
                    let name = self.current_input.trim().to_string();
                    self.current_input.clear();
                    self.editing = false;
                    if name.is_empty() {
                        AppAction::Continue
                    } else {
                        AppAction::Dispatch(Action::AddGroceryItems {
                            items: vec![GroceryItem::new(name)],
                        })
                    }
                }
                KeyCode::Esc => {
                    self.current_input.clear();
                    self.editing = false;
                    AppAction::Continue
                }
                _ => AppAction::Continue,
            };
        }

        let list = &state.grocery_list;
        let current = clamp(self.selected, list.len()).map(|i| list[i].id);

        match key {
            KeyCode::Char('a') => {
                self.editing = true;
                AppAction::Continue
            }
            KeyCode::Up | KeyCode::Down => {
                self.selected = step(self.selected, list.len(), key);
                AppAction::Continue
            }
            KeyCode::Char(' ') | KeyCode::Enter => match current {
                Some(id) => AppAction::Dispatch(Action::ToggleGroceryItem { id }),
                None => AppAction::Continue,
            },
            KeyCode::Char('d') | KeyCode::Delete => match current {
                Some(id) => AppAction::Dispatch(Action::RemoveGroceryItem { id }),
                None => AppAction::Continue,
            },
            KeyCode::Char('c') => AppAction::Dispatch(Action::ClearCompleted),
            _ => AppAction::Continue,
        }
    }
}
