use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::palette::{Palette, stars};
use crate::state::ClientState;

pub(crate) const HINTS: &str = "1-5: rate  s: save/unsave  g: add ingredients to grocery list  Esc: back";

/// Full-body view of the recipe being inspected
pub(crate) fn render(state: &ClientState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let Some(detail) = state.detail.as_ref() else {
        return;
    };

    let Some(recipe) = detail.recipe.as_ref() else {
        let text = match &state.detail_status.error {
            Some(error) => Line::styled(error.clone(), palette.error),
            None => Line::from("Loading recipe..."),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Recipe {}", detail.recipe_id));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // Facts
            Constraint::Percentage(40), // Ingredients
            Constraint::Min(1),         // Summary and instructions
        ])
        .split(area);

    let mut facts = vec![Line::from(vec![
        Span::styled(stars(recipe.user_rating), palette.accent),
        Span::raw(if state.is_saved(recipe.id) { "  saved" } else { "" }),
    ])];
    let mut timing = Vec::new();
    if let Some(minutes) = recipe.ready_in_minutes {
        timing.push(format!("ready in {minutes} min"));
    }
    if let Some(servings) = recipe.servings {
        timing.push(format!("serves {servings}"));
    }
    facts.push(Line::from(timing.join(", ")));
    frame.render_widget(
        Paragraph::new(facts).block(
            Block::default()
                .borders(Borders::ALL)
                .title(recipe.title.clone()),
        ),
        chunks[0],
    );

    let ingredient_lines: Vec<Line> = recipe
        .extended_ingredients
        .iter()
        .map(|i| Line::from(format!("- {}", i.original.trim())))
        .collect();
    frame.render_widget(
        Paragraph::new(ingredient_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Ingredients")),
        chunks[1],
    );

    // Provider HTML is only ever shown as stripped plain text
    let mut body = String::new();
    if let Some(summary) = recipe.summary_text() {
        body.push_str(&summary);
        body.push_str("\n\n");
    }
    match recipe.instructions_text() {
        Some(instructions) if !instructions.is_empty() => body.push_str(&instructions),
        _ => body.push_str("No instructions provided."),
    }
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Instructions")),
        chunks[2],
    );
}
