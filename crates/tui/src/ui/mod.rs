pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::AppState;
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Form + result
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[1]);
    screens::form::render(frame, content[0], state);
    screens::result::render(frame, content[1], state);

    render_bottom_bar(frame, layout[2], &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let last = state
        .last_result_at
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = state
        .result()
        .map(|result| result.state().label())
        .unwrap_or("idle");

    let line = Line::from(vec![
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.api_url)),
        Span::styled("Stav", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {status}  ")),
        Span::styled("Poslední", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {last}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let parts = components::hints::hints_to_spans(&components::hints::FORM_HINTS, theme);
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
