use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::{FormField, RequestResult};

use crate::{
    app::AppState,
    ui::{components::card::Card, theme::Theme},
};

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Account => "Číslo účtu",
        FormField::Amount => "Částka (CZK)",
        FormField::Message => "Zpráva pro příjemce",
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Account => "19-2000145399/0800",
        FormField::Amount => "150.50",
        FormField::Message => "",
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card = Card::new("platba", &theme).focused(true);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    // label, input, field error, spacer for each field; generic error last
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .margin(1)
        .split(inner);

    let errors = state.result().and_then(RequestResult::errors);
    for (field, row) in FormField::ALL.into_iter().zip(rows.iter()) {
        let error = errors.and_then(|errors| errors.fields.get(field));
        render_field(frame, *row, state, field, error, &theme);
    }

    if let Some(generic) = errors.and_then(|errors| errors.generic.as_deref()) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                generic,
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ))
            .wrap(ratatui::widgets::Wrap { trim: true }),
            rows[3],
        );
    }
}

fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    field: FormField,
    error: Option<&str>,
    theme: &Theme,
) {
    let focused = state.form.focus == field;
    let value = state.form.input.get(field);
    let cursor = if focused { "│" } else { "" };

    let label_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let input = if value.is_empty() && !focused {
        Span::styled(placeholder(field), Style::default().fg(theme.border))
    } else {
        Span::styled(
            format!("{value}{cursor}"),
            Style::default().fg(theme.text),
        )
    };

    let mut lines = vec![
        Line::from(Span::styled(label(field), label_style)),
        Line::from(vec![Span::styled("› ", label_style), input]),
    ];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
