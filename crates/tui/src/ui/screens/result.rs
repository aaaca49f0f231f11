use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::RequestResult;

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, qr_preview},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card = Card::new("QR platba", &theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Min(0),    // preview
            Constraint::Length(1), // file
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(status_line(state.result(), &theme)).alignment(Alignment::Center),
        rows[0],
    );

    if let Some(preview) = &state.preview {
        qr_preview::render(frame, rows[1], preview, &theme);
    }

    if let Some(handle) = state.presenter.image() {
        let line = Line::from(vec![
            Span::styled("Soubor: ", Style::default().fg(theme.text_muted)),
            Span::raw(handle.path().display().to_string()),
        ]);
        frame.render_widget(Paragraph::new(line), rows[2]);
    }
}

fn status_line(result: Option<&RequestResult>, theme: &Theme) -> Line<'static> {
    match result {
        None => Line::from(Span::styled(
            "Vyplňte číslo účtu a částku.",
            Style::default().fg(theme.text_muted),
        )),
        Some(RequestResult::Loading) => Line::from(Span::styled(
            "Generuji QR kód…",
            Style::default().fg(theme.warning),
        )),
        Some(RequestResult::Success(image)) => Line::from(Span::styled(
            format!("QR kód připraven ({} B)", image.bytes().len()),
            Style::default().fg(theme.positive),
        )),
        Some(RequestResult::Failed(_)) => Line::from(Span::styled(
            "QR kód není k dispozici.",
            Style::default().fg(theme.error),
        )),
    }
}
