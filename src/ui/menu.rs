use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let info = format!(
        "{} questions · {}s per question",
        app.total_questions(),
        app.time_limit()
    );

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ MASTER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(info.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
        Line::from("q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
