use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, ResultsSummary};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let results = app.compute_results();
    let grade_color = get_grade_color(results.percentage);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(
        frame,
        chunks[1],
        results.score,
        results.total,
        results.percentage,
        grade_color,
    );
    render_breakdown(frame, chunks[2], &results, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        60..=89 => Color::Cyan,
        40..=59 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    score: usize,
    total: usize,
    percentage: f64,
    grade_color: Color,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.1}%)", score, total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, results: &ResultsSummary, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, review) in results.per_question.iter().enumerate() {
        let (symbol, color) = if review.is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(review.question.as_str(), Style::default().fg(Color::Gray)),
        ]));

        let your_answer = review.user_answer.as_deref().unwrap_or("no answer");
        lines.push(Line::from(Span::styled(
            format!("       your answer: {}", your_answer),
            Style::default().fg(color),
        )));

        if !review.is_correct {
            lines.push(Line::from(Span::styled(
                format!("       correct answer: {}", review.correct_answer),
                Style::default().fg(Color::DarkGray).italic(),
            )));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  m menu  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
