use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], app);
    render_progress(frame, chunks[1], app);
    render_question_number(frame, chunks[2], app);
    render_question_text(frame, chunks[3], &app.current_question().text);
    render_choices(frame, chunks[4], app);
    render_controls(frame, chunks[5], app);
}

fn timer_color(time_left: u32) -> Color {
    match time_left {
        0..=10 => Color::Red,
        11..=20 => Color::Yellow,
        _ => Color::Cyan,
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = Paragraph::new(format!("Time: {}s", app.time_left()))
        .alignment(Alignment::Right)
        .fg(timer_color(app.time_left()))
        .bold();
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let ratio = app.current_index() as f64 / app.total_questions() as f64;
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio)
        .label("");
    frame.render_widget(widget, area);
}

fn render_question_number(frame: &mut Frame, area: Rect, app: &App) {
    let widget = Paragraph::new(format!(
        "Question {} of {}",
        app.current_question_number(),
        app.total_questions()
    ))
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_choices(frame: &mut Frame, area: Rect, app: &App) {
    let choices = &app.current_question().choices;
    let mut lines: Vec<Line> = Vec::with_capacity(choices.len() * 2);

    for (index, choice) in choices.iter().enumerate() {
        let is_highlighted = index == app.highlighted();
        let is_selected = app.selected() == Some(index);

        let style = if is_highlighted {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if is_highlighted { ">" } else { " " };
        let mark = if is_selected { "(x)" } else { "( )" };
        let label = (b'A' + (index % 26) as u8) as char;

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", cursor, mark), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let advance = if app.current_question_number() == app.total_questions() {
        "finish"
    } else {
        "next"
    };
    let widget = Paragraph::new(format!(
        "j/k move  ·  space select  ·  enter {}  ·  q quit",
        advance
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
