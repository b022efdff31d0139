//! Cabinet menu: pick a game, see the standing records.

use crate::games::GameKind;
use crate::scores::HighScores;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, selected: usize, scores: &HighScores) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Arcade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Pick a machine",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for (i, kind) in GameKind::ALL.iter().enumerate() {
        let is_selected = i == selected;
        let marker = if is_selected { "> " } else { "  " };
        let title_style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, title_style),
            Span::styled(format!("{:<14}", kind.title()), title_style),
            Span::styled(
                format!("best {:>8}", scores.best(kind.score_key())),
                Style::default().fg(Color::Cyan),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", kind.blurb()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).alignment(Alignment::Left);
    let list_area = centered_column(chunks[1], 48);
    frame.render_widget(list, list_area);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Up/Down]", Style::default().fg(Color::White)),
        Span::styled(" Select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("[Enter]", Style::default().fg(Color::White)),
        Span::styled(" Play  ", Style::default().fg(Color::DarkGray)),
        Span::styled("[Esc]", Style::default().fg(Color::White)),
        Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

/// A horizontally centered column of the given width.
fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}
