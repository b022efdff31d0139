//! Shared UI components for the game scenes.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field, top left inside the outer border.
    pub content: Rect,
    /// Two-line status bar under the play field.
    pub status_bar: Rect,
    /// Info panel on the right, with its own border.
    pub info_panel: Rect,
}

/// Standard game layout: outer border, play field + status bar on the
/// left, info panel on the right.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Two-line status bar: message on top, key bindings underneath.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Bordered " Info " panel frame; returns the inner content Rect.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Full-screen game-over overlay: final score, stored best, record banner.
pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    score: u64,
    best: u64,
    new_record: bool,
) {
    frame.render_widget(Clear, area);

    let color = if new_record { Color::Green } else { Color::Red };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("Best:  {}", best),
            Style::default().fg(Color::Cyan),
        )),
    ];

    if new_record {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "* New record! *",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Press any key]",
        Style::default().fg(Color::DarkGray),
    )));

    let content_height = lines.len() as u16;
    let y_offset = inner.y + (inner.height.saturating_sub(content_height)) / 2;

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(inner.x, y_offset, inner.width, content_height),
    );
}

/// Centered "press to start" prompt over a play field.
pub fn render_start_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    if area.height < 3 || (area.width as usize) < prompt.len() {
        return;
    }

    let center_y = area.y + area.height / 2;
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;

    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(line, Rect::new(x, center_y, prompt.len() as u16, 1));
}

/// One character cell in a [`CellBuffer`].
#[derive(Clone, Copy)]
pub struct BufCell {
    pub ch: char,
    pub fg: Color,
}

impl Default for BufCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

/// A character grid the free-movement scenes draw into, stamped to the
/// terminal row by row with runs of equal style merged into single spans.
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<BufCell>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BufCell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Set a cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = BufCell { ch, fg };
    }

    pub fn get(&self, x: i32, y: i32) -> Option<BufCell> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Write a string left-to-right starting at (x, y).
    pub fn set_str(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg);
        }
    }

    /// Render the buffer into the top-left of `area`.
    pub fn flush(&self, frame: &mut Frame, area: Rect) {
        let rows = self.height.min(area.height);
        for row in 0..rows {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_text = String::new();

            for col in 0..self.width {
                let cell = self.cells[row as usize * self.width as usize + col as usize];
                if cell.fg != current_fg && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg),
                    ));
                }
                current_fg = cell.fg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(current_text, Style::default().fg(current_fg)));
            }

            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(
                line,
                Rect::new(area.x, area.y + row, self.width.min(area.width), 1),
            );
        }
    }
}
