//! Blockfall scene: direct board-grid rendering, two cells per column.

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_status_bar,
    CellBuffer,
};
use super::HudInfo;
use crate::games::blocks::types::{BlocksGame, Cell, BOARD_HEIGHT, BOARD_WIDTH};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Color per cell value 1-7, matching the seven shapes.
const CELL_COLORS: [Color; 8] = [
    Color::Reset,
    Color::Magenta,      // T
    Color::Yellow,       // O
    Color::Rgb(255, 140, 0), // L
    Color::Blue,         // J
    Color::Cyan,         // I
    Color::Green,        // S
    Color::Red,          // Z
];

pub fn render(frame: &mut Frame, area: Rect, game: &BlocksGame, hud: &HudInfo) {
    if game.game_over() {
        render_game_over_overlay(
            frame,
            area,
            ":: STACKED OUT ::",
            game.score.score,
            hud.best,
            hud.new_record,
        );
        return;
    }

    let layout = create_game_layout(frame, area, " Blockfall ", Color::Magenta, 20);

    render_board(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, hud);
}

fn render_board(frame: &mut Frame, area: Rect, game: &BlocksGame) {
    // Two terminal columns per board cell keeps the aspect ratio sane
    let need_w = (BOARD_WIDTH * 2 + 2) as u16;
    let need_h = (BOARD_HEIGHT + 2) as u16;
    if area.width < need_w || area.height < need_h {
        render_status_bar(frame, area, "Terminal too small", Color::Red, &[]);
        return;
    }

    let mut buf = CellBuffer::new(need_w, need_h);

    // Well walls and floor
    for y in 0..=BOARD_HEIGHT as i32 {
        buf.set(0, y, '\u{2502}', Color::DarkGray);
        buf.set(need_w as i32 - 1, y, '\u{2502}', Color::DarkGray);
    }
    for x in 0..need_w as i32 {
        buf.set(x, BOARD_HEIGHT as i32, '\u{2500}', Color::DarkGray);
    }

    // Settled cells
    for (y, row) in game.board.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                stamp_cell(&mut buf, x as i32, y as i32, cell);
            }
        }
    }

    // Falling piece, unless the player hasn't started yet
    if !game.waiting_to_start {
        for (dy, row) in game.piece.cells.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    stamp_cell(
                        &mut buf,
                        game.piece.x + dx as i32,
                        game.piece.y + dy as i32,
                        cell,
                    );
                }
            }
        }
    }

    // Center the well in the content area
    let x_offset = area.width.saturating_sub(need_w) / 2;
    let centered = Rect::new(area.x + x_offset, area.y, need_w, area.height);
    buf.flush(frame, centered);

    if game.waiting_to_start {
        super::game_common::render_start_prompt(frame, area, "[ Space to start ]");
    }
}

/// Board cell -> two terminal cells.
fn stamp_cell(buf: &mut CellBuffer, x: i32, y: i32, cell: Cell) {
    let color = CELL_COLORS[(cell as usize).min(CELL_COLORS.len() - 1)];
    buf.set(1 + x * 2, y, '\u{2588}', color);
    buf.set(2 + x * 2, y, '\u{2588}', color);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &BlocksGame) {
    if game.waiting_to_start {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::Magenta,
            &[("[Space]", "Start"), ("[Esc]", "Menu")],
        );
        return;
    }

    render_status_bar(
        frame,
        area,
        "Stack!",
        Color::Magenta,
        &[
            ("[</>]", "Move"),
            ("[Q/W]", "Rotate"),
            ("[Down]", "Drop"),
            ("[Esc]", "Quit"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &BlocksGame, hud: &HudInfo) {
    let inner = render_info_panel_frame(frame, area);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.score.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Lines: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.lines_cleared.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(hud.best.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Sweep awards:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " 1 row   10",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " 2 rows  15",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " 3 rows  30",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " 4 rows  50",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
