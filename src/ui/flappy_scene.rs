//! Flappy glider scene: side view, pipe columns, one bird.

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_start_prompt,
    render_status_bar, CellBuffer,
};
use super::HudInfo;
use crate::games::flappy::types::{FlappyGame, BIRD_X, PIPE_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, game: &FlappyGame, hud: &HudInfo) {
    if game.game_over {
        render_game_over_overlay(
            frame,
            area,
            ":: FLIGHT OVER ::",
            game.score.score,
            hud.best,
            hud.new_record,
        );
        return;
    }

    let layout = create_game_layout(frame, area, " Flappy Glider ", Color::Green, 20);

    render_play_field(frame, layout.content, game);
    if game.waiting_to_start {
        render_start_prompt(frame, layout.content, "[ Space to flap ]");
    }
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, hud);
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    if area.height < 4 || area.width < 12 {
        return;
    }

    let mut buf = CellBuffer::new(area.width, area.height);
    let x_scale = f64::from(area.width) / WORLD_WIDTH;
    let y_scale = f64::from(area.height) / WORLD_HEIGHT;

    // Pipes
    for pipe in &game.pipes {
        let entity = pipe.as_entity();
        let left = (entity.x * x_scale).round() as i32;
        let cols = ((PIPE_WIDTH * x_scale).ceil() as i32).max(1);
        let top = (entity.y * y_scale).round() as i32;
        let rows = ((entity.height * y_scale).ceil() as i32).max(1);
        let color = if game.dying {
            Color::DarkGray
        } else {
            Color::Green
        };
        for dy in 0..rows {
            for dx in 0..cols {
                buf.set(left + dx, top + dy, '\u{2588}', color);
            }
        }
    }

    // Bird
    let bird_col = (BIRD_X * x_scale).round() as i32;
    let bird_row = (game.bird_y * y_scale).round() as i32;
    let ch = if game.dying {
        'x'
    } else if game.bird_vy < 0.0 {
        '^'
    } else {
        '>'
    };
    buf.set(bird_col, bird_row, ch, Color::Yellow);

    // Score readout
    let score_text = format!("Score {}", game.score.score);
    let x = i32::from(area.width) - score_text.len() as i32 - 1;
    buf.set_str(x, 0, &score_text, Color::White);

    buf.flush(frame, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    if game.waiting_to_start {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::Green,
            &[("[Space]", "Start"), ("[Esc]", "Menu")],
        );
        return;
    }

    let (text, color) = if game.dying {
        ("Falling...", Color::Red)
    } else {
        ("Fly!", Color::Green)
    };
    render_status_bar(
        frame,
        area,
        text,
        color,
        &[("[Space]", "Flap"), ("[Esc]", "Quit run")],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame, hud: &HudInfo) {
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
            Span::styled("Best:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(hud.best.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Each pipe wall",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "scores a point.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(Color::Yellow)),
            Span::styled("Bird", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(Color::Green)),
            Span::styled("Pipe", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
