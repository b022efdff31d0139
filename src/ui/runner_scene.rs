//! Lane runner scene: top-down lanes scaled into a cell buffer.

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_start_prompt,
    render_status_bar, CellBuffer,
};
use super::HudInfo;
use crate::core::entity::{EntityKind, KindTag};
use crate::games::runner::types::{
    RunnerGame, GROUND_Y, LANE_CENTERS, WORLD_HEIGHT, WORLD_WIDTH,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HAZARD_COLORS: [Color; 3] = [Color::Red, Color::Yellow, Color::Magenta];

pub fn render(frame: &mut Frame, area: Rect, game: &RunnerGame, hud: &HudInfo) {
    if game.game_over {
        render_game_over_overlay(
            frame,
            area,
            ":: RUN OVER ::",
            game.score.score,
            hud.best,
            hud.new_record,
        );
        return;
    }

    let layout = create_game_layout(frame, area, " Lane Runner ", Color::Cyan, 20);

    render_play_field(frame, layout.content, game);
    if game.waiting_to_start {
        render_start_prompt(frame, layout.content, "[ Space to run ]");
    }
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, hud);
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &RunnerGame) {
    if area.height < 4 || area.width < 12 {
        return;
    }

    let mut buf = CellBuffer::new(area.width, area.height);
    let x_scale = f64::from(area.width) / WORLD_WIDTH;
    let y_scale = f64::from(area.height) / WORLD_HEIGHT;

    // Lane dividers
    for &lane_x in &LANE_CENTERS {
        let left = ((lane_x - 100.0) * x_scale).round() as i32;
        let right = ((lane_x + 100.0) * x_scale).round() as i32;
        for y in 0..i32::from(area.height) {
            if y % 2 == 0 {
                buf.set(left, y, '.', Color::Rgb(60, 60, 70));
                buf.set(right, y, '.', Color::Rgb(60, 60, 70));
            }
        }
    }

    // Ground marker at the player's row
    let ground_row = (GROUND_Y * y_scale).round() as i32;
    for x in 0..i32::from(area.width) {
        if buf.get(x, ground_row + 2).is_some_and(|c| c.ch == ' ') {
            buf.set(x, ground_row + 2, '_', Color::Rgb(50, 50, 50));
        }
    }

    // Hazards
    let store = &game.entities;
    for id in store.ids_of(KindTag::Hazard) {
        if let Some(hazard) = store.get(id) {
            let color = match hazard.kind {
                EntityKind::Hazard { style } => {
                    HAZARD_COLORS[style as usize % HAZARD_COLORS.len()]
                }
                _ => Color::Red,
            };
            stamp_rect(&mut buf, hazard.x, hazard.y, hazard.width, hazard.height, '#', color, x_scale, y_scale);
        }
    }

    // Coins
    for id in store.ids_of(KindTag::Collectible) {
        if let Some(coin) = store.get(id) {
            let spinning = matches!(coin.kind, EntityKind::Collectible { spin } if (spin as i64) % 2 == 0);
            let ch = if spinning { 'o' } else { '0' };
            let cx = ((coin.x + coin.width / 2.0) * x_scale).round() as i32;
            let cy = ((coin.y + coin.height / 2.0) * y_scale).round() as i32;
            buf.set(cx, cy, ch, Color::Yellow);
        }
    }

    // Particles
    for id in store.ids_of(KindTag::Particle) {
        if let Some(p) = store.get(id) {
            let fading = matches!(p.kind, EntityKind::Particle { life, max_life } if life * 2 < max_life);
            let ch = if fading { '.' } else { '*' };
            buf.set(
                (p.x * x_scale).round() as i32,
                (p.y * y_scale).round() as i32,
                ch,
                Color::LightYellow,
            );
        }
    }

    // Player (drawn last, on top)
    if let Some(player) = store.get(game.player) {
        let ch = if player.is_sliding() {
            '_'
        } else if player.is_jumping() {
            '^'
        } else {
            '@'
        };
        stamp_rect(&mut buf, player.x, player.y, player.width, player.height, ch, Color::Cyan, x_scale, y_scale);
    }

    // Score readout, top right
    let score_text = format!("Score {}  Coins {}", game.score.score, game.score.coins);
    let x = i32::from(area.width) - score_text.len() as i32 - 1;
    buf.set_str(x, 0, &score_text, Color::White);

    buf.flush(frame, area);
}

/// Stamp a world-space rectangle into the buffer, at least one cell.
#[allow(clippy::too_many_arguments)]
fn stamp_rect(
    buf: &mut CellBuffer,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    ch: char,
    color: Color,
    x_scale: f64,
    y_scale: f64,
) {
    let left = (x * x_scale).round() as i32;
    let top = (y * y_scale).round() as i32;
    let cols = ((w * x_scale).ceil() as i32).max(1);
    let rows = ((h * y_scale).ceil() as i32).max(1);
    for dy in 0..rows {
        for dx in 0..cols {
            buf.set(left + dx, top + dy, ch, color);
        }
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &RunnerGame) {
    if game.waiting_to_start {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::Cyan,
            &[("[Space]", "Start"), ("[Esc]", "Menu")],
        );
        return;
    }

    render_status_bar(
        frame,
        area,
        "Run!",
        Color::Cyan,
        &[
            ("[</>]", "Lane"),
            ("[Space]", "Jump"),
            ("[Down]", "Slide"),
            ("[Esc]", "Quit run"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &RunnerGame, hud: &HudInfo) {
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
            Span::styled("Coins: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.score.coins.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("Dist:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}m", game.score.distance),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(hud.best.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.level().to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" @ ", Style::default().fg(Color::Cyan)),
            Span::styled("You", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" # ", Style::default().fg(Color::Red)),
            Span::styled("Hazard", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" o ", Style::default().fg(Color::Yellow)),
            Span::styled("Coin", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
