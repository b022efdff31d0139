//! Star runner scene: drifting platforms, crystals, rocks.

use super::game_common::{
    create_game_layout, render_game_over_overlay, render_info_panel_frame, render_start_prompt,
    render_status_bar, CellBuffer,
};
use super::HudInfo;
use crate::games::space::types::{
    SpaceGame, CRYSTAL_SIZE, PLATFORM_WIDTH, PLAYER_SIZE, ROCK_SIZE, WORLD_HEIGHT, WORLD_WIDTH,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, game: &SpaceGame, hud: &HudInfo) {
    if game.game_over {
        render_game_over_overlay(
            frame,
            area,
            ":: LOST TO THE VOID ::",
            game.score.score,
            hud.best,
            hud.new_record,
        );
        return;
    }

    let layout = create_game_layout(frame, area, " Star Runner ", Color::Blue, 20);

    render_play_field(frame, layout.content, game);
    if game.waiting_to_start {
        render_start_prompt(frame, layout.content, "[ Space to launch ]");
    }
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, hud);
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &SpaceGame) {
    if area.height < 4 || area.width < 12 {
        return;
    }

    let mut buf = CellBuffer::new(area.width, area.height);
    let x_scale = f64::from(area.width) / WORLD_WIDTH;
    let y_scale = f64::from(area.height) / WORLD_HEIGHT;

    // A thin starfield, keyed off the tick so it drifts
    let drift = (game.tick_count / 8) as i32;
    for (sx, sy) in [(11, 2), (29, 5), (47, 1), (62, 7), (23, 10), (53, 12)] {
        let x = (sx - drift).rem_euclid(i32::from(area.width).max(1));
        if sy < i32::from(area.height) {
            buf.set(x, sy, '.', Color::Rgb(90, 90, 110));
        }
    }

    // Platforms
    for platform in &game.platforms {
        let left = (platform.x * x_scale).round() as i32;
        let cols = ((PLATFORM_WIDTH * x_scale).ceil() as i32).max(1);
        let row = (platform.y * y_scale).round() as i32;
        for dx in 0..cols {
            buf.set(left + dx, row, '\u{2580}', Color::Blue);
        }
    }

    // Crystals, bobbing
    for crystal in &game.crystals {
        let bob = (crystal.bob.sin() * 1.5).round();
        let cx = ((crystal.x + CRYSTAL_SIZE / 2.0) * x_scale).round() as i32;
        let cy = ((crystal.y + CRYSTAL_SIZE / 2.0) * y_scale + bob).round() as i32;
        buf.set(cx, cy, '\u{25c6}', Color::Green);
    }

    // Rocks, spinning
    for rock in &game.rocks {
        let ch = match (rock.spin * 4.0) as i64 % 4 {
            0 => 'X',
            1 => '+',
            2 => 'X',
            _ => '+',
        };
        let cx = ((rock.x + ROCK_SIZE / 2.0) * x_scale).round() as i32;
        let cy = ((rock.y + ROCK_SIZE / 2.0) * y_scale).round() as i32;
        buf.set(cx, cy, ch, Color::Red);
    }

    // Player
    let px = ((game.player_x + PLAYER_SIZE / 2.0) * x_scale).round() as i32;
    let py = ((game.player_y + PLAYER_SIZE / 2.0) * y_scale).round() as i32;
    let ch = if game.on_platform { '@' } else { '^' };
    buf.set(px, py, ch, Color::Cyan);

    // Score readout
    let score_text = format!("Score {}  Lv {}", game.score.score, game.level);
    let x = i32::from(area.width) - score_text.len() as i32 - 1;
    buf.set_str(x, 0, &score_text, Color::White);

    buf.flush(frame, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &SpaceGame) {
    if game.waiting_to_start {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::Blue,
            &[("[Space]", "Launch"), ("[Esc]", "Menu")],
        );
        return;
    }

    render_status_bar(
        frame,
        area,
        "Hop!",
        Color::Blue,
        &[
            ("[</>]", "Drift"),
            ("[Space]", "Jump"),
            ("[Esc]", "Quit run"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &SpaceGame, hud: &HudInfo) {
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
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(game.level.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(hud.best.to_string(), Style::default().fg(Color::Cyan)),
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
            Span::styled(" \u{25c6} ", Style::default().fg(Color::Green)),
            Span::styled("Crystal +10", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" X ", Style::default().fg(Color::Red)),
            Span::styled("Rock -5", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" \u{2580} ", Style::default().fg(Color::Blue)),
            Span::styled("Platform", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
