//! Terminal scenes. Stateless: every scene reads game state and draws; no
//! game logic lives here.

pub mod blocks_scene;
pub mod flappy_scene;
pub mod game_common;
pub mod menu_scene;
pub mod runner_scene;
pub mod space_scene;

use crate::games::ActiveGame;
use ratatui::{layout::Rect, Frame};

/// Extra display state the frontend threads into a scene: the persisted
/// best for this game and whether the just-finished run set a new record.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    pub best: u64,
    pub new_record: bool,
}

/// Draw whichever game is active.
pub fn draw_game(frame: &mut Frame, area: Rect, game: &ActiveGame, hud: &HudInfo) {
    match game {
        ActiveGame::Runner(game) => runner_scene::render(frame, area, game, hud),
        ActiveGame::Flappy(game) => flappy_scene::render(frame, area, game, hud),
        ActiveGame::Space(game) => space_scene::render(frame, area, game, hud),
        ActiveGame::Blocks(game) => blocks_scene::render(frame, area, game, hud),
    }
}
