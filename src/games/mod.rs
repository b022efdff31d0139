//! The cabinet's games and the plumbing shared between them.

pub mod blocks;
pub mod flappy;
pub mod runner;
pub mod space;

pub use blocks::BlocksGame;
pub use flappy::FlappyGame;
pub use runner::RunnerGame;
pub use space::SpaceGame;

use crate::core::sound::SoundCue;
use rand::Rng;

/// Discrete input intents. The frontend maps raw key events to these; game
/// logic never sees a key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameIntent {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
    RotateCw,
    RotateCcw,
    Drop,
    ConfirmStart,
}

/// The four cabinet slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Runner,
    Flappy,
    Space,
    Blocks,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Runner,
        GameKind::Flappy,
        GameKind::Space,
        GameKind::Blocks,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(GameKind::Runner)
    }

    /// Menu / title-bar name.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::Runner => "Lane Runner",
            GameKind::Flappy => "Flappy Glider",
            GameKind::Space => "Star Runner",
            GameKind::Blocks => "Blockfall",
        }
    }

    /// Key in the persisted best-score table.
    pub fn score_key(self) -> &'static str {
        match self {
            GameKind::Runner => "runner",
            GameKind::Flappy => "flappy",
            GameKind::Space => "space",
            GameKind::Blocks => "blocks",
        }
    }

    /// One-line menu description.
    pub fn blurb(self) -> &'static str {
        match self {
            GameKind::Runner => "Dodge down three lanes, jump and slide, bank coins",
            GameKind::Flappy => "Flap through the holes in the pipe wall",
            GameKind::Space => "Hop drifting platforms and harvest crystals",
            GameKind::Blocks => "Stack the falling pieces, sweep full rows",
        }
    }
}

/// A launched game. Only one is active at a time.
pub enum ActiveGame {
    Runner(RunnerGame),
    Flappy(FlappyGame),
    Space(SpaceGame),
    Blocks(BlocksGame),
}

impl ActiveGame {
    pub fn launch(kind: GameKind) -> Self {
        match kind {
            GameKind::Runner => ActiveGame::Runner(RunnerGame::new()),
            GameKind::Flappy => ActiveGame::Flappy(FlappyGame::new()),
            GameKind::Space => ActiveGame::Space(SpaceGame::new()),
            GameKind::Blocks => ActiveGame::Blocks(BlocksGame::new()),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Runner(_) => GameKind::Runner,
            ActiveGame::Flappy(_) => GameKind::Flappy,
            ActiveGame::Space(_) => GameKind::Space,
            ActiveGame::Blocks(_) => GameKind::Blocks,
        }
    }

    pub fn process_intent(&mut self, intent: GameIntent) {
        match self {
            ActiveGame::Runner(game) => runner::process_intent(game, intent),
            ActiveGame::Flappy(game) => flappy::process_intent(game, intent),
            ActiveGame::Space(game) => space::process_intent(game, intent),
            ActiveGame::Blocks(game) => blocks::process_intent(game, intent),
        }
    }

    /// Advance the active game by `dt_ms`. Returns true if state changed.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> bool {
        match self {
            ActiveGame::Runner(game) => runner::advance(game, dt_ms, rng),
            ActiveGame::Flappy(game) => flappy::advance(game, dt_ms, rng),
            ActiveGame::Space(game) => space::advance(game, dt_ms, rng),
            ActiveGame::Blocks(game) => blocks::advance(game, dt_ms, rng),
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            ActiveGame::Runner(game) => game.game_over,
            ActiveGame::Flappy(game) => game.game_over,
            ActiveGame::Space(game) => game.game_over,
            ActiveGame::Blocks(game) => game.game_over(),
        }
    }

    /// The session score to submit against the persisted best.
    pub fn session_score(&self) -> u64 {
        match self {
            ActiveGame::Runner(game) => game.score.score,
            ActiveGame::Flappy(game) => game.score.score,
            ActiveGame::Space(game) => game.score.score,
            ActiveGame::Blocks(game) => game.score.score,
        }
    }

    /// Take the sound cues queued since the last drain.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        match self {
            ActiveGame::Runner(game) => game.cues.drain(),
            ActiveGame::Flappy(game) => game.cues.drain(),
            ActiveGame::Space(game) => game.cues.drain(),
            ActiveGame::Blocks(game) => game.cues.drain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_kind_round_trip() {
        for (i, kind) in GameKind::ALL.iter().enumerate() {
            assert_eq!(GameKind::from_index(i), *kind);
        }
        assert_eq!(GameKind::from_index(99), GameKind::Runner);
    }

    #[test]
    fn test_score_keys_are_distinct() {
        let mut keys: Vec<&str> = GameKind::ALL.iter().map(|k| k.score_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), GameKind::ALL.len());
    }

    #[test]
    fn test_launch_matches_kind() {
        for kind in GameKind::ALL {
            let game = ActiveGame::launch(kind);
            assert_eq!(game.kind(), kind);
            assert!(!game.is_over());
            assert_eq!(game.session_score(), 0);
        }
    }

    #[test]
    fn test_every_game_waits_for_start() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for kind in GameKind::ALL {
            let mut game = ActiveGame::launch(kind);
            assert!(
                !game.advance(100, &mut rng),
                "{:?} must not step before the start intent",
                kind
            );
        }
    }

    #[test]
    fn test_confirm_start_unblocks_advance() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for kind in GameKind::ALL {
            let mut game = ActiveGame::launch(kind);
            game.process_intent(GameIntent::ConfirmStart);
            // Blocks resolves its first spawn; the rest step physics
            game.advance(50, &mut rng);
            assert!(!game.is_over());
        }
    }

    #[test]
    fn test_drain_cues_empties_queue() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = ActiveGame::launch(GameKind::Runner);
        game.process_intent(GameIntent::ConfirmStart);
        game.process_intent(GameIntent::Jump);
        game.advance(16, &mut rng);
        assert!(!game.drain_cues().is_empty());
        assert!(game.drain_cues().is_empty());
    }
}
