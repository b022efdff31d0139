//! Blockfall logic: collision, rotation with wall kicks, sweeping, spawning.

use super::types::*;
use crate::core::sound::SoundCue;
use crate::games::GameIntent;
use rand::Rng;

/// True when any filled cell of the piece lies outside the board or over an
/// occupied board cell.
pub fn collides(board: &[Vec<Cell>], piece: &Piece) -> bool {
    for (dy, row) in piece.cells.iter().enumerate() {
        for (dx, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let by = piece.y + dy as i32;
            let bx = piece.x + dx as i32;
            if by < 0 || by >= BOARD_HEIGHT as i32 || bx < 0 || bx >= BOARD_WIDTH as i32 {
                return true;
            }
            if board[by as usize][bx as usize] != 0 {
                return true;
            }
        }
    }
    false
}

/// Stamp the piece's filled cells into the board. Callers guarantee the
/// piece is collision-free, so every cell lands in bounds.
pub fn merge(board: &mut [Vec<Cell>], piece: &Piece) {
    for (dy, row) in piece.cells.iter().enumerate() {
        for (dx, &cell) in row.iter().enumerate() {
            if cell != 0 {
                let by = (piece.y + dy as i32) as usize;
                let bx = (piece.x + dx as i32) as usize;
                board[by][bx] = cell;
            }
        }
    }
}

/// Transpose-then-reverse rotation of a square cell matrix.
pub fn rotated(cells: &[Vec<Cell>], clockwise: bool) -> Vec<Vec<Cell>> {
    let n = cells.len();
    let mut out = vec![vec![0; n]; n];
    for (y, row) in cells.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            out[x][y] = cell;
        }
    }
    if clockwise {
        for row in &mut out {
            row.reverse();
        }
    } else {
        out.reverse();
    }
    out
}

/// Rotate the falling piece, kicking off walls with a widening horizontal
/// search (+1, −2, +3, …) bounded by the piece width. A rotation with no
/// valid kick is reverted entirely.
pub fn try_rotate(game: &mut BlocksGame, clockwise: bool) {
    if game.phase != Phase::Falling {
        return;
    }
    let original_x = game.piece.x;
    let mut offset: i32 = 1;
    game.piece.cells = rotated(&game.piece.cells, clockwise);
    while collides(&game.board, &game.piece) {
        game.piece.x += offset;
        offset = -(offset + if offset > 0 { 1 } else { -1 });
        if offset.unsigned_abs() as usize > game.piece.width() {
            game.piece.cells = rotated(&game.piece.cells, !clockwise);
            game.piece.x = original_x;
            return;
        }
    }
}

/// Shift the piece horizontally, reverting on collision.
pub fn try_move(game: &mut BlocksGame, dx: i32) {
    if game.phase != Phase::Falling {
        return;
    }
    game.piece.x += dx;
    if collides(&game.board, &game.piece) {
        game.piece.x -= dx;
    }
}

/// Descend one row. A blocked descent reverts, merges the piece, and hands
/// the machine to the sweep.
pub fn drop_piece(game: &mut BlocksGame) {
    if game.phase != Phase::Falling {
        return;
    }
    game.piece.y += 1;
    if collides(&game.board, &game.piece) {
        game.piece.y -= 1;
        merge(&mut game.board, &game.piece);
        game.phase = Phase::Sweeping;
    }
    game.drop_ms = 0;
}

/// Remove every full row bottom-to-top, shift the stack down, and score the
/// sweep. Zero cleared rows award nothing and stay silent.
fn sweep(game: &mut BlocksGame) {
    let mut rows_cleared = 0usize;
    let mut y = BOARD_HEIGHT;
    while y > 0 {
        y -= 1;
        if game.board[y].iter().all(|&c| c != 0) {
            game.board.remove(y);
            game.board.insert(0, vec![0; BOARD_WIDTH]);
            rows_cleared += 1;
            y += 1; // the row above slid into this index; scan it again
        }
    }

    if rows_cleared > 0 {
        game.score.award(sweep_award(rows_cleared));
        game.lines_cleared += rows_cleared as u64;
        game.cues.push(SoundCue::Score);
    }
    game.phase = Phase::Spawning;
}

/// Spawn a uniform-random piece at the board's horizontal center. A spawn
/// that already collides is the end of the game.
fn spawn_piece<R: Rng>(game: &mut BlocksGame, rng: &mut R) {
    let shape = PieceShape::ALL[rng.gen_range(0..PieceShape::ALL.len())];
    let cells = shape.matrix();
    let x = (BOARD_WIDTH / 2) as i32 - (cells[0].len() / 2) as i32;
    game.piece = Piece { cells, x, y: 0 };

    if collides(&game.board, &game.piece) {
        game.phase = Phase::GameOver;
        game.cues.push(SoundCue::GameOver);
    } else {
        game.phase = Phase::Falling;
    }
}

/// Run the transient phases to quiescence: sweep, then spawn.
fn resolve_phases<R: Rng>(game: &mut BlocksGame, rng: &mut R) {
    loop {
        match game.phase {
            Phase::Sweeping => sweep(game),
            Phase::Spawning => spawn_piece(game, rng),
            Phase::Falling | Phase::GameOver => return,
        }
    }
}

/// Process one input intent.
pub fn process_intent(game: &mut BlocksGame, intent: GameIntent) {
    if game.game_over() {
        return;
    }
    if game.waiting_to_start {
        if matches!(intent, GameIntent::ConfirmStart | GameIntent::Drop) {
            game.waiting_to_start = false;
        }
        return;
    }
    match intent {
        GameIntent::MoveLeft => try_move(game, -1),
        GameIntent::MoveRight => try_move(game, 1),
        GameIntent::RotateCw => try_rotate(game, true),
        GameIntent::RotateCcw => try_rotate(game, false),
        GameIntent::Drop => drop_piece(game),
        _ => {}
    }
}

/// Advance the machine. Returns true if state changed.
pub fn advance<R: Rng>(game: &mut BlocksGame, dt_ms: u64, rng: &mut R) -> bool {
    if game.waiting_to_start || game.game_over() {
        return false;
    }

    let was_falling = game.phase == Phase::Falling;
    resolve_phases(game, rng);
    let mut changed = !was_falling;
    if game.game_over() {
        return changed;
    }

    game.drop_ms += dt_ms;
    if game.drop_ms > DROP_INTERVAL_MS {
        drop_piece(game);
        resolve_phases(game, rng);
        changed = true;
    }

    changed
}
