// =============================================================================
// Chess AI Engine
//
// Depth-limited minimax with alpha-beta pruning over the liberal ruleset in
// board.rs. Scores are always from White's perspective (positive favours
// White); the automated side plays to minimise them. Difficulty tunes the
// search depth AND injects uniform noise into candidate scores — lower
// difficulties get noisier scores, weakening play without changing how the
// tree is searched.
//
// The search explores by make/unmake on the one real board, never by
// cloning: each candidate is applied through a Speculative guard that
// reverts on drop, so the board is restored before the next sibling even
// when a cutoff exits the loop early.
// =============================================================================

use rand::Rng;

use crate::board::{Board, Speculative};
use crate::moves::Move;
use crate::piece::{Color, PieceType};

// =============================================================================
// Constants
// =============================================================================

/// Root search window, wider than any reachable evaluation.
pub const ALPHA_MIN: i32 = -10_000;
pub const BETA_MAX: i32 = 10_000;

/// Fixed scores for a side with nothing to play. The only stand-in for
/// game-over detection this ruleset has; it does not distinguish mate from
/// stalemate.
const MAXIMIZER_STUCK: i32 = -1000;
const MINIMIZER_STUCK: i32 = 1000;

// =============================================================================
// Evaluation — always from White's perspective
// =============================================================================

/// Material weights. The king's weight is a large constant so the search
/// treats losing him as catastrophic — king capture is the implicit loss
/// condition, since check is never detected.
fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => 1,
        PieceType::Rook => 5,
        PieceType::Knight => 3,
        PieceType::Bishop => 3,
        PieceType::Queen => 9,
        PieceType::King => 1000,
    }
}

/// Static evaluation: material plus small positional bonuses. Pawns score
/// for advancement, knights and bishops for proximity to the centre.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0;

    for row in 0..8 {
        for col in 0..8 {
            let piece = match board.squares[row][col] {
                Some(p) => p,
                None => continue,
            };
            let mut value = piece_value(piece.piece_type);

            match piece.piece_type {
                PieceType::Pawn => {
                    value += match piece.color {
                        Color::White => 6 - row as i32,
                        Color::Black => row as i32 - 1,
                    };
                }
                PieceType::Knight | PieceType::Bishop => {
                    // Manhattan distance from the board centre (3.5, 3.5);
                    // the doubled form keeps the arithmetic in integers.
                    let centre_distance =
                        ((7 - 2 * row as i32).abs() + (7 - 2 * col as i32).abs()) / 2;
                    value += 7 - centre_distance;
                }
                _ => {}
            }

            score += match piece.color {
                Color::White => value,
                Color::Black => -value,
            };
        }
    }

    score
}

// =============================================================================
// Search — minimax with alpha-beta pruning
// =============================================================================

/// Minimax with alpha-beta pruning. `maximizing_white` names the side to
/// move: White maximises the evaluation, Black minimises it. Pruning only
/// skips subtrees that cannot affect the result, so the returned score is
/// identical to a full-width search.
pub fn minimax(
    board: &mut Board,
    depth: u32,
    maximizing_white: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if depth == 0 {
        return evaluate(board);
    }

    let color = if maximizing_white { Color::White } else { Color::Black };
    let moves = board.all_moves(color);
    if moves.is_empty() {
        return if maximizing_white { MAXIMIZER_STUCK } else { MINIMIZER_STUCK };
    }

    if maximizing_white {
        let mut best = ALPHA_MIN;
        for mv in &moves {
            let eval = {
                let mut speculative = Speculative::new(board, mv);
                minimax(speculative.board(), depth - 1, false, alpha, beta)
            };
            best = best.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = BETA_MAX;
        for mv in &moves {
            let eval = {
                let mut speculative = Speculative::new(board, mv);
                minimax(speculative.board(), depth - 1, true, alpha, beta)
            };
            best = best.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

// =============================================================================
// Move selection
// =============================================================================

/// Pick a move for `color` at the given difficulty (1–3, also the search
/// depth in plies). Each candidate is applied speculatively, scored by
/// minimax from the opponent's reply onward, then perturbed by a uniform
/// random amount scaled by `(3 - difficulty) * 50` — zero at difficulty 3,
/// so the top difficulty is deterministic. Black keeps the strictly lowest
/// score, White the strictly highest; ties keep the first candidate in
/// enumeration order. Returns `None` when `color` has no legal move.
pub fn select_move(board: &mut Board, color: Color, difficulty: u32) -> Option<Move> {
    let moves = board.all_moves(color);
    let mut rng = rand::thread_rng();
    let random_factor = (3.0 - difficulty as f64) * 50.0;

    let mut best: Option<(Move, f64)> = None;
    for mv in &moves {
        let eval = {
            let mut speculative = Speculative::new(board, mv);
            minimax(
                speculative.board(),
                difficulty,
                color == Color::Black,
                ALPHA_MIN,
                BETA_MAX,
            )
        };

        let mut value = eval as f64;
        if random_factor > 0.0 {
            value += rng.gen_range(-1.0..=1.0) * random_factor;
        }

        let improved = match &best {
            Some((_, best_value)) => match color {
                Color::Black => value < *best_value,
                Color::White => value > *best_value,
            },
            None => true,
        };
        if improved {
            best = Some((mv.clone(), value));
        }
    }

    if let Some((mv, value)) = &best {
        log::debug!("selected {} (score {value:.1}, difficulty {difficulty})", mv.notation());
    }
    best.map(|(mv, _)| mv)
}
