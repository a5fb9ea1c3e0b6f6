use std::io::Write;

use patzer::board::Board;
use patzer::engine::{evaluate, select_move};
use patzer::piece::{Color, PieceType};

const GAMES_PER_MATCHUP: usize = 10;
const MAX_PLIES: u32 = 120;

#[derive(Debug)]
struct MatchResult {
    a_wins: u32,
    b_wins: u32,
    draws: u32,
}

/// Play one game and return the winning colour. A side wins by capturing
/// the enemy king or by leaving the opponent without a move; at the move
/// cap the material balance decides.
fn play_game(white_difficulty: u32, black_difficulty: u32) -> Option<Color> {
    let mut board = Board::new();

    for _ in 0..MAX_PLIES {
        let color = board.side_to_move;
        let difficulty = match color {
            Color::White => white_difficulty,
            Color::Black => black_difficulty,
        };

        match select_move(&mut board, color, difficulty) {
            Some(mv) => {
                board.make_move(mv.from, mv.to);
                let king_captured = mv
                    .captured
                    .map(|p| p.piece_type == PieceType::King)
                    .unwrap_or(false);
                if king_captured {
                    return Some(color);
                }
            }
            None => return Some(color.opposite()),
        }
    }

    match evaluate(&board) {
        s if s > 0 => Some(Color::White),
        s if s < 0 => Some(Color::Black),
        _ => None,
    }
}

/// Two-leg matchup: half the games with A as White, half with colours
/// swapped, so first-move advantage cancels out.
fn run_matchup(difficulty_a: u32, difficulty_b: u32) -> MatchResult {
    let mut result = MatchResult {
        a_wins: 0,
        b_wins: 0,
        draws: 0,
    };
    let half = GAMES_PER_MATCHUP / 2;

    for _ in 0..half {
        match play_game(difficulty_a, difficulty_b) {
            Some(Color::White) => result.a_wins += 1,
            Some(Color::Black) => result.b_wins += 1,
            None => result.draws += 1,
        }
    }
    for _ in 0..half {
        match play_game(difficulty_b, difficulty_a) {
            Some(Color::White) => result.b_wins += 1,
            Some(Color::Black) => result.a_wins += 1,
            None => result.draws += 1,
        }
    }

    result
}

fn main() {
    println!("=== Difficulty calibration ===");
    println!("Games per matchup: {GAMES_PER_MATCHUP}, move cap: {MAX_PLIES} plies\n");

    for (a, b) in [(1, 2), (1, 3), (2, 3)] {
        print!("  difficulty {a} vs difficulty {b}: ");
        std::io::stdout().flush().ok();
        let result = run_matchup(a, b);
        println!(
            "{}-{} with {} draws",
            result.a_wins, result.b_wins, result.draws
        );
    }
}
