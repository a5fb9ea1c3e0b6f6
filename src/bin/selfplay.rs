use patzer::board::Board;
use patzer::engine::{evaluate, select_move};
use patzer::piece::{Color, PieceType};

const MAX_PLIES: u32 = 100;
const WHITE_DIFFICULTY: u32 = 2;
const BLACK_DIFFICULTY: u32 = 3;

fn main() {
    let mut board = Board::new();

    for ply in 0..MAX_PLIES {
        let color = board.side_to_move;
        let difficulty = match color {
            Color::White => WHITE_DIFFICULTY,
            Color::Black => BLACK_DIFFICULTY,
        };

        match select_move(&mut board, color, difficulty) {
            Some(mv) => {
                board.make_move(mv.from, mv.to);
                println!("{:>3}. {}", ply + 1, mv.notation());

                let king_captured = mv
                    .captured
                    .map(|p| p.piece_type == PieceType::King)
                    .unwrap_or(false);
                if king_captured {
                    println!("\n{board}");
                    eprintln!("{color:?} wins by king capture after {} plies", ply + 1);
                    return;
                }
            }
            None => {
                println!("\n{board}");
                eprintln!("{color:?} has no moves after {ply} plies");
                return;
            }
        }
    }

    println!("\n{board}");
    let score = evaluate(&board);
    let verdict = match score {
        s if s > 0 => "White ahead",
        s if s < 0 => "Black ahead",
        _ => "level",
    };
    eprintln!("Move cap reached: {verdict} (material score {score})");
}
