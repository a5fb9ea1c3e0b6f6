use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::engine;
use crate::moves::Move;
use crate::piece::{Color, Piece};

/// Who sits behind the black pieces.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameMode {
    LocalMultiplayer,
    VsAi,
}

/// Why a requested move was refused. Legality must be established before
/// mutation — the board itself never validates a commit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    /// The source square is empty.
    EmptySource,
    /// The piece on the source square belongs to the side not on move.
    NotYourTurn,
    /// The piece cannot reach the destination under the movement rules.
    Illegal,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::EmptySource => write!(f, "no piece on the source square"),
            MoveError::NotYourTurn => write!(f, "piece belongs to the side not on move"),
            MoveError::Illegal => write!(f, "illegal move"),
        }
    }
}

impl std::error::Error for MoveError {}

/// The narrow interface the presentation layer drives: validated moves,
/// undo, AI turns, and read-only inspection. The UI never touches board
/// internals directly.
pub struct Game {
    board: Board,
    mode: GameMode,
    difficulty: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            mode: GameMode::LocalMultiplayer,
            difficulty: 2,
        }
    }

    /// Start over from the standard position, keeping mode and difficulty.
    pub fn reset(&mut self) {
        self.board.reset();
    }

    /// Switching modes starts a fresh game, as the original mode buttons do.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.board.reset();
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty.clamp(1, 3);
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Validate and commit a move for the side on move.
    pub fn try_move(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<Move, MoveError> {
        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySource)?;
        if piece.color != self.board.side_to_move {
            return Err(MoveError::NotYourTurn);
        }
        if !self.board.is_legal(from, to) {
            return Err(MoveError::Illegal);
        }
        self.board.make_move(from, to).ok_or(MoveError::EmptySource)
    }

    /// Let the engine play Black's turn. `None` when it is not the AI's
    /// turn (wrong mode or White on move) or when Black has no legal move —
    /// the caller must not treat the latter as a committed move.
    pub fn ai_move(&mut self) -> Option<Move> {
        if self.mode != GameMode::VsAi || self.board.side_to_move != Color::Black {
            return None;
        }
        let mv = engine::select_move(&mut self.board, Color::Black, self.difficulty)?;
        self.board.make_move(mv.from, mv.to)
    }

    /// Take back the last committed move. `None` on an empty history.
    pub fn undo(&mut self) -> Option<Move> {
        self.board.undo_move()
    }

    pub fn is_legal(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        self.board.is_legal(from, to)
    }

    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        self.board.all_moves(color)
    }

    /// Destinations reachable from one square — what the UI highlights
    /// after a piece is clicked.
    pub fn legal_destinations(&self, from: (usize, usize)) -> Vec<(usize, usize)> {
        self.board
            .all_moves(self.board.side_to_move)
            .into_iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect()
    }

    pub fn piece_at(&self, pos: (usize, usize)) -> Option<Piece> {
        self.board.piece_at(pos)
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move
    }

    pub fn history(&self) -> &[Move] {
        &self.board.history
    }

    /// Pieces of `color` that have been captured so far, in capture order.
    pub fn captured_pieces(&self, color: Color) -> Vec<Piece> {
        self.board
            .history
            .iter()
            .filter_map(|m| m.captured)
            .filter(|p| p.color == color)
            .collect()
    }

    /// The whole visible game state as JSON, for a UI to render.
    pub fn snapshot_json(&self) -> String {
        let snapshot = Snapshot::from_game(self);
        serde_json::to_string(&snapshot).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct Snapshot {
    /// Two-letter piece codes ("wP", "bK"), `null` for empty squares.
    squares: Vec<Vec<Option<String>>>,
    side_to_move: String,
    mode: String,
    difficulty: u32,
    moves: Vec<String>,
    captured_white: Vec<String>,
    captured_black: Vec<String>,
}

impl Snapshot {
    fn from_game(game: &Game) -> Snapshot {
        let squares = (0..8)
            .map(|row| {
                (0..8)
                    .map(|col| {
                        game.board.squares[row][col].map(|p| {
                            let side = match p.color {
                                Color::White => 'w',
                                Color::Black => 'b',
                            };
                            format!("{side}{}", p.piece_type.symbol())
                        })
                    })
                    .collect()
            })
            .collect();

        let captured = |color| {
            game.captured_pieces(color)
                .iter()
                .map(|p| p.piece_type.symbol().to_string())
                .collect()
        };

        Snapshot {
            squares,
            side_to_move: format!("{:?}", game.board.side_to_move),
            mode: format!("{:?}", game.mode),
            difficulty: game.difficulty,
            moves: game.board.history.iter().map(Move::notation).collect(),
            captured_white: captured(Color::White),
            captured_black: captured(Color::Black),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceType;

    #[test]
    fn try_move_commits_a_legal_move() {
        let mut game = Game::new();
        let mv = game.try_move((6, 4), (4, 4)).expect("e2-e4 is legal");
        assert_eq!(mv.notation(), "Pe2-e4");
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn try_move_error_taxonomy() {
        let mut game = Game::new();
        assert_eq!(game.try_move((4, 4), (3, 4)), Err(MoveError::EmptySource));
        assert_eq!(game.try_move((1, 4), (2, 4)), Err(MoveError::NotYourTurn));
        assert_eq!(game.try_move((7, 0), (5, 0)), Err(MoveError::Illegal));
        assert!(game.history().is_empty(), "refused moves must not mutate");
    }

    #[test]
    fn undo_pops_one_ply() {
        let mut game = Game::new();
        game.try_move((6, 4), (4, 4)).unwrap();
        game.try_move((1, 4), (3, 4)).unwrap();

        let undone = game.undo().expect("history is non-empty");
        assert_eq!(undone.from, (1, 4));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history().len(), 1);

        game.undo().unwrap();
        assert_eq!(game.undo(), None, "empty history is a no-op");
    }

    #[test]
    fn ai_move_only_plays_black_in_vs_ai_mode() {
        let mut game = Game::new();
        assert_eq!(game.ai_move(), None, "local multiplayer has no AI");

        game.set_mode(GameMode::VsAi);
        assert_eq!(game.ai_move(), None, "white is on move");

        game.try_move((6, 4), (4, 4)).unwrap();
        let reply = game.ai_move().expect("black has twenty replies");
        assert_eq!(reply.piece.color, Color::Black);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn reset_starts_over_but_keeps_settings() {
        let mut game = Game::new();
        game.set_difficulty(3);
        game.try_move((6, 4), (4, 4)).unwrap();

        game.reset();
        assert!(game.history().is_empty());
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.difficulty(), 3);
    }

    #[test]
    fn set_mode_resets_the_game() {
        let mut game = Game::new();
        game.try_move((6, 4), (4, 4)).unwrap();
        game.set_mode(GameMode::VsAi);
        assert!(game.history().is_empty());
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn difficulty_is_clamped() {
        let mut game = Game::new();
        game.set_difficulty(0);
        assert_eq!(game.difficulty(), 1);
        game.set_difficulty(9);
        assert_eq!(game.difficulty(), 3);
    }

    #[test]
    fn legal_destinations_for_a_knight() {
        let game = Game::new();
        let mut destinations = game.legal_destinations((7, 1));
        destinations.sort();
        assert_eq!(destinations, vec![(5, 0), (5, 2)]);
    }

    #[test]
    fn captured_pieces_accumulate_from_history() {
        let mut game = Game::new();
        game.try_move((6, 4), (4, 4)).unwrap();
        game.try_move((1, 3), (3, 3)).unwrap();
        game.try_move((4, 4), (3, 3)).unwrap(); // exd5

        assert_eq!(
            game.captured_pieces(Color::Black),
            vec![Piece::new(PieceType::Pawn, Color::Black)]
        );
        assert!(game.captured_pieces(Color::White).is_empty());
    }

    #[test]
    fn snapshot_json_has_the_expected_fields() {
        let mut game = Game::new();
        game.try_move((6, 4), (4, 4)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&game.snapshot_json()).expect("snapshot is valid JSON");
        assert_eq!(value["side_to_move"], "Black");
        assert_eq!(value["difficulty"], 2);
        assert_eq!(value["moves"][0], "Pe2-e4");
        assert_eq!(value["squares"][7][4], "wK");
        assert_eq!(value["squares"][4][4], "wP");
        assert_eq!(value["squares"][6][4], serde_json::Value::Null);
    }
}
