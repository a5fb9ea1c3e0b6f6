use serde::{Deserialize, Serialize};

use crate::piece::Piece;

/// A committed or candidate move. Carries the moving piece and whatever
/// stood on the destination square, so it can be reversed without
/// consulting the board.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl Move {
    /// Move-list notation, e.g. "Pe2-e4", "Nb8-c6 xP".
    /// Row 0 is rank 8, so the rank digit is `8 - row`.
    pub fn notation(&self) -> String {
        let from_file = (b'a' + self.from.1 as u8) as char;
        let from_rank = 8 - self.from.0;
        let to_file = (b'a' + self.to.1 as u8) as char;
        let to_rank = 8 - self.to.0;
        let mut s = format!(
            "{}{}{}-{}{}",
            self.piece.piece_type.symbol(),
            from_file,
            from_rank,
            to_file,
            to_rank
        );
        if let Some(captured) = self.captured {
            s.push_str(" x");
            s.push(captured.piece_type.symbol());
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Color, PieceType};

    #[test]
    fn notation_for_quiet_move() {
        let mv = Move {
            from: (6, 4),
            to: (4, 4),
            piece: Piece::new(PieceType::Pawn, Color::White),
            captured: None,
        };
        assert_eq!(mv.notation(), "Pe2-e4");
    }

    #[test]
    fn notation_for_capture() {
        let mv = Move {
            from: (0, 1),
            to: (2, 2),
            piece: Piece::new(PieceType::Knight, Color::Black),
            captured: Some(Piece::new(PieceType::Pawn, Color::White)),
        };
        assert_eq!(mv.notation(), "Nb8-c6 xP");
    }
}
