use itertools::iproduct;

use crate::types::{piece_code, Color, MateError, PieceType, Square, EMPTY};

/// An 8x8 mailbox of signed piece codes. The magnitude is the piece type
/// (1=pawn .. 6=king), the sign is the owner (positive = white), 0 is empty.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Board {
    squares: [[i8; 8]; 8], // indexed [rank][file]
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [[EMPTY; 8]; 8],
        }
    }

    /// Build a board from rows of signed codes given rank-8-first, the same
    /// visual order a FEN diagram reads in.
    pub fn from_codes(rows: [[i8; 8]; 8]) -> Board {
        let mut squares = [[EMPTY; 8]; 8];
        for (i, row) in rows.iter().enumerate() {
            squares[7 - i] = *row;
        }
        Board { squares }
    }

    /// Parse the piece-placement field of a FEN string. Any later fields
    /// (side to move, castling, ...) are ignored: the board holds no game
    /// state beyond the grid itself.
    pub fn from_fen(fen_string: &str) -> Board {
        let placement = fen_string
            .split_whitespace()
            .next()
            .unwrap_or_else(|| panic!("Fen string must not be empty"));

        let mut board = Board::empty();
        let mut rank: i16 = 7;
        let mut file: i16 = 0;
        for piece_char in placement.chars() {
            if piece_char.is_alphabetic() {
                let sq = Square::new(file, rank)
                    .unwrap_or_else(|| panic!("Position string leaves the board at {piece_char}."));
                let code = piece_code(
                    Color::from_case(piece_char),
                    PieceType::from_char(piece_char),
                );
                board.set(sq, code);
                file += 1;
            } else if piece_char.is_numeric() {
                file += piece_char as i16 - '0' as i16;
            } else if piece_char == '/' {
                rank -= 1;
                file = 0;
            } else {
                panic!("Unexpected char {piece_char} in position string.");
            }
        }
        board
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> i8 {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, sq: Square, code: i8) {
        self.squares[sq.rank() as usize][sq.file() as usize] = code;
    }

    #[inline(always)]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq) == EMPTY
    }

    /// Does `sq` hold a piece of `color`?
    #[inline(always)]
    pub fn is_own(&self, sq: Square, color: Color) -> bool {
        self.piece_at(sq) * color.sign() > 0
    }

    /// Does `sq` hold a piece of the side opposing `color`?
    #[inline(always)]
    pub fn is_enemy(&self, sq: Square, color: Color) -> bool {
        self.piece_at(sq) * color.sign() < 0
    }

    /// Every square holding a piece of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        iproduct!(0..8i16, 0..8i16)
            .map(|(file, rank)| Square::new(file, rank).unwrap())
            .filter(move |&sq| self.is_own(sq, color))
    }

    /// Locate the king of `color` by linear scan.
    pub fn king_square(&self, color: Color) -> Result<Square, MateError> {
        let king = piece_code(color, PieceType::King);
        iproduct!(0..8i16, 0..8i16)
            .map(|(file, rank)| Square::new(file, rank).unwrap())
            .find(|&sq| self.piece_at(sq) == king)
            .ok_or(MateError::KingNotFound(color))
    }
}

fn symbol(code: i8) -> &'static str {
    let is_white = code > 0;
    match PieceType::from_code(code) {
        None => ".",
        Some(PieceType::Pawn) => {
            if is_white {
                "♙"
            } else {
                "♟"
            }
        }
        Some(PieceType::Bishop) => {
            if is_white {
                "♗"
            } else {
                "♝"
            }
        }
        Some(PieceType::Knight) => {
            if is_white {
                "♘"
            } else {
                "♞"
            }
        }
        Some(PieceType::Rook) => {
            if is_white {
                "♖"
            } else {
                "♜"
            }
        }
        Some(PieceType::Queen) => {
            if is_white {
                "♕"
            } else {
                "♛"
            }
        }
        Some(PieceType::King) => {
            if is_white {
                "♔"
            } else {
                "♚"
            }
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::new(file, rank).unwrap();
                write!(f, "{} ", symbol(self.piece_at(sq)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A move applied to the board for the lifetime of this guard. Dropping the
/// guard puts both squares back, so every exit path of a simulation leaves
/// the caller's board untouched.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    moved: i8,
    captured: i8,
}

impl<'a> ScopedMove<'a> {
    pub fn apply(board: &'a mut Board, from: Square, to: Square) -> ScopedMove<'a> {
        let moved = board.piece_at(from);
        let captured = board.piece_at(to);
        board.set(to, moved);
        board.set(from, EMPTY);
        ScopedMove {
            board,
            from,
            to,
            moved,
            captured,
        }
    }

    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.board.set(self.from, self.moved);
        self.board.set(self.to, self.captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_fen_matches_from_codes() {
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . ♔ . . . . .
        // . ♕ . . . . . .
        // . ♚ . . . . . .
        let from_fen = Board::from_fen("8/8/8/8/8/2K5/1Q6/1k6 b - - 0 1");
        let from_codes = Board::from_codes([
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 6, 0, 0, 0, 0, 0],
            [0, 5, 0, 0, 0, 0, 0, 0],
            [0, -6, 0, 0, 0, 0, 0, 0],
        ]);
        assert_eq!(from_fen, from_codes);
    }

    #[test]
    fn test_from_fen_starting_position() {
        let b = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(b.piece_at(Square::from_algebraic("e1")), 6);
        assert_eq!(b.piece_at(Square::from_algebraic("e8")), -6);
        assert_eq!(b.piece_at(Square::from_algebraic("a1")), 4);
        assert_eq!(b.piece_at(Square::from_algebraic("b8")), -3);
        assert_eq!(b.piece_at(Square::from_algebraic("c2")), 1);
        assert_eq!(b.piece_at(Square::from_algebraic("e4")), 0);
    }

    #[test]
    #[should_panic]
    fn test_from_fen_bad_char() {
        Board::from_fen("8/8/8/8/8/8/8/7x w - - 0 1");
    }

    #[test]
    fn test_own_and_enemy() {
        let b = Board::from_fen("8/8/8/8/8/2K5/1Q6/1k6 w - - 0 1");
        let q = Square::from_algebraic("b2");
        assert!(b.is_own(q, Color::White));
        assert!(!b.is_own(q, Color::Black));
        assert!(b.is_enemy(q, Color::Black));
        assert!(!b.is_enemy(Square::from_algebraic("e5"), Color::Black));
    }

    #[test]
    fn test_pieces_of() {
        let b = Board::from_fen("8/8/8/8/8/2K5/1Q6/1k6 w - - 0 1");
        assert_eq!(b.pieces_of(Color::White).count(), 2);
        assert_eq!(
            b.pieces_of(Color::Black).collect::<Vec<_>>(),
            vec![Square::from_algebraic("b1")]
        );
    }

    #[test]
    fn test_king_square() {
        let b = Board::from_fen("8/8/8/8/8/2K5/1Q6/1k6 w - - 0 1");
        assert_eq!(
            b.king_square(Color::White),
            Ok(Square::from_algebraic("c3"))
        );
        assert_eq!(
            b.king_square(Color::Black),
            Ok(Square::from_algebraic("b1"))
        );
    }

    #[test]
    fn test_king_square_not_found() {
        let b = Board::from_fen("8/8/8/8/8/8/1Q6/1k6 w - - 0 1");
        assert_eq!(
            b.king_square(Color::White),
            Err(MateError::KingNotFound(Color::White))
        );
    }

    #[test]
    fn test_scoped_move_restores_on_drop() {
        let mut b = Board::from_fen("8/8/8/8/3p4/8/3R4/8 w - - 0 1");
        let before = b.clone();
        let from = Square::from_algebraic("d2");
        let to = Square::from_algebraic("d4");
        {
            let scoped = ScopedMove::apply(&mut b, from, to);
            assert_eq!(scoped.board().piece_at(to), 4);
            assert_eq!(scoped.board().piece_at(from), 0);
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_scoped_move_restores_on_early_exit() {
        let mut b = Board::from_fen("8/8/8/8/3p4/8/3R4/8 w - - 0 1");
        let before = b.clone();
        let from = Square::from_algebraic("d2");
        let to = Square::from_algebraic("d4");
        // simulate an early return out of a search loop
        let found = (|| {
            let _scoped = ScopedMove::apply(&mut b, from, to);
            true
        })();
        assert!(found);
        assert_eq!(b, before);
    }

    #[test]
    fn test_display_renders_all_ranks() {
        let b = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let drawn = b.to_string();
        assert_eq!(drawn.lines().count(), 8);
        assert!(drawn.lines().next().unwrap().starts_with("♜"));
        assert!(drawn.lines().last().unwrap().contains("♔"));
    }
}
