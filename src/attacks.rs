use crate::board::Board;
use crate::types::{
    piece_code, Color, PieceType, Square, DIAGONAL_DIRS, ORTHOGONAL_DIRS, STEP_TABLES,
};

/// Code of the first occupied square along `(d_file, d_rank)` from `sq`.
fn first_piece_along(board: &Board, sq: Square, d_file: i8, d_rank: i8) -> Option<i8> {
    let mut next = sq.offset(d_file, d_rank);
    while let Some(s) = next {
        if !board.is_empty(s) {
            return Some(board.piece_at(s));
        }
        next = s.offset(d_file, d_rank);
    }
    None
}

/// Is `sq` attacked along a rank or file by an enemy rook or queen?
pub fn attacked_by_rook_or_queen(board: &Board, sq: Square, defender: Color) -> bool {
    let attacker = defender.other_color();
    let rook = piece_code(attacker, PieceType::Rook);
    let queen = piece_code(attacker, PieceType::Queen);
    ORTHOGONAL_DIRS.iter().any(|&(d_file, d_rank)| {
        matches!(first_piece_along(board, sq, d_file, d_rank),
            Some(code) if code == rook || code == queen)
    })
}

/// Is `sq` attacked along a diagonal by an enemy bishop or queen?
pub fn attacked_by_bishop_or_queen(board: &Board, sq: Square, defender: Color) -> bool {
    let attacker = defender.other_color();
    let bishop = piece_code(attacker, PieceType::Bishop);
    let queen = piece_code(attacker, PieceType::Queen);
    DIAGONAL_DIRS.iter().any(|&(d_file, d_rank)| {
        matches!(first_piece_along(board, sq, d_file, d_rank),
            Some(code) if code == bishop || code == queen)
    })
}

pub fn attacked_by_knight(board: &Board, sq: Square, defender: Color) -> bool {
    let knight = piece_code(defender.other_color(), PieceType::Knight);
    STEP_TABLES.knight[sq.index()]
        .iter()
        .any(|&s| board.piece_at(s) == knight)
}

/// Enemy pawns capture toward the defender, so they attack `sq` from one step
/// in the defender's own forward direction.
pub fn attacked_by_pawn(board: &Board, sq: Square, defender: Color) -> bool {
    let pawn = piece_code(defender.other_color(), PieceType::Pawn);
    let step = defender.pawn_step();
    [-1, 1].iter().any(|&d_file| {
        sq.offset(d_file, step)
            .is_some_and(|s| board.piece_at(s) == pawn)
    })
}

/// Is `sq` attacked by any piece of the side opposing `defender`?
///
/// Works for any square, not only a king's: the mate search reuses it to
/// probe candidate escape squares. Attacks by the opposing king itself are
/// not modeled. Queens are covered by the two slider predicates, which scan
/// all eight ray directions between them.
pub fn is_square_attacked(board: &Board, sq: Square, defender: Color) -> bool {
    attacked_by_rook_or_queen(board, sq, defender)
        || attacked_by_bishop_or_queen(board, sq, defender)
        || attacked_by_knight(board, sq, defender)
        || attacked_by_pawn(board, sq, defender)
}
