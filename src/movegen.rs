use crate::board::Board;
use crate::types::{Color, PieceType, Square, DIAGONAL_DIRS, KING_STEPS, ORTHOGONAL_DIRS, STEP_TABLES};

/// Per-piece-type move geometry, ignoring occupancy. Pawns are deliberately
/// not handled here: their moves are produced only by the bespoke logic in
/// [`moves_from`], so the oracle rejects them.
fn move_shape_ok(piece_type: PieceType, from: Square, to: Square) -> bool {
    let file_delta = from.file_delta(&to);
    let rank_delta = from.rank_delta(&to);
    match piece_type {
        PieceType::Rook => from.file() == to.file() || from.rank() == to.rank(),
        PieceType::Bishop => file_delta == rank_delta,
        PieceType::Queen => {
            from.file() == to.file() || from.rank() == to.rank() || file_delta == rank_delta
        }
        PieceType::Knight => {
            (file_delta == 2 && rank_delta == 1) || (file_delta == 1 && rank_delta == 2)
        }
        PieceType::King => file_delta <= 1 && rank_delta <= 1,
        PieceType::Pawn => false,
    }
}

/// Is moving the piece on `from` to `to` pseudo-legal: path clear, destination
/// empty or enemy, and the displacement allowed by the piece's geometry?
///
/// Check implications are ignored, so a move that leaves the mover's own king
/// attacked still passes.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let code = board.piece_at(from);
    let Some(piece_type) = PieceType::from_code(code) else {
        return false;
    };
    let Some(mover) = Color::from_code(code) else {
        return false;
    };

    // Knight hops are not ray moves; the signum walk below would never land
    // on the destination, so knights skip straight to the occupancy and
    // geometry checks.
    if piece_type != PieceType::Knight {
        let d_file = (to.file() as i16 - from.file() as i16).signum() as i8;
        let d_rank = (to.rank() as i16 - from.rank() as i16).signum() as i8;
        let mut path = from.offset(d_file, d_rank);
        loop {
            match path {
                // Walked off the board without reaching `to`: the displacement
                // was not a ray in the first place.
                None => return false,
                Some(sq) if sq == to => break,
                Some(sq) => {
                    if !board.is_empty(sq) {
                        return false;
                    }
                    path = sq.offset(d_file, d_rank);
                }
            }
        }
    }

    if board.is_own(to, mover) {
        return false;
    }
    move_shape_ok(piece_type, from, to)
}

/// All destinations the piece on `from` could reach for `side`, pseudo-legal
/// only: no filtering of moves that leave the mover's own king in check.
pub fn moves_from(board: &Board, from: Square, side: Color) -> Vec<Square> {
    let Some(piece_type) = PieceType::from_code(board.piece_at(from)) else {
        return vec![];
    };
    let mut moves: Vec<Square> = vec![];

    if piece_type == PieceType::Pawn {
        let step = side.pawn_step();
        if let Some(one) = from.offset(0, step) {
            if board.is_empty(one) {
                moves.push(one);
                // the double push needs both squares in front empty
                if from.rank() == side.pawn_start_rank() {
                    if let Some(two) = one.offset(0, step) {
                        if board.is_empty(two) {
                            moves.push(two);
                        }
                    }
                }
            }
        }
        for d_file in [-1, 1] {
            if let Some(capture) = from.offset(d_file, step) {
                if board.is_enemy(capture, side) {
                    moves.push(capture);
                }
            }
        }
        return moves;
    }

    match piece_type {
        PieceType::Knight => {
            for &to in &STEP_TABLES.knight[from.index()] {
                if is_pseudo_legal(board, from, to) {
                    moves.push(to);
                }
            }
        }
        PieceType::King => {
            for &to in &STEP_TABLES.king[from.index()] {
                if is_pseudo_legal(board, from, to) {
                    moves.push(to);
                }
            }
        }
        _ => {
            debug_assert!(piece_type.is_sliding());
            let directions: &[(i8, i8)] = match piece_type {
                PieceType::Rook => &ORTHOGONAL_DIRS,
                PieceType::Bishop => &DIAGONAL_DIRS,
                // a queen slides along the union of both sets
                _ => &KING_STEPS,
            };
            for &(d_file, d_rank) in directions {
                let mut sq = from;
                while let Some(to) = sq.offset(d_file, d_rank) {
                    if !is_pseudo_legal(board, from, to) {
                        break;
                    }
                    moves.push(to);
                    if !board.is_empty(to) {
                        break; // include the capture square, then stop
                    }
                    sq = to;
                }
            }
        }
    }
    moves
}
