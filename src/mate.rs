use log::{debug, trace};

use crate::attacks::is_square_attacked;
use crate::board::{Board, ScopedMove};
use crate::movegen::moves_from;
use crate::types::{Color, MateError, Square, STEP_TABLES};

/// Is the king of `side` currently attacked?
pub fn is_king_in_check(board: &Board, side: Color) -> Result<bool, MateError> {
    let king = board.king_square(side)?;
    Ok(is_square_attacked(board, king, side))
}

/// First adjacent square the checked king could step to. Only empty squares
/// are candidates (capturing an adjacent attacker is left to the escape
/// search); each one is probed with the king hypothetically relocated, so a
/// step along the vacated check ray is still seen as attacked.
fn king_step_out(board: &mut Board, king: Square, side: Color) -> Option<Square> {
    let candidates: Vec<Square> = STEP_TABLES.king[king.index()]
        .iter()
        .copied()
        .filter(|&dest| board.is_empty(dest))
        .collect();
    for dest in candidates {
        let scoped = ScopedMove::apply(board, king, dest);
        if !is_square_attacked(scoped.board(), dest, side) {
            return Some(dest);
        }
    }
    None
}

/// First move of `side` that leaves its king unattacked, if any. Every
/// candidate is simulated under a [`ScopedMove`], so the board is restored
/// on all paths out of the search. When the king itself is the piece moved,
/// the check is re-tested on its destination square.
fn move_breaking_check(board: &mut Board, king: Square, side: Color) -> Option<(Square, Square)> {
    let own_pieces: Vec<Square> = board.pieces_of(side).collect();
    for from in own_pieces {
        for to in moves_from(board, from, side) {
            let king_after = if from == king { to } else { king };
            let scoped = ScopedMove::apply(board, from, to);
            if !is_square_attacked(scoped.board(), king_after, side) {
                return Some((from, to));
            }
            trace!("{from} -> {to} does not break the check");
        }
    }
    None
}

/// Is `side` checkmated on this board?
///
/// The board is mutated only transiently while simulating candidate escape
/// moves and is bit-identical to its input state when the query returns.
pub fn is_checkmate(board: &mut Board, side: Color) -> Result<bool, MateError> {
    let king = board.king_square(side)?;

    if !is_square_attacked(board, king, side) {
        debug!("{} king at {king} is not in check", side.to_human());
        return Ok(false);
    }
    debug!("{} king in check at {king}\n{board}", side.to_human());

    if let Some(dest) = king_step_out(board, king, side) {
        debug!("king can step to {dest}");
        return Ok(false);
    }

    if let Some((from, to)) = move_breaking_check(board, king, side) {
        debug!("check can be answered by {from} -> {to}");
        return Ok(false);
    }

    debug!("{} is checkmated", side.to_human());
    Ok(true)
}
