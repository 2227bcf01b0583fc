//! Static position evaluation.

use rand::rngs::StdRng;
use rand::Rng;

use super::tables;
use crate::board::{Board, Color, Piece, PieceKind, Position};

/// Score a position from one side's perspective: material plus
/// piece-square bonus for every piece, sign-flipped for the opponent's
/// pieces, plus a small random perturbation so AI-vs-AI games do not
/// repeat deterministically.
pub(crate) fn evaluate(board: &Board, perspective: Color, rng: &mut StdRng) -> i32 {
    let endgame = queens_are_off(board);
    let mut score = 0;
    for piece in board.pieces() {
        let value = piece.kind().value() + positional_bonus(piece, endgame);
        if piece.color() == perspective {
            score += value;
        } else {
            score -= value;
        }
    }
    score + rng.gen_range(-2..=2)
}

/// The king's table switches to the endgame one once both queens have left
/// the board.
fn queens_are_off(board: &Board) -> bool {
    board.pieces().all(|piece| piece.kind() != PieceKind::Queen)
}

fn positional_bonus(piece: &Piece, endgame: bool) -> i32 {
    let table = match piece.kind() {
        PieceKind::Pawn => &tables::PAWN,
        PieceKind::Knight => &tables::KNIGHT,
        PieceKind::Bishop => &tables::BISHOP,
        PieceKind::Rook => &tables::ROOK,
        PieceKind::Queen => &tables::QUEEN,
        PieceKind::King => {
            if endgame {
                &tables::KING_ENDGAME
            } else {
                &tables::KING
            }
        }
    };
    table[table_index(piece.position(), piece.color())]
}

/// Tables are listed from the eighth rank down; White indexes them
/// directly, Black reads the ranks mirrored.
fn table_index(position: Position, color: Color) -> usize {
    let file = (position.file() - 1) as usize;
    let row = match color {
        Color::White => (8 - position.rank()) as usize,
        Color::Black => (position.rank() - 1) as usize,
    };
    row * 8 + file
}
