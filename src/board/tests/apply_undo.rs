//! Reversible move protocol tests: apply followed by undo restores every
//! piece's position, moved-flag, and the destination occupant exactly,
//! for every move variant.

use crate::board::{Board, BoardBuilder, Color, Move, MoveKind, PieceKind, Position};

fn pos(file: i8, rank: i8) -> Position {
    Position::new(file, rank).unwrap()
}

fn snapshot(board: &Board) -> Vec<(String, PieceKind, Color, bool)> {
    let mut pieces: Vec<_> = board
        .pieces()
        .map(|p| (p.position().to_string(), p.kind(), p.color(), p.has_moved()))
        .collect();
    pieces.sort();
    pieces
}

fn find_move(board: &mut Board, from: Position, to: Position) -> Move {
    board
        .legal_moves_at(from)
        .into_iter()
        .find(|m| m.to() == to)
        .unwrap_or_else(|| panic!("expected a legal move {from}{to}"))
}

#[test]
fn test_plain_move_round_trip() {
    let mut board = Board::standard();
    let before = snapshot(&board);

    let mut mv = find_move(&mut board, pos(5, 2), pos(5, 4));
    mv.apply(&mut board);
    assert!(board.piece_at(pos(5, 2)).is_none());
    let pawn = board.piece_at(pos(5, 4)).unwrap();
    assert!(pawn.has_moved());

    mv.undo(&mut board);
    assert_eq!(snapshot(&board), before);
    assert!(board.last_move().is_none());
}

#[test]
fn test_capture_round_trip_restores_destination_occupant() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Rd4")
        .unwrap()
        .place(Color::Black, "Nd7")
        .unwrap()
        .build();
    let before = snapshot(&board);

    let mut mv = find_move(&mut board, pos(4, 4), pos(4, 7));
    mv.apply(&mut board);
    assert_eq!(board.piece_count(), 1);
    assert_eq!(
        board.piece_at(pos(4, 7)).unwrap().kind(),
        PieceKind::Rook
    );

    mv.undo(&mut board);
    assert_eq!(snapshot(&board), before);
    let knight = board.piece_at(pos(4, 7)).unwrap();
    assert_eq!(knight.kind(), PieceKind::Knight);
    assert_eq!(knight.color(), Color::Black);
    assert!(!knight.has_moved());
}

#[test]
fn test_castling_round_trip() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Rh1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .build();
    let before = snapshot(&board);

    let mut mv = find_move(&mut board, pos(5, 1), pos(7, 1));
    assert!(matches!(mv.kind(), MoveKind::Castling { .. }));
    mv.apply(&mut board);
    assert_eq!(board.piece_at(pos(7, 1)).unwrap().kind(), PieceKind::King);
    assert_eq!(board.piece_at(pos(6, 1)).unwrap().kind(), PieceKind::Rook);
    assert!(board.piece_at(pos(7, 1)).unwrap().has_moved());
    assert!(board.piece_at(pos(6, 1)).unwrap().has_moved());

    mv.undo(&mut board);
    assert_eq!(snapshot(&board), before);
    assert!(!board.piece_at(pos(5, 1)).unwrap().has_moved());
    assert!(!board.piece_at(pos(8, 1)).unwrap().has_moved());

    // The round trip did not consume the right: castling regenerates.
    assert!(board
        .legal_moves_at(pos(5, 1))
        .iter()
        .any(|m| matches!(m.kind(), MoveKind::Castling { .. })));
}

#[test]
fn test_en_passant_round_trip() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Pe5")
        .unwrap()
        .place(Color::Black, "Pd7")
        .unwrap()
        .build();

    let mut double = find_move(&mut board, pos(4, 7), pos(4, 5));
    double.apply(&mut board);
    let before = snapshot(&board);

    let mut ep = find_move(&mut board, pos(5, 5), pos(4, 6));
    assert!(matches!(ep.kind(), MoveKind::EnPassant { .. }));
    ep.apply(&mut board);
    // Captured pawn is not on the destination square.
    assert!(board.piece_at(pos(4, 5)).is_none());
    assert_eq!(board.piece_at(pos(4, 6)).unwrap().kind(), PieceKind::Pawn);
    assert_eq!(board.piece_count(), 1);

    ep.undo(&mut board);
    assert_eq!(snapshot(&board), before);
    // The last-move record is restored too, so en passant regenerates.
    assert!(board
        .legal_moves_at(pos(5, 5))
        .iter()
        .any(|m| matches!(m.kind(), MoveKind::EnPassant { .. })));
}

#[test]
fn test_promotion_round_trip() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Pa7")
        .unwrap()
        .place(Color::Black, "Rb8")
        .unwrap()
        .build();
    let before = snapshot(&board);

    let mut mv = board
        .legal_moves_at(pos(1, 7))
        .into_iter()
        .find(|m| {
            m.to() == pos(2, 8)
                && matches!(m.kind(), MoveKind::Promotion { promote_to } if *promote_to == PieceKind::Queen)
        })
        .unwrap();
    mv.apply(&mut board);
    let promoted = board.piece_at(pos(2, 8)).unwrap();
    assert_eq!(promoted.kind(), PieceKind::Queen);
    assert_eq!(promoted.color(), Color::White);
    assert_eq!(board.piece_count(), 1);

    mv.undo(&mut board);
    assert_eq!(snapshot(&board), before);
    let pawn = board.piece_at(pos(1, 7)).unwrap();
    assert_eq!(pawn.kind(), PieceKind::Pawn);
    assert!(!pawn.has_moved());
    assert_eq!(board.piece_at(pos(2, 8)).unwrap().kind(), PieceKind::Rook);
}

#[test]
fn test_undo_works_from_post_move_state_only() {
    // Undo consults the live board, not a cached copy: interleave another
    // piece's round trip before undoing the first move.
    let mut board = Board::standard();
    let before = snapshot(&board);

    let mut first = find_move(&mut board, pos(5, 2), pos(5, 4));
    first.apply(&mut board);
    let mut second = find_move(&mut board, pos(7, 8), pos(6, 6));
    second.apply(&mut board);

    second.undo(&mut board);
    first.undo(&mut board);
    assert_eq!(snapshot(&board), before);
}

#[test]
#[should_panic(expected = "applied twice")]
fn test_double_apply_faults() {
    let mut board = Board::standard();
    let mut mv = find_move(&mut board, pos(5, 2), pos(5, 4));
    mv.apply(&mut board);
    mv.apply(&mut board);
}

#[test]
#[should_panic(expected = "undone before apply")]
fn test_undo_before_apply_faults() {
    let mut board = Board::standard();
    let mut mv = find_move(&mut board, pos(5, 2), pos(5, 4));
    mv.undo(&mut board);
}
