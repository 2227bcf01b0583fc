//! Special positions: castling legality, en passant timing, pins, check
//! evasion.

use crate::board::{Board, BoardBuilder, Color, Move, MoveKind, Position};

fn pos(file: i8, rank: i8) -> Position {
    Position::new(file, rank).unwrap()
}

fn castling_targets(board: &mut Board, king: Position) -> Vec<Position> {
    board
        .legal_moves_at(king)
        .into_iter()
        .filter(|m| matches!(m.kind(), MoveKind::Castling { .. }))
        .map(|m| m.to())
        .collect()
}

fn white_castling_fixture() -> Board {
    BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Ra1")
        .unwrap()
        .place(Color::White, "Rh1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .build()
}

fn find_move(board: &mut Board, from: Position, to: Position) -> Move {
    board
        .legal_moves_at(from)
        .into_iter()
        .find(|m| m.to() == to)
        .unwrap_or_else(|| panic!("expected a legal move {from}{to}"))
}

#[test]
fn test_both_castling_sides_available() {
    let mut board = white_castling_fixture();
    let targets = castling_targets(&mut board, pos(5, 1));
    assert_eq!(targets.len(), 2);
    assert!(targets.contains(&pos(7, 1)));
    assert!(targets.contains(&pos(3, 1)));
}

#[test]
fn test_castling_blocked_by_piece_between() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Ra1")
        .unwrap()
        .place(Color::White, "Rh1")
        .unwrap()
        .place(Color::White, "Bf1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .build();
    let targets = castling_targets(&mut board, pos(5, 1));
    assert_eq!(targets, vec![pos(3, 1)]);
}

#[test]
fn test_castling_blocked_when_crossed_square_threatened() {
    // Black rook seals the f-file: the king would cross a threatened
    // square kingside. Queenside is untouched.
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Ra1")
        .unwrap()
        .place(Color::White, "Rh1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .place(Color::Black, "Rf8")
        .unwrap()
        .build();
    let targets = castling_targets(&mut board, pos(5, 1));
    assert_eq!(targets, vec![pos(3, 1)]);
}

#[test]
fn test_queenside_b_file_threat_does_not_block() {
    // Only squares the king passes through or lands on matter; b1 is
    // crossed by the rook alone.
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Ra1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .place(Color::Black, "Rb8")
        .unwrap()
        .build();
    let targets = castling_targets(&mut board, pos(5, 1));
    assert_eq!(targets, vec![pos(3, 1)]);
}

#[test]
fn test_no_castling_out_of_check() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Ra1")
        .unwrap()
        .place(Color::White, "Rh1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .place(Color::Black, "Re7")
        .unwrap()
        .build();
    assert!(board.is_in_check(Color::White));
    assert!(castling_targets(&mut board, pos(5, 1)).is_empty());
}

#[test]
fn test_castling_disabled_by_move_and_return() {
    let mut board = white_castling_fixture();

    // Rook h1 wanders off and comes back; each leg is a distinct move, so
    // the flag set by the first apply is never unset.
    let mut out = find_move(&mut board, pos(8, 1), pos(8, 3));
    out.apply(&mut board);
    let mut back = find_move(&mut board, pos(8, 3), pos(8, 1));
    back.apply(&mut board);

    let targets = castling_targets(&mut board, pos(5, 1));
    assert_eq!(targets, vec![pos(3, 1)], "kingside should stay disabled");
}

#[test]
fn test_en_passant_exactly_one_and_removes_pawn() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Pe5")
        .unwrap()
        .place(Color::Black, "Pd7")
        .unwrap()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .build();

    let mut double = find_move(&mut board, pos(4, 7), pos(4, 5));
    double.apply(&mut board);

    let captures: Vec<Move> = board
        .legal_moves_at(pos(5, 5))
        .into_iter()
        .filter(|m| matches!(m.kind(), MoveKind::EnPassant { .. }))
        .collect();
    assert_eq!(captures.len(), 1);

    let mut ep = captures.into_iter().next().unwrap();
    assert_eq!(ep.to(), pos(4, 6));
    ep.apply(&mut board);
    assert!(
        board.piece_at(pos(4, 5)).is_none(),
        "double-advanced pawn should be captured off its own square"
    );
}

#[test]
fn test_en_passant_expires_after_intervening_move() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Pe5")
        .unwrap()
        .place(Color::Black, "Pd7")
        .unwrap()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::Black, "Ke8")
        .unwrap()
        .build();

    let mut double = find_move(&mut board, pos(4, 7), pos(4, 5));
    double.apply(&mut board);
    let mut king = find_move(&mut board, pos(5, 1), pos(5, 2));
    king.apply(&mut board);

    // Only the immediately preceding move counts.
    assert!(!board
        .legal_moves_at(pos(5, 5))
        .iter()
        .any(|m| matches!(m.kind(), MoveKind::EnPassant { .. })));
}

#[test]
fn test_pinned_piece_has_no_legal_moves() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Be2")
        .unwrap()
        .place(Color::Black, "Qe8")
        .unwrap()
        .place(Color::Black, "Kh8")
        .unwrap()
        .build();
    // Every bishop move leaves the e-file and exposes the king.
    assert!(!board.candidate_moves_at(pos(5, 2)).is_empty());
    assert!(board.legal_moves_at(pos(5, 2)).is_empty());
}

#[test]
fn test_check_evasion_only() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::White, "Nb1")
        .unwrap()
        .place(Color::Black, "Re8")
        .unwrap()
        .place(Color::Black, "Kh8")
        .unwrap()
        .build();
    assert!(board.is_in_check(Color::White));

    // The knight cannot help; only the king can step off the e-file.
    assert!(board.legal_moves_at(pos(2, 1)).is_empty());
    let king_moves = board.legal_moves_at(pos(5, 1));
    assert!(!king_moves.is_empty());
    assert!(king_moves.iter().all(|m| m.to().file() != 5));
}

#[test]
fn test_king_cannot_step_onto_threatened_square() {
    let mut board = BoardBuilder::new()
        .place(Color::White, "Ke1")
        .unwrap()
        .place(Color::Black, "Ke3")
        .unwrap()
        .build();
    // The kings face off; neither may step adjacent to the other.
    let targets: Vec<Position> = board
        .legal_moves_at(pos(5, 1))
        .iter()
        .map(|m| m.to())
        .collect();
    assert!(!targets.contains(&pos(5, 2)));
    assert!(!targets.contains(&pos(4, 2)));
    assert!(!targets.contains(&pos(6, 2)));
    assert!(targets.contains(&pos(4, 1)));
}
