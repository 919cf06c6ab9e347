//! Piece tests - matrices, spawn placement and SRS kicks

use blockfall::core::pieces::{spawn_x, I_KICKS, JLSTZ_KICKS};
use blockfall::core::{kick_offsets, matrix_for, spawn_matrix, try_rotate, ActivePiece, Board};
use blockfall::types::{PieceKind, Rotation, RotationDirection};
use proptest::prelude::*;

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

fn piece_at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> ActivePiece {
    ActivePiece {
        kind,
        matrix: matrix_for(kind, rotation),
        rotation,
        x,
        y,
    }
}

fn rotate_on(board: &Board, piece: &ActivePiece, dir: RotationDirection) -> Option<ActivePiece> {
    try_rotate(piece, dir, |m, x, y| board.is_valid_position(m, x, y))
}

#[test]
fn test_spawn_positions() {
    for kind in PieceKind::ALL {
        let piece = ActivePiece::spawn(kind);
        let expected_x = match kind {
            PieceKind::O => 4,
            _ => 3,
        };
        assert_eq!(piece.x, expected_x, "{kind:?}");
        assert_eq!(piece.y, -1);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(spawn_x(&piece.matrix), expected_x);
    }
}

#[test]
fn test_every_piece_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in ROTATIONS {
            let m = matrix_for(kind, rotation);
            assert_eq!(m.filled().count(), 4, "{kind:?} {rotation:?}");
            assert!(m.filled().all(|(_, _, v)| v == kind.color_index()));
        }
    }
}

#[test]
fn test_four_clockwise_rotations_return_to_start() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        for start in ROTATIONS {
            let original = piece_at(kind, start, 3, 8);
            let mut piece = original;
            for _ in 0..4 {
                piece = rotate_on(&board, &piece, RotationDirection::Clockwise)
                    .expect("free rotation on an empty board");
            }
            assert_eq!(piece, original, "{kind:?} from {start:?}");
        }
    }
}

#[test]
fn test_o_piece_never_changes() {
    let board = Board::new();
    let o = ActivePiece::spawn(PieceKind::O);
    assert_eq!(rotate_on(&board, &o, RotationDirection::Clockwise), Some(o));
    assert_eq!(rotate_on(&board, &o, RotationDirection::CounterClockwise), Some(o));
    assert!(kick_offsets(PieceKind::O, Rotation::North, RotationDirection::Clockwise).is_none());
}

#[test]
fn test_all_kicks_failing_returns_none() {
    let t = piece_at(PieceKind::T, Rotation::North, 3, 5);
    assert_eq!(try_rotate(&t, RotationDirection::Clockwise, |_, _, _| false), None);
}

#[test]
fn test_t_kicks_off_left_wall() {
    let board = Board::new();
    // East T hugging the left wall with its empty left column outside.
    let t = piece_at(PieceKind::T, Rotation::East, -1, 5);
    assert!(board.is_valid_position(&t.matrix, t.x, t.y));

    let rotated = rotate_on(&board, &t, RotationDirection::Clockwise).unwrap();
    assert_eq!(rotated.rotation, Rotation::South);
    assert_eq!((rotated.x, rotated.y), (0, 5));
}

#[test]
fn test_i_kicks_off_right_wall() {
    let board = Board::new();
    let i = piece_at(PieceKind::I, Rotation::East, 7, 5);
    assert!(board.is_valid_position(&i.matrix, i.x, i.y));

    let rotated = rotate_on(&board, &i, RotationDirection::Clockwise).unwrap();
    assert_eq!(rotated.rotation, Rotation::South);
    assert_eq!((rotated.x, rotated.y), (6, 5));
}

#[test]
fn test_kick_tables_start_with_identity() {
    for table in [&JLSTZ_KICKS, &I_KICKS] {
        for per_orientation in table.iter() {
            for kicks in per_orientation.iter() {
                assert_eq!(kicks[0], (0, 0));
            }
        }
    }
}

#[test]
fn test_reverse_rotation_uses_negated_kicks() {
    for kind in [PieceKind::T, PieceKind::I] {
        for from in ROTATIONS {
            let forward = kick_offsets(kind, from, RotationDirection::Clockwise).unwrap();
            let back =
                kick_offsets(kind, from.rotate_cw(), RotationDirection::CounterClockwise).unwrap();
            for (f, b) in forward.iter().zip(back.iter()) {
                assert_eq!((f.0, f.1), (-b.0, -b.1), "{kind:?} {from:?}");
            }
        }
    }
}

#[test]
fn test_matrix_for_matches_repeated_rotation() {
    for kind in PieceKind::ALL {
        let mut m = spawn_matrix(kind);
        for rotation in ROTATIONS {
            if kind != PieceKind::O {
                assert_eq!(matrix_for(kind, rotation), m, "{kind:?} {rotation:?}");
            }
            m = m.rotated_cw();
        }
    }
}

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn any_rotation() -> impl Strategy<Value = Rotation> {
    prop::sample::select(ROTATIONS.to_vec())
}

proptest! {
    #[test]
    fn prop_cw_then_ccw_is_identity(kind in any_kind(), rotation in any_rotation()) {
        let m = matrix_for(kind, rotation);
        prop_assert_eq!(m.rotated_cw().rotated_ccw(), m);
        prop_assert_eq!(m.rotated_ccw().rotated_cw(), m);
    }

    #[test]
    fn prop_kicked_rotation_always_lands_on_a_legal_cell_set(
        kind in any_kind(),
        rotation in any_rotation(),
        x in -2i8..10,
        y in -2i8..18,
        holes in prop::collection::vec(0i8..10, 1..4),
    ) {
        let mut board = Board::new();
        for row in 12..20 {
            board.fill_row_except(row, PieceKind::Z, &holes);
        }
        let piece = piece_at(kind, rotation, x, y);
        prop_assume!(board.is_valid_position(&piece.matrix, piece.x, piece.y));

        if let Some(rotated) = rotate_on(&board, &piece, RotationDirection::Clockwise) {
            prop_assert!(board.is_valid_position(&rotated.matrix, rotated.x, rotated.y));
            if kind != PieceKind::O {
                prop_assert_eq!(rotated.rotation, rotation.rotate_cw());
                prop_assert_eq!(rotated.matrix, matrix_for(kind, rotation.rotate_cw()));
            }
        }
    }
}
