//! Pieces module - tetromino matrices and the wall-kick rotation system
//!
//! Every shape is a small square matrix of color indices (0 = empty).
//! Orientations are derived by rotating the spawn matrix; only the kick
//! tables are stored per orientation.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation, RotationDirection, BOARD_WIDTH, SPAWN_Y};

/// Largest matrix side used by any piece (the I piece).
pub const MAX_MATRIX: usize = 4;

/// A piece template or orientation: a `rows x cols` matrix of color indices.
///
/// Stored inline in a fixed 4x4 array so pieces stay `Copy` and the hot
/// paths never allocate. Cells outside `rows x cols` are always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_MATRIX]; MAX_MATRIX],
}

impl PieceMatrix {
    /// Build a matrix from row slices. All rows must share one length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.len());
        assert!(h <= MAX_MATRIX && w <= MAX_MATRIX, "matrix larger than 4x4");

        let mut cells = [[0u8; MAX_MATRIX]; MAX_MATRIX];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), w, "ragged piece matrix");
            cells[y][..w].copy_from_slice(row);
        }
        Self {
            rows: h as u8,
            cols: w as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Value at (x, y) inside the matrix, 0 outside it.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.cols as usize || y >= self.rows as usize {
            return 0;
        }
        self.cells[y][x]
    }

    /// Iterate the occupied cells as `(x, y, value)` relative to the matrix origin.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        (0..self.rows as usize).flat_map(move |y| {
            (0..self.cols as usize).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != 0).then_some((x as i8, y as i8, v))
            })
        })
    }

    /// Rows of the matrix as slices (for rendering collaborators).
    pub fn to_rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells[..self.rows as usize]
            .iter()
            .map(move |row| &row[..self.cols as usize])
    }

    /// Rotate 90° clockwise: `res[x][h-1-y] = mat[y][x]`.
    pub fn rotated_cw(&self) -> Self {
        let h = self.rows as usize;
        let w = self.cols as usize;
        let mut cells = [[0u8; MAX_MATRIX]; MAX_MATRIX];
        for y in 0..h {
            for x in 0..w {
                cells[x][h - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Rotate 90° counter-clockwise: `res[w-1-x][y] = mat[y][x]`.
    pub fn rotated_ccw(&self) -> Self {
        let h = self.rows as usize;
        let w = self.cols as usize;
        let mut cells = [[0u8; MAX_MATRIX]; MAX_MATRIX];
        for y in 0..h {
            for x in 0..w {
                cells[w - 1 - x][y] = self.cells[y][x];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    pub fn rotated(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotated_cw(),
            RotationDirection::CounterClockwise => self.rotated_ccw(),
        }
    }
}

/// Spawn-orientation matrix for a piece kind.
pub fn spawn_matrix(kind: PieceKind) -> PieceMatrix {
    let c = kind.color_index();
    match kind {
        PieceKind::I => PieceMatrix::from_rows(&[
            &[0, 0, 0, 0],
            &[c, c, c, c],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]),
        PieceKind::J => PieceMatrix::from_rows(&[&[c, 0, 0], &[c, c, c], &[0, 0, 0]]),
        PieceKind::L => PieceMatrix::from_rows(&[&[0, 0, c], &[c, c, c], &[0, 0, 0]]),
        PieceKind::O => PieceMatrix::from_rows(&[&[c, c], &[c, c]]),
        PieceKind::S => PieceMatrix::from_rows(&[&[0, c, c], &[c, c, 0], &[0, 0, 0]]),
        PieceKind::T => PieceMatrix::from_rows(&[&[0, c, 0], &[c, c, c], &[0, 0, 0]]),
        PieceKind::Z => PieceMatrix::from_rows(&[&[c, c, 0], &[0, c, c], &[0, 0, 0]]),
    }
}

/// Matrix for a kind in a given orientation (rotating the spawn matrix clockwise).
pub fn matrix_for(kind: PieceKind, rotation: Rotation) -> PieceMatrix {
    let mut m = spawn_matrix(kind);
    if kind == PieceKind::O {
        return m;
    }
    for _ in 0..rotation.index() {
        m = m.rotated_cw();
    }
    m
}

/// Horizontal spawn column: `floor((width - pieceWidth) / 2)`.
pub fn spawn_x(matrix: &PieceMatrix) -> i8 {
    ((BOARD_WIDTH - matrix.cols()) / 2) as i8
}

/// Wall kick data: `[orientation][direction][candidate]` of `(dx, dy)`.
///
/// Offsets are listed as published, with +y pointing up; apply them to the
/// y-down board as `(x + dx, y - dy)`. Direction column 0 is clockwise,
/// column 1 counter-clockwise.
pub type KickTable = [[[(i8, i8); 5]; 2]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub const JLSTZ_KICKS: KickTable = [
    // 0
    [
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // 0->R
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],    // 0->L
    ],
    // R
    [
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)], // R->2
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)], // R->0
    ],
    // 2
    [
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],    // 2->L
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // 2->R
    ],
    // L
    [
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // L->0
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)], // L->2
    ],
];

/// I piece kick table (different from JLSTZ)
pub const I_KICKS: KickTable = [
    // 0
    [
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)], // 0->R
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)], // 0->L
    ],
    // R
    [
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)], // R->2
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)], // R->0
    ],
    // 2
    [
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)], // 2->L
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)], // 2->R
    ],
    // L
    [
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)], // L->0
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)], // L->2
    ],
];

/// Kick candidates for rotating `kind` out of `from` in `direction`.
///
/// `None` for the O piece, which never kicks.
pub fn kick_offsets(
    kind: PieceKind,
    from: Rotation,
    direction: RotationDirection,
) -> Option<&'static [(i8, i8); 5]> {
    let table = match kind {
        PieceKind::O => return None,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    let kicks = &table[from.index()][direction.index()];
    debug_assert_eq!(kicks[0], (0, 0), "first kick must be the identity");
    Some(kicks)
}

/// The active falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece in spawn orientation, centered, one row above the field.
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = spawn_matrix(kind);
        Self {
            kind,
            x: spawn_x(&matrix),
            y: SPAWN_Y,
            matrix,
            rotation: Rotation::North,
        }
    }

    /// The same piece shifted by (dx, dy), or `None` if the origin would
    /// leave the `i8` range.
    pub fn shifted(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .filled()
            .map(move |(mx, my, _)| (self.x + mx, self.y + my))
    }
}

/// Try to rotate a piece with wall kicks.
///
/// `is_valid(matrix, x, y)` decides whether a candidate placement is legal.
/// Returns the rotated piece for the first candidate that validates, or
/// `None` when every candidate fails. The O piece comes back unchanged.
pub fn try_rotate(
    piece: &ActivePiece,
    direction: RotationDirection,
    is_valid: impl Fn(&PieceMatrix, i8, i8) -> bool,
) -> Option<ActivePiece> {
    let Some(kicks) = kick_offsets(piece.kind, piece.rotation, direction) else {
        return Some(*piece);
    };

    let matrix = piece.matrix.rotated(direction);
    let rotation = piece.rotation.rotate(direction);

    kicks.iter().find_map(|&(dx, dy)| {
        let x = piece.x.checked_add(dx)?;
        let y = piece.y.checked_sub(dy)?;
        is_valid(&matrix, x, y).then_some(ActivePiece {
            kind: piece.kind,
            matrix,
            rotation,
            x,
            y,
        })
    })
}
