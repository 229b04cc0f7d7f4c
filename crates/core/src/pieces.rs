//! Pieces module - piece shape tables and the falling piece instance
//!
//! Every kind has four rotation states stored as small square matrices
//! (2x2 for O, 3x3 for T/S/Z/J/L, 4x4 for I). A non-zero entry marks an
//! occupied sub-cell and holds the kind's color tag. The tables are static
//! and are the only source of piece geometry.
//!
//! Rotation is a plain table step: there are no wall kicks. Validity of a
//! moved or rotated piece is decided by the engine, never here.

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Largest matrix edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Number of occupied cells in every piece
pub const MINOS_PER_PIECE: usize = 4;

/// Spawn anchor (x, y): horizontally centered, one row above the visible grid
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH / 2) as i8 - 1, -1);

/// One rotation state as a square matrix, padded to 4x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: u8,
    rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Edge length of the matrix (2, 3 or 4).
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Entry at (col, row); 0 outside the matrix.
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col >= self.size() || row >= self.size() {
            return 0;
        }
        self.rows[row][col]
    }

    /// Offsets of the occupied entries in row-major scan order.
    pub fn offsets(&self) -> PieceShape {
        let size = self.size();
        let mut out = [(0, 0); MINOS_PER_PIECE];
        let mut n = 0;
        for (row, line) in self.rows.iter().enumerate().take(size) {
            for (col, &v) in line.iter().enumerate().take(size) {
                if v != 0 && n < MINOS_PER_PIECE {
                    out[n] = (col as i8, row as i8);
                    n += 1;
                }
            }
        }
        debug_assert_eq!(n, MINOS_PER_PIECE);
        out
    }

    /// Number of non-zero entries.
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&v| v != 0)
            .count()
    }
}

const fn matrix<const N: usize>(rows: [[u8; N]; N]) -> ShapeMatrix {
    let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut r = 0;
    while r < N {
        let mut c = 0;
        while c < N {
            out[r][c] = rows[r][c];
            c += 1;
        }
        r += 1;
    }
    ShapeMatrix {
        size: N as u8,
        rows: out,
    }
}

static I_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    matrix([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
    matrix([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
    matrix([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

// Square: identical in every state.
static O_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[2, 2], [2, 2]]),
    matrix([[2, 2], [2, 2]]),
    matrix([[2, 2], [2, 2]]),
    matrix([[2, 2], [2, 2]]),
];

static T_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[0, 3, 0], [3, 3, 3], [0, 0, 0]]),
    matrix([[0, 3, 0], [0, 3, 3], [0, 3, 0]]),
    matrix([[0, 0, 0], [3, 3, 3], [0, 3, 0]]),
    matrix([[0, 3, 0], [3, 3, 0], [0, 3, 0]]),
];

static S_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[0, 4, 4], [4, 4, 0], [0, 0, 0]]),
    matrix([[0, 4, 0], [0, 4, 4], [0, 0, 4]]),
    matrix([[0, 0, 0], [0, 4, 4], [4, 4, 0]]),
    matrix([[4, 0, 0], [4, 4, 0], [0, 4, 0]]),
];

static Z_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[5, 5, 0], [0, 5, 5], [0, 0, 0]]),
    matrix([[0, 0, 5], [0, 5, 5], [0, 5, 0]]),
    matrix([[0, 0, 0], [5, 5, 0], [0, 5, 5]]),
    matrix([[0, 5, 0], [5, 5, 0], [5, 0, 0]]),
];

static J_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[6, 0, 0], [6, 6, 6], [0, 0, 0]]),
    matrix([[0, 6, 6], [0, 6, 0], [0, 6, 0]]),
    matrix([[0, 0, 0], [6, 6, 6], [0, 0, 6]]),
    matrix([[0, 6, 0], [0, 6, 0], [6, 6, 0]]),
];

static L_ROTATIONS: [ShapeMatrix; 4] = [
    matrix([[0, 0, 7], [7, 7, 7], [0, 0, 0]]),
    matrix([[0, 7, 0], [0, 7, 0], [0, 7, 7]]),
    matrix([[0, 0, 0], [7, 7, 7], [7, 0, 0]]),
    matrix([[7, 7, 0], [0, 7, 0], [0, 7, 0]]),
];

/// All four rotation states of a kind, indexed by [`Rotation::index`].
pub fn shape_rotations(kind: PieceKind) -> &'static [ShapeMatrix; 4] {
    match kind {
        PieceKind::I => &I_ROTATIONS,
        PieceKind::O => &O_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
    }
}

/// Matrix for a kind at a rotation.
pub fn shape_matrix(kind: PieceKind, rotation: Rotation) -> &'static ShapeMatrix {
    &shape_rotations(kind)[rotation.index()]
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    shape_matrix(kind, rotation).offsets()
}

/// A piece instance: kind, rotation and anchor in grid coordinates.
///
/// `move_by` and `rotate` mutate unconditionally. The engine validates a
/// candidate built with `moved`/`rotated` before committing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece in its first rotation state, anchored at (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: 0,
            y: 0,
        }
    }

    /// Create a piece at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            x,
            y,
            ..Self::new(kind)
        }
    }

    pub fn color(&self) -> u8 {
        self.kind.color()
    }

    /// Matrix edge length of this piece's kind
    pub fn size(&self) -> usize {
        self.matrix().size()
    }

    pub fn matrix(&self) -> &'static ShapeMatrix {
        shape_matrix(self.kind, self.rotation)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        self.matrix().offsets()
    }

    /// Absolute grid cells (anchor + offset), row-major
    ///
    /// Coordinates saturate at `i8::MAX`, which is always off the board.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// Advance the rotation state clockwise (modulo 4)
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// Translate the anchor, saturating at the `i8` bounds.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn set_position(&mut self, x: i8, y: i8) {
        self.x = x;
        self.y = y;
    }

    /// Copy of this piece rotated once clockwise
    pub fn rotated(&self) -> Self {
        let mut piece = *self;
        piece.rotate();
        piece
    }

    /// Copy of this piece translated by (dx, dy)
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        let mut piece = *self;
        piece.move_by(dx, dy);
        piece
    }

    /// Like [`Tetromino::moved`], but `None` when the anchor would leave the `i8` range.
    pub fn checked_moved(&self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }
}
