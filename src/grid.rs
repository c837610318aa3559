//! The 27-piece arena and the rotation engine that turns its slices.
//!
//! Pieces live in a fixed array indexed by [`PieceId`], and a second array maps
//! each grid cell to the piece occupying it, so both "where is piece P" and
//! "which piece is at cell C" are O(1). Cells are indexed x-major with every
//! component shifted from `-1..=1` to `0..=2`.

use rustc_hash::FxHashMap;

use crate::error::CubeError;
use crate::geometry::{Axis, Coord, Direction};
use crate::pieces::{Color, Piece, PieceId};
use crate::slice::Turn;

/// Cells per side.
pub const DIM: usize = 3;

/// Total number of cells (and pieces).
pub const GRID_SIZE: usize = DIM * DIM * DIM;

/// Builds the cell turn table at compile time.
///
/// `table[axis][quarters][src]` is the cell index that `src` moves to after
/// `quarters` positive quarter turns of the whole grid about `axis`. Applying
/// only the entries of one slice's cells turns that slice.
const fn build_turn_table() -> [[[u8; GRID_SIZE]; 4]; 3] {
    let mut table = [[[0u8; GRID_SIZE]; 4]; 3];

    let mut axis = 0;
    while axis < 3 {
        let mut quarters = 0;
        while quarters < 4 {
            let mut src = 0;
            while src < GRID_SIZE {
                let (mut x, mut y, mut z) = idx_to_coord(src);

                // same formulas as geometry::QUARTER_TURNS, repeated
                let mut step = 0;
                while step < quarters {
                    let (nx, ny, nz) = match axis {
                        0 => (x, -z, y),
                        1 => (z, y, -x),
                        _ => (-y, x, z),
                    };
                    x = nx;
                    y = ny;
                    z = nz;
                    step += 1;
                }

                table[axis][quarters][src] = coord_to_idx(x, y, z) as u8;
                src += 1;
            }
            quarters += 1;
        }
        axis += 1;
    }
    table
}

const TURN_TABLE: [[[u8; GRID_SIZE]; 4]; 3] = build_turn_table();

/// Converts centered (x, y, z) coordinates to a linear cell index.
///
/// Index order is x-major: `idx = (x + 1) * 9 + (y + 1) * 3 + (z + 1)`.
#[inline(always)]
pub const fn coord_to_idx(x: i32, y: i32, z: i32) -> usize {
    ((x + 1) as usize) * DIM * DIM + ((y + 1) as usize) * DIM + ((z + 1) as usize)
}

/// Converts a linear cell index to centered (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (
        (cell_index / (DIM * DIM)) as i32 - 1,
        ((cell_index / DIM) % DIM) as i32 - 1,
        (cell_index % DIM) as i32 - 1,
    )
}

/// Something that can turn slices of a cube.
///
/// Implementors must apply a turn atomically: every member of the slice moves
/// or none does.
pub trait RotationEngine {
    fn apply(&mut self, turn: Turn) -> Result<(), CubeError>;

    /// Applies `turns` in order, stopping at the first malformed one.
    fn apply_all(&mut self, turns: &[Turn]) -> Result<(), CubeError> {
        turns.iter().try_for_each(|&turn| self.apply(turn))
    }
}

/// A 3x3x3 cube: 27 pieces and the cell each one occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    pieces: [Piece; GRID_SIZE],
    cells: [PieceId; GRID_SIZE],
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl Cube {
    /// A solved cube with every piece in its home cell.
    pub fn new() -> Self {
        Self {
            pieces: std::array::from_fn(|idx| Piece::new(PieceId(idx as u8), idx_to_coord(idx))),
            cells: std::array::from_fn(|idx| PieceId(idx as u8)),
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// The piece currently occupying `cell`.
    ///
    /// Panics if a component of `cell` is outside `-1..=1`.
    #[inline]
    pub fn piece_at(&self, (x, y, z): Coord) -> &Piece {
        debug_assert!(
            [x, y, z].iter().all(|c| (-1..=1).contains(c)),
            "cell ({x},{y},{z}) is outside the cube"
        );
        self.piece(self.cells[coord_to_idx(x, y, z)])
    }

    /// The center piece on the `face` side.
    pub fn center(&self, face: Direction) -> &Piece {
        self.piece_at(face.to_coord())
    }

    /// True when every face shows a single color.
    pub fn is_solved(&self) -> bool {
        let mut seen: FxHashMap<Direction, Color> = FxHashMap::default();
        self.pieces.iter().all(|piece| {
            piece
                .current_faces()
                .into_iter()
                .all(|(direction, color)| *seen.entry(direction).or_insert(color) == color)
        })
    }
}

impl RotationEngine for Cube {
    fn apply(&mut self, turn: Turn) -> Result<(), CubeError> {
        let quarters = turn.quarters()?;
        let axis: Axis = turn.slice.axis();
        let mapping = &TURN_TABLE[axis.index()][quarters];

        let before = self.cells;
        for (src, &id) in before.iter().enumerate() {
            if !turn.slice.contains(idx_to_coord(src)) {
                continue;
            }
            let dest = mapping[src] as usize;
            self.cells[dest] = id;
            self.pieces[id.index()].turn(idx_to_coord(dest), axis, quarters);
        }
        Ok(())
    }
}
