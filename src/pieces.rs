//! Piece definitions: paint colors, accumulated orientation and grid position.
//!
//! Each of the 27 unit cubes keeps the colors it was painted with in its own
//! body frame. Turning a slice moves the piece and composes the turn into its
//! orientation, and world-facing colors are derived from those two on demand.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::CubeError;
use crate::geometry::{Axis, Coord, Direction};
use crate::slice::Slice;

/// A sticker color. `Neutral` marks an unpainted, internal face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Neutral,
    Blue,
    Green,
    Orange,
    Red,
    White,
    Yellow,
}

/// Anchor color solved first, on the down face.
pub const PRIMARY: Color = Color::White;

/// Anchor color solved last, on the up face.
pub const OPPOSITE: Color = Color::Yellow;

/// Color painted on each face of a freshly built cube.
pub const FACE_COLORS: [(Direction, Color); 6] = [
    (Direction::Left, Color::Red),
    (Direction::Right, Color::Orange),
    (Direction::Down, Color::Yellow),
    (Direction::Up, Color::White),
    (Direction::Back, Color::Blue),
    (Direction::Forward, Color::Green),
];

/// Fixed assignment of colors to a piece's local face directions.
///
/// Set once at construction; unassigned directions read as `Neutral`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceColoring {
    colors: [Color; 6],
}

impl PieceColoring {
    /// Paints every outward face of the piece starting at `cell`.
    pub fn for_cell(cell: Coord) -> Self {
        let mut colors = [Color::Neutral; 6];
        for (direction, color) in FACE_COLORS {
            if direction.axis().component(cell) == direction.sign() {
                colors[direction.index()] = color;
            }
        }
        Self { colors }
    }

    #[inline]
    pub fn color(&self, local: Direction) -> Color {
        self.colors[local.index()]
    }

    /// Local directions that carry a real color.
    pub fn painted(&self) -> impl Iterator<Item = (Direction, Color)> + '_ {
        Direction::ALL
            .into_iter()
            .map(|local| (local, self.color(local)))
            .filter(|&(_, color)| color != Color::Neutral)
    }
}

/// Net rigid rotation of a piece, stored as the world image of each local axis.
///
/// Only the 24 proper rotations of the cube are reachable, since every update
/// is a quarter turn about a cardinal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    x: Direction,
    y: Direction,
    z: Direction,
}

impl Orientation {
    pub const IDENTITY: Self = Self {
        x: Direction::Right,
        y: Direction::Up,
        z: Direction::Forward,
    };

    /// Maps a local direction to the world direction it currently points at.
    pub fn apply(&self, local: Direction) -> Direction {
        let image = match local.axis() {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        };
        if local.sign() > 0 {
            image
        } else {
            image.opposite()
        }
    }

    /// Composes `quarters` positive quarter turns about `axis` after this rotation.
    pub fn rotated(self, axis: Axis, quarters: usize) -> Self {
        Self {
            x: self.x.rotated(axis, quarters),
            y: self.y.rotated(axis, quarters),
            z: self.z.rotated(axis, quarters),
        }
    }
}

/// Stable identity of a piece: the index of the cell it was built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification by the number of non-zero position components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Interior,
    Center,
    Edge,
    Corner,
}

/// One of the 27 unit cubes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    coloring: PieceColoring,
    position: Coord,
    orientation: Orientation,
}

impl Piece {
    pub(crate) fn new(id: PieceId, cell: Coord) -> Self {
        Self {
            id,
            coloring: PieceColoring::for_cell(cell),
            position: cell,
            orientation: Orientation::IDENTITY,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn coloring(&self) -> &PieceColoring {
        &self.coloring
    }

    pub fn kind(&self) -> PieceKind {
        let (x, y, z) = self.position;
        match x.abs() + y.abs() + z.abs() {
            0 => PieceKind::Interior,
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            _ => PieceKind::Corner,
        }
    }

    pub fn is_center(&self) -> bool {
        self.kind() == PieceKind::Center
    }

    pub fn is_edge(&self) -> bool {
        self.kind() == PieceKind::Edge
    }

    pub fn is_corner(&self) -> bool {
        self.kind() == PieceKind::Corner
    }

    /// Fails with `WrongKind` unless this piece is of the `expected` class.
    pub fn expect_kind(&self, expected: PieceKind) -> Result<&Self, CubeError> {
        let kind = self.kind();
        if kind == expected {
            Ok(self)
        } else {
            Err(CubeError::WrongKind {
                piece: self.id,
                kind,
                expected,
            })
        }
    }

    /// World direction -> color for every painted face.
    ///
    /// Has one entry per visible face: 1 for a center, 2 for an edge, 3 for a corner.
    pub fn current_faces(&self) -> FxHashMap<Direction, Color> {
        self.coloring
            .painted()
            .map(|(local, color)| (self.orientation.apply(local), color))
            .collect()
    }

    /// Painted faces as (world direction, color), ordered by direction.
    pub fn faces(&self) -> Vec<(Direction, Color)> {
        let mut faces: Vec<_> = self
            .coloring
            .painted()
            .map(|(local, color)| (self.orientation.apply(local), color))
            .collect();
        faces.sort();
        faces
    }

    /// Color shown towards `world`, if that face is painted.
    pub fn color_facing(&self, world: Direction) -> Option<Color> {
        self.coloring
            .painted()
            .find(|&(local, _)| self.orientation.apply(local) == world)
            .map(|(_, color)| color)
    }

    /// World direction currently showing `color`.
    pub fn facing_of(&self, color: Color) -> Result<Direction, CubeError> {
        self.coloring
            .painted()
            .find(|&(_, painted)| painted == color)
            .map(|(local, _)| self.orientation.apply(local))
            .ok_or(CubeError::MissingColor {
                piece: self.id,
                color,
            })
    }

    pub fn shows(&self, color: Color) -> bool {
        self.coloring.painted().any(|(_, painted)| painted == color)
    }

    /// The slice along each axis this piece currently belongs to.
    pub fn slices(&self) -> [Slice; 3] {
        Axis::ALL.map(|axis| Slice::new(axis, axis.component(self.position)))
    }

    /// Moves the piece to `cell` and composes a turn about `axis` into its orientation.
    pub(crate) fn turn(&mut self, cell: Coord, axis: Axis, quarters: usize) {
        self.position = cell;
        self.orientation = self.orientation.rotated(axis, quarters);
    }
}
