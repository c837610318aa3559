//! Slices of the cube and the turn commands that rotate them.
//!
//! A slice is never stored. It names an (axis, layer) pair and every query
//! reads the current cell index of the [`Cube`], so it can't go stale after a
//! turn.

use std::fmt;

use crate::error::CubeError;
use crate::geometry::{quarter_turn_between, quarters_of, rotate_coord, Axis, Coord, Direction};
use crate::grid::{idx_to_coord, Cube, GRID_SIZE};
use crate::pieces::{Piece, PieceId, PieceKind};

/// The nine cells sharing one coordinate value along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    axis: Axis,
    layer: i32,
}

impl Slice {
    /// Layers outside `-1..=1` are rejected when a turn on them is applied.
    pub const fn new(axis: Axis, layer: i32) -> Self {
        Self { axis, layer }
    }

    /// The outer face slice on the `face` side of the cube.
    pub const fn facing(face: Direction) -> Self {
        Self::new(face.axis(), face.sign())
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        self.axis
    }

    #[inline]
    pub const fn layer(self) -> i32 {
        self.layer
    }

    pub(crate) fn check_layer(self) -> Result<(), CubeError> {
        if (-1..=1).contains(&self.layer) {
            Ok(())
        } else {
            Err(CubeError::LayerOutOfRange(self.layer))
        }
    }

    #[inline]
    pub fn contains(self, cell: Coord) -> bool {
        self.axis.component(cell) == self.layer
    }

    /// Cells of the slice in grid index order.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE)
            .map(idx_to_coord)
            .filter(move |&cell| self.contains(cell))
    }

    /// The cell on the slice's axis: a face center, or the interior for layer 0.
    pub fn center_cell(self) -> Coord {
        match self.axis {
            Axis::X => (self.layer, 0, 0),
            Axis::Y => (0, self.layer, 0),
            Axis::Z => (0, 0, self.layer),
        }
    }

    /// Outward direction of the slice.
    ///
    /// A middle slice has no outside, so it reports the positive end of its axis.
    pub fn world_direction(self) -> Direction {
        match Direction::along(self.axis, self.layer) {
            Some(direction) => direction,
            None => match self.axis {
                Axis::X => Direction::Right,
                Axis::Y => Direction::Up,
                Axis::Z => Direction::Forward,
            },
        }
    }

    pub fn members(self, cube: &Cube) -> impl Iterator<Item = &Piece> {
        self.cells().map(move |cell| cube.piece_at(cell))
    }

    /// The single center piece of the slice.
    ///
    /// A middle slice holds four centers and fails with `NotUnique`.
    pub fn center(self, cube: &Cube) -> Result<&Piece, CubeError> {
        let mut centers = self.members(cube).filter(|piece| piece.is_center());
        match (centers.next(), centers.count()) {
            (Some(center), 0) => Ok(center),
            (first, rest) => Err(CubeError::NotUnique {
                what: "slice center",
                found: usize::from(first.is_some()) + rest,
            }),
        }
    }

    pub fn edges(self, cube: &Cube) -> impl Iterator<Item = &Piece> {
        self.members(cube).filter(|piece| piece.kind() == PieceKind::Edge)
    }

    pub fn corners(self, cube: &Cube) -> impl Iterator<Item = &Piece> {
        self.members(cube).filter(|piece| piece.kind() == PieceKind::Corner)
    }

    /// Smallest signed turn of this slice that carries `from`'s cell onto `to`'s.
    pub fn rotation_degrees(self, from: &Piece, to: &Piece) -> Result<i32, CubeError> {
        self.degrees_between_cells(from.position(), to.position())
    }

    /// Like [`Slice::rotation_degrees`], for the cells one step from the slice
    /// center towards `from` and `to`.
    pub fn rotation_degrees_between(
        self,
        from: Direction,
        to: Direction,
    ) -> Result<i32, CubeError> {
        let center = self.center_cell();
        let step = |direction: Direction| {
            let (dx, dy, dz) = direction.to_coord();
            (center.0 + dx, center.1 + dy, center.2 + dz)
        };
        self.degrees_between_cells(step(from), step(to))
    }

    fn degrees_between_cells(self, from: Coord, to: Coord) -> Result<i32, CubeError> {
        let rotation = if self.contains(from) && self.contains(to) {
            quarter_turn_between(self.axis, from, to)
        } else {
            None
        };
        rotation.ok_or(CubeError::NoRotation {
            slice: self,
            from,
            to,
        })
    }

    /// Pieces among `ids` that currently sit in this slice, in `ids` order.
    pub fn overlap<'a>(self, cube: &'a Cube, ids: &[PieceId]) -> Vec<&'a Piece> {
        ids.iter()
            .map(|&id| cube.piece(id))
            .filter(|piece| self.contains(piece.position()))
            .collect()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layer == 0 {
            write!(f, "{}0", self.axis)
        } else {
            write!(f, "{}{:+}", self.axis, self.layer)
        }
    }
}

/// Rotate `slice` by `degrees` about its axis (right-hand rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub slice: Slice,
    pub degrees: i32,
}

impl Turn {
    pub const fn new(slice: Slice, degrees: i32) -> Self {
        Self { slice, degrees }
    }

    /// Turns the outer slice on the `face` side by `degrees` about the world axis.
    pub const fn on(face: Direction, degrees: i32) -> Self {
        Self::new(Slice::facing(face), degrees)
    }

    /// Turns the `face` slice clockwise as seen from outside that face.
    ///
    /// Negative `quarters` turn counter-clockwise; half turns are reported as +180.
    pub fn clockwise(face: Direction, quarters: i32) -> Self {
        let degrees = (-90 * quarters * face.sign()).rem_euclid(360);
        let degrees = if degrees > 180 { degrees - 360 } else { degrees };
        Self::on(face, degrees)
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.slice, -self.degrees)
    }

    /// Positive quarter turns equivalent to this turn.
    ///
    /// Fails unless the turn is a whole multiple of 90 in `-180..=180` on a
    /// layer in `-1..=1`.
    pub fn quarters(self) -> Result<usize, CubeError> {
        self.slice.check_layer()?;
        if !(-180..=180).contains(&self.degrees) {
            return Err(CubeError::UnalignedTurn {
                degrees: self.degrees,
            });
        }
        quarters_of(self.degrees).ok_or(CubeError::UnalignedTurn {
            degrees: self.degrees,
        })
    }

    /// Where `cell` ends up after this turn.
    pub fn moves(self, cell: Coord) -> Result<Coord, CubeError> {
        let quarters = self.quarters()?;
        if self.slice.contains(cell) {
            Ok(rotate_coord(cell, self.slice.axis, quarters))
        } else {
            Ok(cell)
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.slice, self.degrees)
    }
}

/// Follows `cell` through `turns` without touching any cube.
pub fn trace(cell: Coord, turns: &[Turn]) -> Result<Coord, CubeError> {
    turns.iter().try_fold(cell, |cell, turn| turn.moves(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RotationEngine;

    #[test]
    fn test_face_slice_has_one_center() {
        let cube = Cube::new();
        for face in Direction::ALL {
            let slice = Slice::facing(face);
            let center = slice.center(&cube).expect("face slice center");
            assert_eq!(center.position(), face.to_coord());
            assert_eq!(slice.members(&cube).count(), 9);
            assert_eq!(slice.edges(&cube).count(), 4);
            assert_eq!(slice.corners(&cube).count(), 4);
            assert_eq!(slice.world_direction(), face);
        }
    }

    #[test]
    fn test_middle_slice_center_is_not_unique() {
        let cube = Cube::new();
        let middle = Slice::new(Axis::Y, 0);
        assert_eq!(
            middle.center(&cube),
            Err(CubeError::NotUnique {
                what: "slice center",
                found: 4
            })
        );
        assert_eq!(middle.world_direction(), Direction::Up);
        assert_eq!(middle.edges(&cube).count(), 4);
    }

    #[test]
    fn test_rotation_degrees_between_directions() {
        let up = Slice::facing(Direction::Up);
        // +90 about Y carries forward onto right
        assert_eq!(
            up.rotation_degrees_between(Direction::Forward, Direction::Right),
            Ok(90)
        );
        assert_eq!(
            up.rotation_degrees_between(Direction::Right, Direction::Forward),
            Ok(-90)
        );
        assert_eq!(
            up.rotation_degrees_between(Direction::Left, Direction::Right),
            Ok(180)
        );
        assert!(up
            .rotation_degrees_between(Direction::Up, Direction::Right)
            .is_err());
    }

    #[test]
    fn test_rotation_degrees_between_pieces() {
        let cube = Cube::new();
        let top = Slice::facing(Direction::Up);
        let from = cube.piece_at((1, 1, 1));
        let to = cube.piece_at((-1, 1, 1));
        let degrees = top.rotation_degrees(from, to).expect("same orbit");
        assert_eq!(Turn::new(top, degrees).moves((1, 1, 1)), Ok((-1, 1, 1)));

        let bottom = cube.piece_at((1, -1, 1));
        assert!(matches!(
            top.rotation_degrees(from, bottom),
            Err(CubeError::NoRotation { .. })
        ));
    }

    #[test]
    fn test_overlap_keeps_members_only() {
        let mut cube = Cube::new();
        let ids = [cube.piece_at((1, 1, 1)).id(), cube.piece_at((1, -1, 1)).id()];
        let top = Slice::facing(Direction::Up);
        assert_eq!(top.overlap(&cube, &ids).len(), 1);

        cube.apply(Turn::on(Direction::Right, 180)).expect("valid turn");
        let overlap = top.overlap(&cube, &ids);
        assert_eq!(overlap.len(), 1);
        assert_eq!(overlap[0].id(), ids[1]);
    }

    #[test]
    fn test_clockwise_depends_on_face_sign() {
        assert_eq!(Turn::clockwise(Direction::Up, 1).degrees, -90);
        assert_eq!(Turn::clockwise(Direction::Down, 1).degrees, 90);
        assert_eq!(Turn::clockwise(Direction::Right, -1).degrees, 90);
        assert_eq!(Turn::clockwise(Direction::Back, 2).degrees, 180);
        assert_eq!(Turn::clockwise(Direction::Forward, 2).degrees, 180);
    }

    #[test]
    fn test_quarters_rejects_malformed_turns() {
        let up = Slice::facing(Direction::Up);
        assert_eq!(Turn::new(up, -90).quarters(), Ok(3));
        assert_eq!(Turn::new(up, -180).quarters(), Ok(2));
        assert_eq!(
            Turn::new(up, 45).quarters(),
            Err(CubeError::UnalignedTurn { degrees: 45 })
        );
        assert_eq!(
            Turn::new(up, 270).quarters(),
            Err(CubeError::UnalignedTurn { degrees: 270 })
        );
        assert_eq!(
            Turn::new(Slice::new(Axis::X, 2), 90).quarters(),
            Err(CubeError::LayerOutOfRange(2))
        );
    }

    #[test]
    fn test_trace_matches_applied_turns() {
        let turns = [
            Turn::clockwise(Direction::Right, 1),
            Turn::clockwise(Direction::Up, 1),
            Turn::clockwise(Direction::Forward, -1),
        ];
        let mut cube = Cube::new();
        let id = cube.piece_at((1, 1, 1)).id();
        cube.apply_all(&turns).expect("valid turns");
        assert_eq!(trace((1, 1, 1), &turns), Ok(cube.piece(id).position()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Turn::new(Slice::new(Axis::X, 0), 180).to_string(), "X0 +180");
        assert_eq!(Turn::on(Direction::Up, -90).to_string(), "Y+1 -90");
        assert_eq!(Turn::on(Direction::Back, 90).to_string(), "Z-1 +90");
    }
}
