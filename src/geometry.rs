//! Axis-aligned directions and quarter-turn rotation utilities.
//!
//! Every legal move turns a slice by a multiple of 90 degrees about one of the
//! three cardinal axes, so a rotation is just a signed permutation of the
//! coordinates. No matrices or floating point are needed anywhere.

use std::fmt;
use std::ops::Neg;

/// A grid cell (or offset) with each component in `-1..=1`.
pub type Coord = (i32, i32, i32);

/// One of the three cardinal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component of `coord` along this axis.
    #[inline]
    pub const fn component(self, (x, y, z): Coord) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    /// Dense index for per-axis tables.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// One of the six axis-aligned unit vectors.
///
/// Used both for a piece's local face directions and for world directions.
/// `Forward` is +Z, so with up at +Y and right at +X the frame is right-handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
    Forward,
    Back,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Forward,
        Direction::Back,
    ];

    /// The four horizontal directions, in the order facings are searched.
    pub const SIDES: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn axis(self) -> Axis {
        match self {
            Direction::Right | Direction::Left => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Forward | Direction::Back => Axis::Z,
        }
    }

    /// +1 for the positive end of the axis, -1 for the negative end.
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Right | Direction::Up | Direction::Forward => 1,
            Direction::Left | Direction::Down | Direction::Back => -1,
        }
    }

    /// Builds the direction pointing along `axis` with the sign of `sign`.
    ///
    /// Returns `None` for a zero sign.
    pub const fn along(axis: Axis, sign: i32) -> Option<Direction> {
        match (axis, sign.signum()) {
            (Axis::X, 1) => Some(Direction::Right),
            (Axis::X, -1) => Some(Direction::Left),
            (Axis::Y, 1) => Some(Direction::Up),
            (Axis::Y, -1) => Some(Direction::Down),
            (Axis::Z, 1) => Some(Direction::Forward),
            (Axis::Z, -1) => Some(Direction::Back),
            _ => None,
        }
    }

    /// Rounds a unit-length coordinate back to its direction.
    pub fn from_coord(coord: Coord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.to_coord() == coord)
    }

    pub const fn to_coord(self) -> Coord {
        match self {
            Direction::Right => (1, 0, 0),
            Direction::Left => (-1, 0, 0),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
            Direction::Forward => (0, 0, 1),
            Direction::Back => (0, 0, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        !matches!(self.axis(), Axis::Y)
    }

    /// Dense index for per-direction arrays.
    pub const fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => 3,
            Direction::Forward => 4,
            Direction::Back => 5,
        }
    }

    /// Turns this direction by `quarters` positive quarter turns about `axis`.
    pub fn rotated(self, axis: Axis, quarters: usize) -> Direction {
        let (x, y, z) = rotate_coord(self.to_coord(), axis, quarters);
        match (x, y, z) {
            (1, 0, 0) => Direction::Right,
            (-1, 0, 0) => Direction::Left,
            (0, 1, 0) => Direction::Up,
            (0, -1, 0) => Direction::Down,
            (0, 0, 1) => Direction::Forward,
            _ => Direction::Back,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        self.opposite()
    }
}

/// Positive quarter turns (+90 degrees, right-hand rule) about X, Y and Z.
///
/// Ordering note: `grid::build_turn_table` applies the same formulas to the
/// 27 grid cells, so the two must stay in sync.
pub const QUARTER_TURNS: [fn(Coord) -> Coord; 3] = [
    |(x, y, z)| (x, -z, y), // about X: +Y -> +Z
    |(x, y, z)| (z, y, -x), // about Y: +Z -> +X
    |(x, y, z)| (-y, x, z), // about Z: +X -> +Y
];

/// Rotates `coord` by `quarters` positive quarter turns about `axis`.
pub fn rotate_coord(coord: Coord, axis: Axis, quarters: usize) -> Coord {
    let turn = QUARTER_TURNS[axis.index()];
    (0..quarters % 4).fold(coord, |acc, _| turn(acc))
}

/// Converts signed degrees into positive quarter turns.
///
/// Returns `None` unless `degrees` is a whole multiple of 90.
pub const fn quarters_of(degrees: i32) -> Option<usize> {
    if degrees % 90 != 0 {
        return None;
    }
    Some((degrees.rem_euclid(360) / 90) as usize)
}

/// Finds the smallest signed quarter turn about `axis` moving `from` onto `to`.
///
/// Candidates are tried in the order 0, 90, 180, 270 and a match at 270 is
/// reported as -90.
pub fn quarter_turn_between(axis: Axis, from: Coord, to: Coord) -> Option<i32> {
    (0..4)
        .find(|&quarters| rotate_coord(from, axis, quarters) == to)
        .map(|quarters| if quarters == 3 { -90 } else { quarters as i32 * 90 })
}

/// Component-wise sum of two coordinates.
#[inline]
pub const fn offset(a: Coord, b: Coord) -> Coord {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for axis in Axis::ALL {
            for direction in Direction::ALL {
                assert_eq!(direction.rotated(axis, 4), direction);
                assert_eq!(
                    rotate_coord((1, -1, 0), axis, 4),
                    (1, -1, 0),
                    "four turns about {axis} should restore the cell"
                );
            }
        }
    }

    #[test]
    fn test_quarter_turns_follow_right_hand_rule() {
        assert_eq!(Direction::Up.rotated(Axis::X, 1), Direction::Forward);
        assert_eq!(Direction::Forward.rotated(Axis::Y, 1), Direction::Right);
        assert_eq!(Direction::Right.rotated(Axis::Z, 1), Direction::Up);
    }

    #[test]
    fn test_rotation_keeps_the_axis_fixed() {
        for axis in Axis::ALL {
            for direction in Direction::ALL.into_iter().filter(|d| d.axis() == axis) {
                assert_eq!(direction.rotated(axis, 1), direction);
            }
        }
    }

    #[test]
    fn test_quarter_turn_between_prefers_minus_ninety() {
        let up = Direction::Up.to_coord();
        assert_eq!(quarter_turn_between(Axis::X, up, up), Some(0));
        assert_eq!(
            quarter_turn_between(Axis::X, up, Direction::Forward.to_coord()),
            Some(90)
        );
        assert_eq!(
            quarter_turn_between(Axis::X, up, Direction::Down.to_coord()),
            Some(180)
        );
        assert_eq!(
            quarter_turn_between(Axis::X, up, Direction::Back.to_coord()),
            Some(-90)
        );
        assert_eq!(
            quarter_turn_between(Axis::X, up, Direction::Right.to_coord()),
            None
        );
    }

    #[test]
    fn test_quarters_of_rejects_partial_turns() {
        assert_eq!(quarters_of(-90), Some(3));
        assert_eq!(quarters_of(180), Some(2));
        assert_eq!(quarters_of(-180), Some(2));
        assert_eq!(quarters_of(45), None);
    }

    #[test]
    fn test_direction_coord_roundtrip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_coord(direction.to_coord()), Some(direction));
            assert_eq!(-(-direction), direction);
            assert_eq!(
                Direction::along(direction.axis(), direction.sign()),
                Some(direction)
            );
        }
        assert_eq!(Direction::from_coord((1, 1, 0)), None);
    }
}
