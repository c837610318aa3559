//! Fixed last-layer algorithms written relative to a viewing frame.
//!
//! An algorithm is a list of (face, clockwise quarters) in the usual face-turn
//! notation. Picking a front direction resolves every face name to a world
//! direction, which turns the algorithm into concrete [`Turn`]s.

use crate::geometry::{Axis, Direction};
use crate::slice::Turn;

/// Face names relative to a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

/// A way of holding the cube: `front` faces the viewer, up stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    front: Direction,
}

impl Frame {
    pub const fn new(front: Direction) -> Self {
        Self { front }
    }

    pub const fn front(self) -> Direction {
        self.front
    }

    pub fn right(self) -> Direction {
        self.front.rotated(Axis::Y, 1)
    }

    pub fn left(self) -> Direction {
        self.right().opposite()
    }

    pub const fn back(self) -> Direction {
        self.front.opposite()
    }

    pub fn direction(self, face: Face) -> Direction {
        match face {
            Face::Front => self.front(),
            Face::Back => self.back(),
            Face::Left => self.left(),
            Face::Right => self.right(),
            Face::Up => Direction::Up,
            Face::Down => Direction::Down,
        }
    }

    /// Resolves `algorithm` to world turns for this frame.
    pub fn turns(self, algorithm: &[(Face, i32)]) -> Vec<Turn> {
        algorithm
            .iter()
            .map(|&(face, quarters)| Turn::clockwise(self.direction(face), quarters))
            .collect()
    }
}

use Face::{Back as B, Front as F, Right as R, Up as U};

/// `F U R U' R' F'`: orients two adjacent top edges sitting at back and left.
/// Also used from the dot case.
pub const ANGLED: &[(Face, i32)] = &[(F, 1), (U, 1), (R, 1), (U, -1), (R, -1), (F, -1)];

/// `F R U R' U' F'`: orients two opposite top edges sitting at left and right.
pub const LINE: &[(Face, i32)] = &[(F, 1), (R, 1), (U, 1), (R, -1), (U, -1), (F, -1)];

/// `R U R' U R U2 R'`
pub const SUNE: &[(Face, i32)] = &[
    (R, 1),
    (U, 1),
    (R, -1),
    (U, 1),
    (R, 1),
    (U, 2),
    (R, -1),
];

/// `R' F R' B2 R F' R' B2 R2`: keeps the front-left top corner and cycles
/// front-right -> back-left -> back-right -> front-right.
pub const A_PERM: &[(Face, i32)] = &[
    (R, -1),
    (F, 1),
    (R, -1),
    (B, 2),
    (R, 1),
    (F, -1),
    (R, -1),
    (B, 2),
    (R, 2),
];

/// `R U' R U R U R U' R' U' R2`: keeps the back top edge and cycles
/// front -> right -> left -> front.
pub const U_PERM: &[(Face, i32)] = &[
    (R, 1),
    (U, -1),
    (R, 1),
    (U, 1),
    (R, 1),
    (U, 1),
    (R, 1),
    (U, -1),
    (R, -1),
    (U, -1),
    (R, 2),
];
