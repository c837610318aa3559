//! Failure taxonomy for cube queries and solving.
//!
//! Every variant is a programmer-facing invariant failure: the solving method
//! assumes a geometrically valid cube at each call boundary, so callers are
//! expected to surface these rather than retry.

use thiserror::Error;

use crate::geometry::Coord;
use crate::pieces::{Color, PieceId, PieceKind};
use crate::slice::Slice;
use crate::solver::Stage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    /// A query expected exactly one match.
    #[error("expected exactly one {what}, found {found}")]
    NotUnique { what: &'static str, found: usize },

    /// No quarter turn of the slice maps one cell onto the other.
    #[error("no quarter turn of {slice} moves {from:?} onto {to:?}")]
    NoRotation { slice: Slice, from: Coord, to: Coord },

    /// A facing search tried all four sides without a match.
    #[error("no facing satisfies the {0} pattern")]
    NoFacing(&'static str),

    #[error("piece {piece} is {kind:?}, expected {expected:?}")]
    WrongKind {
        piece: PieceId,
        kind: PieceKind,
        expected: PieceKind,
    },

    #[error("piece {piece} does not show {color:?}")]
    MissingColor { piece: PieceId, color: Color },

    #[error("turn of {degrees} degrees is not a quarter turn multiple in -180..=180")]
    UnalignedTurn { degrees: i32 },

    #[error("slice layer {0} is outside -1..=1")]
    LayerOutOfRange(i32),

    #[error("gave up after {steps} solve steps at stage {stage:?}")]
    StepLimit { steps: usize, stage: Stage },
}
