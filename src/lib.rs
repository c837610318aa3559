//! Cube Solver Library
//!
//! Models a 3x3x3 twisty puzzle as 27 pieces with tracked positions and
//! orientations, and solves it with a fixed nine-stage layer-by-layer method.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod scramble;
pub mod session;
pub mod slice;
pub mod solver;

pub use error::CubeError;
pub use grid::{Cube, RotationEngine};
pub use slice::{Slice, Turn};
pub use solver::{Continuation, Solver, Stage};
