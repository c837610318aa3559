//! Geometry queries behind the stage predicates and candidate selection.
//!
//! Nothing here is cached. Every answer is read off the live cube.

use std::cmp::Reverse;

use log::trace;

use super::Stage;
use crate::error::CubeError;
use crate::geometry::{offset, Axis, Coord, Direction};
use crate::grid::Cube;
use crate::pieces::{Color, Piece, PieceId, OPPOSITE, PRIMARY};
use crate::slice::Slice;

/// Color of the center piece on the `face` side.
pub(crate) fn center_color(cube: &Cube, face: Direction) -> Result<Color, CubeError> {
    cube.center(face)
        .color_facing(face)
        .ok_or(CubeError::NotUnique {
            what: "center color",
            found: 0,
        })
}

/// The face whose center shows `color`.
pub(crate) fn face_showing(cube: &Cube, color: Color) -> Result<Direction, CubeError> {
    let mut found = None;
    let mut count = 0;
    for face in Direction::ALL {
        if center_color(cube, face)? == color {
            found.get_or_insert(face);
            count += 1;
        }
    }
    match (found, count) {
        (Some(face), 1) => Ok(face),
        _ => Err(CubeError::NotUnique {
            what: "center showing a color",
            found: count,
        }),
    }
}

/// True when every visible face shows the color of the center facing the same way.
pub(crate) fn matches_centers(cube: &Cube, piece: &Piece) -> Result<bool, CubeError> {
    for (direction, color) in piece.faces() {
        if center_color(cube, direction)? != color {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The cell a piece belongs in: one step towards each center sharing one of its colors.
pub(crate) fn home_cell(cube: &Cube, piece: &Piece) -> Result<Coord, CubeError> {
    piece
        .coloring()
        .painted()
        .try_fold((0, 0, 0), |cell, (_, color)| {
            Ok(offset(cell, face_showing(cube, color)?.to_coord()))
        })
}

/// Sum of the unit vectors of `directions`.
pub(crate) fn cell_of(directions: &[Direction]) -> Coord {
    directions
        .iter()
        .fold((0, 0, 0), |cell, direction| offset(cell, direction.to_coord()))
}

/// Solved in a lower layer: sits in layer `y` and matches every adjacent center.
pub(crate) fn settled(cube: &Cube, piece: &Piece, y: i32) -> Result<bool, CubeError> {
    Ok(piece.position().1 == y && matches_centers(cube, piece)?)
}

fn all_of<'a>(
    pieces: impl Iterator<Item = &'a Piece>,
    mut predicate: impl FnMut(&Piece) -> Result<bool, CubeError>,
) -> Result<bool, CubeError> {
    for piece in pieces {
        if !predicate(piece)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether `stage`'s goal already holds on `cube`.
pub(crate) fn is_complete(cube: &Cube, stage: Stage) -> Result<bool, CubeError> {
    let bottom = Slice::facing(Direction::Down);
    let middle = Slice::new(Axis::Y, 0);
    let top = Slice::facing(Direction::Up);
    let shows_opposite_up = |piece: &Piece| -> Result<bool, CubeError> {
        Ok(piece.color_facing(Direction::Up) == Some(OPPOSITE))
    };
    let at_home = |piece: &Piece| -> Result<bool, CubeError> {
        Ok(piece.position() == home_cell(cube, piece)?)
    };

    match stage {
        Stage::WhiteCenter => Ok(center_color(cube, Direction::Down)? == PRIMARY),
        Stage::WhiteCross => all_of(bottom.edges(cube), |piece| matches_centers(cube, piece)),
        Stage::WhiteCorners => all_of(bottom.corners(cube), |piece| matches_centers(cube, piece)),
        Stage::MiddleEdges => all_of(middle.edges(cube), |piece| matches_centers(cube, piece)),
        Stage::YellowCross => all_of(top.edges(cube), shows_opposite_up),
        Stage::YellowCorners => all_of(top.corners(cube), shows_opposite_up),
        Stage::TopCorners => all_of(top.corners(cube), at_home),
        Stage::TopEdges => all_of(top.edges(cube), at_home),
        Stage::Solved => Ok(true),
    }
}

/// Rank among top-layer candidates: edges with the primary color up go first.
pub(crate) fn primary_up_first(piece: &Piece) -> u8 {
    u8::from(piece.color_facing(Direction::Up) != Some(PRIMARY))
}

/// Rank among top-layer candidates: corners with the primary color up go last.
pub(crate) fn primary_up_last(piece: &Piece) -> u8 {
    u8::from(piece.color_facing(Direction::Up) == Some(PRIMARY))
}

/// Picks the piece to work on.
///
/// A pending piece always wins. Otherwise the highest candidate is taken, with
/// `top_rank` breaking ties within the top layer, then lowest x, then lowest z.
/// Returns `None` when there is nothing left to place.
pub(crate) fn select<'a>(
    cube: &'a Cube,
    pending: Option<PieceId>,
    candidates: impl Iterator<Item = &'a Piece>,
    top_rank: impl Fn(&Piece) -> u8,
) -> Option<&'a Piece> {
    if let Some(id) = pending {
        trace!("continuing with pending piece {id}");
        return Some(cube.piece(id));
    }
    let chosen = candidates.min_by_key(|piece| {
        let (x, y, z) = piece.position();
        let rank = if y == 1 { top_rank(piece) } else { 0 };
        (Reverse(y), rank, x, z)
    })?;
    trace!("selected piece {} at {:?}", chosen.id(), chosen.position());
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RotationEngine;
    use crate::slice::Turn;

    #[test]
    fn test_fresh_cube_queries() {
        let cube = Cube::new();
        assert_eq!(center_color(&cube, Direction::Up), Ok(Color::White));
        assert_eq!(face_showing(&cube, Color::Blue), Ok(Direction::Back));
        for piece in cube.pieces() {
            assert_eq!(home_cell(&cube, piece), Ok(piece.position()));
            assert_eq!(matches_centers(&cube, piece), Ok(true));
        }
    }

    #[test]
    fn test_home_cell_follows_the_centers() {
        let mut cube = Cube::new();
        // the middle slice carries the centers and leaves the corners behind
        cube.apply(Turn::new(Slice::new(Axis::Y, 0), 90))
            .expect("valid turn");
        let corner = cube.piece_at((1, 1, 1));
        assert_ne!(home_cell(&cube, corner), Ok((1, 1, 1)));
        assert_eq!(matches_centers(&cube, corner), Ok(false));
    }

    #[test]
    fn test_select_orders_by_height_then_rank() {
        let cube = Cube::new();
        let edges = || cube.pieces().iter().filter(|piece| piece.is_edge());

        let first = select(&cube, None, edges(), |_| 0).expect("some edge");
        assert_eq!(first.position(), (-1, 1, 0));

        let ranked = select(&cube, None, edges(), |piece| {
            u8::from(piece.position() != (1, 1, 0))
        })
        .expect("some edge");
        assert_eq!(ranked.position(), (1, 1, 0));

        let pending = cube.piece_at((0, -1, 1)).id();
        let chosen = select(&cube, Some(pending), edges(), |_| 0).expect("pending");
        assert_eq!(chosen.id(), pending);

        assert!(select(&cube, None, std::iter::empty(), |_| 0).is_none());
    }

    #[test]
    fn test_stage_predicates_on_fresh_cube() {
        let cube = Cube::new();
        // white starts on top
        assert_eq!(is_complete(&cube, Stage::WhiteCenter), Ok(false));
        for stage in [Stage::WhiteCross, Stage::MiddleEdges, Stage::TopCorners, Stage::TopEdges] {
            assert_eq!(is_complete(&cube, stage), Ok(true), "{stage}");
        }
        assert_eq!(is_complete(&cube, Stage::YellowCross), Ok(false));
    }
}
