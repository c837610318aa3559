//! One handler per stage, each computing the next turn sequence.
//!
//! Handlers only read the cube. Turn amounts are derived from slice geometry
//! (`rotation_degrees_between`) rather than written out, so the same code
//! covers every mirror image and facing of a case.

use log::trace;

use super::frame::{Face, Frame, ANGLED, A_PERM, LINE, SUNE, U_PERM};
use super::select::{
    cell_of, face_showing, home_cell, primary_up_first, primary_up_last, select, settled,
};
use crate::error::CubeError;
use crate::geometry::{Axis, Coord, Direction};
use crate::grid::Cube;
use crate::pieces::{Color, Piece, PieceId, OPPOSITE, PRIMARY};
use crate::slice::{trace as trace_cell, Slice, Turn};

const UP: Direction = Direction::Up;
const DOWN: Direction = Direction::Down;

/// Top slice amounts tried when aligning the last layer, in order.
const AUF: [i32; 4] = [0, 90, -90, 180];

/// A top-layer piece's current cell and the cell it belongs in.
type Placement = (Coord, Coord);

/// Output of one handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Step {
    pub turns: Vec<Turn>,
    /// Piece the step works on.
    pub target: Option<PieceId>,
    /// Facing an algorithm was applied from.
    pub facing: Option<Direction>,
    /// Keep working on `target` next step.
    pub carry: bool,
}

impl Step {
    fn on_piece(piece: &Piece, turns: Vec<Turn>) -> Self {
        Self {
            turns,
            target: Some(piece.id()),
            ..Self::default()
        }
    }

    fn carried(mut self) -> Self {
        self.carry = true;
        self
    }

    fn from_frame(frame: Frame, algorithm: &[(Face, i32)]) -> Self {
        Self {
            turns: frame.turns(algorithm),
            facing: Some(frame.front()),
            ..Self::default()
        }
    }
}

/// Degrees about `face`'s axis carrying the `from` side of that face onto `to`.
fn face_degrees(face: Direction, from: Direction, to: Direction) -> Result<i32, CubeError> {
    Slice::facing(face).rotation_degrees_between(from, to)
}

fn up_degrees(from: Direction, to: Direction) -> Result<i32, CubeError> {
    face_degrees(UP, from, to)
}

/// The piece's horizontal directions: the x side first, then the z side.
fn sides(piece: &Piece) -> Vec<Direction> {
    piece
        .slices()
        .into_iter()
        .filter(|slice| slice.axis() != Axis::Y && slice.layer() != 0)
        .map(Slice::world_direction)
        .collect()
}

fn other_side(sides: &[Direction], side: Direction) -> Result<Direction, CubeError> {
    let mut others = sides.iter().copied().filter(|&candidate| candidate != side);
    match (others.next(), others.count()) {
        (Some(other), 0) => Ok(other),
        (first, rest) => Err(CubeError::NotUnique {
            what: "other side",
            found: usize::from(first.is_some()) + rest,
        }),
    }
}

/// The single non-primary color of an edge that carries the primary color.
fn partner_color(piece: &Piece) -> Result<Color, CubeError> {
    let mut others = piece
        .coloring()
        .painted()
        .map(|(_, color)| color)
        .filter(|&color| color != PRIMARY);
    match (others.next(), others.count()) {
        (Some(color), 0) => Ok(color),
        (first, rest) => Err(CubeError::NotUnique {
            what: "partner color",
            found: usize::from(first.is_some()) + rest,
        }),
    }
}

pub(crate) fn white_center(cube: &Cube) -> Result<Step, CubeError> {
    let mut centers = Direction::ALL
        .into_iter()
        .map(|face| cube.center(face))
        .filter(|piece| piece.shows(PRIMARY));
    let piece = match (centers.next(), centers.count()) {
        (Some(piece), 0) => piece,
        (first, rest) => {
            return Err(CubeError::NotUnique {
                what: "primary center",
                found: usize::from(first.is_some()) + rest,
            })
        }
    };

    let turns = match piece.facing_of(PRIMARY)? {
        DOWN => Vec::new(),
        UP => vec![Turn::new(Slice::new(Axis::X, 0), 180)],
        side => {
            let axis = if side.axis() == Axis::Z { Axis::X } else { Axis::Z };
            let slice = Slice::new(axis, 0);
            vec![Turn::new(slice, slice.rotation_degrees_between(side, DOWN)?)]
        }
    };
    Ok(Step::on_piece(piece, turns))
}

pub(crate) fn white_cross(cube: &Cube, pending: Option<PieceId>) -> Result<Step, CubeError> {
    let mut candidates = Vec::new();
    for piece in cube.pieces().iter().filter(|piece| piece.is_edge() && piece.shows(PRIMARY)) {
        if !settled(cube, piece, -1)? {
            candidates.push(piece);
        }
    }
    let Some(piece) = select(cube, pending, candidates.into_iter(), primary_up_first) else {
        return Ok(Step::default());
    };

    let white = piece.facing_of(PRIMARY)?;
    let other_color = partner_color(piece)?;
    let other = piece.facing_of(other_color)?;
    let slot = face_showing(cube, other_color)?;

    if white.axis() == Axis::Y {
        if other == slot {
            let turns = if white == DOWN {
                Vec::new()
            } else {
                vec![Turn::on(other, 180)]
            };
            return Ok(Step::on_piece(piece, turns));
        }
        if white == DOWN {
            return Ok(Step::on_piece(piece, vec![Turn::on(other, 180)]));
        }
        let turns = vec![Turn::on(UP, up_degrees(other, slot)?)];
        return Ok(Step::on_piece(piece, turns).carried());
    }

    let turns = match piece.position().1 {
        -1 => vec![Turn::on(white, 180)],
        1 => {
            // bring the primary face up through the side slice, park it, restore
            let side = UP.rotated(white.axis(), 1);
            let side_degrees = face_degrees(side, white, UP)?;
            let park = up_degrees(side, -white)?;
            vec![
                Turn::on(white, 90),
                Turn::on(side, side_degrees),
                Turn::on(UP, park),
                Turn::on(side, -side_degrees),
                Turn::on(white, -90),
            ]
        }
        _ => {
            let lift = face_degrees(other, white, UP)?;
            vec![Turn::on(other, lift), Turn::on(UP, 90), Turn::on(other, -lift)]
        }
    };
    Ok(Step::on_piece(piece, turns))
}

pub(crate) fn white_corners(cube: &Cube, pending: Option<PieceId>) -> Result<Step, CubeError> {
    let mut candidates = Vec::new();
    for piece in cube.pieces().iter().filter(|piece| piece.is_corner() && piece.shows(PRIMARY)) {
        if !settled(cube, piece, -1)? {
            candidates.push(piece);
        }
    }
    let Some(piece) = select(cube, pending, candidates.into_iter(), primary_up_last) else {
        return Ok(Step::default());
    };

    let white = piece.facing_of(PRIMARY)?;
    let sides = sides(piece);
    let first = sides.first().copied().ok_or(CubeError::NotUnique {
        what: "corner side",
        found: 0,
    })?;

    if piece.position().1 == -1 {
        if settled(cube, piece, -1)? {
            return Ok(Step::on_piece(piece, Vec::new()));
        }
        // lift it into the top layer through the face showing the primary color, if any
        let turning = if white == DOWN { first } else { white };
        let other = other_side(&sides, turning)?;
        let side_degrees = face_degrees(turning, other, UP)?;
        let turns = vec![
            Turn::on(turning, side_degrees),
            Turn::on(UP, up_degrees(turning, other)?),
            Turn::on(turning, -side_degrees),
        ];
        return Ok(Step::on_piece(piece, turns));
    }

    let (x, _, z) = home_cell(cube, piece)?;
    let above_slot = cube.piece_at((x, 1, z));
    if above_slot.id() != piece.id() {
        let degrees = Slice::facing(UP).rotation_degrees(piece, above_slot)?;
        trace!("aligning corner {} over its slot", piece.id());
        return Ok(Step::on_piece(piece, vec![Turn::on(UP, degrees)]).carried());
    }

    if white == UP {
        let second = other_side(&sides, first)?;
        let side_degrees = face_degrees(first, second, UP)?;
        let spin = up_degrees(first, second)?;
        let turns = vec![
            Turn::on(first, side_degrees),
            Turn::on(UP, 2 * spin),
            Turn::on(first, -side_degrees),
            Turn::on(UP, -spin),
        ];
        return Ok(Step::on_piece(piece, turns).carried());
    }

    let other = other_side(&sides, white)?;
    let side_degrees = face_degrees(white, other, UP)?;
    let turns = vec![
        Turn::on(white, side_degrees),
        Turn::on(UP, up_degrees(white, other)?),
        Turn::on(white, -side_degrees),
    ];
    Ok(Step::on_piece(piece, turns))
}

/// Moves the edge at `front` + up into the middle slot between `front` and
/// `toward`, whatever occupies that slot going up in exchange.
///
/// From the front, with `toward` on the right, this is `U R U' R' U' F' U F`.
pub fn insertion(front: Direction, toward: Direction) -> Result<Vec<Turn>, CubeError> {
    let spin = up_degrees(front, -toward)?;
    let side = face_degrees(toward, front, UP)?;
    let tilt = face_degrees(front, UP, -toward)?;
    Ok(vec![
        Turn::on(UP, spin),
        Turn::on(toward, side),
        Turn::on(UP, -spin),
        Turn::on(toward, -side),
        Turn::on(UP, -spin),
        Turn::on(front, tilt),
        Turn::on(UP, spin),
        Turn::on(front, -tilt),
    ])
}

pub(crate) fn middle_edges(cube: &Cube, pending: Option<PieceId>) -> Result<Step, CubeError> {
    let mut candidates = Vec::new();
    for piece in cube
        .pieces()
        .iter()
        .filter(|piece| piece.is_edge() && !piece.shows(PRIMARY) && !piece.shows(OPPOSITE))
    {
        if !settled(cube, piece, 0)? {
            candidates.push(piece);
        }
    }
    let Some(piece) = select(cube, pending, candidates.into_iter(), |_| 0) else {
        return Ok(Step::default());
    };

    let faces = piece.faces();
    if piece.position().1 == 0 {
        // wrong slot or flipped: swap it out for whatever is above
        let &[(front, _), (toward, _)] = faces.as_slice() else {
            return Err(CubeError::NotUnique {
                what: "edge face pair",
                found: faces.len(),
            });
        };
        return Ok(Step::on_piece(piece, insertion(front, toward)?));
    }

    let (facing, side_color) = faces
        .iter()
        .copied()
        .find(|&(direction, _)| direction != UP)
        .ok_or(CubeError::NotUnique {
            what: "side face",
            found: 0,
        })?;
    let up_color = piece.color_facing(UP).ok_or(CubeError::NotUnique {
        what: "up face",
        found: 0,
    })?;
    let slot = face_showing(cube, side_color)?;
    if facing != slot {
        let turns = vec![Turn::on(UP, up_degrees(facing, slot)?)];
        return Ok(Step::on_piece(piece, turns).carried());
    }
    let toward = face_showing(cube, up_color)?;
    Ok(Step::on_piece(piece, insertion(facing, toward)?))
}

fn shows_opposite_up(cube: &Cube, directions: &[Direction]) -> bool {
    let mut cell = cell_of(directions);
    cell.1 += 1;
    cube.piece_at(cell).color_facing(UP) == Some(OPPOSITE)
}

pub(crate) fn yellow_cross(cube: &Cube) -> Result<Step, CubeError> {
    let oriented = |side: Direction| shows_opposite_up(cube, &[side]);
    let count = Direction::SIDES.into_iter().filter(|&side| oriented(side)).count();
    if count == 4 {
        return Ok(Step::default());
    }
    if count == 0 {
        return Ok(Step::from_frame(Frame::new(Direction::Forward), ANGLED));
    }
    for front in Direction::SIDES {
        let frame = Frame::new(front);
        if !oriented(frame.left()) {
            continue;
        }
        if oriented(frame.back()) {
            return Ok(Step::from_frame(frame, ANGLED));
        }
        if oriented(frame.right()) {
            return Ok(Step::from_frame(frame, LINE));
        }
    }
    Err(CubeError::NoFacing("yellow cross"))
}

pub(crate) fn yellow_corners(cube: &Cube) -> Result<Step, CubeError> {
    let top = Slice::facing(UP);
    let count = top
        .corners(cube)
        .filter(|piece| piece.color_facing(UP) == Some(OPPOSITE))
        .count();
    if count == 4 {
        return Ok(Step::default());
    }
    for front in Direction::SIDES {
        let frame = Frame::new(front);
        let wanted = match count {
            0 => frame.left(),
            1 => UP,
            _ => frame.front(),
        };
        let corner = cube.piece_at(cell_of(&[frame.front(), frame.left(), UP]));
        if corner.facing_of(OPPOSITE)? == wanted {
            let step = Step::from_frame(frame, SUNE);
            return Ok(Step {
                target: Some(corner.id()),
                ..step
            });
        }
    }
    Err(CubeError::NoFacing("yellow corners"))
}

/// How many of `pieces` land home after turning the top by `degrees`.
fn home_after(pieces: &[Placement], degrees: i32) -> Result<usize, CubeError> {
    let turn = Turn::on(UP, degrees);
    let mut count = 0;
    for &(position, home) in pieces {
        if turn.moves(position)? == home {
            count += 1;
        }
    }
    Ok(count)
}

fn placements<'a>(
    cube: &Cube,
    pieces: impl Iterator<Item = &'a Piece>,
) -> Result<Vec<Placement>, CubeError> {
    pieces
        .map(|piece| -> Result<Placement, CubeError> {
            Ok((piece.position(), home_cell(cube, piece)?))
        })
        .collect()
}

pub(crate) fn top_corners(cube: &Cube) -> Result<Step, CubeError> {
    let top = Slice::facing(UP);
    let homes = placements(cube, top.corners(cube))?;

    for degrees in AUF {
        if home_after(&homes, degrees)? == 4 {
            let turns = if degrees == 0 {
                Vec::new()
            } else {
                vec![Turn::on(UP, degrees)]
            };
            return Ok(Step {
                turns,
                ..Step::default()
            });
        }
    }
    for degrees in AUF {
        if home_after(&homes, degrees)? >= 2 {
            if degrees != 0 {
                return Ok(Step {
                    turns: vec![Turn::on(UP, degrees)],
                    ..Step::default()
                });
            }
            break;
        }
    }

    // two home, the other two swapped: find where the corner cycle finishes the job
    for front in Direction::SIDES {
        let frame = Frame::new(front);
        let turns = frame.turns(A_PERM);
        let mut traced = Vec::with_capacity(homes.len());
        for &(position, home) in &homes {
            traced.push((trace_cell(position, &turns)?, home));
        }
        for degrees in AUF {
            if home_after(&traced, degrees)? == 4 {
                return Ok(Step::from_frame(frame, A_PERM));
            }
        }
    }
    Ok(Step::from_frame(Frame::new(Direction::Forward), A_PERM))
}

pub(crate) fn top_edges(cube: &Cube) -> Result<Step, CubeError> {
    let top = Slice::facing(UP);
    let homes = placements(cube, top.edges(cube))?;

    for front in Direction::SIDES {
        let frame = Frame::new(front);
        let turns = frame.turns(U_PERM);
        let mut solved = true;
        for &(position, home) in &homes {
            solved &= trace_cell(position, &turns)? == home;
        }
        if solved {
            return Ok(Step::from_frame(frame, U_PERM));
        }
    }
    for front in Direction::SIDES {
        let back = cube.piece_at(cell_of(&[-front, UP]));
        if back.position() == home_cell(cube, back)? {
            return Ok(Step::from_frame(Frame::new(front), U_PERM));
        }
    }
    Ok(Step::from_frame(Frame::new(Direction::Forward), U_PERM))
}
