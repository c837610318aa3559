//! Layer-by-layer solving state machine.
//!
//! The solver holds only the current [`Stage`] and an optional carried-over
//! piece. Everything else is re-read from the cube on each call:
//! [`Solver::check_state`] advances past every stage whose goal already holds,
//! and [`Solver::solve_step`] returns the next turns for the current stage.
//! The caller applies those turns and calls both again.

mod frame;
mod select;
mod stages;

use std::fmt;

use clap::ValueEnum;
use log::{debug, info};

use crate::error::CubeError;
use crate::geometry::Direction;
use crate::grid::Cube;
use crate::pieces::PieceId;
use crate::slice::Turn;

pub use frame::{Face, Frame, ANGLED, A_PERM, LINE, SUNE, U_PERM};
pub use stages::insertion;

use stages::Step;

/// Solving milestones, in the order they are reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Stage {
    /// Primary center on the down face.
    #[default]
    WhiteCenter,
    /// Four primary edges in the bottom layer, matching their side centers.
    WhiteCross,
    /// Four primary corners completing the bottom layer.
    WhiteCorners,
    /// The four edges of the middle layer.
    MiddleEdges,
    /// Opposite color up on every top edge.
    YellowCross,
    /// Opposite color up on every top corner.
    YellowCorners,
    /// Top corners in their home cells.
    TopCorners,
    /// Top edges in their home cells.
    TopEdges,
    Solved,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::WhiteCenter,
        Stage::WhiteCross,
        Stage::WhiteCorners,
        Stage::MiddleEdges,
        Stage::YellowCross,
        Stage::YellowCorners,
        Stage::TopCorners,
        Stage::TopEdges,
        Stage::Solved,
    ];

    /// The following stage. `Solved` is terminal.
    pub const fn next(self) -> Stage {
        match self {
            Stage::WhiteCenter => Stage::WhiteCross,
            Stage::WhiteCross => Stage::WhiteCorners,
            Stage::WhiteCorners => Stage::MiddleEdges,
            Stage::MiddleEdges => Stage::YellowCross,
            Stage::YellowCross => Stage::YellowCorners,
            Stage::YellowCorners => Stage::TopCorners,
            Stage::TopCorners => Stage::TopEdges,
            Stage::TopEdges | Stage::Solved => Stage::Solved,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::WhiteCenter => "white-center",
            Stage::WhiteCross => "white-cross",
            Stage::WhiteCorners => "white-corners",
            Stage::MiddleEdges => "middle-edges",
            Stage::YellowCross => "yellow-cross",
            Stage::YellowCorners => "yellow-corners",
            Stage::TopCorners => "top-corners",
            Stage::TopEdges => "top-edges",
            Stage::Solved => "solved",
        };
        f.write_str(name)
    }
}

/// Whether the next step must keep working on a piece chosen earlier.
///
/// Set when a step only moved the piece into position (for example, turning
/// the top slice over its slot) and the follow-up must not pick a different one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Continuation {
    #[default]
    Idle,
    AwaitingContinuation(PieceId),
}

impl Continuation {
    pub fn pending(self) -> Option<PieceId> {
        match self {
            Continuation::Idle => None,
            Continuation::AwaitingContinuation(id) => Some(id),
        }
    }
}

/// The nine-stage solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solver {
    stage: Stage,
    continuation: Continuation,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn continuation(&self) -> Continuation {
        self.continuation
    }

    /// Advances past every stage whose goal already holds on `cube`.
    ///
    /// Never moves backwards and is safe to call any number of times.
    pub fn check_state(&mut self, cube: &Cube) -> Result<Stage, CubeError> {
        while self.stage != Stage::Solved && select::is_complete(cube, self.stage)? {
            let next = self.stage.next();
            info!("{} complete, moving on to {}", self.stage, next);
            self.stage = next;
            self.continuation = Continuation::Idle;
        }
        Ok(self.stage)
    }

    /// Computes the next turns for the current stage.
    ///
    /// An empty result means the current piece needs no move. Call
    /// [`Solver::check_state`] before the next step either way.
    pub fn solve_step(&mut self, cube: &Cube) -> Result<Vec<Turn>, CubeError> {
        let step = self.plan(cube)?;
        self.continuation = match (step.carry, step.target) {
            (true, Some(id)) => Continuation::AwaitingContinuation(id),
            _ => Continuation::Idle,
        };
        debug!(
            "{}: {} turns{}",
            self.stage,
            step.turns.len(),
            match self.continuation {
                Continuation::AwaitingContinuation(id) => format!(", continuing with {id}"),
                Continuation::Idle => String::new(),
            }
        );
        Ok(step.turns)
    }

    /// The piece the next step would work on, if the current stage has one.
    pub fn target_piece(&self, cube: &Cube) -> Result<Option<PieceId>, CubeError> {
        Ok(self.plan(cube)?.target)
    }

    /// The facing the next step's algorithm would be applied from, if any.
    pub fn significant_direction(&self, cube: &Cube) -> Result<Option<Direction>, CubeError> {
        Ok(self.plan(cube)?.facing)
    }

    fn plan(&self, cube: &Cube) -> Result<Step, CubeError> {
        let pending = self.continuation.pending();
        match self.stage {
            Stage::WhiteCenter => stages::white_center(cube),
            Stage::WhiteCross => stages::white_cross(cube, pending),
            Stage::WhiteCorners => stages::white_corners(cube, pending),
            Stage::MiddleEdges => stages::middle_edges(cube, pending),
            Stage::YellowCross => stages::yellow_cross(cube),
            Stage::YellowCorners => stages::yellow_corners(cube),
            Stage::TopCorners => stages::top_corners(cube),
            Stage::TopEdges => stages::top_edges(cube),
            Stage::Solved => Ok(Step::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;
    use crate::grid::RotationEngine;
    use crate::pieces::PRIMARY;
    use crate::scramble::seeded;
    use crate::slice::Slice;

    /// A solved cube held with the primary color down.
    fn primary_down() -> Cube {
        let mut cube = Cube::new();
        for layer in -1..=1 {
            cube.apply(Turn::new(Slice::new(Axis::X, layer), 180))
                .expect("valid turn");
        }
        cube
    }

    fn run_to(cube: &mut Cube, solver: &mut Solver, until: Stage) {
        for _ in 0..300 {
            if solver.check_state(cube).expect("valid cube") >= until {
                return;
            }
            let turns = solver.solve_step(cube).expect("valid cube");
            cube.apply_all(&turns).expect("valid turns");
        }
        panic!("did not reach {until}, stuck at {}", solver.stage());
    }

    #[test]
    fn test_white_center_flips_the_top_center_down() {
        let mut cube = Cube::new();
        let mut solver = Solver::new();
        assert_eq!(solver.check_state(&cube), Ok(Stage::WhiteCenter));

        let center = cube.center(Direction::Up).id();
        assert_eq!(solver.target_piece(&cube), Ok(Some(center)));
        let turns = solver.solve_step(&cube).expect("valid cube");
        assert_eq!(turns, vec![Turn::new(Slice::new(Axis::X, 0), 180)]);

        cube.apply_all(&turns).expect("valid turns");
        assert_eq!(cube.piece(center).position(), (0, -1, 0));
        assert_eq!(
            cube.piece(center).color_facing(Direction::Down),
            Some(PRIMARY)
        );
        assert_eq!(solver.check_state(&cube), Ok(Stage::WhiteCross));
    }

    #[test]
    fn test_white_center_from_a_side() {
        let mut cube = Cube::new();
        cube.apply(Turn::new(Slice::new(Axis::X, 0), 90))
            .expect("valid turn");
        let mut solver = Solver::new();
        let turns = solver.solve_step(&cube).expect("valid cube");
        assert_eq!(turns.len(), 1);
        cube.apply_all(&turns).expect("valid turns");
        assert_eq!(solver.check_state(&cube), Ok(Stage::WhiteCross));
    }

    #[test]
    fn test_solved_cube_with_primary_down_needs_nothing() {
        let cube = primary_down();
        let mut solver = Solver::new();
        assert_eq!(solver.check_state(&cube), Ok(Stage::Solved));
        assert_eq!(solver.solve_step(&cube), Ok(Vec::new()));
        assert_eq!(solver.target_piece(&cube), Ok(None));
    }

    #[test]
    fn test_middle_edge_out_of_place_is_returned_home() {
        let mut cube = primary_down();
        let edge = cube.piece_at((1, 0, 1)).id();
        cube.apply_all(&insertion(Direction::Forward, Direction::Right).expect("valid pair"))
            .expect("valid turns");
        assert_ne!(cube.piece(edge).position(), (1, 0, 1));

        let mut solver = Solver::new();
        assert_eq!(solver.check_state(&cube), Ok(Stage::MiddleEdges));
        let turns = solver.solve_step(&cube).expect("valid cube");
        assert!(!turns.is_empty());
        cube.apply_all(&turns).expect("valid turns");

        run_to(&mut cube, &mut solver, Stage::YellowCross);
        assert_eq!(cube.piece(edge).position(), (1, 0, 1));
        for direction in [Direction::Right, Direction::Forward] {
            assert_eq!(
                cube.piece(edge).color_facing(direction),
                Some(select::center_color(&cube, direction).expect("center")),
            );
        }
    }

    #[test]
    fn test_angled_yellow_cross_uses_angled_algorithm() {
        let mut cube = primary_down();
        let frame = Frame::new(Direction::Forward);
        cube.apply_all(&frame.turns(LINE)).expect("valid turns");

        let mut solver = Solver::new();
        assert_eq!(solver.check_state(&cube), Ok(Stage::YellowCross));
        assert_eq!(
            solver.significant_direction(&cube),
            Ok(Some(Direction::Forward))
        );
        let turns = solver.solve_step(&cube).expect("valid cube");
        assert_eq!(turns, frame.turns(ANGLED));
        assert_ne!(turns, frame.turns(LINE));

        cube.apply_all(&turns).expect("valid turns");
        assert_eq!(solver.check_state(&cube), Ok(Stage::Solved));
        assert!(cube.is_solved());
    }

    #[test]
    fn test_pending_piece_is_carried_then_cleared() {
        // scramble until the cross stage asks to carry a piece
        for seed in 0..20 {
            let mut cube = Cube::new();
            cube.apply_all(&seeded(seed, 25)).expect("valid turns");
            let mut solver = Solver::new();
            for _ in 0..40 {
                solver.check_state(&cube).expect("valid cube");
                let turns = solver.solve_step(&cube).expect("valid cube");
                cube.apply_all(&turns).expect("valid turns");
                if let Continuation::AwaitingContinuation(id) = solver.continuation() {
                    assert_eq!(solver.target_piece(&cube), Ok(Some(id)));
                    return;
                }
            }
        }
        panic!("no step carried a piece");
    }

    #[test]
    fn test_seeded_scrambles_solve() {
        for seed in 0..25 {
            let mut cube = Cube::new();
            cube.apply_all(&seeded(seed, 25)).expect("valid turns");
            let mut solver = Solver::new();
            run_to(&mut cube, &mut solver, Stage::Solved);
            assert!(cube.is_solved(), "seed {seed} ended unsolved");
        }
    }

    #[test]
    fn test_solve_step_is_deterministic() {
        let mut cube = Cube::new();
        cube.apply_all(&seeded(7, 30)).expect("valid turns");
        let mut copy = cube.clone();
        let mut first = Solver::new();
        let mut second = Solver::new();
        for _ in 0..10 {
            first.check_state(&cube).expect("valid cube");
            second.check_state(&copy).expect("valid cube");
            let a = first.solve_step(&cube).expect("valid cube");
            let b = second.solve_step(&copy).expect("valid cube");
            assert_eq!(a, b);
            assert_eq!(first, second);
            cube.apply_all(&a).expect("valid turns");
            copy.apply_all(&b).expect("valid turns");
        }
    }

    #[test]
    fn test_stage_order() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert_eq!(Stage::Solved.next(), Stage::Solved);
    }
}
