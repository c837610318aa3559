//! Batch driver: alternate state checks and solve steps until a target stage.

use log::{debug, warn};

use crate::error::CubeError;
use crate::grid::{Cube, RotationEngine};
use crate::slice::Turn;
use crate::solver::{Solver, Stage};

/// Knobs for [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Stop as soon as the solver reaches this stage.
    pub until: Stage,
    /// Give up after this many solve steps.
    pub max_steps: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            until: Stage::Solved,
            max_steps: 300,
        }
    }
}

/// One solve step and the stage it was taken in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub stage: Stage,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub steps: Vec<StepRecord>,
    /// Stage reached when the session stopped.
    pub stage: Stage,
}

impl SessionReport {
    pub fn turn_count(&self) -> usize {
        self.steps.iter().map(|step| step.turns.len()).sum()
    }
}

/// Drives `solver` on `cube` until it reaches `config.until`.
///
/// Every returned turn is applied to `cube` before the next check. Fails with
/// `StepLimit` when `config.max_steps` steps were not enough.
pub fn run(
    cube: &mut Cube,
    solver: &mut Solver,
    config: &SessionConfig,
) -> Result<SessionReport, CubeError> {
    let mut steps = Vec::new();
    loop {
        let stage = solver.check_state(cube)?;
        if stage >= config.until {
            debug!("reached {stage} after {} steps", steps.len());
            return Ok(SessionReport { steps, stage });
        }
        if steps.len() >= config.max_steps {
            warn!("step limit {} hit at {stage}", config.max_steps);
            return Err(CubeError::StepLimit {
                steps: steps.len(),
                stage,
            });
        }
        let turns = solver.solve_step(cube)?;
        cube.apply_all(&turns)?;
        steps.push(StepRecord { stage, turns });
    }
}
