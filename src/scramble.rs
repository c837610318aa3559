//! Random turn sequences for setting up a solve.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Axis;
use crate::slice::{Slice, Turn};

/// Default number of turns in a scramble.
pub const DEFAULT_LENGTH: usize = 25;

const DEGREES: [i32; 4] = [90, 180, -90, -180];

/// `length` turns, each on a uniformly chosen axis, layer and amount.
///
/// Middle layers are included, so the centers move too.
pub fn scramble<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Turn> {
    (0..length)
        .map(|_| {
            let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
            let layer = rng.gen_range(-1..=1);
            let degrees = DEGREES[rng.gen_range(0..DEGREES.len())];
            Turn::new(Slice::new(axis, layer), degrees)
        })
        .collect()
}

/// Reproducible scramble from a seed.
pub fn seeded(seed: u64, length: usize) -> Vec<Turn> {
    let mut rng = StdRng::seed_from_u64(seed);
    scramble(&mut rng, length)
}
