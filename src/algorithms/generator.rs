// Candidate generator: selection -> ordering -> cost

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::algorithms::cost::calculate_cost;
use crate::algorithms::ordering::order_shops;
use crate::algorithms::selection::{GreedySelector, SelectionStrategy};
use crate::algorithms::{CoverageSelector, Selection};
use crate::error::Result;
use crate::models::{Candidate, Problem};

/// Builds scored candidates for a problem with a fixed selection strategy
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    problem: &'a Problem,
    strategy: SelectionStrategy,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(problem: &'a Problem, strategy: SelectionStrategy) -> Self {
        Self { problem, strategy }
    }

    /// Generates one candidate
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<Candidate> {
        let selection = self.strategy.select(self.problem, rng)?;
        score_ordered(selection, self.problem)
    }

    /// Generates `n` independent candidates from the shared random source
    pub fn generate_batch(&self, n: usize, rng: &mut dyn RngCore) -> Result<Vec<Candidate>> {
        (0..n).map(|_| self.generate(rng)).collect()
    }

    /// Generates `n` independent candidates on the rayon pool.
    ///
    /// One seed per candidate is drawn from `rng` up front, so the result only
    /// depends on the state of `rng` and not on thread scheduling.
    pub fn generate_batch_parallel(
        &self,
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate>> {
        let seeds: Vec<u64> = (0..n).map(|_| rng.next_u64()).collect();

        seeds
            .into_par_iter()
            .map(|seed| self.generate(&mut StdRng::seed_from_u64(seed)))
            .collect()
    }
}

/// Orders a selection with the sweep heuristic and scores it
pub fn score_ordered(selection: Selection, problem: &Problem) -> Result<Candidate> {
    let visits = order_shops(selection, problem)?;
    let cost = calculate_cost(&visits, problem)?;
    Ok(Candidate::new(visits, cost))
}

/// Single deterministic solution from the greedy selector
pub fn greedy_solution(problem: &Problem) -> Result<Candidate> {
    let selection = GreedySelector.cover(problem)?;
    score_ordered(selection, problem)
}
