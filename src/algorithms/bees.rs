//! Bees algorithm over shopping tours.
//!
//! Each iteration sends foragers around the retained patches (more of them to
//! the elite ones), lets the remaining bees scout fresh random tours, and keeps
//! the cheapest `nb` results as the next patches. Non-improving local moves are
//! accepted with a simulated annealing rule, so the population can get worse;
//! the best tour ever seen is tracked separately.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::algorithms::annealing::Annealing;
use crate::algorithms::generator::CandidateGenerator;
use crate::algorithms::neighbourhood::NeighbourGenerator;
use crate::algorithms::selection::SelectionStrategy;
use crate::config::BeesConfig;
use crate::error::{Result, ShopperError};
use crate::models::{sort_by_cost, Candidate, Cost, Problem};

/// Loop state carried from one iteration to the next
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Current patches, ascending by cost
    pub patches: Vec<Candidate>,

    /// Cheapest candidate seen so far
    pub best: Candidate,

    /// Iteration at which `best` was found (0 = initial population)
    pub best_iteration: usize,

    /// Consecutive iterations without a new best
    pub no_improvement: usize,

    pub annealing: Annealing,

    /// Iterations executed so far
    pub iteration: usize,
}

/// Result of a bees run
#[derive(Debug, Clone, PartialEq)]
pub struct BeesOutcome {
    pub best: Candidate,
    pub best_iteration: usize,
    pub iterations: usize,
}

/// Bees algorithm solver bound to one problem
#[derive(Debug, Clone)]
pub struct BeesAlgorithm<'a> {
    problem: &'a Problem,
    config: BeesConfig,
}

impl<'a> BeesAlgorithm<'a> {
    /// Creates a solver after validating the configuration and the coverage of the catalog
    pub fn new(problem: &'a Problem, config: BeesConfig) -> Result<Self> {
        config.validate()?;
        problem.check_coverage()?;
        Ok(Self { problem, config })
    }

    pub fn config(&self) -> &BeesConfig {
        &self.config
    }

    /// Runs with a random source seeded from the configuration
    pub fn run(&self) -> Result<BeesOutcome> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs until the iteration limit or the no-improvement limit is reached
    pub fn run_with_rng(&self, rng: &mut dyn RngCore) -> Result<BeesOutcome> {
        let started = Instant::now();
        info!(
            event = "solve_start",
            shops = self.problem.shops().len(),
            items = self.problem.required().len(),
            scouts = self.config.scouts,
            max_iters = self.config.max_iters,
        );

        let mut state = self.initialize(rng)?;
        while !self.should_stop(&state) {
            state = self.step(state, rng)?;
        }

        info!(
            event = "solve_end",
            duration_ms = started.elapsed().as_millis() as u64,
            iterations = state.iteration,
            best_iteration = state.best_iteration,
            cost = state.best.cost,
        );

        Ok(BeesOutcome {
            best: state.best,
            best_iteration: state.best_iteration,
            iterations: state.iteration,
        })
    }

    /// Scouts the initial population and keeps the best `nb` as patches
    pub fn initialize(&self, rng: &mut dyn RngCore) -> Result<SearchState> {
        let mut population = self.scout(self.config.scouts, rng)?;
        sort_by_cost(&mut population);
        population.truncate(self.config.best_patches);

        let best = population
            .first()
            .cloned()
            .ok_or_else(|| ShopperError::InvalidConfig("no scouts generated".to_string()))?;

        Ok(SearchState {
            patches: population,
            best,
            best_iteration: 0,
            no_improvement: 0,
            annealing: Annealing::new(self.config.temperature, self.config.temp_decay),
            iteration: 0,
        })
    }

    pub fn should_stop(&self, state: &SearchState) -> bool {
        state.iteration >= self.config.max_iters
            || state.no_improvement >= self.config.iters_without_improvement
    }

    /// Performs one iteration and returns the next state
    pub fn step(&self, state: SearchState, rng: &mut dyn RngCore) -> Result<SearchState> {
        let SearchState {
            patches,
            mut best,
            mut best_iteration,
            mut no_improvement,
            annealing,
            iteration,
        } = state;
        let iteration = iteration + 1;

        let mut merged = Vec::with_capacity(self.config.scouts);
        for (rank, patch) in patches.iter().enumerate() {
            let foragers = if rank < self.config.elite_patches {
                self.config.elite_foragers
            } else {
                self.config.best_foragers
            };
            merged.push(self.local_search(patch, foragers, &annealing, rng)?);
        }

        let scouts = self.config.scouts.saturating_sub(self.config.best_patches);
        merged.extend(self.scout(scouts, rng)?);
        sort_by_cost(&mut merged);

        match merged.first() {
            Some(leader) if leader.cost < best.cost => {
                best = leader.clone();
                best_iteration = iteration;
                no_improvement = 0;
            }
            _ => no_improvement += 1,
        }

        merged.truncate(self.config.best_patches);

        debug!(
            event = "iteration",
            iteration,
            best_cost = best.cost,
            leader_cost = merged.first().map(|c| c.cost).unwrap_or(Cost::INFINITY),
            no_improvement,
            temperature = annealing.temperature(),
        );

        Ok(SearchState {
            patches: merged,
            best,
            best_iteration,
            no_improvement,
            annealing: annealing.cooled(),
            iteration,
        })
    }

    /// Sends `foragers` bees around `patch` and applies the acceptance rule
    /// to the cheapest neighbour they bring back
    pub fn local_search(
        &self,
        patch: &Candidate,
        foragers: usize,
        annealing: &Annealing,
        rng: &mut dyn RngCore,
    ) -> Result<Candidate> {
        let neighbours = self.forage(patch, foragers, rng)?;
        let cheapest = match neighbours.into_iter().min_by(Candidate::cmp_cost) {
            Some(cheapest) => cheapest,
            None => return Ok(patch.clone()),
        };

        let delta = patch.cost - cheapest.cost;
        if annealing.accepts(delta, rng) {
            Ok(cheapest)
        } else {
            Ok(patch.clone())
        }
    }

    fn forage(
        &self,
        patch: &Candidate,
        foragers: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Candidate>> {
        let neighbourhood = NeighbourGenerator::new(
            self.problem,
            self.config.neighbourhood_size,
            self.config.max_neighbour_attempts,
            self.config.reorder_foragers,
        );

        if self.config.parallel {
            let seeds: Vec<u64> = (0..foragers).map(|_| rng.next_u64()).collect();
            seeds
                .into_par_iter()
                .map(|seed| neighbourhood.neighbour(patch, &mut StdRng::seed_from_u64(seed)))
                .collect()
        } else {
            (0..foragers)
                .map(|_| neighbourhood.neighbour(patch, rng))
                .collect()
        }
    }

    fn scout(&self, n: usize, rng: &mut dyn RngCore) -> Result<Vec<Candidate>> {
        let generator = CandidateGenerator::new(self.problem, SelectionStrategy::Randomized);
        if self.config.parallel {
            generator.generate_batch_parallel(n, rng)
        } else {
            generator.generate_batch(n, rng)
        }
    }
}
