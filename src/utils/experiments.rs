// Parameter studies and batches of sample solutions

use rand::RngCore;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::algorithms::bees::{BeesAlgorithm, BeesOutcome};
use crate::algorithms::generator::CandidateGenerator;
use crate::algorithms::selection::SelectionStrategy;
use crate::config::BeesConfig;
use crate::error::Result;
use crate::models::{Cost, Problem};
use crate::utils::instance_io::save_solution;

/// Parameter varied by a sweep while the others keep their base values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweptParameter {
    EliteForagers,
    BestForagers,
    NeighbourhoodSize,
}

impl SweptParameter {
    /// Sweep order: `nre`, `nrb`, then `d`
    pub const ALL: [SweptParameter; 3] = [
        SweptParameter::EliteForagers,
        SweptParameter::BestForagers,
        SweptParameter::NeighbourhoodSize,
    ];

    pub fn apply(&self, config: &mut BeesConfig, value: usize) {
        match self {
            SweptParameter::EliteForagers => config.elite_foragers = value,
            SweptParameter::BestForagers => config.best_foragers = value,
            SweptParameter::NeighbourhoodSize => config.neighbourhood_size = value,
        }
    }
}

/// One CSV line of a parameter study
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub run: usize,
    pub seed: u64,
    pub ns: usize,
    pub ne: usize,
    pub nb: usize,
    pub nre: usize,
    pub nrb: usize,
    pub d: usize,
    pub improve_iters: usize,
    pub max_iters: usize,
    pub temperature: f64,
    pub decay: f64,
    pub cost: Cost,
    pub best_iter: usize,
    pub iter_num: usize,
}

impl SweepRow {
    fn new(run: usize, seed: u64, config: &BeesConfig, outcome: &BeesOutcome) -> Self {
        Self {
            run,
            seed,
            ns: config.scouts,
            ne: config.elite_patches,
            nb: config.best_patches,
            nre: config.elite_foragers,
            nrb: config.best_foragers,
            d: config.neighbourhood_size,
            improve_iters: config.iters_without_improvement,
            max_iters: config.max_iters,
            temperature: config.temperature,
            decay: config.temp_decay,
            cost: outcome.best.cost,
            best_iter: outcome.best_iteration,
            iter_num: outcome.iterations,
        }
    }
}

/// One-at-a-time study around a base configuration.
///
/// For every run and every temperature, each of `nre`, `nrb` and `d` takes all
/// of `values` in turn. Every solve gets its own seed, counting up from
/// `first_seed`, so a study is reproducible as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSweep {
    pub base: BeesConfig,
    pub runs: usize,
    pub values: Vec<usize>,
    pub temperatures: Vec<f64>,
    pub first_seed: u64,
}

impl Default for ParameterSweep {
    fn default() -> Self {
        Self {
            base: BeesConfig::default(),
            runs: 5,
            values: (2..=10).step_by(2).collect(),
            temperatures: vec![0.0, 1000.0],
            first_seed: 100,
        }
    }
}

impl ParameterSweep {
    /// Configurations in execution order, each tagged with its run number
    pub fn configs(&self) -> Vec<(usize, BeesConfig)> {
        let mut seed = self.first_seed;
        let mut configs = Vec::new();

        for run in 1..=self.runs {
            for &temperature in &self.temperatures {
                for parameter in SweptParameter::ALL {
                    for &value in &self.values {
                        let mut config = BeesConfig {
                            temperature,
                            seed: Some(seed),
                            ..self.base.clone()
                        };
                        parameter.apply(&mut config, value);
                        configs.push((run, config));
                        seed += 1;
                    }
                }
            }
        }

        configs
    }

    /// Solves `problem` once per configuration, writing a CSV row after each solve
    pub fn run<W: Write>(&self, problem: &Problem, writer: W) -> Result<Vec<SweepRow>> {
        let configs = self.configs();
        let total = configs.len();
        let mut csv = csv::Writer::from_writer(writer);
        let mut rows = Vec::with_capacity(total);

        for (index, (run, config)) in configs.into_iter().enumerate() {
            let seed = config.seed.unwrap_or(self.first_seed);
            let outcome = BeesAlgorithm::new(problem, config.clone())?.run()?;
            let row = SweepRow::new(run, seed, &config, &outcome);

            csv.serialize(&row)?;
            csv.flush()?;
            info!(
                event = "sweep_solve",
                done = index + 1,
                total,
                run,
                seed,
                cost = row.cost,
            );
            rows.push(row);
        }

        Ok(rows)
    }
}

/// Saves `count` randomized tours as `1.json` to `<count>.json` inside `dir`
pub fn save_samples<P: AsRef<Path>>(
    problem: &Problem,
    count: usize,
    dir: P,
    rng: &mut dyn RngCore,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let candidates = CandidateGenerator::new(problem, SelectionStrategy::Randomized)
        .generate_batch(count, rng)?;

    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let path = dir.join(format!("{}.json", i + 1));
            save_solution(candidate, &path)?;
            Ok(path)
        })
        .collect()
}
