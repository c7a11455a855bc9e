use bees_shopper::config::BeesConfig;
use bees_shopper::utils::experiments::{save_samples, ParameterSweep};
use bees_shopper::utils::instance_gen::{self, GeneratorParams, InstanceKind};
use bees_shopper::utils::instance_io::{load_problem, save_problem, save_solution, SolutionRecord};
use bees_shopper::utils::plot::plot_tour;
use bees_shopper::{greedy_solution, BeesAlgorithm, Candidate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bees_shopper", about = "Shopping tour optimization with the bees algorithm")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Improve a tour with the bees algorithm
    Solve(SolveArgs),
    /// Build a single tour with the greedy selector
    Greedy(OutputArgs),
    /// Write a random feasible instance
    Generate(GenerateArgs),
    /// Save a batch of randomized tours, one JSON file each
    Sample(SampleArgs),
    /// Vary nre, nrb and d one at a time and record every solve in a CSV file
    Sweep(SweepArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// JSON file with the instance
    #[arg(long)]
    filename: PathBuf,
    /// JSON file to save the solution to
    #[arg(long)]
    output: Option<PathBuf>,
    /// PNG file to draw the tour into
    #[arg(long)]
    plot: Option<PathBuf>,
}

#[derive(Args)]
struct SolveArgs {
    #[command(flatten)]
    io: OutputArgs,
    /// JSON file with algorithm parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of scouts
    #[arg(long)]
    ns: Option<usize>,
    /// Number of elite solutions
    #[arg(long)]
    ne: Option<usize>,
    /// Number of the best solutions
    #[arg(long)]
    nb: Option<usize>,
    /// Number of foragers for each elite solution
    #[arg(long)]
    nre: Option<usize>,
    /// Number of foragers for each best, but not elite solution
    #[arg(long)]
    nrb: Option<usize>,
    /// Edit distance in which local search operates
    #[arg(long)]
    d: Option<usize>,
    /// Max number of iterations without improvement
    #[arg(long)]
    improve_iters: Option<usize>,
    /// Maximal number of iterations
    #[arg(long)]
    max_iters: Option<usize>,
    /// Initial annealing temperature (0 disables annealing)
    #[arg(long)]
    temperature: Option<f64>,
    /// Annealing temperature multiplier
    #[arg(long)]
    decay: Option<f64>,
    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Evaluate scouts and foragers in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    Uniform,
    City,
    Agglomeration,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, value_enum, default_value = "uniform")]
    kind: Layout,
    #[arg(long, default_value_t = 100)]
    list_size: usize,
    #[arg(long, default_value_t = 500)]
    shops: usize,
    #[arg(long, default_value_t = 100.0)]
    radius: f64,
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file to write the instance to
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args)]
struct SampleArgs {
    /// JSON file with the instance
    #[arg(long)]
    filename: PathBuf,
    /// Number of tours to generate
    #[arg(long, default_value_t = 10)]
    count: usize,
    /// Directory receiving 1.json, 2.json, ...
    #[arg(long)]
    output_dir: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SweepArgs {
    /// JSON file with the instance
    #[arg(long)]
    filename: PathBuf,
    /// CSV file to write the results to
    #[arg(long)]
    output: PathBuf,
    /// JSON file with the base parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Repetitions of the whole study
    #[arg(long, default_value_t = 5)]
    runs: usize,
    /// Seed of the first solve; each later solve uses the next one
    #[arg(long, default_value_t = 100)]
    seed: u64,
}

impl SolveArgs {
    fn to_config(&self) -> Result<BeesConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => BeesConfig::load(path)?,
            None => BeesConfig::default(),
        };

        let overrides = [
            (self.ns, &mut config.scouts),
            (self.ne, &mut config.elite_patches),
            (self.nb, &mut config.best_patches),
            (self.nre, &mut config.elite_foragers),
            (self.nrb, &mut config.best_foragers),
            (self.d, &mut config.neighbourhood_size),
            (self.improve_iters, &mut config.iters_without_improvement),
            (self.max_iters, &mut config.max_iters),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(decay) = self.decay {
            config.temp_decay = decay;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.parallel |= self.parallel;

        config.validate()?;
        Ok(config)
    }
}

fn report(candidate: &Candidate, io: &OutputArgs) -> Result<(), Box<dyn Error>> {
    let record = SolutionRecord::from(candidate);
    println!("Solution: {}", serde_json::to_string(&record)?);
    println!("Cost: {:.2}", candidate.cost);

    if let Some(output) = &io.output {
        save_solution(candidate, output)?;
        println!("Solution saved to {}", output.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Solve(args) => {
            let config = args.to_config()?;
            let problem = load_problem(&args.io.filename)?;

            let start_time = std::time::Instant::now();
            let outcome = BeesAlgorithm::new(&problem, config)?.run()?;
            let elapsed = start_time.elapsed();

            report(&outcome.best, &args.io)?;
            println!("Best iteration: {}", outcome.best_iteration);
            println!("Number of iterations: {}", outcome.iterations);
            println!("Found in {:.2?}", elapsed);

            if let Some(plot) = &args.io.plot {
                plot_tour(&problem, Some(&outcome.best), plot)?;
            }
        }
        Command::Greedy(io) => {
            let problem = load_problem(&io.filename)?;
            let candidate = greedy_solution(&problem)?;
            report(&candidate, &io)?;

            if let Some(plot) = &io.plot {
                plot_tour(&problem, Some(&candidate), plot)?;
            }
        }
        Command::Generate(args) => {
            let kind = match args.kind {
                Layout::Uniform => InstanceKind::Uniform,
                Layout::City => InstanceKind::City,
                Layout::Agglomeration => InstanceKind::Agglomeration,
            };
            let params = GeneratorParams {
                list_size: args.list_size,
                shops: args.shops,
                radius: args.radius,
                ..GeneratorParams::default()
            };
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let problem = instance_gen::generate(kind, &params, &mut rng)?;
            save_problem(&problem, &args.output)?;
            println!(
                "Instance with {} shops and {} items saved to {}",
                problem.shops().len(),
                problem.required().len(),
                args.output.display()
            );
        }
        Command::Sample(args) => {
            let problem = load_problem(&args.filename)?;
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let paths = save_samples(&problem, args.count, &args.output_dir, &mut rng)?;
            println!(
                "{} solutions saved to {}",
                paths.len(),
                args.output_dir.display()
            );
        }
        Command::Sweep(args) => {
            let problem = load_problem(&args.filename)?;
            let base = match &args.config {
                Some(path) => BeesConfig::load(path)?,
                None => BeesConfig::default(),
            };
            let sweep = ParameterSweep {
                base,
                runs: args.runs,
                first_seed: args.seed,
                ..ParameterSweep::default()
            };

            let file = std::fs::File::create(&args.output)?;
            let rows = sweep.run(&problem, file)?;
            println!("{} solves written to {}", rows.len(), args.output.display());
        }
    }

    Ok(())
}
