// Random instance generators for experiments and benchmarks

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopperError};
use crate::models::{Cost, ItemId, Location, Problem, Shop, ShopId, WeightMatrix, START_NODE};

/// Redraws allowed before giving up on producing a feasible instance
const MAX_DRAWS: usize = 1000;

/// Spatial layouts of generated instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceKind {
    /// Shops spread uniformly over a 100x100 square
    Uniform,
    /// Shops normally spread around a centre, queues longer downtown
    City,
    /// Four shop clusters around the corners, start in the middle
    Agglomeration,
}

/// Parameters shared by the generators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub list_size: usize,
    pub shops: usize,
    /// Spread of shop positions (city and agglomeration layouts)
    pub radius: f64,
    /// Queue penalty at the city centre
    pub max_q: Cost,
    /// Standard deviation of the travel weights around 1
    pub weights_scale: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            list_size: 100,
            shops: 500,
            radius: 100.0,
            max_q: 100.0,
            weights_scale: 0.5,
        }
    }
}

/// Draws a feasible instance of the requested layout
pub fn generate(
    kind: InstanceKind,
    params: &GeneratorParams,
    rng: &mut dyn RngCore,
) -> Result<Problem> {
    if params.list_size == 0 || params.shops == 0 {
        return Err(ShopperError::InvalidInstance(
            "generated instances need at least one item and one shop".to_string(),
        ));
    }

    for _ in 0..MAX_DRAWS {
        let (start, shops, weights_scale) = match kind {
            InstanceKind::Uniform => uniform_layout(params, rng)?,
            InstanceKind::City => city_layout(params, rng)?,
            InstanceKind::Agglomeration => agglomeration_layout(params, rng)?,
        };

        let weights = random_weights(params.shops, weights_scale, rng)?;
        let problem = Problem::new(1..=params.list_size as ItemId, start, shops, weights)?;

        if problem.check_coverage().is_ok() {
            return Ok(problem);
        }
    }

    Err(ShopperError::InvalidInstance(format!(
        "no feasible instance after {} draws; increase the shop count",
        MAX_DRAWS
    )))
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| ShopperError::InvalidInstance(e.to_string()))
}

// One to three random items, duplicates collapse
fn random_items(list_size: usize, rng: &mut dyn RngCore) -> Vec<ItemId> {
    let count = rng.gen_range(1..=3);
    (0..count)
        .map(|_| rng.gen_range(1..=list_size as ItemId))
        .collect()
}

type Layout = (Location, Vec<Shop>, f64);

fn uniform_layout(params: &GeneratorParams, rng: &mut dyn RngCore) -> Result<Layout> {
    let centre = normal(50.0, 10.0)?;
    let queue = normal(20.0, 5.0)?;
    let side = Uniform::new(0.0, 100.0);

    let start = Location::new(centre.sample(rng), centre.sample(rng));
    let shops = (1..=params.shops as ShopId)
        .map(|id| {
            let location = Location::new(side.sample(rng), side.sample(rng));
            let items = random_items(params.list_size, rng);
            Shop::new(id, location, items, queue.sample(rng).max(0.0))
        })
        .collect();

    Ok((start, shops, 0.05))
}

fn city_layout(params: &GeneratorParams, rng: &mut dyn RngCore) -> Result<Layout> {
    let spread = normal(0.0, params.radius)?;

    let start = Location::new(spread.sample(rng), spread.sample(rng));
    let shops = (1..=params.shops as ShopId)
        .map(|id| {
            let items = random_items(params.list_size, rng);
            let location = Location::new(spread.sample(rng), spread.sample(rng));
            let from_centre = location.distance_to(&Location::new(0.0, 0.0));
            let q = (params.max_q - params.max_q * from_centre / (3.0 * params.radius)).max(0.0);
            Shop::new(id, location, items, q)
        })
        .collect();

    Ok((start, shops, params.weights_scale))
}

fn agglomeration_layout(params: &GeneratorParams, rng: &mut dyn RngCore) -> Result<Layout> {
    const CENTRES: [(f64, f64); 4] = [
        (-100.0, -100.0),
        (-100.0, 100.0),
        (100.0, -100.0),
        (100.0, 100.0),
    ];

    let spread = normal(0.0, params.radius)?;
    let per_cluster = (params.shops / 4).max(1);

    let shops = (1..=params.shops)
        .map(|id| {
            let cluster = (id / per_cluster).min(CENTRES.len() - 1);
            let (cx, cy) = CENTRES[cluster];
            let items = random_items(params.list_size, rng);
            let location = Location::new(cx + spread.sample(rng), cy + spread.sample(rng));
            Shop::new(id as ShopId, location, items, 0.0)
        })
        .collect();

    Ok((Location::new(0.0, 0.0), shops, 0.05))
}

// Symmetric weights ~ N(1, scale) over the start and all shops, clamped at zero
fn random_weights(shops: usize, scale: f64, rng: &mut dyn RngCore) -> Result<WeightMatrix> {
    let weight = normal(1.0, scale)?;
    let mut weights = WeightMatrix::new();

    for from in START_NODE..=shops as ShopId {
        for to in from + 1..=shops as ShopId {
            weights.insert(from, to, weight.sample(rng).max(0.0));
        }
    }

    Ok(weights)
}
