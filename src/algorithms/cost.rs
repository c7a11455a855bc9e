// Objective function: weighted travel distance plus queue penalties

use crate::error::{Result, ShopperError};
use crate::models::{Cost, Problem, ShopId, Visit, START_NODE};

/// Weighted Euclidean length of the leg between two nodes
pub fn leg_cost(problem: &Problem, from: ShopId, to: ShopId) -> Result<Cost> {
    let weight = problem.weight(from, to)?;
    let distance = problem.location(from)?.distance_to(&problem.location(to)?);
    Ok(weight * distance)
}

/// Cost of a closed tour over `visits`:
///
/// sum_{i} w(i, i+1) * d(i, i+1) + w(0, first) * d(0, first) + w(last, 0) * d(last, 0) + sum q
pub fn calculate_cost(visits: &[Visit], problem: &Problem) -> Result<Cost> {
    let (first, last) = match (visits.first(), visits.last()) {
        (Some(first), Some(last)) => (first.shop_id, last.shop_id),
        _ => return Err(ShopperError::EmptyTour),
    };

    let mut cost = 0.0;

    for pair in visits.windows(2) {
        cost += leg_cost(problem, pair[0].shop_id, pair[1].shop_id)?;
    }

    cost += leg_cost(problem, START_NODE, first)?;
    cost += leg_cost(problem, last, START_NODE)?;

    for visit in visits {
        cost += problem.shop(visit.shop_id)?.queue_penalty;
    }

    Ok(cost)
}
