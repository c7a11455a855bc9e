// Tour ordering heuristic: clockwise angular sweep around the start point

use std::cmp::Ordering;

use crate::algorithms::Selection;
use crate::error::Result;
use crate::models::{Location, Problem, Visit};
use crate::utils::distance::{orientation, polar_angle};

/// Three-way comparator sweeping clockwise around `start`.
///
/// `a` sorts before `b` when `b` lies clockwise of `a`. The orientation test is
/// exact, so nearly collinear shops compare consistently. Exactly collinear pairs
/// fall back to the polar angle (descending), which orders opposite directions on
/// the start's horizontal line and shops sitting on the start itself.
pub fn clockwise(start: &Location, a: &Location, b: &Location) -> Ordering {
    match orientation(start, a, b) {
        Ordering::Equal => polar_angle(start, b).total_cmp(&polar_angle(start, a)),
        ordering => ordering,
    }
}

/// Orders the selected shops into a closed tour starting and ending at the start.
///
/// Shops at or above the start are swept left to right, then shops below the
/// start right to left. This is a cheap deterministic order, not an optimal one.
pub fn order_shops(selection: Selection, problem: &Problem) -> Result<Vec<Visit>> {
    let start = problem.start();
    let mut upper = Vec::new();
    let mut lower = Vec::new();

    for (shop_id, items) in selection {
        let location = problem.shop(shop_id)?.location;
        let visit = Visit::new(shop_id, items.into_iter().collect());

        if location.y >= start.y {
            upper.push((location, visit));
        } else {
            lower.push((location, visit));
        }
    }

    upper.sort_by(|(a, _), (b, _)| clockwise(&start, a, b));
    lower.sort_by(|(a, _), (b, _)| clockwise(&start, a, b));

    Ok(upper
        .into_iter()
        .chain(lower)
        .map(|(_, visit)| visit)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Shop, ShopId, WeightMatrix};
    use std::collections::BTreeSet;

    fn problem_with(positions: &[(f64, f64)]) -> Problem {
        let shops = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Shop::new(i as ShopId + 1, Location::new(x, y), [1], 0.0))
            .collect();
        Problem::new(
            [1],
            Location::new(0.0, 0.0),
            shops,
            WeightMatrix::uniform(0..=positions.len() as ShopId, 1.0),
        )
        .unwrap()
    }

    fn select_all(problem: &Problem) -> Selection {
        problem
            .shops()
            .iter()
            .map(|shop| (shop.id, BTreeSet::from([1])))
            .collect()
    }

    fn ids(visits: &[Visit]) -> Vec<ShopId> {
        visits.iter().map(|visit| visit.shop_id).collect()
    }

    #[test]
    fn test_clockwise_sweep() {
        // N, E, S, W, NE, SW
        let problem = problem_with(&[
            (0.0, 1.0),
            (1.0, 0.0),
            (0.0, -1.0),
            (-1.0, 0.0),
            (1.0, 1.0),
            (-1.0, -1.0),
        ]);
        let visits = order_shops(select_all(&problem), &problem).unwrap();

        // upper: W -> N -> NE -> E, lower: S -> SW
        assert_eq!(ids(&visits), vec![4, 1, 5, 2, 3, 6]);
    }

    #[test]
    fn test_collinear_shops_keep_input_order() {
        let problem = problem_with(&[(2.0, 2.0), (1.0, 1.0), (3.0, 3.0)]);
        let visits = order_shops(select_all(&problem), &problem).unwrap();

        assert_eq!(ids(&visits), vec![1, 2, 3]);
    }

    fn assert_sorted(problem: &Problem, visits: &[Visit]) {
        let start = problem.start();
        let locations: Vec<Location> = visits
            .iter()
            .map(|visit| problem.shop(visit.shop_id).unwrap().location)
            .collect();
        let split = locations
            .iter()
            .position(|l| l.y < start.y)
            .unwrap_or(locations.len());

        for half in [&locations[..split], &locations[split..]] {
            for (i, a) in half.iter().enumerate() {
                for b in &half[i + 1..] {
                    assert_ne!(clockwise(&start, a, b), Ordering::Greater);
                }
            }
        }
    }

    fn problem_around(start: Location, positions: &[(f64, f64)]) -> Problem {
        let shops = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Shop::new(i as ShopId + 1, Location::new(x, y), [1], 0.0))
            .collect();
        Problem::new(
            [1],
            start,
            shops,
            WeightMatrix::uniform(0..=positions.len() as ShopId, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_street_of_shops_through_start() {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let positions: Vec<(f64, f64)> = (0..90)
            .step_by(3)
            .map(|t| (10.0 + 0.1 * t as f64, 10.0 + 0.7 * t as f64))
            .collect();
        let problem = problem_around(Location::new(10.0, 10.0), &positions);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let mut selection = select_all(&problem);
            selection.shuffle(&mut rng);

            let visits = order_shops(selection, &problem).unwrap();
            assert_eq!(visits.len(), positions.len());
            assert_sorted(&problem, &visits);
        }
    }

    #[test]
    fn test_v_shaped_streets_split_by_side() {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut positions = Vec::new();
        for t in 1..40 {
            let t = t as f64;
            positions.push((10.0 - 0.1 * t, 10.0 + 0.7 * t));
            positions.push((10.0 + 0.1 * t, 10.0 + 0.7 * t));
        }
        let problem = problem_around(Location::new(10.0, 10.0), &positions);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..100 {
            let mut selection = select_all(&problem);
            selection.shuffle(&mut rng);

            let visits = order_shops(selection, &problem).unwrap();
            assert_sorted(&problem, &visits);

            // left street first, then right street
            let first_right = visits
                .iter()
                .position(|v| problem.shop(v.shop_id).unwrap().location.x > 10.0)
                .unwrap();
            assert!(visits[first_right..]
                .iter()
                .all(|v| problem.shop(v.shop_id).unwrap().location.x > 10.0));
        }
    }

    #[test]
    fn test_shop_on_start_goes_last_in_upper_group() {
        let problem = problem_with(&[(0.0, 0.0), (0.0, 1.0), (0.0, -1.0)]);
        let visits = order_shops(select_all(&problem), &problem).unwrap();

        assert_eq!(ids(&visits), vec![2, 1, 3]);
    }

    #[test]
    fn test_items_are_carried_over() {
        let problem = problem_with(&[(1.0, 1.0)]);
        let selection = vec![(1, BTreeSet::from([1]))];
        let visits = order_shops(selection, &problem).unwrap();

        assert_eq!(visits, vec![Visit::new(1, vec![1])]);
    }
}
