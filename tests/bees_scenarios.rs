// Integration tests for the bees solver on small hand-built instances
use bees_shopper::algorithms::cost::calculate_cost;
use bees_shopper::models::ShopId;
use bees_shopper::utils::instance_io::problem_from_json_str;
use bees_shopper::{
    greedy_solution, BeesAlgorithm, BeesConfig, CandidateGenerator, Location, Problem,
    SelectionStrategy, Shop, ShopperError, Visit, WeightMatrix,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quick_config(seed: u64) -> BeesConfig {
    BeesConfig {
        scouts: 12,
        elite_patches: 3,
        best_patches: 6,
        elite_foragers: 4,
        best_foragers: 2,
        neighbourhood_size: 3,
        iters_without_improvement: 20,
        max_iters: 60,
        seed: Some(seed),
        ..BeesConfig::default()
    }
}

fn uniform_weights(shops: ShopId) -> WeightMatrix {
    WeightMatrix::uniform(0..=shops, 1.0)
}

#[test]
fn test_two_shops_symmetric_tour() {
    let shops = vec![
        Shop::new(1, Location::new(1.0, 0.0), [1], 0.0),
        Shop::new(2, Location::new(0.0, 1.0), [2], 0.0),
    ];
    let problem = Problem::new([1, 2], Location::new(0.0, 0.0), shops, uniform_weights(2)).unwrap();

    let outcome = BeesAlgorithm::new(&problem, quick_config(1))
        .unwrap()
        .run()
        .unwrap();

    let mut visited = outcome.best.shop_sequence();
    visited.sort();
    assert_eq!(visited, vec![1, 2]);
    assert!((outcome.best.cost - (2.0 + 2f64.sqrt())).abs() < 1e-9);

    // both visiting orders cost the same
    let forward = vec![Visit::new(1, vec![1]), Visit::new(2, vec![2])];
    let backward = vec![Visit::new(2, vec![2]), Visit::new(1, vec![1])];
    assert_eq!(
        calculate_cost(&forward, &problem).unwrap(),
        calculate_cost(&backward, &problem).unwrap()
    );
}

#[test]
fn test_single_item_single_stocker() {
    let shops = vec![
        Shop::new(1, Location::new(3.0, 4.0), [7], 2.0),
        Shop::new(2, Location::new(1.0, 1.0), [8], 0.0),
    ];
    let mut weights = uniform_weights(2);
    weights.insert(0, 1, 1.5);
    let problem = Problem::new([7], Location::new(0.0, 0.0), shops, weights).unwrap();

    let candidate = greedy_solution(&problem).unwrap();
    assert_eq!(candidate.shop_sequence(), vec![1]);
    assert_eq!(candidate.cost, 2.0 * 1.5 * 5.0 + 2.0);

    let outcome = BeesAlgorithm::new(&problem, quick_config(2))
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(outcome.best.cost, candidate.cost);
}

#[test]
fn test_queue_penalty_counted_once() {
    let shops = vec![
        Shop::new(1, Location::new(2.0, 0.0), [1], 100.0),
        Shop::new(2, Location::new(0.0, 2.0), [2], 0.0),
        Shop::new(3, Location::new(-2.0, 0.0), [2], 0.0),
        Shop::new(4, Location::new(0.0, -2.0), [3], 0.0),
    ];
    let problem = Problem::new([1, 2, 3], Location::new(0.0, 0.0), shops, uniform_weights(4)).unwrap();

    let outcome = BeesAlgorithm::new(&problem, quick_config(3))
        .unwrap()
        .run()
        .unwrap();
    let best = &outcome.best;

    assert!(best.shop_sequence().contains(&1));
    let mut penalty_free = problem.shops().to_vec();
    penalty_free[0].queue_penalty = 0.0;
    let zero_q =
        Problem::new([1, 2, 3], Location::new(0.0, 0.0), penalty_free, uniform_weights(4)).unwrap();

    let travel = calculate_cost(&best.visits, &zero_q).unwrap();
    assert!((best.cost - travel - 100.0).abs() < 1e-9);
}

#[test]
fn test_cost_ignores_item_order_but_not_shop_order() {
    let shops = vec![
        Shop::new(1, Location::new(1.0, 0.0), [1, 2], 0.0),
        Shop::new(2, Location::new(5.0, 5.0), [3], 0.0),
        Shop::new(3, Location::new(0.0, 1.0), [4], 0.0),
    ];
    let mut weights = uniform_weights(3);
    weights.insert(1, 2, 3.0);
    let problem = Problem::new([1, 2, 3, 4], Location::new(0.0, 0.0), shops, weights).unwrap();

    let a = vec![
        Visit::new(1, vec![1, 2]),
        Visit::new(2, vec![3]),
        Visit::new(3, vec![4]),
    ];
    let b = vec![
        Visit::new(1, vec![2, 1]),
        Visit::new(2, vec![3]),
        Visit::new(3, vec![4]),
    ];
    let c = vec![
        Visit::new(2, vec![3]),
        Visit::new(1, vec![1, 2]),
        Visit::new(3, vec![4]),
    ];

    let cost_a = calculate_cost(&a, &problem).unwrap();
    assert_eq!(cost_a, calculate_cost(&b, &problem).unwrap());
    assert_eq!(cost_a, calculate_cost(&a, &problem).unwrap());
    assert_ne!(cost_a, calculate_cost(&c, &problem).unwrap());
}

#[test]
fn test_bees_improves_on_random_scouts() {
    let shops: Vec<Shop> = (1..=30)
        .map(|id| {
            let angle = id as f64 * 0.7;
            let radius = 5.0 + (id % 7) as f64 * 3.0;
            Shop::new(
                id,
                Location::new(angle.cos() * radius, angle.sin() * radius),
                [id % 10 + 1, (id * 3) % 10 + 1],
                (id % 4) as f64,
            )
        })
        .collect();
    let problem = Problem::new(1..=10, Location::new(0.0, 0.0), shops, uniform_weights(30)).unwrap();

    let generator = CandidateGenerator::new(&problem, SelectionStrategy::Randomized);
    let scouts = generator
        .generate_batch(12, &mut StdRng::seed_from_u64(5))
        .unwrap();
    let best_scout = scouts
        .iter()
        .map(|c| c.cost)
        .fold(f64::INFINITY, f64::min);

    let outcome = BeesAlgorithm::new(&problem, quick_config(5))
        .unwrap()
        .run()
        .unwrap();

    assert!(outcome.best.covers_exactly(problem.required()));
    assert!(outcome.best.cost <= best_scout);
    assert_eq!(
        calculate_cost(&outcome.best.visits, &problem).unwrap(),
        outcome.best.cost
    );
}

#[test]
fn test_solve_from_json_instance() {
    let json = r#"{
        "list": [1, 2, 3],
        "start": {"x": 50.0, "y": 50.0},
        "shops": [
            {"id": 1, "q": 5.0, "x": 10.0, "y": 20.0, "items": [1, 2]},
            {"id": 2, "q": 1.0, "x": 60.0, "y": 70.0, "items": [3]},
            {"id": 3, "q": 2.0, "x": 55.0, "y": 45.0, "items": [1, 3]},
            {"id": 4, "q": 0.0, "x": 40.0, "y": 60.0, "items": [2]}
        ],
        "weights": {
            "0": {"1": 1.0, "2": 1.1, "3": 0.9, "4": 1.0},
            "1": {"0": 1.0, "2": 1.0, "3": 1.2, "4": 0.8},
            "2": {"0": 1.1, "1": 1.0, "3": 1.0, "4": 1.0},
            "3": {"0": 0.9, "1": 1.2, "2": 1.0, "4": 1.05},
            "4": {"0": 1.0, "1": 0.8, "2": 1.0, "3": 1.05}
        }
    }"#;
    let problem = problem_from_json_str(json).unwrap();

    let greedy = greedy_solution(&problem).unwrap();
    let outcome = BeesAlgorithm::new(&problem, quick_config(6))
        .unwrap()
        .run()
        .unwrap();

    assert!(greedy.covers_exactly(problem.required()));
    assert!(outcome.best.covers_exactly(problem.required()));
    // shops 3 and 4 are next to the start and cover everything
    let mut visited = outcome.best.shop_sequence();
    visited.sort();
    assert_eq!(visited, vec![3, 4]);
}

#[test]
fn test_missing_weight_surfaces_from_solver() {
    let shops = vec![
        Shop::new(1, Location::new(1.0, 0.0), [1], 0.0),
        Shop::new(2, Location::new(0.0, 1.0), [2], 0.0),
    ];
    let mut weights = WeightMatrix::new();
    weights.insert(0, 1, 1.0);
    weights.insert(0, 2, 1.0);
    let problem = Problem::new([1, 2], Location::new(0.0, 0.0), shops, weights).unwrap();

    let result = BeesAlgorithm::new(&problem, quick_config(7)).unwrap().run();
    assert!(matches!(result, Err(ShopperError::MissingWeight { .. })));
}
