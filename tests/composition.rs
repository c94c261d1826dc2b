// Composition tests — build a model, simulate over it, aggregate.
//
// These use the real seeded generator, so they check properties that
// hold for every draw rather than exact cascade sizes.

use std::collections::{HashMap, HashSet, VecDeque};

use ripple::model::{ActivityRecord, InteractionRecord, Model};
use ripple::pipeline;
use ripple::simulation::random::seeded;
use ripple::simulation::{SimulationMode, SimulationParameters, Simulator};
use ripple::stats::aggregate::DEFAULT_BOUNDARIES;

fn build(users: &[(u64, u64)], edges: &[(u64, u64, u64)]) -> Model {
    let activity = users.iter().map(|&(user_id, avg_daily_retweets)| ActivityRecord {
        user_id,
        avg_daily_retweets,
    });
    let interactions = edges
        .iter()
        .map(|&(reposter_id, origin_id, retweet_count)| InteractionRecord {
            reposter_id,
            origin_id,
            retweet_count,
        });
    Model::build(activity, interactions).unwrap().0
}

/// A dense pseudo-random graph over 40 users with plenty of cycles.
fn dense_model() -> Model {
    let users: Vec<(u64, u64)> = (0..40).map(|id| (id, 1 + (id * 7) % 13)).collect();
    let mut edges = Vec::new();
    for reposter in 0..40u64 {
        for step in [1, 3, 7, 11] {
            let origin = (reposter * 5 + step) % 40;
            if origin != reposter {
                edges.push((reposter, origin, 1 + (reposter + step) % 4));
            }
        }
    }
    build(&users, &edges)
}

/// Users reachable from `seed` within `max_depth` follower hops, seed included.
fn reachable_within(model: &Model, seed: u64, max_depth: usize) -> usize {
    let mut seen: HashSet<u64> = HashSet::from([seed]);
    let mut depth_of: HashMap<u64, usize> = HashMap::from([(seed, 0)]);
    let mut queue = VecDeque::from([seed]);
    while let Some(id) = queue.pop_front() {
        let depth = depth_of[&id];
        if depth == max_depth {
            continue;
        }
        for &f in model.followers(id) {
            if seen.insert(f) {
                depth_of.insert(f, depth + 1);
                queue.push_back(f);
            }
        }
    }
    seen.len()
}

// ============================================================
// Simulation properties
// ============================================================

#[test]
fn zero_rate_never_spreads() {
    let model = dense_model();
    let mut sim = Simulator::new(&model, seeded(7));
    let outcomes = sim
        .run(&SimulationParameters::sampled(0.0, 5, 500))
        .unwrap();
    assert_eq!(outcomes.len(), 500);
    assert!(outcomes.iter().all(|&o| o == 0));
}

#[test]
fn outcomes_bounded_by_reachable_users() {
    let model = dense_model();
    let mut sim = Simulator::new(&model, seeded(11));
    for max_depth in [0, 1, 2, 4] {
        let params = SimulationParameters::exhaustive(1.0, max_depth);
        for &seed in model.candidate_ids() {
            for _ in 0..5 {
                let outcome = sim.simulate_from(seed, &params);
                let bound = reachable_within(&model, seed, max_depth);
                assert!(
                    outcome <= bound,
                    "seed {seed} depth {max_depth}: {outcome} > {bound}"
                );
            }
        }
    }
}

#[test]
fn two_user_cycle_counts_each_user_once() {
    // 1 and 2 only ever retweet each other, both very active
    let model = build(&[(1, 10), (2, 10)], &[(2, 1, 5), (1, 2, 5)]);
    let mut sim = Simulator::new(&model, seeded(3));
    let outcomes = sim
        .run(&SimulationParameters::sampled(1.0, 1000, 2000))
        .unwrap();
    assert!(outcomes.iter().all(|&o| o <= 2));
    assert!(outcomes.iter().any(|&o| o == 2));
}

#[test]
fn same_seed_reproduces_run() {
    let model = dense_model();
    let params = SimulationParameters::sampled(0.8, 3, 300);
    let first = Simulator::new(&model, seeded(42)).run(&params).unwrap();
    let second = Simulator::new(&model, seeded(42)).run(&params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn seeds_only_drawn_from_candidates() {
    // Users with no followers give outcome 0 or 1; an outsider id never appears
    let model = build(&[(1, 10), (2, 10), (3, 10)], &[]);
    let mut sim = Simulator::new(&model, seeded(5));
    let outcomes = sim
        .run(&SimulationParameters::sampled(1.0, 3, 100))
        .unwrap();
    assert!(outcomes.iter().all(|&o| o == 1));
}

// ============================================================
// Pipelines
// ============================================================

#[test]
fn simulate_pipeline_aggregates_outcomes() {
    let model = dense_model();
    let params = SimulationParameters::exhaustive(0.5, 3);
    let report =
        pipeline::simulate::run(&model, seeded(9), 9, &params, &DEFAULT_BOUNDARIES, false)
            .unwrap();

    assert_eq!(report.outcomes.len(), 40);
    assert_eq!(report.summary.cascades, 40);
    assert_eq!(report.bucket_counts.iter().sum::<usize>(), 40);
    assert_eq!(report.bucket_labels.len(), report.bucket_counts.len());
    assert_eq!(report.seed, 9);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("outcomes").is_none());
    assert_eq!(json["summary"]["cascades"], 40);
}

#[test]
fn simulate_pipeline_rejects_bad_boundaries_up_front() {
    let model = dense_model();
    let params = SimulationParameters::exhaustive(0.5, 3);
    let result = pipeline::simulate::run(&model, seeded(1), 1, &params, &[5, 2], false);
    assert!(result.is_err());
}

#[test]
fn sweep_covers_full_grid_in_order() {
    let model = dense_model();
    let points = pipeline::sweep::run(
        &model,
        seeded(13),
        &[0.0, 0.5],
        &[1, 2, 3],
        SimulationMode::Sampled { rounds: 50 },
        false,
    )
    .unwrap();

    assert_eq!(points.len(), 6);
    assert_eq!(points[0].avg_retweet_rate, 0.0);
    assert_eq!(points[2].max_depth, 3);
    assert_eq!(points[3].avg_retweet_rate, 0.5);
    assert!(points[..3].iter().all(|p| p.summary.mean == 0.0));
}

#[test]
fn markdown_report_mentions_results() {
    let (model, build_report) = Model::build(
        vec![
            ActivityRecord {
                user_id: 1,
                avg_daily_retweets: 10,
            },
            ActivityRecord {
                user_id: 2,
                avg_daily_retweets: 10,
            },
        ],
        vec![InteractionRecord {
            reposter_id: 2,
            origin_id: 1,
            retweet_count: 1,
        }],
    )
    .unwrap();
    let params = SimulationParameters::exhaustive(1.0, 2);
    let run = pipeline::simulate::run(&model, seeded(2), 2, &params, &[1, 2], false).unwrap();

    let markdown = ripple::output::markdown::render_report(&run, &build_report);
    assert!(markdown.starts_with("# Cascade Simulation Report"));
    assert!(markdown.contains("| Users | 2 |"));
    assert!(markdown.contains("- Seed: `2`"));
    assert!(markdown.contains("| >= 2 |"));
}
