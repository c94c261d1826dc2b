// Unit tests for outcome aggregation.

use ripple::stats::aggregate::{bucket_labels, DEFAULT_BOUNDARIES};
use ripple::model::{ActivityRecord, InteractionRecord, Model};
use ripple::stats::{average_outcome, bucket_distribution, co_action_histogram, Summary};
use ripple::ModelError;

#[test]
fn average_of_empty_outcomes_is_error_not_nan() {
    assert_eq!(average_outcome(&[]), Err(ModelError::EmptyInput));
    assert_eq!(Summary::from_outcomes(&[]), Err(ModelError::EmptyInput));
}

#[test]
fn average_of_single_outcome() {
    assert!((average_outcome(&[7]).unwrap() - 7.0).abs() < f64::EPSILON);
}

#[test]
fn average_of_zeros_is_zero() {
    assert_eq!(average_outcome(&[0, 0, 0]).unwrap(), 0.0);
}

#[test]
fn each_boundary_value_opens_its_own_bucket() {
    let outcomes = [0, 1, 2, 3, 4, 5, 10, 15, 20, 100, 1000];
    let boundaries = [1, 2, 3, 4, 5, 10, 15, 20, 100, 1000];
    let counts = bucket_distribution(&outcomes, &boundaries).unwrap();
    assert_eq!(counts, vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
}

#[test]
fn value_five_lands_in_five_to_ten() {
    let counts = bucket_distribution(&[5], &DEFAULT_BOUNDARIES).unwrap();
    assert_eq!(counts[5], 1);
    assert_eq!(counts.iter().sum::<usize>(), 1);
}

#[test]
fn large_values_land_in_final_bucket() {
    let counts = bucket_distribution(&[1001, 50_000], &DEFAULT_BOUNDARIES).unwrap();
    assert_eq!(counts[10], 2);
}

#[test]
fn bucket_counts_preserve_total() {
    let outcomes: Vec<usize> = (0..500).map(|i| (i * 37) % 1200).collect();
    let counts = bucket_distribution(&outcomes, &DEFAULT_BOUNDARIES).unwrap();
    assert_eq!(counts.len(), DEFAULT_BOUNDARIES.len() + 1);
    assert_eq!(counts.iter().sum::<usize>(), outcomes.len());
}

#[test]
fn equal_boundaries_are_rejected() {
    assert_eq!(
        bucket_distribution(&[1, 2], &[1, 1]),
        Err(ModelError::UnorderedBoundaries { index: 1 })
    );
}

#[test]
fn descending_boundaries_are_rejected() {
    assert!(matches!(
        bucket_distribution(&[1, 2], &[10, 5, 1]),
        Err(ModelError::UnorderedBoundaries { .. })
    ));
}

#[test]
fn default_labels_line_up_with_buckets() {
    let labels = bucket_labels(&DEFAULT_BOUNDARIES);
    assert_eq!(labels.len(), DEFAULT_BOUNDARIES.len() + 1);
    assert_eq!(labels[0], "< 1");
    assert_eq!(labels[5], "5-9");
    assert_eq!(labels[10], ">= 1000");
}

// ============================================================
// Co-action ratios
// ============================================================

#[test]
fn co_action_ratios_on_worked_example() {
    let activity = [(1, 10), (2, 20), (3, 30), (4, 40)]
        .into_iter()
        .map(|(user_id, avg_daily_retweets)| ActivityRecord {
            user_id,
            avg_daily_retweets,
        });
    let edges = [
        (1, 2, 1),
        (1, 3, 2),
        (1, 4, 2),
        (2, 1, 3),
        (2, 4, 7),
        (3, 4, 1),
        (3, 2, 1),
        (4, 1, 1),
        (4, 2, 2),
        (4, 3, 1),
    ];
    let interactions = edges
        .into_iter()
        .map(|(reposter_id, origin_id, retweet_count)| InteractionRecord {
            reposter_id,
            origin_id,
            retweet_count,
        });
    let (model, _) = Model::build(activity, interactions).unwrap();

    let hist = co_action_histogram(&model, 1.0).unwrap();
    // 1 -> 3 and 3 -> 2 have no reverse edge
    assert_eq!(hist.one_sided, 2);
    assert_eq!(hist.reciprocal(), 8);
    // smallest ratio is 4 reposting 2 twice against 2 reposting 4 seven times
    assert!((hist.ratios.start - 2.0 / 7.0).abs() < 1e-9);
    assert_eq!(hist.ratios.counts, vec![5, 1, 1, 1]);
}
