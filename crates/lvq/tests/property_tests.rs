//! Property-based tests for lvq.

use lvq::prelude::*;
use proptest::prelude::*;

fn arb_codebook(dim: usize, n: usize, seed: u64) -> Codebook {
    let mut cb = Codebook::new(dim, n).unwrap();
    cb.set_random(Some(seed));
    cb
}

proptest! {
    #[test]
    fn classify_always_returns_an_in_range_index(
        dim in 1usize..6,
        n in 1usize..8,
        seed in any::<u64>(),
        x in prop::collection::vec(-10.0f64..10.0, 1..6),
    ) {
        prop_assume!(x.len() == dim);
        let cb = arb_codebook(dim, n, seed);
        let predicted = cb.classify(&x).unwrap();
        prop_assert!(predicted < n);
    }

    #[test]
    fn best_weights_are_nonnegative_and_sum_to_one(
        dim in 1usize..5,
        n in 1usize..6,
        seed in any::<u64>(),
        x in prop::collection::vec(-10.0f64..10.0, 1..5),
    ) {
        prop_assume!(x.len() == dim);
        let cb = arb_codebook(dim, n, seed);
        let result = cb.best(&x, None).unwrap();
        let total: f64 = result.iter().map(|(_, w)| w).sum();
        prop_assert!(result.iter().all(|(_, w)| *w >= 0.0));
        prop_assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn best_is_sorted_ascending_by_distance(
        dim in 1usize..5,
        n in 2usize..6,
        seed in any::<u64>(),
        x in prop::collection::vec(-10.0f64..10.0, 1..5),
    ) {
        prop_assume!(x.len() == dim);
        let cb = arb_codebook(dim, n, seed);
        let result = cb.best(&x, None).unwrap();
        let distances: Vec<f64> = result
            .iter()
            .map(|(i, _)| lvq::vector::dist(&cb.get(*i).unwrap(), &x))
            .collect();
        for pair in distances.windows(2) {
            prop_assert!(pair[0] <= pair[1] + 1e-9);
        }
    }

    #[test]
    fn persistence_round_trips_any_codebook(
        dim in 1usize..5,
        n in 1usize..6,
        seed in any::<u64>(),
    ) {
        let cb = arb_codebook(dim, n, seed);
        let bytes = lvq::persistence::store(&cb).unwrap();
        let loaded = lvq::persistence::load(&bytes).unwrap();
        prop_assert_eq!(loaded.dim(), cb.dim());
        prop_assert_eq!(loaded.n(), cb.n());
        for i in 0..n {
            prop_assert_eq!(loaded.get(i).unwrap(), cb.get(i).unwrap());
        }
    }

    #[test]
    fn confusion_matrix_total_equals_sample_count(
        n_classes in 1usize..5,
        labels in prop::collection::vec(0u32..4, 1..20),
    ) {
        let labels: Vec<u32> = labels.into_iter().map(|l| l % n_classes as u32).collect();
        let mut cb = Codebook::new(2, n_classes).unwrap();
        for i in 0..n_classes {
            cb.set(&[i as f64, 0.0], i).unwrap();
            cb.set_label(i, Some(i as u32)).unwrap();
        }
        let samples: Vec<LabeledSample> = labels
            .iter()
            .map(|&y| LabeledSample::new(vec![y as f64, 0.0], y))
            .collect();
        let matrix = lvq::evaluator::evaluate_classification(&cb, &samples).unwrap();
        prop_assert_eq!(matrix.total(), samples.len() as u64);
    }

    #[test]
    fn f1_is_symmetric_in_precision_and_recall(
        tp in 0u64..50,
        fp in 0u64..50,
        fn_ in 0u64..50,
    ) {
        let mut cb = Codebook::new(1, 2).unwrap();
        cb.set(&[0.0], 0).unwrap();
        cb.set(&[1.0], 1).unwrap();
        cb.set_label(0, Some(0)).unwrap();
        cb.set_label(1, Some(1)).unwrap();

        let mut samples = Vec::new();
        for _ in 0..tp {
            samples.push(LabeledSample::new(vec![0.0], 0));
        }
        for _ in 0..fp {
            samples.push(LabeledSample::new(vec![1.0], 0));
        }
        for _ in 0..fn_ {
            samples.push(LabeledSample::new(vec![0.0], 1));
        }
        let matrix = lvq::evaluator::evaluate_classification(&cb, &samples).unwrap();
        let p = matrix.precision(0);
        let r = matrix.recall(0);
        let expected = if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) };
        prop_assert!((matrix.f1(0) - expected).abs() < 1e-9);
    }
}
