//! Edge case tests for lvq.

use lvq::prelude::*;

#[test]
fn codebook_rejects_zero_dimension() {
    assert!(Codebook::new(0, 3).is_err());
}

#[test]
fn codebook_rejects_zero_prototypes() {
    assert!(Codebook::new(3, 0).is_err());
}

#[test]
fn classify_rejects_wrong_length_vector() {
    let cb = Codebook::new(3, 2).unwrap();
    let result = cb.classify(&[1.0, 2.0]);
    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), LvqError::Shape { expected: 3, actual: 2, .. }));
}

#[test]
fn best_with_k_zero_returns_empty() {
    let mut cb = Codebook::new(2, 3).unwrap();
    cb.set_random(Some(1));
    let result = cb.best(&[0.0, 0.0], Some(0)).unwrap();
    assert!(result.is_empty());
}

#[test]
fn best_with_k_larger_than_n_clamps_to_n() {
    let mut cb = Codebook::new(2, 3).unwrap();
    cb.set_random(Some(1));
    let result = cb.best(&[0.0, 0.0], Some(100)).unwrap();
    assert_eq!(result.len(), 3);
}

#[test]
fn set_rejects_nan_component() {
    let mut cb = Codebook::new(2, 1).unwrap();
    let result = cb.set(&[1.0, f64::NAN], 0);
    assert!(matches!(result, Err(LvqError::Value(_))));
}

#[test]
fn set_label_rejects_out_of_range_index() {
    let mut cb = Codebook::new(2, 2).unwrap();
    assert!(matches!(
        cb.set_label(9, Some(0)),
        Err(LvqError::IndexOutOfRange { .. })
    ));
}

#[test]
fn train_supervised_empty_samples_is_noop() {
    let mut cb = Codebook::new(3, 3).unwrap();
    cb.set_random(Some(1));
    let before = cb.get(0).unwrap();
    let report = train_supervised(&mut cb, &[], &TrainConfig::default()).unwrap();
    assert_eq!(report.epochs_run, 0);
    assert_eq!(report.updates_applied, 0);
    assert_eq!(cb.get(0).unwrap(), before);
}

#[test]
fn train_supervised_rejects_dimension_mismatch_without_mutating() {
    let mut cb = Codebook::new(3, 2).unwrap();
    cb.set(&[0.0, 0.0, 0.0], 0).unwrap();
    cb.set(&[1.0, 1.0, 1.0], 1).unwrap();
    let before = (cb.get(0).unwrap(), cb.get(1).unwrap());

    let samples = vec![LabeledSample::new(vec![1.0, 2.0], 0)];
    let config = TrainConfig { seed: Some(1), ..Default::default() };
    assert!(train_supervised(&mut cb, &samples, &config).is_err());

    assert_eq!((cb.get(0).unwrap(), cb.get(1).unwrap()), before);
}

#[test]
fn train_unsupervised_rejects_out_of_range_label_implicitly_via_shape() {
    let mut cb = Codebook::new(2, 2).unwrap();
    let samples = vec![vec![1.0, 2.0, 3.0]];
    let config = TrainConfig { seed: Some(1), ..Default::default() };
    assert!(train_unsupervised(&mut cb, &samples, &config).is_err());
}

#[test]
fn evaluate_classification_on_empty_set_has_zero_accuracy() {
    let mut cb = Codebook::new(2, 2).unwrap();
    cb.set_random(Some(1));
    let matrix = lvq::evaluator::evaluate_classification(&cb, &[]).unwrap();
    assert_eq!(matrix.total(), 0);
    assert_eq!(matrix.accuracy(), 0.0);
}

#[test]
fn persistence_rejects_corrupted_header() {
    let mut cb = Codebook::new(2, 2).unwrap();
    cb.set_random(Some(1));
    let mut bytes = lvq::persistence::store(&cb).unwrap();
    bytes.truncate(2);
    assert!(matches!(
        lvq::persistence::load(&bytes),
        Err(LvqError::Format { .. })
    ));
}

#[test]
fn train_supervised_with_zero_window_runs_to_completion() {
    let mut cb = Codebook::new(2, 2).unwrap();
    cb.set_random(Some(1));
    let samples = vec![
        LabeledSample::new(vec![0.0, 0.0], 0),
        LabeledSample::new(vec![1.0, 1.0], 1),
    ];
    let config = TrainConfig {
        seed: Some(1),
        window: 0,
        epochs: 4,
        ..Default::default()
    };
    let report = train_supervised(&mut cb, &samples, &config).unwrap();
    assert_eq!(report.epochs_run, 4);
    assert!(!report.stopped_early);
}

#[test]
fn engine_rejects_operations_on_closed_handle() {
    let mut engine = Engine::new();
    let h = engine.new_codebook(2, 2).unwrap();
    engine.close(h);
    assert!(engine.classify(h, &[0.0, 0.0]).is_err());
    assert!(engine.set(h, &[0.0, 0.0], 0).is_err());
}
