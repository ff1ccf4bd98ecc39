//! Basic usage examples for lvq.
//!
//! Demonstrates supervised classification, unsupervised clustering, and
//! persistence.

use lvq::prelude::*;

fn main() {
    println!("=== Basic lvq Examples ===\n");

    // Example 1: supervised classification
    println!("1. Supervised training:");
    let mut classifier = Codebook::new(3, 6).unwrap();
    classifier.set_random(Some(42));

    let train_set = vec![
        LabeledSample::new(vec![1.0, 0.0, 0.0], 0),
        LabeledSample::new(vec![0.0, 1.0, 0.0], 1),
        LabeledSample::new(vec![0.0, 0.0, 1.0], 2),
        LabeledSample::new(vec![1.0, 1.0, 0.0], 3),
        LabeledSample::new(vec![1.0, 0.0, 1.0], 4),
        LabeledSample::new(vec![1.0, 1.0, 1.0], 5),
    ];
    let config = TrainConfig {
        seed: Some(42),
        epochs: 5,
        window: 3,
        max_iter: 1000,
        alpha0: 0.1,
    };
    let report = train_supervised(&mut classifier, &train_set, &config).unwrap();
    println!(
        "   ran {} epochs, final error rate {:.4}",
        report.epochs_run, report.final_error_rate
    );

    for sample in &train_set {
        let predicted = classifier.classify(&sample.x).unwrap();
        println!("   {:?} classified as {} (expected {})", sample.x, predicted, sample.y);
    }

    // Example 2: weighted retrieval
    println!("\n2. Weighted nearest-prototype retrieval:");
    let query = vec![0.75, 0.2, 0.05];
    for (index, weight) in classifier.best(&query, Some(3)).unwrap() {
        println!("   prototype {}: weight {:.4}", index, weight);
    }

    // Example 3: unsupervised clustering
    println!("\n3. Unsupervised training:");
    let mut quantizer = Codebook::new(2, 3).unwrap();
    quantizer.set_random(Some(7));
    let cloud: Vec<Vec<f64>> = (0..30)
        .map(|i| match i % 3 {
            0 => vec![0.0, 0.0],
            1 => vec![5.0, 0.0],
            _ => vec![0.0, 5.0],
        })
        .collect();
    train_unsupervised(&mut quantizer, &cloud, &config).unwrap();
    let stats = lvq::evaluator::evaluate_clustering(&quantizer, &cloud).unwrap();
    println!("   overall RMS quantization error: {:.4}", stats.overall_avg_error());

    // Example 4: persistence
    println!("\n4. Persistence:");
    let bytes = lvq::persistence::store(&classifier).unwrap();
    println!("   serialized to {} bytes", bytes.len());
    let restored = lvq::persistence::load(&bytes).unwrap();
    println!(
        "   restored classifier agrees on first sample: {}",
        restored.classify(&train_set[0].x).unwrap() == classifier.classify(&train_set[0].x).unwrap()
    );

    println!("\n=== Basic Examples Complete ===");
}
