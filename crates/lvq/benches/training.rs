//! Training throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lvq::{train_supervised, Codebook, LabeledSample, TrainConfig};

fn generate_samples(n: usize, dim: usize, classes: usize) -> Vec<LabeledSample> {
    (0..n)
        .map(|i| {
            let class = (i % classes) as u32;
            let x: Vec<f64> = (0..dim)
                .map(|d| (class as f64) + 0.01 * ((i * dim + d) % 7) as f64)
                .collect();
            LabeledSample::new(x, class)
        })
        .collect()
}

fn bench_train_supervised(c: &mut Criterion) {
    let mut group = c.benchmark_group("lvq_train_supervised");

    for n in [50, 200, 1000, 5000].iter() {
        let dim = 8;
        let classes = 4;
        let samples = generate_samples(*n, dim, classes);
        let config = TrainConfig {
            seed: Some(1),
            epochs: 3,
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("train_supervised", n), &samples, |b, s| {
            b.iter(|| {
                let mut cb = Codebook::new(dim, classes).unwrap();
                cb.set_random(Some(1));
                let _ = black_box(train_supervised(&mut cb, s, &config));
            })
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("lvq_classify");

    for n_prototypes in [4, 16, 64, 256].iter() {
        let dim = 16;
        let mut cb = Codebook::new(dim, *n_prototypes).unwrap();
        cb.set_random(Some(1));
        let x: Vec<f64> = (0..dim).map(|d| d as f64 * 0.1).collect();

        group.bench_with_input(
            BenchmarkId::new("classify", n_prototypes),
            &(cb, x),
            |b, (cb, x)| {
                b.iter(|| {
                    let _ = black_box(cb.classify(x));
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_train_supervised, bench_classify);
criterion_main!(benches);
