//! Classification and clustering evaluation statistics.

use crate::codebook::Codebook;
use crate::error::{LvqError, LvqResult};
use crate::trainer::LabeledSample;
use crate::vector::dist;

/// An `N x N` confusion matrix accumulated from a labeled test set.
/// `matrix[expected * n + predicted]` is a sample count.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    n: usize,
    matrix: Vec<u64>,
}

impl ConfusionMatrix {
    fn new(n: usize) -> Self {
        Self {
            n,
            matrix: vec![0; n * n],
        }
    }

    fn record(&mut self, expected: usize, predicted: usize) {
        self.matrix[expected * self.n + predicted] += 1;
    }

    fn at(&self, expected: usize, predicted: usize) -> u64 {
        self.matrix[expected * self.n + predicted]
    }

    /// Number of classes (== the codebook's prototype count).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of evaluated samples.
    pub fn total(&self) -> u64 {
        self.matrix.iter().sum()
    }

    /// `Σ M[i][i] / Σ M[i][j]`; `0.0` if no samples were evaluated.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: u64 = (0..self.n).map(|i| self.at(i, i)).sum();
        correct as f64 / total as f64
    }

    /// `M[c][c] / Σ_i M[i][c]`; `0.0` if the column sum is zero.
    pub fn precision(&self, c: usize) -> f64 {
        let col_sum: u64 = (0..self.n).map(|i| self.at(i, c)).sum();
        if col_sum == 0 {
            return 0.0;
        }
        self.at(c, c) as f64 / col_sum as f64
    }

    /// `M[c][c] / Σ_j M[c][j]`; `0.0` if the row sum is zero.
    pub fn recall(&self, c: usize) -> f64 {
        let row_sum: u64 = (0..self.n).map(|j| self.at(c, j)).sum();
        if row_sum == 0 {
            return 0.0;
        }
        self.at(c, c) as f64 / row_sum as f64
    }

    /// Weighted harmonic mean of precision and recall for class `c`.
    /// `0.0` if `β²·precision + recall == 0`.
    pub fn f_beta(&self, c: usize, beta: f64) -> f64 {
        let p = self.precision(c);
        let r = self.recall(c);
        let denom = beta * beta * p + r;
        if denom == 0.0 {
            return 0.0;
        }
        (1.0 + beta * beta) * p * r / denom
    }

    /// `F_β(c)` with `β = 1`.
    pub fn f1(&self, c: usize) -> f64 {
        self.f_beta(c, 1.0)
    }

    /// Macro average of `F_β(c)` over all classes `c ∈ [0, N)`, including
    /// zero terms for classes with no support (fixed in `spec.md` §9).
    pub fn macro_f_beta(&self, beta: f64) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        let sum: f64 = (0..self.n).map(|c| self.f_beta(c, beta)).sum();
        sum / self.n as f64
    }

    /// Macro-averaged `F_1`.
    pub fn macro_f1(&self) -> f64 {
        self.macro_f_beta(1.0)
    }
}

/// Per-cluster `(count, sum of squared distances)` accumulated from an
/// unlabeled sample set.
#[derive(Debug, Clone)]
pub struct ClusterErrorAccumulator {
    counts: Vec<u64>,
    sum_sq: Vec<f64>,
}

impl ClusterErrorAccumulator {
    fn new(n: usize) -> Self {
        Self {
            counts: vec![0; n],
            sum_sq: vec![0.0; n],
        }
    }

    fn record(&mut self, cluster: usize, sq_dist: f64) {
        self.counts[cluster] += 1;
        self.sum_sq[cluster] += sq_dist;
    }

    /// Number of samples assigned to cluster `i`.
    pub fn count(&self, i: usize) -> u64 {
        self.counts[i]
    }

    /// Root-mean-square distance from cluster `i`'s assigned samples to
    /// its prototype; `0.0` if no samples were assigned.
    pub fn avg_error(&self, i: usize) -> f64 {
        if self.counts[i] == 0 {
            return 0.0;
        }
        (self.sum_sq[i] / self.counts[i] as f64).sqrt()
    }

    /// Overall root-mean-square distance across all clusters; `0.0` if no
    /// samples were evaluated.
    pub fn overall_avg_error(&self) -> f64 {
        let total_count: u64 = self.counts.iter().sum();
        if total_count == 0 {
            return 0.0;
        }
        let total_sq: f64 = self.sum_sq.iter().sum();
        (total_sq / total_count as f64).sqrt()
    }
}

/// Classify every sample in `samples` against `codebook` and accumulate a
/// confusion matrix. `y` must lie in `[0, codebook.n())`.
pub fn evaluate_classification(
    codebook: &Codebook,
    samples: &[LabeledSample],
) -> LvqResult<ConfusionMatrix> {
    let mut matrix = ConfusionMatrix::new(codebook.n());
    for sample in samples {
        if sample.y as usize >= codebook.n() {
            return Err(LvqError::Value(format!(
                "label {} is out of range for {} prototypes",
                sample.y,
                codebook.n()
            )));
        }
        let predicted = codebook.classify(&sample.x)?;
        matrix.record(sample.y as usize, predicted);
    }
    Ok(matrix)
}

/// Classify every sample in `samples` against `codebook` and accumulate
/// per-cluster squared-error sums.
pub fn evaluate_clustering(
    codebook: &Codebook,
    samples: &[Vec<f64>],
) -> LvqResult<ClusterErrorAccumulator> {
    let mut acc = ClusterErrorAccumulator::new(codebook.n());
    for x in samples {
        let w = codebook.classify(x)?;
        let d = dist(codebook.prototype_slice(w), x);
        acc.record(w, d * d);
    }
    Ok(acc)
}
