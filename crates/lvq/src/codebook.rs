//! The codebook: an ordered collection of prototypes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LvqError, LvqResult};
use crate::vector::{all_finite, dist, dist2};

/// An ordered collection of `N` prototypes in `D` dimensions.
///
/// Prototype storage is a single flat row-major `Vec<f64>` of length
/// `N * D` (prototype-major, matching the on-disk layout in
/// [`crate::persistence`]), not `Vec<Vec<f64>>` — this mirrors
/// `KMeansTreeIndex`'s flat vector store and means lookups never touch more
/// than one allocation.
#[derive(Debug, Clone)]
pub struct Codebook {
    dim: usize,
    n: usize,
    prototypes: Vec<f64>,
    labels: Vec<Option<u32>>,
}

impl Codebook {
    /// Create a codebook with `n` prototypes of dimension `dim`.
    ///
    /// Prototype contents are implementation-defined but finite (zeros).
    /// Callers must follow up with [`Codebook::set_random`] or
    /// [`Codebook::set`] to give prototypes meaningful positions.
    pub fn new(dim: usize, n: usize) -> LvqResult<Self> {
        if dim == 0 {
            return Err(LvqError::Value("dimension must be >= 1".to_string()));
        }
        if n == 0 {
            return Err(LvqError::Value("prototype count must be >= 1".to_string()));
        }
        Ok(Self {
            dim,
            n,
            prototypes: vec![0.0; dim * n],
            labels: vec![None; n],
        })
    }

    /// Dimension `D` of every prototype.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of prototypes `N`.
    pub fn n(&self) -> usize {
        self.n
    }

    fn slot(&self, i: usize) -> &[f64] {
        let start = i * self.dim;
        &self.prototypes[start..start + self.dim]
    }

    fn slot_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.dim;
        &mut self.prototypes[start..start + self.dim]
    }

    fn check_index(&self, i: usize) -> LvqResult<()> {
        if i >= self.n {
            return Err(LvqError::IndexOutOfRange {
                index: i,
                bound: self.n,
            });
        }
        Ok(())
    }

    fn check_vector(&self, v: &[f64], context: &'static str) -> LvqResult<()> {
        if v.len() != self.dim {
            return Err(LvqError::Shape {
                expected: self.dim,
                actual: v.len(),
                context,
            });
        }
        if !all_finite(v) {
            return Err(LvqError::Value(format!(
                "{}: vector contains a non-finite component",
                context
            )));
        }
        Ok(())
    }

    /// Set each prototype component to an independent uniform sample in
    /// `[0, 1)`, seeded with `seed` for reproducibility. When `seed` is
    /// `None`, a time-derived seed is used (non-reproducible, as noted in
    /// `spec.md` §9).
    pub fn set_random(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(time_derived_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        for x in self.prototypes.iter_mut() {
            *x = rng.gen_range(0.0..1.0);
        }
    }

    /// Place `vector` into slot `i`.
    pub fn set(&mut self, vector: &[f64], i: usize) -> LvqResult<()> {
        self.check_index(i)?;
        self.check_vector(vector, "Codebook::set")?;
        self.slot_mut(i).copy_from_slice(vector);
        Ok(())
    }

    /// A copy of prototype `i`.
    pub fn get(&self, i: usize) -> LvqResult<Vec<f64>> {
        self.check_index(i)?;
        Ok(self.slot(i).to_vec())
    }

    /// The class label of prototype `i`, if any.
    pub fn label(&self, i: usize) -> LvqResult<Option<u32>> {
        self.check_index(i)?;
        Ok(self.labels[i])
    }

    /// Assign a class label to prototype `i`.
    pub fn set_label(&mut self, i: usize, label: Option<u32>) -> LvqResult<()> {
        self.check_index(i)?;
        self.labels[i] = label;
        Ok(())
    }

    /// All labels, indexed by prototype.
    pub fn labels(&self) -> &[Option<u32>] {
        &self.labels
    }

    pub(crate) fn prototype_slice(&self, i: usize) -> &[f64] {
        self.slot(i)
    }

    pub(crate) fn prototype_slice_mut(&mut self, i: usize) -> &mut [f64] {
        self.slot_mut(i)
    }

    /// Index of the prototype nearest to `x` under squared Euclidean
    /// distance. Ties are broken by the smaller index.
    pub fn classify(&self, x: &[f64]) -> LvqResult<usize> {
        self.check_vector(x, "Codebook::classify")?;
        let mut best = 0usize;
        let mut best_d2 = dist2(self.slot(0), x);
        for i in 1..self.n {
            let d2 = dist2(self.slot(i), x);
            if d2 < best_d2 {
                best_d2 = d2;
                best = i;
            }
        }
        Ok(best)
    }

    /// The `k` nearest prototypes to `x`, sorted ascending by distance,
    /// paired with an inverse-distance similarity weight. `k` defaults to
    /// `N` when `None`.
    ///
    /// If any of the `k` chosen distances is exactly zero, every
    /// zero-distance prototype among them is weighted `1 / zero_count` and
    /// every other chosen prototype is weighted `0.0` — the full `k`-element,
    /// distance-ordered list is still returned.
    pub fn best(&self, x: &[f64], k: Option<usize>) -> LvqResult<Vec<(usize, f64)>> {
        self.check_vector(x, "Codebook::best")?;
        let k = k.unwrap_or(self.n).min(self.n);
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut distances: Vec<(usize, f64)> = (0..self.n)
            .map(|i| (i, dist(self.slot(i), x)))
            .collect();
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        distances.truncate(k);

        let zero_count = distances.iter().filter(|(_, d)| *d == 0.0).count();
        if zero_count > 0 {
            let w = 1.0 / zero_count as f64;
            return Ok(distances
                .into_iter()
                .map(|(i, d)| (i, if d == 0.0 { w } else { 0.0 }))
                .collect());
        }

        let inv_sum: f64 = distances.iter().map(|(_, d)| 1.0 / d).sum();
        Ok(distances
            .into_iter()
            .map(|(i, d)| (i, (1.0 / d) / inv_sum))
            .collect())
    }
}

/// A seed derived from the current time, for callers that don't need
/// reproducibility. Not suitable for tests or anything requiring
/// determinism — see `spec.md` §5 "Determinism".
fn time_derived_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
