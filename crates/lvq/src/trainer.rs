//! Supervised (LVQ1) and unsupervised (competitive learning) training.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::codebook::Codebook;
use crate::error::{LvqError, LvqResult};
use crate::vector::{add_scaled, all_finite, scale, sub_scaled};

/// A labeled training sample: a vector and its ground-truth class.
#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub x: Vec<f64>,
    pub y: u32,
}

impl LabeledSample {
    pub fn new(x: Vec<f64>, y: u32) -> Self {
        Self { x, y }
    }
}

/// Training configuration shared by supervised and unsupervised training.
///
/// Mirrors the `LambdaRankParams`/`RankingSVMParams` shape: a plain `Copy`-
/// ish struct with a documented `Default`.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Maximum number of full shuffled passes over the sample set.
    pub epochs: usize,
    /// Number of trailing epochs compared for the early-stopping check.
    pub window: usize,
    /// Hard cap on the cumulative number of per-sample updates.
    pub max_iter: usize,
    /// Initial learning rate `α₀`; resets every epoch per the per-epoch
    /// schedule `α(t) = α₀ · (1 − t/T)`.
    pub alpha0: f64,
    /// Seed for shuffling and (if used) random initialization. `None`
    /// derives a non-reproducible seed from the system clock.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 5,
            window: 3,
            max_iter: 1000,
            alpha0: 0.1,
            seed: None,
        }
    }
}

/// Outcome of a training call: the programmatic hook a caller uses in place
/// of log output (the crate has no logging dependency; see `SPEC_FULL.md`
/// §2 item 8).
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// Number of epochs actually run (may be less than `config.epochs`).
    pub epochs_run: usize,
    /// Training-set error rate after the last epoch run (`0.0` for
    /// unsupervised training, which has no classification error notion).
    pub final_error_rate: f64,
    /// Whether training stopped before exhausting `config.epochs`, because
    /// either the convergence window or `max_iter` triggered.
    pub stopped_early: bool,
    /// Cumulative number of per-sample prototype updates applied.
    pub updates_applied: usize,
}

impl EpochReport {
    fn noop() -> Self {
        Self {
            epochs_run: 0,
            final_error_rate: 0.0,
            stopped_early: false,
            updates_applied: 0,
        }
    }
}

/// `α(t) = α₀ · (1 − t/T)` for a zero-based sample index `t` within an
/// epoch of `total` samples.
fn learning_rate(alpha0: f64, t: usize, total: usize) -> f64 {
    alpha0 * (1.0 - t as f64 / total as f64)
}

/// Move `proto` toward (`attract = true`) or away from (`attract = false`)
/// `x` by `p ← p ± α·(x − p)`, without allocating a difference buffer:
/// `p ← p·(1∓α) ± α·x` is algebraically identical.
fn lvq_update(proto: &mut [f64], x: &[f64], alpha: f64, attract: bool) {
    if attract {
        scale(proto, 1.0 - alpha);
        add_scaled(proto, x, alpha);
    } else {
        scale(proto, 1.0 + alpha);
        sub_scaled(proto, x, alpha);
    }
}

fn deterministic_shuffle(len: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..len).collect();
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

fn time_derived_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn validate_labeled_epoch(codebook: &Codebook, samples: &[LabeledSample]) -> LvqResult<()> {
    for s in samples {
        if s.x.len() != codebook.dim() {
            return Err(LvqError::Shape {
                expected: codebook.dim(),
                actual: s.x.len(),
                context: "train_supervised",
            });
        }
        if !all_finite(&s.x) {
            return Err(LvqError::Value(
                "training sample contains a non-finite component".to_string(),
            ));
        }
        if s.y as usize >= codebook.n() {
            return Err(LvqError::Value(format!(
                "label {} is out of range for {} prototypes",
                s.y,
                codebook.n()
            )));
        }
    }
    Ok(())
}

fn validate_unlabeled_epoch(codebook: &Codebook, samples: &[Vec<f64>]) -> LvqResult<()> {
    for x in samples {
        if x.len() != codebook.dim() {
            return Err(LvqError::Shape {
                expected: codebook.dim(),
                actual: x.len(),
                context: "train_unsupervised",
            });
        }
        if !all_finite(x) {
            return Err(LvqError::Value(
                "training sample contains a non-finite component".to_string(),
            ));
        }
    }
    Ok(())
}

/// Assign `c_i = i mod N_classes` to every prototype, where `N_classes =
/// max(y) + 1` over the training set. Only applied when no prototype has an
/// explicit label yet, per `spec.md` §4.3 "Prototype labelling".
fn auto_label_if_unset(codebook: &mut Codebook, samples: &[LabeledSample]) -> LvqResult<()> {
    if codebook.labels().iter().any(|l| l.is_some()) {
        return Ok(());
    }
    let max_y = samples.iter().map(|s| s.y).max().unwrap_or(0);
    let n_classes = (max_y as usize) + 1;
    for i in 0..codebook.n() {
        codebook.set_label(i, Some((i % n_classes) as u32))?;
    }
    Ok(())
}

/// Train `codebook` with the supervised LVQ1 update rule.
///
/// The full sample set is validated (shape, finiteness, label range) before
/// prototype auto-labelling or any prototype mutation occurs, so a bad
/// sample leaves the codebook — including its labels — in its pre-call
/// state. Each epoch is re-validated before it mutates any prototype, so a
/// bad sample never leaves the codebook in a partially-updated state for
/// the epoch that discovered it; prior fully-completed epochs' updates are
/// unaffected.
pub fn train_supervised(
    codebook: &mut Codebook,
    samples: &[LabeledSample],
    config: &TrainConfig,
) -> LvqResult<EpochReport> {
    if samples.is_empty() {
        return Ok(EpochReport::noop());
    }

    validate_labeled_epoch(codebook, samples)?;
    auto_label_if_unset(codebook, samples)?;

    let base_seed = config.seed.unwrap_or_else(time_derived_seed);
    let mut window: VecDeque<f64> = VecDeque::with_capacity(config.window + 1);
    let mut updates_applied = 0usize;
    let mut epochs_run = 0usize;
    let mut stopped_early = false;
    let mut final_error_rate = training_error_rate(codebook, samples)?;

    for epoch in 0..config.epochs {
        validate_labeled_epoch(codebook, samples)?;

        if updates_applied >= config.max_iter {
            stopped_early = true;
            break;
        }

        let order = deterministic_shuffle(samples.len(), base_seed.wrapping_add(epoch as u64));
        let total = samples.len();
        for (t, &idx) in order.iter().enumerate() {
            if updates_applied >= config.max_iter {
                stopped_early = true;
                break;
            }
            let sample = &samples[idx];
            let alpha = learning_rate(config.alpha0, t, total);
            let w = codebook.classify(&sample.x)?;
            let attract = codebook.label(w)?.map(|c| c == sample.y).unwrap_or(false);
            lvq_update(codebook.prototype_slice_mut(w), &sample.x, alpha, attract);
            updates_applied += 1;
        }
        epochs_run += 1;

        let error_rate = training_error_rate(codebook, samples)?;
        final_error_rate = error_rate;
        window.push_back(error_rate);
        if window.len() > config.window {
            window.pop_front();
        }
        if config.window > 0 && window.len() == config.window {
            let improvement = window.front().unwrap() - window.back().unwrap();
            if improvement <= 1e-9 {
                stopped_early = true;
                break;
            }
        }

        if updates_applied >= config.max_iter {
            stopped_early = true;
            break;
        }
    }

    Ok(EpochReport {
        epochs_run,
        final_error_rate,
        stopped_early,
        updates_applied,
    })
}

/// Train `codebook` with the unsupervised competitive-learning update rule.
/// No label adjustment occurs.
pub fn train_unsupervised(
    codebook: &mut Codebook,
    samples: &[Vec<f64>],
    config: &TrainConfig,
) -> LvqResult<EpochReport> {
    if samples.is_empty() {
        return Ok(EpochReport::noop());
    }

    let base_seed = config.seed.unwrap_or_else(time_derived_seed);
    let mut window: VecDeque<f64> = VecDeque::with_capacity(config.window + 1);
    let mut updates_applied = 0usize;
    let mut epochs_run = 0usize;
    let mut stopped_early = false;
    let mut final_error_rate = mean_quantization_error(codebook, samples)?;

    for epoch in 0..config.epochs {
        validate_unlabeled_epoch(codebook, samples)?;

        if updates_applied >= config.max_iter {
            stopped_early = true;
            break;
        }

        let order = deterministic_shuffle(samples.len(), base_seed.wrapping_add(epoch as u64));
        let total = samples.len();
        for (t, &idx) in order.iter().enumerate() {
            if updates_applied >= config.max_iter {
                stopped_early = true;
                break;
            }
            let x = &samples[idx];
            let alpha = learning_rate(config.alpha0, t, total);
            let w = codebook.classify(x)?;
            lvq_update(codebook.prototype_slice_mut(w), x, alpha, true);
            updates_applied += 1;
        }
        epochs_run += 1;

        let error_rate = mean_quantization_error(codebook, samples)?;
        final_error_rate = error_rate;
        window.push_back(error_rate);
        if window.len() > config.window {
            window.pop_front();
        }
        if config.window > 0 && window.len() == config.window {
            let improvement = window.front().unwrap() - window.back().unwrap();
            if improvement <= 1e-9 {
                stopped_early = true;
                break;
            }
        }

        if updates_applied >= config.max_iter {
            stopped_early = true;
            break;
        }
    }

    Ok(EpochReport {
        epochs_run,
        final_error_rate,
        stopped_early,
        updates_applied,
    })
}

fn training_error_rate(codebook: &Codebook, samples: &[LabeledSample]) -> LvqResult<f64> {
    let mut correct = 0usize;
    for sample in samples {
        let w = codebook.classify(&sample.x)?;
        if codebook.label(w)?.map(|c| c == sample.y).unwrap_or(false) {
            correct += 1;
        }
    }
    Ok(1.0 - (correct as f64 / samples.len() as f64))
}

fn mean_quantization_error(codebook: &Codebook, samples: &[Vec<f64>]) -> LvqResult<f64> {
    let mut sum_sq = 0.0;
    for x in samples {
        let w = codebook.classify(x)?;
        let d = crate::vector::dist(codebook.prototype_slice(w), x);
        sum_sq += d * d;
    }
    Ok((sum_sq / samples.len() as f64).sqrt())
}
