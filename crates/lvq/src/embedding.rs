//! The embedding surface: the minimal, handle-based command set a host
//! scripting environment would call (`spec.md` §4.6).
//!
//! This module is the in-process Rust shape of that contract — an
//! `Engine` holding opaque handles to codebooks and evaluation results.
//! A PyO3 (or other FFI) crate is the natural next layer on top of this,
//! translating host calls 1:1 onto `Engine` methods exactly as
//! `rank-learn-python` wraps `rank_learn::lambdarank`; building that layer
//! is out of scope here (`spec.md` §1).

use std::collections::HashMap;
use std::path::Path;

use crate::codebook::Codebook;
use crate::error::{LvqError, LvqResult};
use crate::evaluator::{self, ClusterErrorAccumulator, ConfusionMatrix};
use crate::persistence;
use crate::trainer::{self, EpochReport, LabeledSample, TrainConfig};

/// Opaque reference to a codebook owned by an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(u64);

/// Opaque reference to a classification-evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifierStatsHandle(u64);

/// Opaque reference to a clustering-evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusteringStatsHandle(u64);

/// Either a labeled or unlabeled sample set, for the legacy auto-dispatch
/// `train` entry point (`spec.md` §9: "the embedding layer [classifies]
/// the input before dispatch").
pub enum SampleSet {
    Labeled(Vec<LabeledSample>),
    Unlabeled(Vec<Vec<f64>>),
}

/// The host-facing engine. Owns every codebook and evaluation result
/// handed out through this module; handles borrow nothing from the
/// caller.
#[derive(Default)]
pub struct Engine {
    codebooks: HashMap<u64, Codebook>,
    classifier_stats: HashMap<u64, ConfusionMatrix>,
    clustering_stats: HashMap<u64, ClusterErrorAccumulator>,
    next_id: u64,
}

impl Engine {
    /// A fresh engine with no codebooks or results.
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn codebook(&self, handle: EngineHandle) -> LvqResult<&Codebook> {
        self.codebooks
            .get(&handle.0)
            .ok_or_else(|| LvqError::Value(format!("unknown codebook handle {}", handle.0)))
    }

    fn codebook_mut(&mut self, handle: EngineHandle) -> LvqResult<&mut Codebook> {
        self.codebooks
            .get_mut(&handle.0)
            .ok_or_else(|| LvqError::Value(format!("unknown codebook handle {}", handle.0)))
    }

    /// `new(D, N)` → handle.
    pub fn new_codebook(&mut self, dim: usize, n: usize) -> LvqResult<EngineHandle> {
        let codebook = Codebook::new(dim, n)?;
        let id = self.fresh_id();
        self.codebooks.insert(id, codebook);
        Ok(EngineHandle(id))
    }

    /// `set(handle, vector, i)`.
    pub fn set(&mut self, handle: EngineHandle, vector: &[f64], i: usize) -> LvqResult<()> {
        self.codebook_mut(handle)?.set(vector, i)
    }

    /// `set_random(handle)`.
    pub fn set_random(&mut self, handle: EngineHandle, seed: Option<u64>) -> LvqResult<()> {
        self.codebook_mut(handle)?.set_random(seed);
        Ok(())
    }

    /// `get(handle, i)` → vector.
    pub fn get(&self, handle: EngineHandle, i: usize) -> LvqResult<Vec<f64>> {
        self.codebook(handle)?.get(i)
    }

    /// `classify(handle, vector)` → integer.
    pub fn classify(&self, handle: EngineHandle, vector: &[f64]) -> LvqResult<usize> {
        self.codebook(handle)?.classify(vector)
    }

    /// `best(handle, vector, k?)` → list of (integer, float).
    pub fn best(
        &self,
        handle: EngineHandle,
        vector: &[f64],
        k: Option<usize>,
    ) -> LvqResult<Vec<(usize, f64)>> {
        self.codebook(handle)?.best(vector, k)
    }

    /// `train_supervised(handle, samples, E?, W?, M?)`.
    pub fn train_supervised(
        &mut self,
        handle: EngineHandle,
        samples: &[LabeledSample],
        config: &TrainConfig,
    ) -> LvqResult<EpochReport> {
        trainer::train_supervised(self.codebook_mut(handle)?, samples, config)
    }

    /// `train_unsupervised(handle, samples, E?, W?, M?)`.
    pub fn train_unsupervised(
        &mut self,
        handle: EngineHandle,
        samples: &[Vec<f64>],
        config: &TrainConfig,
    ) -> LvqResult<EpochReport> {
        trainer::train_unsupervised(self.codebook_mut(handle)?, samples, config)
    }

    /// `train(handle, samples, ...)` — legacy convenience that dispatches
    /// to supervised or unsupervised training based on the sample shape.
    /// Zero samples is a no-op in either variant.
    pub fn train(
        &mut self,
        handle: EngineHandle,
        samples: SampleSet,
        config: &TrainConfig,
    ) -> LvqResult<EpochReport> {
        match samples {
            SampleSet::Labeled(s) => self.train_supervised(handle, &s, config),
            SampleSet::Unlabeled(s) => self.train_unsupervised(handle, &s, config),
        }
    }

    /// `test_classifier(handle, samples)` → classification-stats handle.
    pub fn test_classifier(
        &mut self,
        handle: EngineHandle,
        samples: &[LabeledSample],
    ) -> LvqResult<ClassifierStatsHandle> {
        let matrix = evaluator::evaluate_classification(self.codebook(handle)?, samples)?;
        let id = self.fresh_id();
        self.classifier_stats.insert(id, matrix);
        Ok(ClassifierStatsHandle(id))
    }

    /// `test_clustering(handle, samples)` → clustering-stats handle.
    pub fn test_clustering(
        &mut self,
        handle: EngineHandle,
        samples: &[Vec<f64>],
    ) -> LvqResult<ClusteringStatsHandle> {
        let acc = evaluator::evaluate_clustering(self.codebook(handle)?, samples)?;
        let id = self.fresh_id();
        self.clustering_stats.insert(id, acc);
        Ok(ClusteringStatsHandle(id))
    }

    /// Look up a previously produced classification result.
    pub fn classifier_stats(&self, handle: ClassifierStatsHandle) -> LvqResult<&ConfusionMatrix> {
        self.classifier_stats
            .get(&handle.0)
            .ok_or_else(|| LvqError::Value(format!("unknown classifier-stats handle {}", handle.0)))
    }

    /// Look up a previously produced clustering result.
    pub fn clustering_stats(
        &self,
        handle: ClusteringStatsHandle,
    ) -> LvqResult<&ClusterErrorAccumulator> {
        self.clustering_stats
            .get(&handle.0)
            .ok_or_else(|| LvqError::Value(format!("unknown clustering-stats handle {}", handle.0)))
    }

    /// `store(handle, path)`.
    pub fn store(&self, handle: EngineHandle, path: &Path) -> LvqResult<()> {
        let codebook = self.codebook(handle)?;
        let bytes = persistence::store(codebook)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// `load(path)` → handle.
    pub fn load(&mut self, path: &Path) -> LvqResult<EngineHandle> {
        let bytes = std::fs::read(path)?;
        let codebook = persistence::load(&bytes)?;
        let id = self.fresh_id();
        self.codebooks.insert(id, codebook);
        Ok(EngineHandle(id))
    }

    /// Drop a codebook handle, freeing its memory.
    pub fn close(&mut self, handle: EngineHandle) {
        self.codebooks.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_get_set_roundtrip() {
        let mut engine = Engine::new();
        let h = engine.new_codebook(2, 2).unwrap();
        engine.set(h, &[1.0, 2.0], 0).unwrap();
        assert_eq!(engine.get(h, 0).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let mut engine = Engine::new();
        let h = engine.new_codebook(2, 2).unwrap();
        engine.close(h);
        assert!(engine.get(h, 0).is_err());
    }

    #[test]
    fn legacy_train_dispatches_by_shape() {
        let mut engine = Engine::new();
        let h = engine.new_codebook(2, 2).unwrap();
        engine.set_random(h, Some(1)).unwrap();
        let report = engine
            .train(h, SampleSet::Unlabeled(vec![]), &TrainConfig::default())
            .unwrap();
        assert_eq!(report.epochs_run, 0);
    }

    #[test]
    fn classifier_stats_roundtrip() {
        let mut engine = Engine::new();
        let h = engine.new_codebook(2, 2).unwrap();
        engine.set(h, &[0.0, 0.0], 0).unwrap();
        engine.set(h, &[1.0, 1.0], 1).unwrap();
        let samples = vec![
            LabeledSample::new(vec![0.0, 0.0], 0),
            LabeledSample::new(vec![1.0, 1.0], 1),
        ];
        let stats = engine.test_classifier(h, &samples).unwrap();
        assert_eq!(engine.classifier_stats(stats).unwrap().accuracy(), 1.0);
    }

    #[test]
    fn store_and_load_through_a_temp_file() {
        let mut engine = Engine::new();
        let h = engine.new_codebook(2, 2).unwrap();
        engine.set(h, &[1.0, 2.0], 0).unwrap();
        engine.set(h, &[3.0, 4.0], 1).unwrap();

        let dir = std::env::temp_dir();
        let path = dir.join(format!("lvq-embedding-test-{}.bin", std::process::id()));
        engine.store(h, &path).unwrap();
        let loaded = engine.load(&path).unwrap();
        assert_eq!(engine.get(loaded, 0).unwrap(), vec![1.0, 2.0]);
        let _ = std::fs::remove_file(&path);
    }
}
