//! Learning Vector Quantization (LVQ).
//!
//! Prototype-based classification and clustering: a small set of labeled
//! or unlabeled reference vectors (a [`codebook::Codebook`]) is nudged
//! toward or away from training samples until nearest-prototype lookup
//! becomes a cheap, interpretable classifier or quantizer.
//!
//! # Quick start
//!
//! ```rust
//! use lvq::prelude::*;
//!
//! let mut codebook = Codebook::new(2, 2).unwrap();
//! codebook.set_random(Some(42));
//!
//! let samples = vec![
//!     LabeledSample::new(vec![0.0, 0.0], 0),
//!     LabeledSample::new(vec![1.0, 1.0], 1),
//! ];
//! let config = TrainConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! train_supervised(&mut codebook, &samples, &config).unwrap();
//!
//! let predicted = codebook.classify(&[0.1, 0.1]).unwrap();
//! assert_eq!(predicted, 0);
//! ```

/// Dense vector arithmetic shared by the codebook and trainer.
pub mod vector;

/// The codebook: an ordered collection of prototypes, with classification
/// and weighted-retrieval lookups.
pub mod codebook;

/// Supervised (LVQ1) and unsupervised (competitive learning) training.
pub mod trainer;

/// Classification and clustering evaluation statistics.
pub mod evaluator;

/// Deterministic big-endian binary serialization of a codebook.
pub mod persistence;

/// A handle-based, host-facing command surface over the above modules.
pub mod embedding;

/// Error types shared across the crate.
pub mod error;

pub use codebook::Codebook;
pub use embedding::{ClassifierStatsHandle, ClusteringStatsHandle, Engine, EngineHandle, SampleSet};
pub use error::{LvqError, LvqResult};
pub use evaluator::{ClusterErrorAccumulator, ConfusionMatrix};
pub use trainer::{train_supervised, train_unsupervised, EpochReport, LabeledSample, TrainConfig};

/// Re-export of the crate's commonly used types.
pub mod prelude {
    pub use crate::codebook::Codebook;
    pub use crate::embedding::{
        ClassifierStatsHandle, ClusteringStatsHandle, Engine, EngineHandle, SampleSet,
    };
    pub use crate::error::{LvqError, LvqResult};
    pub use crate::evaluator::{ClusterErrorAccumulator, ConfusionMatrix};
    pub use crate::trainer::{train_supervised, train_unsupervised, EpochReport, LabeledSample, TrainConfig};
}
