//! k-nearest-neighbors classification.
//!
//! A query is classified by computing its Euclidean distance to every
//! instance of a [`Dataset`], selecting the `k` closest, and taking the
//! majority label among them. The distance loop can run on the calling thread
//! or across a reusable [`WorkerPool`]; both produce identical predictions.

pub mod classifier;
pub mod config;
pub mod distance;
pub mod error;
pub mod instance;
pub mod loader;
pub mod neighbors;
pub mod pool;
pub mod vote;

pub use classifier::{classify, KNNClassifier, Prediction};
pub use config::{ClassifierConfig, StrategyKind};
pub use distance::euclidean_distance;
pub use error::{KnnError, Result};
pub use instance::{Dataset, Instance, Label};
pub use loader::{load_csv, parse_csv, LoadError};
pub use neighbors::{select_nearest, DistanceEntry, ExecutionStrategy, SelectionMethod};
pub use pool::WorkerPool;
pub use vote::majority_vote;
