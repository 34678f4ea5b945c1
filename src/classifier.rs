use std::time::{Duration, Instant};

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::instance::{Dataset, Label};
use crate::neighbors::{select_nearest, DistanceEntry, ExecutionStrategy, SelectionMethod};
use crate::vote::majority_vote;

/// Classifies `query` against `dataset` by majority vote among its `k`
/// nearest instances, on the calling thread.
///
/// # Example
///
/// ```
/// use knn::{classify, Dataset};
///
/// let dataset = Dataset::from_parts(
///     vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 3.0], vec![6.0, 7.0]],
///     vec![0, 0, 1, 1],
/// )
/// .unwrap();
///
/// assert_eq!(classify(&dataset, &[2.1, 2.9], 3).unwrap(), 0);
/// ```
pub fn classify(dataset: &Dataset, query: &[f64], k: usize) -> Result<Label> {
    let neighbors = select_nearest(
        dataset,
        query,
        k,
        &ExecutionStrategy::Sequential,
        SelectionMethod::FullSort,
    )?;
    vote_neighbors(dataset, &neighbors)
}

/// Majority vote over the labels of `neighbors`, nearest first.
fn vote_neighbors(dataset: &Dataset, neighbors: &[DistanceEntry]) -> Result<Label> {
    let labels: Vec<Label> = neighbors
        .iter()
        .map(|entry| dataset[entry.index].label())
        .collect();
    log::trace!("nearest labels: {:?}", labels);
    majority_vote(&labels)
}

/// Outcome of a timed prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub label: Label,
    /// Wall-clock time spent selecting neighbors and voting.
    pub elapsed: Duration,
    /// Threads that computed distances (1 for the sequential strategy).
    pub workers: usize,
}

/// A k-NN classifier that owns its training data and performs majority-vote
/// classification.
///
/// # Fields
/// - `k`: number of neighbors to consider.
/// - `dataset`: training instances, read-only for the classifier's lifetime.
/// - `strategy`: where distances are computed. A parallel strategy keeps its
///   worker pool alive across predictions.
/// - `selection`: how the k nearest entries are extracted.
#[derive(Debug, Clone)]
pub struct KNNClassifier {
    k: usize,
    dataset: Dataset,
    strategy: ExecutionStrategy,
    selection: SelectionMethod,
}

impl KNNClassifier {
    /// Constructs a sequential, full-sort classifier.
    ///
    /// `k` is checked against the dataset on every prediction, not here.
    pub fn new(k: usize, dataset: Dataset) -> Self {
        Self {
            k,
            dataset,
            strategy: ExecutionStrategy::Sequential,
            selection: SelectionMethod::FullSort,
        }
    }

    /// Constructs a classifier from a [`ClassifierConfig`], building its
    /// worker pool if the config asks for a dedicated one.
    pub fn from_config(dataset: Dataset, config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            k: config.k,
            dataset,
            strategy: config.build_strategy()?,
            selection: config.selection,
        })
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_selection(mut self, selection: SelectionMethod) -> Self {
        self.selection = selection;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn strategy(&self) -> &ExecutionStrategy {
        &self.strategy
    }

    /// The `k` nearest instances to `point`, nearest first.
    pub fn nearest(&self, point: &[f64]) -> Result<Vec<DistanceEntry>> {
        select_nearest(&self.dataset, point, self.k, &self.strategy, self.selection)
    }

    /// Predict the label for a single query point using majority vote among
    /// its `k` nearest neighbors.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `k == 0`.
    /// - `InsufficientData` if the dataset has fewer than `k` instances.
    /// - `DimensionMismatch` if `point` does not match the dataset dimension.
    pub fn predict(&self, point: &[f64]) -> Result<Label> {
        log::debug!(
            "classifying against {} instances (k = {}, workers = {})",
            self.dataset.len(),
            self.k,
            self.strategy.workers()
        );
        let neighbors = self.nearest(point)?;
        vote_neighbors(&self.dataset, &neighbors)
    }

    /// Like [`predict`](Self::predict), also reporting elapsed time and the
    /// number of workers used.
    pub fn predict_timed(&self, point: &[f64]) -> Result<Prediction> {
        let start = Instant::now();
        let label = self.predict(point)?;
        Ok(Prediction {
            label,
            elapsed: start.elapsed(),
            workers: self.strategy.workers(),
        })
    }
}
