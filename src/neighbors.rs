//! k-nearest selection over a dataset.
//!
//! Distances to every instance are computed first, either on the calling
//! thread or across a [`WorkerPool`], into a vector pre-sized to the dataset so
//! each worker only writes its own slots. Ordering and truncation to `k` then
//! run on the calling thread regardless of strategy.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::distance::euclidean_distance;
use crate::error::{KnnError, Result};
use crate::instance::Dataset;
use crate::pool::WorkerPool;

/// Smallest index range handed to a single worker.
const MIN_CHUNK_LEN: usize = 256;

/// Distance from the query to one dataset instance.
///
/// Entries are totally ordered by distance (via [`f64::total_cmp`]) and then by
/// ascending `index`, so equal distances always resolve the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceEntry {
    pub distance: f64,
    pub index: usize,
}

impl PartialEq for DistanceEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DistanceEntry {}

impl PartialOrd for DistanceEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DistanceEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.index.cmp(&other.index))
    }
}

/// How the distance loop is executed.
#[derive(Debug, Clone, Default)]
pub enum ExecutionStrategy {
    /// Everything runs on the calling thread.
    #[default]
    Sequential,
    /// The distance loop is split across the pool's workers.
    Parallel(Arc<WorkerPool>),
}

impl ExecutionStrategy {
    /// Parallel strategy on rayon's process-wide pool.
    pub fn parallel() -> Self {
        Self::Parallel(Arc::new(WorkerPool::global()))
    }

    /// Number of threads that compute distances.
    pub fn workers(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel(pool) => pool.num_threads(),
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel(_))
    }
}

/// How the `k` smallest entries are extracted once all distances are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMethod {
    /// Sort all N entries, keep the first k. O(N log N).
    #[default]
    FullSort,
    /// Keep a max-heap of the k best entries seen so far. O(N log k).
    BoundedHeap,
}

/// Checks the preconditions shared by selection and classification.
pub(crate) fn validate(dataset: &Dataset, query: &[f64], k: usize) -> Result<()> {
    if k == 0 {
        return Err(KnnError::InvalidArgument("k must be > 0".to_string()));
    }
    if dataset.is_empty() || k > dataset.len() {
        return Err(KnnError::InsufficientData {
            k,
            available: dataset.len(),
        });
    }
    dataset.check_query(query)
}

/// Returns the `k` instances closest to `query`, nearest first.
///
/// Equal distances are broken by ascending dataset index, so the result is the
/// same for every strategy and selection method.
///
/// # Errors
///
/// - [`KnnError::InvalidArgument`] if `k == 0`.
/// - [`KnnError::InsufficientData`] if the dataset is empty or `k > N`.
/// - [`KnnError::DimensionMismatch`] if `query` has the wrong dimension.
pub fn select_nearest(
    dataset: &Dataset,
    query: &[f64],
    k: usize,
    strategy: &ExecutionStrategy,
    method: SelectionMethod,
) -> Result<Vec<DistanceEntry>> {
    validate(dataset, query, k)?;
    let distances = compute_distances(dataset, query, strategy)?;
    Ok(take_nearest(distances, k, method))
}

/// Distance from `query` to every instance, indexed like the dataset.
pub fn compute_distances(
    dataset: &Dataset,
    query: &[f64],
    strategy: &ExecutionStrategy,
) -> Result<Vec<DistanceEntry>> {
    match strategy {
        ExecutionStrategy::Sequential => dataset
            .iter()
            .enumerate()
            .map(|(index, instance)| {
                Ok(DistanceEntry {
                    distance: euclidean_distance(instance.features(), query)?,
                    index,
                })
            })
            .collect(),
        ExecutionStrategy::Parallel(pool) => {
            let mut distances = vec![DistanceEntry::default(); dataset.len()];
            pool.install(|| {
                distances
                    .par_iter_mut()
                    .zip(dataset.instances().par_iter())
                    .enumerate()
                    .with_min_len(MIN_CHUNK_LEN)
                    .try_for_each(|(index, (slot, instance))| -> Result<()> {
                        *slot = DistanceEntry {
                            distance: euclidean_distance(instance.features(), query)?,
                            index,
                        };
                        Ok(())
                    })
            })?;
            Ok(distances)
        }
    }
}

/// Keeps the `k` smallest entries in ascending order.
fn take_nearest(
    mut distances: Vec<DistanceEntry>,
    k: usize,
    method: SelectionMethod,
) -> Vec<DistanceEntry> {
    match method {
        SelectionMethod::FullSort => {
            distances.sort_unstable();
            distances.truncate(k);
            distances
        }
        SelectionMethod::BoundedHeap => {
            let mut heap = BinaryHeap::with_capacity(k + 1);
            for entry in distances {
                if heap.len() < k {
                    heap.push(entry);
                } else if heap.peek().is_some_and(|worst| entry < *worst) {
                    heap.pop();
                    heap.push(entry);
                }
            }
            heap.into_sorted_vec()
        }
    }
}
