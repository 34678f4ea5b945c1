use std::sync::Arc;

use crate::error::Result;
use crate::neighbors::{ExecutionStrategy, SelectionMethod};
use crate::pool::WorkerPool;

/// Which execution strategy a classifier should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyKind {
    Sequential,
    #[default]
    Parallel,
}

/// Configuration options for a [`KNNClassifier`](crate::KNNClassifier).
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Number of neighbors that vote.
    pub k: usize,
    /// Sequential or parallel distance computation.
    pub strategy: StrategyKind,
    /// Worker cap for the parallel strategy. `None` uses every available
    /// processor through rayon's global pool.
    pub threads: Option<usize>,
    /// How the k nearest entries are extracted.
    pub selection: SelectionMethod,
    /// Pool shared by every classifier built from this config. Takes
    /// precedence over `threads`.
    pub pool: Option<Arc<WorkerPool>>,
}

impl ClassifierConfig {
    /// Create a new config with the parallel strategy on all processors and
    /// full-sort selection.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            strategy: StrategyKind::default(),
            threads: None,
            selection: SelectionMethod::default(),
            pool: None,
        }
    }

    /// Customize the execution strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cap the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Run the parallel strategy on an existing pool.
    pub fn with_pool(mut self, pool: Arc<WorkerPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Customize the selection method.
    pub fn with_selection(mut self, selection: SelectionMethod) -> Self {
        self.selection = selection;
        self
    }

    /// Builds the execution strategy.
    ///
    /// Without a shared pool, a thread cap builds a new dedicated pool on every
    /// call, so each classifier gets its own. Use [`with_pool`](Self::with_pool)
    /// to share one.
    pub fn build_strategy(&self) -> Result<ExecutionStrategy> {
        if let (StrategyKind::Parallel, Some(pool)) = (self.strategy, &self.pool) {
            return Ok(ExecutionStrategy::Parallel(Arc::clone(pool)));
        }
        Ok(match (self.strategy, self.threads) {
            (StrategyKind::Sequential, _) => ExecutionStrategy::Sequential,
            (StrategyKind::Parallel, None) => ExecutionStrategy::parallel(),
            (StrategyKind::Parallel, Some(threads)) => {
                ExecutionStrategy::Parallel(Arc::new(WorkerPool::with_threads(threads)?))
            }
        })
    }
}
