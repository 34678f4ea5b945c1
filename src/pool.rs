//! Fixed-size worker pool backing the parallel execution strategy.
//!
//! A pool is built once and shared (via `Arc`) by every classifier that uses
//! it, so repeated classify calls never pay for thread creation.

use std::fmt;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{KnnError, Result};

/// Wraps either rayon's process-wide pool or a dedicated capped pool.
pub struct WorkerPool {
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    /// Uses rayon's global pool, which is sized to the available processors
    /// and lives for the whole process.
    pub fn global() -> Self {
        Self { pool: None }
    }

    /// Builds a dedicated pool with exactly `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(KnnError::InvalidArgument(
                "worker pool needs at least one thread".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("knn-worker-{i}"))
            .build()?;
        log::debug!("built worker pool with {threads} threads");
        Ok(Self { pool: Some(pool) })
    }

    /// Number of workers that will execute parallel regions.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Runs `op` inside the pool; rayon parallel iterators used by `op`
    /// execute on this pool's workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("dedicated", &self.pool.is_some())
            .field("num_threads", &self.num_threads())
            .finish()
    }
}
