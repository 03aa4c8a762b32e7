//! Execution engines for independent resampling trials
//!
//! Resampling trials never share mutable state, so they can be mapped over
//! sequentially or on a rayon thread pool. Both engines return results in
//! trial order.

#[cfg(feature = "parallel")]
use crate::Result;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Trait for execution engines that control how trials are scheduled
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Execute `f` for every index in `0..count`, collecting results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        matches!(self.strategy(), ExecutionStrategy::Parallel)
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all trials in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl ExecutionEngine for SequentialEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Executes trials on rayon's global pool or on a dedicated pool.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine on the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;
        tracing::debug!(num_threads = pool.current_num_threads(), "created dedicated thread pool");

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine
}

/// Create a parallel engine on rayon's global pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}
