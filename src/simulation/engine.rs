//! High-level runtime engine settings
//!
//! Selects sequential or parallel frame updates, the worker count, and the
//! optional seed used when building and running a `Scenario`

use crate::configuration::config::ExecutionConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub mode: ExecutionConfig, // sequential or parallel
    pub threads: usize, // 0 = rayon global pool
    pub seed: Option<u64>, // None = OS entropy
}

impl Engine {
    pub fn is_parallel(&self) -> bool {
        self.mode == ExecutionConfig::Parallel
    }

    /// Dedicated worker pool when a thread count is pinned
    pub fn build_pool(&self) -> Result<Option<rayon::ThreadPool>, rayon::ThreadPoolBuildError> {
        if !self.is_parallel() || self.threads == 0 {
            return Ok(None);
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("pasim-worker-{i}"))
            .build()
            .map(Some)
    }
}
