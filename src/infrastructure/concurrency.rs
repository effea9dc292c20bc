//! Concurrency management for Stepwise.
//! Sizes the batch-analysis pool so a running server keeps headroom.

use anyhow::Result;
use tracing::info;

/// Worker count for batch analysis: half the cores, minimum 1.
pub fn worker_count() -> usize {
    std::cmp::max(1, num_cpus::get() / 2)
}

/// Initialize the global rayon thread pool with controlled worker count.
pub fn init_thread_pool() -> Result<()> {
    let workers = worker_count();

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    info!(workers, cores = num_cpus::get(), "initialized analysis thread pool");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_is_at_least_one() {
        let workers = worker_count();
        assert!(workers >= 1);
        assert!(workers <= num_cpus::get().max(1));
    }
}
