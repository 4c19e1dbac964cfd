//! Execution engine - runs independent instances with bounded parallelism

use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Run `run` over every item and return the results in input order
///
/// With `jobs == 1` (or a single item) the items run sequentially on the
/// calling thread. Otherwise they run on a dedicated pool of `jobs`
/// threads. Each call to `run` is independent. Execution order between items is
/// not guaranteed when running in parallel, only the order of the returned results.
pub fn execute<T, R, F>(items: &[T], jobs: usize, run: F) -> Result<Vec<R>, ExecuteError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if jobs <= 1 || items.len() <= 1 {
        return Ok(items.iter().map(run).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()?;

    log::debug!("Running {} items on {} threads", items.len(), jobs);
    Ok(pool.install(|| items.par_iter().map(&run).collect()))
}
