//! Options for locating files
//!
//! This module provides options for configuring how a search is executed.

use super::queue::{Queue, SerialQueue};
use super::thread_pool::{ConcurrentQueue, ScanPool, DEFAULT_MAX_WORKERS};
use crate::cli::Cli;
use crate::errors::FindResult;

/// How search paths are scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One path after another on the calling thread
    Serial,
    /// Paths scanned in parallel on a bounded worker pool
    #[default]
    Concurrent,
}

/// Options for configuring a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Execution strategy for the per-path scans
    pub strategy: Strategy,

    /// Maximum number of simultaneous scans (0 means one per CPU)
    pub max_workers: usize,

    /// Whether name patterns ignore case
    pub ignore_case: bool,

    /// Worker pool shared across searches; when unset each concurrent
    /// search builds its own pool of `max_workers` threads
    pub pool: Option<ScanPool>,
}

impl FindOptions {
    /// Create a new FindOptions with default values
    pub fn new() -> Self {
        Self {
            strategy: Strategy::Concurrent,
            max_workers: DEFAULT_MAX_WORKERS,
            ignore_case: false,
            pool: None,
        }
    }

    /// Set the execution strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the maximum number of simultaneous scans
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set whether name patterns ignore case
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Run concurrent searches on a shared pool, which overrides `max_workers`
    pub fn with_pool(mut self, pool: ScanPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Create the execution queue for one search
    pub fn build_queue<T: Send + 'static>(&self) -> FindResult<Box<dyn Queue<T>>> {
        Ok(match self.strategy {
            Strategy::Serial => Box::new(SerialQueue::new()),
            Strategy::Concurrent => match &self.pool {
                Some(pool) => Box::new(ConcurrentQueue::with_pool(pool.clone())),
                None => Box::new(ConcurrentQueue::new(self.max_workers)?),
            },
        })
    }

    /// Create FindOptions from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let strategy = if cli.serial {
            Strategy::Serial
        } else {
            Strategy::Concurrent
        };

        Self::new()
            .with_strategy(strategy)
            .with_max_workers(cli.workers)
            .with_ignore_case(cli.ignore_case())
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_options_defaults() {
        let options = FindOptions::new();
        assert_eq!(options.strategy, Strategy::Concurrent);
        assert_eq!(options.max_workers, 5);
        assert!(!options.ignore_case);
        assert_eq!(options.pool, None);
    }

    #[test]
    fn test_find_options_builders() {
        let options = FindOptions::new()
            .with_strategy(Strategy::Serial)
            .with_max_workers(2)
            .with_ignore_case(true);
        assert_eq!(options.strategy, Strategy::Serial);
        assert_eq!(options.max_workers, 2);
        assert!(options.ignore_case);
    }

    #[test]
    fn test_build_queue() -> FindResult<()> {
        for strategy in [Strategy::Serial, Strategy::Concurrent] {
            let queue = FindOptions::new().with_strategy(strategy).build_queue::<u8>()?;
            queue.submit(Box::new(|| Ok(7)));
            assert_eq!(queue.wait()?, vec![7]);
        }
        Ok(())
    }

    #[test]
    fn test_build_queue_reuses_shared_pool() -> FindResult<()> {
        let options = FindOptions::new().with_pool(ScanPool::new(1)?);
        let mut threads = Vec::new();

        for _ in 0..3 {
            let queue = options.build_queue::<std::thread::ThreadId>()?;
            queue.submit(Box::new(|| Ok(std::thread::current().id())));
            threads.extend(queue.wait()?);
        }

        assert_eq!(threads.len(), 3);
        assert!(threads.iter().all(|id| *id == threads[0]));
        Ok(())
    }
}
