//! 有界并发的执行队列
//!
//! 扫描单元在一个线程数固定的 rayon 线程池上执行，同时运行的扫描数量
//! 不会超过线程数。线程池可以通过 [`ScanPool`] 在多次查找之间共享。

use std::sync::{Arc, Condvar, Mutex};

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::queue::{lock, Accumulator, Queue, Unit};
use crate::errors::{FindError, FindResult};

/// 默认的并发上限
pub const DEFAULT_MAX_WORKERS: usize = 5;

/// 可在多次查找之间共享的扫描线程池
#[derive(Clone)]
pub struct ScanPool {
    pool: Arc<ThreadPool>,
}

impl ScanPool {
    /// 创建线程池，`max_workers` 为 0 时每个 CPU 一个线程
    pub fn new(max_workers: usize) -> FindResult<Self> {
        let workers = if max_workers == 0 {
            num_cpus::get()
        } else {
            max_workers
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("locate-scan-{}", i))
            .build()
            .map_err(|e| FindError::ThreadPool(e.to_string()))?;

        debug!("Created scan pool with {} workers", workers);

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 线程池中的工作线程数
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for ScanPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanPool")
            .field("workers", &self.workers())
            .finish()
    }
}

/// 两个句柄指向同一个线程池时相等
impl PartialEq for ScanPool {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pool, &other.pool)
    }
}

impl Eq for ScanPool {}

#[derive(Debug)]
struct Pending<T> {
    acc: Accumulator<T>,
    in_flight: usize,
}

#[derive(Debug)]
struct Shared<T> {
    state: Mutex<Pending<T>>,
    done: Condvar,
}

/// 并发队列
///
/// 第一个错误被记录后，尚未开始的单元会被跳过；已经在运行的单元会跑完，
/// 但结果被丢弃。
#[derive(Debug)]
pub struct ConcurrentQueue<T> {
    pool: ScanPool,
    shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> ConcurrentQueue<T> {
    /// 创建使用独立线程池的并发队列，`max_workers` 为 0 时每个 CPU 一个线程
    pub fn new(max_workers: usize) -> FindResult<Self> {
        Ok(Self::with_pool(ScanPool::new(max_workers)?))
    }

    /// 创建在共享线程池上执行的并发队列
    pub fn with_pool(pool: ScanPool) -> Self {
        Self {
            pool,
            shared: Arc::new(Shared {
                state: Mutex::new(Pending {
                    acc: Accumulator::default(),
                    in_flight: 0,
                }),
                done: Condvar::new(),
            }),
        }
    }

    /// 线程池中的工作线程数
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }
}

impl<T: Send + 'static> Queue<T> for ConcurrentQueue<T> {
    fn submit(&self, unit: Unit<T>) {
        {
            let mut state = lock(&self.shared.state);
            if state.acc.failed() {
                debug!("Skipping unit after first error");
                return;
            }
            state.in_flight += 1;
        }

        let shared = Arc::clone(&self.shared);
        self.pool.pool.spawn(move || {
            let skip = lock(&shared.state).acc.failed();
            let result = if skip { None } else { Some(unit()) };

            let mut state = lock(&shared.state);
            if let Some(result) = result {
                state.acc.record(result);
            }
            state.in_flight -= 1;
            shared.done.notify_all();
        });
    }

    fn wait(self: Box<Self>) -> FindResult<Vec<T>> {
        let mut state = lock(&self.shared.state);
        while state.in_flight > 0 && !state.acc.failed() {
            state = self
                .shared
                .done
                .wait(state)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }

        let acc = std::mem::take(&mut state.acc);
        acc.finish()
    }
}
