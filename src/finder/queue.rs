//! 扫描单元的执行队列
//!
//! 队列接收若干个独立的扫描单元，等待后返回所有单元结果的拼接，或者第一个
//! 出现的错误。结果在不同单元之间的顺序不作保证，由调用方负责排序。

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::errors::{FindError, FindResult};

/// 一个可调度的工作单元
pub type Unit<T> = Box<dyn FnOnce() -> FindResult<T> + Send + 'static>;

/// 执行队列
pub trait Queue<T: Send + 'static>: Send + Sync {
    /// 提交一个单元。已经记录到错误后，新提交的单元会被跳过。
    fn submit(&self, unit: Unit<T>);

    /// 等待所有已派发的单元完成，或者第一个错误被记录
    ///
    /// 出错时只返回该错误，不返回任何部分结果。
    fn wait(self: Box<Self>) -> FindResult<Vec<T>>;
}

/// 结果与错误的累加器，由队列的互斥锁保护
#[derive(Debug)]
pub(crate) struct Accumulator<T> {
    results: Vec<T>,
    error: Option<FindError>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            error: None,
        }
    }
}

impl<T> Accumulator<T> {
    pub(crate) fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// 记录一个单元的结果；第一个错误之后的一切都被丢弃
    pub(crate) fn record(&mut self, result: FindResult<T>) {
        if self.failed() {
            debug!("Discarding unit outcome after first error");
            return;
        }

        match result {
            Ok(value) => self.results.push(value),
            Err(err) => {
                warn!("Unit failed, aborting remaining work: {}", err);
                self.results.clear();
                self.error = Some(err);
            }
        }
    }

    pub(crate) fn finish(self) -> FindResult<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.results),
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 串行队列：提交时立即按顺序同步执行
#[derive(Debug)]
pub struct SerialQueue<T> {
    state: Mutex<Accumulator<T>>,
}

impl<T> SerialQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Accumulator::default()),
        }
    }
}

impl<T> Default for SerialQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Queue<T> for SerialQueue<T> {
    fn submit(&self, unit: Unit<T>) {
        let mut state = lock(&self.state);
        if state.failed() {
            debug!("Skipping unit after first error");
            return;
        }

        let result = unit();
        state.record(result);
    }

    fn wait(self: Box<Self>) -> FindResult<Vec<T>> {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn failure(message: &str) -> FindError {
        FindError::ThreadPool(message.to_string())
    }

    #[test]
    fn test_serial_runs_in_submission_order() -> FindResult<()> {
        let queue: Box<dyn Queue<usize>> = Box::new(SerialQueue::new());
        for i in 0..5 {
            queue.submit(Box::new(move || Ok(i)));
        }
        assert_eq!(queue.wait()?, vec![0, 1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_serial_empty_queue() -> FindResult<()> {
        let queue: Box<dyn Queue<String>> = Box::new(SerialQueue::new());
        assert!(queue.wait()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_serial_skips_units_after_error() {
        let ran = Arc::new(AtomicUsize::new(0));
        let queue: Box<dyn Queue<usize>> = Box::new(SerialQueue::new());

        for i in 0..5 {
            let ran = Arc::clone(&ran);
            queue.submit(Box::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
                if i == 2 {
                    Err(failure("unit 2"))
                } else {
                    Ok(i)
                }
            }));
        }

        match queue.wait() {
            Err(FindError::ThreadPool(message)) => assert_eq!(message, "unit 2"),
            other => panic!("Expected the first error, got {:?}", other),
        }
        assert_eq!(ran.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_accumulator_keeps_first_error() {
        let mut acc: Accumulator<usize> = Accumulator::default();
        acc.record(Ok(1));
        acc.record(Err(failure("first")));
        acc.record(Err(failure("second")));
        acc.record(Ok(2));

        match acc.finish() {
            Err(FindError::ThreadPool(message)) => assert_eq!(message, "first"),
            other => panic!("Expected the first error, got {:?}", other),
        }
    }
}
