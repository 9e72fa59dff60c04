//! 文件定位模块
//!
//! 对每个搜索路径提交一个扫描单元到执行队列，汇总所有匹配项并排序。
//! 任一单元失败时整个查找失败，不返回部分结果。

pub mod filter;
pub mod options;
pub mod queue;
mod thread_pool;
pub mod walker;

use std::sync::Arc;

use log::{debug, info};

pub use self::filter::{FileFilter, KindFilter, NameMatcher};
pub use self::options::{FindOptions, Strategy};
pub use self::queue::{Queue, SerialQueue};
pub use self::walker::scan;
pub use thread_pool::{ConcurrentQueue, ScanPool, DEFAULT_MAX_WORKERS};

use crate::errors::FindResult;
use crate::fs::FileSystem;

/// 文件定位器
///
/// 在 `paths` 的直接子项中查找名称匹配 `names` 中任一模式、且种类满足
/// `kind` 的项。
#[derive(Debug, Clone, Default)]
pub struct Finder {
    /// 搜索路径，按文件系统自己的路径格式
    pub paths: Vec<String>,
    /// 名称模式（glob）
    pub names: Vec<String>,
    /// 种类过滤
    pub kind: KindFilter,
    pub options: FindOptions,
}

impl Finder {
    /// 创建新的定位器实例
    pub fn new(options: FindOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// 设置搜索路径
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// 设置名称模式
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// 设置种类过滤
    pub fn with_kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    /// 执行查找，返回按字典序排序的完整路径
    pub fn find<F>(&self, fs: Arc<F>) -> FindResult<Vec<String>>
    where
        F: FileSystem + ?Sized + 'static,
    {
        if self.paths.is_empty() || self.names.is_empty() {
            debug!("Nothing to find: no search paths or no names");
            return Ok(Vec::new());
        }

        let names = if self.options.ignore_case {
            NameMatcher::new_ignore_case(&self.names)?
        } else {
            NameMatcher::new(&self.names)?
        };
        let names = Arc::new(names);

        info!(
            "Searching {} paths ({:?}): {}, {}",
            self.paths.len(),
            self.options.strategy,
            names.description(),
            self.kind.description()
        );

        let queue = self.options.build_queue::<Vec<String>>()?;
        for path in &self.paths {
            let fs = Arc::clone(&fs);
            let names = Arc::clone(&names);
            let path = path.clone();
            let kind = self.kind;

            queue.submit(Box::new(move || scan(&*fs, &path, &names, kind)));
        }

        let mut results: Vec<String> = queue.wait()?.into_iter().flatten().collect();
        results.sort();

        info!("Found {} matches", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{DirEntry, MemFs};
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 记录 read_dir 调用次数的文件系统
    #[derive(Default)]
    struct CountingFs {
        inner: MemFs,
        calls: AtomicUsize,
    }

    impl FileSystem for CountingFs {
        fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.read_dir(path)
        }

        fn join(&self, base: &str, name: &str) -> String {
            self.inner.join(base, name)
        }
    }

    #[test]
    fn test_finder_basic() -> FindResult<()> {
        let fs = CountingFs::default();
        fs.inner.create_file("etc/config.yaml").unwrap();
        fs.inner.create_file("home/user/config.yaml").unwrap();
        fs.inner.create_dir_all("home/user/config").unwrap();
        let fs = Arc::new(fs);

        let finder = Finder::default()
            .with_paths(["/etc", "/home/user"])
            .with_names(["config.*"])
            .with_kind(KindFilter::FileOnly);

        assert_eq!(
            finder.find(Arc::clone(&fs))?,
            vec!["/etc/config.yaml", "/home/user/config.yaml"]
        );
        assert_eq!(fs.calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[test]
    fn test_finder_nothing_to_find_skips_filesystem() -> FindResult<()> {
        let fs = Arc::new(CountingFs::default());

        let finders = [
            Finder::default(),
            Finder::default().with_paths(["etc"]),
            Finder::default().with_names(["config.yaml"]),
            // 模式无效也不会被检查，因为根本没有需要查找的内容
            Finder::default().with_names(["["]),
        ];

        for finder in &finders {
            assert!(finder.find(Arc::clone(&fs))?.is_empty());
        }
        assert_eq!(fs.calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn test_finder_ignore_case() -> FindResult<()> {
        let fs = MemFs::new();
        fs.create_file("etc/Config.YAML").unwrap();
        let fs = Arc::new(fs);

        let finder = Finder::default().with_paths(["etc"]).with_names(["config.yaml"]);
        assert!(finder.find(Arc::clone(&fs))?.is_empty());

        let finder = Finder::new(FindOptions::new().with_ignore_case(true))
            .with_paths(["etc"])
            .with_names(["config.yaml"]);
        assert_eq!(finder.find(fs)?, vec!["etc/Config.YAML"]);
        Ok(())
    }
}
