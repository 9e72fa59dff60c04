//! 以某个基础目录为根的文件系统

use std::io;

use super::{clean_virtual, join_virtual, DirEntry, FileSystem};

/// 把所有虚拟路径解析到 `base` 之下
///
/// 虚拟路径中的 `..` 无法越过 `base`。拼接出的结果仍是虚拟路径，
/// 例如 `/etc/config.yaml`，而不是底层文件系统中的真实位置。
#[derive(Debug, Clone)]
pub struct BasePathFs<F> {
    inner: F,
    base: String,
}

impl<F: FileSystem> BasePathFs<F> {
    pub fn new(inner: F, base: impl Into<String>) -> Self {
        Self {
            inner,
            base: base.into(),
        }
    }

    /// 基础目录
    pub fn base(&self) -> &str {
        &self.base
    }

    /// 虚拟路径在底层文件系统中的真实路径
    pub fn real_path(&self, path: &str) -> String {
        let rooted = clean_virtual(&format!("/{}", path));
        let relative = rooted.trim_start_matches('/');

        if relative.is_empty() {
            return self.base.clone();
        }

        relative
            .split('/')
            .fold(self.base.clone(), |acc, part| self.inner.join(&acc, part))
    }
}

impl<F: FileSystem> FileSystem for BasePathFs<F> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        self.inner.read_dir(&self.real_path(path))
    }

    fn join(&self, base: &str, name: &str) -> String {
        join_virtual(base, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{EntryKind, MemFs};

    fn fixture() -> BasePathFs<MemFs> {
        let fs = MemFs::new();
        fs.create_file("testdata/etc/config.yaml").unwrap();
        fs.create_file("etc/secret").unwrap();
        BasePathFs::new(fs, "testdata")
    }

    #[test]
    fn test_real_path() {
        let fs = fixture();
        assert_eq!(fs.real_path("/etc"), "testdata/etc");
        assert_eq!(fs.real_path("etc/"), "testdata/etc");
        assert_eq!(fs.real_path("/"), "testdata");
        assert_eq!(fs.real_path("/../../etc"), "testdata/etc");
    }

    #[test]
    fn test_read_dir_stays_inside_base() {
        let fs = fixture();
        assert_eq!(
            fs.read_dir("/etc").unwrap(),
            vec![DirEntry::new("config.yaml", EntryKind::Regular)]
        );
        // 越界的 `..` 被钳制在基础目录内，不会读到外面的 etc/secret
        assert_eq!(fs.read_dir("/../etc").unwrap(), fs.read_dir("/etc").unwrap());
    }

    #[test]
    fn test_join_is_virtual() {
        let fs = fixture();
        assert_eq!(fs.join("/etc", "config.yaml"), "/etc/config.yaml");
        assert_eq!(fs.base(), "testdata");
    }
}
