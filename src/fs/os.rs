//! 真实磁盘上的文件系统

use std::io;
use std::path::Path;

use log::warn;
use walkdir::WalkDir;

use super::{not_a_directory, DirEntry, EntryKind, FileSystem};

/// 操作系统文件系统
///
/// 使用 walkdir 列出直接子项。默认不跟随符号链接，此时符号链接的种类为
/// [`EntryKind::Other`]。
///
/// 跟随符号链接时，失效或成环的链接会被记录警告并跳过；其余任何错误（包括
/// 读取目录项中途失败）都会让整个列目录失败，不返回不完整的列表。
#[derive(Debug, Clone, Default)]
pub struct OsFs {
    follow_links: bool,
}

impl OsFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否跟随符号链接
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// 跟随链接时某个子项无法解析
    ///
    /// walkdir 读取目录本身出错时同样标记为深度 1，但不带子项路径。
    fn is_unresolvable_link(&self, err: &walkdir::Error) -> bool {
        self.follow_links && err.depth() == 1 && err.path().is_some()
    }
}

impl FileSystem for OsFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_dir() {
            return Err(not_a_directory(path));
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links);

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if self.is_unresolvable_link(&err) => {
                    warn!("Skipping entry in {}: {}", path, err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_file() {
                EntryKind::Regular
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };

            entries.push(DirEntry::new(entry.file_name().to_string_lossy(), kind));
        }

        Ok(entries)
    }

    fn join(&self, base: &str, name: &str) -> String {
        Path::new(base).join(name).to_string_lossy().into_owned()
    }
}
