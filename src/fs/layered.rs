//! 叠加文件系统

use std::collections::HashSet;
use std::io;

use super::{DirEntry, FileSystem};

/// 上层覆盖下层的叠加文件系统
///
/// 目录列表是两层按名称的并集，同名时以上层为准。只有两层都不存在时
/// 才返回 NotFound。路径拼接使用上层的约定。
#[derive(Debug, Clone)]
pub struct LayeredFs<U, L> {
    upper: U,
    lower: L,
}

impl<U: FileSystem, L: FileSystem> LayeredFs<U, L> {
    pub fn new(upper: U, lower: L) -> Self {
        Self { upper, lower }
    }
}

fn missing_as_none(result: io::Result<Vec<DirEntry>>) -> io::Result<Option<Vec<DirEntry>>> {
    match result {
        Ok(entries) => Ok(Some(entries)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

impl<U: FileSystem, L: FileSystem> FileSystem for LayeredFs<U, L> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let upper = missing_as_none(self.upper.read_dir(path))?;
        let lower = missing_as_none(self.lower.read_dir(path))?;

        match (upper, lower) {
            (None, None) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory in any layer: {}", path),
            )),
            (Some(entries), None) | (None, Some(entries)) => Ok(entries),
            (Some(mut entries), Some(lower)) => {
                let shadowed: HashSet<String> = entries.iter().map(|e| e.name.clone()).collect();
                entries.extend(lower.into_iter().filter(|e| !shadowed.contains(&e.name)));
                Ok(entries)
            }
        }
    }

    fn join(&self, base: &str, name: &str) -> String {
        self.upper.join(base, name)
    }
}
