//! 单个搜索路径的扫描
//!
//! 只列出搜索路径的直接子项，不递归。

use std::io;

use log::debug;

use super::filter::{FileFilter, KindFilter, NameMatcher};
use crate::errors::{FindError, FindResult};
use crate::fs::FileSystem;

/// 扫描 `path` 的直接子项，返回匹配项的完整路径
///
/// 路径不存在时返回空结果；其他列目录错误会中止本次扫描。
/// 每个子项最多产生一个结果，即使它匹配多个模式。
pub fn scan<F: FileSystem + ?Sized>(
    fs: &F,
    path: &str,
    names: &NameMatcher,
    kind: KindFilter,
) -> FindResult<Vec<String>> {
    let entries = match fs.read_dir(path) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("Search path does not exist: {}", path);
            return Ok(Vec::new());
        }
        Err(err) => return Err(FindError::from_io(path, err)),
    };

    let results: Vec<String> = entries
        .iter()
        .filter(|entry| names.matches(entry) && kind.matches(entry))
        .map(|entry| fs.join(path, &entry.name))
        .collect();

    debug!(
        "Scanned {}: {} entries, {} matched",
        path,
        entries.len(),
        results.len()
    );

    Ok(results)
}
