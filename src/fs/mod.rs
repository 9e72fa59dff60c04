//! 文件系统抽象
//!
//! 查找器只通过 [`FileSystem`] 这个很窄的接口访问文件系统：列出某个目录的
//! 直接子项，以及按该文件系统自己的规则拼接路径。本模块同时提供几种实现：
//!
//! - [`OsFs`]：真实磁盘
//! - [`MemFs`]：线程安全的内存文件系统，适合测试
//! - [`BasePathFs`]：把虚拟路径限制在某个基础目录之下（类似 chroot）
//! - [`LayeredFs`]：上层覆盖下层的叠加文件系统

mod base_path;
mod layered;
mod mem;
mod os;

use std::io;
use std::sync::Arc;

pub use base_path::BasePathFs;
pub use layered::LayeredFs;
pub use mem::MemFs;
pub use os::OsFs;

/// 目录项的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// 普通文件
    Regular,
    /// 目录
    Directory,
    /// 其他（设备、套接字、未跟随的符号链接等）
    Other,
}

/// 列目录得到的一个子项，只包含基本名和种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// 查找器所需的文件系统能力
///
/// 实现必须可以被多个扫描线程同时读取。
pub trait FileSystem: Send + Sync {
    /// 列出 `path` 的直接子项。
    ///
    /// 路径不存在时必须返回 [`io::ErrorKind::NotFound`]，
    /// 以便与权限不足等其他错误区分开。
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;

    /// 按该文件系统的约定拼接路径，结果可以再传回同一个文件系统。
    fn join(&self, base: &str, name: &str) -> String;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn join(&self, base: &str, name: &str) -> String {
        (**self).join(base, name)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn join(&self, base: &str, name: &str) -> String {
        (**self).join(base, name)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn join(&self, base: &str, name: &str) -> String {
        (**self).join(base, name)
    }
}

/// 规范化以 `/` 分隔的虚拟路径
///
/// 去掉空段和 `.`，解析 `..`。绝对路径中的 `..` 不会越过根。
pub(crate) fn clean_virtual(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// 以 `/` 拼接两个虚拟路径并规范化
pub(crate) fn join_virtual(base: &str, name: &str) -> String {
    if base.is_empty() {
        return clean_virtual(name);
    }
    clean_virtual(&format!("{}/{}", base, name))
}

pub(crate) fn not_a_directory(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("not a directory: {}", path))
}
