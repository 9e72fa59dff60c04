//! 内存文件系统

use std::collections::BTreeMap;
use std::io;
use std::sync::RwLock;

use super::{clean_virtual, join_virtual, not_a_directory, DirEntry, EntryKind, FileSystem};

/// 线程安全的内存文件系统
///
/// 路径以 `/` 分隔；`home/user` 与 `/home/user` 指向同一个节点，
/// 根目录总是存在。
#[derive(Debug, Default)]
pub struct MemFs {
    // 键为去掉前导 `/` 的规范化路径，根目录不存储
    nodes: RwLock<BTreeMap<String, EntryKind>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建目录及其所有缺失的父目录
    pub fn create_dir_all(&self, path: &str) -> io::Result<()> {
        let mut nodes = self.write()?;
        Self::insert_dirs(&mut nodes, &Self::key(path))
    }

    /// 创建空文件，缺失的父目录会被一并创建
    pub fn create_file(&self, path: &str) -> io::Result<()> {
        self.create_entry(path, EntryKind::Regular)
    }

    /// 以指定种类创建一个目录项
    pub fn create_entry(&self, path: &str, kind: EntryKind) -> io::Result<()> {
        let key = Self::key(path);
        if key.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "root already exists",
            ));
        }

        let mut nodes = self.write()?;
        if let Some((parent, _)) = key.rsplit_once('/') {
            Self::insert_dirs(&mut nodes, parent)?;
        }

        match nodes.get(&key) {
            Some(EntryKind::Directory) if kind == EntryKind::Directory => Ok(()),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("already exists: {}", path),
            )),
            None => {
                nodes.insert(key, kind);
                Ok(())
            }
        }
    }

    fn key(path: &str) -> String {
        clean_virtual(&format!("/{}", path))
            .trim_start_matches('/')
            .to_string()
    }

    fn insert_dirs(nodes: &mut BTreeMap<String, EntryKind>, key: &str) -> io::Result<()> {
        let mut current = String::new();
        for part in key.split('/').filter(|p| !p.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);

            match nodes.get(&current) {
                Some(EntryKind::Directory) => {}
                Some(_) => return Err(not_a_directory(&current)),
                None => {
                    nodes.insert(current.clone(), EntryKind::Directory);
                }
            }
        }
        Ok(())
    }

    fn read(&self) -> io::Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, EntryKind>>> {
        self.nodes
            .read()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory filesystem lock poisoned"))
    }

    fn write(&self) -> io::Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, EntryKind>>> {
        self.nodes
            .write()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory filesystem lock poisoned"))
    }
}

impl FileSystem for MemFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let key = Self::key(path);
        let nodes = self.read()?;

        if !key.is_empty() {
            match nodes.get(&key) {
                Some(EntryKind::Directory) => {}
                Some(_) => return Err(not_a_directory(path)),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no such directory: {}", path),
                    ))
                }
            }
        }

        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{}/", key)
        };

        let entries = nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .filter_map(|(k, kind)| {
                let name = &k[prefix.len()..];
                (!name.contains('/')).then(|| DirEntry::new(name, *kind))
            })
            .collect();

        Ok(entries)
    }

    fn join(&self, base: &str, name: &str) -> String {
        join_virtual(base, name)
    }
}
