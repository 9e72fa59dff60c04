//! 用于定位配置文件的库
//!
//! 给定一组搜索路径和一组名称模式，在每个搜索路径的直接子项中查找匹配的
//! 文件或目录：
//! - 支持 glob 名称模式（`*`、`?`、`[...]`）
//! - 按文件 / 目录过滤
//! - 通过 [`fs::FileSystem`] 抽象访问文件系统（真实磁盘、内存、基础路径、叠加）
//! - 有界并发扫描，第一个错误即为整个查找的结果
//!
//! ## 使用场景
//!
//! - 配置加载器判断某个配置文件是否存在于任一搜索路径中
//! - 在测试中针对内存文件系统查找
//!
//! # 示例
//!
//! ```
//! use std::sync::Arc;
//! use rust_locate::finder::{Finder, KindFilter};
//! use rust_locate::fs::MemFs;
//!
//! let fs = MemFs::new();
//! fs.create_file("/etc/config.yaml").unwrap();
//! fs.create_file("/home/user/config.yaml").unwrap();
//! fs.create_dir_all("/home/user/config").unwrap();
//!
//! let finder = Finder::default()
//!     .with_paths(["/home/user", "/etc"])
//!     .with_names(["config.*"])
//!     .with_kind(KindFilter::FileOnly);
//!
//! let results = finder.find(Arc::new(fs)).unwrap();
//! assert_eq!(results, vec!["/etc/config.yaml", "/home/user/config.yaml"]);
//! ```
//!
//! 更多用法请参考各模块文档。

pub mod cli;
pub mod errors;
pub mod finder;
pub mod fs;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use finder::Finder;
