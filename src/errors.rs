use std::io;
use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// rust-locate 的错误类型
///
/// 搜索路径不存在不属于错误：扫描器会把它当作空结果处理。
#[derive(Error, Debug)]
pub enum FindError {
    /// 权限不足
    #[error("权限不足 {path}: {source}")]
    PermissionDenied {
        path: String,
        #[source]
        source: io::Error,
    },

    /// 列出目录失败（其他IO错误）
    #[error("列出目录失败 {path}: {source}")]
    ListDirectory {
        path: String,
        #[source]
        source: io::Error,
    },

    /// 模式匹配错误
    #[error("无效的模式 '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// 无效的文件类型
    #[error("无效的文件类型: {0}")]
    InvalidFileType(String),

    /// 工作线程池创建失败
    #[error("线程池错误: {0}")]
    ThreadPool(String),
}

impl FindError {
    /// 将列目录时的 IO 错误映射为对应的变体
    pub fn from_io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FindError::PermissionDenied {
                path: path.to_string(),
                source: err,
            },
            _ => FindError::ListDirectory {
                path: path.to_string(),
                source: err,
            },
        }
    }

    /// 出错的路径（如果有）
    pub fn path(&self) -> Option<&str> {
        match self {
            FindError::PermissionDenied { path, .. } | FindError::ListDirectory { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
