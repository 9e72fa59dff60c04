//! rust-locate 的命令行接口
//!
//! 本模块提供了参数解析和验证功能。

use clap::Parser;

use crate::errors::FindResult;
use crate::finder::filter::{KindFilter, NameMatcher};
use crate::finder::options::FindOptions;
use crate::finder::{Finder, DEFAULT_MAX_WORKERS};

/// 在一组搜索路径中定位配置文件
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 搜索路径（默认：当前目录）；只扫描其直接子项
    #[arg(default_value = ".")]
    pub paths: Vec<String>,

    /// 按文件名模式匹配 (支持通配符，可多次指定)
    #[arg(short = 'n', long, conflicts_with = "iname")]
    pub name: Vec<String>,

    /// 不区分大小写的文件名匹配 (支持通配符，可多次指定)
    #[arg(short = 'i', long = "iname", conflicts_with = "name")]
    pub iname: Vec<String>,

    /// 种类过滤：f 文件，d 目录，a 两者皆可
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "a")]
    pub file_type: String,

    /// 逐个路径串行扫描
    #[arg(long)]
    pub serial: bool,

    /// 同时扫描的路径数上限（0 表示每个 CPU 一个）
    #[arg(short = 'w', long, value_name = "NUM", default_value_t = DEFAULT_MAX_WORKERS)]
    pub workers: usize,

    /// 把搜索路径解析到该目录之下
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// 跟随符号链接
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// 启用调试日志
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// 验证命令行参数
    pub fn validate(&self) -> FindResult<()> {
        KindFilter::from_code(&self.file_type)?;
        NameMatcher::new(self.name_patterns())?;
        Ok(())
    }

    /// 检查是否忽略大小写
    pub fn ignore_case(&self) -> bool {
        !self.iname.is_empty()
    }

    /// 获取名称模式
    pub fn name_patterns(&self) -> &[String] {
        if !self.name.is_empty() {
            &self.name
        } else {
            &self.iname
        }
    }

    /// 构建定位器
    pub fn build_finder(&self) -> FindResult<Finder> {
        Ok(Finder::new(FindOptions::from_cli(self))
            .with_paths(self.paths.iter().cloned())
            .with_names(self.name_patterns().iter().cloned())
            .with_kind(KindFilter::from_code(&self.file_type)?))
    }
}
